//! Discord collaborator for threadgate.
//!
//! Uses serenity to connect to the Discord Gateway, watch the intake
//! channel for schedule commands, and perform the unlock/notify side
//! effects when the scheduler fires. The scheduling engine itself lives
//! in `threadgate-schedule` and only talks to Discord through the
//! `ThreadGateway` trait implemented in [`gateway`].

pub mod gateway;
pub mod handler;

use anyhow::Context as _;
use serenity::Client;
use serenity::all::GatewayIntents;
use tracing::info;

use threadgate_config::BotConfig;
use threadgate_schedule::queue::ScheduleQueue;

/// Discord client wrapper owning the intake handler and scheduler wiring.
pub struct DiscordBot {
    config: BotConfig,
}

impl DiscordBot {
    pub fn new(config: BotConfig) -> Self {
        Self { config }
    }

    /// Connect and run until process shutdown.
    ///
    /// The schedule queue is created empty here: pending requests do
    /// not survive a restart.
    pub async fn run(self) -> anyhow::Result<()> {
        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let queue = ScheduleQueue::shared();
        let handler = handler::IntakeHandler::new(self.config.clone(), queue);

        let mut client = Client::builder(&self.config.discord_token, intents)
            .event_handler(handler)
            .await
            .context("failed to create Discord client")?;

        info!(
            intake_channel = self.config.schedule_channel_id,
            thread_channel = self.config.thread_channel_id,
            "starting Discord client"
        );

        client.start().await.context("Discord client error")
    }
}
