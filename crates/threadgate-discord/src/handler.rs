//! Serenity EventHandler: intake channel watcher + scheduler bootstrap.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{debug, info};

use threadgate_config::BotConfig;
use threadgate_schedule::intake;
use threadgate_schedule::publisher::Publisher;
use threadgate_schedule::queue::SharedQueue;
use threadgate_types::MessageRef;

use crate::gateway::DiscordGateway;

pub struct IntakeHandler {
    config: BotConfig,
    queue: SharedQueue,
    scheduler_started: AtomicBool,
}

impl IntakeHandler {
    pub fn new(config: BotConfig, queue: SharedQueue) -> Self {
        Self {
            config,
            queue,
            scheduler_started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EventHandler for IntakeHandler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.channel_id.get() != self.config.schedule_channel_id || msg.author.bot {
            return;
        }

        debug!(message_id = %msg.id, "message in intake channel");

        let gateway = DiscordGateway::new(ctx.http.clone(), &self.config);
        let source = MessageRef {
            channel_id: msg.channel_id.get(),
            message_id: msg.id.get(),
        };

        match intake::handle_submission(&msg.content, source, &gateway, &self.queue).await {
            Ok(req) => info!(
                thread_id = req.thread_id,
                publish_at = %req.publish_at,
                "queued schedule request"
            ),
            Err(reason) => debug!(message_id = %msg.id, "rejected schedule command: {reason}"),
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(bot_name = ready.user.name, "Discord bot connected and ready");

        // `ready` fires again after a session resume; start the loop once.
        if self.scheduler_started.swap(true, Ordering::SeqCst) {
            return;
        }

        let gateway = Arc::new(DiscordGateway::new(ctx.http.clone(), &self.config));
        let publisher = Publisher::new(self.queue.clone(), gateway, self.config.tick_interval);
        tokio::spawn(publisher.run());
    }
}
