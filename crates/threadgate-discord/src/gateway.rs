//! `ThreadGateway` implementation over the serenity HTTP client.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ChannelId, ChannelType, CreateMessage, EditThread, Http, MessageId, ReactionType, RoleId,
};
use serenity::model::channel::{Channel, GuildChannel, PermissionOverwrite, PermissionOverwriteType};
use serenity::model::permissions::Permissions;
use tracing::debug;

use threadgate_config::BotConfig;
use threadgate_schedule::gateway::ThreadGateway;
use threadgate_types::{GatewayError, MessageRef, ReactionMarker, ThreadHandle};

pub struct DiscordGateway {
    http: Arc<Http>,
    subscription_roles: HashMap<String, u64>,
}

impl DiscordGateway {
    pub fn new(http: Arc<Http>, config: &BotConfig) -> Self {
        Self {
            http,
            subscription_roles: config.subscription_roles.clone(),
        }
    }

    /// Mention prefix for configured roles that can currently see the
    /// thread's parent channel. Empty when nothing applies.
    async fn audience_mentions(&self, thread: &ThreadHandle) -> String {
        if self.subscription_roles.is_empty() {
            return String::new();
        }
        let Some(parent_id) = thread.parent_id else {
            return String::new();
        };
        let parent = match self.http.get_channel(ChannelId::new(parent_id)).await {
            Ok(Channel::Guild(ch)) => ch,
            Ok(_) | Err(_) => {
                debug!(parent_id, "could not inspect parent channel for mentions");
                return String::new();
            }
        };

        let roles: Vec<RoleId> = self
            .subscription_roles
            .values()
            .map(|&id| RoleId::new(id))
            .collect();
        mention_visible_roles(&parent.permission_overwrites, &roles)
    }
}

/// Render a mention string for the roles whose view of the channel is
/// not denied by its permission overwrites.
fn mention_visible_roles(overwrites: &[PermissionOverwrite], roles: &[RoleId]) -> String {
    let mut roles: Vec<RoleId> = roles.to_vec();
    roles.sort();

    roles
        .iter()
        .filter(|role| {
            !overwrites.iter().any(|ow| {
                matches!(ow.kind, PermissionOverwriteType::Role(id) if id == **role)
                    && ow.deny.contains(Permissions::VIEW_CHANNEL)
            })
        })
        .map(|role| format!("<@&{}>", role.get()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn thread_handle(ch: &GuildChannel) -> ThreadHandle {
    ThreadHandle {
        id: ch.id.get(),
        name: ch.name.clone(),
        parent_id: ch.parent_id.map(|id| id.get()),
        guild_id: Some(ch.guild_id.get()),
        hidden: ch.kind == ChannelType::PrivateThread,
    }
}

fn platform_err(e: serenity::Error) -> GatewayError {
    GatewayError::Platform(e.to_string())
}

fn is_not_found(e: &serenity::Error) -> bool {
    matches!(
        e,
        serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(resp))
            if resp.status_code.as_u16() == 404
    )
}

#[async_trait]
impl ThreadGateway for DiscordGateway {
    async fn resolve_thread(&self, id: u64) -> Result<Option<ThreadHandle>, GatewayError> {
        match self.http.get_channel(ChannelId::new(id)).await {
            // Only thread channels qualify as schedule targets.
            Ok(Channel::Guild(ch)) if ch.thread_metadata.is_some() => Ok(Some(thread_handle(&ch))),
            Ok(_) => Ok(None),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(platform_err(e)),
        }
    }

    fn is_hidden(&self, thread: &ThreadHandle) -> bool {
        thread.hidden
    }

    async fn unlock(&self, thread: &ThreadHandle) -> Result<(), GatewayError> {
        let builder = EditThread::new().locked(false).invitable(true);
        ChannelId::new(thread.id)
            .edit_thread(&self.http, builder)
            .await
            .map(|_| ())
            .map_err(platform_err)
    }

    async fn notify(&self, thread: &ThreadHandle, text: &str) -> Result<(), GatewayError> {
        let mentions = self.audience_mentions(thread).await;
        let content = if mentions.is_empty() {
            text.to_string()
        } else {
            format!("{mentions} {text}")
        };

        let builder = CreateMessage::new().content(content);
        ChannelId::new(thread.id)
            .send_message(&self.http, builder)
            .await
            .map(|_| ())
            .map_err(platform_err)
    }

    async fn react(
        &self,
        message: &MessageRef,
        marker: ReactionMarker,
    ) -> Result<(), GatewayError> {
        let reaction = ReactionType::Unicode(marker.emoji().to_string());
        self.http
            .create_reaction(
                ChannelId::new(message.channel_id),
                MessageId::new(message.message_id),
                &reaction,
            )
            .await
            .map_err(platform_err)
    }
}
