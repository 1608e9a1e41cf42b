use anyhow::Result;
use log::{debug, error, info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::{chat_user, CommandContext};
use crate::commands::handlers::create_all_handlers;
use crate::commands::registry::CommandRegistry;
use crate::features::conversation::ChatEvent;
use crate::message_components::MessageComponentHandler;

/// Entry point for direct messages and slash commands
#[derive(Clone)]
pub struct CommandHandler {
    context: Arc<CommandContext>,
    registry: CommandRegistry,
}

impl CommandHandler {
    pub fn new(context: Arc<CommandContext>) -> Self {
        Self {
            context,
            registry: CommandRegistry::from_handlers(create_all_handlers()),
        }
    }

    pub fn context(&self) -> Arc<CommandContext> {
        Arc::clone(&self.context)
    }

    /// Feed a direct message into the user's dialogue
    ///
    /// Guild messages are ignored; notes are only handled in DMs.
    pub async fn handle_message(&self, ctx: &Context, msg: &Message) -> Result<()> {
        if msg.guild_id.is_some() {
            return Ok(());
        }

        let request_id = Uuid::new_v4();
        let user = chat_user(&msg.author);
        let content = msg.content.trim();

        info!(
            "[{}] 📥 DM received | User: {} | Content: '{}'",
            request_id,
            user.id,
            content.chars().take(100).collect::<String>()
        );

        if content.is_empty() {
            debug!("[{request_id}] Ignoring message without text");
            return Ok(());
        }

        let replies = self
            .context
            .wizard
            .handle(&user, ChatEvent::Text(content.to_string()))
            .await?;

        for reply in &replies {
            debug!("[{request_id}] 📤 Sending reply ({} chars)", reply.text.len());
            msg.channel_id
                .send_message(&ctx.http, |message| {
                    message.content(&reply.text);
                    if reply.show_menu {
                        message.set_components(MessageComponentHandler::create_main_menu());
                    }
                    message
                })
                .await?;
        }

        info!("[{request_id}] ✅ Sent {} replies", replies.len());
        Ok(())
    }

    /// Dispatch a slash command to its registered handler
    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let guild_id = command
            .guild_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "DM".to_string());

        info!(
            "[{}] 📥 Slash command received | Command: {} | User: {} | Guild: {}",
            request_id, command.data.name, command.user.id, guild_id
        );

        match self.registry.get(&command.data.name) {
            Some(handler) => {
                if let Err(e) = handler.handle(self.context(), ctx, command).await {
                    error!("[{request_id}] ❌ /{} failed: {e}", command.data.name);
                    return Err(e);
                }
            }
            None => {
                warn!("[{request_id}] Unknown slash command: {}", command.data.name);
                command
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content("Unknown command.").ephemeral(true)
                            })
                    })
                    .await?;
            }
        }

        Ok(())
    }
}
