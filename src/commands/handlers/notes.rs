//! Note command handler
//!
//! Handles: start, create, view, update, delete, remind
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Redirect guild invocations to DMs
//! - 1.0.0: Initial release

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::{chat_user, CommandContext};
use crate::commands::handler::SlashCommandHandler;
use crate::features::conversation::{ChatEvent, MenuAction, Reply};
use crate::message_components::MessageComponentHandler;

/// Handler for every note command; each one opens the matching dialogue
pub struct NotesHandler;

pub(crate) fn dm_only_notice(command_name: &str) -> String {
    format!("Notes are private, so I only work in direct messages. Send me a DM and use /{command_name} there.")
}

#[async_trait]
impl SlashCommandHandler for NotesHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["start", "create", "view", "update", "delete", "remind"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let name = command.data.name.as_str();
        let Some(action) = MenuAction::from_command(name) else {
            return Ok(());
        };

        if command.guild_id.is_some() {
            debug!("[{request_id}] /{name} used in a guild, pointing user to DMs");
            command
                .create_interaction_response(&serenity_ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message.content(dm_only_notice(name)).ephemeral(true)
                        })
                })
                .await?;
            return Ok(());
        }

        let user = chat_user(&command.user);
        let replies = ctx.wizard.handle(&user, ChatEvent::Action(action)).await?;
        debug!("[{request_id}] /{name} produced {} replies", replies.len());

        respond_with_replies(serenity_ctx, command, &replies).await?;
        info!("[{request_id}] ✅ /{name} completed for user {}", user.id);
        Ok(())
    }
}

/// First reply answers the interaction, the rest go out as follow-ups
async fn respond_with_replies(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    replies: &[Reply],
) -> Result<()> {
    let Some((first, rest)) = replies.split_first() else {
        return Ok(());
    };

    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| {
                    message.content(&first.text);
                    if first.show_menu {
                        message.set_components(MessageComponentHandler::create_main_menu());
                    }
                    message
                })
        })
        .await?;

    for reply in rest {
        command
            .create_followup_message(&serenity_ctx.http, |message| {
                message.content(&reply.text);
                if reply.show_menu {
                    message.set_components(MessageComponentHandler::create_main_menu());
                }
                message
            })
            .await?;
    }

    Ok(())
}
