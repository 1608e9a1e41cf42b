use anyhow::Result;
use log::{debug, info, warn};
use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::{chat_user, CommandContext};
use crate::commands::handlers::notes::dm_only_notice;
use crate::features::conversation::{ChatEvent, MenuAction, Reply, MENU_LAYOUT};

/// Handler for main menu button clicks
pub struct MessageComponentHandler {
    context: Arc<CommandContext>,
}

impl MessageComponentHandler {
    pub fn new(context: Arc<CommandContext>) -> Self {
        Self { context }
    }

    /// Route a button click to the wizard as if the matching command was used
    pub async fn handle_component_interaction(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let custom_id = &interaction.data.custom_id;
        let user = chat_user(&interaction.user);

        info!("[{request_id}] 📥 Component interaction: {custom_id} from user: {}", user.id);

        let Some(action) = MenuAction::from_button_id(custom_id) else {
            warn!("[{request_id}] Unknown component id: {custom_id}");
            return Self::respond(ctx, interaction, &[Reply::text("Unknown action.")]).await;
        };

        if interaction.guild_id.is_some() {
            let notice = Reply::text(dm_only_notice(action.command_name()));
            return Self::respond(ctx, interaction, &[notice]).await;
        }

        let replies = self
            .context
            .wizard
            .handle(&user, ChatEvent::Action(action))
            .await?;
        debug!("[{request_id}] {custom_id} produced {} replies", replies.len());

        Self::respond(ctx, interaction, &replies).await
    }

    /// Main menu: one button per note action
    pub fn create_main_menu() -> CreateComponents {
        let mut components = CreateComponents::default();
        for row in MENU_LAYOUT {
            components.create_action_row(|action_row| {
                for action in row.iter() {
                    action_row.create_button(|button| {
                        button
                            .custom_id(action.button_id())
                            .label(action.label())
                            .style(Self::button_style(*action))
                    });
                }
                action_row
            });
        }
        components
    }

    fn button_style(action: MenuAction) -> ButtonStyle {
        match action {
            MenuAction::CreateNote => ButtonStyle::Success,
            MenuAction::DeleteNote => ButtonStyle::Danger,
            MenuAction::ViewNotes => ButtonStyle::Primary,
            _ => ButtonStyle::Secondary,
        }
    }

    async fn respond(
        ctx: &Context,
        interaction: &MessageComponentInteraction,
        replies: &[Reply],
    ) -> Result<()> {
        let Some((first, rest)) = replies.split_first() else {
            return Ok(());
        };

        interaction
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.content(&first.text);
                        if first.show_menu {
                            message.set_components(Self::create_main_menu());
                        }
                        message
                    })
            })
            .await?;

        for reply in rest {
            interaction
                .create_followup_message(&ctx.http, |message| {
                    message.content(&reply.text);
                    if reply.show_menu {
                        message.set_components(Self::create_main_menu());
                    }
                    message
                })
                .await?;
        }

        Ok(())
    }
}
