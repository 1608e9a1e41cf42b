use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use notekeeper::commands::{
    register_global_commands, register_guild_commands, CommandContext, CommandHandler,
};
use notekeeper::core::{Config, DiscordMessenger};
use notekeeper::database::Database;
use notekeeper::features::conversation::{ConversationStore, NoteWizard};
use notekeeper::features::get_bot_version;
use notekeeper::features::reminders::ReminderScheduler;
use notekeeper::message_components::MessageComponentHandler;

struct Handler {
    command_handler: Arc<CommandHandler>,
    component_handler: Arc<MessageComponentHandler>,
    guild_id: Option<GuildId>,
}

impl Handler {
    fn new(context: Arc<CommandContext>, guild_id: Option<GuildId>) -> Self {
        Handler {
            command_handler: Arc::new(CommandHandler::new(Arc::clone(&context))),
            component_handler: Arc::new(MessageComponentHandler::new(context)),
            guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        if let Err(e) = self.command_handler.handle_message(&ctx, &msg).await {
            error!("Error handling message: {e}");
            if let Err(why) = msg
                .channel_id
                .say(
                    &ctx.http,
                    "Sorry, I encountered an error processing your message.",
                )
                .await
            {
                error!("Failed to send error message: {why}");
            }
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);
        info!("📦 Version: {}", get_bot_version());

        // Guild commands update instantly, global ones can take up to an hour
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                if let Err(e) = self
                    .command_handler
                    .handle_slash_command(&ctx, &command)
                    .await
                {
                    error!(
                        "Error handling slash command '{}': {}",
                        command.data.name, e
                    );

                    let error_message =
                        "❌ Sorry, I encountered an error processing your command. Please try again.";
                    let _ = command
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| {
                                    message.content(error_message)
                                })
                        })
                        .await;
                }
            }
            Interaction::MessageComponent(component) => {
                if let Err(e) = self
                    .component_handler
                    .handle_component_interaction(&ctx, &component)
                    .await
                {
                    error!(
                        "Error handling component interaction '{}': {}",
                        component.data.custom_id, e
                    );

                    let error_message =
                        "❌ Sorry, I encountered an error processing your interaction. Please try again.";
                    let _ = component
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| {
                                    message.content(error_message)
                                })
                        })
                        .await;
                }
            }
            _ => {}
        }
    }
}

fn parse_guild_id(raw: Option<&str>) -> Option<GuildId> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(id) => Some(GuildId(id)),
        Err(_) => {
            warn!("Ignoring DISCORD_GUILD_ID '{raw}': not a numeric id");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Notekeeper Discord Bot v{}...", get_bot_version());

    let database = Database::new(&config.database_path).await?;

    // Reminders are sent outside any event, so they get their own REST client
    let http = Arc::new(Http::new(&config.discord_token));
    let messenger = Arc::new(DiscordMessenger::new(http));
    let scheduler = ReminderScheduler::new(database.clone(), messenger);
    let wizard = NoteWizard::new(database, ConversationStore::new(), scheduler);
    let context = Arc::new(CommandContext::new(wizard));

    let guild_id = parse_guild_id(config.discord_guild_id.as_deref());
    let handler = Handler::new(context, guild_id);

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Establishing WebSocket connection to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
