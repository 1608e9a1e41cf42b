//! Outbound message delivery
//!
//! The notes core only ever needs to push text to a user, so delivery sits
//! behind the [`Messenger`] trait. [`DiscordMessenger`] is the production
//! implementation and sends direct messages through the Discord HTTP API.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use serenity::http::Http;
use serenity::model::id::UserId;
use std::sync::Arc;

use super::response::chunk_for_message;

/// Best-effort "send text to user" primitive
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, user_id: &str, text: &str) -> Result<()>;
}

/// Delivers messages as Discord direct messages
#[derive(Clone)]
pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Messenger for DiscordMessenger {
    async fn send(&self, user_id: &str, text: &str) -> Result<()> {
        let id: u64 = user_id
            .parse()
            .map_err(|_| anyhow!("Not a Discord user id: {user_id}"))?;

        let channel = UserId(id).create_dm_channel(&*self.http).await?;
        for chunk in chunk_for_message(text) {
            channel.say(&self.http, chunk).await?;
        }

        debug!("Delivered direct message to user {user_id}");
        Ok(())
    }
}
