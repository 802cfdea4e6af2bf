use async_trait::async_trait;
use serenity::all::{ActivityData, ChannelId, Context, OnlineStatus};

use crate::rave::PresenceSink;
use crate::selection;

/// Presence and broadcast sink over a live gateway context.
pub struct SerenityPresenceSink {
    ctx: Context,
}

impl SerenityPresenceSink {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl PresenceSink for SerenityPresenceSink {
    async fn set_quote_status(&self, text: &str) -> Result<(), String> {
        self.ctx
            .set_presence(Some(ActivityData::custom(text)), OnlineStatus::Online);
        Ok(())
    }

    async fn set_fallback_status(&self) -> Result<(), String> {
        self.ctx.set_presence(
            Some(ActivityData::watching(selection::FALLBACK_STATUS)),
            OnlineStatus::Online,
        );
        Ok(())
    }

    async fn send_channel_message(&self, channel_id: u64, text: &str) -> Result<(), String> {
        ChannelId::new(channel_id)
            .say(&self.ctx.http, text)
            .await
            .map(|_| ())
            .map_err(|e| format!("Failed to send message: {}", e))
    }
}
