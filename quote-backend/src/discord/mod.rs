//! Discord gateway integration: the event handler and command dispatch.

pub mod commands;
mod sink;

pub use sink::SerenityPresenceSink;

use std::sync::Arc;

use serenity::all::{Context, EventHandler, Message, Ready};

use crate::rave::{self, RaveController};
use crate::service::QuoteService;
use crate::store::QuoteStore;

pub struct Handler {
    pub service: Arc<QuoteService>,
    pub rave: Arc<RaveController>,
    pub store: Arc<QuoteStore>,
    pub owner_id: u64,
}

#[serenity::async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        log::info!("Bot connected as {}", ready.user.name);
        let sink = SerenityPresenceSink::new(ctx);
        rave::apply_daily_status(&self.store, &sink).await;
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore messages from bots (including ourselves)
        if msg.author.bot {
            return;
        }
        let Some(cmd) = commands::parse(&msg.content) else {
            return;
        };

        log::info!("Command from {} ({}): {:?}", msg.author.name, msg.author.id, cmd);

        let reply = match commands::execute(cmd, &ctx, &msg, self).await {
            Ok(text) => text,
            Err(text) => text,
        };
        for chunk in split_message(&reply, 2000) {
            if let Err(e) = msg.channel_id.say(&ctx.http, &chunk).await {
                log::error!("Failed to send Discord message: {}", e);
            }
        }
    }
}

/// Split a message into chunks respecting Discord's character limit.
fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.chars().count() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in text.split('\n') {
        let line_len = line.chars().count();

        if !current.is_empty() && current_len + line_len + 1 > max_len {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > max_len {
            // A single oversized line gets hard-wrapped.
            let mut buf = String::new();
            let mut buf_len = 0usize;
            for ch in line.chars() {
                if buf_len == max_len {
                    chunks.push(std::mem::take(&mut buf));
                    buf_len = 0;
                }
                buf.push(ch);
                buf_len += 1;
            }
            current = buf;
            current_len = buf_len;
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
