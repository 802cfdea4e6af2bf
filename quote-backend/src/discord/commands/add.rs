//! Add command - harvests quote(s) from recent channel messages

use serenity::all::{Context, GetMessages, Message};

use crate::models::HarvestedMessage;
use crate::service::QuoteService;

/// Fetched history depth, generous enough to cover skips and bot noise.
const HISTORY_FETCH_LIMIT: u8 = 50;

pub async fn execute(
    ctx: &Context,
    msg: &Message,
    service: &QuoteService,
    count: usize,
    author: Option<&str>,
    skip: usize,
) -> Result<String, String> {
    let history = msg
        .channel_id
        .messages(&ctx.http, GetMessages::new().limit(HISTORY_FETCH_LIMIT))
        .await
        .map_err(|e| format!("Failed to fetch channel history: {}", e))?;

    // The invoking command message is part of the history; drop it.
    let harvested: Vec<HarvestedMessage> = history
        .iter()
        .filter(|m| m.id != msg.id)
        .map(|m| HarvestedMessage {
            author_name: m.author.name.clone(),
            author_is_bot: m.author.bot,
            content: m.content.clone(),
        })
        .collect();

    let quote = service
        .harvest_quotes(&harvested, count, skip, author)
        .map_err(|e| e.to_string())?;

    let preview: String = if quote.text.chars().count() <= 100 {
        quote.text.clone()
    } else {
        let head: String = quote.text.chars().take(97).collect();
        format!("{}...", head)
    };
    Ok(format!(
        "Quote #{} added: \"{}\" - {} ({})",
        quote.id, preview, quote.author, quote.date
    ))
}
