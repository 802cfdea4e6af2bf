//! Create command - adds a quote typed directly into chat

use crate::service::QuoteService;

pub fn execute(
    service: &QuoteService,
    text: &str,
    author: Option<&str>,
    actor_name: &str,
) -> Result<String, String> {
    let quote = service
        .create_quote(text, author, actor_name)
        .map_err(|e| e.to_string())?;
    Ok(format!(
        "Quote #{} added: \"{}\" - {} ({})",
        quote.id, quote.text, quote.author, quote.date
    ))
}
