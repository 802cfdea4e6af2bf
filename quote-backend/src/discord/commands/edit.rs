//! Edit command - replaces the text of one of the caller's quotes

use crate::service::{QuoteError, QuoteService};

pub fn execute(
    service: &QuoteService,
    id: u64,
    text: &str,
    actor_name: &str,
    actor_id: u64,
) -> Result<String, String> {
    let edited = service
        .edit_quote(id, text, actor_name, actor_id)
        .map_err(|e| match e {
            QuoteError::Forbidden => "You can only edit your own quotes.".to_string(),
            other => other.to_string(),
        })?;
    Ok(format!(
        "Quote #{} updated!\nOld: \"{}\"\nNew: \"{}\" - {} ({})",
        id, edited.old_text, edited.quote.text, edited.quote.author, edited.quote.date
    ))
}
