//! Delete command - removes one of the caller's quotes

use crate::service::{QuoteError, QuoteService};

pub fn execute(
    service: &QuoteService,
    id: u64,
    actor_name: &str,
    actor_id: u64,
) -> Result<String, String> {
    let removed = service
        .delete_quote(id, actor_name, actor_id)
        .map_err(|e| match e {
            QuoteError::Forbidden => "You can only delete your own quotes.".to_string(),
            other => other.to_string(),
        })?;
    Ok(format!(
        "Quote #{} deleted: \"{}\" - {} ({})",
        removed.id, removed.text, removed.author, removed.date
    ))
}
