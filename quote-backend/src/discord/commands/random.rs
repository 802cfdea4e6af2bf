//! Random command - a fresh pick per invocation

use crate::service::QuoteService;

pub fn execute(service: &QuoteService, actor_id: u64) -> Result<String, String> {
    let quote = service.pick_random(actor_id).map_err(|e| e.to_string())?;
    Ok(format!(
        "#{}: \"{}\" - {} ({})",
        quote.id, quote.text, quote.author, quote.date
    ))
}
