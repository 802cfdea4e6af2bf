//! Daily command - the same quote for everyone on a given day

use crate::service::QuoteService;

pub fn execute(service: &QuoteService) -> Result<String, String> {
    let quote = service.pick_daily().map_err(|e| e.to_string())?;
    Ok(format!(
        "Daily Quote\n#{}: \"{}\" - {} ({})",
        quote.id, quote.text, quote.author, quote.date
    ))
}
