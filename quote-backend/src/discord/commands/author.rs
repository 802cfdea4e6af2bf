//! Author command - one author's quotes, looked up case-insensitively

use crate::service::QuoteService;

pub fn execute(service: &QuoteService, name: &str) -> Result<String, String> {
    let quotes = service.list_by_author(name);
    if quotes.is_empty() {
        return Ok(format!("No quotes found for author '{}'.", name));
    }

    // Stored casing wins over whatever the caller typed.
    let wanted = name.to_lowercase();
    let display = quotes[0]
        .author_names()
        .find(|a| a.to_lowercase() == wanted)
        .unwrap_or(name)
        .to_string();

    let plural = if quotes.len() == 1 { "quote" } else { "quotes" };
    let mut out = format!("**Quotes by {}**\nTotal: {} {}", display, quotes.len(), plural);
    for quote in &quotes {
        out.push_str(&format!("\n#{} - {}: \"{}\"", quote.id, quote.date, quote.text));
    }
    Ok(out)
}
