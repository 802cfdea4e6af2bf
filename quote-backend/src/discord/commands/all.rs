//! All command - the full quote list, owner only

use crate::service::QuoteService;

/// Quotes per displayed page.
const PAGE_SIZE: usize = 25;

pub fn execute(service: &QuoteService, is_owner: bool) -> Result<String, String> {
    if !is_owner {
        return Err("Owner-only command.".to_string());
    }

    let quotes = service.list_all();
    if quotes.is_empty() {
        return Ok("No quotes to display.".to_string());
    }

    let mut out = String::from("**All Quotes**");
    for (i, quote) in quotes.iter().enumerate() {
        if i > 0 && i % PAGE_SIZE == 0 {
            out.push_str("\n\n**All Quotes (continued)**");
        }
        out.push_str(&format!(
            "\n#{} - {}: \"{}\" ({})",
            quote.id, quote.author, quote.text, quote.date
        ));
    }
    Ok(out)
}
