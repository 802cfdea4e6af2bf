//! Mine command - lists the caller's quotes and their rank

use crate::service::QuoteService;

pub fn execute(service: &QuoteService, actor_name: &str) -> Result<String, String> {
    if service.list_all().is_empty() {
        return Ok("No quotes yet.".to_string());
    }

    let (mine, category) = service.list_mine(actor_name);
    if mine.is_empty() {
        return Ok(format!("You don't have any quotes yet, {}!", actor_name));
    }

    let plural = if mine.len() == 1 { "quote" } else { "quotes" };
    let mut out = format!(
        "**Quotes by {}**\nTotal: {} {} - {}",
        actor_name,
        mine.len(),
        plural,
        category
    );
    for quote in &mine {
        out.push_str(&format!("\n#{} - {}: \"{}\"", quote.id, quote.date, quote.text));
    }
    Ok(out)
}
