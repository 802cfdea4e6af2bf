//! Authors command - the leaderboard, count descending

use crate::service::QuoteService;

pub fn execute(service: &QuoteService) -> Result<String, String> {
    let authors = service.list_authors();
    if authors.is_empty() {
        return Ok("No quotes to display".to_string());
    }

    let mut out = String::from("**Authors**");
    for author in &authors {
        let plural = if author.count == 1 { "quote" } else { "quotes" };
        out.push_str(&format!(
            "\n{}: {} {} ({})",
            author.name, author.count, plural, author.category
        ));
    }
    Ok(out)
}
