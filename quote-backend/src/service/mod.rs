//! The operations behind every chat command: creation, harvesting,
//! mutation and retrieval of quotes over the flat-file store.

pub mod error;

pub use error::QuoteError;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Local, Utc};

use crate::auth;
use crate::models::{HarvestedMessage, Quote};
use crate::selection;
use crate::store::{self, QuoteStore};

/// Maximum quote text length after trimming.
pub const QUOTE_MAX_LEN: usize = 500;

/// Result of an edit: the replaced text alongside the updated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedQuote {
    pub old_text: String,
    pub quote: Quote,
}

/// One row of the author leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    pub name: String,
    pub count: usize,
    pub category: &'static str,
}

pub struct QuoteService {
    store: Arc<QuoteStore>,
    owner_id: u64,
}

impl QuoteService {
    pub fn new(store: Arc<QuoteStore>, owner_id: u64) -> Self {
        Self { store, owner_id }
    }

    fn validated_text(text: &str) -> Result<String, QuoteError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(QuoteError::EmptyText);
        }
        let len = trimmed.chars().count();
        if len > QUOTE_MAX_LEN {
            return Err(QuoteError::TooLong(len));
        }
        Ok(trimmed.to_string())
    }

    fn today() -> String {
        Local::now().format("%d/%m/%Y").to_string()
    }

    /// Adds a quote typed directly into the create command. The author
    /// defaults to the invoking user's display name.
    pub fn create_quote(
        &self,
        text: &str,
        author: Option<&str>,
        actor_name: &str,
    ) -> Result<Quote, QuoteError> {
        let text = Self::validated_text(text)?;
        let author = author
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(actor_name)
            .to_string();
        let date = Self::today();

        self.store.update(move |quotes| {
            let quote = Quote {
                id: store::next_id(quotes),
                text,
                author,
                date,
            };
            quotes.push(quote.clone());
            Ok(quote)
        })
    }

    /// Builds one quote out of recent channel messages.
    ///
    /// `messages` arrive most-recent-first. Bot messages are dropped, then
    /// `skip` newest are skipped and `count` taken, re-ordered oldest-first.
    /// An author filter (case-insensitive) may narrow the set afterwards.
    /// When contributors differ, each line carries its author; the author
    /// field is the first-seen-order, case-insensitively deduplicated list.
    pub fn harvest_quotes(
        &self,
        messages: &[HarvestedMessage],
        count: usize,
        skip: usize,
        author_filter: Option<&str>,
    ) -> Result<Quote, QuoteError> {
        let non_bot: Vec<&HarvestedMessage> =
            messages.iter().filter(|m| !m.author_is_bot).collect();
        if non_bot.is_empty() {
            return Err(QuoteError::NoMessages);
        }
        if skip >= non_bot.len() {
            return Err(QuoteError::SkipOutOfRange {
                skip,
                available: non_bot.len(),
            });
        }

        let available = &non_bot[skip..];
        if count > available.len() {
            return Err(QuoteError::NotEnoughMessages {
                requested: count,
                available: available.len(),
            });
        }

        // Oldest first, for reading order.
        let mut selected: Vec<&HarvestedMessage> = available[..count].to_vec();
        selected.reverse();

        if let Some(author) = author_filter {
            let wanted = author.to_lowercase();
            selected.retain(|m| m.author_name.to_lowercase() == wanted);
            if selected.is_empty() {
                return Err(QuoteError::NoneFromAuthor(author.to_string()));
            }
        }

        let valid: Vec<&HarvestedMessage> = selected
            .into_iter()
            .filter(|m| !m.content.trim().is_empty())
            .collect();
        if valid.is_empty() {
            return Err(QuoteError::AllEmpty);
        }

        let mut authors: Vec<String> = Vec::new();
        let mut seen = HashSet::new();
        for message in &valid {
            if seen.insert(message.author_name.to_lowercase()) {
                authors.push(message.author_name.clone());
            }
        }

        let multi = authors.len() > 1;
        let lines: Vec<String> = valid
            .iter()
            .map(|m| {
                let text = m.content.trim();
                if multi {
                    format!("{} - {}", text, m.author_name)
                } else {
                    text.to_string()
                }
            })
            .collect();
        let combined = lines.join("\n");
        let len = combined.chars().count();
        if len > QUOTE_MAX_LEN {
            return Err(QuoteError::TooLong(len));
        }

        let author = authors.join(", ");
        let date = Self::today();

        self.store.update(move |quotes| {
            let quote = Quote {
                id: store::next_id(quotes),
                text: combined,
                author,
                date,
            };
            quotes.push(quote.clone());
            Ok(quote)
        })
    }

    /// Replaces a quote's text. Author and date stay as created.
    pub fn edit_quote(
        &self,
        id: u64,
        new_text: &str,
        actor_name: &str,
        actor_id: u64,
    ) -> Result<EditedQuote, QuoteError> {
        let text = Self::validated_text(new_text)?;
        let owner_id = self.owner_id;
        let actor_name = actor_name.to_string();

        self.store.update(move |quotes| {
            let Some(quote) = quotes.iter_mut().find(|q| q.id == id) else {
                return Err(QuoteError::NotFound(id));
            };
            if !auth::can_modify(&actor_name, actor_id, quote, owner_id) {
                return Err(QuoteError::Forbidden);
            }
            let old_text = std::mem::replace(&mut quote.text, text);
            Ok(EditedQuote {
                old_text,
                quote: quote.clone(),
            })
        })
    }

    /// Removes a quote and returns the removed record.
    pub fn delete_quote(
        &self,
        id: u64,
        actor_name: &str,
        actor_id: u64,
    ) -> Result<Quote, QuoteError> {
        let owner_id = self.owner_id;
        let actor_name = actor_name.to_string();

        self.store.update(move |quotes| {
            let Some(position) = quotes.iter().position(|q| q.id == id) else {
                return Err(QuoteError::NotFound(id));
            };
            if !auth::can_modify(&actor_name, actor_id, &quotes[position], owner_id) {
                return Err(QuoteError::Forbidden);
            }
            Ok(quotes.remove(position))
        })
    }

    /// The actor's quotes (case-insensitive author match) and their rank.
    pub fn list_mine(&self, actor_name: &str) -> (Vec<Quote>, &'static str) {
        let mine: Vec<Quote> = self
            .store
            .load()
            .into_iter()
            .filter(|q| q.has_author(actor_name))
            .collect();
        let category = selection::categorize(mine.len());
        (mine, category)
    }

    /// All quotes in insertion order. Pagination is presentational and
    /// left to the command layer.
    pub fn list_all(&self) -> Vec<Quote> {
        self.store.load()
    }

    /// Quotes by one author; lookup is case-insensitive, stored casing wins.
    pub fn list_by_author(&self, name: &str) -> Vec<Quote> {
        self.store
            .load()
            .into_iter()
            .filter(|q| q.has_author(name))
            .collect()
    }

    /// Every known author with quote count and rank, count descending.
    /// Multi-contributor quotes count once per contributor; the displayed
    /// casing is the earliest seen.
    pub fn list_authors(&self) -> Vec<AuthorSummary> {
        let quotes = self.store.load();
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for quote in &quotes {
            for name in quote.author_names() {
                let count = counts.entry(name.to_lowercase()).or_insert(0);
                if *count == 0 {
                    order.push(name.to_string());
                }
                *count += 1;
            }
        }

        let mut summaries: Vec<AuthorSummary> = order
            .into_iter()
            .map(|name| {
                let count = counts[&name.to_lowercase()];
                AuthorSummary {
                    category: selection::categorize(count),
                    name,
                    count,
                }
            })
            .collect();
        summaries.sort_by(|a, b| b.count.cmp(&a.count));
        summaries
    }

    /// Today's quote: same pick for every caller on the same calendar day.
    pub fn pick_daily(&self) -> Result<Quote, QuoteError> {
        let quotes = self.store.load();
        if quotes.is_empty() {
            return Err(QuoteError::NoQuotes);
        }
        let index = selection::daily_index(&selection::today_key(), quotes.len());
        Ok(quotes[index].clone())
    }

    /// A fresh pick per invocation, salted by the invoking user.
    pub fn pick_random(&self, actor_id: u64) -> Result<Quote, QuoteError> {
        let quotes = self.store.load();
        if quotes.is_empty() {
            return Err(QuoteError::NoQuotes);
        }
        let timestamp = Utc::now().timestamp_micros();
        let index = selection::random_index(quotes.len(), timestamp, &actor_id.to_string());
        Ok(quotes[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HarvestedMessage;

    const OWNER: u64 = 1000;
    const USER: u64 = 5;

    fn service(dir: &tempfile::TempDir) -> QuoteService {
        let store = Arc::new(QuoteStore::new(dir.path().join("quotes.json")));
        QuoteService::new(store, OWNER)
    }

    #[test]
    fn test_create_assigns_ids_and_trims() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let first = service.create_quote("  hello  ", None, "Alice").unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.text, "hello");
        assert_eq!(first.author, "Alice");

        let second = service.create_quote("again", Some("Bob"), "Alice").unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(second.author, "Bob");
    }

    #[test]
    fn test_create_rejects_empty_and_too_long() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        assert_eq!(
            service.create_quote("   ", None, "Alice"),
            Err(QuoteError::EmptyText)
        );

        let exactly_500 = "x".repeat(QUOTE_MAX_LEN);
        assert!(service.create_quote(&exactly_500, None, "Alice").is_ok());

        let too_long = "x".repeat(QUOTE_MAX_LEN + 1);
        assert_eq!(
            service.create_quote(&too_long, None, "Alice"),
            Err(QuoteError::TooLong(QUOTE_MAX_LEN + 1))
        );
    }

    #[test]
    fn test_harvest_single_author_bare_lines() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        // Most-recent-first, as the history endpoint returns them.
        let messages = vec![
            HarvestedMessage::new("Alice", "third"),
            HarvestedMessage::new("Alice", "second"),
            HarvestedMessage::new("Alice", "first"),
        ];
        let quote = service.harvest_quotes(&messages, 3, 0, None).unwrap();
        assert_eq!(quote.text, "first\nsecond\nthird");
        assert_eq!(quote.author, "Alice");
    }

    #[test]
    fn test_harvest_multiple_authors_tagged_lines() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let messages = vec![
            HarvestedMessage::new("Bob", "reply"),
            HarvestedMessage::new("Alice", "opening"),
        ];
        let quote = service.harvest_quotes(&messages, 2, 0, None).unwrap();
        assert_eq!(quote.text, "opening - Alice\nreply - Bob");
        assert_eq!(quote.author, "Alice, Bob");
    }

    #[test]
    fn test_harvest_dedupes_authors_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let messages = vec![
            HarvestedMessage::new("alice", "later"),
            HarvestedMessage::new("Bob", "middle"),
            HarvestedMessage::new("Alice", "earlier"),
        ];
        let quote = service.harvest_quotes(&messages, 3, 0, None).unwrap();
        // First-seen casing wins; chronological scan sees "Alice" first.
        assert_eq!(quote.author, "Alice, Bob");
    }

    #[test]
    fn test_harvest_skips_bots_and_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let mut bot = HarvestedMessage::new("QuoteBot", "beep");
        bot.author_is_bot = true;
        let messages = vec![bot.clone(), HarvestedMessage::new("Alice", "real")];

        assert_eq!(
            service.harvest_quotes(&[bot], 1, 0, None),
            Err(QuoteError::NoMessages)
        );
        assert_eq!(
            service.harvest_quotes(&messages, 1, 1, None),
            Err(QuoteError::SkipOutOfRange { skip: 1, available: 1 })
        );
        assert_eq!(
            service.harvest_quotes(&messages, 2, 0, None),
            Err(QuoteError::NotEnoughMessages { requested: 2, available: 1 })
        );

        let quote = service.harvest_quotes(&messages, 1, 0, None).unwrap();
        assert_eq!(quote.text, "real");
    }

    #[test]
    fn test_harvest_author_filter_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let messages = vec![
            HarvestedMessage::new("Bob", "noise"),
            HarvestedMessage::new("Alice", "keep"),
        ];
        let quote = service.harvest_quotes(&messages, 2, 0, Some("alice")).unwrap();
        assert_eq!(quote.text, "keep");
        assert_eq!(quote.author, "Alice");

        assert_eq!(
            service.harvest_quotes(&messages, 2, 0, Some("Carol")),
            Err(QuoteError::NoneFromAuthor("Carol".to_string()))
        );
    }

    #[test]
    fn test_harvest_rejects_all_empty() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let messages = vec![
            HarvestedMessage::new("Alice", "   "),
            HarvestedMessage::new("Alice", "\n"),
        ];
        assert_eq!(
            service.harvest_quotes(&messages, 2, 0, None),
            Err(QuoteError::AllEmpty)
        );
    }

    #[test]
    fn test_edit_respects_authorization() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        let created = service.create_quote("original", Some("Alice"), "Alice").unwrap();

        assert_eq!(
            service.edit_quote(99, "new", "Alice", USER),
            Err(QuoteError::NotFound(99))
        );
        assert_eq!(
            service.edit_quote(created.id, "new", "Mallory", USER),
            Err(QuoteError::Forbidden)
        );

        let edited = service.edit_quote(created.id, " new text ", "Alice", USER).unwrap();
        assert_eq!(edited.old_text, "original");
        assert_eq!(edited.quote.text, "new text");
        assert_eq!(edited.quote.author, "Alice");
        assert_eq!(edited.quote.date, created.date);

        // Owner may edit anyone's quote.
        let by_owner = service.edit_quote(created.id, "owner text", "Owner", OWNER).unwrap();
        assert_eq!(by_owner.quote.text, "owner text");
    }

    #[test]
    fn test_delete_respects_authorization() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        let created = service.create_quote("goes away", Some("Alice"), "Alice").unwrap();

        assert_eq!(
            service.delete_quote(created.id, "Mallory", USER),
            Err(QuoteError::Forbidden)
        );
        let removed = service.delete_quote(created.id, "Alice", USER).unwrap();
        assert_eq!(removed.text, "goes away");
        assert!(service.list_all().is_empty());
        assert_eq!(
            service.delete_quote(created.id, "Alice", USER),
            Err(QuoteError::NotFound(created.id))
        );
    }

    #[test]
    fn test_list_mine_matches_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        service.create_quote("one", Some("Alice"), "Alice").unwrap();
        service.create_quote("two", Some("Alice, Bob"), "Alice").unwrap();
        service.create_quote("other", Some("Bob"), "Bob").unwrap();

        let (mine, category) = service.list_mine("alice");
        assert_eq!(mine.len(), 2);
        assert_eq!(category, "Początkujący filozof");

        let (none, _) = service.list_mine("Carol");
        assert!(none.is_empty());
    }

    #[test]
    fn test_list_authors_counts_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        service.create_quote("a", Some("Alice"), "x").unwrap();
        service.create_quote("b", Some("alice, Bob"), "x").unwrap();
        service.create_quote("c", Some("Bob"), "x").unwrap();
        service.create_quote("d", Some("Bob"), "x").unwrap();

        let authors = service.list_authors();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].name, "Bob");
        assert_eq!(authors[0].count, 3);
        assert_eq!(authors[1].name, "Alice");
        assert_eq!(authors[1].count, 2);
        assert_eq!(authors[1].category, "Początkujący filozof");
    }

    #[test]
    fn test_picks_on_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        assert_eq!(service.pick_daily(), Err(QuoteError::NoQuotes));
        assert_eq!(service.pick_random(USER), Err(QuoteError::NoQuotes));
    }

    #[test]
    fn test_picks_return_stored_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        service.create_quote("only one", Some("Alice"), "Alice").unwrap();

        assert_eq!(service.pick_daily().unwrap().text, "only one");
        assert_eq!(service.pick_random(USER).unwrap().text, "only one");
        // Stable within the same day.
        assert_eq!(service.pick_daily().unwrap(), service.pick_daily().unwrap());
    }
}
