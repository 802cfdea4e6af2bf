use serde::{Deserialize, Serialize};

/// A stored quote. Field order is the on-disk JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique, positive. Legacy records on disk may lack it (deserialized
    /// as 0) until the load-time migration backfills them.
    #[serde(default)]
    pub id: u64,
    pub text: String,
    /// Display name, or a comma-separated list for multi-contributor quotes.
    pub author: String,
    /// Creation date, dd/mm/yyyy. Never mutated.
    pub date: String,
}

impl Quote {
    /// The comma-split, trimmed author list.
    pub fn author_names(&self) -> impl Iterator<Item = &str> {
        self.author.split(',').map(str::trim).filter(|a| !a.is_empty())
    }

    /// Case-insensitive membership in the author list.
    pub fn has_author(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.author_names().any(|a| a.to_lowercase() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(author: &str) -> Quote {
        Quote {
            id: 1,
            text: "something memorable".to_string(),
            author: author.to_string(),
            date: "01/02/2024".to_string(),
        }
    }

    #[test]
    fn test_author_names_splits_and_trims() {
        let q = quote("Alice, Bob,  Carol");
        let names: Vec<&str> = q.author_names().collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_has_author_is_case_insensitive() {
        let q = quote("Alice, Bob");
        assert!(q.has_author("alice"));
        assert!(q.has_author("BOB"));
        assert!(!q.has_author("Carol"));
    }

    #[test]
    fn test_legacy_record_deserializes_without_id() {
        let q: Quote =
            serde_json::from_str(r#"{"text": "t", "author": "a", "date": "01/01/2020"}"#).unwrap();
        assert_eq!(q.id, 0);
    }
}
