//! Flat-file quote persistence.
//!
//! The whole file is rewritten on every mutation; a single in-process lock
//! serializes load-modify-save sequences so two concurrent commands cannot
//! lose each other's writes.

use std::path::PathBuf;

use parking_lot::Mutex;

use crate::models::Quote;

pub struct QuoteStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl QuoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Loads the full quote sequence.
    ///
    /// A missing file yields an empty sequence. An unreadable or corrupt
    /// file is logged and also yields an empty sequence; persistence never
    /// fails a command. Legacy records without ids are backfilled and the
    /// corrected sequence is written back before being returned.
    pub fn load(&self) -> Vec<Quote> {
        let _guard = self.lock.lock();
        self.load_locked()
    }

    /// Overwrites the file with the full sequence. I/O errors are logged
    /// and swallowed; callers must not assume durability succeeded.
    pub fn save(&self, quotes: &[Quote]) {
        let _guard = self.lock.lock();
        self.save_locked(quotes);
    }

    /// Runs a load-modify-save sequence under the store lock. The file is
    /// rewritten only when `f` returns Ok.
    pub fn update<T, E>(&self, f: impl FnOnce(&mut Vec<Quote>) -> Result<T, E>) -> Result<T, E> {
        let _guard = self.lock.lock();
        let mut quotes = self.load_locked();
        let result = f(&mut quotes);
        if result.is_ok() {
            self.save_locked(&quotes);
        }
        result
    }

    fn load_locked(&self) -> Vec<Quote> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::error!("Failed to read quote file {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let mut quotes: Vec<Quote> = match serde_json::from_str(&raw) {
            Ok(quotes) => quotes,
            Err(e) => {
                log::error!("Failed to parse quote file {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        // Backfill ids on legacy records, continuing above the highest
        // tagged id in insertion order.
        let mut next = quotes.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        let mut migrated = false;
        for quote in &mut quotes {
            if quote.id == 0 {
                quote.id = next;
                next += 1;
                migrated = true;
            }
        }
        if migrated {
            log::info!("Backfilled ids for legacy records in {}", self.path.display());
            self.save_locked(&quotes);
        }

        quotes
    }

    fn save_locked(&self, quotes: &[Quote]) {
        let json = match serde_json::to_string_pretty(quotes) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize quotes: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            log::error!("Failed to write quote file {}: {}", self.path.display(), e);
        }
    }
}

/// Next id to assign: one above the highest existing id, 1 for an empty store.
pub fn next_id(quotes: &[Quote]) -> u64 {
    quotes.iter().map(|q| q.id).max().unwrap_or(0) + 1
}

/// First quote with the given id, if any.
pub fn find_by_id(quotes: &[Quote], id: u64) -> Option<&Quote> {
    quotes.iter().find(|q| q.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn quote(id: u64, text: &str, author: &str) -> Quote {
        Quote {
            id,
            text: text.to_string(),
            author: author.to_string(),
            date: "01/02/2024".to_string(),
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> QuoteStore {
        QuoteStore::new(dir.path().join("quotes.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(QuoteStore::new(path).load().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let quotes = vec![quote(1, "first", "Alice"), quote(2, "second", "Bob")];
        store.save(&quotes);
        assert_eq!(store.load(), quotes);
        // save(load()) is a content no-op
        store.save(&store.load());
        assert_eq!(store.load(), quotes);
    }

    #[test]
    fn test_migration_backfills_missing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 3, "text": "tagged", "author": "A", "date": "01/01/2020"},
                {"text": "legacy one", "author": "B", "date": "01/01/2020"},
                {"id": 7, "text": "tagged too", "author": "C", "date": "01/01/2020"},
                {"text": "legacy two", "author": "D", "date": "01/01/2020"}
            ]"#,
        )
        .unwrap();

        let store = QuoteStore::new(&path);
        let quotes = store.load();
        let ids: Vec<u64> = quotes.iter().map(|q| q.id).collect();
        // Backfill continues above the highest tagged id, in insertion order.
        assert_eq!(ids, vec![3, 8, 7, 9]);

        // The corrected sequence was persisted immediately.
        let reparsed: Vec<Quote> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reparsed, quotes);
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(&[]), 1);
        let quotes = vec![quote(3, "a", "A"), quote(7, "b", "B")];
        assert_eq!(next_id(&quotes), 8);
    }

    #[test]
    fn test_find_by_id() {
        let quotes = vec![quote(1, "a", "A"), quote(2, "b", "B")];
        assert_eq!(find_by_id(&quotes, 2).map(|q| q.text.as_str()), Some("b"));
        assert!(find_by_id(&quotes, 99).is_none());
    }

    #[test]
    fn test_update_serializes_concurrent_appends() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .update(|quotes| {
                            let q = quote(next_id(quotes), &format!("q{}", i), "A");
                            quotes.push(q);
                            Ok::<_, ()>(())
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let quotes = store.load();
        assert_eq!(quotes.len(), 8);
        let mut ids: Vec<u64> = quotes.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<u64>>());
    }

    #[test]
    fn test_update_err_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&[quote(1, "keep", "A")]);
        let result: Result<(), &str> = store.update(|quotes| {
            quotes.clear();
            Err("rejected")
        });
        assert!(result.is_err());
        assert_eq!(store.load().len(), 1);
    }
}
