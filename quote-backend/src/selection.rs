//! Pure quote selection: the date-seeded daily index, per-invocation
//! random index, author categories, and status-text preparation.
//!
//! Index computation hashes its seed with a stable digest so every process
//! picks the same daily quote for a given date and list length.

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::models::Quote;

/// Presence text used when no stored quote fits the status limit.
pub const FALLBACK_STATUS: &str = "Tracking your quotes | /commands";

/// Platform limit on presence text length.
pub const STATUS_MAX_LEN: usize = 128;

/// User, nickname, role and channel mention tokens. Matched, not resolved.
static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<@[!&]?\d+>|<#\d+>").unwrap());

/// Digest bytes interpreted as a big-endian integer, reduced modulo `n`.
fn digest_mod(seed: &str, n: usize) -> usize {
    debug_assert!(n > 0);
    let digest = Sha256::digest(seed.as_bytes());
    let n = n as u128;
    let mut rem: u128 = 0;
    for byte in digest {
        rem = (rem * 256 + byte as u128) % n;
    }
    rem as usize
}

/// Index of the daily quote for the given date key (`YYYY-MM-DD`) in a
/// list of length `n` (n >= 1). Deterministic across processes.
pub fn daily_index(date_key: &str, n: usize) -> usize {
    digest_mod(date_key, n)
}

/// Today's date key in the format `daily_index` expects.
pub fn today_key() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Index seeded by a high-resolution timestamp and a per-invocation salt
/// (the invoking user's id). Not reproducible, only well-spread.
pub fn random_index(n: usize, timestamp_micros: i64, salt: &str) -> usize {
    digest_mod(&format!("{}{}", timestamp_micros, salt), n)
}

/// Author rank by quote count. Labels are fixed strings.
pub fn categorize(count: usize) -> &'static str {
    match count {
        0..=5 => "Początkujący filozof",
        6..=15 => "Sokrates",
        16..=30 => "Platon",
        31..=50 => "Arystoteles",
        51..=75 => "Konfucjusz",
        76..=100 => "Seneka",
        _ => "Marcus Aurelius",
    }
}

/// Strips mention tokens and collapses whitespace runs.
pub fn clean_for_status(text: &str) -> String {
    let stripped = MENTION_RE.replace_all(text, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The status line a quote would be displayed as.
pub fn status_candidate(quote: &Quote) -> String {
    format!("\"{}\" - {}", clean_for_status(&quote.text), quote.author)
}

/// A quote may be displayed as a status only if its full status line fits.
pub fn is_status_eligible(quote: &Quote) -> bool {
    status_candidate(quote).chars().count() <= STATUS_MAX_LEN
}

/// Indices of status-eligible quotes, in store order.
pub fn eligible_indices(quotes: &[Quote]) -> Vec<usize> {
    quotes
        .iter()
        .enumerate()
        .filter(|(_, q)| is_status_eligible(q))
        .map(|(i, _)| i)
        .collect()
}
