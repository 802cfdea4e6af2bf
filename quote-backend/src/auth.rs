//! Who may mutate a quote.

use crate::models::Quote;

/// True when `actor` may edit or delete `quote`: the owner bypasses the
/// author check, everyone else must appear verbatim (case-sensitive, as
/// supplied by the platform) in the quote's author list.
pub fn can_modify(actor_name: &str, actor_id: u64, quote: &Quote, owner_id: u64) -> bool {
    if actor_id == owner_id {
        return true;
    }
    quote.author_names().any(|a| a == actor_name)
}
