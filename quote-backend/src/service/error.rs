use std::fmt;

/// Everything a quote operation can refuse with. Persistence problems are
/// not represented here; the store degrades and logs instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    EmptyText,
    TooLong(usize),
    NotFound(u64),
    Forbidden,
    NoQuotes,
    NoMessages,
    SkipOutOfRange { skip: usize, available: usize },
    NotEnoughMessages { requested: usize, available: usize },
    NoneFromAuthor(String),
    AllEmpty,
    InvalidAnnoy(String),
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::EmptyText => write!(f, "Quote cannot be empty."),
            QuoteError::TooLong(_) => write!(f, "Quote too long (max 500 characters)."),
            QuoteError::NotFound(id) => write!(f, "Quote #{} not found.", id),
            QuoteError::Forbidden => write!(f, "You can only manage your own quotes."),
            QuoteError::NoQuotes => write!(f, "No quotes to display"),
            QuoteError::NoMessages => {
                write!(f, "No suitable messages found in recent history.")
            }
            QuoteError::SkipOutOfRange { skip, available } => {
                write!(f, "Cannot skip {} messages, only {} available.", skip, available)
            }
            QuoteError::NotEnoughMessages { requested, available } => write!(
                f,
                "Cannot get {} messages, only {} available after skip.",
                requested, available
            ),
            QuoteError::NoneFromAuthor(author) => write!(
                f,
                "No messages found from author '{}' in the selected range.",
                author
            ),
            QuoteError::AllEmpty => write!(f, "Cannot add empty messages as quote."),
            QuoteError::InvalidAnnoy(raw) => write!(
                f,
                "Invalid annoy target '{}' (use 'everyone' or a user id).",
                raw
            ),
        }
    }
}

impl std::error::Error for QuoteError {}
