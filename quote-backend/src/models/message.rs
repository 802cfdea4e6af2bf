/// A channel message as seen by the harvest operation, most-recent-first
/// as the platform history endpoint returns them.
#[derive(Debug, Clone)]
pub struct HarvestedMessage {
    pub author_name: String,
    pub author_is_bot: bool,
    pub content: String,
}

impl HarvestedMessage {
    pub fn new(author_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author_name: author_name.into(),
            author_is_bot: false,
            content: content.into(),
        }
    }
}
