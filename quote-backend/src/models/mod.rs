pub mod annoy;
pub mod message;
pub mod quote;

pub use annoy::AnnoyTarget;
pub use message::HarvestedMessage;
pub use quote::Quote;
