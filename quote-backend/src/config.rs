use std::env;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub owner_id: u64,
    pub quote_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            discord_token: env::var("DISCORD_TOKEN").expect("DISCORD_TOKEN must be set"),
            owner_id: env::var("OWNER_ID")
                .expect("OWNER_ID must be set")
                .parse()
                .expect("OWNER_ID must be a valid user id"),
            quote_file: env::var("QUOTE_FILE")
                .unwrap_or_else(|_| "./quotes.json".to_string())
                .into(),
        }
    }
}
