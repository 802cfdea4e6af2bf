use dotenv::dotenv;
use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;

mod auth;
mod config;
mod discord;
mod models;
mod rave;
mod selection;
mod service;
mod store;

use config::Config;
use discord::Handler;
use rave::RaveController;
use service::QuoteService;
use store::QuoteStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    log::info!("Using quote file {}", config.quote_file.display());
    let store = Arc::new(QuoteStore::new(&config.quote_file));
    let service = Arc::new(QuoteService::new(store.clone(), config.owner_id));
    let rave = Arc::new(RaveController::new(store.clone()));

    // We need message content to read commands
    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let handler = Handler {
        service,
        rave,
        store,
        owner_id: config.owner_id,
    };

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .expect("Failed to create Discord client");

    log::info!("Starting quote bot");
    if let Err(e) = client.start().await {
        log::error!("Discord client error: {}", e);
    }
}
