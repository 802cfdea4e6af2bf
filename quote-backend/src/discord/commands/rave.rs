//! Rave command - owner-only toggle of the status rotation

use std::sync::Arc;

use serenity::all::{Context, Message};

use crate::discord::{Handler, SerenityPresenceSink};
use crate::service::QuoteError;

pub async fn execute(
    ctx: &Context,
    msg: &Message,
    handler: &Handler,
    is_owner: bool,
    annoy: Option<&str>,
) -> Result<String, String> {
    let sink = Arc::new(SerenityPresenceSink::new(ctx.clone()));
    let activated = handler
        .rave
        .toggle(is_owner, annoy, Some(msg.channel_id.get()), sink)
        .await
        .map_err(|e| match e {
            QuoteError::Forbidden => "Owner-only command.".to_string(),
            other => other.to_string(),
        })?;

    Ok(if activated {
        "Rave mode activated.".to_string()
    } else {
        "Rave mode deactivated.".to_string()
    })
}
