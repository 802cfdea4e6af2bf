//! Shutdown command - owner-only clean gateway stop

use serenity::all::Context;

pub async fn execute(ctx: &Context, is_owner: bool) -> Result<String, String> {
    if !is_owner {
        return Err("You don't have permission.".to_string());
    }

    log::info!("Shutdown requested by owner");
    ctx.shard.shutdown_clean();
    Ok("Shutting down...".to_string())
}
