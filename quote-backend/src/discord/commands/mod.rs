//! Chat command parsing and dispatch. Each command maps onto one quote
//! service or rave controller call.

mod add;
mod all;
mod author;
mod authors;
mod create;
mod daily;
mod delete;
mod edit;
mod help;
mod mine;
mod random;
mod rave;
mod shutdown;

use serenity::all::{Context, Message};

use crate::discord::Handler;

pub const PREFIX: &str = "!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the command list: `!commands`
    Commands,
    /// Harvest recent channel messages: `!add [messages] [author] [skip]`
    Add {
        messages: usize,
        author: Option<String>,
        skip: usize,
    },
    /// Add a quote manually: `!create <text> | <author?>`
    Create { text: String, author: Option<String> },
    /// Edit a quote's text: `!edit <id> <new text>`
    Edit { id: u64, text: String },
    /// Delete a quote: `!delete <id>`
    Delete { id: u64 },
    /// Show the caller's quotes: `!mine`
    Mine,
    /// Show every quote (owner only): `!all`
    All,
    /// Show one author's quotes: `!author <name>`
    Author { name: String },
    /// Show the author leaderboard: `!authors`
    Authors,
    /// Display a random quote: `!random`
    Random,
    /// Show today's quote: `!daily`
    Daily,
    /// Toggle rave mode (owner only): `!rave [everyone|<user id>]`
    Rave { annoy: Option<String> },
    /// Shut the bot down (owner only): `!shutdown`
    Shutdown,
}

/// Parse a command from message text. Returns None for anything that is
/// not a well-formed command, which the handler silently ignores.
pub fn parse(content: &str) -> Option<Command> {
    let rest = content.trim().strip_prefix(PREFIX)?;
    let (word, args) = match rest.split_once(char::is_whitespace) {
        Some((word, args)) => (word, args.trim()),
        None => (rest, ""),
    };

    match word.to_lowercase().as_str() {
        "commands" | "help" => Some(Command::Commands),
        "add" => {
            let parts: Vec<&str> = args.split_whitespace().collect();
            let messages = parts.first().and_then(|s| s.parse().ok()).unwrap_or(1);
            let author = parts.get(1).map(|s| s.to_string());
            let skip = parts.get(2).and_then(|s| s.parse().ok()).unwrap_or(0);
            Some(Command::Add {
                messages,
                author,
                skip,
            })
        }
        "create" => {
            let (text, author) = match args.rsplit_once('|') {
                Some((text, author)) => (text.trim(), Some(author.trim().to_string())),
                None => (args, None),
            };
            Some(Command::Create {
                text: text.to_string(),
                author: author.filter(|a| !a.is_empty()),
            })
        }
        "edit" => {
            let (id, text) = args.split_once(char::is_whitespace)?;
            Some(Command::Edit {
                id: id.parse().ok()?,
                text: text.trim().to_string(),
            })
        }
        "delete" => Some(Command::Delete {
            id: args.parse().ok()?,
        }),
        "mine" => Some(Command::Mine),
        "all" => Some(Command::All),
        "author" => {
            if args.is_empty() {
                None
            } else {
                Some(Command::Author {
                    name: args.to_string(),
                })
            }
        }
        "authors" => Some(Command::Authors),
        "random" => Some(Command::Random),
        "daily" => Some(Command::Daily),
        "rave" => Some(Command::Rave {
            annoy: args.split_whitespace().next().map(|s| s.to_string()),
        }),
        "shutdown" => Some(Command::Shutdown),
        _ => None,
    }
}

/// Execute a command and return the response text.
pub async fn execute(
    cmd: Command,
    ctx: &Context,
    msg: &Message,
    handler: &Handler,
) -> Result<String, String> {
    let actor_name = msg.author.name.clone();
    let actor_id = msg.author.id.get();
    let is_owner = actor_id == handler.owner_id;

    match cmd {
        Command::Commands => Ok(help::execute()),
        Command::Add {
            messages,
            author,
            skip,
        } => add::execute(ctx, msg, &handler.service, messages, author.as_deref(), skip).await,
        Command::Create { text, author } => {
            create::execute(&handler.service, &text, author.as_deref(), &actor_name)
        }
        Command::Edit { id, text } => {
            edit::execute(&handler.service, id, &text, &actor_name, actor_id)
        }
        Command::Delete { id } => delete::execute(&handler.service, id, &actor_name, actor_id),
        Command::Mine => mine::execute(&handler.service, &actor_name),
        Command::All => all::execute(&handler.service, is_owner),
        Command::Author { name } => author::execute(&handler.service, &name),
        Command::Authors => authors::execute(&handler.service),
        Command::Random => random::execute(&handler.service, actor_id),
        Command::Daily => daily::execute(&handler.service),
        Command::Rave { annoy } => {
            rave::execute(ctx, msg, handler, is_owner, annoy.as_deref()).await
        }
        Command::Shutdown => shutdown::execute(ctx, is_owner).await,
    }
}
