//! Command list shown by `!commands`.

/// Execute the commands command
pub fn execute() -> String {
    "**Qred - Quote Tracker**\n\
    Track your best quotes.\n\n\
    `!random` - Display a random quote\n\
    `!daily` - Show today's quote\n\
    `!add [messages] [author] [skip]` - Add quote(s) from recent messages\n\
    `!create <text> | <author?>` - Add a new quote manually\n\
    `!mine` - Show all your quotes\n\
    `!edit <id> <new text>` - Edit one of your quotes\n\
    `!delete <id>` - Delete one of your quotes\n\
    `!author <name>` - Show one author's quotes\n\
    `!authors` - Show the author leaderboard\n\
    `!all` - Show all quotes (owner only)\n\
    `!rave [everyone|<user id>]` - Toggle rave mode (owner only)\n\
    `!shutdown` - Shut down the bot (owner only)"
        .to_string()
}
