use crate::{
    bot::{TelegramChat, deliver},
    error::Result,
    handlers::{self, WELCOME},
    reply::Reply,
    tikapi::LookupClient,
};
use std::sync::Arc;
use teloxide::{prelude::*, utils::command::BotCommands};
use tracing::info;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Show the welcome message.
    Start,
    /// Display this text.
    #[command(aliases = ["h", "?"])]
    Help,
    /// Look up a TikTok user: /user <username or profile url>
    User(String),
    /// Look up a TikTok video: /video <video url or id>
    Video(String),
}

/// Handle a command from the user.
///
/// # Errors
///
/// Returns an error if neither the reply nor its plain-text fallback can be sent.
pub async fn answer(
    bot: Bot,
    msg: Message,
    cmd: Command,
    client: Arc<dyn LookupClient>,
) -> Result<()> {
    info!(chat_id = %msg.chat.id, command = ?cmd, "handling command");

    let reply = match cmd {
        Command::Start => Reply::plain(WELCOME),
        Command::Help => Reply::plain(Command::descriptions().to_string()),
        Command::User(args) => handlers::user_lookup(client.as_ref(), &args).await,
        Command::Video(args) => handlers::video_lookup(client.as_ref(), &args).await,
    };

    deliver(&TelegramChat::new(bot, msg.chat.id), &reply).await?;
    Ok(())
}
