//! Teloxide wiring: update routing, reply delivery and the comments callback.

use crate::{
    commands::{self, Command},
    error::{Error, Result},
    handlers::{self, FETCHING_COMMENTS},
    reply::{CallbackAction, Reply, TextFormat},
    tikapi::LookupClient,
};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::{
    dispatching::UpdateHandler,
    error_handlers::LoggingErrorHandler,
    prelude::*,
    types::{MessageId, ParseMode},
};
use tracing::{debug, info, warn};

/// Routing tree: typed commands go to [`commands::answer`], button presses to
/// [`handle_callback`]. Everything else is ignored.
#[must_use]
pub fn schema() -> UpdateHandler<Error> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(commands::answer),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback))
}

/// Run the long-polling dispatcher until ctrl-c.
pub async fn run(bot: Bot, client: Arc<dyn LookupClient>) {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![client])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "an error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

/// The operations the bot performs against a single chat.
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Answer the pending button press, if there is one.
    async fn acknowledge(&self) -> Result<()>;

    async fn send(&self, reply: &Reply) -> Result<MessageId>;

    async fn edit(&self, message_id: MessageId, reply: &Reply) -> Result<()>;
}

/// [`ChatSender`] backed by the Telegram Bot API.
pub struct TelegramChat {
    bot: Bot,
    chat_id: ChatId,
    query: Option<CallbackQuery>,
}

impl TelegramChat {
    #[must_use]
    pub const fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self {
            bot,
            chat_id,
            query: None,
        }
    }

    /// Chat the button was pressed in, or the presser's private chat when the
    /// originating message is gone.
    #[must_use]
    pub fn for_callback(bot: Bot, query: CallbackQuery) -> Self {
        let chat_id = query
            .message
            .as_ref()
            .map_or_else(|| ChatId::from(query.from.id), |m| m.chat().id);
        Self {
            bot,
            chat_id,
            query: Some(query),
        }
    }

    #[must_use]
    pub const fn chat_id(&self) -> ChatId {
        self.chat_id
    }
}

#[async_trait]
impl ChatSender for TelegramChat {
    async fn acknowledge(&self) -> Result<()> {
        if let Some(query) = &self.query {
            self.bot.answer_callback_query(query.id.clone()).await?;
        }
        Ok(())
    }

    async fn send(&self, reply: &Reply) -> Result<MessageId> {
        let mut req = self.bot.send_message(self.chat_id, reply.text.clone());
        if reply.format == TextFormat::MarkdownV2 {
            req = req.parse_mode(ParseMode::MarkdownV2);
        }
        if let Some(keyboard) = reply.keyboard() {
            req = req.reply_markup(keyboard);
        }
        Ok(req.await?.id)
    }

    async fn edit(&self, message_id: MessageId, reply: &Reply) -> Result<()> {
        let mut req = self
            .bot
            .edit_message_text(self.chat_id, message_id, reply.text.clone());
        if reply.format == TextFormat::MarkdownV2 {
            req = req.parse_mode(ParseMode::MarkdownV2);
        }
        if let Some(keyboard) = reply.keyboard() {
            req = req.reply_markup(keyboard);
        }
        req.await?;
        Ok(())
    }
}

/// Send `reply`, falling back to a plain error message if Telegram rejects it.
///
/// # Errors
///
/// Returns an error if the fallback message fails to send as well.
pub async fn deliver(chat: &dyn ChatSender, reply: &Reply) -> Result<MessageId> {
    match chat.send(reply).await {
        Ok(id) => Ok(id),
        Err(err) => {
            warn!(%err, "sending reply failed, falling back to plain text");
            chat.send(&Reply::plain(err.user_message())).await
        }
    }
}

/// Replace the text of `message_id` with `reply`, falling back to a plain
/// error message if Telegram rejects it.
///
/// # Errors
///
/// Returns an error if the fallback edit fails as well.
pub async fn replace(chat: &dyn ChatSender, message_id: MessageId, reply: &Reply) -> Result<()> {
    match chat.edit(message_id, reply).await {
        Ok(()) => Ok(()),
        Err(err) => {
            warn!(%err, "editing reply failed, falling back to plain text");
            chat.edit(message_id, &Reply::plain(err.user_message()))
                .await
        }
    }
}

/// Button press flow: acknowledge, post a provisional message, look up the
/// comments, then edit the provisional message in place.
///
/// # Errors
///
/// Returns an error if the provisional message or its replacement cannot be
/// delivered.
pub async fn view_comments(
    chat: &dyn ChatSender,
    client: &dyn LookupClient,
    data: Option<&str>,
) -> Result<()> {
    if let Err(err) = chat.acknowledge().await {
        warn!(%err, "failed to answer callback query");
    }

    let Some(action) = data.and_then(CallbackAction::parse) else {
        debug!(?data, "ignoring unknown callback data");
        return Ok(());
    };

    match action {
        CallbackAction::ViewComments { video_id } => {
            let provisional = deliver(chat, &Reply::plain(FETCHING_COMMENTS)).await?;
            let reply = handlers::comments_lookup(client, &video_id).await;
            replace(chat, provisional, &reply).await
        }
    }
}

/// Handle an inline button press.
///
/// # Errors
///
/// See [`view_comments`].
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    client: Arc<dyn LookupClient>,
) -> Result<()> {
    let data = q.data.clone();
    let chat = TelegramChat::for_callback(bot, q);
    info!(chat_id = %chat.chat_id(), ?data, "callback query");
    view_comments(&chat, client.as_ref(), data.as_deref()).await
}
