use dotenv::dotenv;
use std::sync::Arc;
use teloxide::{Bot, prelude::Requester, utils::command::BotCommands};
use tiktok_info_bot::{
    bot,
    commands::Command,
    config::Config,
    telemetry::setup_logger,
    tikapi::{LookupClient, TikApiClient},
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenv().ok();
    color_eyre::install()?;
    setup_logger()?;

    let config = Config::from_env()?;
    info!(?config, "configuration loaded");

    let client: Arc<dyn LookupClient> = Arc::new(TikApiClient::new(config.tikapi)?);
    let bot = Bot::new(config.bot_token);

    if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(%err, "failed to register bot commands");
    }

    info!("bot starting");
    bot::run(bot, client).await;

    Ok(())
}
