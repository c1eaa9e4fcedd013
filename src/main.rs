use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use haruhichan::commands;
use haruhichan::utils::catalog::Catalog;
use haruhichan::utils::config::{Config, config_path_from_args};
use haruhichan::utils::database::SqliteAccountStore;
use haruhichan::utils::roles::SerenityRoleGateway;
use haruhichan::{Data, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("haruhichan=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config_path = config_path_from_args(std::env::args().skip(1))?;
    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path.display(), "Failed to load configuration: {}", e);
        e
    })?;

    let catalog = Catalog::load(&config.commands.settings_file).map_err(|e| {
        error!("Failed to load commands settings: {}", e);
        e
    })?;
    let catalog = Arc::new(catalog);

    let store = SqliteAccountStore::open(&config.database.path).map_err(|e| {
        error!("Failed to open account database: {}", e);
        e
    })?;
    let store = Arc::new(store);

    let prefix = config.chat.command_prefix.clone();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(commands::framework_options(&prefix))
        .setup(move |ctx, ready, _framework| {
            Box::pin(async move {
                info!("{} successfully connected.", ready.user.name);
                let roles = Arc::new(SerenityRoleGateway::new(ctx.http.clone()));
                Ok(Data::new(prefix, catalog, store, roles))
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.bot_token, intents)
        .framework(framework)
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
            shard_manager.shutdown_all().await;
        }
    });

    client.start().await.map_err(Into::into)
}
