use std::sync::Arc;

use gamehop_bot::config::BotConfig;
use gamehop_bot::gamehop::wheel::TinyUrl;
use gamehop_bot::handler::Handler;
use gamehop_bot::storage::Store;
use gamehop_bot::AppState;
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // A missing .env is fine when the variables come from the real environment.
    dotenv::dotenv().ok();
    init_tracing();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let store = Store::new(&config.data_dir);
    let session = match store.load_session().await {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "could not load saved gamehop state");
            std::process::exit(1);
        }
    };
    let app_state = Arc::new(AppState::new(
        session,
        store,
        Arc::new(TinyUrl::new()),
        config.privileged,
    ));

    // Slash commands arrive over the gateway with GUILDS alone.
    let intents = GatewayIntents::GUILDS;

    let mut client = match Client::builder(&config.token, intents)
        .event_handler(Handler {
            guild_id: config.guild_id,
        })
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!(error = ?e, "error creating the Discord client");
            std::process::exit(1);
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<AppState>(app_state);
    }

    info!(data_dir = %config.data_dir.display(), "starting gamehop");
    if let Err(why) = client.start().await {
        error!(error = ?why, "client error");
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,serenity=warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
