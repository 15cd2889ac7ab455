use crate::constants::ACTIVITY_NAME;
use crate::interactions::util::respond_failure;
use crate::{AppState, commands};
use serenity::all::{ActivityData, OnlineStatus};
use serenity::async_trait;
use serenity::client::Context;
use serenity::model::application::{Command, Interaction};
use serenity::model::{gateway::Ready, id::GuildId};
use serenity::prelude::EventHandler;
use tracing::{error, info, warn};

pub struct Handler {
    /// Register on this guild only; `None` registers globally.
    pub guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        if command.data.name != commands::COMMAND_NAME {
            return;
        }
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            warn!(command = %command.data.name, "missing_app_state");
            respond_failure(&ctx, &command).await;
            return;
        };
        if let Err(fault) = commands::run_slash(&ctx, &command, &app_state).await {
            error!(
                user_id = %command.user.id,
                error = %fault,
                cause = ?fault,
                "gh command failed"
            );
            respond_failure(&ctx, &command).await;
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "connected and ready");
        ctx.set_presence(Some(ActivityData::playing(ACTIVITY_NAME)), OnlineStatus::Online);

        let commands_to_register = vec![commands::register()];
        let registered = match self.guild_id {
            Some(guild_id) => guild_id
                .set_commands(&ctx.http, commands_to_register)
                .await
                .map(|_| format!("guild {guild_id}")),
            None => Command::set_global_commands(&ctx.http, commands_to_register)
                .await
                .map(|_| "global".to_string()),
        };
        match registered {
            Ok(scope) => info!(%scope, "registered application commands"),
            Err(e) => error!(error = ?e, "error registering application commands"),
        }
    }
}
