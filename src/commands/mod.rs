// src/commands/mod.rs
// The `/gh` application command: parsing, registration and dispatch to handlers.

pub mod help;
pub mod history;
pub mod selection;
pub mod suggestions;
pub mod wheel;

use crate::AppState;
use crate::error::TransportFault;
use crate::interactions::util::{ReplyChannel, SlashReply, respond};
use chrono::Utc;
use help::{ArgKind, SUBCOMMANDS};
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, CommandOptionType,
};
use serenity::model::id::UserId;
use serenity::prelude::Context;
use thiserror::Error;
use tracing::info;

pub const COMMAND_NAME: &str = "gh";

/// One parsed `/gh` subcommand with its typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GhCommand {
    Suggest { game: String },
    Remove { identifier: String },
    Suggestions,
    SuggestedBy { identifier: String },
    Wheel,
    WheelLastSpun,
    RemoveGamesByUser { user: UserId },
    SuggestedByUser { user: UserId },
    ChosenGame { game: String },
    CurrentGame,
    Veto,
    Vetos,
    GamesHistory,
    Vetoed,
    Clear,
    Help,
}

/// A raw option value as delivered by Discord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgValue<'a> {
    Text(&'a str),
    User(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Command not found.")]
    UnknownSubcommand(String),
    #[error("Missing required option `{0}`.")]
    MissingOption(&'static str),
}

impl GhCommand {
    pub fn parse(subcommand: &str, args: &[(&str, ArgValue<'_>)]) -> Result<Self, ParseError> {
        let text = |name: &'static str| {
            args.iter()
                .find_map(|(n, v)| match v {
                    ArgValue::Text(s) if *n == name => Some(s.to_string()),
                    _ => None,
                })
                .ok_or(ParseError::MissingOption(name))
        };
        let user = |name: &'static str| {
            args.iter()
                .find_map(|(n, v)| match v {
                    ArgValue::User(id) if *n == name => Some(*id),
                    _ => None,
                })
                .ok_or(ParseError::MissingOption(name))
        };

        Ok(match subcommand {
            "suggest" => Self::Suggest { game: text("game")? },
            "remove" => Self::Remove {
                identifier: text("identifier")?,
            },
            "suggestions" => Self::Suggestions,
            "suggestedby" => Self::SuggestedBy {
                identifier: text("identifier")?,
            },
            "wheel" => Self::Wheel,
            "wheellastspun" => Self::WheelLastSpun,
            "removegamesbyuser" => Self::RemoveGamesByUser { user: user("user")? },
            "suggestedbyuser" => Self::SuggestedByUser { user: user("user")? },
            "chosengame" => Self::ChosenGame { game: text("game")? },
            "currentgame" => Self::CurrentGame,
            "veto" => Self::Veto,
            "vetos" => Self::Vetos,
            "gameshistory" => Self::GamesHistory,
            "vetoed" => Self::Vetoed,
            "clear" => Self::Clear,
            "help" => Self::Help,
            other => return Err(ParseError::UnknownSubcommand(other.to_string())),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Suggest { .. } => "suggest",
            Self::Remove { .. } => "remove",
            Self::Suggestions => "suggestions",
            Self::SuggestedBy { .. } => "suggestedby",
            Self::Wheel => "wheel",
            Self::WheelLastSpun => "wheellastspun",
            Self::RemoveGamesByUser { .. } => "removegamesbyuser",
            Self::SuggestedByUser { .. } => "suggestedbyuser",
            Self::ChosenGame { .. } => "chosengame",
            Self::CurrentGame => "currentgame",
            Self::Veto => "veto",
            Self::Vetos => "vetos",
            Self::GamesHistory => "gameshistory",
            Self::Vetoed => "vetoed",
            Self::Clear => "clear",
            Self::Help => "help",
        }
    }

    /// Whether the command can change the persisted queue or history.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::Suggest { .. }
                | Self::Remove { .. }
                | Self::RemoveGamesByUser { .. }
                | Self::ChosenGame { .. }
                | Self::Vetoed
                | Self::Clear
        )
    }
}

pub fn register() -> CreateCommand {
    SUBCOMMANDS
        .iter()
        .fold(
            CreateCommand::new(COMMAND_NAME).description("GameHop commands"),
            |cmd, info| {
                let mut sub = CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    info.name,
                    info.description,
                );
                if let Some(arg) = &info.arg {
                    let kind = match arg.kind {
                        ArgKind::Text => CommandOptionType::String,
                        ArgKind::User => CommandOptionType::User,
                    };
                    sub = sub.add_sub_option(
                        CreateCommandOption::new(kind, arg.name, arg.description).required(true),
                    );
                }
                cmd.add_option(sub)
            },
        )
}

/// Runs one subcommand against the shared session and returns the reply text.
///
/// Queries hold the read guard, mutations the write guard. After a mutating
/// command every pending collection is written to disk before the reply is
/// handed back, including writes left over from an earlier failed flush.
pub async fn execute(
    app: &AppState,
    invoker: UserId,
    command: GhCommand,
) -> Result<String, TransportFault> {
    info!(user_id = %invoker, subcommand = command.name(), "handling gh command");
    let privileged = &app.privileged;
    let mutates = command.mutates();
    let reply = match command {
        GhCommand::Help => help::render(invoker),
        GhCommand::Wheel => wheel::spin(&app.session, app.shortener.as_ref(), invoker).await,
        GhCommand::WheelLastSpun => wheel::last_spun(&*app.session.read().await, Utc::now()),
        GhCommand::Suggestions => suggestions::list(&*app.session.read().await),
        GhCommand::SuggestedBy { identifier } => {
            suggestions::suggested_by(&*app.session.read().await, &identifier)
        }
        GhCommand::SuggestedByUser { user } => {
            suggestions::suggested_by_user(&*app.session.read().await, user)
        }
        GhCommand::CurrentGame => selection::current_game(&*app.session.read().await, Utc::now()),
        GhCommand::Vetos => selection::vetos(&*app.session.read().await, Utc::now()),
        GhCommand::GamesHistory => history::list(&*app.session.read().await),
        GhCommand::Suggest { game } => {
            suggestions::suggest(&mut *app.session.write().await, invoker, &game)
        }
        GhCommand::Remove { identifier } => suggestions::remove(
            &mut *app.session.write().await,
            invoker,
            privileged,
            &identifier,
        ),
        GhCommand::RemoveGamesByUser { user } => suggestions::remove_games_by_user(
            &mut *app.session.write().await,
            invoker,
            privileged,
            user,
        ),
        GhCommand::ChosenGame { game } => selection::chosen_game(
            &mut *app.session.write().await,
            invoker,
            privileged,
            &game,
            Utc::now(),
        ),
        GhCommand::Veto => selection::veto(&mut *app.session.write().await, invoker),
        GhCommand::Vetoed => {
            selection::vetoed(&mut *app.session.write().await, invoker, privileged)
        }
        GhCommand::Clear => history::clear(&mut *app.session.write().await, invoker, privileged),
    };

    if mutates {
        let mut session = app.session.write().await;
        if session.pending_writes().any() {
            app.store.flush(&mut session).await?;
        }
    }
    Ok(reply)
}

/// Entry point from the event handler for a `/gh` interaction.
pub async fn run_slash(
    ctx: &Context,
    interaction: &CommandInteraction,
    app: &AppState,
) -> Result<(), TransportFault> {
    let channel = SlashReply { ctx, interaction };
    run_command(&channel, app, interaction.user.id, parse_interaction(interaction)).await
}

/// Acknowledges the interaction, runs the command, then fills in the reply.
/// The acknowledgement goes out before any handler work, the wheel's URL
/// shortening included.
pub async fn run_command(
    channel: &dyn ReplyChannel,
    app: &AppState,
    invoker: UserId,
    parsed: Result<GhCommand, ParseError>,
) -> Result<(), TransportFault> {
    channel.acknowledge().await?;
    let reply = match parsed {
        Ok(command) => execute(app, invoker, command).await?,
        Err(e) => e.to_string(),
    };
    respond(channel, &reply).await?;
    Ok(())
}

fn parse_interaction(interaction: &CommandInteraction) -> Result<GhCommand, ParseError> {
    let Some(sub) = interaction.data.options.first() else {
        return Err(ParseError::UnknownSubcommand(String::new()));
    };
    let nested: &[CommandDataOption] = match &sub.value {
        CommandDataOptionValue::SubCommand(nested) => nested,
        _ => &[],
    };
    let args: Vec<(&str, ArgValue<'_>)> = nested
        .iter()
        .filter_map(|opt| match &opt.value {
            CommandDataOptionValue::String(s) => Some((opt.name.as_str(), ArgValue::Text(s))),
            CommandDataOptionValue::User(id) => Some((opt.name.as_str(), ArgValue::User(*id))),
            _ => None,
        })
        .collect();
    GhCommand::parse(&sub.name, &args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_arguments() {
        assert_eq!(
            GhCommand::parse("suggest", &[("game", ArgValue::Text("Chess"))]),
            Ok(GhCommand::Suggest {
                game: "Chess".into()
            })
        );
        assert_eq!(
            GhCommand::parse("suggestedbyuser", &[("user", ArgValue::User(UserId::new(5)))]),
            Ok(GhCommand::SuggestedByUser {
                user: UserId::new(5)
            })
        );
        assert_eq!(GhCommand::parse("vetoed", &[]), Ok(GhCommand::Vetoed));
    }

    #[test]
    fn names_are_case_sensitive_and_args_required() {
        assert_eq!(
            GhCommand::parse("Suggest", &[("game", ArgValue::Text("Chess"))]),
            Err(ParseError::UnknownSubcommand("Suggest".into()))
        );
        assert_eq!(
            GhCommand::parse("remove", &[]),
            Err(ParseError::MissingOption("identifier"))
        );
        assert_eq!(
            GhCommand::parse("removegamesbyuser", &[("user", ArgValue::Text("me"))]),
            Err(ParseError::MissingOption("user"))
        );
        assert_eq!(
            ParseError::UnknownSubcommand("nope".into()).to_string(),
            "Command not found."
        );
    }

    #[test]
    fn every_help_entry_parses_back_to_its_name() {
        for info in SUBCOMMANDS {
            let args: Vec<(&str, ArgValue<'_>)> = match &info.arg {
                Some(arg) => match arg.kind {
                    ArgKind::Text => vec![(arg.name, ArgValue::Text("1"))],
                    ArgKind::User => vec![(arg.name, ArgValue::User(UserId::new(1)))],
                },
                None => Vec::new(),
            };
            let parsed = GhCommand::parse(info.name, &args).unwrap();
            assert_eq!(parsed.name(), info.name);
        }
    }

    mod delivery {
        use super::*;
        use crate::gamehop::wheel::UrlShortener;
        use crate::gamehop::{Privileged, Session};
        use crate::storage::Store;
        use async_trait::async_trait;
        use std::sync::{Arc, Mutex};

        type Log = Arc<Mutex<Vec<String>>>;

        struct Recorder(Log);

        #[async_trait]
        impl ReplyChannel for Recorder {
            async fn acknowledge(&self) -> Result<(), serenity::Error> {
                self.0.lock().unwrap().push("ack".into());
                Ok(())
            }

            async fn edit_original(&self, content: String) -> Result<(), serenity::Error> {
                self.0.lock().unwrap().push(format!("edit: {content}"));
                Ok(())
            }

            async fn follow_up(&self, content: String) -> Result<(), serenity::Error> {
                self.0.lock().unwrap().push(format!("follow-up: {} chars", content.chars().count()));
                Ok(())
            }
        }

        struct LoggingShortener(Log);

        #[async_trait]
        impl UrlShortener for LoggingShortener {
            async fn shorten(&self, _long_url: &str) -> String {
                self.0.lock().unwrap().push("shorten".into());
                "https://tinyurl.com/x".into()
            }
        }

        fn app_with(log: &Log, dir: &tempfile::TempDir, session: Session) -> AppState {
            AppState::new(
                session,
                Store::new(dir.path()),
                Arc::new(LoggingShortener(log.clone())),
                Privileged::new(UserId::new(1000)),
            )
        }

        #[tokio::test]
        async fn wheel_is_acknowledged_before_shortening() {
            let log: Log = Arc::default();
            let dir = tempfile::tempdir().unwrap();
            let session = Session::restore(
                vec![crate::gamehop::Suggestion::new("Chess", UserId::new(1))],
                Vec::new(),
            );
            let app = app_with(&log, &dir, session);

            run_command(&Recorder(log.clone()), &app, UserId::new(1), Ok(GhCommand::Wheel))
                .await
                .unwrap();

            assert_eq!(
                *log.lock().unwrap(),
                vec![
                    "ack".to_string(),
                    "shorten".to_string(),
                    "edit: Spin the wheel to decide: https://tinyurl.com/x".to_string(),
                ]
            );
        }

        #[tokio::test]
        async fn long_replies_edit_first_chunk_then_follow_up() {
            let log: Log = Arc::default();
            let dir = tempfile::tempdir().unwrap();
            let history = (1..=120).map(|i| format!("Some Long Game Title Number {i}")).collect();
            let app = app_with(&log, &dir, Session::restore(Vec::new(), history));

            run_command(&Recorder(log.clone()), &app, UserId::new(1), Ok(GhCommand::GamesHistory))
                .await
                .unwrap();

            let log = log.lock().unwrap();
            assert_eq!(log[0], "ack");
            assert!(log[1].starts_with("edit: Games History:\n1. "));
            assert!(log.len() > 2);
            assert!(log[2..].iter().all(|e| e.starts_with("follow-up: ")));
        }

        #[tokio::test]
        async fn unknown_subcommand_is_still_acknowledged() {
            let log: Log = Arc::default();
            let dir = tempfile::tempdir().unwrap();
            let app = app_with(&log, &dir, Session::default());

            let parsed = GhCommand::parse("nope", &[]);
            run_command(&Recorder(log.clone()), &app, UserId::new(1), parsed)
                .await
                .unwrap();

            assert_eq!(
                *log.lock().unwrap(),
                vec!["ack".to_string(), "edit: Command not found.".to_string()]
            );
        }
    }
}
