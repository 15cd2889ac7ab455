//! Handlers for the current pick: choosing it, vetoing it and reporting on it.

use crate::constants::VETOED_MARKER;
use crate::gamehop::{Elapsed, GameHopError, Privileged, Session};
use chrono::{DateTime, Utc};
use serenity::model::id::UserId;
use serenity::model::mention::Mentionable;
use tracing::info;

pub fn chosen_game(
    session: &mut Session,
    invoker: UserId,
    privileged: &Privileged,
    game: &str,
    now: DateTime<Utc>,
) -> String {
    match session.choose(game, invoker, privileged, now) {
        Ok(current) => format!(
            "The game \"{}\" has been chosen and is now being played.",
            current.title
        ),
        Err(e) => e.to_string(),
    }
}

pub fn current_game(session: &Session, now: DateTime<Utc>) -> String {
    let Some(current) = session.current() else {
        return GameHopError::NoActiveGame.to_string();
    };
    let Elapsed { minutes, seconds } = Elapsed::between(current.chosen_at, now);
    format!(
        "The current game is \"{}\", chosen {minutes}m{seconds}s ago.",
        current.title
    )
}

pub fn veto(session: &mut Session, invoker: UserId) -> String {
    match session.veto(invoker) {
        Ok(title) => format!(
            "{} has vetoed the current game \"{title}\".",
            invoker.mention()
        ),
        Err(e) => e.to_string(),
    }
}

pub fn vetos(session: &Session, now: DateTime<Utc>) -> String {
    let Some(current) = session.current() else {
        return GameHopError::NoActiveGame.to_string();
    };
    let Elapsed { minutes, seconds } = Elapsed::between(current.chosen_at, now);
    let voters = if session.vetoes().is_empty() {
        "None".to_string()
    } else {
        session
            .vetoes()
            .iter()
            .map(|u| u.mention().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "**Current Game:** {}\n**Chosen:** {minutes}m{seconds}s ago\n**Veto Count:** {}\n**Users who vetoed:** {voters}",
        current.title,
        session.vetoes().len()
    )
}

pub fn vetoed(session: &mut Session, invoker: UserId, privileged: &Privileged) -> String {
    match session.confirm_veto(invoker, privileged) {
        Ok(title) => {
            info!(user_id = %invoker, game = %title, "current game vetoed");
            format!(
                "The current game has been vetoed and added to the history with {VETOED_MARKER} tag."
            )
        }
        Err(e) => e.to_string(),
    }
}
