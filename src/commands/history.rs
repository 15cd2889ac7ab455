//! Handlers for the games history and the full reset.

use crate::gamehop::{Privileged, Session};
use crate::util::numbered;
use serenity::model::id::UserId;
use tracing::info;

pub fn list(session: &Session) -> String {
    if session.history().is_empty() {
        return "No games have been chosen yet.".to_string();
    }
    format!("Games History:\n{}", numbered(session.history()))
}

pub fn clear(session: &mut Session, invoker: UserId, privileged: &Privileged) -> String {
    match session.reset(invoker, privileged) {
        Ok(()) => {
            info!(user_id = %invoker, "gamehop state cleared");
            "The gameQueue and gamesHistory have been cleared.".to_string()
        }
        Err(e) => e.to_string(),
    }
}
