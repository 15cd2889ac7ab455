//! Expected refusals. Each variant renders as the literal reply sent back to the user.

use crate::constants::{MAX_QUEUE_LEN, MAX_SUGGESTIONS_PER_USER};
use serenity::model::id::UserId;
use serenity::model::mention::Mentionable;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameHopError {
    #[error(
        "Sorry, the maximum number of game suggestions ({max}) has been reached.",
        max = MAX_QUEUE_LEN
    )]
    CapacityExceeded,
    #[error("The game \"{0}\" has already been suggested.")]
    DuplicateTitle(String),
    #[error(
        "You, {}, have reached the maximum number of suggestions ({max}).",
        .0.mention(),
        max = MAX_SUGGESTIONS_PER_USER
    )]
    UserLimitExceeded(UserId),
    #[error("Invalid index provided.")]
    InvalidIndex,
    #[error("The game \"{0}\" was not suggested.")]
    NotFound(String),
    /// Title lookup miss when choosing what to play.
    #[error("The game \"{0}\" is not in the suggestions list.")]
    NotInSuggestions(String),
    #[error("{0}")]
    Unauthorized(Denial),
    #[error("No game is currently being played.")]
    NoActiveGame,
    #[error("You have already vetoed this game.")]
    AlreadyVetoed,
    #[error("There are no game suggestions to choose from.")]
    EmptyQueue,
}

/// Which rule refused an unauthorized request; picks the wording of the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Removing a suggestion someone else proposed.
    NotProposer { privileged: UserId },
    /// Bulk-removing another user's suggestions.
    NotSelf { privileged: UserId },
    /// Commands reserved for the privileged user.
    PrivilegedOnly,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::NotProposer { privileged } => write!(
                f,
                "You can only delete games suggested by yourself! (Unless you're {}).",
                privileged.mention()
            ),
            Denial::NotSelf { privileged } => write!(
                f,
                "You can only remove games suggested by yourself or if you are {}.",
                privileged.mention()
            ),
            Denial::PrivilegedOnly => f.write_str("You do not have permission to use this command."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_are_literal_user_messages() {
        assert_eq!(
            GameHopError::CapacityExceeded.to_string(),
            "Sorry, the maximum number of game suggestions (100) has been reached."
        );
        assert_eq!(
            GameHopError::UserLimitExceeded(UserId::new(42)).to_string(),
            "You, <@42>, have reached the maximum number of suggestions (10)."
        );
        assert_eq!(
            GameHopError::Unauthorized(Denial::NotProposer {
                privileged: UserId::new(7)
            })
            .to_string(),
            "You can only delete games suggested by yourself! (Unless you're <@7>)."
        );
        assert_eq!(
            GameHopError::Unauthorized(Denial::PrivilegedOnly).to_string(),
            "You do not have permission to use this command."
        );
    }
}
