//! Core GameHop state: the suggestion queue, the current pick, vetoes and history.
//!
//! Nothing in here talks to Discord; operations return [`GameHopError`] for every
//! expected, user-facing refusal and leave transport concerns to the dispatch shell.

pub mod auth;
pub mod error;
pub mod session;
pub mod suggestion;
pub mod wheel;

pub use auth::Privileged;
pub use error::{Denial, GameHopError};
pub use session::{CurrentSelection, Elapsed, PendingWrites, Session};
pub use suggestion::{Suggestion, SuggestionQueue};
