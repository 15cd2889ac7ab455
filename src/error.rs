//! Faults in the delivery path: the reply could not be sent or state could not be saved.
//! These are logged and answered with a generic message, never shown verbatim.

use crate::storage::PersistenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportFault {
    #[error("persisting gamehop state failed")]
    Persistence(#[from] PersistenceError),
    #[error("discord request failed")]
    Discord(#[from] serenity::Error),
}
