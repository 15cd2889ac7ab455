//! This module defines the shared data structures used throughout the application.
//! `AppState` is stored in Serenity's global context as a `TypeMapKey`.

use crate::gamehop::wheel::UrlShortener;
use crate::gamehop::{Privileged, Session};
use crate::storage::Store;
use serenity::prelude::TypeMapKey;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The central, shared state of the application.
/// An `Arc<AppState>` is stored in the global context for easy and safe access
/// from the event handler.
pub struct AppState {
    /// The one GameHop session. Every command mutation happens under its write guard.
    pub session: RwLock<Session>,
    /// Flat-file persistence for the queue and history.
    pub store: Store,
    /// Shortens wheel links; swapped for a stub in tests.
    pub shortener: Arc<dyn UrlShortener>,
    /// The user allowed to run privileged commands. Fixed at start-up.
    pub privileged: Privileged,
}

impl AppState {
    pub fn new(
        session: Session,
        store: Store,
        shortener: Arc<dyn UrlShortener>,
        privileged: Privileged,
    ) -> Self {
        Self {
            session: RwLock::new(session),
            store,
            shortener,
            privileged,
        }
    }

    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
