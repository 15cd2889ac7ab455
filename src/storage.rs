//! Flat-file persistence for the suggestion queue and the games history.
//!
//! Both collections are stored as pretty-printed JSON arrays. A missing file is
//! the same as an empty collection.

use crate::constants::{HISTORY_FILE, QUEUE_FILE};
use crate::gamehop::{PendingWrites, Session, Suggestion};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Store {
    queue_path: PathBuf,
    history_path: PathBuf,
}

impl Store {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            queue_path: dir.join(QUEUE_FILE),
            history_path: dir.join(HISTORY_FILE),
        }
    }

    pub fn queue_path(&self) -> &Path {
        &self.queue_path
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub async fn load_queue(&self) -> Result<Vec<Suggestion>, PersistenceError> {
        read_json(&self.queue_path).await
    }

    pub async fn save_queue(&self, queue: &[Suggestion]) -> Result<(), PersistenceError> {
        write_json(&self.queue_path, queue).await
    }

    pub async fn load_history(&self) -> Result<Vec<String>, PersistenceError> {
        read_json(&self.history_path).await
    }

    pub async fn save_history(&self, history: &[String]) -> Result<(), PersistenceError> {
        write_json(&self.history_path, history).await
    }

    /// Rebuilds a session from disk. Nothing but the two lists survives a restart.
    pub async fn load_session(&self) -> Result<Session, PersistenceError> {
        let queue = self.load_queue().await?;
        let history = self.load_history().await?;
        info!(
            suggestions = queue.len(),
            history = history.len(),
            "restored gamehop session"
        );
        Ok(Session::restore(queue, history))
    }

    /// Writes whichever collections the session marked as changed.
    #[instrument(level = "debug", skip_all)]
    pub async fn flush(&self, session: &mut Session) -> Result<(), PersistenceError> {
        let pending = session.pending_writes();
        if pending.queue {
            self.save_queue(session.suggestions()).await?;
            session.mark_written(PendingWrites {
                queue: true,
                history: false,
            });
        }
        if pending.history {
            self.save_history(session.history()).await?;
            session.mark_written(PendingWrites {
                queue: false,
                history: true,
            });
        }
        Ok(())
    }
}

async fn read_json<T>(path: &Path) -> Result<Vec<T>, PersistenceError>
where
    T: DeserializeOwned,
{
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no saved data; starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&contents).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

async fn write_json<T>(path: &Path, value: &[T]) -> Result<(), PersistenceError>
where
    T: Serialize,
{
    let io_err = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    let body = serde_json::to_string_pretty(value).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tokio::fs::write(path, body).await.map_err(io_err)
}
