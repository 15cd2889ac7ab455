//! The process-wide GameHop session record and every operation that mutates it.

use super::auth::Privileged;
use super::error::{Denial, GameHopError};
use super::suggestion::{Suggestion, SuggestionQueue};
use crate::constants::VETOED_MARKER;
use chrono::{DateTime, Utc};
use serenity::model::id::UserId;

/// The game currently being played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSelection {
    pub title: String,
    pub chosen_at: DateTime<Utc>,
}

/// Whole minutes and leftover seconds between two instants, clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    pub minutes: i64,
    pub seconds: i64,
}

impl Elapsed {
    pub fn between(since: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total = (now - since).num_seconds().max(0);
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

/// Collections changed since they were last written to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingWrites {
    pub queue: bool,
    pub history: bool,
}

impl PendingWrites {
    pub fn any(&self) -> bool {
        self.queue || self.history
    }
}

#[derive(Debug, Default)]
pub struct Session {
    queue: SuggestionQueue,
    current: Option<CurrentSelection>,
    // Insertion order is kept so the veto list renders in the order votes arrived.
    vetoes: Vec<UserId>,
    history: Vec<String>,
    last_spin: Option<DateTime<Utc>>,
    pending: PendingWrites,
}

impl Session {
    pub fn restore(queue: Vec<Suggestion>, history: Vec<String>) -> Self {
        Self {
            queue: SuggestionQueue::from_entries(queue),
            history,
            ..Self::default()
        }
    }

    pub fn queue(&self) -> &SuggestionQueue {
        &self.queue
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.queue.entries()
    }

    pub fn current(&self) -> Option<&CurrentSelection> {
        self.current.as_ref()
    }

    pub fn vetoes(&self) -> &[UserId] {
        &self.vetoes
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn last_spin(&self) -> Option<DateTime<Utc>> {
        self.last_spin
    }

    pub fn pending_writes(&self) -> PendingWrites {
        self.pending
    }

    /// Called by the store once the given collections are on disk.
    pub fn mark_written(&mut self, written: PendingWrites) {
        if written.queue {
            self.pending.queue = false;
        }
        if written.history {
            self.pending.history = false;
        }
    }

    pub fn suggest(&mut self, title: &str, proposer: UserId) -> Result<Suggestion, GameHopError> {
        let added = self.queue.add(title, proposer)?;
        self.pending.queue = true;
        Ok(added)
    }

    pub fn remove(
        &mut self,
        identifier: &str,
        requester: UserId,
        privileged: &Privileged,
    ) -> Result<Suggestion, GameHopError> {
        let removed = self.queue.remove(identifier, requester, privileged)?;
        self.pending.queue = true;
        Ok(removed)
    }

    pub fn remove_all_by(
        &mut self,
        target: UserId,
        requester: UserId,
        privileged: &Privileged,
    ) -> Result<Vec<Suggestion>, GameHopError> {
        let removed = self.queue.remove_all_by(target, requester, privileged)?;
        if !removed.is_empty() {
            self.pending.queue = true;
        }
        Ok(removed)
    }

    /// Moves a queued suggestion into play. All four effects (dequeue, select,
    /// record in history, reset vetoes) happen together or not at all.
    pub fn choose(
        &mut self,
        identifier: &str,
        requester: UserId,
        privileged: &Privileged,
        now: DateTime<Utc>,
    ) -> Result<&CurrentSelection, GameHopError> {
        if !privileged.is(requester) {
            return Err(GameHopError::Unauthorized(Denial::PrivilegedOnly));
        }
        let index = self.queue.resolve(identifier).map_err(|e| match e {
            GameHopError::NotFound(title) => GameHopError::NotInSuggestions(title),
            other => other,
        })?;
        let chosen = self.queue.take_at(index);
        self.history.push(chosen.title.clone());
        self.vetoes.clear();
        self.pending = PendingWrites {
            queue: true,
            history: true,
        };
        Ok(&*self.current.insert(CurrentSelection {
            title: chosen.title,
            chosen_at: now,
        }))
    }

    /// Records a vote against the current game. Votes only accumulate; ending
    /// the game is left to [`Session::confirm_veto`].
    pub fn veto(&mut self, user: UserId) -> Result<&str, GameHopError> {
        let Some(current) = &self.current else {
            return Err(GameHopError::NoActiveGame);
        };
        if self.vetoes.contains(&user) {
            return Err(GameHopError::AlreadyVetoed);
        }
        self.vetoes.push(user);
        Ok(current.title.as_str())
    }

    /// Ends the current game as vetoed, tagging its latest history entry.
    /// Returns the title that was vetoed.
    pub fn confirm_veto(
        &mut self,
        requester: UserId,
        privileged: &Privileged,
    ) -> Result<String, GameHopError> {
        if !privileged.is(requester) {
            return Err(GameHopError::Unauthorized(Denial::PrivilegedOnly));
        }
        let Some(current) = self.current.take() else {
            return Err(GameHopError::NoActiveGame);
        };
        let marked = format!("{} {VETOED_MARKER}", current.title);
        match self.history.iter().rposition(|entry| *entry == current.title) {
            Some(index) => self.history[index] = marked,
            None => self.history.push(marked),
        }
        self.vetoes.clear();
        self.pending.history = true;
        Ok(current.title)
    }

    pub fn mark_spun(&mut self, now: DateTime<Utc>) {
        self.last_spin = Some(now);
    }

    /// Wipes the queue, history, selection and vetoes. The last spin time is kept.
    pub fn reset(&mut self, requester: UserId, privileged: &Privileged) -> Result<(), GameHopError> {
        if !privileged.is(requester) {
            return Err(GameHopError::Unauthorized(Denial::PrivilegedOnly));
        }
        self.queue.clear();
        self.history.clear();
        self.current = None;
        self.vetoes.clear();
        self.pending = PendingWrites {
            queue: true,
            history: true,
        };
        Ok(())
    }
}
