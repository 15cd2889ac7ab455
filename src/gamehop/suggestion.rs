//! Suggestion records and the capacity-bounded queue holding them.

use super::auth::Privileged;
use super::error::{Denial, GameHopError};
use crate::constants::{MAX_QUEUE_LEN, MAX_SUGGESTIONS_PER_USER};
use serde::{Deserialize, Serialize};
use serenity::model::id::UserId;

/// A proposed game and the user who proposed it.
///
/// Persisted as a `[title, "user_id"]` pair so existing queue files stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "(String, String)", try_from = "(String, String)")]
pub struct Suggestion {
    pub title: String,
    pub proposer: UserId,
}

impl Suggestion {
    pub fn new(title: impl Into<String>, proposer: UserId) -> Self {
        Self {
            title: title.into(),
            proposer,
        }
    }

    fn matches_title(&self, needle_lower: &str) -> bool {
        self.title.trim().to_lowercase() == needle_lower
    }
}

impl From<Suggestion> for (String, String) {
    fn from(s: Suggestion) -> Self {
        (s.title, s.proposer.get().to_string())
    }
}

impl TryFrom<(String, String)> for Suggestion {
    type Error = String;

    fn try_from((title, proposer): (String, String)) -> Result<Self, Self::Error> {
        match proposer.trim().parse::<u64>() {
            Ok(id) if id != 0 => Ok(Self::new(title, UserId::new(id))),
            _ => Err(format!("invalid proposer id `{proposer}` for \"{title}\"")),
        }
    }
}

/// Ordered pending suggestions; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionQueue {
    entries: Vec<Suggestion>,
}

impl SuggestionQueue {
    /// Wraps previously persisted entries as-is; limits only apply to new additions.
    pub fn from_entries(entries: Vec<Suggestion>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Suggestion] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_by(&self, proposer: UserId) -> usize {
        self.entries.iter().filter(|s| s.proposer == proposer).count()
    }

    pub fn by_proposer(&self, proposer: UserId) -> Vec<&Suggestion> {
        self.entries.iter().filter(|s| s.proposer == proposer).collect()
    }

    pub fn add(&mut self, title: &str, proposer: UserId) -> Result<Suggestion, GameHopError> {
        if self.entries.len() >= MAX_QUEUE_LEN {
            return Err(GameHopError::CapacityExceeded);
        }
        let title = title.trim();
        let lower = title.to_lowercase();
        if self.entries.iter().any(|s| s.matches_title(&lower)) {
            return Err(GameHopError::DuplicateTitle(title.to_string()));
        }
        if self.count_by(proposer) >= MAX_SUGGESTIONS_PER_USER {
            return Err(GameHopError::UserLimitExceeded(proposer));
        }
        let suggestion = Suggestion::new(title, proposer);
        self.entries.push(suggestion.clone());
        Ok(suggestion)
    }

    /// Resolves a 1-based position or a case-insensitive title to an index.
    pub fn resolve(&self, identifier: &str) -> Result<usize, GameHopError> {
        let identifier = identifier.trim();
        if is_positional(identifier) {
            // Out-of-range values, including ones too large for any integer type,
            // are invalid positions rather than titles.
            return identifier
                .parse::<i64>()
                .ok()
                .and_then(|position| position.checked_sub(1))
                .and_then(|i| usize::try_from(i).ok())
                .filter(|&i| i < self.entries.len())
                .ok_or(GameHopError::InvalidIndex);
        }
        let lower = identifier.to_lowercase();
        self.entries
            .iter()
            .position(|s| s.matches_title(&lower))
            .ok_or_else(|| GameHopError::NotFound(identifier.to_string()))
    }

    pub fn lookup(&self, identifier: &str) -> Option<&Suggestion> {
        self.resolve(identifier).ok().map(|i| &self.entries[i])
    }

    pub fn remove(
        &mut self,
        identifier: &str,
        requester: UserId,
        privileged: &Privileged,
    ) -> Result<Suggestion, GameHopError> {
        let index = self.resolve(identifier)?;
        if self.entries[index].proposer != requester && !privileged.is(requester) {
            return Err(GameHopError::Unauthorized(Denial::NotProposer {
                privileged: privileged.id(),
            }));
        }
        Ok(self.entries.remove(index))
    }

    pub fn remove_all_by(
        &mut self,
        target: UserId,
        requester: UserId,
        privileged: &Privileged,
    ) -> Result<Vec<Suggestion>, GameHopError> {
        if requester != target && !privileged.is(requester) {
            return Err(GameHopError::Unauthorized(Denial::NotSelf {
                privileged: privileged.id(),
            }));
        }
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|s| s.proposer == target);
        self.entries = kept;
        Ok(removed)
    }

    pub(crate) fn take_at(&mut self, index: usize) -> Suggestion {
        self.entries.remove(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// An optionally signed run of ASCII digits.
fn is_positional(identifier: &str) -> bool {
    let digits = identifier
        .strip_prefix(['+', '-'])
        .unwrap_or(identifier);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: u64) -> UserId {
        UserId::new(n)
    }

    fn admin() -> Privileged {
        Privileged::new(uid(999))
    }

    #[test]
    fn duplicate_detection_ignores_case_and_whitespace() {
        let mut q = SuggestionQueue::default();
        let added = q.add("  Chess ", uid(1)).unwrap();
        assert_eq!(added.title, "Chess");
        assert_eq!(
            q.add("chess ", uid(1)),
            Err(GameHopError::DuplicateTitle("chess".into()))
        );
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn per_user_and_total_limits_hold() {
        let mut q = SuggestionQueue::default();
        for i in 0..MAX_SUGGESTIONS_PER_USER {
            q.add(&format!("Game {i}"), uid(1)).unwrap();
        }
        assert_eq!(
            q.add("One too many", uid(1)),
            Err(GameHopError::UserLimitExceeded(uid(1)))
        );
        // Fill the rest of the queue with other users.
        let mut user = 2;
        while q.len() < MAX_QUEUE_LEN {
            if q.count_by(uid(user)) == MAX_SUGGESTIONS_PER_USER {
                user += 1;
            }
            q.add(&format!("Other {}", q.len()), uid(user)).unwrap();
        }
        assert_eq!(q.add("Overflow", uid(500)), Err(GameHopError::CapacityExceeded));
        assert_eq!(q.len(), MAX_QUEUE_LEN);
    }

    #[test]
    fn capacity_is_checked_before_duplicates() {
        let entries = (0..MAX_QUEUE_LEN)
            .map(|i| Suggestion::new(format!("G{i}"), uid(i as u64 + 1)))
            .collect();
        let mut q = SuggestionQueue::from_entries(entries);
        assert_eq!(q.add("G0", uid(1)), Err(GameHopError::CapacityExceeded));
    }

    #[test]
    fn numeric_identifiers_are_one_based_positions() {
        let mut q = SuggestionQueue::default();
        q.add("Chess", uid(1)).unwrap();
        q.add("Go", uid(2)).unwrap();
        assert_eq!(q.resolve("2"), Ok(1));
        assert_eq!(q.resolve(" 1 "), Ok(0));
        assert_eq!(q.resolve("0"), Err(GameHopError::InvalidIndex));
        assert_eq!(q.resolve("3"), Err(GameHopError::InvalidIndex));
        assert_eq!(q.resolve("-4"), Err(GameHopError::InvalidIndex));
        assert_eq!(
            q.resolve("99999999999999999999"),
            Err(GameHopError::InvalidIndex)
        );
        assert_eq!(
            q.remove("99999999999999999999", uid(1), &admin()),
            Err(GameHopError::InvalidIndex)
        );
        assert_eq!(q.len(), 2);
        assert_eq!(q.resolve("GO"), Ok(1));
        assert_eq!(q.resolve("Checkers"), Err(GameHopError::NotFound("Checkers".into())));
        assert_eq!(q.lookup("go").map(|s| s.proposer), Some(uid(2)));
        assert!(q.lookup("7").is_none());
    }

    #[test]
    fn remove_requires_proposer_or_privileged() {
        let mut q = SuggestionQueue::default();
        q.add("Chess", uid(1)).unwrap();
        q.add("Go", uid(2)).unwrap();
        let err = q.remove("chess", uid(2), &admin()).unwrap_err();
        assert!(matches!(err, GameHopError::Unauthorized(Denial::NotProposer { .. })));
        assert_eq!(q.len(), 2);

        assert_eq!(q.remove("1", uid(1), &admin()).unwrap().title, "Chess");
        assert_eq!(q.remove("go", uid(999), &admin()).unwrap().title, "Go");
        assert!(q.is_empty());
    }

    #[test]
    fn remove_all_by_keeps_order_of_remaining_entries() {
        let mut q = SuggestionQueue::default();
        q.add("A", uid(2)).unwrap();
        q.add("B", uid(1)).unwrap();
        q.add("C", uid(2)).unwrap();
        q.add("D", uid(3)).unwrap();
        q.add("E", uid(2)).unwrap();

        let err = q.remove_all_by(uid(2), uid(1), &admin()).unwrap_err();
        assert!(matches!(err, GameHopError::Unauthorized(Denial::NotSelf { .. })));

        let removed = q.remove_all_by(uid(2), uid(2), &admin()).unwrap();
        let titles: Vec<_> = removed.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["A", "C", "E"]);
        let left: Vec<_> = q.entries().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(left, ["B", "D"]);

        assert!(q.remove_all_by(uid(7), uid(999), &admin()).unwrap().is_empty());
    }

    #[test]
    fn persisted_form_is_title_and_string_id() {
        let s = Suggestion::new("Chess", uid(123));
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"["Chess","123"]"#);
        let back: Suggestion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        assert!(serde_json::from_str::<Suggestion>(r#"["Chess","nope"]"#).is_err());
    }
}
