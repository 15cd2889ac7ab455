use serenity::model::id::UserId;

/// The single configured user allowed to choose, confirm vetoes, clear, and
/// remove anyone's suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Privileged(UserId);

impl Privileged {
    pub fn new(user_id: UserId) -> Self {
        Self(user_id)
    }

    pub fn id(&self) -> UserId {
        self.0
    }

    pub fn is(&self, user_id: UserId) -> bool {
        self.0 == user_id
    }
}
