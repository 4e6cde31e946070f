/// Which task, if any, the form is currently editing. Only one edit may be
/// active at a time; starting another simply retargets the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(String),
}

impl EditSession {
    pub fn start(&mut self, id: String) {
        *self = Self::Editing(id);
    }

    /// Explicit cancel, escape key, or a completed update.
    pub fn finish(&mut self) {
        *self = Self::Idle;
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Drops the session when the task it targets was deleted.
    pub fn task_deleted(&mut self, id: &str) {
        if self.editing_id() == Some(id) {
            *self = Self::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let session = EditSession::default();
        assert!(!session.is_editing());
        assert_eq!(session.editing_id(), None);
    }

    #[test]
    fn start_retargets_an_active_session() {
        let mut session = EditSession::default();
        session.start("a".into());
        session.start("b".into());
        assert_eq!(session.editing_id(), Some("b"));
    }

    #[test]
    fn deleting_the_edited_task_returns_to_idle() {
        let mut session = EditSession::default();
        session.start("a".into());
        session.task_deleted("a");
        assert_eq!(session, EditSession::Idle);
    }

    #[test]
    fn deleting_another_task_keeps_the_session() {
        let mut session = EditSession::default();
        session.start("a".into());
        session.task_deleted("b");
        assert_eq!(session.editing_id(), Some("a"));
    }
}
