use anyhow::Result;

use crate::model::{Priority, Task, TaskPatch};
use crate::session::EditSession;
use crate::store::TaskStore;
use crate::validate::validate_title;

/// Raw form values, before validation.
#[derive(Debug, Clone, Default)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub due: Option<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(String),
    Updated(String),
}

impl SubmitOutcome {
    pub fn id(&self) -> &str {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }
}

/// Validates the input and dispatches create-or-update depending on the
/// edit session. A successful update returns the session to idle; any
/// validation failure leaves both store and session untouched.
///
/// Validation errors surface as a downcastable [`crate::validate::TitleError`].
pub fn submit(
    store: &mut TaskStore,
    session: &mut EditSession,
    input: &TaskInput,
) -> Result<SubmitOutcome> {
    let title = validate_title(store.tasks(), &input.title, session.editing_id())?;
    let due = normalize_due(input.due.as_deref());
    let description = input.description.trim().to_string();

    match session.editing_id() {
        Some(id) => {
            let id = id.to_string();
            store.update(
                &id,
                TaskPatch {
                    title,
                    description,
                    due,
                    priority: input.priority,
                },
            )?;
            session.finish();
            Ok(SubmitOutcome::Updated(id))
        }
        None => {
            let task = Task::new(title, description, due, input.priority);
            let id = task.id.clone();
            store.add(task)?;
            Ok(SubmitOutcome::Created(id))
        }
    }
}

/// Pre-populates form values from an existing task.
pub fn input_from(task: &Task) -> TaskInput {
    TaskInput {
        title: task.title.clone(),
        description: task.description.clone(),
        due: task.due.clone(),
        priority: task.priority,
    }
}

fn normalize_due(due: Option<&str>) -> Option<String> {
    match due.map(str::trim) {
        None | Some("") => None,
        Some(d) => Some(d.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::validate::TitleError;

    fn store() -> TaskStore {
        TaskStore::load(Box::new(MemoryStorage::new()))
    }

    fn input(title: &str) -> TaskInput {
        TaskInput {
            title: title.into(),
            ..TaskInput::default()
        }
    }

    #[test]
    fn submit_while_idle_creates() {
        let mut store = store();
        let mut session = EditSession::default();
        let outcome = submit(&mut store, &mut session, &input("Write report")).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(session, EditSession::Idle);
    }

    #[test]
    fn submit_while_editing_updates_and_returns_to_idle() {
        let mut store = store();
        let mut session = EditSession::default();
        let id = submit(&mut store, &mut session, &input("Write report"))
            .unwrap()
            .id()
            .to_string();

        session.start(id.clone());
        let mut edited = input("Write the report");
        edited.priority = Priority::High;
        let outcome = submit(&mut store, &mut session, &edited).unwrap();

        assert_eq!(outcome, SubmitOutcome::Updated(id.clone()));
        assert_eq!(session, EditSession::Idle);
        assert_eq!(store.tasks().len(), 1);
        let task = store.get(&id).unwrap();
        assert_eq!(task.title, "Write the report");
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn rejected_edit_leaves_task_and_session_unchanged() {
        let mut store = store();
        let mut session = EditSession::default();
        let id = submit(&mut store, &mut session, &input("Write report"))
            .unwrap()
            .id()
            .to_string();

        session.start(id.clone());
        let err = submit(&mut store, &mut session, &input("Re")).unwrap_err();
        assert_eq!(err.downcast_ref::<TitleError>(), Some(&TitleError::TooShort));
        assert_eq!(store.get(&id).unwrap().title, "Write report");
        assert!(session.is_editing());
    }

    #[test]
    fn editing_keeps_own_title_but_rejects_anothers() {
        let mut store = store();
        let mut session = EditSession::default();
        let a = submit(&mut store, &mut session, &input("Write report"))
            .unwrap()
            .id()
            .to_string();
        submit(&mut store, &mut session, &input("Read book")).unwrap();

        session.start(a.clone());
        assert!(submit(&mut store, &mut session, &input("write report")).is_ok());

        session.start(a);
        let err = submit(&mut store, &mut session, &input("READ BOOK")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TitleError>(),
            Some(&TitleError::Duplicate)
        );
    }

    #[test]
    fn blank_due_normalizes_to_none() {
        let mut store = store();
        let mut session = EditSession::default();
        let mut i = input("Write report");
        i.due = Some("   ".into());
        let id = submit(&mut store, &mut session, &i).unwrap().id().to_string();
        assert_eq!(store.get(&id).unwrap().due, None);
    }
}
