use crate::form::{self, TaskInput};
use crate::model::{Priority, Task};
use crate::project::project;
use crate::session::EditSession;
use crate::store::TaskStore;
use crate::validate::validate_title;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
    Form,
    ConfirmDelete(String),
    ConfirmClear,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Due,
    Priority,
}

/// Form buffers plus the live validation result. The error is recomputed
/// on every edit and again authoritatively on submit.
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub due: String,
    pub priority: Priority,
    pub focused: FormField,
    pub error: Option<String>,
}

impl TaskForm {
    fn empty() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due: String::new(),
            priority: Priority::default(),
            focused: FormField::Title,
            error: None,
        }
    }

    fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due: task.due.clone().unwrap_or_default(),
            priority: task.priority,
            focused: FormField::Title,
            error: None,
        }
    }

    pub fn focused_buf_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Due => Some(&mut self.due),
            FormField::Priority => None,
        }
    }

    pub fn next_field(&mut self) {
        self.focused = match self.focused {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Due,
            FormField::Due => FormField::Priority,
            FormField::Priority => FormField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.focused = match self.focused {
            FormField::Title => FormField::Priority,
            FormField::Description => FormField::Title,
            FormField::Due => FormField::Description,
            FormField::Priority => FormField::Due,
        };
    }

    fn input(&self) -> TaskInput {
        TaskInput {
            title: self.title.clone(),
            description: self.description.clone(),
            due: if self.due.trim().is_empty() {
                None
            } else {
                Some(self.due.trim().to_string())
            },
            priority: self.priority,
        }
    }
}

pub struct App {
    pub store: TaskStore,
    pub session: EditSession,
    pub search: String,
    pub cursor: usize,
    pub mode: Mode,
    pub form: Option<TaskForm>,
    pub error: Option<String>,
}

impl App {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            session: EditSession::default(),
            search: String::new(),
            cursor: 0,
            mode: Mode::Normal,
            form: None,
            error: None,
        }
    }

    /// The current display projection: search filter plus computed order.
    pub fn visible(&self) -> Vec<&Task> {
        project(self.store.tasks(), &self.search)
    }

    pub fn selected_id(&self) -> Option<String> {
        self.visible().get(self.cursor).map(|t| t.id.clone())
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let len = self.visible().len();
        if len > 0 && self.cursor < len - 1 {
            self.cursor += 1;
        }
    }

    pub fn open_add_form(&mut self) {
        self.session.finish();
        self.form = Some(TaskForm::empty());
        self.mode = Mode::Form;
        self.error = None;
    }

    pub fn open_edit_form(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let Some(task) = self.store.get(&id) else {
            return;
        };
        self.form = Some(TaskForm::from_task(task));
        self.session.start(id);
        self.mode = Mode::Form;
        self.error = None;
    }

    /// Explicit cancel or escape; the edit session ends either way.
    pub fn cancel_form(&mut self) {
        self.form = None;
        self.session.finish();
        self.mode = Mode::Normal;
    }

    /// Recomputes the inline validation error after a form edit.
    pub fn live_validate(&mut self) {
        let Some(form) = &mut self.form else {
            return;
        };
        form.error = validate_title(self.store.tasks(), &form.title, self.session.editing_id())
            .err()
            .map(|e| e.to_string());
    }

    /// Authoritative submit: create while idle, update while editing.
    /// On validation failure the error lands inline and the store stays
    /// untouched.
    pub fn submit_form(&mut self) {
        let Some(form) = &self.form else {
            return;
        };
        let input = form.input();
        match form::submit(&mut self.store, &mut self.session, &input) {
            Ok(_) => {
                self.form = None;
                self.mode = Mode::Normal;
                self.clamp_cursor();
            }
            Err(e) => {
                if let Some(form) = &mut self.form {
                    form.error = Some(e.to_string());
                }
            }
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_id() {
            self.mode = Mode::ConfirmDelete(id);
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Mode::ConfirmDelete(id) = self.mode.clone() {
            if let Err(e) = self.store.delete(&id) {
                self.error = Some(e.to_string());
            }
            self.session.task_deleted(&id);
            if !self.session.is_editing() {
                self.form = None;
            }
            self.mode = Mode::Normal;
            self.clamp_cursor();
        }
    }

    pub fn request_clear(&mut self) {
        if !self.store.tasks().is_empty() {
            self.mode = Mode::ConfirmClear;
        }
    }

    pub fn confirm_clear(&mut self) {
        if self.mode == Mode::ConfirmClear {
            if let Err(e) = self.store.clear() {
                self.error = Some(e.to_string());
            }
            self.session.finish();
            self.form = None;
            self.mode = Mode::Normal;
            self.cursor = 0;
        }
    }

    /// Declining a confirmation leaves state unchanged.
    pub fn decline_confirm(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Cross-session signal: the backing file changed elsewhere. The loaded
    /// snapshot wins; an in-progress edit of a task that no longer exists
    /// is dropped.
    pub fn reload(&mut self) {
        self.store.reload();
        if let Some(id) = self.session.editing_id().map(str::to_string) {
            if self.store.get(&id).is_none() {
                self.session.task_deleted(&id);
                self.form = None;
                if self.mode == Mode::Form {
                    self.mode = Mode::Normal;
                }
            }
        }
        self.clamp_cursor();
    }
}
