use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, FormField, Mode};

/// Result of handling a key press.
pub enum KeyAction {
    Quit,
    Continue,
}

/// Handle a key press. Mutations go straight to the app; the loop only
/// needs to know whether to keep running.
pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyAction {
    match app.mode.clone() {
        Mode::Form => handle_form(app, key),
        Mode::Search => handle_search(app, key),
        Mode::ConfirmDelete(_) | Mode::ConfirmClear => handle_confirm(app, key),
        Mode::Help => {
            app.mode = Mode::Normal;
            KeyAction::Continue
        }
        Mode::Normal => handle_normal(app, key),
    }
}

fn handle_normal(app: &mut App, key: KeyEvent) -> KeyAction {
    app.error = None;
    match key.code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Esc => {
            if app.search.is_empty() {
                return KeyAction::Quit;
            }
            app.search.clear();
            app.cursor = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('/') => app.mode = Mode::Search,
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('C') => app.request_clear(),
        KeyCode::Char('?') => app.mode = Mode::Help,
        _ => {}
    }
    KeyAction::Continue
}

fn handle_search(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        // Enter keeps the filter, Esc drops it
        KeyCode::Enter => app.mode = Mode::Normal,
        KeyCode::Esc => {
            app.search.clear();
            app.cursor = 0;
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            app.search.pop();
            app.cursor = 0;
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search.clear();
            app.cursor = 0;
        }
        KeyCode::Char(c) => {
            app.search.push(c);
            app.cursor = 0;
        }
        _ => {}
    }
    KeyAction::Continue
}

fn handle_confirm(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => match app.mode {
            Mode::ConfirmDelete(_) => app.confirm_delete(),
            Mode::ConfirmClear => app.confirm_clear(),
            _ => {}
        },
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.decline_confirm(),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_form(app: &mut App, key: KeyEvent) -> KeyAction {
    if app.form.is_none() {
        app.mode = Mode::Normal;
        return KeyAction::Continue;
    }
    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab => {
            if let Some(form) = &mut app.form {
                form.next_field();
            }
        }
        KeyCode::BackTab => {
            if let Some(form) = &mut app.form {
                form.prev_field();
            }
        }
        KeyCode::Left | KeyCode::Right => {
            if let Some(form) = &mut app.form {
                if form.focused == FormField::Priority {
                    form.priority = form.priority.cycle();
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = &mut app.form {
                if let Some(buf) = form.focused_buf_mut() {
                    buf.pop();
                }
            }
            app.live_validate();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(form) = &mut app.form {
                if let Some(buf) = form.focused_buf_mut() {
                    buf.clear();
                }
            }
            app.live_validate();
        }
        KeyCode::Char(c) => {
            let mut edited = false;
            if let Some(form) = &mut app.form {
                if form.focused == FormField::Priority {
                    if c == ' ' {
                        form.priority = form.priority.cycle();
                    }
                } else if let Some(buf) = form.focused_buf_mut() {
                    buf.push(c);
                    edited = true;
                }
            }
            if edited {
                app.live_validate();
            }
        }
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Task};
    use crate::storage::MemoryStorage;
    use crate::store::TaskStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(titles: &[&str]) -> App {
        let mut store = TaskStore::load(Box::new(MemoryStorage::new()));
        for title in titles {
            store
                .add(Task::new(
                    (*title).to_string(),
                    String::new(),
                    None,
                    Priority::Medium,
                ))
                .unwrap();
        }
        App::new(store)
    }

    #[test]
    fn typing_in_form_validates_each_keystroke() {
        let mut app = app_with(&[]);
        handle_key(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.mode, Mode::Form);
        handle_key(&mut app, key(KeyCode::Char('R')));
        assert!(app.form.as_ref().unwrap().error.is_some()); // too short
        handle_key(&mut app, key(KeyCode::Char('e')));
        handle_key(&mut app, key(KeyCode::Char('p')));
        assert!(app.form.as_ref().unwrap().error.is_none());
    }

    #[test]
    fn escape_in_form_returns_session_to_idle() {
        let mut app = app_with(&["Write report"]);
        handle_key(&mut app, key(KeyCode::Char('e')));
        assert!(app.session.is_editing());
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.session.is_editing());
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = app_with(&["Write report"]);
        handle_key(&mut app, key(KeyCode::Char('d')));
        assert!(matches!(app.mode, Mode::ConfirmDelete(_)));
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.store.tasks().len(), 1);
        handle_key(&mut app, key(KeyCode::Char('d')));
        handle_key(&mut app, key(KeyCode::Char('y')));
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn search_keys_filter_live() {
        let mut app = app_with(&["Write report", "Read book"]);
        handle_key(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.mode, Mode::Search);
        for c in "book".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.visible().len(), 1);
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.visible().len(), 2);
    }

    #[test]
    fn q_quits_from_normal_mode() {
        let mut app = app_with(&[]);
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Char('q'))),
            KeyAction::Quit
        ));
    }
}
