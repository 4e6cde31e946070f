use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::app::{App, FormField, Mode, TaskForm};
use crate::model::{Priority, Task};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search
            Constraint::Min(1),    // list
            Constraint::Length(1), // hint line
        ])
        .split(frame.area());

    render_search(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_hints(frame, app, chunks[2]);

    match &app.mode {
        Mode::Form => render_form_dialog(frame, app),
        Mode::ConfirmDelete(id) => {
            let title = app
                .store
                .get(id)
                .map(|t| t.title.clone())
                .unwrap_or_default();
            render_confirm(frame, &format!("Delete task '{title}'?"));
        }
        Mode::ConfirmClear => {
            let count = app.store.tasks().len();
            render_confirm(frame, &format!("Delete all {count} task(s)?"));
        }
        Mode::Help => render_help(frame),
        _ => {}
    }
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.mode == Mode::Search {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let cursor = if app.mode == Mode::Search { "_" } else { "" };
    let search = Paragraph::new(format!("{}{}", app.search, cursor)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(style),
    );
    frame.render_widget(search, area);
}

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::DarkGray),
    }
}

fn task_line(task: &Task) -> Line<'_> {
    let due = task
        .due
        .as_ref()
        .map(|d| format!("  due {d}"))
        .unwrap_or_default();
    let desc = if task.description.is_empty() {
        String::new()
    } else {
        format!("  {}", task.description)
    };
    Line::from(vec![
        Span::styled(
            format!("{} ", task.priority.icon()),
            priority_style(task.priority),
        ),
        Span::styled(task.title.clone(), Style::default().bold()),
        Span::styled(due, Style::default().fg(Color::Blue)),
        Span::styled(desc, Style::default().fg(Color::Gray)),
    ])
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.visible();
    let block = Block::default().borders(Borders::ALL).title(" Tasks ");

    // Dedicated empty state instead of a bare empty list
    if rows.is_empty() {
        let message = if app.search.trim().is_empty() {
            "No tasks yet. Press 'a' to add one."
        } else {
            "No tasks match the search."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let item = ListItem::new(task_line(task));
            if i == app.cursor {
                item.style(Style::default().bg(Color::DarkGray))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(err) = &app.error {
        frame.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red)),
            area,
        );
        return;
    }
    let text = match app.mode {
        Mode::Search => "type to filter  Enter: keep  Esc: clear",
        Mode::Form => "Enter: submit  Tab: next field  Esc: cancel",
        _ => "a: add  e: edit  d: delete  /: search  C: clear all  ?: help  q: quit",
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_field(
    frame: &mut Frame,
    label: &str,
    value: &str,
    focused: bool,
    chunks: &[Rect],
    idx: &mut usize,
) {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default()
    };
    frame.render_widget(Paragraph::new(label.to_string()).style(label_style), chunks[*idx]);
    *idx += 1;

    let cursor = if focused { "_" } else { "" };
    frame.render_widget(
        Paragraph::new(format!("  {value}{cursor}")).style(Style::default().fg(Color::White)),
        chunks[*idx],
    );
    *idx += 1;
}

fn render_form_dialog(frame: &mut Frame, app: &App) {
    let form = match &app.form {
        Some(f) => f,
        None => return,
    };

    let term = frame.area();
    let width = 60.min(term.width.saturating_sub(4));
    let content_rows: u16 = 9 + u16::from(form.error.is_some());
    let height = (content_rows + 2).min(term.height.saturating_sub(2)); // +2 for borders
    let area = centered_rect(width, height, term);

    frame.render_widget(Clear, area);

    let title = if app.session.is_editing() {
        " Edit Task "
    } else {
        " Add Task "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![
        Constraint::Length(1), // title label
        Constraint::Length(1), // title input
        Constraint::Length(1), // desc label
        Constraint::Length(1), // desc input
        Constraint::Length(1), // due label
        Constraint::Length(1), // due input
        Constraint::Length(1), // priority label
        Constraint::Length(1), // priority value
    ];
    if form.error.is_some() {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1)); // hint
    constraints.push(Constraint::Min(0)); // spacer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let mut idx = 0;

    // Invalid-state marker sits on the title label
    let title_label = if form.error.is_some() {
        "Title: ✗"
    } else {
        "Title:"
    };
    render_field(
        frame,
        title_label,
        &form.title,
        form.focused == FormField::Title,
        &chunks,
        &mut idx,
    );
    render_field(
        frame,
        "Description:",
        &form.description,
        form.focused == FormField::Description,
        &chunks,
        &mut idx,
    );
    render_field(
        frame,
        "Due (ISO date):",
        &form.due,
        form.focused == FormField::Due,
        &chunks,
        &mut idx,
    );
    render_priority(frame, form, &chunks, &mut idx);

    if let Some(err) = &form.error {
        frame.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red)),
            chunks[idx],
        );
        idx += 1;
    }

    frame.render_widget(
        Paragraph::new("Enter: submit  Tab/S-Tab: fields  Esc: cancel  C-u: clear field")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[idx],
    );
}

fn render_priority(frame: &mut Frame, form: &TaskForm, chunks: &[Rect], idx: &mut usize) {
    let focused = form.focused == FormField::Priority;
    let label_style = if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default()
    };
    frame.render_widget(Paragraph::new("Priority:").style(label_style), chunks[*idx]);
    *idx += 1;

    let hint = if focused { "  (space to change)" } else { "" };
    frame.render_widget(
        Paragraph::new(format!("  {}{hint}", form.priority.as_str()))
            .style(priority_style(form.priority)),
        chunks[*idx],
    );
    *idx += 1;
}

// Message length is unbounded (titles are not capped), so the cast must
// saturate instead of truncating.
fn confirm_width(message: &str, term_width: u16) -> u16 {
    u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(6)
        .min(term_width.saturating_sub(4))
}

fn render_confirm(frame: &mut Frame, message: &str) {
    let term = frame.area();
    let width = confirm_width(message, term.width);
    let area = centered_rect(width, 5, term);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Confirm ")
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    frame.render_widget(Paragraph::new(message.to_string()), chunks[0]);
    frame.render_widget(
        Paragraph::new("y: confirm  n/Esc: cancel").style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

fn render_help(frame: &mut Frame) {
    let term = frame.area();
    let width = 44.min(term.width.saturating_sub(4));
    let height = 14.min(term.height.saturating_sub(2));
    let area = centered_rect(width, height, term);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = "\
j/k or arrows  move cursor
a              add task
e or Enter     edit task
d              delete task (confirms)
C              clear all tasks (confirms)
/              search title and description
Esc            cancel / clear search
q              quit

Tasks sort by priority, then due date,
then newest first.";
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_centers_within_area() {
        let area = Rect::new(0, 0, 80, 24);
        let r = centered_rect(40, 10, area);
        assert_eq!(r.x, 20);
        assert_eq!(r.y, 7);
        assert_eq!(r.width, 40);
        assert_eq!(r.height, 10);
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        let r = centered_rect(40, 20, area);
        assert_eq!(r.width, 20);
        assert_eq!(r.height, 10);
    }

    #[test]
    fn confirm_width_fits_short_messages() {
        assert_eq!(confirm_width("Delete task 'x'?", 80), 22);
    }

    #[test]
    fn confirm_width_saturates_on_huge_messages() {
        let message = "x".repeat(u16::MAX as usize + 10);
        assert_eq!(confirm_width(&message, 80), 76);
        // No truncation wrap-around either: a length just past u16::MAX
        // must not come out small
        let message = "x".repeat(u16::MAX as usize + 1);
        assert_eq!(confirm_width(&message, u16::MAX), u16::MAX - 4);
    }
}
