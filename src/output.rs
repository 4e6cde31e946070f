use crate::model::Task;

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn format_task_list(tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return "No tasks.\n".to_string();
    }
    let mut out = String::new();
    for task in tasks {
        let due = task
            .due
            .as_ref()
            .map(|d| format!(" (due: {d})"))
            .unwrap_or_default();
        let desc = if task.description.is_empty() {
            String::new()
        } else {
            format!("  {}", task.description)
        };
        out.push_str(&format!(
            "{} {}  {}{}{}\n",
            task.priority.icon(),
            short_id(&task.id),
            task.title,
            due,
            desc
        ));
    }
    out
}

pub fn format_task_detail(task: &Task) -> String {
    let mut out = String::new();
    out.push_str(&format!("Id:          {}\n", task.id));
    out.push_str(&format!("Title:       {}\n", task.title));
    if !task.description.is_empty() {
        out.push_str(&format!("Description: {}\n", task.description));
    }
    if let Some(ref due) = task.due {
        out.push_str(&format!("Due:         {due}\n"));
    }
    out.push_str(&format!("Priority:    {}\n", task.priority.as_str()));
    out.push_str(&format!(
        "Created:     {}\n",
        task.created_at.format("%Y-%m-%dT%H:%M:%SZ")
    ));
    if let Some(updated) = task.updated_at {
        out.push_str(&format!(
            "Updated:     {}\n",
            updated.format("%Y-%m-%dT%H:%M:%SZ")
        ));
    }
    out
}
