use std::cmp::Ordering;

use crate::model::Task;

/// Computes the display projection: filter by substring, then order by
/// priority rank ascending, due date ascending when both tasks carry one,
/// else creation time descending. The sort is stable, so equal keys keep
/// their insertion order.
///
/// When exactly one of two tasks has a due date the comparison falls
/// through to the creation-time tiebreak; due-date presence itself does
/// not order tasks.
pub fn project<'a>(tasks: &'a [Task], filter: &str) -> Vec<&'a Task> {
    let needle = filter.trim().to_lowercase();
    let mut rows: Vec<&Task> = tasks
        .iter()
        .filter(|t| {
            needle.is_empty()
                || t.title.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
        })
        .collect();

    sort_rows(&mut rows);
    rows
}

fn compare(a: &Task, b: &Task) -> Ordering {
    a.priority
        .rank()
        .cmp(&b.priority.rank())
        .then_with(|| match (&a.due, &b.due) {
            (Some(x), Some(y)) => x.cmp(y),
            _ => b.created_at.cmp(&a.created_at),
        })
}

// The due/created fallback is not a total order (a dated and an undated
// task compare by creation time, two dated tasks by due date), and
// slice::sort_by rejects comparators like that. Insertion sort has no
// such requirement and is stable; task lists are small.
fn sort_rows(rows: &mut [&Task]) {
    for i in 1..rows.len() {
        let mut j = i;
        while j > 0 && compare(rows[j - 1], rows[j]) == Ordering::Greater {
            rows.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use chrono::{Duration, Utc};

    fn task(title: &str, priority: Priority, due: Option<&str>) -> Task {
        Task::new(
            title.into(),
            String::new(),
            due.map(str::to_string),
            priority,
        )
    }

    fn titles(rows: &[&Task]) -> Vec<String> {
        rows.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn orders_by_priority_rank() {
        let tasks = vec![
            task("low one", Priority::Low, None),
            task("high one", Priority::High, None),
            task("medium one", Priority::Medium, None),
        ];
        let rows = project(&tasks, "");
        assert_eq!(titles(&rows), ["high one", "medium one", "low one"]);
    }

    #[test]
    fn equal_priority_with_due_dates_sorts_earlier_first() {
        let tasks = vec![
            task("later", Priority::Medium, Some("2025-06-01")),
            task("earlier", Priority::Medium, Some("2025-01-01")),
        ];
        let rows = project(&tasks, "");
        assert_eq!(titles(&rows), ["earlier", "later"]);
    }

    #[test]
    fn equal_priority_without_due_dates_sorts_newest_first() {
        let mut old = task("old", Priority::Medium, None);
        old.created_at = Utc::now() - Duration::hours(1);
        let new = task("new", Priority::Medium, None);
        let tasks = vec![old, new];
        let rows = project(&tasks, "");
        assert_eq!(titles(&rows), ["new", "old"]);
    }

    #[test]
    fn single_sided_due_date_falls_through_to_creation_time() {
        // Only one task has a due date; presence of the date must not
        // decide the order.
        let mut dated = task("dated", Priority::Medium, Some("2025-01-01"));
        dated.created_at = Utc::now() - Duration::hours(1);
        let undated = task("undated", Priority::Medium, None);
        let tasks = vec![dated, undated];
        let rows = project(&tasks, "");
        assert_eq!(titles(&rows), ["undated", "dated"]);
    }

    #[test]
    fn filter_matches_description_only() {
        let mut with_desc = task("Errands", Priority::Medium, None);
        with_desc.description = "buy groceries".into();
        let tasks = vec![task("Groceries list", Priority::Medium, None), with_desc];
        let rows = project(&tasks, "buy");
        assert_eq!(titles(&rows), ["Errands"]);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let tasks = vec![task("Write Report", Priority::Medium, None)];
        assert_eq!(project(&tasks, "write").len(), 1);
        assert_eq!(project(&tasks, "REPORT").len(), 1);
        assert!(project(&tasks, "book").is_empty());
    }

    #[test]
    fn high_priority_sorts_before_low_with_due_date() {
        let tasks = vec![
            task("Write report", Priority::High, None),
            task("Read book", Priority::Low, Some("2025-01-01")),
        ];
        let rows = project(&tasks, "");
        assert_eq!(titles(&rows), ["Write report", "Read book"]);
    }

    #[test]
    fn sorts_large_mix_of_dated_and_undated_tasks() {
        // A dated/undated mix makes the comparator intransitive; the sort
        // must still terminate and keep every row.
        let now = Utc::now();
        let mut tasks = Vec::new();
        for i in 0..30u32 {
            let due = if i % 3 == 0 {
                None
            } else {
                Some(format!("2025-{:02}-{:02}", (i * 7) % 12 + 1, (i * 5) % 28 + 1))
            };
            let mut t = task(&format!("task {i}"), Priority::Medium, due.as_deref());
            t.created_at = now - Duration::minutes(i64::from((i * 13) % 17));
            tasks.push(t);
        }

        let rows = project(&tasks, "");
        assert_eq!(rows.len(), 30);
        let mut seen: Vec<&str> = rows.iter().map(|t| t.title.as_str()).collect();
        seen.sort_unstable();
        let mut expected: Vec<String> = (0..30).map(|i| format!("task {i}")).collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);
        // Dated neighbours still come out due-ascending
        for pair in rows.windows(2) {
            if let (Some(x), Some(y)) = (&pair[0].due, &pair[1].due) {
                assert!(x <= y, "due order violated: {x} before {y}");
            }
        }
    }

    #[test]
    fn stable_for_fully_equal_keys() {
        let now = Utc::now();
        let mut a = task("first", Priority::Medium, None);
        let mut b = task("second", Priority::Medium, None);
        a.created_at = now;
        b.created_at = now;
        let tasks = vec![a, b];
        let rows = project(&tasks, "");
        assert_eq!(titles(&rows), ["first", "second"]);
    }
}
