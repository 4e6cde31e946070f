use std::fmt;

use crate::model::Task;

/// Why a title was rejected. Rendered inline next to the input; every
/// variant is user-correctable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleError {
    Empty,
    TooShort,
    Duplicate,
}

impl fmt::Display for TitleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "title must not be empty"),
            Self::TooShort => write!(f, "title must be at least 3 characters"),
            Self::Duplicate => write!(f, "a task with this title already exists"),
        }
    }
}

impl std::error::Error for TitleError {}

/// Validate a title against the current collection. `exclude_id` names the
/// task being edited, if any, so a task can keep its own title.
/// Returns the trimmed title on success.
pub fn validate_title(
    tasks: &[Task],
    input: &str,
    exclude_id: Option<&str>,
) -> Result<String, TitleError> {
    let title = input.trim();
    if title.is_empty() {
        return Err(TitleError::Empty);
    }
    if title.chars().count() < 3 {
        return Err(TitleError::TooShort);
    }
    let lowered = title.to_lowercase();
    let duplicate = tasks.iter().any(|t| {
        exclude_id != Some(t.id.as_str()) && t.title.trim().to_lowercase() == lowered
    });
    if duplicate {
        return Err(TitleError::Duplicate);
    }
    Ok(title.to_string())
}
