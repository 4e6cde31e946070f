use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority. Lower rank sorts first in the projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => bail!("invalid priority '{s}': must be high, medium, or low"),
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Display icon: !=high, -=medium, .=low
    pub fn icon(&self) -> &'static str {
        match self {
            Self::High => "!",
            Self::Medium => "-",
            Self::Low => ".",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::Low => Self::High,
        }
    }
}

// Field names stay camelCase in the persisted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Builds a fresh task with a generated id and creation timestamp.
    /// The title must already be validated.
    pub fn new(title: String, description: String, due: Option<String>, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            due,
            priority,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Fields replaced by an update; `updated_at` is stamped by the store.
#[derive(Debug, Clone)]
pub struct TaskPatch {
    pub title: String,
    pub description: String,
    pub due: Option<String>,
    pub priority: Priority,
}
