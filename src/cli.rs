use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taskdeck", about = "Local task list manager")]
pub struct Cli {
    /// Path to the task file [default: ~/.taskdeck/tasks.json]
    #[arg(long, env = "TASKDECK_FILE", global = true)]
    pub file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a task
    Add {
        /// Task title (at least 3 characters, unique)
        title: String,
        /// Task description
        #[arg(short, long, default_value = "")]
        desc: String,
        /// Due date (ISO, e.g. 2025-06-01)
        #[arg(long)]
        due: Option<String>,
        /// Priority (high, medium, low)
        #[arg(short, long, default_value = "medium")]
        priority: String,
    },

    /// Edit a task
    Edit {
        /// Task id (any unique prefix)
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        desc: Option<String>,
        /// New due date; pass an empty string to remove it
        #[arg(long)]
        due: Option<String>,
        /// New priority (high, medium, low)
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Remove a task
    Rm {
        /// Task id (any unique prefix)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove all tasks
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show task details
    Show {
        /// Task id (any unique prefix)
        id: String,
    },

    /// List tasks in display order
    List {
        /// Only tasks whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Launch interactive TUI
    Ui,
}
