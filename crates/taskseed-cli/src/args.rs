use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Materialize recurring rules into dated tasks
///
/// taskseed reads a YAML file of recurrence rules and makes sure the task
/// store holds the next occurrence of each rule, creating every occurrence
/// at most once. Running without a subcommand performs `sync`.
#[derive(Parser)]
#[command(version, about, name = "taskseed", args_conflicts_with_subcommands = true)]
pub struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true, env = "TASKSEED_VERBOSE")]
    pub verbose: bool,

    /// Disable colored output and use plain text
    #[arg(long, global = true, env = "TASKSEED_NO_COLOR")]
    pub no_color: bool,

    #[command(flatten)]
    pub sync: SyncArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create missing occurrences in the task store
    Sync(SyncArgs),
    /// Validate configuration and check the task store
    Doctor(ConfigArgs),
    /// Inspect and manage stored tasks
    #[command(alias = "t")]
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },
}

/// Location of the configuration and, optionally, the database.
#[derive(ClapArgs, Clone)]
pub struct ConfigArgs {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "TASKSEED_CONFIG", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Path to the SQLite database file. Overrides `target.database`;
    /// defaults to $XDG_DATA_HOME/taskseed/tasks.db
    #[arg(long)]
    pub database_file: Option<PathBuf>,
}

#[derive(ClapArgs, Clone)]
pub struct SyncArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Report what would be created without writing anything
    #[arg(short = 'n', long, env = "TASKSEED_DRY_RUN")]
    pub dry_run: bool,

    /// Days ahead to look for occurrences, overriding `sync.horizonDays`
    #[arg(
        long,
        env = "TASKSEED_HORIZON_DAYS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub horizon_days: Option<u32>,

    /// Days back to read existing tasks, overriding `sync.lookbackDays`
    #[arg(
        long,
        env = "TASKSEED_LOOKBACK_DAYS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub lookback_days: Option<u32>,

    /// Abort the run after this many seconds
    #[arg(long, value_name = "SECS", default_value_t = 120)]
    pub timeout: u64,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks in the configured list
    #[command(alias = "ls")]
    List(ListTasksArgs),
    /// Add a manual task without rule tags
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Mark a task as completed
    #[command(alias = "c")]
    Complete(CompleteTaskArgs),
}

#[derive(ClapArgs)]
pub struct ListTasksArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Include completed tasks
    #[arg(short, long)]
    pub all: bool,

    /// Print tasks as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ClapArgs)]
pub struct AddTaskArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Task title
    pub summary: String,

    /// Due date as YYYY-MM-DD
    #[arg(short, long)]
    pub due: Option<String>,
}

#[derive(ClapArgs)]
pub struct CompleteTaskArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Identifier of the task to complete
    pub uid: String,
}
