//! Command handlers.
//!
//! Each handler loads the configuration, opens the store, calls into
//! `taskseed_core` and renders the result as markdown.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use jiff::Timestamp;
use log::{debug, info};
use taskseed_core::{
    dates::{date_in, parse_date},
    display::{Events, Tasks},
    Config, ReconcilerBuilder, SqliteStore, TaskStore,
};

use crate::{
    args::{AddTaskArgs, CompleteTaskArgs, ConfigArgs, ListTasksArgs, SyncArgs, TaskCommands},
    renderer::TerminalRenderer,
    sink::LogSink,
};

pub struct Cli {
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(renderer: TerminalRenderer) -> Self {
        Self { renderer }
    }

    /// Runs one reconciliation under the configured deadline.
    pub async fn sync(&self, args: SyncArgs) -> Result<()> {
        let (config, store) = open(&args.config).await?;
        info!(
            "Syncing {} rules into list '{}' ({})",
            config.rules.len(),
            config.list,
            store.database_path().display()
        );

        let reconciler = ReconcilerBuilder::new(store)
            .with_timezone(config.timezone.clone())
            .with_due(config.due)
            .with_horizon_days(config.horizon_days)
            .with_lookback_days(config.lookback_days)
            .with_window_overrides(args.horizon_days, args.lookback_days)
            .simulate(args.dry_run)
            .build()
            .context("Invalid sync window")?;

        let mut sink = LogSink::default();
        let deadline = Duration::from_secs(args.timeout);
        let report = match tokio::time::timeout(
            deadline,
            reconciler.run(&config.rules, Timestamp::now(), &mut sink),
        )
        .await
        {
            Ok(result) => result.context("Sync failed")?,
            Err(_) => bail!("Sync did not finish within {} seconds", args.timeout),
        };

        let mut output = report.to_string();
        let events = Events(sink.events()).to_string();
        if !events.is_empty() {
            output.push('\n');
            output.push_str(&events);
        }
        self.renderer.render(&output)
    }

    /// Validates the configuration and runs a one-day store query.
    pub async fn doctor(&self, args: ConfigArgs) -> Result<()> {
        let (config, store) = open(&args).await?;

        let today = date_in(Timestamp::now(), &config.timezone);
        let tasks = store
            .list_tasks(today, today)
            .await
            .context("Failed to query the task store")?;
        debug!("Store returned {} tasks for {today}", tasks.len());

        let mut output = String::from("# Configuration OK\n\n");
        output.push_str(&format!("- **Config**: {}\n", args.config.display()));
        output.push_str(&format!("- **List**: {}\n", config.list));
        output.push_str(&format!(
            "- **Database**: {}\n",
            store.database_path().display()
        ));
        output.push_str(&format!(
            "- **Timezone**: {}\n",
            config.timezone.iana_name().unwrap_or("UTC")
        ));
        output.push_str(&format!("- **Rules**: {}\n", config.rules.len()));
        output.push_str(&format!("- **Due today**: {}\n", tasks.len()));
        self.renderer.render(&output)
    }

    pub async fn tasks(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::List(args) => self.list_tasks(args).await,
            TaskCommands::Add(args) => self.add_task(args).await,
            TaskCommands::Complete(args) => self.complete_task(args).await,
        }
    }

    async fn list_tasks(&self, args: ListTasksArgs) -> Result<()> {
        let (_, store) = open(&args.config).await?;
        let tasks = store
            .all_tasks(args.all)
            .await
            .context("Failed to list tasks")?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&tasks)?);
            return Ok(());
        }
        self.renderer.render(&Tasks(tasks).to_string())
    }

    async fn add_task(&self, args: AddTaskArgs) -> Result<()> {
        let due = args
            .due
            .as_deref()
            .map(parse_date)
            .transpose()
            .context("Invalid due date")?;

        let (_, store) = open(&args.config).await?;
        let task = store
            .add_task(&args.summary, due)
            .await
            .context("Failed to add task")?;

        self.renderer
            .render(&format!("Added task `{}`\n\n{task}", task.uid))
    }

    async fn complete_task(&self, args: CompleteTaskArgs) -> Result<()> {
        let (_, store) = open(&args.config).await?;
        store
            .complete_task(&args.uid)
            .await
            .with_context(|| format!("Failed to complete task {}", args.uid))?;

        self.renderer
            .render(&format!("Completed task `{}`\n", args.uid))
    }
}

/// Loads the configuration and opens the store it points at.
async fn open(args: &ConfigArgs) -> Result<(Config, SqliteStore)> {
    let config = Config::load(&args.config)
        .with_context(|| format!("Failed to load configuration {}", args.config.display()))?;

    let database = args.database_file.as_ref().or(config.database.as_ref());
    let store = SqliteStore::builder(&config.list)
        .with_database_path(database)
        .build()
        .await
        .context("Failed to open task store")?;

    Ok((config, store))
}
