use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use taskdeck_core::settings::{load_settings, save_settings, Settings, Theme};
use taskdeck_core::storage::LoadOutcome;
use taskdeck_core::store::Scope;
use taskdeck_core::tracker::Tracker;

#[derive(Parser)]
#[command(name = "taskdeck", version, about = "Personal task tracker with a completed-item checklist")]
struct Cli {
    /// Path to the JSON task store
    #[arg(long, global = true, default_value = "taskdeck.json")]
    store: PathBuf,
    /// Path to the settings file
    #[arg(long, global = true, default_value = "taskdeck.toml")]
    settings: PathBuf,
    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new task
    Add { title: String },
    /// Complete a task, or toggle its done flag when the checklist
    /// feature is disabled
    Done { index: usize },
    /// Rename a task in place
    Edit { index: usize, title: String },
    /// Delete a task permanently
    Delete {
        index: usize,
        /// Delete from the completed checklist instead of the active list
        #[arg(long)]
        completed: bool,
    },
    /// Move a completed task back to the active list
    Restore { index: usize },
    /// Expire old completed tasks now, regardless of the auto-delete
    /// setting
    Purge,
    /// Show tasks, checklist and progress
    List,
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print current settings
    Show,
    /// Update one or more settings
    Set {
        #[arg(long)]
        language: Option<String>,
        /// One of: red, blue, white, black, rainbow
        #[arg(long)]
        theme: Option<String>,
        /// Days to keep completed tasks, clamped into [1, 365]
        #[arg(long)]
        retention_days: Option<u32>,
        /// Automatically expire completed tasks on every change
        #[arg(long)]
        auto_delete: Option<bool>,
        /// Move completed tasks into the checklist instead of flagging
        /// them in place
        #[arg(long)]
        checklist: Option<bool>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Config { action } => run_config(&cli, action),
        command => run_tracker(&cli, command),
    }
}

fn run_config(cli: &Cli, action: &ConfigAction) -> Result<()> {
    let mut settings = load_settings(&cli.settings);
    if let ConfigAction::Set {
        language,
        theme,
        retention_days,
        auto_delete,
        checklist,
    } = action
    {
        if let Some(language) = language {
            settings.language = language.clone();
        }
        if let Some(theme) = theme {
            settings.theme = theme.parse::<Theme>()?;
        }
        if let Some(days) = retention_days {
            settings.set_retention_days(*days);
        }
        if let Some(auto_delete) = auto_delete {
            settings.auto_delete_completed = *auto_delete;
        }
        if let Some(checklist) = checklist {
            settings.enable_checklist = *checklist;
        }
        save_settings(&cli.settings, &settings)?;
    }
    print_settings(cli, &settings);
    Ok(())
}

fn print_settings(cli: &Cli, settings: &Settings) {
    if cli.json {
        let payload = json!({
            "ok": true,
            "settings": {
                "enable_checklist": settings.enable_checklist,
                "auto_delete_completed": settings.auto_delete_completed,
                "retention_days": settings.retention_days,
                "language": settings.language,
                "theme": settings.theme.as_str(),
            },
        });
        println!("{payload}");
    } else {
        println!("checklist:    {}", settings.enable_checklist);
        println!("auto-delete:  {}", settings.auto_delete_completed);
        println!("retention:    {} days", settings.retention_days);
        println!("language:     {}", settings.language);
        println!("theme:        {}", settings.theme);
    }
}

fn run_tracker(cli: &Cli, command: &Command) -> Result<()> {
    let settings = load_settings(&cli.settings);
    let mut tracker = Tracker::open(&cli.store, settings)?;
    if tracker.load_outcome() == LoadOutcome::Recovered {
        warn!(store = %cli.store.display(), "task store was unreadable; starting from an empty document");
    }

    match command {
        Command::Add { title } => {
            let applied = tracker.add(title)?;
            report(cli, &tracker, applied, "empty titles are not allowed");
        }
        Command::Done { index } => {
            let applied = tracker.toggle(*index)?;
            report(cli, &tracker, applied, "no task at that index");
        }
        Command::Edit { index, title } => {
            let applied = tracker.edit(*index, title)?;
            report(cli, &tracker, applied, "nothing edited");
        }
        Command::Delete { index, completed } => {
            let scope = if *completed { Scope::Checklist } else { Scope::Tasks };
            let applied = tracker.delete(*index, scope)?;
            report(cli, &tracker, applied, "no task at that index");
        }
        Command::Restore { index } => {
            let applied = tracker.restore(*index)?;
            report(cli, &tracker, applied, "no completed task at that index");
        }
        Command::Purge => {
            let removed = tracker.purge()?;
            if cli.json {
                println!("{}", json!({ "ok": true, "removed": removed }));
            } else {
                println!("purged {removed} expired task(s)");
            }
        }
        Command::List => print_list(cli, &tracker),
        Command::Config { .. } => unreachable!("handled in main"),
    }
    Ok(())
}

fn report(cli: &Cli, tracker: &Tracker, applied: bool, skipped: &str) {
    if cli.json {
        let progress = tracker.progress();
        let payload = json!({
            "ok": true,
            "applied": applied,
            "document": tracker.document(),
            "progress": { "percent": progress.percent, "bar": progress.bar },
        });
        println!("{payload}");
        return;
    }
    if applied {
        let progress = tracker.progress();
        println!("{} {}%", progress.bar, progress.percent);
    } else {
        println!("{skipped}");
    }
}

fn print_list(cli: &Cli, tracker: &Tracker) {
    let doc = tracker.document();
    let progress = tracker.progress();
    if cli.json {
        let payload = json!({
            "ok": true,
            "document": doc,
            "progress": { "percent": progress.percent, "bar": progress.bar },
        });
        println!("{payload}");
        return;
    }

    println!("{} {}%", progress.bar, progress.percent);
    if !doc.tasks.is_empty() {
        println!();
        println!("Tasks:");
        for (index, task) in doc.tasks.iter().enumerate() {
            let mark = if task.done { "x" } else { " " };
            println!("  {index} [{mark}] {}", task.title);
        }
    }
    if !doc.checklist.is_empty() {
        println!();
        println!("Completed:");
        for (index, entry) in doc.checklist.iter().enumerate() {
            println!(
                "  {index} {} ({})",
                entry.title,
                format_timestamp(entry.completed_at)
            );
        }
    }
    if doc.is_empty() {
        println!("no tasks yet");
    }
}

fn format_timestamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ms.to_string())
}
