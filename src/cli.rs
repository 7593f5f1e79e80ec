use crate::domain::DateKey;
use crate::ledger::TaskLedger;
use anyhow::{bail, Result};
use clap::Subcommand;
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a local .daycheck directory in the current directory
    Init,
    /// Print pending and completed tasks for a day
    List {
        /// Day to show (YYYY-MM-DD). Defaults to today.
        #[arg(short, long)]
        date: Option<DateKey>,
    },
    /// Add a task
    Add {
        #[arg(short, long)]
        date: Option<DateKey>,
        /// Task text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Replace the text of a pending task
    Edit {
        #[arg(short, long)]
        date: Option<DateKey>,
        /// Task number as shown by `list`
        index: usize,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Delete a pending task
    Delete {
        #[arg(short, long)]
        date: Option<DateKey>,
        index: usize,
    },
    /// Mark a pending task as completed
    Done {
        #[arg(short, long)]
        date: Option<DateKey>,
        index: usize,
    },
    /// Move a completed task back to the pending list
    Restore {
        #[arg(short, long)]
        date: Option<DateKey>,
        /// Completed task number as shown by `list`
        index: usize,
    },
    /// Reverse the last edit, delete, completion or restore while it is still undoable
    Undo,
}

/// Convert a 1-based task number to a list index
fn list_index(number: usize, len: usize, what: &str, date: &DateKey) -> Result<usize> {
    if number == 0 || number > len {
        bail!("No {} task {} on {} ({} listed)", what, number, date, len);
    }
    Ok(number - 1)
}

fn print_day(ledger: &TaskLedger, date: &DateKey, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{} ({})", date.long_label(), date)?;
    if !ledger.has_record(date) {
        writeln!(out, "  No tasks")?;
        return Ok(());
    }

    let day = ledger.day(date);
    if day.tasks.is_empty() {
        writeln!(out, "  No tasks")?;
    }
    for (idx, task) in day.tasks.iter().enumerate() {
        writeln!(out, "  {:>2}. ☐ {}", idx + 1, task.text)?;
    }

    if !day.completed.is_empty() {
        writeln!(out)?;
        writeln!(out, "Completed: {}", day.completed.len())?;
        for (idx, task) in day.completed.iter().enumerate() {
            writeln!(out, "  {:>2}. ✓ {}", idx + 1, task.text)?;
        }
    }
    Ok(())
}

/// Run a non-interactive subcommand against the ledger
pub fn execute(
    ledger: &mut TaskLedger,
    command: Commands,
    today: DateKey,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Init => bail!("init must run before the ledger is opened"),
        Commands::List { date } => {
            let date = date.unwrap_or(today);
            print_day(ledger, &date, out)?;
        }
        Commands::Add { date, text } => {
            let date = date.unwrap_or(today);
            let text = text.join(" ");
            if !ledger.add_task(&date, &text) {
                bail!("Task text is empty");
            }
            writeln!(out, "Added to {}: {}", date, text.trim())?;
        }
        Commands::Edit { date, index, text } => {
            let date = date.unwrap_or(today);
            let index = list_index(index, ledger.day(&date).tasks.len(), "pending", &date)?;
            if ledger.save_edit(&date, index, &text.join(" ")) {
                writeln!(out, "Edited task {} on {}", index + 1, date)?;
            } else {
                writeln!(out, "Nothing changed")?;
            }
        }
        Commands::Delete { date, index } => {
            let date = date.unwrap_or(today);
            let index = list_index(index, ledger.day(&date).tasks.len(), "pending", &date)?;
            let text = ledger.day(&date).tasks[index].text.clone();
            ledger.delete_task(&date, index);
            writeln!(out, "Deleted: {}", text)?;
        }
        Commands::Done { date, index } => {
            let date = date.unwrap_or(today);
            let index = list_index(index, ledger.day(&date).tasks.len(), "pending", &date)?;
            let text = ledger.day(&date).tasks[index].text.clone();
            ledger.mark_completed(&date, index);
            writeln!(out, "Completed: {}", text)?;
        }
        Commands::Restore { date, index } => {
            let date = date.unwrap_or(today);
            let index =
                list_index(index, ledger.day(&date).completed.len(), "completed", &date)?;
            let text = ledger.day(&date).completed[index].text.clone();
            ledger.restore_task(&date, index);
            writeln!(out, "Restored: {}", text)?;
        }
        Commands::Undo => {
            let Some(label) = ledger.pending_undo().map(|entry| entry.label()) else {
                bail!("Nothing to undo");
            };
            if ledger.undo() {
                writeln!(out, "{}: done", label)?;
            } else {
                writeln!(out, "{}: the task has changed since, nothing reversed", label)?;
            }
        }
    }
    Ok(())
}
