//! Command handlers behind the menu entries.
//!
//! Each handler takes the task list and storage path explicitly, applies one
//! operation, saves the whole list on success, and reports the outcome to the
//! given output. Rejected input is reported as a warning and leaves the list
//! untouched; storage and console failures are returned to the caller.

use std::io::{self, Write};
use std::path::Path;

use crossterm::style::Stylize;
use tracing::{debug, info};

use crate::db::{Database, DbError, TaskError};
use crate::fields::Filter;

/// Failures that end the menu loop.
#[derive(Debug, thiserror::Error)]
pub enum CmdError {
    #[error(transparent)]
    Storage(#[from] DbError),
    #[error("console error: {0}")]
    Io(#[from] io::Error),
}

/// Print a recoverable warning in the menu's style.
pub fn print_warning<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    let message = format!("⚠️  {message}");
    writeln!(out, "  {}", message.as_str().yellow())
}

fn reject<W: Write>(out: &mut W, err: &TaskError) -> io::Result<()> {
    match err {
        TaskError::EmptyTitle => debug!("rejected empty title"),
        TaskError::NotANumber(input) => debug!(%input, "rejected non-numeric position"),
        TaskError::OutOfRange { index, len } => debug!(index, len, "rejected position out of range"),
    }
    print_warning(out, &err.to_string())
}

/// Print the numbered listing, framed by blank lines.
pub fn cmd_show<W: Write>(db: &Database, filter: Filter, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "{}", db.render(filter))?;
    writeln!(out)
}

/// Add a new task with the given title.
pub fn cmd_add<W: Write>(
    db: &mut Database,
    db_path: &Path,
    title: &str,
    out: &mut W,
) -> Result<(), CmdError> {
    let title = match db.add(title) {
        Ok(task) => task.title.clone(),
        Err(e) => {
            reject(out, &e)?;
            return Ok(());
        }
    };
    db.save(db_path)?;
    info!(%title, "added task");
    writeln!(out, "  ✅ Added: '{title}'")?;
    Ok(())
}

/// Mark the task at the position typed by the user as done.
pub fn cmd_complete<W: Write>(
    db: &mut Database,
    db_path: &Path,
    input: &str,
    out: &mut W,
) -> Result<(), CmdError> {
    let title = match db.resolve_position(input).and_then(|p| db.complete(p)) {
        Ok(task) => task.title.clone(),
        Err(e) => {
            reject(out, &e)?;
            return Ok(());
        }
    };
    db.save(db_path)?;
    info!(%title, "completed task");
    writeln!(out, "  ✅ '{title}' marked as done!")?;
    Ok(())
}

/// Delete the task at the position typed by the user.
pub fn cmd_delete<W: Write>(
    db: &mut Database,
    db_path: &Path,
    input: &str,
    out: &mut W,
) -> Result<(), CmdError> {
    let removed = match db.resolve_position(input).and_then(|p| db.delete(p)) {
        Ok(task) => task,
        Err(e) => {
            reject(out, &e)?;
            return Ok(());
        }
    };
    db.save(db_path)?;
    info!(title = %removed.title, "deleted task");
    writeln!(out, "  🗑️  Deleted: '{}'", removed.title)?;
    Ok(())
}

/// Remove all completed tasks and return how many were removed.
pub fn cmd_clear_completed<W: Write>(
    db: &mut Database,
    db_path: &Path,
    out: &mut W,
) -> Result<usize, CmdError> {
    let removed = db.clear_completed();
    db.save(db_path)?;
    info!(removed, "cleared completed tasks");
    writeln!(out, "  🧹 Cleared {removed} completed task(s).")?;
    Ok(removed)
}
