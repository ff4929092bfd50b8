//! # todo - Console To-Do List
//!
//! A single-user to-do list driven by a numbered text menu. Tasks are kept in
//! memory while the program runs and the whole list is written back to a JSON
//! file after every change.
//!
//! ## Quick Start
//!
//! ```bash
//! # Use ./tasks.json
//! todo
//!
//! # Keep the list somewhere else, with debug logging on stderr
//! todo --db ~/notes/tasks.json --verbose
//! ```
//!
//! ## Menu
//!
//! 1. View all tasks
//! 2. View pending tasks
//! 3. Add a task
//! 4. Mark task as done
//! 5. Delete a task
//! 6. Clear completed tasks
//! 7. Quit
//!
//! Tasks are numbered by their position in the list. Viewing only pending
//! tasks keeps the full-list numbers, so they can be typed straight into
//! "mark as done" or "delete".
//!
//! ## Storage
//!
//! The file is a pretty-printed JSON array of `{ "title", "done", "created" }`
//! objects. A missing file means an empty list. A file that cannot be parsed
//! stops the program before anything is written, so the data can be repaired
//! by hand.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod cmd;
pub mod db;
pub mod fields;
pub mod menu;
pub mod task;

use cli::Cli;
use db::Database;
use menu::MenuApp;

fn init_tracing(verbose: bool) {
    let default = if verbose { "todo=debug" } else { "todo=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let db = match Database::load(&cli.db) {
        Ok(db) => db,
        Err(e) => {
            error!(path = %cli.db.display(), "failed to load tasks");
            eprintln!("Error: {e}");
            eprintln!("The file was left untouched. Fix it or move it aside to start a new list.");
            return ExitCode::FAILURE;
        }
    };
    info!(path = %cli.db.display(), count = db.len(), "starting");

    let mut app = MenuApp::new(db, cli.db);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(e) = app.run(stdin.lock(), &mut stdout) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    info!(count = app.database().len(), "exiting");
    ExitCode::SUCCESS
}
