use std::path::PathBuf;

use clap::Parser;

/// Menu-driven to-do list.
/// Storage defaults to ./tasks.json or a path passed via --db.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Console to-do list that saves after every change")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, default_value = "tasks.json")]
    pub db: PathBuf,

    /// Log debug events to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
