use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tl", about = concat!("tasklist v", env!("CARGO_PKG_VERSION"), " - a reorderable to-do list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Tasks file to use instead of the configured one
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,

    /// Settings file (default: <config dir>/tasklist/settings.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the tasks in order
    List,
    /// Append a task
    Add(AddArgs),
    /// Delete a task by number
    Rm(RmArgs),
    /// Move a task to another position
    Mv(MvArgs),
    /// Replace a task's text
    Edit(EditArgs),
    /// Delete every task
    Clear,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task number, as shown by `tl list`
    pub number: usize,
}

#[derive(Args)]
pub struct MvArgs {
    /// Current task number
    pub from: usize,
    /// New position
    pub to: usize,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task number, as shown by `tl list`
    pub number: usize,
    /// New text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}
