use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "opus", author, version, about = "Keyboard-driven task manager", long_about = None)]
pub struct Cli {
    /// Task database to use instead of $OPUS_DB_PATH or ~/.opus.db
    #[arg(long = "db", value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single command line, e.g. `opus run add Buy milk p/hi`
    Run {
        #[arg(value_name = "LINE", required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
    /// Print every task
    List,
    /// Interactive prompt (default)
    Shell,
    /// Generate shell completions
    Completions {
        #[arg(value_name = "SHELL")]
        shell: String,
    },
}
