mod cli;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use opus::storage::Storage;
use opus::sync::{HttpSyncService, NoSync, SyncManager, TaskSync};
use opus::{Config, LogicManager, ModelManager, Payload};
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        use clap_complete::{generate, Shell};
        let shell_enum = match shell.to_lowercase().as_str() {
            "bash" => Shell::Bash,
            "zsh" => Shell::Zsh,
            "fish" => Shell::Fish,
            "elvish" => Shell::Elvish,
            "powershell" => Shell::PowerShell,
            other => {
                println!("Unsupported shell: {}", other);
                return Ok(());
            }
        };
        let mut cmd = Cli::command();
        generate(shell_enum, &mut cmd, "opus", &mut io::stdout());
        return Ok(());
    }

    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    let mut logic = build_logic(&config)?;

    match cli.command {
        Some(Commands::Run { line }) => {
            run_line(&mut logic, &line.join(" "));
        }
        Some(Commands::List) => {
            print_tasks(&logic);
        }
        Some(Commands::Shell) | None => {
            run_interactive_mode(&mut logic)?;
        }
        Some(Commands::Completions { .. }) => {}
    }

    logic.shutdown();
    Ok(())
}

fn build_logic(config: &Config) -> Result<LogicManager> {
    let storage = Storage::open(&config.db_path)?;
    let tasks = storage
        .load_tasks()
        .with_context(|| format!("Failed to load tasks from {}", config.db_path.display()))?;

    let sync: Box<dyn TaskSync> = match &config.sync_url {
        Some(url) => {
            log::info!("Sync service configured at {}", url);
            Box::new(SyncManager::new(Box::new(HttpSyncService::new(url.clone()))))
        }
        None => Box::new(NoSync),
    };

    Ok(LogicManager::new(ModelManager::new(tasks, sync), storage))
}

/// Returns false once the user asked to leave.
fn run_line(logic: &mut LogicManager, line: &str) -> bool {
    match logic.execute(line) {
        Ok(result) => {
            println!("{}", result.feedback);
            match result.payload {
                Some(Payload::Exit) => return false,
                Some(Payload::ShowHelp) | None => {}
            }
            print_tasks(logic);
        }
        Err(e) => {
            println!("❌ {}", e);
        }
    }
    true
}

fn print_tasks(logic: &LogicManager) {
    let tasks = logic.filtered_tasks();
    if tasks.is_empty() {
        println!("(no tasks)");
        return;
    }
    for (i, task) in tasks.iter().enumerate() {
        println!("{}. {}", i + 1, task);
    }
}

fn run_interactive_mode(logic: &mut LogicManager) -> Result<()> {
    println!("📋 opus task manager");
    println!("Type 'help' for the list of commands, 'exit' to quit.\n");
    print_tasks(logic);

    let stdin = io::stdin();
    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        if input.trim().is_empty() {
            continue;
        }
        if !run_line(logic, &input) {
            break;
        }
    }

    Ok(())
}
