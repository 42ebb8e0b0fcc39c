use anyhow::{Context, Result};
use clap::Parser;
use scicalc::config::Config;
use scicalc::shell::{Command, Outcome, evaluate_line, help_text};
use scicalc::{CalcError, Calculator, ErrorKind, History};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scicalc", version, about = "Scientific calculator")]
struct Args {
    /// Expression to evaluate once. Starts the interactive loop when omitted.
    expression: Vec<String>,

    /// Path to the configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the history file (overrides the configuration).
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Keep history in memory only.
    #[arg(long)]
    no_history: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let calc = Calculator::new();
    let capacity = config.history.capacity;
    let mut history = if args.no_history {
        History::in_memory(capacity)
    } else {
        let path = args
            .history_file
            .clone()
            .unwrap_or_else(|| config.history.path());
        History::new(capacity, path)
    };

    if !args.expression.is_empty() {
        let input = args.expression.join(" ");
        let outcome = evaluate_line(&calc, &input).map_err(|e| anyhow::anyhow!(describe(&e)))?;
        println!("{}", outcome.display());
        history.add_record(outcome.record());
        return Ok(());
    }

    run_interactive(&calc, &mut history, &config)
}

fn run_interactive(calc: &Calculator, history: &mut History, config: &Config) -> Result<()> {
    println!("Scientific calculator (enter 'h' for help)");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut multiline = false;

    loop {
        if multiline {
            println!("Multi-line input: finish with an empty line");
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let mut input = line?;

        if multiline && !input.trim().is_empty() && Command::parse(&input).is_none() {
            let mut parts = vec![input];
            loop {
                print!(". ");
                io::stdout().flush()?;
                match lines.next() {
                    Some(line) => {
                        let line = line?;
                        if line.trim().is_empty() {
                            break;
                        }
                        parts.push(line);
                    }
                    None => break,
                }
            }
            input = parts.join(" ");
        }

        if input.trim().is_empty() {
            continue;
        }

        match Command::parse(&input) {
            Some(Command::Quit) => break,
            Some(Command::Help) => println!("{}", help_text(calc)),
            Some(Command::Clear) => print!("\x1b[2J\x1b[H"),
            Some(Command::History) => show_history(history, config.history.display_count),
            Some(Command::SearchHistory(term)) => search_history(history, &term),
            Some(Command::ToggleMultiline) => {
                multiline = !multiline;
                println!(
                    "Multi-line mode {}",
                    if multiline { "enabled" } else { "disabled" }
                );
            }
            None => match evaluate_line(calc, &input) {
                Ok(outcome) => {
                    print_outcome(&outcome);
                    history.add_record(outcome.record());
                }
                Err(e) => eprintln!("{}", describe(&e)),
            },
        }
    }

    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    println!("Result: {}", outcome.display());
    if let Outcome::Calculation(result) = outcome
        && !result.is_finite()
    {
        eprintln!("Warning: result is outside the floating-point range");
    }
}

fn show_history(history: &History, count: usize) {
    let records = history.get_recent_history(Some(count));
    if records.is_empty() {
        println!("No calculations yet");
        return;
    }
    println!(
        "Recent calculations ({} kept, up to {}):",
        history.len(),
        history.capacity()
    );
    for (i, record) in records.iter().enumerate() {
        println!("{}. {}", i + 1, record);
    }
    if let Some(path) = history.path() {
        println!("Saved to {}", path.display());
    }
}

fn search_history(history: &History, term: &str) {
    let records = history.search(term);
    if records.is_empty() {
        println!("No calculations match '{}'", term);
        return;
    }
    for (i, record) in records.iter().enumerate() {
        println!("{}. {}", i + 1, record);
    }
}

fn describe(err: &CalcError) -> String {
    let prefix = match err.kind() {
        ErrorKind::Parse => "Syntax error",
        ErrorKind::UnsupportedSymbol => "Unknown symbol",
        ErrorKind::Validation => "Invalid argument",
        ErrorKind::Arithmetic => "Math error",
        ErrorKind::Conversion => "Conversion error",
    };
    format!("{}: {}", prefix, err)
}
