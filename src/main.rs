use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zcalc::calculator::{AngleMode, CalcResult, Hold, SystemClipboard, copy_result};
use zcalc::{Config, Session};

/// Evaluate calculator expressions, or start an interactive prompt when no
/// expression is given.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expression to evaluate. Words are joined with spaces.
    expression: Vec<String>,

    /// Angle mode for trigonometric functions (deg or rad).
    #[arg(short, long)]
    mode: Option<AngleMode>,

    /// Copy successful results to the clipboard. On Linux a one-shot copy
    /// waits until another application takes over the clipboard.
    #[arg(short, long)]
    copy: bool,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Read configuration from this file instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
}

const HELP: &str = "\
Enter expressions using + - * / % ^ ! and parentheses.
Functions: sin cos tan asin acos atan ln log sqrt exp abs fact
Constants: pi. `ans` is the last answer.
Commands: quit, exit, help, history, deg, rad, mode, mc, mr, m+ [expr], m- [expr]";

/// Output settings shared by one-shot and interactive use.
struct Output {
    clipboard: Option<SystemClipboard>,
    json: bool,
}

impl Output {
    fn new(copy: bool, hold: Hold, json: bool) -> Self {
        // A missing clipboard should not hide results.
        let clipboard = copy
            .then(|| SystemClipboard::open(hold))
            .and_then(|opened| {
                opened
                    .map_err(|err| tracing::warn!(%err, "clipboard unavailable"))
                    .ok()
            });
        Self { clipboard, json }
    }

    fn print(&mut self, result: &CalcResult) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(result)?);
        } else if result.is_success() {
            println!("{}", result.display());
        } else {
            eprintln!("Error: {}", result.display());
        }

        if let Some(clipboard) = &mut self.clipboard {
            if let Err(err) = copy_result(result, clipboard) {
                tracing::warn!(%err, "failed to copy result");
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };

    let mut session = Session::from_config(&config);
    if let Some(mode) = args.mode {
        session.set_angle_mode(mode);
    }

    let copy = args.copy || config.copy_results;

    if args.expression.is_empty() {
        let mut output = Output::new(copy, Hold::WhileOpen, args.json);
        return repl(&mut session, &mut output);
    }

    let mut output = Output::new(copy, Hold::UntilReplaced, args.json);
    let expression = args.expression.join(" ");
    let result = session.evaluate(&expression);
    output.print(&result)?;
    if !result.is_success() {
        std::process::exit(2);
    }
    Ok(())
}

fn repl(session: &mut Session, output: &mut Output) -> Result<()> {
    println!("Calculator ({}) - type an expression, or 'quit' to exit.", session.angle_mode());
    println!("Type 'help' for the list of commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("calc> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("reading input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Command::parse(line) {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::History => {
                for (i, entry) in session.history().enumerate() {
                    println!("{}: {} = {}", i + 1, entry.expression, entry.display_value());
                }
            }
            Command::SetMode(mode) => session.set_angle_mode(mode),
            Command::ToggleMode => println!("{}", session.toggle_angle_mode()),
            Command::MemoryClear => session.memory_clear(),
            Command::MemoryRecall => println!("{}", session.memory_recall()),
            Command::MemoryAdd(rest) => print_memory(session.memory_add(rest)),
            Command::MemorySubtract(rest) => print_memory(session.memory_subtract(rest)),
            Command::Evaluate(expression) => {
                let result = session.evaluate(expression);
                output.print(&result)?;
            }
        }
    }

    Ok(())
}

/// A line typed at the prompt. Keywords are case-insensitive.
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Quit,
    Help,
    History,
    SetMode(AngleMode),
    ToggleMode,
    MemoryClear,
    MemoryRecall,
    MemoryAdd(&'a str),
    MemorySubtract(&'a str),
    Evaluate(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        match line.to_ascii_lowercase().as_str() {
            "quit" | "exit" => return Self::Quit,
            "help" => return Self::Help,
            "history" => return Self::History,
            "deg" => return Self::SetMode(AngleMode::Degrees),
            "rad" => return Self::SetMode(AngleMode::Radians),
            "mode" => return Self::ToggleMode,
            "mc" => return Self::MemoryClear,
            "mr" => return Self::MemoryRecall,
            _ => {}
        }

        if let Some(rest) = strip_prefix_ignore_case(line, "m+") {
            Self::MemoryAdd(rest)
        } else if let Some(rest) = strip_prefix_ignore_case(line, "m-") {
            Self::MemorySubtract(rest)
        } else {
            Self::Evaluate(line)
        }
    }
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &line[prefix.len()..])
}

fn print_memory(outcome: Result<f64, zcalc::CalcError>) {
    match outcome {
        Ok(memory) => println!("M = {memory}"),
        Err(err) => eprintln!("Error: {err}"),
    }
}
