use clap::{Parser, Subcommand};
use ember_interpreter::{InterpreterSession, Object, SessionError};
use ember_parser::{Lexer, parse_program_with_diagnostics};
use miette::{IntoDiagnostic, MietteHandlerOpts, NamedSource, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tracing::debug;

mod repl;

use repl::{ReplConfig, ReplSession};

#[derive(Parser)]
#[command(
    name = "ember",
    version,
    about = "The Ember programming language",
    long_about = "Ember is a small dynamically-typed language with first-class functions, closures, arrays and hashes."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (the default)
    Repl {
        /// Prompt shown before each input
        #[arg(long)]
        prompt: Option<String>,

        /// Do not load or save line history
        #[arg(long)]
        no_history: bool,

        /// Where to keep line history
        #[arg(long, value_name = "PATH")]
        history_file: Option<String>,
    },

    /// Evaluate an Ember source file (use '-' to read from stdin)
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse an Ember source file and print its AST
    Parse {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the token stream instead of the AST
        #[arg(short, long)]
        tokens: bool,
    },
}

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `EMBER_LOG` or `RUST_LOG` is set
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let directives = std::env::var("EMBER_LOG").or_else(|_| std::env::var("RUST_LOG"));
        if let Ok(directives) = directives {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(io::stderr))
                .with(EnvFilter::new(directives))
                .init();
        }
    });
}

fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

fn main() -> ExitCode {
    setup_miette_handler();
    init_tracing();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Repl {
        prompt: None,
        no_history: false,
        history_file: None,
    });

    let outcome = match command {
        Commands::Repl {
            prompt,
            no_history,
            history_file,
        } => handle_repl_command(prompt, no_history, history_file),
        Commands::Run { file } => handle_run_command(&file),
        Commands::Parse { file, tokens } => handle_parse_command(&file, tokens),
    };

    match outcome {
        Ok(code) => code,
        Err(report) => {
            eprintln!("{report:?}");
            ExitCode::FAILURE
        }
    }
}

fn handle_repl_command(
    prompt: Option<String>,
    no_history: bool,
    history_file: Option<String>,
) -> Result<ExitCode> {
    let mut config = ReplConfig::default();
    if let Some(prompt) = prompt {
        config.prompt = prompt;
    }
    if no_history {
        config.persist_history = false;
    }
    if history_file.is_some() {
        config.history_file = history_file;
    }

    let mut session = ReplSession::with_config(config)?;
    session.run()?;
    Ok(ExitCode::SUCCESS)
}

fn handle_run_command(file: &Path) -> Result<ExitCode> {
    let (source, source_name) = read_source(file)?;
    debug!(source = %source_name, bytes = source.len(), "running program");
    let mut session = InterpreterSession::new();

    match session.execute(&source) {
        Ok(Some(Object::Null)) | Ok(None) => Ok(ExitCode::SUCCESS),
        Ok(Some(value)) => {
            println!("{value}");
            Ok(ExitCode::SUCCESS)
        }
        Err(SessionError::Parse { diagnostics }) => {
            for message in diagnostics.messages() {
                eprintln!("{message}");
            }
            Ok(ExitCode::FAILURE)
        }
        Err(SessionError::Runtime(error)) => {
            let report = miette::Report::new(error)
                .with_source_code(NamedSource::new(source_name, source));
            eprintln!("{report:?}");
            Ok(ExitCode::FAILURE)
        }
        Err(other) => Err(other.into()),
    }
}

fn handle_parse_command(file: &Path, tokens: bool) -> Result<ExitCode> {
    let (source, source_name) = read_source(file)?;

    if tokens {
        for token in Lexer::tokenize(&source) {
            if token.literal.is_empty() {
                println!("{}", token.kind.as_str());
            } else {
                println!("{} {}", token.kind.as_str(), token.literal);
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let (program, diagnostics) = parse_program_with_diagnostics(&source);
    if diagnostics.has_errors() {
        for report in diagnostics.create_reports_with_filename(&source_name) {
            eprintln!("{report:?}");
        }
        return Ok(ExitCode::FAILURE);
    }

    for statement in &program.statements {
        println!("{statement}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Read a source file, or stdin when the path is `-`
fn read_source(file: &Path) -> Result<(String, String)> {
    if file.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).into_diagnostic()?;
        return Ok((buffer, "<stdin>".to_string()));
    }

    if !file.exists() {
        return Err(miette::miette!("File not found: {}", file.display()));
    }

    let source = fs::read_to_string(file).into_diagnostic()?;
    Ok((source, file.display().to_string()))
}
