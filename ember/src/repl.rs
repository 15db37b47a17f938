//! REPL (Read-Eval-Print Loop) for the Ember interpreter
//!
//! Each input runs through lexer, parser and evaluator against one persistent
//! global environment. Features:
//! - Multi-line input while brackets or a string are left open
//! - REPL commands for inspecting and resetting the session
//! - History support and line editing with rustyline

use ember_interpreter::{InterpreterSession, Object, RuntimeError, SessionError};
use ember_parser::DiagnosticCollector;
use miette::Diagnostic;
use rustyline::{DefaultEditor, error::ReadlineError};
use thiserror::Error;

/// Errors that can occur in the REPL
#[derive(Debug, Error, Diagnostic)]
pub enum ReplError {
    #[error("parse failed with {} error(s)", .diagnostics.error_count())]
    Parse { diagnostics: DiagnosticCollector },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime {
        #[from]
        source: RuntimeError,
    },

    #[error("Readline error: {source}")]
    Readline {
        #[from]
        source: ReadlineError,
    },

    #[error("REPL command error: {message}")]
    #[diagnostic(help("Type /help for available commands"))]
    Command { message: String },

    #[error("Internal REPL error: {message}")]
    Internal { message: String },
}

impl From<SessionError> for ReplError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::Parse { diagnostics } => ReplError::Parse { diagnostics },
            SessionError::Runtime(source) => ReplError::Runtime { source },
            other => ReplError::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// REPL session that maintains state across evaluations
pub struct ReplSession {
    /// Interactive line editor with history
    editor: DefaultEditor,

    /// Interpreter session holding the global environment
    session: InterpreterSession,

    /// REPL configuration
    config: ReplConfig,

    /// Session statistics
    stats: ReplStats,
}

/// REPL configuration options
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt string for input
    pub prompt: String,

    /// Prompt shown while an input is still open
    pub continuation_prompt: String,

    /// Enable history persistence
    pub persist_history: bool,

    /// History file path
    pub history_file: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: ">> ".to_string(),
            continuation_prompt: ".. ".to_string(),
            persist_history: true,
            history_file: Some(".ember_history".to_string()),
        }
    }
}

/// REPL session statistics
#[derive(Debug, Clone, Default)]
pub struct ReplStats {
    /// Number of inputs evaluated
    pub inputs_evaluated: usize,

    /// Number of new global names bound
    pub variables_bound: usize,

    /// Number of errors encountered
    pub errors_encountered: usize,

    /// Total REPL commands executed
    pub commands_executed: usize,
}

/// Result of evaluating a line in the REPL
#[derive(Debug)]
pub enum ReplResult {
    /// Input produced a value to print
    Value { value: Object },

    /// Input produced no value (it ended with a `let`)
    NoValue,

    /// Executed a REPL command
    Command { message: String },

    /// Empty line or comment
    Empty,

    /// Exit request
    Exit,
}

impl ReplSession {
    /// Create a new REPL session with default configuration
    pub fn new() -> Result<Self, ReplError> {
        Self::with_config(ReplConfig::default())
    }

    /// Create a new REPL session with custom configuration
    pub fn with_config(config: ReplConfig) -> Result<Self, ReplError> {
        let mut editor = DefaultEditor::new()?;

        if config.persist_history {
            if let Some(ref history_file) = config.history_file {
                // Missing on first run
                let _ = editor.load_history(history_file);
            }
        }

        Ok(Self {
            editor,
            session: InterpreterSession::new(),
            config,
            stats: ReplStats::default(),
        })
    }

    /// Start the REPL main loop
    pub fn run(&mut self) -> Result<(), ReplError> {
        self.print_welcome();

        while let Some(input) = self.read_input()? {
            match self.evaluate_line(&input) {
                Ok(ReplResult::Exit) => break,
                Ok(result) => self.display_result(result),
                Err(error) => {
                    self.stats.errors_encountered += 1;
                    self.display_error(error, &input);
                }
            }
        }

        self.print_goodbye();
        self.save_history()?;
        Ok(())
    }

    /// Read one complete input, spanning several lines if needed
    fn read_input(&mut self) -> Result<Option<String>, ReplError> {
        let mut complete_input = String::new();
        let mut line_count = 0;

        loop {
            let prompt = if line_count == 0 {
                &self.config.prompt
            } else {
                &self.config.continuation_prompt
            };

            match self.editor.readline(prompt) {
                Ok(line) => {
                    line_count += 1;

                    if line_count == 1 && line.trim().is_empty() {
                        return Ok(Some(String::new()));
                    }

                    if !complete_input.is_empty() {
                        complete_input.push('\n');
                    }
                    complete_input.push_str(&line);

                    if is_input_complete(&complete_input) {
                        self.editor.add_history_entry(complete_input.as_str())?;
                        return Ok(Some(complete_input));
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Abandons any partial input
                    println!("^C");
                    return Ok(Some(String::new()));
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(source) => return Err(ReplError::Readline { source }),
            }
        }
    }

    /// Evaluate one complete input
    pub fn evaluate_line(&mut self, line: &str) -> Result<ReplResult, ReplError> {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with("//") {
            return Ok(ReplResult::Empty);
        }

        if trimmed.starts_with('/') {
            return self.execute_command(trimmed);
        }

        let bound_before = self.session.variables().len();
        let outcome = self.session.execute(line)?;

        self.stats.inputs_evaluated += 1;
        self.stats.variables_bound += self
            .session
            .variables()
            .len()
            .saturating_sub(bound_before);

        Ok(match outcome {
            Some(value) => ReplResult::Value { value },
            None => ReplResult::NoValue,
        })
    }

    /// Execute a REPL command
    fn execute_command(&mut self, command: &str) -> Result<ReplResult, ReplError> {
        self.stats.commands_executed += 1;

        let Some(name) = command.split_whitespace().next() else {
            return Ok(ReplResult::Empty);
        };

        match name {
            "/help" | "/h" => Ok(ReplResult::Command {
                message: help_message(),
            }),

            "/vars" | "/variables" => Ok(ReplResult::Command {
                message: self.format_variables(),
            }),

            "/clear" => {
                self.session.reset();
                Ok(ReplResult::Command {
                    message: "Variables cleared".to_string(),
                })
            }

            "/stats" => Ok(ReplResult::Command {
                message: self.format_stats(),
            }),

            "/quit" | "/q" | "/exit" => Ok(ReplResult::Exit),

            unknown => Err(ReplError::Command {
                message: format!("Unknown command: {unknown}"),
            }),
        }
    }

    /// Display the result of evaluation
    fn display_result(&self, result: ReplResult) {
        match result {
            ReplResult::Value { value } => println!("{value}"),
            ReplResult::Command { message } => println!("{message}"),
            ReplResult::NoValue | ReplResult::Empty | ReplResult::Exit => {}
        }
    }

    /// Display an error with appropriate formatting
    ///
    /// Parse and runtime errors print on stdout; a runtime report with its
    /// source label follows on stderr.
    fn display_error(&self, error: ReplError, source_code: &str) {
        match error {
            ReplError::Parse { diagnostics } => {
                print!("{}", format_parse_errors(&diagnostics));
            }
            ReplError::Runtime { source } => {
                println!("{}", format_runtime_error(&source));
                let named_source = miette::NamedSource::new("<repl>", source_code.to_string());
                let report = miette::Report::new(source).with_source_code(named_source);
                eprintln!("{report:?}");
            }
            error @ ReplError::Command { .. } => {
                eprintln!("{:?}", miette::Report::new(error));
            }
            error => eprintln!("Error: {error}"),
        }
    }

    fn print_welcome(&self) {
        println!("Ember REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type /help for commands, /quit to exit");
        println!();
    }

    fn print_goodbye(&self) {
        println!("Goodbye!");
    }

    fn save_history(&mut self) -> Result<(), ReplError> {
        if self.config.persist_history {
            if let Some(ref history_file) = self.config.history_file {
                self.editor.save_history(history_file)?;
            }
        }
        Ok(())
    }

    /// Global bindings with their inspections, sorted by name
    fn format_variables(&self) -> String {
        let variables = self.session.variables();
        if variables.is_empty() {
            return "No variables defined".to_string();
        }

        let mut lines = vec!["Variables:".to_string()];
        for (name, value) in variables {
            lines.push(format!("  {name} = {value}"));
        }
        lines.join("\n")
    }

    fn format_stats(&self) -> String {
        format!(
            r#"Session Statistics:
  Inputs evaluated: {}
  Variables bound: {}
  Errors encountered: {}
  Commands executed: {}"#,
            self.stats.inputs_evaluated,
            self.stats.variables_bound,
            self.stats.errors_encountered,
            self.stats.commands_executed
        )
    }
}

/// Whether every `()[]{}` pair is closed and no string is open
///
/// Surplus closers count as complete so the parser can report them.
pub fn is_input_complete(input: &str) -> bool {
    let mut brace_count = 0i32;
    let mut bracket_count = 0i32;
    let mut paren_count = 0i32;
    let mut in_string = false;
    let mut escaped = false;

    for ch in input.chars() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => brace_count += 1,
            '}' => brace_count -= 1,
            '[' => bracket_count += 1,
            ']' => bracket_count -= 1,
            '(' => paren_count += 1,
            ')' => paren_count -= 1,
            _ => {}
        }
    }

    brace_count <= 0 && bracket_count <= 0 && paren_count <= 0 && !in_string
}

/// A runtime fault as the inspection text of its `Error` object
pub fn format_runtime_error(error: &RuntimeError) -> String {
    Object::Error(error.to_string()).inspect()
}

/// Parser errors, one tab-indented message per line
pub fn format_parse_errors(diagnostics: &DiagnosticCollector) -> String {
    diagnostics
        .messages()
        .into_iter()
        .map(|message| format!("\t{message}\n"))
        .collect()
}

fn help_message() -> String {
    r#"Ember REPL Commands:
  /help, /h           Show this help message
  /vars, /variables   List global variables with their values
  /clear              Clear all variables and reset the session
  /stats              Show session statistics
  /quit, /q, /exit    Exit the REPL

Examples:
  5 + 5 * 2                       Evaluate an expression
  let add = fn(a, b) { a + b };   Bind a variable
  add(1, 2)                       Call a function
  {"name": "Ember"}["name"]       Index a hash

Multi-line input:
  let max = fn(a, b) {            Open a bracket and press Enter
    if (a > b) { a } else { b }   Continuation prompt (..) appears
  };                              Completes when brackets close

Use Ctrl+C to interrupt, Ctrl+D to exit."#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_repl() -> ReplSession {
        let config = ReplConfig {
            persist_history: false,
            history_file: None,
            ..Default::default()
        };
        ReplSession::with_config(config).expect("Failed to create test REPL")
    }

    fn value_of(result: ReplResult) -> Object {
        match result {
            ReplResult::Value { value } => value,
            other => panic!("Expected value result, got {other:?}"),
        }
    }

    fn message_of(result: ReplResult) -> String {
        match result {
            ReplResult::Command { message } => message,
            other => panic!("Expected command result, got {other:?}"),
        }
    }

    #[test]
    fn test_repl_creation() {
        let repl = create_test_repl();
        assert_eq!(repl.stats.inputs_evaluated, 0);
        assert_eq!(repl.stats.variables_bound, 0);
        assert_eq!(repl.stats.errors_encountered, 0);
        assert!(repl.session.variables().is_empty());
    }

    #[test]
    fn test_simple_expression_evaluation() {
        let mut repl = create_test_repl();

        let value = value_of(repl.evaluate_line("5 + 5 * 2").unwrap());
        assert_eq!(value, Object::Integer(15));
        assert_eq!(repl.stats.inputs_evaluated, 1);
    }

    #[test]
    fn test_bindings_persist_across_lines() {
        let mut repl = create_test_repl();

        let result = repl.evaluate_line("let x = 40;").unwrap();
        assert!(matches!(result, ReplResult::NoValue));
        assert_eq!(repl.stats.variables_bound, 1);

        let value = value_of(repl.evaluate_line("x + 2").unwrap());
        assert_eq!(value.inspect(), "42");
    }

    #[test]
    fn test_empty_line_handling() {
        let mut repl = create_test_repl();

        for input in ["", "   ", "// comment"] {
            let result = repl.evaluate_line(input).unwrap();
            assert!(matches!(result, ReplResult::Empty));
        }
    }

    #[test]
    fn test_parse_errors_are_not_evaluated() {
        let mut repl = create_test_repl();

        match repl.evaluate_line("let x 5; let y = 1;") {
            Err(ReplError::Parse { diagnostics }) => {
                assert_eq!(
                    format_parse_errors(&diagnostics),
                    "\texpected next token to be =, got INT instead\n"
                );
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
        assert!(repl.session.variables().is_empty());
    }

    #[test]
    fn test_runtime_errors_are_typed() {
        let mut repl = create_test_repl();

        match repl.evaluate_line("1 + true") {
            Err(ReplError::Runtime { source }) => {
                assert_eq!(
                    format_runtime_error(&source),
                    "Error:type not match:INTEGER + BOOLEAN"
                );
            }
            other => panic!("Expected runtime error, got {other:?}"),
        }
    }

    #[test]
    fn test_help_command() {
        let mut repl = create_test_repl();

        let message = message_of(repl.evaluate_line("/help").unwrap());
        assert!(message.contains("Ember REPL Commands"));
        assert!(message.contains("/vars"));
        assert!(message.contains("/quit"));
        assert_eq!(repl.stats.commands_executed, 1);
    }

    #[test]
    fn test_vars_command() {
        let mut repl = create_test_repl();

        let message = message_of(repl.evaluate_line("/vars").unwrap());
        assert_eq!(message, "No variables defined");

        repl.evaluate_line("let b = [1, 2]; let a = \"x\";").unwrap();
        let message = message_of(repl.evaluate_line("/vars").unwrap());
        assert_eq!(message, "Variables:\n  a = \"x\"\n  b = [1, 2]");
    }

    #[test]
    fn test_clear_command() {
        let mut repl = create_test_repl();

        repl.evaluate_line("let x = 1;").unwrap();
        let message = message_of(repl.evaluate_line("/clear").unwrap());
        assert!(message.contains("cleared"));
        assert!(repl.session.variables().is_empty());
    }

    #[test]
    fn test_quit_command() {
        let mut repl = create_test_repl();

        for command in ["/quit", "/q", "/exit"] {
            let result = repl.evaluate_line(command).unwrap();
            assert!(matches!(result, ReplResult::Exit));
        }
    }

    #[test]
    fn test_unknown_command() {
        let mut repl = create_test_repl();

        match repl.evaluate_line("/unknown") {
            Err(ReplError::Command { message }) => {
                assert!(message.contains("Unknown command"));
                assert!(message.contains("/unknown"));
            }
            other => panic!("Expected command error, got {other:?}"),
        }
    }

    #[test]
    fn test_stats_command() {
        let mut repl = create_test_repl();

        let _ = repl.evaluate_line("42");
        let _ = repl.evaluate_line("/help");

        let message = message_of(repl.evaluate_line("/stats").unwrap());
        assert!(message.contains("Session Statistics"));
        assert!(message.contains("Inputs evaluated: 1"));
        assert!(message.contains("Commands executed: 2"));
    }

    #[test]
    fn test_multi_line_input_detection() {
        assert!(is_input_complete("42"));
        assert!(is_input_complete("let x = 42;"));
        assert!(is_input_complete("[1, 2, 3]"));
        assert!(is_input_complete("\"hello world\""));

        assert!(!is_input_complete("let x = ["));
        assert!(!is_input_complete("let f = fn(x) {"));
        assert!(!is_input_complete("add("));
        assert!(!is_input_complete("\"hello"));
        assert!(!is_input_complete("let x = [1,"));

        assert!(is_input_complete("[[1, 2], [3, 4]]"));
        assert!(!is_input_complete("[[1, 2], [3,"));
        assert!(is_input_complete("\"string with [brackets] inside\""));
        assert!(is_input_complete(r#""escaped \" quote""#));
        assert!(is_input_complete("1)"));

        assert!(!is_input_complete("42 // note ("));
        assert!(!is_input_complete("[\n1,"));
        assert!(is_input_complete("[\n1,\n2]"));
    }

    #[test]
    fn test_repl_config_defaults() {
        let config = ReplConfig::default();
        assert_eq!(config.prompt, ">> ");
        assert_eq!(config.continuation_prompt, ".. ");
        assert!(config.persist_history);
        assert_eq!(config.history_file, Some(".ember_history".to_string()));
    }
}
