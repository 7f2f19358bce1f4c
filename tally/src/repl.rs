//! Interactive notepad on the terminal
//!
//! Every entered line is appended to the document and the whole document is
//! re-evaluated, exactly as if it had been typed into the editor. The newest
//! line's result is printed back. The document is persisted between runs.

use miette::Diagnostic;
use rustyline::{DefaultEditor, error::ReadlineError};
use std::path::PathBuf;
use tally::render::{self, LineType};
use tally::{JsonFileStore, MemoryStore, NotepadConfig, Session, Store};
use tally_interpreter::MathOracle;
use thiserror::Error;

/// Errors that can occur in the REPL
#[derive(Debug, Error, Diagnostic)]
pub enum ReplError {
    #[error("Readline error: {source}")]
    Readline {
        #[from]
        source: ReadlineError,
    },

    #[error("REPL command error: {message}")]
    #[diagnostic(help("Type /help for available commands"))]
    Command { message: String },
}

/// REPL configuration options
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt string for input
    pub prompt: String,

    /// Enable history persistence
    pub persist_history: bool,

    /// History file path
    pub history_file: Option<String>,

    /// File the document is kept in between sessions; in memory when `None`
    pub document_file: Option<PathBuf>,

    /// Engine configuration
    pub notepad: NotepadConfig,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "tally> ".to_string(),
            persist_history: true,
            history_file: Some(".tally_history".to_string()),
            document_file: Some(PathBuf::from(".tally_notepad.json")),
            notepad: NotepadConfig {
                default_document: String::new(),
                ..NotepadConfig::default()
            },
        }
    }
}

/// REPL session statistics
#[derive(Debug, Clone, Default)]
pub struct ReplStats {
    /// Number of document lines entered
    pub lines_entered: usize,

    /// Number of entered lines that failed
    pub errors_encountered: usize,

    /// Total REPL commands executed
    pub commands_executed: usize,
}

/// Result of evaluating a line in the REPL
#[derive(Debug, PartialEq)]
pub enum ReplResult {
    /// The new line produced a value worth showing
    Value { display: String },

    /// The new line failed
    Error { message: String },

    /// Executed a REPL command
    Command { message: String },

    /// Blank line, comment, declaration or block opener
    Empty,

    /// Exit request
    Exit,
}

/// REPL session that keeps a notepad document across entries
pub struct ReplSession {
    editor: DefaultEditor,
    notepad: Session<MathOracle>,
    config: ReplConfig,
    stats: ReplStats,
}

impl ReplSession {
    /// Create a new REPL session with custom configuration
    pub fn with_config(config: ReplConfig) -> Result<Self, ReplError> {
        let mut editor = DefaultEditor::new()?;

        if config.persist_history {
            if let Some(ref history_file) = config.history_file {
                let _ = editor.load_history(history_file); // Missing on the first run
            }
        }

        let store: Box<dyn Store> = match &config.document_file {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        let mut notepad = Session::open(MathOracle::new(), store, config.notepad.clone());
        notepad.initialize();

        Ok(Self {
            editor,
            notepad,
            config,
            stats: ReplStats::default(),
        })
    }

    /// Start the REPL main loop
    pub fn run(&mut self) -> Result<(), ReplError> {
        self.print_welcome();

        while let Some(line) = self.read_line()? {
            match self.evaluate_line(&line) {
                Ok(ReplResult::Exit) => break,
                Ok(result) => self.display_result(result),
                Err(error) => self.display_error(error),
            }
        }

        self.print_goodbye();
        self.save_history()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>, ReplError> {
        match self.editor.readline(&self.config.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                Ok(Some(String::new()))
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(ReplError::Readline { source: err }),
        }
    }

    /// Evaluate a line of input
    pub fn evaluate_line(&mut self, line: &str) -> Result<ReplResult, ReplError> {
        let trimmed = line.trim();
        if trimmed.starts_with('/') {
            return self.execute_command(trimmed);
        }

        self.append(line);
        self.stats.lines_entered += 1;

        let Some(newest) = self.notepad.lines().last() else {
            return Ok(ReplResult::Empty);
        };

        if newest.has_error() {
            self.stats.errors_encountered += 1;
            return Ok(ReplResult::Error {
                message: newest.error.clone(),
            });
        }

        let shown = render::classify(newest, self.notepad.lines(), self.notepad.oracle());
        match (&newest.result, shown) {
            (Some(value), LineType::Result) if !newest.is_block() => Ok(ReplResult::Value {
                display: render::format_value(value, self.config.notepad.result_precision),
            }),
            _ => Ok(ReplResult::Empty),
        }
    }

    /// Execute a REPL command
    fn execute_command(&mut self, command: &str) -> Result<ReplResult, ReplError> {
        self.stats.commands_executed += 1;

        let parts: Vec<&str> = command.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(ReplResult::Empty);
        }

        match parts[0] {
            "/help" | "/h" => Ok(ReplResult::Command {
                message: self.help_message(),
            }),

            "/show" | "/s" => Ok(ReplResult::Command {
                message: self.format_document(),
            }),

            "/vars" | "/variables" => Ok(ReplResult::Command {
                message: self.format_variables(),
            }),

            "/undo-line" | "/u" => {
                let raw = self.notepad.raw();
                if raw.is_empty() {
                    return Ok(ReplResult::Command {
                        message: "Document is empty".to_string(),
                    });
                }
                let kept = raw.rsplit_once('\n').map_or("", |(kept, _)| kept).to_string();
                self.replace_document(&kept);
                Ok(ReplResult::Command {
                    message: "Removed the last line".to_string(),
                })
            }

            "/clear" => {
                self.replace_document("");
                Ok(ReplResult::Command {
                    message: "Document cleared".to_string(),
                })
            }

            "/stats" => Ok(ReplResult::Command {
                message: self.format_stats(),
            }),

            "/quit" | "/q" | "/exit" => Ok(ReplResult::Exit),

            unknown => Err(ReplError::Command {
                message: format!("Unknown command: {unknown}. Type /help for available commands."),
            }),
        }
    }

    fn append(&mut self, line: &str) {
        let raw = self.notepad.raw();
        let updated = if raw.is_empty() {
            line.to_string()
        } else {
            format!("{raw}\n{line}")
        };
        self.replace_document(&updated);
    }

    fn replace_document(&mut self, raw: &str) {
        let end = raw.chars().count();
        self.notepad.apply_edit(raw, end, end);
    }

    /// The document as it stands
    pub fn document(&self) -> &str {
        self.notepad.raw()
    }

    fn display_result(&self, result: ReplResult) {
        match result {
            ReplResult::Value { display } => println!("= {display}"),
            ReplResult::Error { message } => eprintln!("// {message}"),
            ReplResult::Command { message } => println!("{message}"),
            ReplResult::Empty | ReplResult::Exit => {}
        }
    }

    fn display_error(&self, error: ReplError) {
        let report = miette::Report::new(error);
        eprintln!("{report:?}");
    }

    fn print_welcome(&self) {
        println!("tally v{}", env!("CARGO_PKG_VERSION"));
        println!("Type /help for commands, /quit to exit");
        if !self.document().is_empty() {
            let lines = self.document().lines().count();
            println!("Resumed a document of {lines} lines, /show to view it");
        }
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

    fn help_message(&self) -> String {
        r#"Tally REPL Commands:
  /help, /h            Show this help message
  /show, /s            Show the whole document with results
  /vars, /variables    List the variables of the document
  /undo-line, /u       Remove the last line of the document
  /clear               Start an empty document
  /stats               Show session statistics
  /quit, /q, /exit     Exit the REPL

Every other line is added to the document:
  rent = 1200          # Bind a variable
  rent * 12            # Evaluate an expression
  monthly:             # Open a block; indented lines below are summed
    rent
    300

Use Ctrl+C to interrupt, Ctrl+D to exit."#
            .to_string()
    }

    fn format_document(&self) -> String {
        if self.notepad.raw().is_empty() {
            return "Document is empty".to_string();
        }
        let text = self
            .notepad
            .renderer()
            .render_text(self.notepad.lines(), self.notepad.oracle());
        text.trim_end().to_string()
    }

    fn format_variables(&self) -> String {
        let variables: Vec<String> = self
            .notepad
            .scope()
            .iter()
            .map(|(name, value)| {
                format!(
                    "  {name} = {}",
                    render::format_value(value, self.config.notepad.result_precision)
                )
            })
            .collect();

        if variables.is_empty() {
            "No variables defined".to_string()
        } else {
            format!("Variables:\n{}", variables.join("\n"))
        }
    }

    fn format_stats(&self) -> String {
        let cache = self.notepad.cache_stats();
        format!(
            r#"Session Statistics:
  Lines entered: {}
  Errors encountered: {}
  Commands executed: {}
  Evaluation passes: {}
  Cache hits: {} of {} lookups"#,
            self.stats.lines_entered,
            self.stats.errors_encountered,
            self.stats.commands_executed,
            self.notepad.passes(),
            cache.cache_hits,
            cache.total_queries
        )
    }
}
