use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, MietteHandlerOpts, Result};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tally::{MemoryStore, NotepadConfig, Session};
use tally_interpreter::MathOracle;

mod repl;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "A live notepad calculator",
    long_about = "Tally evaluates every line of a notepad as you type. Lines ending in a colon sum the indented lines below them."
)]
struct Cli {
    /// JSON file the REPL keeps its document in
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Quiet period, in milliseconds, before cursor movements are applied
    #[arg(long, global = true, value_name = "N", default_value_t = 50)]
    debounce_ms: u64,

    /// Number of distinct lines kept in the parse cache
    #[arg(long, global = true, value_name = "N", default_value_t = 4096)]
    cache_capacity: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a notepad document and print every line with its result
    Eval {
        /// Document to evaluate (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the rendered markup instead of plain text
        #[arg(long)]
        markup: bool,
    },

    /// Start an interactive notepad
    Repl {
        /// Don't read or write the history file
        #[arg(long)]
        no_history: bool,
    },
}

impl Cli {
    fn notepad_config(&self) -> NotepadConfig {
        NotepadConfig {
            debounce_window_ms: self.debounce_ms,
            cache_capacity: self.cache_capacity,
            ..NotepadConfig::default()
        }
    }
}

fn main() {
    tally::init_tracing();
    setup_miette_handler();

    let cli = Cli::parse();
    let config = cli.notepad_config();

    let result = match cli.command {
        Some(Commands::Eval { file, markup }) => handle_eval_command(&file, markup, config),
        Some(Commands::Repl { no_history }) => handle_repl_command(cli.store, no_history, config),
        None => {
            // No subcommand provided, show help
            Cli::parse_from(["tally", "--help"]);
            Ok(())
        }
    };

    if let Err(error) = result {
        eprintln!("{error:?}");
        process::exit(1);
    }
}

/// Configure miette for error reporting
fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

fn handle_eval_command(file_path: &PathBuf, markup: bool, config: NotepadConfig) -> Result<()> {
    let source = if file_path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).into_diagnostic()?;
        buffer
    } else {
        if !file_path.exists() {
            return Err(miette::miette!("File not found: {}", file_path.display()));
        }
        fs::read_to_string(file_path).into_diagnostic()?
    };
    let source = source.replace("\r\n", "\n");

    let store = MemoryStore::with_entry(&config.storage_key, &source);
    let mut session = Session::open(MathOracle::new(), Box::new(store), config);
    session.initialize();

    if markup {
        println!("{}", session.markup());
    } else {
        print!(
            "{}",
            session
                .renderer()
                .render_text(session.lines(), session.oracle())
        );
    }
    Ok(())
}

fn handle_repl_command(store: Option<PathBuf>, no_history: bool, config: NotepadConfig) -> Result<()> {
    let defaults = repl::ReplConfig::default();
    let repl_config = repl::ReplConfig {
        persist_history: !no_history,
        document_file: store.or(defaults.document_file.clone()),
        notepad: NotepadConfig {
            default_document: String::new(),
            ..config
        },
        ..defaults
    };

    let mut session = repl::ReplSession::with_config(repl_config)?;
    session.run()?;
    Ok(())
}
