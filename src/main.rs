//! codepad - terminal code editor

use std::env;
use std::path::PathBuf;
use std::process;

use codepad::config::Config;
use codepad::editor::EditorState;
use codepad::error::Result;
use codepad::logging;
use codepad::terminal::Terminal;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    // Handle --help and --version
    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            _ => {}
        }
    }

    // The guard flushes the log file on exit; running without a log is fine
    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let config = Config::load();
    let mut terminal = Terminal::new()?;

    let mut editor = EditorState::new(config, terminal.rows());
    editor.set_config_path(Config::config_path());

    // Open file if provided
    if args.len() > 1 && !args[1].starts_with('-') {
        let path = PathBuf::from(&args[1]);
        editor.open_file(&path)?;
    }

    editor.run(&mut terminal)
}

fn print_usage() {
    println!("codepad {} - minimalist terminal code editor", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: codepad [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!();
    println!("Key bindings:");
    println!("  Arrows, Home, End, PageUp, PageDown   Move the cursor");
    println!("  Shift + movement                      Extend the selection");
    println!("  C-a            Select all");
    println!("  C-z / C-y      Undo / redo");
    println!("  C-o            Open file");
    println!("  C-s            Save");
    println!("  C-w            Save as");
    println!("  C-t            Toggle light/dark theme");
    println!("  C-l            Toggle line numbers");
    println!("  C-g, Esc       Cancel");
    println!("  C-q            Quit");
    println!();
    println!("Logging: set {}=debug (logs under the config directory)", logging::LOG_ENV);
}

fn print_version() {
    println!("codepad {}", env!("CARGO_PKG_VERSION"));
}
