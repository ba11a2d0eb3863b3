//! Stdin/stdout REPL host for the Ember developer console.
//!
//! Reads one command per line and dispatches it through a [`Console`].
//! End a line with a tab character to autocomplete instead of running it.
//! `quit` terminates; `exit`/`close` hide the console panel (a new line
//! shows it again).

mod commands;

use std::cell::RefCell;
use std::io::{self, BufRead};
use std::rc::Rc;

use anyhow::Result;
use ember_console::{BasicCommands, CommandOutput, Completion, Console, ConsoleConfig, OutputSink};
use ember_types::{ConsoleError, Severity};

use commands::{ChatCommands, GraphicsCommands, GraphicsSettings};

/// Prints console lines to stdout, tagging warnings and errors.
struct StdoutSink;

impl OutputSink for StdoutSink {
    fn line(&mut self, severity: Severity, text: &str) {
        match severity {
            Severity::Info => println!("{text}"),
            Severity::Warning | Severity::Error => {
                println!("{}: {text}", severity.label());
            },
        }
    }
}

fn load_config(path: &str) -> Result<ConsoleConfig> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            log::info!("Loaded {path}");
            Ok(ConsoleConfig::from_toml_str(&text)?)
        },
        // A missing file is the normal case; anything else is a real failure.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ConsoleConfig::default()),
        Err(e) => Err(ConsoleError::Io(e).into()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config("console.toml")?;
    let mut console = Console::with_config(config);

    let settings = Rc::new(RefCell::new(GraphicsSettings::default()));
    let graphics = GraphicsCommands::new(Rc::clone(&settings));
    console.index_modules(&[&BasicCommands, &graphics, &ChatCommands]);

    // Everything written so far (the indexing report) flushes here.
    console.attach_sink(Box::new(StdoutSink));
    console.write_line("Ember console. Type 'help' for commands, 'quit' to leave.");
    console.show();

    for line in io::stdin().lock().lines() {
        let line = line?;

        // Trailing tab: autocomplete instead of running.
        if let Some(partial) = line.strip_suffix('\t') {
            match console.autocomplete(partial) {
                Completion::Single(name) => console.write_line(&name),
                Completion::Partial {
                    extended: Some(name),
                    ..
                } => console.write_line(&name),
                _ => {},
            }
            continue;
        }

        if !console.is_open() {
            console.show();
        }

        match console.run_command(&line) {
            Ok(CommandOutput::Quit) => break,
            Ok(_) => {},
            Err(e) => log::error!("command failed: {e}"),
        }
    }

    log::info!("Ember console shut down cleanly");
    Ok(())
}
