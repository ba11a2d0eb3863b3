//! The console itself: owns the registry, history, output, and panel
//! state, and runs the submit/autocomplete/history flows.

use std::time::Instant;

use ember_types::Severity;
use ember_types::error::{ConsoleError, Result};

use crate::autocomplete::{Completion, complete};
use crate::command::CommandOutput;
use crate::config::ConsoleConfig;
use crate::dispatch::{convert, strip_command_prefix, tokenize};
use crate::history::InputHistory;
use crate::index::CommandModule;
use crate::output::{ConsoleOutput, OutputSink};
use crate::registry::CommandRegistry;

/// Command names the console answers itself (they need registry access).
const HELP_ALIASES: [&str; 3] = ["help", "?", "commandslist"];

/// An in-game developer console.
///
/// The console is an explicitly constructed value owned by the host's
/// composition root; there is no ambient global instance. Everything runs
/// synchronously on the caller's thread.
pub struct Console {
    config: ConsoleConfig,
    registry: CommandRegistry,
    history: InputHistory,
    output: ConsoleOutput,
    open: bool,
    last_autocomplete_input: String,
}

impl Console {
    pub fn new() -> Self {
        Self::with_config(ConsoleConfig::default())
    }

    pub fn with_config(config: ConsoleConfig) -> Self {
        let history = InputHistory::new(config.history_limit);
        let output = ConsoleOutput::new(config.transcript_limit);
        Self {
            config,
            registry: CommandRegistry::new(),
            history,
            output,
            open: false,
            last_autocomplete_input: String::new(),
        }
    }

    // -- Registration --

    /// Index command modules into the registry, reporting elapsed time.
    pub fn index_modules(&mut self, modules: &[&dyn CommandModule]) {
        let start = Instant::now();
        for cmd in crate::index::index_modules(modules) {
            self.registry.register(cmd);
        }
        let elapsed = start.elapsed().as_millis();
        self.write_line(&format!("Indexed all commands in {elapsed} milliseconds"));
    }

    /// Register a single prebuilt command directly, bypassing usage-help
    /// generation.
    pub fn register(&mut self, cmd: crate::command::ConsoleCommand) {
        self.registry.register(cmd);
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    // -- Output --

    /// Attach the output sink, flushing anything written before it existed.
    pub fn attach_sink(&mut self, sink: Box<dyn OutputSink>) {
        self.output.attach_sink(sink);
    }

    pub fn write_line(&mut self, text: &str) {
        self.output.write(Severity::Info, text);
    }

    pub fn write_warning(&mut self, text: &str) {
        self.output.write(Severity::Warning, text);
    }

    pub fn write_error(&mut self, text: &str) {
        self.output.write(Severity::Error, text);
        if self.config.show_on_error {
            self.open = true;
        }
    }

    /// The transcript an overlay renders, oldest first.
    pub fn lines(&self) -> &[crate::output::OutputLine] {
        self.output.lines()
    }

    // -- Panel state --

    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn hide(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    // -- History --

    pub fn history(&self) -> &InputHistory {
        &self.history
    }

    /// Browse one step toward the oldest entry; returns the input-field
    /// text.
    pub fn history_up(&mut self) -> String {
        self.history.up()
    }

    /// Browse one step back toward fresh input; returns the input-field
    /// text.
    pub fn history_down(&mut self) -> String {
        self.history.down()
    }

    // -- Dispatch --

    /// Parse and run one submitted line.
    ///
    /// Unknown commands, arity mismatches, and argument conversion
    /// failures are reported to the output and swallowed. A handler
    /// failure is reported and then returned to the caller, except the
    /// call-boundary `InvalidParameters` case, which is reported and
    /// swallowed. `Quit` and `Hide` signals are returned for the host to
    /// act on (`Hide` also closes the panel state here).
    pub fn run_command(&mut self, line: &str) -> Result<CommandOutput> {
        let cmd_line = strip_command_prefix(line).to_string();
        if cmd_line.is_empty() {
            return Ok(CommandOutput::None);
        }

        let echo = format!("{}{cmd_line}", self.config.prompt);
        self.write_line(&echo);
        self.history.submit(&cmd_line);

        let tokens = tokenize(&cmd_line);
        if tokens.is_empty() {
            return Ok(CommandOutput::None);
        }

        let name = tokens[0].to_lowercase();
        if HELP_ALIASES.contains(&name.as_str()) && tokens.len() == 1 {
            self.render_command_list();
            return Ok(CommandOutput::None);
        }

        let (index, args) = match self.registry.resolve(&tokens, &cmd_line) {
            Ok(found) => found,
            Err(ConsoleError::ArityMismatch(name)) => {
                self.write_warning("The amount of parameters doesn't match");
                if let Some(help) = self.registry.first_help(&name).map(str::to_string) {
                    self.write_line(&help);
                }
                return Ok(CommandOutput::None);
            },
            // Resolution fails with unknown-command otherwise.
            Err(_) => {
                self.write_warning("Unknown command");
                return Ok(CommandOutput::None);
            },
        };

        // Convert and invoke while the command is borrowed, then report
        // with the borrow released.
        let (help, result) = {
            let Some(command) = self.registry.get(index) else {
                return Ok(CommandOutput::None);
            };
            let help = command.help().to_string();
            let result = convert(command.params(), &args)
                .map(|values| command.invoke(&values));
            (help, result)
        };

        match result {
            // Conversion failed; the handler was never invoked.
            Err(e) => {
                self.write_error(&e.to_string());
                Ok(CommandOutput::None)
            },
            Ok(Err(ConsoleError::InvalidParameters)) => {
                self.write_error("Failed to run command:");
                self.write_error("Parameters are invalid");
                if !help.is_empty() {
                    self.write_line(&help);
                }
                Ok(CommandOutput::None)
            },
            Ok(Err(e)) => {
                self.write_error("Failed to run command:");
                self.write_error(&e.to_string());
                // Reported, then handed to the host to decide. Usage help
                // accompanies the invalid-parameters case only.
                Err(e)
            },
            Ok(Ok(output)) => {
                match &output {
                    CommandOutput::Text(text) => self.write_line(text),
                    CommandOutput::Hide => self.open = false,
                    CommandOutput::Quit | CommandOutput::None => {},
                }
                Ok(output)
            },
        }
    }

    /// List all non-excluded commands, in registration order.
    fn render_command_list(&mut self) {
        let entries: Vec<String> = self
            .registry
            .iter()
            .filter(|c| !c.exclude_from_list())
            .map(|c| c.to_string())
            .collect();
        for entry in entries {
            self.write_line("");
            self.write_line(&entry);
        }
    }

    // -- Autocomplete --

    /// Complete a partial input against the registered names.
    ///
    /// Candidate lists and the no-match notice are written to the output;
    /// the returned completion tells the host what to put in its input
    /// field. Repeated requests for unchanged text are skipped.
    pub fn autocomplete(&mut self, input: &str) -> Completion {
        if input.trim().is_empty() {
            return Completion::None;
        }
        if input == self.last_autocomplete_input {
            return Completion::None;
        }

        let completion = {
            let names = self.registry.names();
            complete(names.into_iter(), input)
        };

        match &completion {
            Completion::Single(name) => {
                self.last_autocomplete_input = name.clone();
            },
            Completion::Partial {
                extended,
                candidates,
            } => {
                self.write_line("Available commands:");
                let listing: Vec<String> =
                    candidates.iter().map(|c| format!("- {c}")).collect();
                for line in listing {
                    self.write_line(&line);
                }
                self.last_autocomplete_input = extended
                    .clone()
                    .unwrap_or_else(|| input.to_string());
            },
            Completion::NoMatches => {
                self.write_line("There are no matches for auto completion");
                self.last_autocomplete_input = input.to_string();
            },
            Completion::None => {},
        }
        completion
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::command::{CommandBuilder, ParamKind};
    use crate::output::OutputLine;

    fn console_with<F>(register: F) -> Console
    where
        F: FnOnce(&mut Console),
    {
        let mut console = Console::new();
        register(&mut console);
        console
    }

    fn texts(console: &Console) -> Vec<&str> {
        console.lines().iter().map(|l| l.text.as_str()).collect()
    }

    fn last_line(console: &Console) -> &OutputLine {
        console.lines().last().expect("no output")
    }

    #[test]
    fn empty_input_does_nothing() {
        let mut console = Console::new();
        let out = console.run_command("   ").unwrap();
        assert_eq!(out, CommandOutput::None);
        assert!(console.lines().is_empty());
        assert!(console.history().is_empty());
    }

    #[test]
    fn submitted_command_is_echoed_with_prompt() {
        let mut console = console_with(|c| {
            c.register(
                CommandBuilder::new("ping", "")
                    .handler(|_| Ok(CommandOutput::Text("pong".into())))
                    .build()
                    .unwrap(),
            );
        });
        console.run_command("ping").unwrap();
        assert_eq!(texts(&console), ["> ping", "pong"]);
    }

    #[test]
    fn leading_slash_is_stripped() {
        let mut console = console_with(|c| {
            c.register(
                CommandBuilder::new("ping", "")
                    .handler(|_| Ok(CommandOutput::Text("pong".into())))
                    .build()
                    .unwrap(),
            );
        });
        console.run_command("/ping").unwrap();
        assert_eq!(last_line(&console).text, "pong");
    }

    #[test]
    fn unknown_command_is_reported_as_warning() {
        let mut console = Console::new();
        let out = console.run_command("frobnicate").unwrap();
        assert_eq!(out, CommandOutput::None);
        let line = last_line(&console);
        assert_eq!(line.severity, Severity::Warning);
        assert_eq!(line.text, "Unknown command");
    }

    #[test]
    fn arity_mismatch_surfaces_first_nonempty_help() {
        let mut console = console_with(|c| {
            c.register(
                CommandBuilder::new("call", "")
                    .param("a", ParamKind::Str)
                    .handler(|_| Ok(CommandOutput::None))
                    .build()
                    .unwrap(),
            );
            c.register(
                CommandBuilder::new("call", "Call something")
                    .param("a", ParamKind::Str)
                    .param("b", ParamKind::Str)
                    .handler(|_| Ok(CommandOutput::None))
                    .build()
                    .unwrap(),
            );
        });
        console.run_command("call a b c").unwrap();
        let lines = texts(&console);
        assert!(lines.contains(&"The amount of parameters doesn't match"));
        assert!(lines.contains(&"Call something"));
    }

    #[test]
    fn conversion_failure_skips_handler() {
        let invoked = Rc::new(Cell::new(false));
        let seen = Rc::clone(&invoked);
        let mut console = console_with(move |c| {
            c.register(
                CommandBuilder::new("quality", "")
                    .param("level", ParamKind::Int)
                    .handler(move |_| {
                        seen.set(true);
                        Ok(CommandOutput::None)
                    })
                    .build()
                    .unwrap(),
            );
        });
        console.run_command("quality abc").unwrap();
        assert!(!invoked.get(), "handler must not run on conversion failure");
        let line = last_line(&console);
        assert_eq!(line.severity, Severity::Error);
        assert!(line.text.contains("'abc'"));
        assert!(line.text.contains("'level'"));
    }

    #[test]
    fn typed_arguments_reach_the_handler() {
        let mut console = console_with(|c| {
            c.register(
                CommandBuilder::new("add", "")
                    .param("a", ParamKind::Int)
                    .param("b", ParamKind::Int)
                    .handler(|args| {
                        let sum = args[0].as_int()? + args[1].as_int()?;
                        Ok(CommandOutput::Text(sum.to_string()))
                    })
                    .build()
                    .unwrap(),
            );
        });
        console.run_command("add 2 40").unwrap();
        assert_eq!(last_line(&console).text, "42");
    }

    #[test]
    fn quoted_argument_reaches_handler_intact() {
        let mut console = console_with(|c| {
            c.register(
                CommandBuilder::new("echo", "")
                    .param("text", ParamKind::Str)
                    .handler(|args| {
                        Ok(CommandOutput::Text(args[0].as_str()?.to_string()))
                    })
                    .build()
                    .unwrap(),
            );
        });
        console.run_command("echo \"hello world\"").unwrap();
        assert_eq!(last_line(&console).text, "hello world");
    }

    #[test]
    fn invalid_parameters_is_reported_and_swallowed() {
        let mut console = console_with(|c| {
            c.register(
                CommandBuilder::new("greedy", "")
                    .handler(|args| {
                        // Asks for an argument it never declared.
                        crate::command::arg(args, 0)?;
                        Ok(CommandOutput::None)
                    })
                    .build()
                    .unwrap(),
            );
        });
        let result = console.run_command("greedy");
        assert!(result.is_ok(), "call-boundary mismatch must be swallowed");
        let lines = texts(&console);
        assert!(lines.contains(&"Failed to run command:"));
        assert!(lines.contains(&"Parameters are invalid"));
    }

    #[test]
    fn handler_failure_is_reported_then_propagated() {
        let mut console = console_with(|c| {
            c.register(
                CommandBuilder::new("boom", "Goes boom")
                    .handler(|_| Err(ConsoleError::Invocation("out of cheese".into())))
                    .build()
                    .unwrap(),
            );
        });
        let result = console.run_command("boom");
        assert!(matches!(result, Err(ConsoleError::Invocation(_))));
        let lines = texts(&console);
        assert!(lines.contains(&"Failed to run command:"));
        assert!(lines.contains(&"out of cheese"));
        // Usage help is reserved for the invalid-parameters report.
        assert!(!lines.contains(&"Goes boom"));
    }

    #[test]
    fn hide_signal_closes_the_panel() {
        let mut console = console_with(|c| {
            c.register(
                CommandBuilder::new("close", "")
                    .handler(|_| Ok(CommandOutput::Hide))
                    .build()
                    .unwrap(),
            );
        });
        console.show();
        let out = console.run_command("close").unwrap();
        assert_eq!(out, CommandOutput::Hide);
        assert!(!console.is_open());
    }

    #[test]
    fn quit_signal_is_returned_to_host() {
        let mut console = console_with(|c| {
            c.register(
                CommandBuilder::new("quit", "")
                    .handler(|_| Ok(CommandOutput::Quit))
                    .build()
                    .unwrap(),
            );
        });
        assert_eq!(console.run_command("quit").unwrap(), CommandOutput::Quit);
    }

    #[test]
    fn show_on_error_pops_the_console_open() {
        let mut console = Console::with_config(ConsoleConfig {
            show_on_error: true,
            ..ConsoleConfig::default()
        });
        assert!(!console.is_open());
        console.write_error("something broke");
        assert!(console.is_open());
    }

    #[test]
    fn help_lists_commands_excluding_hidden_ones() {
        let mut console = console_with(|c| {
            c.register(
                CommandBuilder::new("visible", "Does things")
                    .handler(|_| Ok(CommandOutput::None))
                    .build()
                    .unwrap(),
            );
            c.register(
                CommandBuilder::new("secret", "")
                    .exclude_from_list()
                    .handler(|_| Ok(CommandOutput::None))
                    .build()
                    .unwrap(),
            );
        });
        console.run_command("help").unwrap();
        let lines = texts(&console);
        assert!(lines.contains(&"visible\n\tDoes things"));
        assert!(!lines.iter().any(|l| l.contains("secret")));
    }

    #[test]
    fn history_records_submissions() {
        let mut console = Console::new();
        console.run_command("first").unwrap();
        console.run_command("second").unwrap();
        assert_eq!(console.history_up(), "second");
        assert_eq!(console.history_up(), "first");
        assert_eq!(console.history_down(), "second");
        assert_eq!(console.history_down(), "");
    }

    #[test]
    fn autocomplete_lists_candidates_and_is_deduplicated() {
        let mut console = console_with(|c| {
            for name in ["graphics.fov", "graphics.fullscreen", "graphics.quality"] {
                c.register(
                    CommandBuilder::new(name, "")
                        .handler(|_| Ok(CommandOutput::None))
                        .build()
                        .unwrap(),
                );
            }
        });
        let first = console.autocomplete("graphics.");
        match first {
            Completion::Partial { candidates, .. } => {
                assert_eq!(candidates.len(), 3);
            },
            other => panic!("expected partial, got {other:?}"),
        }
        let lines_after_first = console.lines().len();
        // Unchanged text: no recomputation, no new output.
        assert_eq!(console.autocomplete("graphics."), Completion::None);
        assert_eq!(console.lines().len(), lines_after_first);
    }

    #[test]
    fn autocomplete_no_matches_is_reported() {
        let mut console = Console::new();
        assert_eq!(console.autocomplete("zzz"), Completion::NoMatches);
        assert_eq!(
            last_line(&console).text,
            "There are no matches for auto completion"
        );
    }

    #[test]
    fn indexing_reports_elapsed_time() {
        struct Empty;
        impl CommandModule for Empty {
            fn name(&self) -> &str {
                "empty"
            }
            fn commands(&self) -> Vec<CommandBuilder> {
                Vec::new()
            }
        }
        let mut console = Console::new();
        console.index_modules(&[&Empty]);
        assert!(last_line(&console).text.starts_with("Indexed all commands in"));
    }
}
