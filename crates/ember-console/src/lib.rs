//! Command registry and dispatch core for the Ember developer console.
//!
//! The console is a registry-based dispatch system. Host code declares
//! commands through [`CommandBuilder`]s grouped into [`CommandModule`]s;
//! the console tokenizes submitted lines (quote-aware), resolves the
//! command and overload by name and arity, converts string tokens to typed
//! arguments, and invokes the handler, routing results and errors to the
//! output. Prefix autocomplete and a bounded input history operate on raw
//! input text alongside dispatch.

pub mod autocomplete;
mod builtins;
mod command;
pub mod config;
mod console;
pub mod dispatch;
mod history;
mod index;
mod output;
mod registry;

/// Completion result: replace the input, list candidates, or no match.
pub use autocomplete::Completion;
/// The baseline command module: help listing, quit, exit/close.
pub use builtins::BasicCommands;
/// A converted argument value handed to command handlers.
pub use command::ArgValue;
/// Builder used by command modules to declare commands.
pub use command::CommandBuilder;
/// Output produced by a command handler (text, nothing, or a signal).
pub use command::CommandOutput;
/// An invocable console command descriptor.
pub use command::ConsoleCommand;
/// One declared parameter: name and kind.
pub use command::Param;
/// Declared kind of a command parameter.
pub use command::ParamKind;
/// Indexed argument access for handlers.
pub use command::arg;
/// Console tunables, loadable from `console.toml`.
pub use config::ConsoleConfig;
/// The console: registry, history, output, and panel state.
pub use console::Console;
/// Bounded, newest-first input history with cursor navigation.
pub use history::InputHistory;
/// A group of related command definitions contributed by host code.
pub use index::CommandModule;
/// Sink forwarding console lines to the `log` facade.
pub use output::LogSink;
/// One line of console output.
pub use output::OutputLine;
/// External surface for console lines.
pub use output::OutputSink;
/// Registry of available commands.
pub use registry::CommandRegistry;
