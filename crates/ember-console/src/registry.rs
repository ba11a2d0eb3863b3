//! Command registry: an insertion-ordered collection of command
//! descriptors with name lookup and overload resolution.

use ember_types::error::{ConsoleError, Result};

use crate::command::ConsoleCommand;

/// Registry of available commands.
///
/// Insertion order is preserved (it drives both the `help` listing and
/// overload resolution) and names are not unique: overloads share a name,
/// and aliases wrap one operation under several names. The registry only
/// grows during a session.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<ConsoleCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Duplicate names are allowed.
    pub fn register(&mut self, cmd: ConsoleCommand) {
        self.commands.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All commands, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ConsoleCommand> {
        self.commands.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ConsoleCommand> {
        self.commands.get(index)
    }

    /// Distinct registered names, in first-registration order. Feeds
    /// autocomplete.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for cmd in &self.commands {
            if !names.contains(&cmd.name()) {
                names.push(cmd.name());
            }
        }
        names
    }

    /// First non-empty help text among commands with this name. Surfaced as
    /// guidance on arity mismatches and handler failures.
    pub fn first_help(&self, name: &str) -> Option<&str> {
        self.commands
            .iter()
            .filter(|c| c.name() == name)
            .map(ConsoleCommand::help)
            .find(|h| !h.is_empty())
    }

    /// Resolve tokenized input to a command and its argument tokens.
    ///
    /// The first token (lowercased) selects the candidates; among them the
    /// first registered whose arity equals the argument count wins. A
    /// capture-all candidate instead matches any non-empty remainder of the
    /// raw line, which becomes its single untokenized argument.
    pub fn resolve(&self, tokens: &[String], raw: &str) -> Result<(usize, Vec<String>)> {
        let Some(first) = tokens.first() else {
            return Err(ConsoleError::UnknownCommand(String::new()));
        };
        let entered = first.to_lowercase();
        let args = &tokens[1..];
        // Everything after the command name, untokenized.
        let remainder = raw.get(first.len()..).unwrap_or("").trim();

        let mut found_name = false;
        for (index, cmd) in self.commands.iter().enumerate() {
            if cmd.name() != entered {
                continue;
            }
            found_name = true;
            if cmd.capture_all_params_as_one() {
                if !remainder.is_empty() {
                    return Ok((index, vec![remainder.to_string()]));
                }
            } else if cmd.arity() == args.len() {
                return Ok((index, args.to_vec()));
            }
        }

        if found_name {
            Err(ConsoleError::ArityMismatch(entered))
        } else {
            Err(ConsoleError::UnknownCommand(first.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandBuilder, CommandOutput, ParamKind};

    fn noop(name: &str, params: usize) -> ConsoleCommand {
        let mut b = CommandBuilder::new(name, "");
        for i in 0..params {
            b = b.param(format!("p{i}"), ParamKind::Str);
        }
        b.handler(|_| Ok(CommandOutput::None)).build().unwrap()
    }

    fn toks(line: &str) -> Vec<String> {
        crate::dispatch::tokenize(line)
    }

    #[test]
    fn unknown_command_yields_no_match() {
        let reg = CommandRegistry::new();
        let result = reg.resolve(&toks("frobnicate"), "frobnicate");
        match result {
            Err(ConsoleError::UnknownCommand(name)) => assert_eq!(name, "frobnicate"),
            other => panic!("expected unknown command, got {other:?}"),
        }
    }

    #[test]
    fn overload_resolution_picks_matching_arity() {
        let mut reg = CommandRegistry::new();
        reg.register(noop("call", 1));
        reg.register(noop("call", 2));
        let (index, args) = reg.resolve(&toks("call a b"), "call a b").unwrap();
        assert_eq!(index, 1);
        assert_eq!(args, vec!["a", "b"]);
    }

    #[test]
    fn overload_resolution_prefers_registration_order() {
        let mut reg = CommandRegistry::new();
        reg.register(noop("call", 1));
        reg.register(noop("call", 1));
        let (index, _) = reg.resolve(&toks("call x"), "call x").unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let mut reg = CommandRegistry::new();
        reg.register(noop("quit", 0));
        let (index, _) = reg.resolve(&toks("QUIT"), "QUIT").unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn arity_mismatch_when_no_overload_fits() {
        let mut reg = CommandRegistry::new();
        reg.register(noop("call", 1));
        reg.register(noop("call", 2));
        assert!(matches!(
            reg.resolve(&toks("call a b c"), "call a b c"),
            Err(ConsoleError::ArityMismatch(_))
        ));
    }

    #[test]
    fn capture_all_takes_untokenized_remainder() {
        let mut reg = CommandRegistry::new();
        let cmd = CommandBuilder::new("say", "")
            .param("text", ParamKind::Opaque)
            .capture_all_params_as_one()
            .handler(|_| Ok(CommandOutput::None))
            .build()
            .unwrap();
        reg.register(cmd);
        let raw = "say hello \"quoted\" world";
        let (_, args) = reg.resolve(&toks(raw), raw).unwrap();
        assert_eq!(args, vec!["hello \"quoted\" world"]);
    }

    #[test]
    fn capture_all_rejects_empty_remainder() {
        let mut reg = CommandRegistry::new();
        let cmd = CommandBuilder::new("say", "")
            .param("text", ParamKind::Opaque)
            .capture_all_params_as_one()
            .handler(|_| Ok(CommandOutput::None))
            .build()
            .unwrap();
        reg.register(cmd);
        assert!(matches!(
            reg.resolve(&toks("say"), "say"),
            Err(ConsoleError::ArityMismatch(_))
        ));
    }

    #[test]
    fn names_are_distinct_in_first_registration_order() {
        let mut reg = CommandRegistry::new();
        reg.register(noop("call", 1));
        reg.register(noop("call", 2));
        reg.register(noop("quit", 0));
        assert_eq!(reg.names(), vec!["call", "quit"]);
    }

    #[test]
    fn first_help_skips_empty_entries() {
        let mut reg = CommandRegistry::new();
        reg.register(noop("call", 1));
        let documented = CommandBuilder::new("call", "Call something")
            .param("a", ParamKind::Str)
            .param("b", ParamKind::Str)
            .handler(|_| Ok(CommandOutput::None))
            .build()
            .unwrap();
        reg.register(documented);
        assert_eq!(reg.first_help("call"), Some("Call something"));
        assert_eq!(reg.first_help("quit"), None);
    }
}
