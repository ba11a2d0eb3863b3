//! Built-in commands every console carries: the help listing, `quit`, and
//! the panel-closing aliases.

use crate::command::{CommandBuilder, CommandOutput};
use crate::index::CommandModule;

/// The baseline command set.
pub struct BasicCommands;

impl CommandModule for BasicCommands {
    fn name(&self) -> &str {
        "basic"
    }

    fn commands(&self) -> Vec<CommandBuilder> {
        vec![
            // The help aliases are answered by the console itself (listing
            // needs registry access); the descriptors exist so they show up
            // in the listing and in autocomplete.
            CommandBuilder::new("help", "Shows all the registered commands")
                .handler(|_| Ok(CommandOutput::None)),
            CommandBuilder::new("?", "Same as help, shows all the registered commands")
                .handler(|_| Ok(CommandOutput::None)),
            CommandBuilder::new(
                "commandslist",
                "Same as help, shows all the registered commands",
            )
            .handler(|_| Ok(CommandOutput::None)),
            CommandBuilder::new("quit", "Quit the application")
                .handler(|_| Ok(CommandOutput::Quit)),
            CommandBuilder::new("exit", "Close the console")
                .handler(|_| Ok(CommandOutput::Hide)),
            CommandBuilder::new("close", "Close the console")
                .handler(|_| Ok(CommandOutput::Hide)),
        ]
    }
}
