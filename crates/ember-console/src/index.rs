//! Module indexing: the registration table that replaces attribute
//! scanning.
//!
//! Hosts group related commands into types implementing [`CommandModule`];
//! indexing walks the modules, validates each declared command, generates
//! usage help from the parameter list, and skips (never aborts on) bad
//! definitions.

use crate::command::{CommandBuilder, ConsoleCommand, Param, ParamKind};

/// A group of related command definitions contributed by host code.
pub trait CommandModule {
    /// Module name, used in indexing failure logs.
    fn name(&self) -> &str;

    /// The command definitions this module contributes. A module may emit
    /// several builders with the same name (overloads) or several names
    /// wrapping one operation (aliases).
    fn commands(&self) -> Vec<CommandBuilder>;
}

/// Build descriptors from a set of command modules.
///
/// Each builder is validated and its help late-filled with a generated
/// usage block. A definition that fails validation is logged and skipped;
/// the remaining definitions still index.
pub fn index_modules(modules: &[&dyn CommandModule]) -> Vec<ConsoleCommand> {
    let mut commands = Vec::new();
    for module in modules {
        for builder in module.commands() {
            let declared = builder.declared_name().to_string();
            match builder.build() {
                Ok(mut cmd) => {
                    let help = generate_help(&cmd);
                    cmd.set_help(help);
                    commands.push(cmd);
                },
                Err(e) => {
                    log::error!(
                        "skipping command '{declared}' from module '{}': {e}",
                        module.name()
                    );
                },
            }
        }
    }
    commands
}

/// Append the generated usage block to a command's help text.
///
/// Commands without parameters keep their help untouched. Each parameter
/// renders as `<name>`, with a hint appended: `(true|false)` for booleans,
/// the pipe-joined constants for enums, and the raw kind name for other
/// kinds only when the command opts in.
fn generate_help(cmd: &ConsoleCommand) -> String {
    let mut help = cmd.help().to_string();
    if cmd.params().is_empty() {
        return help;
    }

    if !help.is_empty() {
        help.push('\n');
    }
    help.push_str("Usage:\n\t");
    help.push_str(cmd.name());
    for param in cmd.params() {
        help.push_str(&usage_for_param(param, cmd.show_types_in_usage()));
    }
    help
}

fn usage_for_param(param: &Param, show_types: bool) -> String {
    let mut usage = format!(" <{}", param.name);
    match &param.kind {
        ParamKind::Bool => usage.push_str(" (true|false)"),
        ParamKind::Enum(constants) => {
            usage.push_str(&format!(" ({})", constants.join("|")));
        },
        kind if show_types => {
            usage.push_str(&format!(" ({})", kind.name()));
        },
        _ => {},
    }
    usage.push('>');
    usage
}
