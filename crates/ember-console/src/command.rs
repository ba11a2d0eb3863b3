//! Command descriptors: parameter kinds, converted argument values, and the
//! builder used by command modules to declare commands.

use std::fmt;

use ember_types::error::{ConsoleError, Result};

/// Declared kind of a command parameter.
///
/// Conversion from the string token dispatches on this tag; there is no
/// runtime type introspection anywhere in the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    /// `true` / `false`, case-insensitive.
    Bool,
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Plain string token.
    Str,
    /// One of a fixed set of named constants, matched case-insensitively.
    /// The canonical spelling is handed to the handler.
    Enum(Vec<String>),
    /// The raw token passed through unchanged. Capture-all commands use a
    /// single opaque parameter.
    Opaque,
}

impl ParamKind {
    /// Kind name used in error messages and usage hints.
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Str => "string",
            ParamKind::Enum(_) => "enum",
            ParamKind::Opaque => "any",
        }
    }
}

/// One declared parameter: a name (for help and error messages) and a kind.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
}

impl Param {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A converted argument handed to a command handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Canonical spelling of the matched enum constant.
    Enum(String),
}

impl ArgValue {
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            ArgValue::Bool(b) => Ok(*b),
            _ => Err(ConsoleError::InvalidParameters),
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            ArgValue::Int(n) => Ok(*n),
            _ => Err(ConsoleError::InvalidParameters),
        }
    }

    pub fn as_float(&self) -> Result<f64> {
        match self {
            ArgValue::Float(f) => Ok(*f),
            ArgValue::Int(n) => Ok(*n as f64),
            _ => Err(ConsoleError::InvalidParameters),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            ArgValue::Str(s) | ArgValue::Enum(s) => Ok(s),
            _ => Err(ConsoleError::InvalidParameters),
        }
    }
}

/// Fetch the argument at `index`, failing with the call-boundary error when
/// the handler asks for more arguments than it was given.
pub fn arg(args: &[ArgValue], index: usize) -> Result<&ArgValue> {
    args.get(index).ok_or(ConsoleError::InvalidParameters)
}

/// Output produced by a command handler.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// A line to append to the console output.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to the host to terminate the process.
    Quit,
    /// Signal to close the console panel.
    Hide,
}

/// Type-erased command handler: converted arguments in, output or error out.
///
/// The console is single-threaded; handlers that mutate host state capture
/// it behind `Rc<RefCell<_>>`.
pub type Handler = Box<dyn Fn(&[ArgValue]) -> Result<CommandOutput>>;

/// An invocable console command: name, help, parameters, and handler.
///
/// Immutable after construction except for `help`, which module indexing
/// late-fills with a generated usage block. Several commands may share a
/// name (overloads differing in arity) or wrap the same operation under
/// different names (aliases).
pub struct ConsoleCommand {
    name: String,
    help: String,
    exclude_from_list: bool,
    show_types_in_usage: bool,
    capture_all_params_as_one: bool,
    params: Vec<Param>,
    handler: Handler,
}

impl ConsoleCommand {
    /// Lowercase-normalized command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help text; may be empty.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Excluded from the `help` command list.
    pub fn exclude_from_list(&self) -> bool {
        self.exclude_from_list
    }

    /// Append raw kind names for non-bool, non-enum parameters in usage.
    pub fn show_types_in_usage(&self) -> bool {
        self.show_types_in_usage
    }

    /// The entire remainder of the input line is passed as one argument.
    pub fn capture_all_params_as_one(&self) -> bool {
        self.capture_all_params_as_one
    }

    /// Declared parameters, in order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Number of positional parameters this command expects.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Invoke the underlying handler with converted arguments.
    pub fn invoke(&self, args: &[ArgValue]) -> Result<CommandOutput> {
        (self.handler)(args)
    }

    pub(crate) fn set_help(&mut self, help: String) {
        self.help = help;
    }
}

impl fmt::Debug for ConsoleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleCommand")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("params", &self.params)
            .field("exclude_from_list", &self.exclude_from_list)
            .field("capture_all_params_as_one", &self.capture_all_params_as_one)
            .finish_non_exhaustive()
    }
}

/// Renders as the entry shown by the `help` command list.
impl fmt::Display for ConsoleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\t{}", self.name, self.help)
    }
}

/// Builder for a [`ConsoleCommand`].
///
/// Command modules return these from [`crate::CommandModule::commands`];
/// indexing validates each one and generates the usage help.
pub struct CommandBuilder {
    name: String,
    help: String,
    exclude_from_list: bool,
    show_types_in_usage: bool,
    capture_all_params_as_one: bool,
    params: Vec<Param>,
    handler: Option<Handler>,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            exclude_from_list: false,
            show_types_in_usage: false,
            capture_all_params_as_one: false,
            params: Vec::new(),
            handler: None,
        }
    }

    /// Append a declared parameter.
    pub fn param(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.params.push(Param::new(name, kind));
        self
    }

    /// Hide this command from the `help` listing.
    pub fn exclude_from_list(mut self) -> Self {
        self.exclude_from_list = true;
        self
    }

    /// Show kind names for plain parameters in the generated usage.
    pub fn show_types_in_usage(mut self) -> Self {
        self.show_types_in_usage = true;
        self
    }

    /// Pass the entire remainder of the input line as the single argument.
    /// Requires exactly one opaque or string parameter.
    pub fn capture_all_params_as_one(mut self) -> Self {
        self.capture_all_params_as_one = true;
        self
    }

    pub fn handler(
        mut self,
        f: impl Fn(&[ArgValue]) -> Result<CommandOutput> + 'static,
    ) -> Self {
        self.handler = Some(Box::new(f));
        self
    }

    /// Name as declared, before normalization. Used in indexing failure logs.
    pub fn declared_name(&self) -> &str {
        &self.name
    }

    /// Validate and produce the command. The name is lowercase-normalized
    /// here; help is taken as-is (usage generation happens during indexing).
    pub fn build(self) -> Result<ConsoleCommand> {
        if self.name.trim().is_empty() {
            return Err(ConsoleError::Definition("empty command name".into()));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(ConsoleError::Definition(format!(
                "command name '{}' contains whitespace",
                self.name
            )));
        }
        for p in &self.params {
            if let ParamKind::Enum(constants) = &p.kind
                && constants.is_empty()
            {
                return Err(ConsoleError::Definition(format!(
                    "enum parameter '{}' has no constants",
                    p.name
                )));
            }
        }
        if self.capture_all_params_as_one {
            let free_form = self.params.len() == 1
                && matches!(self.params[0].kind, ParamKind::Opaque | ParamKind::Str);
            if !free_form {
                return Err(ConsoleError::Definition(format!(
                    "capture-all command '{}' must declare exactly one \
                     free-form parameter",
                    self.name
                )));
            }
        }
        let handler = self.handler.ok_or_else(|| {
            ConsoleError::Definition(format!("command '{}' has no handler", self.name))
        })?;

        Ok(ConsoleCommand {
            name: self.name.to_lowercase(),
            help: self.help,
            exclude_from_list: self.exclude_from_list,
            show_types_in_usage: self.show_types_in_usage,
            capture_all_params_as_one: self.capture_all_params_as_one,
            params: self.params,
            handler,
        })
    }
}
