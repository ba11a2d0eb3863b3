//! Input-line parsing and argument conversion.
//!
//! Tokenization treats double-quoted substrings as atomic tokens, so a
//! single argument can contain spaces: `say "hello world"` yields
//! `["say", "hello world"]`.

use ember_types::error::{ConsoleError, Result};

use crate::command::{ArgValue, Param, ParamKind};

/// Trim the line and strip the leading slash-style prefixes (`/`, `\`,
/// backtick) some hosts use to mark console input.
pub fn strip_command_prefix(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['/', '\\', '`'])
        .trim()
}

/// Tokenize a command line respecting double quotes.
///
/// The trimmed input is split on `"` into alternating segments: segments
/// outside quotes are split on whitespace runs (empty tokens discarded);
/// segments inside a quote pair are kept verbatim as one token with the
/// quotes stripped. An unterminated trailing quote is treated as if it were
/// closed, so the dangling segment survives as a single token.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for (i, segment) in input.trim().split('"').enumerate() {
        if i % 2 == 0 {
            tokens.extend(segment.split_whitespace().map(str::to_string));
        } else {
            tokens.push(segment.to_string());
        }
    }
    tokens
}

/// Convert string tokens to typed argument values, position by position.
///
/// The first failing position aborts the whole conversion; the handler is
/// never invoked with partial arguments.
pub fn convert(params: &[Param], tokens: &[String]) -> Result<Vec<ArgValue>> {
    debug_assert_eq!(params.len(), tokens.len());
    params
        .iter()
        .zip(tokens)
        .map(|(param, token)| convert_one(param, token))
        .collect()
}

fn convert_one(param: &Param, token: &str) -> Result<ArgValue> {
    let fail = || ConsoleError::Conversion {
        value: token.to_string(),
        kind: param.kind.name().to_string(),
        name: param.name.clone(),
    };

    match &param.kind {
        ParamKind::Opaque | ParamKind::Str => Ok(ArgValue::Str(token.to_string())),
        ParamKind::Bool => {
            if token.eq_ignore_ascii_case("true") {
                Ok(ArgValue::Bool(true))
            } else if token.eq_ignore_ascii_case("false") {
                Ok(ArgValue::Bool(false))
            } else {
                Err(fail())
            }
        },
        ParamKind::Int => token
            .parse::<i64>()
            .map(ArgValue::Int)
            .map_err(|_| fail()),
        ParamKind::Float => token
            .parse::<f64>()
            .map(ArgValue::Float)
            .map_err(|_| fail()),
        ParamKind::Enum(constants) => constants
            .iter()
            .find(|c| c.eq_ignore_ascii_case(token))
            .map(|c| ArgValue::Enum(c.clone()))
            .ok_or_else(fail),
    }
}
