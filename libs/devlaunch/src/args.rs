//! Argument assembly.
//!
//! Recognized parameters come from a [`DefaultArguments`] list. The command
//! line may override any of them with `--name value` or `--name=value`;
//! everything else is kept, in order, as positional extras. The assembled
//! output is `--name value` pairs for non-empty parameters, then the optional
//! `--tweakClass`, then the extras.

use crate::logging::LogHandle;
use crate::redact::{RedactedArgs, is_sensitive_param};

/// Flag appended when the environment supplies a tweak class.
pub const TWEAK_CLASS_FLAG: &str = "--tweakClass";

/// Token that ends option parsing.
const END_OF_OPTIONS: &str = "--";

/// Ordered `name -> value` parameter mapping; each name appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultArguments {
    entries: Vec<(String, String)>,
}

impl DefaultArguments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, or replace its value in place if already declared.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.set(name.into(), value.map(Into::into).unwrap_or_default());
        self
    }

    pub fn set(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DefaultArguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (name, value) in iter {
            args.set(name.into(), value.into());
        }
        args
    }
}

/// Result of matching command-line tokens against the recognized parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Defaults with command-line overrides applied, declaration order kept.
    pub values: DefaultArguments,
    /// Overrides that were applied, in command-line order.
    pub overrides: Vec<(String, String)>,
    /// Tokens not bound to a recognized parameter.
    pub extras: Vec<String>,
}

/// Match `tokens` against the names declared in `defaults`.
///
/// Never fails: unknown flags and their values become extras, and a
/// recognized flag with no value left is kept as an extra too. A repeated
/// recognized flag keeps its last value.
#[must_use]
pub fn parse(defaults: &DefaultArguments, tokens: &[String]) -> ParsedArgs {
    let mut values = defaults.clone();
    let mut overrides = Vec::new();
    let mut extras = Vec::new();

    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        if token == END_OF_OPTIONS {
            extras.extend(iter.by_ref().cloned());
            break;
        }

        let Some(flag) = token.strip_prefix("--") else {
            extras.push(token.clone());
            continue;
        };

        let (name, inline_value) = flag
            .split_once('=')
            .map_or((flag, None), |(name, value)| (name, Some(value.to_owned())));

        if !defaults.contains(name) {
            extras.push(token.clone());
            continue;
        }

        let Some(value) = inline_value.or_else(|| iter.next().cloned()) else {
            extras.push(token.clone());
            break;
        };
        values.set(name.to_owned(), value.clone());
        overrides.push((name.to_owned(), value));
    }

    ParsedArgs {
        values,
        overrides,
        extras,
    }
}

/// Flatten parsed arguments into the sequence handed to the entry point.
#[must_use]
pub fn flatten(parsed: &ParsedArgs, tweak_class: Option<&str>) -> Vec<String> {
    let mut out = Vec::with_capacity(parsed.values.len() * 2 + parsed.extras.len() + 2);
    for (name, value) in parsed.values.iter() {
        if !value.is_empty() {
            out.push(format!("--{name}"));
            out.push(value.to_owned());
        }
    }
    if let Some(tweak) = tweak_class.filter(|tweak| !tweak.is_empty()) {
        out.push(TWEAK_CLASS_FLAG.to_owned());
        out.push(tweak.to_owned());
    }
    out.extend(parsed.extras.iter().cloned());
    out
}

/// Parse, log and flatten in one step.
///
/// Each applied override is logged except sensitive ones; the extras and the
/// final (redacted) argument line are logged as well.
#[must_use]
pub fn assemble(
    defaults: &DefaultArguments,
    tokens: &[String],
    tweak_class: Option<&str>,
    log: &LogHandle,
) -> Vec<String> {
    let parsed = parse(defaults, tokens);
    for (name, value) in &parsed.overrides {
        if !is_sensitive_param(name) {
            tracing::info!(parent: log.span(), "{name}: {value}");
        }
    }
    tracing::info!(parent: log.span(), "Extra: {:?}", parsed.extras);

    let args = flatten(&parsed, tweak_class);
    tracing::info!(parent: log.span(), "Running with arguments: {}", RedactedArgs(&args));
    args
}
