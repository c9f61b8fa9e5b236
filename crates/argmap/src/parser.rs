use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

/// Value stored for a flag that was given without a value.
const TRUE_VALUE: &str = "true";

/// How a single argv token is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// `--key=value` or `-k=value`. Split at the first `=`.
    Assign { key: &'a str, value: &'a str },
    /// `--key`, may take the next token as its value.
    Long(&'a str),
    /// `-k` (exactly one char), may take the next token as its value.
    Short(&'a str),
    /// `-abc`, every char is a boolean flag.
    Bundle(&'a str),
    /// Bare words, `-`, `--`, and `key=value` without a dash.
    Ignored,
}

pub(crate) fn classify(arg: &str) -> Token<'_> {
    if let Some((flag, value)) = arg.split_once('=') {
        return match flag.strip_prefix("--").or_else(|| flag.strip_prefix('-')) {
            Some(key) => Token::Assign { key, value },
            None => Token::Ignored,
        };
    }

    if let Some(key) = arg.strip_prefix("--") {
        return if key.is_empty() {
            Token::Ignored
        } else {
            Token::Long(key)
        };
    }

    let Some(shorts) = arg.strip_prefix('-') else {
        return Token::Ignored;
    };
    let mut chars = shorts.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Token::Ignored,
        (Some(_), None) => Token::Short(shorts),
        (Some(_), Some(_)) => Token::Bundle(shorts),
    }
}

/// The token after `idx`, if it can serve as a value.
///
/// Anything not starting with `-` qualifies, including the empty string.
pub(crate) fn lookahead_value(argv: &[String], idx: usize) -> Option<&str> {
    argv.get(idx + 1)
        .map(String::as_str)
        .filter(|next| !next.starts_with('-'))
}

/// Flag map built from one argv slice, plus the alias and default tables
/// consulted when it is read.
///
/// Values are plain strings; a flag given without a value holds `"true"`.
/// Aliases are one-directional: `set_alias("v", "verbose")` makes lookups of
/// `v` read the `verbose` entry, never the other way around.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArgParser {
    flags: IndexMap<String, String>,
    aliases: IndexMap<String, String>,
    defaults: IndexMap<String, String>,
}

impl ArgParser {
    /// Parse `argv` (program name excluded) into a new parser.
    pub fn new(argv: &[String]) -> Self {
        let mut parser = Self::default();
        parser.parse(argv);
        parser
    }

    /// Parse the current process arguments, skipping the program name.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    pub fn from_env() -> Self {
        let argv: Vec<String> = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        Self::new(&argv)
    }

    fn parse(&mut self, argv: &[String]) {
        let mut i = 0usize;
        while i < argv.len() {
            let arg = argv[i].as_str();

            match classify(arg) {
                Token::Assign { key, value } => {
                    self.store(key, value);
                    i += 1;
                }
                Token::Long(key) | Token::Short(key) => match lookahead_value(argv, i) {
                    Some(value) => {
                        self.store(key, value);
                        i += 2;
                    }
                    None => {
                        self.store(key, TRUE_VALUE);
                        i += 1;
                    }
                },
                Token::Bundle(shorts) => {
                    for ch in shorts.chars() {
                        self.store(ch.encode_utf8(&mut [0; 4]), TRUE_VALUE);
                    }
                    i += 1;
                }
                Token::Ignored => {
                    tracing::trace!(arg, "ignoring token");
                    i += 1;
                }
            }
        }

        tracing::debug!(
            tokens = argv.len(),
            flags = self.flags.len(),
            "parsed arguments"
        );
    }

    // Keys are stored as written; aliases only apply on lookup.
    fn store(&mut self, key: &str, value: &str) {
        tracing::trace!(key, value, "storing flag");
        self.flags.insert(key.to_string(), value.to_string());
    }

    fn normalize<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Make lookups of `alias` resolve to `canonical`. Re-registering an alias
    /// replaces its target.
    pub fn set_alias(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        self.aliases.insert(alias.into(), canonical.into());
    }

    /// Record a default for `name` (after alias resolution) and apply it if the
    /// flag is not already set. A value parsed from argv is never replaced.
    pub fn set_default(&mut self, name: &str, value: impl Into<String>) {
        let key = self.normalize(name).to_string();
        let value = value.into();
        self.defaults.insert(key.clone(), value.clone());

        match self.flags.entry(key) {
            Entry::Occupied(entry) => {
                tracing::debug!(flag = entry.key().as_str(), "flag already set, keeping value");
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }

    /// Whether `name` was set by argv or by a default.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(self.normalize(name))
    }

    /// The value of `name`, or `""` if it is not set.
    ///
    /// An unset flag and a flag set to `""` look the same here; use
    /// [`has_flag`](Self::has_flag) to tell them apart.
    pub fn get_flag_value(&self, name: &str) -> &str {
        self.flags
            .get(self.normalize(name))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// `true` only if `name` is set to `"true"` or `"1"`, ignoring case.
    pub fn get_bool_flag(&self, name: &str) -> bool {
        self.flags
            .get(self.normalize(name))
            .is_some_and(|value| value.eq_ignore_ascii_case("true") || value == "1")
    }

    /// Stored `(name, value)` pairs in the order they were first set.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn aliases(&self) -> &IndexMap<String, String> {
        &self.aliases
    }

    pub fn defaults(&self) -> &IndexMap<String, String> {
        &self.defaults
    }
}
