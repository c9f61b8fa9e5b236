//! Opt-in validation on top of the permissive parser.
//!
//! [`ArgParser::new`] accepts anything. When a caller wants typos and missing
//! values surfaced, it declares the flags it knows in a [`Schema`] and uses
//! [`ArgParser::new_strict`] instead. The flag map produced is the same either
//! way; the schema only decides whether parsing is reported as an error.

use indexmap::IndexMap;

use crate::error::StrictError;
use crate::parser::{ArgParser, Token, classify, lookahead_value};

/// Declared flags for a strict parse.
///
/// Without a schema the parser cannot tell a typo from a real flag, or a
/// boolean flag from a value flag whose value was forgotten. `Schema` lists:
/// - boolean flags (`flag`)
/// - flags that need a value (`value_flag`)
/// - aliases, which are also registered on the resulting parser
///
/// Names may be given with or without leading dashes.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    bool_flags: Vec<String>,
    value_flags: Vec<String>,
    aliases: IndexMap<String, String>,
}

fn strip_dashes(name: &str) -> String {
    name.trim().trim_start_matches('-').to_string()
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a boolean flag (e.g. `--verbose`, `-v`).
    pub fn flag(mut self, name: impl AsRef<str>) -> Self {
        let name = strip_dashes(name.as_ref());
        if !self.bool_flags.contains(&name) {
            self.bool_flags.push(name);
        }
        self
    }

    /// Declare a flag that needs a value (e.g. `--output out.txt`, `-n=5`).
    pub fn value_flag(mut self, name: impl AsRef<str>) -> Self {
        let name = strip_dashes(name.as_ref());
        if !self.value_flags.contains(&name) {
            self.value_flags.push(name);
        }
        self
    }

    /// Accept `alias` wherever `canonical` is declared.
    pub fn alias(mut self, alias: impl AsRef<str>, canonical: impl AsRef<str>) -> Self {
        self.aliases.insert(
            strip_dashes(alias.as_ref()),
            strip_dashes(canonical.as_ref()),
        );
        self
    }

    fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    fn takes_value(&self, name: &str) -> bool {
        let name = self.resolve(name);
        self.value_flags.iter().any(|f| f == name)
    }

    fn ensure_known(&self, name: &str) -> Result<(), StrictError> {
        let resolved = self.resolve(name);
        let known = self.bool_flags.iter().any(|f| f == resolved)
            || self.value_flags.iter().any(|f| f == resolved);
        if known {
            Ok(())
        } else {
            Err(StrictError::UnknownFlag(name.to_string()))
        }
    }

    /// Walk `argv` the way the parser does and report the first problem.
    pub fn check(&self, argv: &[String]) -> Result<(), StrictError> {
        let mut i = 0usize;
        while i < argv.len() {
            match classify(&argv[i]) {
                Token::Assign { key, .. } => self.ensure_known(key)?,
                Token::Long(key) | Token::Short(key) => {
                    self.ensure_known(key)?;
                    match lookahead_value(argv, i) {
                        // Consumed as the value, same as the parser.
                        Some(_) => i += 1,
                        None if self.takes_value(key) => {
                            return Err(StrictError::MissingValue(key.to_string()));
                        }
                        None => {}
                    }
                }
                Token::Bundle(shorts) => {
                    for ch in shorts.chars() {
                        let name = ch.to_string();
                        self.ensure_known(&name)?;
                        if self.takes_value(&name) {
                            return Err(StrictError::MissingValue(name));
                        }
                    }
                }
                Token::Ignored => {}
            }
            i += 1;
        }
        Ok(())
    }
}

impl ArgParser {
    /// Parse `argv` like [`ArgParser::new`], but fail on flags missing from
    /// `schema` and on value flags without a value.
    ///
    /// Aliases declared in `schema` are registered on the returned parser.
    pub fn new_strict(argv: &[String], schema: &Schema) -> Result<Self, StrictError> {
        if let Err(err) = schema.check(argv) {
            tracing::debug!(flag = err.flag(), "strict parse rejected arguments");
            return Err(err);
        }

        let mut parser = Self::new(argv);
        for (alias, canonical) in &schema.aliases {
            parser.set_alias(alias.as_str(), canonical.as_str());
        }
        Ok(parser)
    }
}
