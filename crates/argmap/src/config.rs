//! Aliases and defaults as data.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::parser::ArgParser;

/// Aliases and defaults to register on a parser, e.g. loaded from JSON:
///
/// ```json
/// {
///   "aliases": { "v": "verbose", "f": "file" },
///   "defaults": { "file": "input.txt", "n": "10" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserConfig {
    /// alias -> canonical name
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub aliases: IndexMap<String, String>,

    /// canonical (or aliased) name -> default value
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub defaults: IndexMap<String, String>,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }

    pub fn default_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse parser config JSON")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read parser config: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse parser config JSON: {}", path.display()))
    }

    /// Layer `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: ParserConfig) {
        self.aliases.extend(other.aliases);
        self.defaults.extend(other.defaults);
    }

    /// Register every alias, then every default, in insertion order.
    ///
    /// Aliases go first so defaults resolve through them.
    pub fn apply(&self, parser: &mut ArgParser) {
        for (alias, canonical) in &self.aliases {
            parser.set_alias(alias.as_str(), canonical.as_str());
        }
        for (name, value) in &self.defaults {
            parser.set_default(name, value.as_str());
        }
        tracing::debug!(
            aliases = self.aliases.len(),
            defaults = self.defaults.len(),
            "applied parser config"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_temp_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let pid = std::process::id();
        let dir = std::env::temp_dir().join(format!("argmap-{prefix}-{pid}-{nanos}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn deserializes_with_missing_sections() {
        let cfg = ParserConfig::from_json_str(r#"{ "aliases": { "v": "verbose" } }"#).unwrap();
        assert_eq!(cfg.aliases.get("v").map(String::as_str), Some("verbose"));
        assert!(cfg.defaults.is_empty());

        let empty = ParserConfig::from_json_str("{}").unwrap();
        assert_eq!(empty, ParserConfig::default());
    }

    #[test]
    fn rejects_non_string_values() {
        let err = ParserConfig::from_json_str(r#"{ "defaults": { "n": 10 } }"#).unwrap_err();
        assert!(err.to_string().contains("failed to parse parser config JSON"));
    }

    #[test]
    fn merge_prefers_other() {
        let mut base = ParserConfig::new()
            .alias("v", "verbose")
            .default_value("n", "10");
        base.merge(ParserConfig::new().alias("v", "version").default_value("q", "1"));

        assert_eq!(base.aliases.get("v").map(String::as_str), Some("version"));
        assert_eq!(base.defaults.get("n").map(String::as_str), Some("10"));
        assert_eq!(base.defaults.get("q").map(String::as_str), Some("1"));
    }

    #[test]
    fn apply_registers_aliases_before_defaults() {
        // Defaults listed by alias still land on the canonical key.
        let cfg = ParserConfig::new()
            .default_value("f", "input.txt")
            .alias("f", "file");
        let mut parser = ArgParser::new(&argv(&["-n", "5"]));
        cfg.apply(&mut parser);

        assert_eq!(parser.get_flag_value("file"), "input.txt");
        assert_eq!(parser.get_flag_value("n"), "5");
        assert!(!parser.iter().any(|(k, _)| k == "f"));
    }

    #[test]
    fn from_file_reads_json() {
        let dir = make_temp_dir("config-read");
        let path = dir.join("flags.json");
        fs::write(
            &path,
            r#"{ "aliases": { "d": "debug" }, "defaults": { "debug": "false" } }"#,
        )
        .unwrap();

        let cfg = ParserConfig::from_file(&path).unwrap();
        let mut parser = ArgParser::new(&argv(&["-d"]));
        cfg.apply(&mut parser);
        // `-d` was stored under `d`; the alias sends lookups to `debug`.
        assert!(!parser.get_bool_flag("d"));
        assert_eq!(parser.get_flag_value("debug"), "false");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn from_file_reports_missing_path() {
        let dir = make_temp_dir("config-missing");
        let path = dir.join("nope.json");
        let err = ParserConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read parser config"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn serializes_camel_case_and_skips_empty_tables() {
        let cfg = ParserConfig::new().alias("v", "verbose");
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"aliases":{"v":"verbose"}}"#);
    }
}
