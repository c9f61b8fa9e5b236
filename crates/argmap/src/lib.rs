//! Permissive command-line flag parsing.
//!
//! `argmap` turns a flat argv slice into a map of flag names to string values:
//! - `--name value`, `--name=value`, `--flag` (stored as `"true"`)
//! - `-n value`, `-n=value`, `-v`
//! - bundled short booleans: `-abc` is `-a -b -c`
//!
//! Nothing is ever rejected. Unknown tokens are skipped, repeated flags keep
//! the last value, and lookups of unset flags return `""` / `false`. Aliases
//! and defaults are registered after parsing and are applied when a flag is
//! read, so keys are stored exactly as they were written on the command line.
//!
//! ```
//! use argmap::ArgParser;
//!
//! let argv: Vec<String> = ["--file=report.csv", "-n", "5", "-xv"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let mut parser = ArgParser::new(&argv);
//! parser.set_default("n", "10");
//!
//! assert_eq!(parser.get_flag_value("file"), "report.csv");
//! assert_eq!(parser.get_flag_value("n"), "5");
//! assert!(parser.get_bool_flag("x"));
//! ```
//!
//! [`strict::Schema`] offers an opt-in check for unknown flags and missing
//! values, and [`config::ParserConfig`] carries aliases and defaults as data.

pub mod config;
mod error;
mod parser;
pub mod strict;

pub use config::ParserConfig;
pub use error::StrictError;
pub use parser::ArgParser;
pub use strict::Schema;
