/// Problems reported by [`ArgParser::new_strict`](crate::ArgParser::new_strict).
///
/// Names are reported without leading dashes, as written in argv.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrictError {
    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("missing value for {0}")]
    MissingValue(String),
}

impl StrictError {
    /// The flag name the error is about.
    pub fn flag(&self) -> &str {
        match self {
            Self::UnknownFlag(name) | Self::MissingValue(name) => name.as_str(),
        }
    }
}
