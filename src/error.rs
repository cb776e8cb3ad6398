use thiserror::Error;

/// Errors reported by the library.
#[derive(Debug, Error)]
pub enum TocError {
    /// The heading selector could not be parsed.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
