use thiserror::Error;

/// Errors that can occur while getting recognition input to the formatter.
///
/// Formatting itself never fails: noisy OCR input always yields a
/// best-effort [`crate::FormattedRecipe`]. These variants cover the
/// envelope around it: reading a payload, deserializing it, loading
/// configuration.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Failed to read the input file or stream
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The recognition payload was not valid JSON
    #[error("Invalid recognition payload: {0}")]
    InvalidRecognition(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
