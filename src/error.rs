use thiserror::Error;

/// Why an application submission did not go through. The `Display` text is
/// the reason shown below the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The endpoint answered with a non-success status. Any body it sent is
    /// dropped.
    #[error("Failed to submit application")]
    Rejected { status: u16 },

    #[error("{0}")]
    Transport(String),

    #[error("Failed to encode application: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        SubmissionError::Encode(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Base URL must not be empty")]
    EmptyBaseUrl,

    #[error("Base URL must start with http:// or https://, got {0}")]
    UnsupportedScheme(String),

    #[error("Base URL has no host: {0}")]
    MissingHost(String),

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install log subscriber: {0}")]
    LogSubscriber(String),
}
