use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid pattern for attribute '{attr}': {source}")]
    InvalidPattern {
        attr: String,
        #[source]
        source: regex::Error,
    },

    #[error("Pattern for attribute '{attr}' is missing capture group '{group}'")]
    MissingCaptureGroup { attr: String, group: String },

    #[error("Pattern for attribute '{attr}' defines unexpected capture group '{group}'")]
    UnexpectedCaptureGroup { attr: String, group: String },

    #[error("Unsupported catalog version: {0}")]
    UnsupportedCatalogVersion(u32),

    #[error("Unknown comparison mode: {0:?} (expected s/strong, g/grouped or i/ignore)")]
    UnknownMode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
