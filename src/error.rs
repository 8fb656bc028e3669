use std::path::PathBuf;

/// Everything that can go wrong in the fetch/log pipeline.
///
/// The configuration variants (`ListFile`, `InvalidNumber`, `InvalidLogFormat`)
/// abort a run before any fetching; proxy and transport failures are reported
/// and skipped by the loop driver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read list file {path}: {source}")]
    ListFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid numeric input: {0}")]
    InvalidNumber(String),

    #[error("log format must be 'txt' or 'json', got '{0}'")]
    InvalidLogFormat(String),

    #[error("invalid proxy format: {0}")]
    InvalidProxyFormat(String),

    #[error("cannot build client for proxy {proxy}: {source}")]
    TransportSetup {
        proxy: String,
        source: reqwest::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot serialize success log: {0}")]
    LogSerialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
