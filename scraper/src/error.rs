use thiserror::Error;

/// Why a week's chart page could not be turned into entries.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("no chart entries found at {url}")]
    NoEntries { url: String },

    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a start date is required unless --verify is given")]
    MissingStart,
}
