use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// the crawler binary is missing or could not be spawned
    #[error("could not start `{program}`: {source}")]
    CrawlerMissing {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    CrawlerFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("no domains were entered")]
    NoDomains,

    #[error("file `{}` does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("invalid header `{0}`, use name:value")]
    MalformedHeader(String),

    #[error("invalid config `{}`: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("the xss marker word must not be empty")]
    EmptyMarker,

    #[error("interrupted by user")]
    Interrupted,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
