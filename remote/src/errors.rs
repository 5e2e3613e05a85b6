use std::{io, num::ParseIntError};

use thiserror::Error;

/// Outcome of a failed request, as seen by the caller.
///
/// Transport failures carry status `0` and the error description as text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("request failed with status {status}: {status_text}")]
pub struct RequestError {
    pub status: u16,
    pub status_text: String,
}

impl RequestError {
    pub fn transport<E: std::fmt::Display>(e: E) -> Self {
        RequestError {
            status: 0,
            status_text: e.to_string(),
        }
    }
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RemoteError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),

    #[error("invalid media source: {0}")]
    InvalidMediaSource(String),
    #[error("unknown media type {0}")]
    UnknownMediaType(String),
    #[error("no media source selected")]
    NoSelection,
    #[error("no media source named {0}")]
    UnknownSource(String),
}
