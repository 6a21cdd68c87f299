use std::fmt;

use reqwest::StatusCode;

/// Why an upstream call produced no usable body.
///
/// Schema drift (a 200 response missing an expected key) is not an error at
/// this level; callers detect it with guarded lookups.
#[derive(Debug)]
pub enum UpstreamError {
    /// Network failure, timeout or an invalid request.
    Transport(reqwest::Error),
    /// Anything but 200 OK.
    Status(StatusCode),
    /// The body was not valid JSON.
    Decode(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else {
            UpstreamError::Transport(err)
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Transport(e) => write!(f, "request failed: {}", e),
            UpstreamError::Status(code) => write!(f, "unexpected status {}", code),
            UpstreamError::Decode(e) => write!(f, "undecodable body: {}", e),
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::Transport(e) => Some(e),
            _ => None,
        }
    }
}
