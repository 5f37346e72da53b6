use std::fmt;

/// Errors that can occur while fetching and decoding a metrics tree.
///
/// None of these touch the rendered city: the plot pipeline reports them to
/// the user and leaves the previous scene in place.
#[derive(Debug)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    Network(String),
    /// The endpoint answered with a non-success status code.
    Http { status: u16, url: String },
    /// Reading a static example file failed.
    Io(std::io::Error),
    /// The body was not valid JSON for the response schema.
    Parse(String),
    /// The body parsed but violates the tree invariants (e.g. zero-width footprint).
    InvalidData(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {msg}"),
            FetchError::Http { status, url } => write!(f, "HTTP {status} while fetching {url}"),
            FetchError::Io(e) => write!(f, "I/O error: {e}"),
            FetchError::Parse(msg) => write!(f, "Malformed metrics response: {msg}"),
            FetchError::InvalidData(msg) => write!(f, "Invalid metrics tree: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::Io(e)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::Http {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => FetchError::Network(e.to_string()),
        }
    }
}
