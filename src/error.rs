//! Error types for veer

use thiserror::Error;

/// Result type alias for router operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for route resolution
///
/// "No match" is not an error; `route` reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum Error {
    /// A percent-encoded path parameter or query component decoded to
    /// bytes that are not valid UTF-8
    #[error("invalid UTF-8 after percent-decoding {input:?}")]
    Decode {
        /// The raw component as it appeared in the URL
        input: String,
        #[source]
        source: std::str::Utf8Error,
    },
}
