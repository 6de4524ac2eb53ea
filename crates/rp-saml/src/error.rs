//! Error types for relying-party SAML operations.
//!
//! Decode-stage failures deliberately collapse into a single caller-visible
//! error code: an HTTP response must not reveal which stage rejected the
//! payload. The underlying cause stays attached for server-side logging.

use thiserror::Error;

/// Result type for relying-party SAML operations.
pub type Saml2Result<T> = Result<T, Saml2Error>;

/// Protocol error codes exposed to callers.
pub mod codes {
    /// An inbound response could not be decoded or inflated.
    pub const INVALID_RESPONSE: &str = "invalid_response";

    /// An outbound message could not be prepared for its binding.
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Errors raised while handling SAML 2.0 protocol messages.
#[derive(Debug, Error)]
pub enum Saml2Error {
    /// The message parameter was not well-formed base64.
    #[error("failed to decode SAMLResponse")]
    InvalidEncoding(#[source] base64::DecodeError),

    /// The decoded bytes were not an acceptable raw DEFLATE stream.
    #[error("unable to inflate SAMLResponse")]
    InvalidCompression(#[source] std::io::Error),

    /// An outbound message could not be compressed for its binding.
    #[error("unable to encode outbound SAML message")]
    Encode(#[source] std::io::Error),
}

impl Saml2Error {
    /// Returns the protocol error code for this error.
    ///
    /// Both inbound decode failures map to [`codes::INVALID_RESPONSE`];
    /// callers render one uniform failure response and log the cause
    /// separately.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEncoding(_) | Self::InvalidCompression(_) => codes::INVALID_RESPONSE,
            Self::Encode(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidEncoding(_) | Self::InvalidCompression(_) => 401,
            Self::Encode(_) => 500,
        }
    }
}
