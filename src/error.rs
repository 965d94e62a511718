//! Error types and handling for the `SkyChat` assistant

use std::fmt;

use thiserror::Error;

/// HTTP-status-derived error kind for weather provider responses.
///
/// Every non-200 answer from the geocoding or one-call endpoint maps to one
/// of these kinds; the `Display` output is the fixed human-readable string
/// surfaced to the LLM and the user (e.g. "401 Unauthorized").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// HTTP 400
    BadRequest,
    /// HTTP 401
    Unauthorized,
    /// HTTP 404
    NotFound,
    /// HTTP 429
    TooManyRequests,
    /// Any other status code
    Unexpected(u16),
}

impl ApiErrorKind {
    /// Map an HTTP status code to its error kind
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            429 => Self::TooManyRequests,
            code => Self::Unexpected(code),
        }
    }

    /// The raw HTTP status code behind this kind
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::TooManyRequests => 429,
            Self::Unexpected(code) => *code,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "400 Bad Request"),
            Self::Unauthorized => write!(f, "401 Unauthorized"),
            Self::NotFound => write!(f, "404 Not Found"),
            Self::TooManyRequests => write!(f, "429 Too Many Requests"),
            Self::Unexpected(code) => write!(f, "{code} Unexpected Error"),
        }
    }
}

/// Main error type for the `SkyChat` assistant
#[derive(Error, Debug)]
pub enum SkyChatError {
    /// Weather provider answered with a non-200 status
    #[error("{kind}")]
    Api {
        /// Status-derived failure kind
        kind: ApiErrorKind,
    },

    /// Transport or body-decoding failure from the HTTP client
    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// Geocoding answered 200 but with an empty result set
    #[error("No geocoding results for '{query}'")]
    NoResults {
        /// The combined geocoding query string
        query: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A tool was invoked with arguments that do not match its schema
    #[error("Invalid tool arguments: {message}")]
    InvalidArguments { message: String },

    /// LLM chat endpoint failures and agent-loop errors
    #[error("Agent error: {message}")]
    Agent { message: String },
}

impl SkyChatError {
    /// Wrap a status-derived API error kind
    #[must_use]
    pub fn api(kind: ApiErrorKind) -> Self {
        Self::Api { kind }
    }

    /// Map a raw HTTP status code straight to an API error
    #[must_use]
    pub fn api_status(status: u16) -> Self {
        Self::Api {
            kind: ApiErrorKind::from_status(status),
        }
    }

    /// Create a new empty-geocoding-result error
    pub fn no_results<S: Into<String>>(query: S) -> Self {
        Self::NoResults {
            query: query.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new invalid-tool-arguments error
    pub fn invalid_arguments<S: Into<String>>(message: S) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a new agent error
    pub fn agent<S: Into<String>>(message: S) -> Self {
        Self::Agent {
            message: message.into(),
        }
    }
}
