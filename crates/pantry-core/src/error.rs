// ── Core error types ──
//
// User-facing errors from pantry-core. Consumers never see HTTP status
// codes or JSON parse failures directly. The `From<pantry_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Catalog service unavailable at {url}: {reason}")]
    ServiceUnavailable { url: String, reason: String },

    #[error("Catalog request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Catalog resource not found: {path}")]
    NotFound { path: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Catalog API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<pantry_api::Error> for CoreError {
    fn from(err: pantry_api::Error) -> Self {
        match err {
            pantry_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ServiceUnavailable {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            pantry_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            pantry_api::Error::Build(message) => CoreError::Config { message },
            pantry_api::Error::Status { status: 404, url } => CoreError::NotFound { path: url },
            pantry_api::Error::Status { status, url } if status >= 500 => {
                CoreError::ServiceUnavailable {
                    url,
                    reason: format!("HTTP {status}"),
                }
            }
            pantry_api::Error::Status { status, url } => CoreError::Api {
                message: format!("HTTP {status} from {url}"),
                status: Some(status),
            },
            pantry_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
