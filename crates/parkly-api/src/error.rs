use thiserror::Error;

/// Top-level error type for the `parkly-api` crate.
///
/// Covers every failure mode of the REST surface: credentials, transport,
/// structured backend errors and payload decoding. `parkly-core` maps these
/// into user-facing variants.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials rejected or unusable.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The access token has expired (JWT `exp` in the past).
    #[error("Access token expired -- obtain a fresh token")]
    TokenExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Rate limited by the backend gateway.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Backend ─────────────────────────────────────────────────────
    /// Structured error from the REST layer (`{message, code, details, hint}`).
    #[error("Backend error (HTTP {status}): {message}")]
    Api {
        message: String,
        code: Option<String>,
        details: Option<String>,
        hint: Option<String>,
        status: u16,
    },

    /// A write asked for the affected row back but none was returned
    /// (filter matched nothing, or row-level security hid it).
    #[error("No rows returned from '{table}'")]
    EmptyResult { table: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } | Self::EmptyResult { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` for unique/exclusion constraint violations (SQLSTATE 23505 / 23P01).
    pub fn is_conflict(&self) -> bool {
        match self {
            Self::Api { status: 409, .. } => true,
            Self::Api { code, .. } => matches!(code.as_deref(), Some("23505" | "23P01")),
            _ => false,
        }
    }

    /// Extract the backend error code (SQLSTATE or PostgREST `PGRSTnnn`), if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
