// ── Core error types ──
//
// User-facing errors from parkly-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<parkly_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

use crate::model::{LotId, PeriodType, ReservationStatus, TariffTarget};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Backend request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    #[error("No {period} tariff configured for {target} in lot {lot}")]
    TariffNotFound {
        lot: LotId,
        target: TariffTarget,
        period: PeriodType,
    },

    // ── Validation errors ────────────────────────────────────────────
    #[error("Invalid period '{tag}'")]
    InvalidPeriod { tag: String },

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Date out of range: {message}")]
    DateOutOfRange { message: String },

    #[error("Amount too large: {message}")]
    AmountOverflow { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Cannot move reservation from {from} to {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// A multi-step write stopped after some steps were stored.
    #[error("Partially applied: {message}")]
    PartialWrite { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Backend error code (SQLSTATE or `PGRSTnnn`).
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn not_found(entity_type: &'static str, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            identifier: identifier.to_string(),
        }
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<parkly_api::Error> for CoreError {
    fn from(err: parkly_api::Error) -> Self {
        let conflict = err.is_conflict();
        match err {
            parkly_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            parkly_api::Error::TokenExpired => CoreError::AuthenticationFailed {
                message: "Access token expired -- sign in again".into(),
            },
            parkly_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e.url().map(ToString::to_string).unwrap_or_default(),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            parkly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid backend URL: {e}"),
            },
            parkly_api::Error::Tls(reason) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {reason}"),
            },
            parkly_api::Error::RateLimited { retry_after_secs } => CoreError::Api {
                message: format!("Rate limited -- retry after {retry_after_secs}s"),
                code: Some("rate_limited".into()),
                status: Some(429),
            },
            parkly_api::Error::Api {
                message,
                details,
                ..
            } if conflict => CoreError::Conflict {
                message: match details {
                    Some(details) => format!("{message} ({details})"),
                    None => message,
                },
            },
            parkly_api::Error::Api {
                message,
                code,
                status,
                ..
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            parkly_api::Error::EmptyResult { table } => CoreError::NotFound {
                entity_type: "row",
                identifier: format!("no matching row in '{table}'"),
            },
            parkly_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_becomes_conflict() {
        let api = parkly_api::Error::Api {
            message: "duplicate key value".into(),
            code: Some("23505".into()),
            details: None,
            hint: None,
            status: 409,
        };
        assert!(matches!(CoreError::from(api), CoreError::Conflict { .. }));
    }

    #[test]
    fn expired_token_is_auth_failure() {
        assert!(matches!(
            CoreError::from(parkly_api::Error::TokenExpired),
            CoreError::AuthenticationFailed { .. }
        ));
    }

    #[test]
    fn tariff_not_found_message() {
        let err = CoreError::TariffNotFound {
            lot: LotId::new(3),
            target: TariffTarget::Template(9),
            period: PeriodType::Hour,
        };
        assert_eq!(
            err.to_string(),
            "No hour tariff configured for template 9 in lot 3"
        );
    }
}
