//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and a distinct process exit code.

use miette::Diagnostic;
use thiserror::Error;

use parkly_config::ConfigError;
use parkly_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to backend at {url}")]
    #[diagnostic(
        code(parkly::connection_failed),
        help(
            "Check the backend URL and your network connection.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(parkly::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(parkly::auth_failed),
        help(
            "Verify the API key (and access token, if the profile uses one).\n\
             Store a new key with: parkly config set-key"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(parkly::no_credentials),
        help(
            "Configure credentials with: parkly config init\n\
             Or set the PARKLY_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(parkly::not_found),
        help("Run: parkly {list_command}")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{message}")]
    #[diagnostic(
        code(parkly::no_tariff),
        help(
            "Every priced stay needs a tariff row for its template or segment.\n\
             Run: parkly tariffs list"
        )
    )]
    NoTariff { message: String },

    #[error("Conflict: {message}")]
    #[diagnostic(code(parkly::conflict))]
    Conflict { message: String },

    #[error("Reservation cannot move from '{from}' to '{to}'")]
    #[diagnostic(
        code(parkly::invalid_transition),
        help("Only pending or confirmed reservations can be cancelled.")
    )]
    InvalidTransition { from: String, to: String },

    #[error("Operation only partly applied: {message}")]
    #[diagnostic(
        code(parkly::partial_write),
        help(
            "Some records were written before the failure.\n\
             Check with: parkly payments list and parkly vehicles list"
        )
    )]
    PartialWrite { message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error ({code}): {message}")]
    #[diagnostic(code(parkly::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(parkly::validation))]
    Validation { field: String, reason: String },

    #[error("No parking lot selected")]
    #[diagnostic(
        code(parkly::no_lot),
        help(
            "Pass --lot <ID>, set PARKLY_LOT, or run: parkly config set lot <ID>\n\
             List lots with: parkly lots list"
        )
    )]
    NoLot,

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(parkly::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: parkly config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(parkly::no_config),
        help(
            "Create one with: parkly config init\n\
             Or pass --backend and --api-key.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(parkly::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(parkly::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / internal ────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(parkly::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::NoTariff { .. } | Self::ProfileNotFound { .. } => {
                exit_code::NOT_FOUND
            }
            Self::Conflict { .. } | Self::InvalidTransition { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NoLot | Self::NonInteractiveRequiresYes { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

/// The list command that shows entities of a kind reported by `NotFound`.
fn list_command_for(entity_type: &str) -> &'static str {
    match entity_type {
        "Lot" => "lots list",
        "Space" => "spaces list",
        "Open occupancy" => "vehicles list",
        "Subscription" => "subscriptions list",
        "Reservation" => "reservations list",
        _ => "--help",
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: list_command_for(entity_type).into(),
                resource_type: entity_type.into(),
                identifier,
            },

            err @ CoreError::TariffNotFound { .. } => CliError::NoTariff {
                message: err.to_string(),
            },

            CoreError::InvalidPeriod { tag } => CliError::Validation {
                field: "period".into(),
                reason: format!("unknown period '{tag}'"),
            },

            CoreError::InvalidQuantity => CliError::Validation {
                field: "quantity".into(),
                reason: "must be at least 1".into(),
            },

            CoreError::DateOutOfRange { message } => CliError::Validation {
                field: "date".into(),
                reason: message,
            },

            CoreError::AmountOverflow { message } => CliError::Validation {
                field: "amount".into(),
                reason: format!("{message} is too large to represent"),
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::InvalidTransition { from, to } => CliError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            },

            CoreError::Conflict { message } => CliError::Conflict { message },

            CoreError::PartialWrite { message } => CliError::PartialWrite { message },

            CoreError::Api {
                message,
                code,
                status,
            } => CliError::ApiError {
                code: code
                    .or_else(|| status.map(|s| s.to_string()))
                    .unwrap_or_default(),
                message,
            },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: "(none)".into(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use parkly_core::{LotId, PeriodType, ReservationStatus, TariffTarget, VehicleSegment};

    use super::*;

    #[test]
    fn tariff_not_found_is_a_not_found_exit() {
        let err = CliError::from(CoreError::TariffNotFound {
            lot: LotId::new(1),
            target: TariffTarget::Segment(VehicleSegment::Car),
            period: PeriodType::Hour,
        });
        assert!(matches!(err, CliError::NoTariff { .. }));
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }

    #[test]
    fn conflicts_and_transitions_share_exit_code() {
        let conflict = CliError::from(CoreError::Conflict {
            message: "space 4 is occupied".into(),
        });
        let transition = CliError::from(CoreError::InvalidTransition {
            from: ReservationStatus::Active,
            to: ReservationStatus::Cancelled,
        });
        assert_eq!(conflict.exit_code(), exit_code::CONFLICT);
        assert_eq!(transition.exit_code(), exit_code::CONFLICT);
    }

    #[test]
    fn not_found_points_at_list_command() {
        let err = CliError::from(CoreError::NotFound {
            entity_type: "Open occupancy",
            identifier: "AB123CD".into(),
        });
        match err {
            CliError::NotFound { list_command, .. } => assert_eq!(list_command, "vehicles list"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn validation_errors_are_usage_errors() {
        assert_eq!(
            CliError::from(CoreError::InvalidQuantity).exit_code(),
            exit_code::USAGE
        );
        assert_eq!(
            CliError::from(CoreError::AmountOverflow {
                message: "2 x 1".into()
            })
            .exit_code(),
            exit_code::USAGE
        );
        assert_eq!(CliError::NoLot.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn api_error_falls_back_to_status_code() {
        let err = CliError::from(CoreError::Api {
            message: "rate limited".into(),
            code: None,
            status: Some(429),
        });
        assert!(err.to_string().contains("(429)"));
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
