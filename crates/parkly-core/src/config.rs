// ── Runtime backend configuration ──
//
// These types describe *how* to reach the hosted backend. They carry
// credential data and connection tuning, but never touch disk: the CLI
// builds a `BackendConfig` from its profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Credentials sent with every request.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Project API key, used as both `apikey` and bearer token.
    ApiKey(SecretString),
    /// Project API key plus a user access token (JWT) for the bearer.
    Session {
        api_key: SecretString,
        access_token: SecretString,
    },
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default for hosted backends.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local development stacks with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to one backend project.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project URL (e.g., `https://abc.backend.example`).
    pub url: Url,
    pub auth: AuthCredentials,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(url: Url, auth: AuthCredentials) -> Self {
        Self {
            url,
            auth,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl From<&AuthCredentials> for parkly_api::Credentials {
    fn from(auth: &AuthCredentials) -> Self {
        match auth {
            AuthCredentials::ApiKey(key) => Self::ApiKey { key: key.clone() },
            AuthCredentials::Session {
                api_key,
                access_token,
            } => Self::Session {
                api_key: api_key.clone(),
                access_token: access_token.clone(),
            },
        }
    }
}

impl From<&TlsVerification> for parkly_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}
