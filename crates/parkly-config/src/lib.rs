//! Shared configuration for the parkly CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to `parkly_core::BackendConfig`. The CLI adds flag-aware
//! wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use parkly_core::{AuthCredentials, BackendConfig, LotId, TlsVerification};

/// Service name under which secrets are stored in the system keyring.
pub const KEYRING_SERVICE: &str = "parkly";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name of the active profile: explicit choice, else the configured
    /// default, else `"default"`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Profile names, sorted for display.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Backend project URL (e.g., "https://abc.backend.example").
    pub backend: String,

    /// Lot to operate on when `--lot` is not given.
    pub lot: Option<i64>,

    /// Project API key (plaintext -- prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// User access token (JWT) sent as bearer instead of the API key.
    pub access_token: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "parkly", "parkly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("parkly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit file, layered as defaults → file → env.
///
/// Environment keys use `PARKLY_` and `__` as the nesting separator, e.g.
/// `PARKLY_DEFAULTS__TIMEOUT=60` or `PARKLY_PROFILES__DEFAULT__LOT=2`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PARKLY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

// ── Keyring ─────────────────────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/api-key"),
    )?)
}

/// Store a profile's API key in the system keyring.
pub fn store_api_key(profile_name: &str, key: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(key)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve an API key from the credential chain (no CLI flag step).
///
/// Order: the profile's `api_key_env` variable, the system keyring, then
/// the plaintext `api_key` field.
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's api_key_env → env var lookup
    if let Some(ref env_name) = profile.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve `AuthCredentials`: API key alone, or API key plus access token
/// (from `PARKLY_ACCESS_TOKEN` or the profile) when one is available.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthCredentials, ConfigError> {
    let api_key = resolve_api_key(profile, profile_name)?;
    let access_token = std::env::var("PARKLY_ACCESS_TOKEN")
        .ok()
        .or_else(|| profile.access_token.clone())
        .filter(|t| !t.trim().is_empty());

    Ok(match access_token {
        Some(token) => AuthCredentials::Session {
            api_key,
            access_token: SecretString::from(token),
        },
        None => AuthCredentials::ApiKey(api_key),
    })
}

/// Parse and validate a backend URL.
pub fn parse_backend_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "backend".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "backend".into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}

/// TLS strategy for a profile. Hosted backends use the system store.
pub fn tls_for(profile: &Profile, defaults: &Defaults) -> TlsVerification {
    if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    }
}

/// The profile's default lot, if set.
pub fn profile_lot(profile: &Profile) -> Option<LotId> {
    profile.lot.map(LotId::new)
}

/// Build a `BackendConfig` from a profile -- no CLI flag overrides.
pub fn profile_to_backend_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<BackendConfig, ConfigError> {
    let url = parse_backend_url(&profile.backend)?;
    let auth = resolve_auth(profile, profile_name)?;

    Ok(BackendConfig {
        url,
        auth,
        tls: tls_for(profile, defaults),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile(backend: &str) -> Profile {
        Profile {
            backend: backend.into(),
            lot: Some(3),
            api_key: Some("plain-key".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.timeout, 30);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.default_profile = Some("north".into());
        cfg.profiles
            .insert("north".into(), profile("https://north.backend.example"));
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("north"));
        let north = &loaded.profiles["north"];
        assert_eq!(north.backend, "https://north.backend.example");
        assert_eq!(north.lot, Some(3));
    }

    #[test]
    fn reads_handwritten_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "centro"

[defaults]
output = "json"

[profiles.centro]
backend = "https://centro.backend.example"
lot = 7
api_key_env = "CENTRO_KEY"
timeout = 5
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");
        let centro = &cfg.profiles["centro"];
        assert_eq!(profile_lot(centro), Some(LotId::new(7)));
        assert_eq!(centro.timeout, Some(5));
        assert_eq!(cfg.profile_names(), vec!["centro"]);
    }

    #[test]
    fn active_profile_prefers_explicit_name() {
        let cfg = Config::default();
        assert_eq!(cfg.active_profile_name(Some("west")), "west");
        assert_eq!(cfg.active_profile_name(None), "default");
    }

    #[test]
    fn backend_url_must_be_http() {
        assert!(parse_backend_url("https://abc.backend.example").is_ok());
        assert!(matches!(
            parse_backend_url("ftp://abc.backend.example"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            parse_backend_url("not a url"),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn tls_strategy() {
        let defaults = Defaults::default();
        let mut p = profile("https://x.example");
        assert_eq!(tls_for(&p, &defaults), TlsVerification::SystemDefaults);

        p.ca_cert = Some(PathBuf::from("/etc/ca.pem"));
        assert_eq!(
            tls_for(&p, &defaults),
            TlsVerification::CustomCa(PathBuf::from("/etc/ca.pem"))
        );

        p.insecure = Some(true);
        assert_eq!(tls_for(&p, &defaults), TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn profile_timeout_overrides_default() {
        let mut p = profile("https://x.example");
        p.timeout = Some(12);
        let cfg = profile_to_backend_config(&p, "parkly-config-test", &Defaults::default()).unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(12));
        assert_eq!(cfg.url.as_str(), "https://x.example/");
    }
}
