//! CLI configuration -- thin wrapper around `parkly_config`.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--backend, --api-key, --lot, ...).

use std::time::Duration;

use secrecy::SecretString;

use parkly_core::{AuthCredentials, BackendConfig, LotId, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use parkly_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

/// Everything a backend-bound command needs.
pub struct Resolved {
    pub backend: BackendConfig,
    pub lot: Option<LotId>,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build the backend settings from the config file, the active profile
/// and CLI overrides. Without a profile, `--backend` and `--api-key` must
/// both be given.
pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<Resolved, CliError> {
    let profile_name = active_profile_name(global, cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, &cfg.defaults, global);
    }

    // An explicitly named profile that does not exist is an error, not a
    // silent fallback to flags.
    if global.profile.is_some() && global.backend.is_none() {
        let names = cfg.profile_names();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if names.is_empty() {
                "(none)".into()
            } else {
                names.join(", ")
            },
        });
    }

    let url_str = global.backend.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let url = parkly_config::parse_backend_url(url_str)?;

    let Some(ref key) = global.api_key else {
        return Err(CliError::NoCredentials {
            profile: profile_name,
        });
    };

    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(Resolved {
        backend: BackendConfig {
            url,
            auth: AuthCredentials::ApiKey(SecretString::from(key.clone())),
            tls,
            timeout: Duration::from_secs(global.timeout),
        },
        lot: global.lot.map(LotId::new),
    })
}

/// Translate a `Profile` + global flags into backend settings.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<Resolved, CliError> {
    // 1. Backend URL (flag > env > profile)
    let url_str = global.backend.as_deref().unwrap_or(&profile.backend);
    let url = parkly_config::parse_backend_url(url_str)?;

    // 2. Credentials (flag key replaces the profile's key, token still applies)
    let auth = match global.api_key {
        Some(ref key) => {
            let api_key = SecretString::from(key.clone());
            match parkly_config::resolve_auth(profile, profile_name) {
                Ok(AuthCredentials::Session { access_token, .. }) => AuthCredentials::Session {
                    api_key,
                    access_token,
                },
                _ => AuthCredentials::ApiKey(api_key),
            }
        }
        None => parkly_config::resolve_auth(profile, profile_name)?,
    };

    // 3. TLS
    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        parkly_config::tls_for(profile, defaults)
    };

    // 4. Lot (flag > env > profile)
    let lot = global
        .lot
        .map(LotId::new)
        .or_else(|| parkly_config::profile_lot(profile));

    // 5. Timeout: an explicit flag wins, else the profile, else the flag default
    let timeout = profile
        .timeout
        .filter(|_| global.timeout == defaults.timeout)
        .unwrap_or(global.timeout);

    Ok(Resolved {
        backend: BackendConfig {
            url,
            auth,
            tls,
            timeout: Duration::from_secs(timeout),
        },
        lot,
    })
}
