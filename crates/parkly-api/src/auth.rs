use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Credentials for the hosted backend.
///
/// Every request carries the project key in the `apikey` header. The bearer
/// token is either the same key (service access) or a user access token
/// obtained elsewhere; this crate never performs a sign-in flow itself.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Project API key used for both `apikey` and `Authorization`.
    ApiKey { key: SecretString },

    /// Project API key plus a pre-issued user access token (JWT).
    Session {
        api_key: SecretString,
        access_token: SecretString,
    },
}

impl Credentials {
    fn api_key(&self) -> &SecretString {
        match self {
            Self::ApiKey { key } => key,
            Self::Session { api_key, .. } => api_key,
        }
    }

    fn bearer(&self) -> &SecretString {
        match self {
            Self::ApiKey { key } => key,
            Self::Session { access_token, .. } => access_token,
        }
    }

    /// Build the default auth headers injected into every request.
    ///
    /// Both values are marked sensitive so they never show up in debug output.
    pub fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();

        let mut key = HeaderValue::from_str(self.api_key().expose_secret()).map_err(|e| {
            Error::Authentication {
                message: format!("invalid API key header value: {e}"),
            }
        })?;
        key.set_sensitive(true);
        headers.insert("apikey", key);

        let mut bearer =
            HeaderValue::from_str(&format!("Bearer {}", self.bearer().expose_secret())).map_err(
                |e| Error::Authentication {
                    message: format!("invalid bearer token header value: {e}"),
                },
            )?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        Ok(headers)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn api_key_is_used_as_bearer() {
        let creds = Credentials::ApiKey {
            key: SecretString::from("anon-key".to_string()),
        };
        let headers = creds.headers().unwrap();
        assert_eq!(headers["apikey"], "anon-key");
        assert_eq!(headers[AUTHORIZATION], "Bearer anon-key");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn session_uses_access_token_as_bearer() {
        let creds = Credentials::Session {
            api_key: SecretString::from("anon-key".to_string()),
            access_token: SecretString::from("jwt-token".to_string()),
        };
        let headers = creds.headers().unwrap();
        assert_eq!(headers["apikey"], "anon-key");
        assert_eq!(headers[AUTHORIZATION], "Bearer jwt-token");
    }

    #[test]
    fn rejects_header_breaking_key() {
        let creds = Credentials::ApiKey {
            key: SecretString::from("bad\nkey".to_string()),
        };
        assert!(matches!(
            creds.headers(),
            Err(Error::Authentication { .. })
        ));
    }
}
