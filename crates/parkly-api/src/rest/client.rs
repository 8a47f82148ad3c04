// REST HTTP client
//
// Wraps `reqwest::Client` with table-scoped URL construction, filter
// encoding and backend error decoding. Table-specific operations live in
// sibling modules as inherent methods to keep this file about transport.

use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::rest::query::Query;
use crate::transport::TransportConfig;

const REST_PREFIX: &str = "/rest/v1";
const PREFER_REPRESENTATION: &str = "return=representation";

/// Error body shape returned by the REST layer on 4xx/5xx.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// Async client for the backend's table endpoints.
///
/// Every method returns decoded rows; HTTP status handling and error-body
/// parsing happen before the caller sees anything.
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RestClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from credentials and a transport config.
    ///
    /// Injects `apikey` and `Authorization` as default headers. `base_url`
    /// is the project root (e.g. `https://abc.backend.example`); the
    /// `/rest/v1/` prefix is appended unless already present.
    pub fn new(
        base_url: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_headers(credentials.headers()?)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with `/rest/v1/` so table names join cleanly.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with(REST_PREFIX) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}{REST_PREFIX}/"));
        }

        Ok(url)
    }

    fn url(&self, table: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(table)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// `GET /{table}?select=...&filters` returning all matching rows.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, Error> {
        let url = self.url(table)?;
        let params = query.to_params();
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(&params).send().await?;
        handle_response(resp).await
    }

    /// `GET` expecting zero or one row.
    pub(crate) async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: Query,
    ) -> Result<Option<T>, Error> {
        let mut rows: Vec<T> = self.select(table, &query.limit(1)).await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    /// `POST /{table}` returning the inserted row.
    pub(crate) async fn insert<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(table)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(body)
            .send()
            .await?;
        let rows: Vec<T> = handle_response(resp).await?;
        first_row(rows, table)
    }

    /// `PATCH /{table}?filters` returning every updated row.
    pub(crate) async fn update<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        table: &str,
        query: &Query,
        body: &B,
    ) -> Result<Vec<T>, Error> {
        let url = self.url(table)?;
        let params = query.filter_params();
        debug!("PATCH {url} params={params:?}");

        let resp = self
            .http
            .patch(url)
            .query(&params)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(body)
            .send()
            .await?;
        handle_response(resp).await
    }

    /// `PATCH` that must touch exactly one row (by primary key).
    pub(crate) async fn update_one<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        table: &str,
        query: &Query,
        body: &B,
    ) -> Result<T, Error> {
        let rows = self.update(table, query, body).await?;
        first_row(rows, table)
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        return Err(Error::RateLimited { retry_after_secs });
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(decode_error(status, &body));
    }

    let body = resp.text().await?;
    trace!(len = body.len(), "response body received");

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body,
    })
}

fn first_row<T>(mut rows: Vec<T>, table: &str) -> Result<T, Error> {
    if rows.is_empty() {
        return Err(Error::EmptyResult {
            table: table.to_owned(),
        });
    }
    Ok(rows.swap_remove(0))
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

/// Map a non-2xx response into the matching error variant.
fn decode_error(status: StatusCode, body: &str) -> Error {
    let parsed = serde_json::from_str::<ErrorResponse>(body).ok();

    if status == StatusCode::UNAUTHORIZED {
        let message = parsed
            .and_then(|p| p.message)
            .unwrap_or_else(|| "invalid API key or access token".into());
        if message.contains("JWT expired") {
            return Error::TokenExpired;
        }
        return Error::Authentication { message };
    }

    match parsed {
        Some(err) => Error::Api {
            message: err
                .message
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            code: err.code,
            details: err.details,
            hint: err.hint,
            status: status.as_u16(),
        },
        None => Error::Api {
            message: format!("HTTP {status}: {}", preview(body)),
            code: None,
            details: None,
            hint: None,
            status: status.as_u16(),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_rest_prefix() {
        let url = RestClient::normalize_base_url("https://abc.example.com").unwrap();
        assert_eq!(url.as_str(), "https://abc.example.com/rest/v1/");
    }

    #[test]
    fn base_url_keeps_existing_prefix() {
        let url = RestClient::normalize_base_url("https://abc.example.com/rest/v1/").unwrap();
        assert_eq!(url.as_str(), "https://abc.example.com/rest/v1/");
    }

    #[test]
    fn base_url_with_subpath() {
        let url = RestClient::normalize_base_url("http://localhost:54321/proxy").unwrap();
        assert_eq!(url.as_str(), "http://localhost:54321/proxy/rest/v1/");
    }

    #[test]
    fn decode_error_reads_structured_body() {
        let body = r#"{"message":"duplicate key value","code":"23505","details":null,"hint":null}"#;
        let err = decode_error(StatusCode::CONFLICT, body);
        assert!(err.is_conflict());
        assert_eq!(err.api_error_code(), Some("23505"));
    }

    #[test]
    fn decode_error_detects_expired_token() {
        let body = r#"{"message":"JWT expired","code":"PGRST301"}"#;
        assert!(matches!(
            decode_error(StatusCode::UNAUTHORIZED, body),
            Error::TokenExpired
        ));
    }

    #[test]
    fn decode_error_falls_back_to_body_preview() {
        let err = decode_error(StatusCode::BAD_GATEWAY, "upstream down");
        match err {
            Error::Api {
                message, status, ..
            } => {
                assert_eq!(status, 502);
                assert!(message.contains("upstream down"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
