// parkly-api: Async Rust client for the parkly hosted backend (PostgREST-style REST)

pub mod auth;
pub mod error;
pub mod rest;
pub mod transport;

pub use auth::Credentials;
pub use error::Error;
pub use rest::client::RestClient;
pub use rest::models;
pub use rest::query::Query;
pub use rest::tariffs::TariffFilter;
pub use transport::{TlsMode, TransportConfig};
