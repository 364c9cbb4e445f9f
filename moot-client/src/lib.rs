//! HTTP client for the moot event-planning API.
//!
//! [`ApiClient`] is the transport: it attaches the bearer credential, decodes
//! JSON payloads and normalizes failures into [`ClientError`]. The operations
//! themselves are grouped into the [`api`] traits so that state containers can
//! be exercised against in-memory fakes.

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;

mod auth;
mod events;
mod users;

pub use api::{AuthApi, EventsApi, UsersApi};
pub use config::ClientConfig;
pub use credentials::{CredentialStore, JsonFileCredentials, MemoryCredentials, StoredSession};
pub use error::{ClientError, Result};
pub use http::ApiClient;
