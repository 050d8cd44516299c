//! Client library for the Onix backend.
//!
//! The backend exposes a GraphQL API over HTTP. [`OnixClient`] speaks it and
//! implements [`OnixApi`], the seam the dashboard is written against.

pub mod api;
pub mod config;
pub mod error;
pub mod graphql;
pub mod http;

pub use api::{OnixApi, ServerInfo};
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use error::ClientError;
pub use http::OnixClient;
