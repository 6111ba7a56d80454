//! Tienda Client - HTTP client for the storefront backend
//!
//! Provides network-based calls to the storefront REST API: checkout
//! reference data, order creation, payment preferences and the admin
//! back-office resources.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{AdminApi, CheckoutApi, StorefrontClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
