//! Storefront REST API
//!
//! [`CheckoutApi`] covers what the checkout needs, [`AdminApi`] the
//! back-office resources. [`StorefrontClient`] implements both over a
//! [`NetworkHttpClient`](crate::NetworkHttpClient).

mod admin;
mod checkout;

pub use admin::AdminApi;
pub use checkout::CheckoutApi;

use crate::{ClientConfig, ClientResult, NetworkHttpClient};

/// Client for the storefront backend
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: NetworkHttpClient,
}

impl StorefrontClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: NetworkHttpClient::new(config)?,
        })
    }

    pub fn from_http(http: NetworkHttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &NetworkHttpClient {
        &self.http
    }

    /// HTTP client carrying `token`, falling back to the configured one
    fn authed(&self, token: Option<&str>) -> NetworkHttpClient {
        match token {
            Some(_) => self.http.with_token(token),
            None => self.http.clone(),
        }
    }
}
