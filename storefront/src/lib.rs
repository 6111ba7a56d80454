//! Tienda storefront
//!
//! Checkout workflow (shipping, payment, confirmation and the external
//! payment round trip) and the back-office validators.

pub mod admin;
pub mod checkout;
pub mod config;
pub mod logger;
pub mod util;

pub use config::Config;
