//! Data models
//!
//! Wire types for the storefront REST API. Field names follow the backend
//! (Spanish, camelCase on the wire). All IDs are `i64`.

pub mod address;
pub mod cart;
pub mod category;
pub mod order;
pub mod order_status;
pub mod payment;
pub mod product;
pub mod user;

// Re-exports
pub use address::*;
pub use cart::*;
pub use category::*;
pub use order::*;
pub use order_status::*;
pub use payment::*;
pub use product::*;
pub use user::*;
