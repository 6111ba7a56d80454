//! Checkout workflow
//!
//! Shipping → Payment → Confirmation, driven by [`Checkout`].

pub mod assembly;
pub mod context;
pub mod error;
pub mod form;
pub mod formatters;
pub mod loader;
pub mod navigator;
pub mod orchestrator;
pub mod payment;
pub mod payment_status;
pub mod session;
pub mod step;
pub mod totals;
pub mod validation;
pub mod views;

pub use context::{CartHandle, InMemoryCart, UserSession};
pub use error::{CheckoutError, CheckoutFailure, CheckoutResult};
pub use form::{AddressChoice, CardInfo, CheckoutForm, CheckoutFormData, DeliveryType, PaymentChoice};
pub use loader::{CheckoutData, CheckoutDataLoader};
pub use navigator::{LogNavigator, Navigation, Navigator, RecordingNavigator};
pub use orchestrator::{Banner, BannerKind, Checkout, NextOutcome, ReturnOutcome};
pub use payment::{PaymentReturn, ReturnStatus};
pub use session::{
    FilePaymentSessionStore, MemoryPaymentSessionStore, PaymentSession, PaymentSessionState,
    PaymentSessionStore, SessionStoreError,
};
pub use step::{CheckoutStep, ConfirmationStep, PaymentStep, ShippingStep};
pub use totals::{Pricing, Totals};
pub use validation::Field;
