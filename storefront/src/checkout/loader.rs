//! Checkout reference data
//!
//! Payment methods, saved cards and saved addresses. Failures never reach
//! the shopper: they are logged and the collection stays empty.

use super::context::UserSession;
use shared::models::{PaymentMethod, SavedAddress, SavedCard};
use std::sync::Arc;
use tienda_client::{CheckoutApi, ClientError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutData {
    pub payment_methods: Vec<PaymentMethod>,
    pub saved_cards: Vec<SavedCard>,
    pub saved_addresses: Vec<SavedAddress>,
}

impl CheckoutData {
    pub fn method(&self, id: i64) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|m| m.id == id)
    }

    pub fn card(&self, id: i64) -> Option<&SavedCard> {
        self.saved_cards.iter().find(|c| c.id == id)
    }

    pub fn address(&self, id: i64) -> Option<&SavedAddress> {
        self.saved_addresses.iter().find(|a| a.id == id)
    }
}

pub struct CheckoutDataLoader {
    api: Arc<dyn CheckoutApi>,
}

impl CheckoutDataLoader {
    pub fn new(api: Arc<dyn CheckoutApi>) -> Self {
        Self { api }
    }

    /// Payment methods always; cards and addresses once the user is known
    pub async fn load(&self, user: &UserSession) -> CheckoutData {
        let payment_methods = match self.api.fetch_payment_methods().await {
            Ok(methods) => methods,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load payment methods");
                Vec::new()
            }
        };
        let mut data = CheckoutData {
            payment_methods,
            ..Default::default()
        };
        self.reload_saved(user, &mut data).await;
        data
    }

    /// Refresh saved cards and addresses (identity became available)
    pub async fn reload_saved(&self, user: &UserSession, data: &mut CheckoutData) {
        let Some(user_id) = user.id else {
            data.saved_cards.clear();
            data.saved_addresses.clear();
            return;
        };
        let token = user.token();

        data.saved_cards = degrade(
            "saved cards",
            self.api.fetch_user_cards(user_id, token).await,
        );
        data.saved_addresses = degrade(
            "saved addresses",
            self.api.fetch_user_addresses(user_id, token).await,
        );
    }
}

fn degrade<T>(what: &str, result: Result<Vec<T>, ClientError>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) if e.is_not_found() => {
            tracing::info!("Feature unavailable: {what} endpoint returned 404");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load {what}");
            Vec::new()
        }
    }
}
