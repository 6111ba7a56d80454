//! Cart and user session handed to the checkout
//!
//! Both are owned by the caller. The checkout reads them and, after a
//! successful order, clears the cart.

use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{CartItem, cart_subtotal};

/// Access to the shopping cart
pub trait CartHandle: Send + Sync {
    /// Snapshot of the current lines
    fn items(&self) -> Vec<CartItem>;

    fn increment(&self, id: i64);

    /// Decrementing a line at quantity 1 does nothing
    fn decrement(&self, id: i64);

    fn remove(&self, id: i64);

    fn clear(&self);

    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    fn subtotal(&self) -> Decimal {
        cart_subtotal(&self.items())
    }
}

/// Cart kept in memory
#[derive(Debug, Default)]
pub struct InMemoryCart {
    items: RwLock<Vec<CartItem>>,
}

impl InMemoryCart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Add a line, merging quantities for an existing product
    pub fn add(&self, item: CartItem) {
        let mut items = self.items.write();
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => existing.cantidad += item.cantidad.max(1),
            None => items.push(item),
        }
    }
}

impl CartHandle for InMemoryCart {
    fn items(&self) -> Vec<CartItem> {
        self.items.read().clone()
    }

    fn increment(&self, id: i64) {
        if let Some(item) = self.items.write().iter_mut().find(|i| i.id == id) {
            item.cantidad += 1;
        }
    }

    fn decrement(&self, id: i64) {
        if let Some(item) = self.items.write().iter_mut().find(|i| i.id == id)
            && item.cantidad > 1
        {
            item.cantidad -= 1;
        }
    }

    fn remove(&self, id: i64) {
        self.items.write().retain(|i| i.id != id);
    }

    fn clear(&self) {
        self.items.write().clear();
    }
}

/// Logged-in (or anonymous) shopper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: Option<i64>,
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub token: Option<String>,
}

impl UserSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(id: i64, token: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn with_profile(
        mut self,
        nombre: impl Into<String>,
        email: impl Into<String>,
        telefono: impl Into<String>,
    ) -> Self {
        self.nombre = Some(nombre.into());
        self.email = Some(email.into());
        self.telefono = Some(telefono.into());
        self
    }

    pub fn is_identified(&self) -> bool {
        self.id.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// `Authorization` header value
    pub fn auth_header(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {}", t))
    }
}
