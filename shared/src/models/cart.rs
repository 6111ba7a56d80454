//! Cart Model

use crate::money::{PriceValue, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fallback label for cart lines without a name
pub const UNNAMED_PRODUCT: &str = "Producto sin nombre";

/// Cart line as kept by the cart provider
///
/// `precio` may be a number or a display string; see [`PriceValue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub precio: PriceValue,
    pub cantidad: u32,
    #[serde(default)]
    pub imagen: Option<String>,
}

impl CartItem {
    pub fn new(id: i64, nombre: impl Into<String>, precio: impl Into<PriceValue>, cantidad: u32) -> Self {
        Self {
            id,
            nombre: Some(nombre.into()),
            title: None,
            precio: precio.into(),
            cantidad: cantidad.max(1),
            imagen: None,
        }
    }

    /// `nombre`, then `title`, then the generic label
    pub fn display_name(&self) -> &str {
        [self.nombre.as_deref(), self.title.as_deref()]
            .into_iter()
            .flatten()
            .find(|n| !n.trim().is_empty())
            .unwrap_or(UNNAMED_PRODUCT)
    }

    pub fn unit_price(&self) -> Decimal {
        self.precio.to_decimal()
    }

    pub fn line_total(&self) -> Decimal {
        round_money(self.unit_price() * Decimal::from(self.cantidad))
    }
}

/// Sum of all line totals, rounded
pub fn cart_subtotal(items: &[CartItem]) -> Decimal {
    round_money(items.iter().map(|i| i.unit_price() * Decimal::from(i.cantidad)).sum())
}
