//! Order totals
//!
//! `shipping = 0` for store pickup, the configured cost otherwise;
//! `taxes = round(subtotal × rate, 2)`; `total = round(sum, 2)`.

use super::form::DeliveryType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{CartItem, OrderSummary, cart_subtotal};
use shared::money::round_money;

/// Pricing knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub shipping_cost: Decimal,
    pub tax_rate: Decimal,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            shipping_cost: Decimal::new(999, 2),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub taxes: Decimal,
    pub total: Decimal,
}

impl Totals {
    pub fn compute(items: &[CartItem], delivery: DeliveryType, pricing: &Pricing) -> Self {
        Self::from_subtotal(cart_subtotal(items), delivery, pricing)
    }

    pub fn from_subtotal(subtotal: Decimal, delivery: DeliveryType, pricing: &Pricing) -> Self {
        let shipping_cost = match delivery {
            DeliveryType::Pickup => Decimal::ZERO,
            DeliveryType::Delivery => pricing.shipping_cost,
        };
        let taxes = round_money(subtotal * pricing.tax_rate);
        Self {
            subtotal,
            shipping_cost,
            taxes,
            total: round_money(subtotal + shipping_cost + taxes),
        }
    }
}

impl From<Totals> for OrderSummary {
    fn from(t: Totals) -> Self {
        OrderSummary {
            subtotal: t.subtotal,
            shipping_cost: t.shipping_cost,
            taxes: t.taxes,
            total: t.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_pickup_has_no_shipping() {
        let items = vec![CartItem::new(1, "A", "10.50", 2)];
        let t = Totals::compute(&items, DeliveryType::Pickup, &Pricing::default());
        assert_eq!(t.subtotal, d("21.00"));
        assert_eq!(t.shipping_cost, Decimal::ZERO);
        assert_eq!(t.taxes, d("1.68"));
        assert_eq!(t.total, d("22.68"));
    }

    #[test]
    fn test_display_price_strings() {
        let items = vec![CartItem::new(1, "Arroz", "S/. 10.50", 2)];
        let t = Totals::compute(&items, DeliveryType::Pickup, &Pricing::default());
        assert_eq!(t.subtotal, d("21.00"));
        assert_eq!(t.taxes, d("1.68"));
        assert_eq!(t.total, d("22.68"));
    }

    #[test]
    fn test_delivery_adds_shipping() {
        let t = Totals::from_subtotal(d("100"), DeliveryType::Delivery, &Pricing::default());
        assert_eq!(t.shipping_cost, d("9.99"));
        assert_eq!(t.taxes, d("8.00"));
        assert_eq!(t.total, d("117.99"));
    }

    #[test]
    fn test_tax_rounding_half_away_from_zero() {
        // 0.0625 * 0.08 = 0.005 -> 0.01
        let t = Totals::from_subtotal(d("0.0625"), DeliveryType::Pickup, &Pricing::default());
        assert_eq!(t.taxes, d("0.01"));
    }

    #[test]
    fn test_empty_cart() {
        let t = Totals::compute(&[], DeliveryType::Delivery, &Pricing::default());
        assert_eq!(t.subtotal, Decimal::ZERO);
        assert_eq!(t.total, d("9.99"));
    }
}
