//! Checkout steps
//!
//! Each step is its own type and only exposes the transitions it allows:
//! Shipping → Payment, Payment → Shipping, Payment → Confirmation.
//! Nothing outside this module can build a step out of thin air, so
//! Shipping → Confirmation is not expressible.

use shared::models::ConfirmedOrder;

pub const STEP_LABELS: [&str; 3] = ["Envío", "Pago", "Confirmación"];

#[derive(Debug, Clone, PartialEq)]
pub struct ShippingStep {
    _private: (),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentStep {
    _private: (),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationStep {
    order: ConfirmedOrder,
}

impl ShippingStep {
    pub fn advance(self) -> PaymentStep {
        PaymentStep { _private: () }
    }
}

impl PaymentStep {
    pub fn back(self) -> ShippingStep {
        ShippingStep { _private: () }
    }

    pub fn confirm(self, order: ConfirmedOrder) -> ConfirmationStep {
        ConfirmationStep { order }
    }
}

impl ConfirmationStep {
    pub fn order(&self) -> &ConfirmedOrder {
        &self.order
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutStep {
    Shipping(ShippingStep),
    Payment(PaymentStep),
    Confirmation(ConfirmationStep),
}

impl Default for CheckoutStep {
    fn default() -> Self {
        Self::start()
    }
}

impl CheckoutStep {
    pub fn start() -> Self {
        Self::Shipping(ShippingStep { _private: () })
    }

    /// A shopper coming back from the payment page left from Payment
    pub(crate) fn resumed_payment() -> Self {
        Self::Payment(PaymentStep { _private: () })
    }

    /// 1-based step number
    pub fn number(&self) -> u8 {
        match self {
            Self::Shipping(_) => 1,
            Self::Payment(_) => 2,
            Self::Confirmation(_) => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        STEP_LABELS[usize::from(self.number() - 1)]
    }

    pub fn order(&self) -> Option<&ConfirmedOrder> {
        match self {
            Self::Confirmation(step) => Some(step.order()),
            _ => None,
        }
    }

    pub fn is_shipping(&self) -> bool {
        matches!(self, Self::Shipping(_))
    }

    pub fn is_payment(&self) -> bool {
        matches!(self, Self::Payment(_))
    }

    pub fn is_confirmation(&self) -> bool {
        matches!(self, Self::Confirmation(_))
    }
}
