//! Mercado Pago redirect
//!
//! Preference items and payer for `POST /api/pago`, the redirect URL
//! check, and parsing of the return query the provider sends back.

use super::context::UserSession;
use super::error::{CheckoutError, CheckoutResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::models::{CartItem, Payer, PayerPhone, PaymentStatus, PreferenceItem, PreferenceResponse};
use url::Url;

const DEFAULT_ITEM_TITLE: &str = "Producto";

/// Preference lines, one per cart line
///
/// Prices are read strictly: a price that is not a positive number fails
/// the whole preference.
pub fn prepare_items(cart: &[CartItem], currency_id: &str) -> CheckoutResult<Vec<PreferenceItem>> {
    if cart.is_empty() {
        return Err(CheckoutError::CartEmpty);
    }
    cart.iter()
        .map(|item| {
            let name = item.nombre.as_deref().unwrap_or_default();
            let price = item
                .precio
                .strict_decimal()
                .filter(|p| *p > Decimal::ZERO)
                .and_then(|p| p.to_f64())
                .ok_or_else(|| CheckoutError::InvalidPrice(name.to_string()))?;
            let title = if name.trim().is_empty() {
                DEFAULT_ITEM_TITLE.to_string()
            } else {
                name.to_string()
            };
            Ok(PreferenceItem {
                title,
                quantity: item.cantidad.max(1),
                unit_price: price,
                currency_id: currency_id.to_string(),
            })
        })
        .collect()
}

/// Payer block from the profile; `None` when nothing is known
pub fn prepare_payer(user: &UserSession) -> Option<Payer> {
    let known = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
    let payer = Payer {
        name: known(&user.nombre),
        email: known(&user.email),
        phone: known(&user.telefono).map(|number| PayerPhone { number }),
    };
    if payer == Payer::default() {
        None
    } else {
        Some(payer)
    }
}

/// URL to send the shopper to
pub fn checkout_url(response: &PreferenceResponse) -> CheckoutResult<String> {
    if !response.success {
        let message = response
            .message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "La respuesta no fue exitosa".to_string());
        return Err(CheckoutError::PreferenceRejected(message));
    }
    response
        .redirect_url()
        .map(str::to_string)
        .ok_or(CheckoutError::RedirectMissing)
}

/// Outcome carried by the return query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnStatus {
    Approved,
    Pending,
    Failure,
}

impl ReturnStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "approved" | "success" => Some(Self::Approved),
            "pending" | "in_process" => Some(Self::Pending),
            "failure" | "rejected" | "cancelled" => Some(Self::Failure),
            _ => None,
        }
    }

    pub fn payment_status(&self) -> PaymentStatus {
        match self {
            Self::Approved => PaymentStatus::Approved,
            Self::Pending => PaymentStatus::Pending,
            Self::Failure => PaymentStatus::Rejected,
        }
    }
}

/// Query parameters of the provider's return URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReturn {
    pub status: String,
    pub payment_id: Option<String>,
    pub preference_id: Option<String>,
}

impl PaymentReturn {
    /// Parse an absolute URL, a path with query, or a bare query string
    ///
    /// `None` unless `status` and at least one of `payment_id` /
    /// `preference_id` are present.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(_) => {
                let base = Url::parse("http://localhost/checkout").ok()?;
                let relative = if raw.starts_with('/') || raw.starts_with('?') {
                    raw.to_string()
                } else {
                    format!("?{}", raw)
                };
                base.join(&relative).ok()?
            }
        };

        let mut status = None;
        let mut payment_id = None;
        let mut preference_id = None;
        for (key, value) in url.query_pairs() {
            let value = Some(value.into_owned()).filter(|v| !v.is_empty() && v != "null");
            match key.as_ref() {
                "status" => status = value,
                "payment_id" => payment_id = value,
                "preference_id" => preference_id = value,
                _ => {}
            }
        }

        let status = status?;
        if payment_id.is_none() && preference_id.is_none() {
            return None;
        }
        Some(Self {
            status,
            payment_id,
            preference_id,
        })
    }

    pub fn outcome(&self) -> Option<ReturnStatus> {
        ReturnStatus::parse(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_items() {
        let cart = vec![
            CartItem::new(1, "Arroz", "4.50", 2),
            CartItem::new(2, "", 3.0, 1),
        ];
        let items = prepare_items(&cart, "PEN").unwrap();
        assert_eq!(items[0].title, "Arroz");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].unit_price, 4.5);
        assert_eq!(items[0].currency_id, "PEN");
        assert_eq!(items[1].title, "Producto");
    }

    #[test]
    fn test_prepare_items_rejects_bad_price() {
        let cart = vec![CartItem::new(1, "Leche", "gratis", 1)];
        let err = prepare_items(&cart, "PEN").unwrap_err();
        assert_eq!(err.to_string(), "Precio inválido para Leche");

        let cart = vec![CartItem::new(1, "Pan", 0.0, 1)];
        assert!(prepare_items(&cart, "PEN").is_err());

        assert!(matches!(prepare_items(&[], "PEN"), Err(CheckoutError::CartEmpty)));
    }

    #[test]
    fn test_prepare_payer() {
        assert_eq!(prepare_payer(&UserSession::anonymous()), None);
        let user = UserSession::new(1, "t").with_profile("Ana", "ana@correo.com", "987654321");
        let payer = prepare_payer(&user).unwrap();
        assert_eq!(payer.phone.unwrap().number, "987654321");
    }

    #[test]
    fn test_checkout_url() {
        let resp = PreferenceResponse {
            success: true,
            init_point: Some("https://mp/init".into()),
            sandbox_init_point: Some("https://mp/sandbox".into()),
            ..Default::default()
        };
        assert_eq!(checkout_url(&resp).unwrap(), "https://mp/sandbox");

        let resp = PreferenceResponse {
            success: true,
            ..Default::default()
        };
        assert!(matches!(checkout_url(&resp), Err(CheckoutError::RedirectMissing)));

        let resp = PreferenceResponse::default();
        assert_eq!(
            checkout_url(&resp).unwrap_err().to_string(),
            "La respuesta no fue exitosa"
        );
    }

    #[test]
    fn test_parse_return() {
        let ret = PaymentReturn::parse(
            "https://tienda.pe/checkout?status=approved&payment_id=123&preference_id=pref-1",
        )
        .unwrap();
        assert_eq!(ret.outcome(), Some(ReturnStatus::Approved));
        assert_eq!(ret.payment_id.as_deref(), Some("123"));

        let ret = PaymentReturn::parse("/checkout?status=pending&preference_id=p").unwrap();
        assert_eq!(ret.outcome(), Some(ReturnStatus::Pending));

        let ret = PaymentReturn::parse("status=failure&payment_id=9").unwrap();
        assert_eq!(ret.outcome(), Some(ReturnStatus::Failure));
    }

    #[test]
    fn test_parse_return_requires_status_and_id() {
        assert!(PaymentReturn::parse("/checkout?status=approved").is_none());
        assert!(PaymentReturn::parse("/checkout?payment_id=1").is_none());
        assert!(PaymentReturn::parse("/checkout?status=approved&payment_id=null").is_none());
        assert!(PaymentReturn::parse("/checkout").is_none());
    }
}
