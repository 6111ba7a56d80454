//! Payment status of a freshly created order

use shared::models::{OrderResponse, PaymentKind, PaymentMethod, PaymentStatus};

/// Status reported by the backend, or inferred from the payment method
///
/// The backend fields win. Without them: transfers and wallets are pending
/// (checked first, so a transfer name that also mentions a card stays
/// pending), cards and PayPal approved, the redirect provider takes the echoed
/// `status` (or the status it returned with), anything else is pending.
pub fn determine_payment_status(
    response: &OrderResponse,
    method: Option<&PaymentMethod>,
    returned: Option<PaymentStatus>,
) -> PaymentStatus {
    if let Some(status) = response.declared_payment_status() {
        return status;
    }
    let Some(method) = method else {
        return PaymentStatus::Pending;
    };
    if method.is_transfer() {
        return PaymentStatus::Pending;
    }
    let name = method.nombre.to_lowercase();

    match method.kind() {
        PaymentKind::Transfer => PaymentStatus::Pending,
        PaymentKind::Card => PaymentStatus::Approved,
        _ if name.contains("paypal") => PaymentStatus::Approved,
        PaymentKind::Redirect => response
            .provider_status()
            .or(returned)
            .unwrap_or(PaymentStatus::Pending),
        PaymentKind::Other => PaymentStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(nombre: &str) -> PaymentMethod {
        PaymentMethod {
            id: 1,
            nombre: nombre.into(),
            tipo: None,
            descripcion: None,
            comision: None,
            logo: None,
        }
    }

    fn response(json: &str) -> OrderResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_backend_status_wins() {
        let resp = response(r#"{"paymentStatus":"rejected"}"#);
        assert_eq!(
            determine_payment_status(&resp, Some(&method("Tarjeta")), None),
            PaymentStatus::Rejected
        );
        let resp = response(r#"{"payment_status":"approved"}"#);
        assert_eq!(
            determine_payment_status(&resp, Some(&method("Yape")), None),
            PaymentStatus::Approved
        );
    }

    #[test]
    fn test_name_fallback() {
        let resp = OrderResponse::default();
        let status = |name: &str| determine_payment_status(&resp, Some(&method(name)), None);
        assert_eq!(status("Transferencia bancaria"), PaymentStatus::Pending);
        assert_eq!(status("Plin"), PaymentStatus::Pending);
        assert_eq!(status("Tarjeta de crédito"), PaymentStatus::Approved);
        assert_eq!(status("PayPal"), PaymentStatus::Approved);
        assert_eq!(status("Efectivo"), PaymentStatus::Pending);
        assert_eq!(status("Transferencia con tarjeta"), PaymentStatus::Pending);
        assert_eq!(status("Yape o tarjeta"), PaymentStatus::Pending);
        assert_eq!(determine_payment_status(&resp, None, None), PaymentStatus::Pending);
    }

    #[test]
    fn test_redirect_provider() {
        let mp = method("Mercado Pago");
        let resp = response(r#"{"status":"approved"}"#);
        assert_eq!(determine_payment_status(&resp, Some(&mp), None), PaymentStatus::Approved);

        let resp = OrderResponse::default();
        assert_eq!(
            determine_payment_status(&resp, Some(&mp), Some(PaymentStatus::Approved)),
            PaymentStatus::Approved
        );
        assert_eq!(determine_payment_status(&resp, Some(&mp), None), PaymentStatus::Pending);
    }
}
