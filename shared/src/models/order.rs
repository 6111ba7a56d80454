//! Order Model
//!
//! [`OrderDraft`] is what the checkout posts to `/api/pedidos`,
//! [`OrderResponse`] is the loosely-shaped answer, and [`ConfirmedOrder`] is
//! the normalized record shown on the confirmation step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default order status when the backend omits one
pub const DEFAULT_ORDER_STATUS: &str = "PENDIENTE";

/// Line of an order draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDraft {
    pub producto_id: i64,
    pub cantidad: u32,
}

/// Masked saved-card metadata attached to a draft (no PAN, no CVV)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardReference {
    pub tarjeta_id: i64,
    pub tipo_tarjeta: Option<String>,
    pub numero_enmascarado: Option<String>,
    pub fecha_vencimiento: Option<String>,
    pub nombre_en_tarjeta: Option<String>,
}

/// Order draft (`POST /api/pedidos` body)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub usuario_id: Option<i64>,
    pub direccion_envio: String,
    pub metodo_pago_id: Option<i64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub monto_total: Decimal,
    pub detalles: Vec<OrderLineDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarjeta_info: Option<CardReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nombre: Option<String>,
}

/// Line detail as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub cantidad: Option<u32>,
    #[serde(default)]
    pub precio: Option<f64>,
    #[serde(default)]
    pub subtotal: Option<f64>,
    #[serde(default)]
    pub producto: Option<NamedRef>,
    #[serde(default)]
    pub producto_id: Option<i64>,
}

/// Backend answer to an order creation
///
/// Every field is optional; the backend has shipped several shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    #[serde(default, rename = "pedidoId")]
    pub pedido_id: Option<i64>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, rename = "montoTotal")]
    pub monto_total: Option<f64>,
    #[serde(default, rename = "direccionEnvio")]
    pub direccion_envio: Option<String>,
    /// Plain string or `{ "nombre": ... }`
    #[serde(default)]
    pub estado: Option<Value>,
    #[serde(default, rename = "paymentStatus")]
    pub payment_status: Option<String>,
    #[serde(default, rename = "payment_status")]
    pub payment_status_snake: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "metodoPago")]
    pub metodo_pago: Option<NamedRef>,
    #[serde(default, rename = "detallesPedidos")]
    pub detalles_pedidos: Vec<OrderDetailResponse>,
}

impl OrderResponse {
    /// `pedidoId`, else `id`
    pub fn order_id(&self) -> Option<i64> {
        self.pedido_id.or(self.id)
    }

    pub fn estado_label(&self) -> Option<String> {
        match self.estado.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Object(map) => map
                .get("nombre")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }

    /// Backend-declared payment status (`paymentStatus`, then `payment_status`)
    pub fn declared_payment_status(&self) -> Option<PaymentStatus> {
        [&self.payment_status, &self.payment_status_snake]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .find_map(PaymentStatus::parse)
    }

    /// Provider status echoed in `status` (external payments only)
    pub fn provider_status(&self) -> Option<PaymentStatus> {
        self.status.as_deref().and_then(PaymentStatus::parse)
    }
}

/// Payment status shown to the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Approved,
    Pending,
    InProcess,
    Rejected,
    Cancelled,
    Refunded,
}

impl PaymentStatus {
    /// Parse provider/backend spellings (English and Spanish)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "approved" | "aprobado" | "success" | "pagado" => Some(Self::Approved),
            "pending" | "pendiente" => Some(Self::Pending),
            "in_process" | "en_proceso" => Some(Self::InProcess),
            "rejected" | "rechazado" | "failure" => Some(Self::Rejected),
            "cancelled" | "cancelado" => Some(Self::Cancelled),
            "refunded" | "reembolsado" => Some(Self::Refunded),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Approved => "Aprobado",
            Self::Pending => "Pendiente de confirmación",
            Self::InProcess => "En proceso",
            Self::Rejected => "Rechazado",
            Self::Cancelled => "Cancelado",
            Self::Refunded => "Reembolsado",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Approved => "#10b981",
            Self::Pending => "#f59e0b",
            Self::InProcess => "#3b82f6",
            Self::Rejected => "#ef4444",
            Self::Cancelled => "#6b7280",
            Self::Refunded => "#8b5cf6",
        }
    }
}

/// Normalized line of a confirmed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    pub cantidad: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    pub producto: NamedRef,
}

/// Totals block of a confirmed order
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxes: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Order as displayed on the confirmation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedOrder {
    pub id: Option<i64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub monto_total: Decimal,
    pub direccion_envio: String,
    pub estado: String,
    pub estado_pago: PaymentStatus,
    pub metodo_pago: NamedRef,
    pub detalles: Vec<OrderLine>,
    pub resumen: OrderSummary,
}

impl ConfirmedOrder {
    /// `#123`, or `#—` while the backend has not assigned an id
    pub fn number(&self) -> String {
        match self.id {
            Some(id) => format!("#{}", id),
            None => "#—".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_serializes_camel_case_float_total() {
        let draft = OrderDraft {
            usuario_id: Some(5),
            direccion_envio: "Recojo en tienda".into(),
            metodo_pago_id: Some(2),
            monto_total: "22.68".parse().unwrap(),
            detalles: vec![OrderLineDraft { producto_id: 1, cantidad: 2 }],
            tarjeta_info: None,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["usuarioId"], 5);
        assert_eq!(json["montoTotal"], 22.68);
        assert_eq!(json["detalles"][0]["productoId"], 1);
        assert!(json.get("tarjetaInfo").is_none());
    }

    #[test]
    fn test_order_response_shapes() {
        let resp: OrderResponse = serde_json::from_str(
            r#"{"id":9,"estado":{"nombre":"EN PREPARACION"},"payment_status":"approved"}"#,
        )
        .unwrap();
        assert_eq!(resp.order_id(), Some(9));
        assert_eq!(resp.estado_label().as_deref(), Some("EN PREPARACION"));
        assert_eq!(resp.declared_payment_status(), Some(PaymentStatus::Approved));

        let resp: OrderResponse =
            serde_json::from_str(r#"{"pedidoId":4,"id":1,"estado":"PENDIENTE","status":"weird"}"#).unwrap();
        assert_eq!(resp.order_id(), Some(4));
        assert_eq!(resp.estado_label().as_deref(), Some("PENDIENTE"));
        assert_eq!(resp.declared_payment_status(), None);
    }

    #[test]
    fn test_payment_status_labels() {
        assert_eq!(PaymentStatus::parse("PENDING"), Some(PaymentStatus::Pending));
        assert_eq!(PaymentStatus::Pending.label(), "Pendiente de confirmación");
        assert_eq!(PaymentStatus::Rejected.color(), "#ef4444");
    }
}
