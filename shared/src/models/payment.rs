//! Payment method, saved card and payment preference models

use serde::{Deserialize, Serialize};

/// Payment method offered by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub comision: Option<f64>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// How a payment method is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Hosted page of an external provider (Mercado Pago)
    Redirect,
    /// Card entry or saved card
    Card,
    /// Bank transfer and wallet apps (Yape, Plin)
    Transfer,
    Other,
}

const TRANSFER_NAMES: [&str; 3] = ["transferencia", "yape", "plin"];

impl PaymentMethod {
    /// Which form the method needs: redirect, then card, then transfer
    ///
    /// "Transferencia con tarjeta" is a `Card` here (card fields required);
    /// [`PaymentMethod::is_transfer`] still reports it as a transfer.
    pub fn kind(&self) -> PaymentKind {
        let name = self.nombre.to_lowercase();
        let tipo = self.tipo.as_deref().unwrap_or_default().to_lowercase();

        if name.contains("mercado pago") || tipo == "mercadopago" || tipo == "mercado_pago" {
            PaymentKind::Redirect
        } else if name.contains("tarjeta") || tipo == "tarjeta" {
            PaymentKind::Card
        } else if TRANSFER_NAMES.iter().any(|t| name.contains(t) || tipo == *t) {
            PaymentKind::Transfer
        } else {
            PaymentKind::Other
        }
    }

    pub fn is_redirect(&self) -> bool {
        self.kind() == PaymentKind::Redirect
    }

    pub fn is_card(&self) -> bool {
        self.kind() == PaymentKind::Card
    }

    /// Name mentions a bank transfer or a wallet app
    pub fn is_transfer(&self) -> bool {
        let name = self.nombre.to_lowercase();
        TRANSFER_NAMES.iter().any(|t| name.contains(t))
    }
}

/// Card saved in the user's profile (already masked by the backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCard {
    pub id: i64,
    #[serde(default)]
    pub tipo_tarjeta: Option<String>,
    #[serde(default)]
    pub numero_enmascarado: Option<String>,
    #[serde(default)]
    pub fecha_vencimiento: Option<String>,
    #[serde(default)]
    pub nombre_en_tarjeta: Option<String>,
    #[serde(default)]
    pub es_principal: bool,
}

/// Item line of a Mercado Pago preference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceItem {
    pub title: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub currency_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayerPhone {
    pub number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<PayerPhone>,
}

/// Body of `POST /api/pago`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,
}

/// Response of `POST /api/pago`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub preference_id: Option<String>,
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub sandbox_init_point: Option<String>,
    #[serde(default)]
    pub init_point: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PreferenceResponse {
    /// Redirect URL: `checkout_url` > `sandbox_init_point` > `init_point`
    pub fn redirect_url(&self) -> Option<&str> {
        [&self.checkout_url, &self.sandbox_init_point, &self.init_point]
            .into_iter()
            .filter_map(|u| u.as_deref())
            .find(|u| !u.trim().is_empty())
    }

    pub fn preference_id(&self) -> Option<&str> {
        self.preference_id.as_deref().or(self.id.as_deref())
    }
}
