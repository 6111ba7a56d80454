//! Checkout endpoints

use super::StorefrontClient;
use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use shared::models::{
    OrderDraft, OrderResponse, PaymentMethod, PreferenceRequest, PreferenceResponse, SavedAddress,
    SavedCard,
};

/// Backend calls made by the checkout
#[async_trait]
pub trait CheckoutApi: Send + Sync {
    /// `GET /api/metodos-pago`
    async fn fetch_payment_methods(&self) -> ClientResult<Vec<PaymentMethod>>;

    /// `GET /api/tarjetas-usuario/usuario/{user_id}`
    async fn fetch_user_cards(&self, user_id: i64, token: Option<&str>)
    -> ClientResult<Vec<SavedCard>>;

    /// `GET /api/direcciones/usuario/{user_id}`
    async fn fetch_user_addresses(
        &self,
        user_id: i64,
        token: Option<&str>,
    ) -> ClientResult<Vec<SavedAddress>>;

    /// `POST /api/pedidos` with the bearer token
    async fn create_order(&self, draft: &OrderDraft, token: Option<&str>)
    -> ClientResult<OrderResponse>;

    /// `POST /api/pago`; the answer is returned as-is, even with `success: false`
    async fn create_payment_preference(
        &self,
        request: &PreferenceRequest,
    ) -> ClientResult<PreferenceResponse>;
}

#[async_trait]
impl CheckoutApi for StorefrontClient {
    async fn fetch_payment_methods(&self) -> ClientResult<Vec<PaymentMethod>> {
        self.http.get("api/metodos-pago").await
    }

    async fn fetch_user_cards(
        &self,
        user_id: i64,
        token: Option<&str>,
    ) -> ClientResult<Vec<SavedCard>> {
        self.authed(token)
            .get(&format!("api/tarjetas-usuario/usuario/{}", user_id))
            .await
    }

    async fn fetch_user_addresses(
        &self,
        user_id: i64,
        token: Option<&str>,
    ) -> ClientResult<Vec<SavedAddress>> {
        self.authed(token)
            .get(&format!("api/direcciones/usuario/{}", user_id))
            .await
    }

    async fn create_order(
        &self,
        draft: &OrderDraft,
        token: Option<&str>,
    ) -> ClientResult<OrderResponse> {
        tracing::info!(
            usuario_id = ?draft.usuario_id,
            metodo_pago_id = ?draft.metodo_pago_id,
            lines = draft.detalles.len(),
            "Creating order"
        );
        self.authed(token)
            .post("api/pedidos", draft)
            .await
            .map_err(|e| e.or_message("Error al crear el pedido"))
    }

    async fn create_payment_preference(
        &self,
        request: &PreferenceRequest,
    ) -> ClientResult<PreferenceResponse> {
        tracing::info!(items = request.items.len(), "Creating payment preference");
        self.http
            .post("api/pago", request)
            .await
            .map_err(|e| e.or_message("Error al crear preferencia de Mercado Pago"))
    }
}
