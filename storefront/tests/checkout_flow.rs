// storefront/tests/checkout_flow.rs
// Checkout workflow end to end against a scripted backend

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::json;
use shared::models::{
    CartItem, OrderDraft, OrderResponse, PaymentMethod, PaymentStatus, PreferenceRequest,
    PreferenceResponse, SavedAddress, SavedCard,
};
use std::sync::Arc;
use storefront::Config;
use storefront::checkout::error::PAID_BUT_NOT_CREATED;
use storefront::checkout::form::STORES;
use storefront::checkout::orchestrator::{
    PAYMENT_NOT_RECORDED_BANNER, PENDING_BANNER, REJECTED_BANNER,
};
use storefront::checkout::views::CheckoutPage;
use storefront::checkout::{
    AddressChoice, BannerKind, CartHandle, Checkout, DeliveryType, Field,
    FilePaymentSessionStore, InMemoryCart, MemoryPaymentSessionStore, Navigation, NextOutcome,
    PaymentChoice, PaymentSession, PaymentSessionState, PaymentSessionStore, RecordingNavigator,
    ReturnOutcome, SessionStoreError, UserSession,
};
use tienda_client::{CheckoutApi, ClientConfig, ClientError, ClientResult, StorefrontClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CARD_METHOD: i64 = 1;
const YAPE_METHOD: i64 = 2;
const MERCADO_PAGO: i64 = 3;

#[derive(Debug, Clone)]
enum OrderFailure {
    Api(u16, String),
    Unauthorized,
    Unreachable,
}

#[derive(Default)]
struct ScriptedApi {
    addresses: Vec<SavedAddress>,
    cards: Vec<SavedCard>,
    order_failure: Option<OrderFailure>,
    preference: PreferenceResponse,
    orders: Mutex<Vec<OrderDraft>>,
    preferences: Mutex<Vec<PreferenceRequest>>,
}

impl ScriptedApi {
    fn new() -> Self {
        Self {
            preference: PreferenceResponse {
                success: true,
                preference_id: Some("pref-1".into()),
                init_point: Some("https://mp.test/checkout?pref_id=pref-1".into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn failing(failure: OrderFailure) -> Self {
        Self {
            order_failure: Some(failure),
            ..Self::new()
        }
    }

    fn order_count(&self) -> usize {
        self.orders.lock().len()
    }
}

#[async_trait]
impl CheckoutApi for ScriptedApi {
    async fn fetch_payment_methods(&self) -> ClientResult<Vec<PaymentMethod>> {
        Ok(serde_json::from_value(json!([
            {"id": CARD_METHOD, "nombre": "Tarjeta de crédito", "tipo": "tarjeta"},
            {"id": YAPE_METHOD, "nombre": "Yape"},
            {"id": MERCADO_PAGO, "nombre": "Mercado Pago"}
        ]))?)
    }

    async fn fetch_user_cards(&self, _: i64, _: Option<&str>) -> ClientResult<Vec<SavedCard>> {
        Ok(self.cards.clone())
    }

    async fn fetch_user_addresses(
        &self,
        _: i64,
        _: Option<&str>,
    ) -> ClientResult<Vec<SavedAddress>> {
        Ok(self.addresses.clone())
    }

    async fn create_order(
        &self,
        draft: &OrderDraft,
        token: Option<&str>,
    ) -> ClientResult<OrderResponse> {
        assert_eq!(token, Some("tok-5"));
        match self.order_failure.clone() {
            Some(OrderFailure::Api(status, message)) => {
                return Err(ClientError::Api { status, message });
            }
            Some(OrderFailure::Unauthorized) => {
                return Err(ClientError::Unauthorized(String::new()));
            }
            Some(OrderFailure::Unreachable) => {
                let err = reqwest::get("http://127.0.0.1:1/api/pedidos")
                    .await
                    .expect_err("nothing listens on port 1");
                return Err(ClientError::Http(err));
            }
            None => {}
        }
        let mut orders = self.orders.lock();
        orders.push(draft.clone());
        Ok(OrderResponse {
            pedido_id: Some(30 + orders.len() as i64),
            ..Default::default()
        })
    }

    async fn create_payment_preference(
        &self,
        request: &PreferenceRequest,
    ) -> ClientResult<PreferenceResponse> {
        self.preferences.lock().push(request.clone());
        Ok(self.preference.clone())
    }
}

/// Memory store that refuses to write records in one state
struct FailingStore {
    inner: MemoryPaymentSessionStore,
    fail_on: PaymentSessionState,
}

impl FailingStore {
    fn new(fail_on: PaymentSessionState) -> Self {
        Self {
            inner: MemoryPaymentSessionStore::new(),
            fail_on,
        }
    }
}

impl PaymentSessionStore for FailingStore {
    fn load(&self) -> Result<Option<PaymentSession>, SessionStoreError> {
        self.inner.load()
    }

    fn save(&self, session: &PaymentSession) -> Result<(), SessionStoreError> {
        if session.state == self.fail_on {
            return Err(SessionStoreError::Io(std::io::Error::other("disco lleno")));
        }
        self.inner.save(session)
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        self.inner.clear()
    }
}

fn shopper() -> UserSession {
    UserSession::new(5, "tok-5").with_profile("Ana Pérez", "ana@correo.com", "987654321")
}

fn cart() -> Arc<InMemoryCart> {
    Arc::new(InMemoryCart::new(vec![CartItem::new(1, "Arroz", 10.5, 2)]))
}

async fn checkout_with(
    api: &Arc<ScriptedApi>,
    cart: &Arc<InMemoryCart>,
    store: Arc<dyn PaymentSessionStore>,
    navigator: &Arc<RecordingNavigator>,
) -> Checkout {
    let mut checkout = Checkout::new(api.clone(), cart.clone(), shopper(), Config::without_delays())
        .with_store(store)
        .with_navigator(navigator.clone());
    checkout.initialize().await;
    checkout
}

fn fill_delivery(checkout: &mut Checkout) {
    let form = checkout.form_mut();
    form.handle_field_change(Field::Address, "Av. Arequipa 123");
    form.handle_field_change(Field::City, "Lima");
    form.handle_field_change(Field::ZipCode, "15001");
}

fn fill_pickup(checkout: &mut Checkout) {
    let form = checkout.form_mut();
    form.handle_delivery_type_change(DeliveryType::Pickup);
    form.handle_field_change(Field::SelectedStore, STORES[0]);
}

/// Shipping filled for home delivery, Mercado Pago chosen, shopper redirected
async fn redirect_to_provider(checkout: &mut Checkout) -> String {
    fill_delivery(checkout);
    assert_eq!(checkout.next().await, NextOutcome::Advanced);
    checkout
        .form_mut()
        .handle_payment_method_change(PaymentChoice::Method(MERCADO_PAGO));
    match checkout.next().await {
        NextOutcome::Redirected(url) => url,
        other => panic!("expected a redirect, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pickup_order_with_transfer() {
    let api = Arc::new(ScriptedApi::new());
    let cart = cart();
    let navigator = Arc::new(RecordingNavigator::new());
    let store = Arc::new(MemoryPaymentSessionStore::new());
    let mut checkout = checkout_with(&api, &cart, store, &navigator).await;

    fill_pickup(&mut checkout);
    let totals = checkout.totals();
    assert_eq!(totals.subtotal, Decimal::new(2100, 2));
    assert_eq!(totals.shipping_cost, Decimal::ZERO);
    assert_eq!(totals.taxes, Decimal::new(168, 2));
    assert_eq!(totals.total, Decimal::new(2268, 2));

    assert_eq!(checkout.next().await, NextOutcome::Advanced);
    assert!(checkout.step().is_payment());
    checkout
        .form_mut()
        .handle_payment_method_change(PaymentChoice::Method(YAPE_METHOD));
    assert_eq!(checkout.next().await, NextOutcome::Confirmed);

    let orders = api.orders.lock().clone();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].monto_total, Decimal::new(2268, 2));
    assert_eq!(orders[0].metodo_pago_id, Some(YAPE_METHOD));
    assert_eq!(orders[0].direccion_envio, STORES[0]);
    assert_eq!(orders[0].usuario_id, Some(5));

    let order = checkout.step().order().expect("confirmed order");
    assert_eq!(order.id, Some(31));
    assert_eq!(order.estado_pago, PaymentStatus::Pending);
    assert_eq!(order.monto_total, Decimal::new(2268, 2));
    assert!(cart.is_empty());
    assert!(navigator.redirects().is_empty());

    let page = CheckoutPage::new(&checkout).render();
    assert!(page.contains("¡Pedido Confirmado!"));
    assert!(page.contains("S/. 22.68"));
}

#[tokio::test]
async fn test_invalid_shipping_stays_on_step_one() {
    let api = Arc::new(ScriptedApi::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let store = Arc::new(MemoryPaymentSessionStore::new());
    let mut checkout = checkout_with(&api, &cart(), store, &navigator).await;

    checkout.form_mut().handle_field_change(Field::ZipCode, "150");
    assert!(!checkout.can_advance());
    assert_eq!(checkout.next().await, NextOutcome::Invalid);
    assert!(checkout.step().is_shipping());
    assert!(checkout.form().error(Field::Address).is_some());
    assert!(checkout.form().error(Field::ZipCode).is_some());
}

#[tokio::test]
async fn test_back_keeps_form_data() {
    let api = Arc::new(ScriptedApi::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let store = Arc::new(MemoryPaymentSessionStore::new());
    let mut checkout = checkout_with(&api, &cart(), store, &navigator).await;

    fill_delivery(&mut checkout);
    assert_eq!(checkout.next().await, NextOutcome::Advanced);
    checkout.back();
    assert!(checkout.step().is_shipping());
    assert_eq!(checkout.form().data().city, "Lima");
}

#[tokio::test]
async fn test_saved_address_is_used_for_shipping() {
    let mut api = ScriptedApi::new();
    api.addresses = serde_json::from_value(json!([
        {"id": 7, "nombre": "Casa", "calle": "Jr. Junín 456", "ciudad": "Cusco",
         "codigoPostal": "08001", "esPrincipal": true}
    ]))
    .unwrap();
    let api = Arc::new(api);
    let navigator = Arc::new(RecordingNavigator::new());
    let store = Arc::new(MemoryPaymentSessionStore::new());
    let mut checkout = checkout_with(&api, &cart(), store, &navigator).await;

    let form = checkout.form_mut();
    form.handle_address_change(AddressChoice::Saved(7));
    form.handle_field_change(Field::City, "Cusco");
    form.handle_field_change(Field::ZipCode, "08001");
    assert_eq!(checkout.next().await, NextOutcome::Advanced);
    checkout
        .form_mut()
        .handle_payment_method_change(PaymentChoice::Method(YAPE_METHOD));
    assert_eq!(checkout.next().await, NextOutcome::Confirmed);

    assert_eq!(api.orders.lock()[0].direccion_envio, "Jr. Junín 456, Cusco 08001");
}

#[tokio::test]
async fn test_order_failures_become_banners() {
    let cases = [
        (
            OrderFailure::Api(400, "Stock insuficiente para Arroz".into()),
            "Algunos productos no tienen stock suficiente. Revisa tu carrito.",
        ),
        (
            OrderFailure::Api(400, "Método de pago inválido".into()),
            "Método de pago no válido. Por favor selecciona otro.",
        ),
        (
            OrderFailure::Unauthorized,
            "Debes estar registrado para realizar un pedido. Por favor inicia sesión.",
        ),
        (
            OrderFailure::Api(500, "Pedido duplicado".into()),
            "Pedido duplicado",
        ),
        (
            OrderFailure::Unreachable,
            "Error de conexión. Verifica que el servidor esté funcionando.",
        ),
    ];

    for (failure, expected) in cases {
        let api = Arc::new(ScriptedApi::failing(failure));
        let cart = cart();
        let navigator = Arc::new(RecordingNavigator::new());
        let store = Arc::new(MemoryPaymentSessionStore::new());
        let mut checkout = checkout_with(&api, &cart, store, &navigator).await;

        fill_pickup(&mut checkout);
        assert_eq!(checkout.next().await, NextOutcome::Advanced);
        checkout
            .form_mut()
            .handle_payment_method_change(PaymentChoice::Method(YAPE_METHOD));
        assert_eq!(checkout.next().await, NextOutcome::Failed);

        let banner = checkout.banner().expect("banner");
        assert_eq!(banner.kind, BannerKind::Error);
        assert_eq!(banner.message, expected);
        assert!(checkout.step().is_payment());
        assert!(!cart.is_empty());
        assert!(!checkout.is_processing());
    }
}

#[tokio::test]
async fn test_redirect_saves_pending_payment() {
    let api = Arc::new(ScriptedApi::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let store = Arc::new(MemoryPaymentSessionStore::new());
    let mut checkout = checkout_with(&api, &cart(), store.clone(), &navigator).await;

    let url = redirect_to_provider(&mut checkout).await;
    assert_eq!(url, "https://mp.test/checkout?pref_id=pref-1");
    assert_eq!(navigator.redirects(), vec![url]);
    assert_eq!(api.order_count(), 0);

    let request = api.preferences.lock()[0].clone();
    assert_eq!(request.items.len(), 1);
    assert_eq!(request.items[0].title, "Arroz");
    assert_eq!(request.items[0].quantity, 2);
    assert_eq!(request.items[0].currency_id, "PEN");

    let session = store.load().unwrap().expect("pending payment");
    assert_eq!(session.state, PaymentSessionState::Initiated);
    assert_eq!(session.preference_id.as_deref(), Some("pref-1"));
    assert_eq!(session.draft.direccion_envio, "Av. Arequipa 123, Lima 15001");
    assert_eq!(session.totals.total, Decimal::new(3267, 2));
    assert!(session.draft_intact());
}

#[tokio::test]
async fn test_preference_without_url_sets_banner() {
    let mut api = ScriptedApi::new();
    api.preference = PreferenceResponse {
        success: true,
        ..Default::default()
    };
    let api = Arc::new(api);
    let navigator = Arc::new(RecordingNavigator::new());
    let store = Arc::new(MemoryPaymentSessionStore::new());
    let mut checkout = checkout_with(&api, &cart(), store.clone(), &navigator).await;

    fill_delivery(&mut checkout);
    assert_eq!(checkout.next().await, NextOutcome::Advanced);
    checkout
        .form_mut()
        .handle_payment_method_change(PaymentChoice::Method(MERCADO_PAGO));
    assert_eq!(checkout.next().await, NextOutcome::Failed);

    assert_eq!(
        checkout.banner().map(|b| b.message.as_str()),
        Some("No se recibió URL de checkout de Mercado Pago")
    );
    assert!(navigator.redirects().is_empty());
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_approved_return_creates_exactly_one_order() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn PaymentSessionStore> =
        Arc::new(FilePaymentSessionStore::new(dir.path().join("pending_payment.json")));
    let api = Arc::new(ScriptedApi::new());
    let cart = cart();
    let navigator = Arc::new(RecordingNavigator::new());

    let mut before = checkout_with(&api, &cart, store.clone(), &navigator).await;
    redirect_to_provider(&mut before).await;
    drop(before);

    // the shopper comes back on a fresh page
    let return_url = "/checkout?status=approved&payment_id=123&preference_id=pref-1";
    let mut after = checkout_with(&api, &cart, store.clone(), &navigator).await;
    assert_eq!(after.handle_payment_return(return_url).await, ReturnOutcome::Confirmed);
    assert_eq!(api.order_count(), 1);
    assert!(after.step().is_confirmation());
    assert_eq!(
        after.step().order().map(|o| o.estado_pago),
        Some(PaymentStatus::Approved)
    );
    assert!(cart.is_empty());

    let session = store.load().unwrap().expect("finalized payment");
    assert_eq!(session.state, PaymentSessionState::Finalized);
    assert_eq!(session.order_id, Some(31));
    assert_eq!(session.payment_id.as_deref(), Some("123"));

    // the same return URL again (reload)
    let mut reloaded = checkout_with(&api, &cart, store.clone(), &navigator).await;
    assert_eq!(
        reloaded.handle_payment_return(return_url).await,
        ReturnOutcome::AlreadyProcessed
    );
    assert_eq!(api.order_count(), 1);

    assert_eq!(
        navigator.events().last(),
        Some(&Navigation::Replace("/checkout".into()))
    );
}

#[tokio::test]
async fn test_tampered_pending_payment_is_rejected() {
    let api = Arc::new(ScriptedApi::new());
    let cart = cart();
    let navigator = Arc::new(RecordingNavigator::new());
    let store = Arc::new(MemoryPaymentSessionStore::new());
    let mut checkout = checkout_with(&api, &cart, store.clone(), &navigator).await;
    redirect_to_provider(&mut checkout).await;

    let mut session = store.load().unwrap().unwrap();
    session.draft.monto_total = Decimal::ONE;
    store.save(&session).unwrap();

    let outcome = checkout
        .handle_payment_return("?status=approved&payment_id=9")
        .await;
    assert_eq!(outcome, ReturnOutcome::Failed);
    assert_eq!(api.order_count(), 0);
    assert_eq!(
        checkout.banner().map(|b| b.message.as_str()),
        Some(PAID_BUT_NOT_CREATED)
    );
}

#[tokio::test]
async fn test_pending_and_rejected_returns() {
    let api = Arc::new(ScriptedApi::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let store = Arc::new(MemoryPaymentSessionStore::new());
    let mut checkout = checkout_with(&api, &cart(), store.clone(), &navigator).await;
    redirect_to_provider(&mut checkout).await;

    let outcome = checkout
        .handle_payment_return("/checkout?status=in_process&payment_id=77")
        .await;
    assert_eq!(outcome, ReturnOutcome::Pending);
    let banner = checkout.banner().unwrap();
    assert_eq!(banner.kind, BannerKind::Warning);
    assert_eq!(banner.message, PENDING_BANNER);
    let session = store.load().unwrap().unwrap();
    assert_eq!(session.state, PaymentSessionState::ReturnedPending);
    assert_eq!(session.payment_id.as_deref(), Some("77"));

    let outcome = checkout
        .handle_payment_return("/checkout?status=rejected&payment_id=78")
        .await;
    assert_eq!(outcome, ReturnOutcome::Rejected);
    assert_eq!(checkout.banner().unwrap().message, REJECTED_BANNER);
    assert_eq!(
        store.load().unwrap().unwrap().state,
        PaymentSessionState::ReturnedFailure
    );
    assert_eq!(api.order_count(), 0);
}

#[tokio::test]
async fn test_non_return_urls_are_ignored() {
    let api = Arc::new(ScriptedApi::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let store = Arc::new(MemoryPaymentSessionStore::new());
    let mut checkout = checkout_with(&api, &cart(), store, &navigator).await;

    assert_eq!(
        checkout.handle_payment_return("/checkout").await,
        ReturnOutcome::Ignored
    );
    assert!(navigator.events().is_empty());
    assert!(checkout.banner().is_none());
}

#[tokio::test]
async fn test_missing_saved_addresses_show_no_banner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/metodos-pago"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "nombre": "Yape"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tarjetas-usuario/usuario/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 4, "tipoTarjeta": "Visa", "numeroEnmascarado": "**** 1111"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/direcciones/usuario/5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "No se encontraron direcciones"
        })))
        .mount(&server)
        .await;

    let client =
        Arc::new(StorefrontClient::new(&ClientConfig::new(server.uri()).with_timeout(5)).unwrap());
    let mut checkout = Checkout::new(client, cart(), shopper(), Config::without_delays());
    checkout.initialize().await;

    assert!(checkout.banner().is_none());
    assert!(!checkout.is_loading());
    assert_eq!(checkout.data().payment_methods.len(), 1);
    assert_eq!(checkout.data().saved_cards.len(), 1);
    assert!(checkout.data().saved_addresses.is_empty());
    assert_eq!(checkout.form().data().full_name, "Ana Pérez");
}

#[tokio::test]
async fn test_unsaved_finalized_record_is_not_replayed() {
    let store = Arc::new(FailingStore::new(PaymentSessionState::Finalized));
    let api = Arc::new(ScriptedApi::new());
    let cart = cart();
    let navigator = Arc::new(RecordingNavigator::new());

    let mut before = checkout_with(&api, &cart, store.clone(), &navigator).await;
    redirect_to_provider(&mut before).await;
    drop(before);

    let return_url = "/checkout?status=approved&payment_id=123&preference_id=pref-1";
    let mut after = checkout_with(&api, &cart, store.clone(), &navigator).await;
    assert_eq!(after.handle_payment_return(return_url).await, ReturnOutcome::Confirmed);
    assert_eq!(api.order_count(), 1);
    assert!(after.step().is_confirmation());
    let banner = after.banner().expect("support banner");
    assert_eq!(banner.kind, BannerKind::Warning);
    assert_eq!(banner.message, PAYMENT_NOT_RECORDED_BANNER);
    assert!(store.load().unwrap().is_none());
    assert!(cart.is_empty());

    let mut reloaded = checkout_with(&api, &cart, store.clone(), &navigator).await;
    assert_eq!(
        reloaded.handle_payment_return(return_url).await,
        ReturnOutcome::Ignored
    );
    assert_eq!(api.order_count(), 1);
}

#[tokio::test]
async fn test_unsaved_approved_return_posts_no_order() {
    let store = Arc::new(FailingStore::new(PaymentSessionState::ReturnedSuccess));
    let api = Arc::new(ScriptedApi::new());
    let cart = cart();
    let navigator = Arc::new(RecordingNavigator::new());
    let mut checkout = checkout_with(&api, &cart, store.clone(), &navigator).await;
    redirect_to_provider(&mut checkout).await;

    let outcome = checkout
        .handle_payment_return("/checkout?status=approved&payment_id=123")
        .await;
    assert_eq!(outcome, ReturnOutcome::Failed);
    assert_eq!(api.order_count(), 0);
    assert_eq!(
        checkout.banner().map(|b| b.message.as_str()),
        Some(PAID_BUT_NOT_CREATED)
    );
    assert!(!cart.is_empty());
    assert_eq!(
        store.load().unwrap().map(|s| s.state),
        Some(PaymentSessionState::Initiated)
    );
}

async fn mount_get(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

fn network_client(server: &MockServer) -> Arc<StorefrontClient> {
    Arc::new(StorefrontClient::new(&ClientConfig::new(server.uri()).with_timeout(5)).unwrap())
}

#[tokio::test]
async fn test_saved_data_loads_when_identity_arrives() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/api/metodos-pago",
        ResponseTemplate::new(200).set_body_json(json!([{"id": 2, "nombre": "Yape"}])),
    )
    .await;
    mount_get(
        &server,
        "/api/tarjetas-usuario/usuario/5",
        ResponseTemplate::new(200).set_body_json(json!([
            {"id": 4, "tipoTarjeta": "Visa", "numeroEnmascarado": "**** 1111"}
        ])),
    )
    .await;
    mount_get(
        &server,
        "/api/direcciones/usuario/5",
        ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "calle": "Jr. Junín 456", "ciudad": "Cusco", "codigoPostal": "08001"}
        ])),
    )
    .await;

    let mut checkout = Checkout::new(
        network_client(&server),
        cart(),
        UserSession::anonymous(),
        Config::without_delays(),
    );
    checkout.initialize().await;
    assert_eq!(checkout.data().payment_methods.len(), 1);
    assert!(checkout.data().saved_cards.is_empty());
    assert!(checkout.data().saved_addresses.is_empty());

    checkout.set_user(shopper()).await;
    assert_eq!(checkout.data().saved_cards.len(), 1);
    assert_eq!(checkout.data().saved_addresses.len(), 1);
    assert!(checkout.data().address(7).is_some());
    assert_eq!(checkout.form().data().full_name, "Ana Pérez");
    assert!(checkout.banner().is_none());
}

#[tokio::test]
async fn test_server_errors_leave_empty_lists_without_banner() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/metodos-pago", ResponseTemplate::new(500)).await;
    mount_get(
        &server,
        "/api/tarjetas-usuario/usuario/5",
        ResponseTemplate::new(500).set_body_json(json!({"message": "Error interno"})),
    )
    .await;
    mount_get(&server, "/api/direcciones/usuario/5", ResponseTemplate::new(503)).await;

    let mut checkout = Checkout::new(
        network_client(&server),
        cart(),
        shopper(),
        Config::without_delays(),
    );
    checkout.initialize().await;

    assert!(!checkout.is_loading());
    assert!(checkout.banner().is_none());
    assert!(checkout.data().payment_methods.is_empty());
    assert!(checkout.data().saved_cards.is_empty());
    assert!(checkout.data().saved_addresses.is_empty());
    assert!(checkout.step().is_shipping());
}
