// tienda-client/tests/checkout_api.rs
// Checkout endpoints against a mock backend

use serde_json::json;
use shared::models::{OrderDraft, OrderLineDraft, PreferenceItem, PreferenceRequest};
use tienda_client::{CheckoutApi, ClientConfig, ClientError, StorefrontClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::new(&ClientConfig::new(server.uri()).with_timeout(5)).unwrap()
}

fn draft() -> OrderDraft {
    OrderDraft {
        usuario_id: Some(5),
        direccion_envio: "Recojo en tienda".into(),
        metodo_pago_id: Some(2),
        monto_total: "22.68".parse().unwrap(),
        detalles: vec![OrderLineDraft {
            producto_id: 1,
            cantidad: 2,
        }],
        tarjeta_info: None,
    }
}

#[tokio::test]
async fn test_fetch_payment_methods() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/metodos-pago"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "nombre": "Tarjeta de crédito", "tipo": "tarjeta"},
            {"id": 2, "nombre": "Mercado Pago"}
        ])))
        .mount(&server)
        .await;

    let methods = client(&server).fetch_payment_methods().await.unwrap();
    assert_eq!(methods.len(), 2);
    assert!(methods[0].is_card());
    assert!(methods[1].is_redirect());
}

#[tokio::test]
async fn test_saved_addresses_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/direcciones/usuario/5"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_user_addresses(5, Some("tok"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_create_order_sends_bearer_and_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pedidos"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({
            "usuarioId": 5,
            "direccionEnvio": "Recojo en tienda",
            "metodoPagoId": 2,
            "montoTotal": 22.68,
            "detalles": [{"productoId": 1, "cantidad": 2}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "pedidoId": 77,
            "estado": "PENDIENTE",
            "paymentStatus": "pending"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client(&server).create_order(&draft(), Some("tok")).await.unwrap();
    assert_eq!(resp.order_id(), Some(77));
    assert_eq!(resp.estado_label().as_deref(), Some("PENDIENTE"));
}

#[tokio::test]
async fn test_create_order_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pedidos"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Stock insuficiente"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).create_order(&draft(), None).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.server_message(), Some("Stock insuficiente"));
}

#[tokio::test]
async fn test_create_order_error_without_body_uses_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pedidos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server).create_order(&draft(), None).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
    assert_eq!(err.server_message(), Some("Error al crear el pedido"));
}

#[tokio::test]
async fn test_payment_preference_detail_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pago"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({"detail": "MP caído"})))
        .mount(&server)
        .await;

    let request = PreferenceRequest {
        items: vec![PreferenceItem {
            title: "Arroz".into(),
            quantity: 1,
            unit_price: 4.5,
            currency_id: "PEN".into(),
        }],
        payer: None,
    };
    let err = client(&server)
        .create_payment_preference(&request)
        .await
        .unwrap_err();
    assert_eq!(err.server_message(), Some("MP caído"));
}

#[tokio::test]
async fn test_connection_refused_is_connectivity() {
    // Nothing listens on port 9 locally
    let client = StorefrontClient::new(&ClientConfig::new("http://127.0.0.1:9").with_timeout(2)).unwrap();
    let err = client.fetch_payment_methods().await.unwrap_err();
    assert!(err.is_connectivity());
}
