//! Order assembly
//!
//! Turns the form, the reference data and the cart into an [`OrderDraft`],
//! and the backend answer into the [`ConfirmedOrder`] shown on the last step.

use super::context::UserSession;
use super::error::{CheckoutError, CheckoutResult};
use super::form::{CheckoutFormData, DeliveryType, PaymentChoice};
use super::loader::CheckoutData;
use super::totals::Totals;
use rust_decimal::Decimal;
use serde_json::Value;
use shared::models::{
    CardReference, CartItem, ConfirmedOrder, DEFAULT_ORDER_STATUS, NamedRef, OrderDraft,
    OrderLine, OrderLineDraft, OrderResponse, PaymentMethod, PaymentStatus, SavedAddress,
    SavedCard, UNNAMED_PRODUCT,
};
use shared::money::{round_money, to_decimal};

pub const PICKUP_ADDRESS: &str = "Recojo en tienda";
pub const UNSPECIFIED_METHOD: &str = "Método no especificado";

/// Checks done before anything is sent
pub fn precheck(cart: &[CartItem], data: &CheckoutFormData) -> CheckoutResult<PaymentChoice> {
    if cart.is_empty() {
        return Err(CheckoutError::CartEmpty);
    }
    let blank = |v: &str| v.trim().is_empty();
    if blank(&data.full_name) || blank(&data.email) || blank(&data.phone) {
        return Err(CheckoutError::ProfileIncomplete);
    }
    let choice = data
        .payment_method
        .ok_or(CheckoutError::PaymentMethodRequired)?;
    if choice == PaymentChoice::SavedCard && data.selected_card_id.is_none() {
        return Err(CheckoutError::CardRequired);
    }
    Ok(choice)
}

/// Backend method id for the selection
///
/// A saved card maps to the card-type method, else to the first method.
pub fn resolve_payment_method_id(choice: PaymentChoice, methods: &[PaymentMethod]) -> Option<i64> {
    match choice {
        PaymentChoice::Method(id) => Some(id),
        PaymentChoice::SavedCard => methods
            .iter()
            .find(|m| m.is_card())
            .or_else(|| methods.first())
            .map(|m| m.id),
    }
}

fn typed_address(data: &CheckoutFormData) -> String {
    format!("{}, {} {}", data.address.trim(), data.city.trim(), data.zip_code.trim())
}

/// Shipping line sent as `direccionEnvio`
pub fn resolve_shipping_address(data: &CheckoutFormData, addresses: &[SavedAddress]) -> String {
    match data.delivery_type {
        DeliveryType::Pickup => {
            let store = data.selected_store.trim();
            if store.is_empty() {
                PICKUP_ADDRESS.to_string()
            } else {
                store.to_string()
            }
        }
        DeliveryType::Delivery if data.uses_typed_address() => typed_address(data),
        DeliveryType::Delivery => data
            .selected_address_id
            .and_then(|id| addresses.iter().find(|a| a.id == id))
            .map(SavedAddress::shipping_line)
            .unwrap_or_else(|| typed_address(data)),
    }
}

pub fn card_reference(card: &SavedCard) -> CardReference {
    CardReference {
        tarjeta_id: card.id,
        tipo_tarjeta: card.tipo_tarjeta.clone(),
        numero_enmascarado: card.numero_enmascarado.clone(),
        fecha_vencimiento: card.fecha_vencimiento.clone(),
        nombre_en_tarjeta: card.nombre_en_tarjeta.clone(),
    }
}

/// Build the draft posted to the backend
pub fn build_draft(
    user: &UserSession,
    data: &CheckoutFormData,
    reference: &CheckoutData,
    cart: &[CartItem],
    totals: &Totals,
) -> CheckoutResult<OrderDraft> {
    let choice = precheck(cart, data)?;

    let tarjeta_info = match choice {
        PaymentChoice::SavedCard => data
            .selected_card_id
            .and_then(|id| reference.card(id))
            .map(card_reference),
        PaymentChoice::Method(_) => None,
    };

    Ok(OrderDraft {
        usuario_id: user.id,
        direccion_envio: resolve_shipping_address(data, &reference.saved_addresses),
        metodo_pago_id: resolve_payment_method_id(choice, &reference.payment_methods),
        monto_total: totals.total,
        detalles: cart
            .iter()
            .map(|item| OrderLineDraft {
                producto_id: item.id,
                cantidad: item.cantidad,
            })
            .collect(),
        tarjeta_info,
    })
}

fn detail_id(raw: Option<&Value>, order_id: Option<i64>, index: usize) -> String {
    match raw {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            let order = order_id.map(|id| id.to_string()).unwrap_or_default();
            format!("detalle_{}_{}", order, index)
        }
    }
}

/// Lines of the confirmed order
///
/// Backend details win, with cart lines (by position) filling the gaps;
/// without backend details the cart itself is used.
pub fn normalize_lines(response: &OrderResponse, cart: &[CartItem]) -> Vec<OrderLine> {
    let order_id = response.order_id();

    if response.detalles_pedidos.is_empty() {
        return cart
            .iter()
            .enumerate()
            .map(|(index, item)| OrderLine {
                id: detail_id(None, order_id, index),
                cantidad: item.cantidad,
                precio: item.unit_price(),
                subtotal: item.line_total(),
                producto: NamedRef {
                    id: Some(item.id),
                    nombre: Some(item.display_name().to_string()),
                },
            })
            .collect();
    }

    response
        .detalles_pedidos
        .iter()
        .enumerate()
        .map(|(index, detalle)| {
            let fallback = cart.get(index);
            let cantidad = detalle
                .cantidad
                .or(fallback.map(|i| i.cantidad))
                .unwrap_or(0);
            let precio = detalle
                .precio
                .map(to_decimal)
                .or(fallback.map(CartItem::unit_price))
                .unwrap_or(Decimal::ZERO);
            let subtotal = detalle
                .subtotal
                .filter(|s| *s != 0.0)
                .map(to_decimal)
                .unwrap_or_else(|| round_money(precio * Decimal::from(cantidad)));
            let producto = detalle.producto.clone().unwrap_or_default();

            let nombre = producto
                .nombre
                .filter(|n| !n.trim().is_empty())
                .or_else(|| fallback.map(|i| i.display_name().to_string()))
                .unwrap_or_else(|| UNNAMED_PRODUCT.to_string());

            OrderLine {
                id: detail_id(detalle.id.as_ref(), order_id, index),
                cantidad,
                precio,
                subtotal,
                producto: NamedRef {
                    id: producto
                        .id
                        .or(detalle.producto_id)
                        .or(fallback.map(|i| i.id)),
                    nombre: Some(nombre),
                },
            }
        })
        .collect()
}

/// Confirmed order from the backend answer, the draft and the local figures
pub fn confirmed_order(
    response: &OrderResponse,
    draft: &OrderDraft,
    method: Option<&PaymentMethod>,
    cart: &[CartItem],
    totals: &Totals,
    estado_pago: PaymentStatus,
) -> ConfirmedOrder {
    let metodo_nombre = method
        .map(|m| m.nombre.clone())
        .or_else(|| response.metodo_pago.as_ref().and_then(|m| m.nombre.clone()))
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| UNSPECIFIED_METHOD.to_string());

    ConfirmedOrder {
        id: response.order_id(),
        monto_total: response
            .monto_total
            .filter(|m| *m != 0.0)
            .map(to_decimal)
            .unwrap_or(totals.total),
        direccion_envio: response
            .direccion_envio
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| draft.direccion_envio.clone()),
        estado: response
            .estado_label()
            .unwrap_or_else(|| DEFAULT_ORDER_STATUS.to_string()),
        estado_pago,
        metodo_pago: NamedRef {
            id: draft.metodo_pago_id,
            nombre: Some(metodo_nombre),
        },
        detalles: normalize_lines(response, cart),
        resumen: (*totals).into(),
    }
}
