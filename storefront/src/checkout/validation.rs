//! Checkout field validation
//!
//! [`validate_field`] returns the user-facing message for a single field, or
//! `None` when the value is acceptable. The step predicates combine them.

use super::form::{CardInfo, CheckoutFormData, DeliveryType, PaymentChoice};
use crate::util::validation::{
    MAX_ADDRESS_LEN, MAX_CITY_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, char_len, has_letter, is_digits,
    is_email, is_letter, luhn_valid,
};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::models::{PaymentKind, PaymentMethod};
use std::fmt;
use std::str::FromStr;

/// Checkout form fields subject to validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Phone,
    Address,
    City,
    ZipCode,
    SelectedStore,
    CardNumber,
    CardName,
    CardExpiry,
    #[serde(rename = "cardCVV")]
    CardCvv,
}

impl Field {
    pub const PROFILE: [Field; 3] = [Field::FullName, Field::Email, Field::Phone];
    pub const ADDRESS: [Field; 3] = [Field::Address, Field::City, Field::ZipCode];
    pub const CARD: [Field; 4] = [
        Field::CardNumber,
        Field::CardName,
        Field::CardExpiry,
        Field::CardCvv,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::City => "city",
            Field::ZipCode => "zipCode",
            Field::SelectedStore => "selectedStore",
            Field::CardNumber => "cardNumber",
            Field::CardName => "cardName",
            Field::CardExpiry => "cardExpiry",
            Field::CardCvv => "cardCVV",
        }
    }

    pub fn is_card(&self) -> bool {
        Self::CARD.contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown checkout field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Field::FullName,
            Field::Email,
            Field::Phone,
            Field::Address,
            Field::City,
            Field::ZipCode,
            Field::SelectedStore,
        ]
        .into_iter()
        .chain(Field::CARD)
        .find(|f| f.name() == s)
        .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Context a rule may depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub delivery: DeliveryType,
    /// Reference date for card expiry
    pub today: NaiveDate,
}

impl ValidationContext {
    pub fn new(delivery: DeliveryType) -> Self {
        Self {
            delivery,
            today: Local::now().date_naive(),
        }
    }

    pub fn at(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(DeliveryType::Delivery)
    }
}

/// Validate one field; `None` means valid
pub fn validate_field(field: Field, value: &str, ctx: &ValidationContext) -> Option<String> {
    let value = value.trim();
    match field {
        Field::FullName => validate_full_name(value),
        Field::Email => validate_email(value),
        Field::Phone => validate_phone(value),
        Field::Address | Field::City | Field::ZipCode if ctx.delivery == DeliveryType::Pickup => {
            None
        }
        Field::Address => validate_address(value),
        Field::City => validate_city(value),
        Field::ZipCode => validate_zip_code(value),
        Field::SelectedStore => match ctx.delivery {
            DeliveryType::Pickup if value.is_empty() => {
                Some("Selecciona una tienda para recoger tu pedido".into())
            }
            _ => None,
        },
        Field::CardNumber => validate_card_number(value),
        Field::CardName => validate_card_name(value),
        Field::CardExpiry => validate_card_expiry(value, ctx.today),
        Field::CardCvv => validate_card_cvv(value),
    }
}

fn validate_full_name(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("El nombre completo es requerido".into());
    }
    let len = char_len(value);
    if len < 3 {
        return Some("El nombre debe tener al menos 3 caracteres".into());
    }
    if len > MAX_NAME_LEN {
        return Some(format!("El nombre no puede exceder {} caracteres", MAX_NAME_LEN));
    }
    if !value.chars().all(|c| is_letter(c) || c.is_whitespace()) {
        return Some("El nombre solo puede contener letras y espacios".into());
    }
    None
}

fn validate_email(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("El correo electrónico es requerido".into());
    }
    if char_len(value) > MAX_EMAIL_LEN {
        return Some(format!(
            "El correo es demasiado largo (máx. {} caracteres)",
            MAX_EMAIL_LEN
        ));
    }
    if !is_email(value) {
        return Some("Formato de correo inválido (ejemplo@correo.com)".into());
    }
    None
}

fn validate_phone(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("El teléfono es requerido".into());
    }
    let digits: String = value.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    if !is_digits(&digits) {
        return Some("El teléfono solo puede contener números".into());
    }
    if digits.len() != 9 {
        return Some("El teléfono debe tener 9 dígitos".into());
    }
    None
}

fn validate_address(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("La dirección es requerida".into());
    }
    let len = char_len(value);
    if len < 5 {
        return Some("La dirección debe tener al menos 5 caracteres".into());
    }
    if len > MAX_ADDRESS_LEN {
        return Some(format!(
            "La dirección es demasiado larga (máx. {} caracteres)",
            MAX_ADDRESS_LEN
        ));
    }
    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, ',' | '.' | '-' | '#' | '°'))
    {
        return Some("La dirección contiene caracteres no permitidos".into());
    }
    if !has_letter(value) {
        return Some("La dirección debe incluir texto descriptivo".into());
    }
    None
}

fn validate_city(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("La ciudad es requerida".into());
    }
    let len = char_len(value);
    if len < 2 {
        return Some("La ciudad debe tener al menos 2 caracteres".into());
    }
    if len > MAX_CITY_LEN {
        return Some(format!(
            "La ciudad es demasiado larga (máx. {} caracteres)",
            MAX_CITY_LEN
        ));
    }
    if value.chars().any(|c| c.is_ascii_digit()) {
        return Some("La ciudad no puede contener números".into());
    }
    if !value
        .chars()
        .all(|c| is_letter(c) || c.is_whitespace() || matches!(c, '-' | '\'' | '.'))
    {
        return Some("La ciudad solo puede contener letras, espacios, guión y apóstrofo".into());
    }
    if !has_letter(value) {
        return Some("La ciudad debe contener letras".into());
    }
    if value.starts_with('-') || value.ends_with('-') {
        return Some("La ciudad no puede empezar o terminar con guión".into());
    }
    None
}

fn validate_zip_code(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("El código postal es requerido".into());
    }
    if !is_digits(value) {
        return Some("El código postal solo puede contener números".into());
    }
    if value.len() != 5 {
        return Some("El código postal debe tener 5 dígitos".into());
    }
    if value.chars().all(|c| c == '0') {
        return Some("El código postal no puede ser solo ceros".into());
    }
    None
}

fn validate_card_number(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("El número de tarjeta es requerido".into());
    }
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if !is_digits(&digits) {
        return Some("El número de tarjeta solo puede contener números".into());
    }
    if !(13..=19).contains(&digits.len()) {
        return Some("El número de tarjeta debe tener entre 13 y 19 dígitos".into());
    }
    if !luhn_valid(&digits) {
        return Some("El número de tarjeta no es válido".into());
    }
    None
}

fn validate_card_name(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("El nombre en la tarjeta es requerido".into());
    }
    if char_len(value) < 3 {
        return Some("El nombre debe tener al menos 3 caracteres".into());
    }
    if !value.chars().all(|c| is_letter(c) || c.is_whitespace()) {
        return Some("El nombre solo puede contener letras y espacios".into());
    }
    None
}

fn validate_card_expiry(value: &str, today: NaiveDate) -> Option<String> {
    if value.is_empty() {
        return Some("La fecha de vencimiento es requerida".into());
    }
    let Some((mm, yy)) = value.split_once('/') else {
        return Some("Formato inválido (MM/AA)".into());
    };
    if mm.len() != 2 || yy.len() != 2 || !is_digits(mm) || !is_digits(yy) {
        return Some("Formato inválido (MM/AA)".into());
    }
    let (Ok(month), Ok(year)) = (mm.parse::<u32>(), yy.parse::<i32>()) else {
        return Some("Formato inválido (MM/AA)".into());
    };
    if !(1..=12).contains(&month) {
        return Some("Mes inválido".into());
    }
    if (2000 + year, month) < (today.year(), today.month()) {
        return Some("La tarjeta está vencida".into());
    }
    None
}

fn validate_card_cvv(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("El CVV es requerido".into());
    }
    if !is_digits(value) || !(3..=4).contains(&value.len()) {
        return Some("El CVV debe tener 3 o 4 dígitos".into());
    }
    None
}

fn filled_and_valid(field: Field, value: &str, ctx: &ValidationContext) -> bool {
    !value.trim().is_empty() && validate_field(field, value, ctx).is_none()
}

/// Shipping step predicate
pub fn is_step1_valid(data: &CheckoutFormData) -> bool {
    let ctx = ValidationContext::new(data.delivery_type);

    if !Field::PROFILE
        .iter()
        .all(|f| filled_and_valid(*f, data.value(*f), &ctx))
    {
        return false;
    }

    match data.delivery_type {
        DeliveryType::Delivery => {
            if !filled_and_valid(Field::City, &data.city, &ctx)
                || !filled_and_valid(Field::ZipCode, &data.zip_code, &ctx)
            {
                return false;
            }
            let typed = !data.address.trim().is_empty();
            if data.selected_address_id.is_none() && !typed {
                return false;
            }
            // A typed address must be valid even when a saved one is selected
            !typed || validate_field(Field::Address, &data.address, &ctx).is_none()
        }
        DeliveryType::Pickup => !data.selected_store.trim().is_empty(),
    }
}

/// Payment step predicate
pub fn is_step2_valid(
    choice: Option<&PaymentChoice>,
    card: &CardInfo,
    methods: &[PaymentMethod],
    selected_card_id: Option<i64>,
    ctx: &ValidationContext,
) -> bool {
    let method_id = match choice {
        None => return false,
        Some(PaymentChoice::SavedCard) => return selected_card_id.is_some(),
        Some(PaymentChoice::Method(id)) => *id,
    };
    let Some(method) = methods.iter().find(|m| m.id == method_id) else {
        return false;
    };

    match method.kind() {
        PaymentKind::Redirect => true,
        PaymentKind::Card if selected_card_id.is_some() => true,
        PaymentKind::Card => Field::CARD
            .iter()
            .all(|f| filled_and_valid(*f, card.value(*f), ctx)),
        PaymentKind::Transfer | PaymentKind::Other => true,
    }
}
