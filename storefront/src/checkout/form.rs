//! Checkout form state
//!
//! Holds what the shopper typed, the per-field errors and which fields were
//! touched. Fields are re-validated on change only once touched; blur and
//! submit validate synchronously.

use super::context::UserSession;
use super::formatters::{format_card_cvv, format_card_expiry, format_card_number};
use super::validation::{Field, ValidationContext, is_step1_valid, is_step2_valid, validate_field};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{PaymentKind, PaymentMethod};
use std::collections::{BTreeMap, HashSet};

/// Pickup stores offered on the shipping step
pub const STORES: [&str; 4] = [
    "Centro – Av. Principal 123",
    "Norte – Calle Comercial 456",
    "Sur – Plaza Shopping 789",
    "Este – Mall Central 101",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    #[default]
    Delivery,
    Pickup,
}

/// What the shopper picked on the payment step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum PaymentChoice {
    /// One of the backend payment methods
    Method(i64),
    /// A card saved in the profile (see `selected_card_id`)
    SavedCard,
}

/// Address selector value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressChoice {
    Saved(i64),
    Custom,
    None,
}

/// New card entry; formatted on input, never sent to the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    pub card_number: String,
    pub card_name: String,
    pub card_expiry: String,
    #[serde(rename = "cardCVV")]
    pub card_cvv: String,
}

impl CardInfo {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::CardNumber => &self.card_number,
            Field::CardName => &self.card_name,
            Field::CardExpiry => &self.card_expiry,
            Field::CardCvv => &self.card_cvv,
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFormData {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub delivery_type: DeliveryType,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub selected_store: String,
    pub selected_address_id: Option<i64>,
    pub use_custom_address: bool,
    pub payment_method: Option<PaymentChoice>,
    pub selected_card_id: Option<i64>,
    #[serde(skip)]
    pub card_info: CardInfo,
}

impl CheckoutFormData {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::ZipCode => &self.zip_code,
            Field::SelectedStore => &self.selected_store,
            card => self.card_info.value(card),
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::ZipCode => &mut self.zip_code,
            Field::SelectedStore => &mut self.selected_store,
            Field::CardNumber => &mut self.card_info.card_number,
            Field::CardName => &mut self.card_info.card_name,
            Field::CardExpiry => &mut self.card_info.card_expiry,
            Field::CardCvv => &mut self.card_info.card_cvv,
        }
    }

    /// Pickup, or a typed / custom address rather than a saved one
    pub fn uses_typed_address(&self) -> bool {
        self.delivery_type == DeliveryType::Delivery
            && (self.use_custom_address || self.selected_address_id.is_none())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    data: CheckoutFormData,
    errors: BTreeMap<Field, String>,
    touched: HashSet<Field>,
    today: Option<NaiveDate>,
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the date used for card expiry checks
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn data(&self) -> &CheckoutFormData {
        &self.data
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn context(&self) -> ValidationContext {
        let ctx = ValidationContext::new(self.data.delivery_type);
        match self.today {
            Some(today) => ctx.at(today),
            None => ctx,
        }
    }

    fn validate_and_update(&mut self, field: Field, ctx: &ValidationContext) -> Option<String> {
        let error = validate_field(field, self.data.value(field), ctx);
        match &error {
            Some(msg) => {
                self.errors.insert(field, msg.clone());
            }
            None => {
                self.errors.remove(&field);
            }
        }
        error
    }

    /// Text field edit; card fields go through [`Self::on_card_change`]
    pub fn handle_field_change(&mut self, field: Field, value: impl Into<String>) {
        if field.is_card() {
            self.on_card_change(field, value);
            return;
        }
        *self.data.slot(field) = value.into();
        if self.is_touched(field) {
            let ctx = self.context();
            self.validate_and_update(field, &ctx);
        }
    }

    /// Card field edit with input formatting
    pub fn on_card_change(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        let formatted = match field {
            Field::CardNumber => format_card_number(&value),
            Field::CardExpiry => format_card_expiry(&value),
            Field::CardCvv => format_card_cvv(&value),
            Field::CardName => value,
            _ => return,
        };
        *self.data.slot(field) = formatted;
        if self.is_touched(field) {
            let ctx = self.context();
            self.validate_and_update(field, &ctx);
        }
    }

    /// Mark touched and validate the current value
    pub fn handle_blur(&mut self, field: Field) -> Option<String> {
        self.touched.insert(field);
        let ctx = self.context();
        self.validate_and_update(field, &ctx)
    }

    pub fn handle_address_change(&mut self, choice: AddressChoice) {
        let (id, custom) = match choice {
            AddressChoice::Saved(id) => (Some(id), false),
            AddressChoice::Custom => (None, true),
            AddressChoice::None => (None, false),
        };
        self.data.selected_address_id = id;
        self.data.use_custom_address = custom;
    }

    /// Pick a backend payment method (or the saved-card entry)
    pub fn handle_payment_method_change(&mut self, choice: PaymentChoice) {
        if let PaymentChoice::Method(_) = choice {
            self.data.selected_card_id = None;
        }
        self.data.payment_method = Some(choice);
    }

    pub fn select_saved_card(&mut self, card_id: i64) {
        self.data.payment_method = Some(PaymentChoice::SavedCard);
        self.data.selected_card_id = Some(card_id);
        for field in Field::CARD {
            self.errors.remove(&field);
        }
    }

    /// Switching to pickup drops address errors
    pub fn handle_delivery_type_change(&mut self, delivery: DeliveryType) {
        self.data.delivery_type = delivery;
        if delivery == DeliveryType::Pickup {
            let ctx = self.context();
            for field in Field::ADDRESS {
                self.validate_and_update(field, &ctx);
            }
        }
    }

    /// Fill name, email and phone from the profile where still empty
    pub fn hydrate_from_user(&mut self, user: &UserSession) {
        let pairs = [
            (Field::FullName, &user.nombre),
            (Field::Email, &user.email),
            (Field::Phone, &user.telefono),
        ];
        for (field, source) in pairs {
            if let Some(v) = source.as_deref().filter(|v| !v.trim().is_empty()) {
                let slot = self.data.slot(field);
                if slot.trim().is_empty() {
                    *slot = v.to_string();
                }
            }
        }
    }

    /// Validate every shipping field, recording errors
    pub fn validate_step1(&mut self) -> bool {
        let ctx = self.context();
        let mut fields: Vec<Field> = Field::PROFILE.to_vec();
        match self.data.delivery_type {
            DeliveryType::Delivery => {
                fields.extend([Field::City, Field::ZipCode]);
                if self.data.uses_typed_address() || !self.data.address.trim().is_empty() {
                    fields.push(Field::Address);
                }
            }
            DeliveryType::Pickup => fields.push(Field::SelectedStore),
        }
        for field in fields {
            self.touched.insert(field);
            self.validate_and_update(field, &ctx);
        }
        is_step1_valid(&self.data)
    }

    /// Validate the payment step, recording card errors when a new card is entered
    pub fn validate_step2(&mut self, methods: &[PaymentMethod]) -> bool {
        let ctx = self.context();
        let new_card = match self.data.payment_method {
            Some(PaymentChoice::Method(id)) => {
                self.data.selected_card_id.is_none()
                    && methods
                        .iter()
                        .any(|m| m.id == id && m.kind() == PaymentKind::Card)
            }
            _ => false,
        };
        if new_card {
            for field in Field::CARD {
                self.touched.insert(field);
                self.validate_and_update(field, &ctx);
            }
        }
        is_step2_valid(
            self.data.payment_method.as_ref(),
            &self.data.card_info,
            methods,
            self.data.selected_card_id,
            &ctx,
        )
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
        self.touched.clear();
    }
}
