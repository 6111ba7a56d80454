use super::{TextBuilder, VIEW_WIDTH};
use crate::checkout::form::PaymentChoice;
use crate::checkout::orchestrator::Checkout;
use crate::checkout::validation::Field;
use shared::models::SavedCard;

/// Step 2: payment methods, saved cards and card entry
pub struct PaymentView<'a> {
    checkout: &'a Checkout,
}

fn card_label(card: &SavedCard) -> String {
    let mut label = format!(
        "{} {}",
        card.tipo_tarjeta.as_deref().unwrap_or("Tarjeta"),
        card.numero_enmascarado.as_deref().unwrap_or("****")
    );
    if let Some(exp) = card.fecha_vencimiento.as_deref() {
        label.push_str(&format!(" - vence {}", exp));
    }
    if card.es_principal {
        label.push_str(" (Principal)");
    }
    label
}

impl<'a> PaymentView<'a> {
    pub fn new(checkout: &'a Checkout) -> Self {
        Self { checkout }
    }

    pub fn render(&self) -> String {
        let form = self.checkout.form();
        let data = form.data();
        let reference = self.checkout.data();
        let mut b = TextBuilder::new(VIEW_WIDTH);
        b.title("Método de Pago");

        if self.checkout.is_loading() {
            b.write_line("Cargando métodos de pago...");
            return b.finalize();
        }

        if !reference.saved_cards.is_empty() {
            b.write_line("Mis Tarjetas Guardadas");
            for card in &reference.saved_cards {
                let selected = data.payment_method == Some(PaymentChoice::SavedCard)
                    && data.selected_card_id == Some(card.id);
                b.option(selected, &card_label(card));
            }
            b.blank();
            b.write_line("O usar otro método de pago");
        }

        if reference.payment_methods.is_empty() {
            b.write_line("No hay métodos de pago disponibles");
        }
        for method in &reference.payment_methods {
            let selected = data.payment_method == Some(PaymentChoice::Method(method.id));
            let label = match method.descripcion.as_deref() {
                Some(desc) if !desc.trim().is_empty() => format!("{} - {}", method.nombre, desc),
                _ => method.nombre.clone(),
            };
            b.option(selected, &label);
        }

        let entering_card = match data.payment_method {
            Some(PaymentChoice::Method(id)) => reference.method(id).is_some_and(|m| m.is_card()),
            _ => false,
        };
        if entering_card {
            b.blank();
            let card = &data.card_info;
            b.field("Número de Tarjeta *", &card.card_number, form.error(Field::CardNumber));
            b.field("Nombre en la Tarjeta *", &card.card_name, form.error(Field::CardName));
            b.field("Fecha de Vencimiento *", &card.card_expiry, form.error(Field::CardExpiry));
            // CVV is never echoed
            let cvv = "*".repeat(card.card_cvv.chars().count());
            b.field("CVV *", &cvv, form.error(Field::CardCvv));
        }

        if self.checkout.selected_method().is_some_and(|m| m.is_redirect()) {
            b.blank();
            let action = if self.checkout.is_processing() {
                "Preparando pago..."
            } else {
                "Pagar con Mercado Pago"
            };
            b.write_line(&format!("[{}]", action));
        }

        b.blank();
        b.write_line("[Volver]");
        b.finalize()
    }
}
