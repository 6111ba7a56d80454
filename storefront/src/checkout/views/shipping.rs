use super::{TextBuilder, VIEW_WIDTH};
use crate::checkout::form::{DeliveryType, STORES};
use crate::checkout::orchestrator::Checkout;
use crate::checkout::validation::Field;
use shared::money::format_price;

/// Step 1: cart lines, delivery choice and contact/address fields
pub struct ShippingView<'a> {
    checkout: &'a Checkout,
}

impl<'a> ShippingView<'a> {
    pub fn new(checkout: &'a Checkout) -> Self {
        Self { checkout }
    }

    fn render_cart(&self, b: &mut TextBuilder) {
        let items = self.checkout.cart_items();
        if items.is_empty() {
            b.write_line("Tu carrito está vacío");
            return;
        }
        for item in &items {
            // "-" is disabled at quantity 1
            let minus = if item.cantidad > 1 { "[-]" } else { "(-)" };
            b.line_lr(
                &format!("{} x{}", item.display_name(), item.cantidad),
                &format_price(item.line_total()),
            );
            b.write_line(&format!("  {} [+] [Eliminar]", minus));
        }
    }

    pub fn render(&self) -> String {
        let form = self.checkout.form();
        let data = form.data();
        let err = move |f: Field| form.error(f);

        let mut b = TextBuilder::new(VIEW_WIDTH);
        b.title("Información de Envío");
        self.render_cart(&mut b);
        b.blank();

        b.option(
            data.delivery_type == DeliveryType::Delivery,
            "Envío a Domicilio",
        );
        b.option(
            data.delivery_type == DeliveryType::Pickup,
            "Recojo en Tienda - Retira en nuestro local (Gratis)",
        );
        b.blank();

        b.field("Nombre Completo *", &data.full_name, err(Field::FullName));
        b.field("Correo Electrónico *", &data.email, err(Field::Email));
        b.field("Teléfono *", &data.phone, err(Field::Phone));

        match data.delivery_type {
            DeliveryType::Pickup => {
                b.write_line("Seleccionar tienda *");
                for store in STORES {
                    b.option(data.selected_store == store, store);
                }
                if let Some(e) = err(Field::SelectedStore) {
                    b.write_line(&format!("  ! {}", e));
                }
            }
            DeliveryType::Delivery => {
                let addresses = &self.checkout.data().saved_addresses;
                if !addresses.is_empty() {
                    b.write_line("Seleccionar dirección guardada");
                    for address in addresses {
                        let selected =
                            !data.use_custom_address && data.selected_address_id == Some(address.id);
                        b.option(selected, &address.label());
                    }
                    b.option(data.use_custom_address, "+ Agregar dirección nueva");
                }
                if data.uses_typed_address() {
                    b.field("Dirección *", &data.address, err(Field::Address));
                }
                b.field("Ciudad *", &data.city, err(Field::City));
                b.field("Código Postal *", &data.zip_code, err(Field::ZipCode));
            }
        }
        b.finalize()
    }
}
