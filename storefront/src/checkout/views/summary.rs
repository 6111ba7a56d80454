use super::{TextBuilder, VIEW_WIDTH};
use crate::checkout::orchestrator::Checkout;
use crate::checkout::step::CheckoutStep;
use shared::money::format_price;

/// Sidebar with items, totals and the Next action
///
/// On Confirmation the figures come from the confirmed order, not the
/// (now empty) cart.
pub struct OrderSummaryView<'a> {
    checkout: &'a Checkout,
}

impl<'a> OrderSummaryView<'a> {
    pub fn new(checkout: &'a Checkout) -> Self {
        Self { checkout }
    }

    pub fn render(&self) -> String {
        let mut b = TextBuilder::new(VIEW_WIDTH);
        b.title("Resumen del Pedido");

        let step = self.checkout.step();
        let (count, subtotal, shipping, taxes, total) = match step {
            CheckoutStep::Confirmation(confirmation) => {
                let order = confirmation.order();
                for line in &order.detalles {
                    b.line_lr(
                        &format!(
                            "{} x{}",
                            line.producto.nombre.as_deref().unwrap_or_default(),
                            line.cantidad
                        ),
                        &format_price(line.subtotal),
                    );
                }
                let r = order.resumen;
                let total = if r.total.is_zero() { order.monto_total } else { r.total };
                (order.detalles.len(), r.subtotal, r.shipping_cost, r.taxes, total)
            }
            _ => {
                let items = self.checkout.cart_items();
                if items.is_empty() {
                    b.write_line("No hay productos en el carrito.");
                }
                for item in &items {
                    b.line_lr(
                        &format!("{} x{}", item.display_name(), item.cantidad),
                        &format_price(item.line_total()),
                    );
                }
                let t = self.checkout.totals();
                (items.len(), t.subtotal, t.shipping_cost, t.taxes, t.total)
            }
        };

        b.dash_sep();
        b.line_lr(&format!("Subtotal ({} productos)", count), &format_price(subtotal));
        b.line_lr("Envío", &format_price(shipping));
        b.line_lr("Impuestos", &format_price(taxes));
        b.line_lr("Total", &format_price(total));
        b.blank();
        b.write_line("Pago 100% seguro");
        b.write_line("Devoluciones fáciles 30 días");

        if !step.is_confirmation() {
            let label = if self.checkout.is_processing() {
                "Procesando..."
            } else if step.is_shipping() {
                "Continuar"
            } else {
                "Realizar Pedido"
            };
            let state = if self.checkout.can_advance() { "" } else { " (deshabilitado)" };
            b.write_line(&format!("[{}]{}", label, state));
        }
        b.finalize()
    }
}
