use super::{TextBuilder, VIEW_WIDTH};
use shared::models::ConfirmedOrder;
use shared::money::format_price;

/// Step 3: the confirmed order
pub struct ConfirmationView<'a> {
    order: &'a ConfirmedOrder,
}

impl<'a> ConfirmationView<'a> {
    pub fn new(order: &'a ConfirmedOrder) -> Self {
        Self { order }
    }

    pub fn render(&self) -> String {
        let order = self.order;
        let mut b = TextBuilder::new(VIEW_WIDTH);
        b.title("¡Pedido Confirmado!");
        b.write_line("Gracias por tu compra. Tu pedido ha sido procesado exitosamente.");
        b.blank();

        b.write_line("Detalles del Pedido");
        b.line_lr("Número de Pedido:", &order.number());
        b.line_lr(
            "Método de Pago:",
            order.metodo_pago.nombre.as_deref().unwrap_or_default(),
        );
        b.line_lr("Estado del Pago:", order.estado_pago.label());
        b.line_lr("Estado del Pedido:", &order.estado);
        b.write_line("Dirección de Entrega:");
        b.write_line(&format!("  {}", order.direccion_envio));
        b.blank();

        b.write_line("Productos Pedidos");
        b.dash_sep();
        for line in &order.detalles {
            let name = line.producto.nombre.as_deref().unwrap_or_default();
            b.line_lr(
                &format!("{} x{}", name, line.cantidad),
                &format_price(line.subtotal),
            );
        }
        b.dash_sep();
        b.line_lr("Total:", &format_price(order.monto_total));
        b.blank();

        b.write_line("Próximos Pasos");
        b.write_line("Recibirás un email de confirmación con los detalles de tu pedido y el seguimiento.");
        b.write_line("Tu pedido será procesado en los próximos días hábiles.");
        b.finalize()
    }
}
