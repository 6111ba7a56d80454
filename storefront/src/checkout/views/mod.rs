//! Plain-text renderers for the checkout screens
//!
//! Every view borrows the state it shows and produces a `String` through
//! [`TextBuilder`]. Nothing here mutates the checkout.

mod banner;
mod confirmation;
mod header;
mod payment;
mod shipping;
mod summary;

pub use banner::BannerView;
pub use confirmation::ConfirmationView;
pub use header::CheckoutHeaderView;
pub use payment::PaymentView;
pub use shipping::ShippingView;
pub use summary::OrderSummaryView;

use super::orchestrator::Checkout;
use super::step::CheckoutStep;

/// Default line width of the text views
pub const VIEW_WIDTH: usize = 48;

pub(crate) fn text_width(s: &str) -> usize {
    s.chars().count()
}

pub struct TextBuilder {
    buf: String,
    width: usize,
}

impl TextBuilder {
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::new(),
            width,
        }
    }

    pub fn write_line(&mut self, s: &str) {
        self.buf.push_str(s);
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn eq_sep(&mut self) {
        self.write_line(&"=".repeat(self.width));
    }

    pub fn dash_sep(&mut self) {
        self.write_line(&"-".repeat(self.width));
    }

    pub fn title(&mut self, s: &str) {
        self.write_line(s);
        self.write_line(&"-".repeat(text_width(s)));
    }

    /// Left text, right text, padded to the line width
    pub fn line_lr(&mut self, left: &str, right: &str) {
        let used = text_width(left) + text_width(right);
        if used >= self.width {
            self.write_line(&format!("{} {}", left, right));
        } else {
            let spaces = " ".repeat(self.width - used);
            self.write_line(&format!("{}{}{}", left, spaces, right));
        }
    }

    /// Labelled input with its inline error underneath
    pub fn field(&mut self, label: &str, value: &str, error: Option<&str>) {
        self.write_line(&format!("{}: {}", label, value));
        if let Some(err) = error {
            self.write_line(&format!("  ! {}", err));
        }
    }

    /// Radio/checkbox style option
    pub fn option(&mut self, selected: bool, label: &str) {
        let mark = if selected { "(x)" } else { "( )" };
        self.write_line(&format!("{} {}", mark, label));
    }

    pub fn finalize(self) -> String {
        self.buf
    }
}

/// Full checkout screen: header, banner, current step and summary
pub struct CheckoutPage<'a> {
    checkout: &'a Checkout,
}

impl<'a> CheckoutPage<'a> {
    pub fn new(checkout: &'a Checkout) -> Self {
        Self { checkout }
    }

    pub fn render(&self) -> String {
        let c = self.checkout;
        let mut out = CheckoutHeaderView::new(c.step()).render();
        out.push_str(
            &BannerView::new(c.banner(), c.return_status())
                .loading(c.is_loading())
                .render(),
        );
        let body = match c.step() {
            CheckoutStep::Shipping(_) => ShippingView::new(c).render(),
            CheckoutStep::Payment(_) => PaymentView::new(c).render(),
            CheckoutStep::Confirmation(step) => ConfirmationView::new(step.order()).render(),
        };
        out.push_str(&body);
        out.push('\n');
        out.push_str(&OrderSummaryView::new(c).render());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_lr_pads_to_width() {
        let mut b = TextBuilder::new(20);
        b.line_lr("Envío", "S/. 9.99");
        let out = b.finalize();
        assert_eq!(out, "Envío       S/. 9.99\n");
        assert_eq!(text_width(out.trim_end()), 20);
    }

    #[test]
    fn test_field_with_error() {
        let mut b = TextBuilder::new(20);
        b.field("Teléfono *", "12", Some("Debe tener 9 dígitos"));
        assert_eq!(b.finalize(), "Teléfono *: 12\n  ! Debe tener 9 dígitos\n");
    }
}
