use super::{TextBuilder, VIEW_WIDTH};
use crate::checkout::step::{CheckoutStep, STEP_LABELS};

/// Title and step indicator
pub struct CheckoutHeaderView<'a> {
    step: &'a CheckoutStep,
}

impl<'a> CheckoutHeaderView<'a> {
    pub fn new(step: &'a CheckoutStep) -> Self {
        Self { step }
    }

    pub fn render(&self) -> String {
        let current = usize::from(self.step.number());
        let indicator: Vec<String> = STEP_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let n = i + 1;
                if n < current {
                    format!("✓ {}", label)
                } else if n == current {
                    format!("[{} {}]", n, label)
                } else {
                    format!("{} {}", n, label)
                }
            })
            .collect();

        let mut b = TextBuilder::new(VIEW_WIDTH);
        b.write_line("Checkout");
        b.write_line(&indicator.join(" > "));
        b.eq_sep();
        b.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_marks_current_step() {
        let out = CheckoutHeaderView::new(&CheckoutStep::start()).render();
        assert!(out.contains("[1 Envío] > 2 Pago > 3 Confirmación"));

        let out = CheckoutHeaderView::new(&CheckoutStep::resumed_payment()).render();
        assert!(out.contains("✓ Envío > [2 Pago] > 3 Confirmación"));
    }
}
