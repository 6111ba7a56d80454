use super::{TextBuilder, VIEW_WIDTH};
use crate::checkout::orchestrator::{Banner, BannerKind};
use crate::checkout::payment::ReturnStatus;

pub const LOADING_MESSAGE: &str = "Cargando información del checkout...";

/// Return-status notice, loading line and the banner
pub struct BannerView<'a> {
    banner: Option<&'a Banner>,
    return_status: Option<ReturnStatus>,
    loading: bool,
}

impl<'a> BannerView<'a> {
    pub fn new(banner: Option<&'a Banner>, return_status: Option<ReturnStatus>) -> Self {
        Self {
            banner,
            return_status,
            loading: false,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn render(&self) -> String {
        let mut b = TextBuilder::new(VIEW_WIDTH);
        if self.loading {
            b.write_line(LOADING_MESSAGE);
        }
        match self.return_status {
            Some(ReturnStatus::Approved) => b.write_line("¡Pago exitoso! Procesando tu pedido..."),
            Some(ReturnStatus::Pending) => {
                b.write_line("Pago pendiente");
                b.write_line("Te notificaremos cuando se confirme.");
            }
            Some(ReturnStatus::Failure) => {
                b.write_line("Pago rechazado");
                b.write_line("Por favor intenta nuevamente.");
            }
            None => {}
        }
        if let Some(banner) = self.banner {
            let tag = match banner.kind {
                BannerKind::Info => "i",
                BannerKind::Warning => "!",
                BannerKind::Error => "x",
            };
            b.write_line(&format!("[{}] {}", tag, banner.message));
        }
        b.finalize()
    }
}
