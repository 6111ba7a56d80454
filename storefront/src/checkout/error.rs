//! Checkout errors
//!
//! [`CheckoutError`] is what the workflow raises internally;
//! [`CheckoutFailure`] is the classification shown to the shopper.

use super::session::SessionStoreError;
use shared::error::ErrorCode;
use thiserror::Error;
use tienda_client::ClientError;

/// Banner shown when an order fails without a usable message
pub const GENERIC_ORDER_ERROR: &str = "Error al procesar el pedido";

/// Banner shown when the payment redirect fails without a usable message
pub const GENERIC_REDIRECT_ERROR: &str =
    "Error al iniciar pago con Mercado Pago. Por favor intenta de nuevo.";

/// Banner shown when the provider approved but the order could not be created
pub const PAID_BUT_NOT_CREATED: &str =
    "El pago fue exitoso pero hubo un error al crear el pedido. Por favor contacta a soporte.";

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("El carrito está vacío")]
    CartEmpty,

    #[error("Faltan datos requeridos del usuario")]
    ProfileIncomplete,

    #[error("Debes seleccionar un método de pago")]
    PaymentMethodRequired,

    #[error("Debes seleccionar una tarjeta")]
    CardRequired,

    #[error("Precio inválido para {0}")]
    InvalidPrice(String),

    /// Provider answered `success: false`
    #[error("{0}")]
    PreferenceRejected(String),

    #[error("No se recibió URL de checkout de Mercado Pago")]
    RedirectMissing,

    #[error(transparent)]
    Api(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;

impl CheckoutError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::CartEmpty => ErrorCode::CartEmpty,
            Self::ProfileIncomplete => ErrorCode::ProfileIncomplete,
            Self::PaymentMethodRequired => ErrorCode::PaymentMethodRequired,
            Self::CardRequired => ErrorCode::PaymentCardRequired,
            Self::InvalidPrice(_) => ErrorCode::ProductInvalidPrice,
            Self::PreferenceRejected(_) => ErrorCode::PaymentPreferenceFailed,
            Self::RedirectMissing => ErrorCode::PaymentRedirectMissing,
            Self::Api(e) => e.code(),
            Self::Store(_) => ErrorCode::StorageError,
        }
    }

    /// Message fit for a banner, `None` for transport-level noise
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Api(e) => e.server_message().map(str::to_string),
            Self::Store(_) => None,
            other => Some(other.to_string()).filter(|m| !m.trim().is_empty()),
        }
    }

    fn is_connectivity(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_connectivity())
    }

    fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }
}

/// Order failure as presented to the shopper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutFailure {
    /// Unknown user or missing/expired session
    Unregistered,
    InvalidPaymentMethod,
    InsufficientStock,
    /// Backend unreachable
    Connectivity,
    Generic(String),
}

impl CheckoutFailure {
    /// Classify an order-creation failure
    pub fn classify(err: &CheckoutError) -> Self {
        if err.is_connectivity() {
            return Self::Connectivity;
        }
        let message = err.user_message().unwrap_or_default();
        if err.is_unauthorized() || message.contains("Usuario no encontrado") || message.contains("401")
        {
            Self::Unregistered
        } else if message.contains("Método de pago inválido") {
            Self::InvalidPaymentMethod
        } else if message.to_lowercase().contains("stock") {
            Self::InsufficientStock
        } else if message.trim().is_empty() {
            Self::Generic(GENERIC_ORDER_ERROR.to_string())
        } else {
            Self::Generic(message)
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Unregistered => {
                "Debes estar registrado para realizar un pedido. Por favor inicia sesión.".into()
            }
            Self::InvalidPaymentMethod => {
                "Método de pago no válido. Por favor selecciona otro.".into()
            }
            Self::InsufficientStock => {
                "Algunos productos no tienen stock suficiente. Revisa tu carrito.".into()
            }
            Self::Connectivity => "Error de conexión. Verifica que el servidor esté funcionando.".into(),
            Self::Generic(msg) => msg.clone(),
        }
    }
}

/// Banner text for a failed payment redirect (message shown verbatim)
pub fn redirect_failure_message(err: &CheckoutError) -> String {
    err.user_message()
        .unwrap_or_else(|| GENERIC_REDIRECT_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, message: &str) -> CheckoutError {
        CheckoutError::Api(ClientError::Api {
            status,
            message: message.into(),
        })
    }

    #[test]
    fn test_classify_unregistered() {
        let err = api(400, "Usuario no encontrado");
        assert_eq!(CheckoutFailure::classify(&err), CheckoutFailure::Unregistered);

        let err = CheckoutError::Api(ClientError::Unauthorized(String::new()));
        assert_eq!(CheckoutFailure::classify(&err), CheckoutFailure::Unregistered);
    }

    #[test]
    fn test_classify_payment_and_stock() {
        assert_eq!(
            CheckoutFailure::classify(&api(400, "Método de pago inválido")),
            CheckoutFailure::InvalidPaymentMethod
        );
        let failure = CheckoutFailure::classify(&api(409, "Sin stock para Arroz"));
        assert_eq!(failure, CheckoutFailure::InsufficientStock);
        assert_eq!(
            failure.message(),
            "Algunos productos no tienen stock suficiente. Revisa tu carrito."
        );
    }

    #[test]
    fn test_classify_generic() {
        let failure = CheckoutFailure::classify(&CheckoutError::CartEmpty);
        assert_eq!(failure.message(), "El carrito está vacío");

        let err = CheckoutError::Api(ClientError::InvalidResponse(String::new()));
        assert_eq!(CheckoutFailure::classify(&err).message(), GENERIC_ORDER_ERROR);
    }

    #[test]
    fn test_redirect_failure_message() {
        let err = CheckoutError::PreferenceRejected("Token de MP inválido".into());
        assert_eq!(redirect_failure_message(&err), "Token de MP inválido");

        let err = CheckoutError::Api(ClientError::Internal("boom".into()));
        assert_eq!(redirect_failure_message(&err), GENERIC_REDIRECT_ERROR);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CheckoutError::CardRequired.code(), ErrorCode::PaymentCardRequired);
        assert_eq!(
            CheckoutError::Api(ClientError::Unauthorized(String::new())).code(),
            ErrorCode::NotAuthenticated
        );
        let store = SessionStoreError::Io(std::io::Error::other("disco lleno"));
        assert_eq!(CheckoutError::Store(store).code(), ErrorCode::StorageError);
    }
}
