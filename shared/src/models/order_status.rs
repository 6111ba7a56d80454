//! Order status Model

use serde::{Deserialize, Serialize};

/// Order status entity (`/api/estados`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatus {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_true")]
    pub activo: bool,
    #[serde(default)]
    pub orden: i32,
}

fn default_color() -> String {
    "#3b82f6".to_string()
}

fn default_true() -> bool {
    true
}

/// Create / update status payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusForm {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub color: String,
    pub activo: bool,
    /// Raw form input; parsed on submit
    pub orden: String,
}

impl OrderStatusForm {
    /// Empty form appended after `existing` statuses
    pub fn new_after(existing: usize) -> Self {
        Self {
            nombre: String::new(),
            descripcion: String::new(),
            color: default_color(),
            activo: true,
            orden: (existing + 1).to_string(),
        }
    }

    pub fn from_status(status: &OrderStatus) -> Self {
        Self {
            nombre: status.nombre.clone(),
            descripcion: status.descripcion.clone().unwrap_or_default(),
            color: status.color.clone(),
            activo: status.activo,
            orden: status.orden.to_string(),
        }
    }

    /// Trimmed JSON payload; `None` when `orden` is not a number
    pub fn to_payload(&self) -> Option<OrderStatusPayload> {
        Some(OrderStatusPayload {
            nombre: self.nombre.trim().to_string(),
            descripcion: self.descripcion.trim().to_string(),
            color: self.color.clone(),
            activo: self.activo,
            orden: self.orden.trim().parse().ok()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusPayload {
    pub nombre: String,
    pub descripcion: String,
    pub color: String,
    pub activo: bool,
    pub orden: i32,
}

impl From<&OrderStatus> for OrderStatusPayload {
    fn from(status: &OrderStatus) -> Self {
        Self {
            nombre: status.nombre.clone(),
            descripcion: status.descripcion.clone().unwrap_or_default(),
            color: status.color.clone(),
            activo: status.activo,
            orden: status.orden,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPosition {
    pub id: i64,
    pub orden: i32,
}

/// Body of `PUT /api/estados/orden/actualizar`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReorder {
    pub estados: Vec<StatusPosition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_payload() {
        let mut form = OrderStatusForm::new_after(3);
        assert_eq!(form.orden, "4");
        form.nombre = " Enviado ".into();
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.nombre, "Enviado");
        assert_eq!(payload.orden, 4);

        form.orden = "x".into();
        assert!(form.to_payload().is_none());
    }
}
