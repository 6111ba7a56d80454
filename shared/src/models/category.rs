//! Category Model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    /// `true`/`false` or `{ "nombre": "Activo" | "Inactivo" }`
    #[serde(default)]
    pub estado: Option<Value>,
    /// Products attached to the category (only counted)
    #[serde(default)]
    pub productos: Vec<Value>,
}

impl Category {
    pub fn is_active(&self) -> bool {
        is_active_flag(self.estado.as_ref())
    }

    pub fn product_count(&self) -> usize {
        self.productos.len()
    }
}

/// Read the backend's active flag in any of its shapes
pub fn is_active_flag(estado: Option<&Value>) -> bool {
    match estado {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("activo") || s == "true",
        Some(Value::Object(map)) => map
            .get("nombre")
            .and_then(Value::as_str)
            .is_some_and(|n| n.eq_ignore_ascii_case("activo")),
        _ => false,
    }
}

/// Create / update category form (sent as multipart)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryForm {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub estado: bool,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            descripcion: String::new(),
            estado: true,
        }
    }
}

impl CategoryForm {
    /// Form prefilled from an existing category
    pub fn from_category(category: &Category) -> Self {
        Self {
            nombre: category.nombre.clone(),
            descripcion: category.descripcion.clone().unwrap_or_default(),
            estado: category.is_active(),
        }
    }

    /// Trimmed multipart fields: `nombre`, `descripcion`, `estado`
    pub fn multipart_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("nombre", self.nombre.trim().to_string()),
            ("descripcion", self.descripcion.trim().to_string()),
            ("estado", self.estado.to_string()),
        ]
    }
}
