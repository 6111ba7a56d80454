//! Product Model

use crate::money::PriceValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Product entity (`/api/products`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub precio: PriceValue,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default, alias = "categoria_id")]
    pub categoria_id: Option<i64>,
    #[serde(default)]
    pub categoria: Option<Value>,
    #[serde(default)]
    pub estado: Option<Value>,
    #[serde(default)]
    pub imagen: Option<String>,
}

impl Product {
    pub fn is_active(&self) -> bool {
        super::category::is_active_flag(self.estado.as_ref())
    }

    /// Category id from `categoriaId` or the nested `categoria.id`
    pub fn category_id(&self) -> Option<i64> {
        self.categoria_id.or_else(|| {
            self.categoria
                .as_ref()
                .and_then(|c| c.get("id"))
                .and_then(Value::as_i64)
        })
    }
}

/// Uploaded image metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Create / update product form (raw inputs, sent as multipart)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub nombre: String,
    pub descripcion: String,
    pub precio: String,
    pub stock: String,
    pub marca: String,
    pub categoria_id: String,
    pub estado: bool,
    pub imagen: Option<ImageUpload>,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            nombre: product.nombre.clone(),
            descripcion: product.descripcion.clone().unwrap_or_default(),
            precio: format!("{:.2}", product.precio.to_decimal()),
            stock: product.stock.to_string(),
            marca: product.marca.clone().unwrap_or_default(),
            categoria_id: product.category_id().map(|id| id.to_string()).unwrap_or_default(),
            estado: product.is_active(),
            imagen: None,
        }
    }

    /// Text multipart fields; price fixed to 2 decimals, stock truncated
    pub fn multipart_fields(&self) -> Vec<(&'static str, String)> {
        let precio = self
            .precio
            .trim()
            .parse::<f64>()
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|_| self.precio.trim().to_string());
        let stock = self
            .stock
            .trim()
            .parse::<f64>()
            .map(|s| (s.trunc() as i64).to_string())
            .unwrap_or_else(|_| self.stock.trim().to_string());
        vec![
            ("nombre", self.nombre.trim().to_string()),
            ("descripcion", self.descripcion.trim().to_string()),
            ("precio", precio),
            ("stock", stock),
            ("marca", self.marca.trim().to_string()),
            ("categoria_id", self.categoria_id.trim().to_string()),
            ("estado", self.estado.to_string()),
        ]
    }
}
