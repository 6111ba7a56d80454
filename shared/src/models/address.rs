//! Saved address model

use serde::{Deserialize, Serialize};

/// Address saved in the user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAddress {
    pub id: i64,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub calle: String,
    #[serde(default)]
    pub ciudad: String,
    #[serde(default)]
    pub codigo_postal: String,
    #[serde(default)]
    pub referencia: Option<String>,
    #[serde(default)]
    pub es_principal: bool,
}

impl SavedAddress {
    /// Shipping line: `calle, ciudad codigoPostal (referencia)`
    pub fn shipping_line(&self) -> String {
        let mut line = format!("{}, {} {}", self.calle, self.ciudad, self.codigo_postal);
        if let Some(r) = self.referencia.as_deref().filter(|r| !r.trim().is_empty()) {
            line.push_str(&format!(" ({})", r));
        }
        line
    }

    /// Selector label: `nombre - calle, ciudad (Principal)`
    pub fn label(&self) -> String {
        let mut label = format!(
            "{} - {}, {}",
            self.nombre.as_deref().unwrap_or("Dirección"),
            self.calle,
            self.ciudad
        );
        if self.es_principal {
            label.push_str(" (Principal)");
        }
        label
    }
}
