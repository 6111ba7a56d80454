//! User and Role Models

use serde::{Deserialize, Serialize};

/// Role entity (`/api/roles`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub nombre: String,
}

impl Role {
    /// Display name: `admin` → Administrador, `cliente` → Cliente
    pub fn display_name(&self) -> &str {
        match self.nombre.as_str() {
            "admin" => "Administrador",
            "cliente" => "Cliente",
            other => other,
        }
    }
}

/// User entity (`/api/usuarios`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    #[serde(default)]
    pub rol: Option<Role>,
    #[serde(default)]
    pub rol_id: Option<i64>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
    #[serde(default)]
    pub codigo_postal: Option<String>,
    #[serde(default)]
    pub estado_id: Option<i64>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn role_id(&self) -> Option<i64> {
        self.rol.as_ref().map(|r| r.id).or(self.rol_id)
    }

    pub fn role_label(&self) -> &str {
        self.rol.as_ref().map(Role::display_name).unwrap_or("Cliente")
    }
}

/// Create / update user form (raw inputs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    pub nombre: String,
    pub email: String,
    pub password: String,
    pub rol: String,
    pub direccion: String,
    pub telefono: String,
    pub ciudad: String,
    pub codigo_postal: String,
    pub estado_id: i64,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            email: String::new(),
            password: String::new(),
            rol: "2".to_string(),
            direccion: String::new(),
            telefono: String::new(),
            ciudad: String::new(),
            codigo_postal: String::new(),
            estado_id: 1,
        }
    }
}

impl UserForm {
    /// Form prefilled from an existing user (password left blank)
    pub fn from_user(user: &User) -> Self {
        Self {
            nombre: user.nombre.clone(),
            email: user.email.clone(),
            password: String::new(),
            rol: user.role_id().map(|id| id.to_string()).unwrap_or_else(|| "2".into()),
            direccion: user.direccion.clone().unwrap_or_default(),
            telefono: user.telefono.clone().unwrap_or_default(),
            ciudad: user.ciudad.clone().unwrap_or_default(),
            codigo_postal: user.codigo_postal.clone().unwrap_or_default(),
            estado_id: user.estado_id.unwrap_or(1),
        }
    }

    /// JSON payload; the password is only sent when creating or when set
    pub fn to_payload(&self, creating: bool) -> UserPayload {
        UserPayload {
            nombre: self.nombre.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            direccion: self.direccion.trim().to_string(),
            estado_id: self.estado_id,
            telefono: self.telefono.trim().to_string(),
            ciudad: self.ciudad.trim().to_string(),
            codigo_postal: self.codigo_postal.trim().to_string(),
            rol_id: self.rol.trim().parse().ok(),
            password: (creating || !self.password.is_empty()).then(|| self.password.clone()),
        }
    }
}

/// Body of `POST /api/usuarios/register` and `PUT /api/usuarios/update/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub nombre: String,
    pub email: String,
    pub direccion: String,
    pub estado_id: i64,
    pub telefono: String,
    pub ciudad: String,
    pub codigo_postal: String,
    pub rol_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
