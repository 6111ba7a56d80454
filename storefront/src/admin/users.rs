//! User screen: account form validation, search and role badges

use super::{FormErrors, collect, matches_search};
use crate::util::validation::{
    MAX_ADDRESS_LEN, MAX_CITY_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN,
    MIN_PASSWORD_LEN, char_len, has_letter, is_digits, is_email, is_letter,
};
use shared::models::{Role, User, UserForm};

pub const MIN_USER_NAME_LEN: usize = 2;
pub const MIN_ADDRESS_LEN: usize = 5;
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;
pub const MAX_PHONE_LEN: usize = 20;
pub const MIN_CITY_LEN: usize = 2;
pub const MIN_POSTAL_LEN: usize = 4;
pub const MAX_POSTAL_LEN: usize = 10;

pub fn validate_user_name(nombre: &str) -> Option<String> {
    let nombre = nombre.trim();
    if nombre.is_empty() {
        return Some("El nombre es requerido".into());
    }
    let len = char_len(nombre);
    if len < MIN_USER_NAME_LEN {
        return Some(format!("El nombre debe tener al menos {} caracteres", MIN_USER_NAME_LEN));
    }
    if len > MAX_NAME_LEN {
        return Some(format!("El nombre no puede exceder {} caracteres", MAX_NAME_LEN));
    }
    if !nombre.chars().all(|c| is_letter(c) || c == ' ') {
        return Some("El nombre solo puede contener letras y espacios".into());
    }
    None
}

pub fn validate_user_email(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        return Some("El correo electrónico es requerido".into());
    }
    if !is_email(email) {
        return Some("Formato de correo inválido (ejemplo@correo.com)".into());
    }
    if char_len(email) > MAX_EMAIL_LEN {
        return Some(format!(
            "El correo es demasiado largo (máx. {} caracteres)",
            MAX_EMAIL_LEN
        ));
    }
    None
}

/// Required when creating; on edit an empty password keeps the current one
pub fn validate_password(password: &str, creating: bool) -> Option<String> {
    if password.is_empty() {
        return creating.then(|| "La contraseña es requerida".to_string());
    }
    let len = char_len(password);
    if len < MIN_PASSWORD_LEN {
        return Some(format!(
            "La contraseña debe tener al menos {} caracteres",
            MIN_PASSWORD_LEN
        ));
    }
    if len > MAX_PASSWORD_LEN {
        return Some(format!(
            "La contraseña es demasiado larga (máx. {} caracteres)",
            MAX_PASSWORD_LEN
        ));
    }
    if !password.chars().any(char::is_uppercase) {
        return Some("Debe contener al menos una letra mayúscula".into());
    }
    if !password.chars().any(char::is_lowercase) {
        return Some("Debe contener al menos una letra minúscula".into());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("Debe contener al menos un número".into());
    }
    if password.chars().any(char::is_whitespace) {
        return Some("No puede contener espacios en blanco".into());
    }
    None
}

pub fn validate_user_address(direccion: &str) -> Option<String> {
    let direccion = direccion.trim();
    if direccion.is_empty() {
        return None;
    }
    let len = char_len(direccion);
    if len < MIN_ADDRESS_LEN {
        return Some(format!(
            "La dirección debe tener al menos {} caracteres",
            MIN_ADDRESS_LEN
        ));
    }
    if len > MAX_ADDRESS_LEN {
        return Some(format!(
            "La dirección es demasiado larga (máx. {} caracteres)",
            MAX_ADDRESS_LEN
        ));
    }
    if direccion.chars().all(|c| c.is_ascii_digit() || c == ' ') {
        return Some("La dirección debe incluir texto descriptivo".into());
    }
    if !has_letter(direccion) {
        return Some("La dirección debe contener al menos una letra".into());
    }
    let allowed = |c: char| {
        is_letter(c) || c.is_ascii_digit() || matches!(c, ' ' | ',' | '.' | '-' | '#' | '°')
    };
    if !direccion.chars().all(allowed) {
        return Some("La dirección contiene caracteres no permitidos".into());
    }
    None
}

pub fn validate_user_phone(telefono: &str) -> Option<String> {
    let telefono = telefono.trim();
    if telefono.is_empty() {
        return None;
    }
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+' | '.');
    if !telefono.chars().all(allowed) {
        return Some("El teléfono solo puede contener números y símbolos: + ( ) - .".into());
    }
    let digits = telefono.chars().filter(char::is_ascii_digit).count();
    if digits < MIN_PHONE_DIGITS {
        return Some(format!(
            "El teléfono debe tener al menos {} dígitos",
            MIN_PHONE_DIGITS
        ));
    }
    if digits > MAX_PHONE_DIGITS {
        return Some(format!(
            "El teléfono no puede tener más de {} dígitos",
            MAX_PHONE_DIGITS
        ));
    }
    if char_len(telefono) > MAX_PHONE_LEN {
        return Some(format!(
            "El teléfono es demasiado largo (máx. {} caracteres)",
            MAX_PHONE_LEN
        ));
    }
    None
}

pub fn validate_user_city(ciudad: &str) -> Option<String> {
    let ciudad = ciudad.trim();
    if ciudad.is_empty() {
        return None;
    }
    let len = char_len(ciudad);
    if len < MIN_CITY_LEN {
        return Some(format!("La ciudad debe tener al menos {} caracteres", MIN_CITY_LEN));
    }
    if len > MAX_CITY_LEN {
        return Some(format!(
            "La ciudad es demasiado larga (máx. {} caracteres)",
            MAX_CITY_LEN
        ));
    }
    if ciudad.chars().any(|c| c.is_ascii_digit()) {
        return Some("La ciudad no puede contener números".into());
    }
    if !ciudad
        .chars()
        .all(|c| is_letter(c) || matches!(c, ' ' | '-' | '\'' | '.'))
    {
        return Some("La ciudad solo puede contener letras, espacios, guión y apóstrofo".into());
    }
    if !has_letter(ciudad) {
        return Some("La ciudad debe contener letras".into());
    }
    if ciudad.starts_with('-') || ciudad.ends_with('-') {
        return Some("La ciudad no puede empezar o terminar con guión".into());
    }
    None
}

pub fn validate_postal_code(codigo: &str) -> Option<String> {
    let codigo = codigo.trim();
    if codigo.is_empty() {
        return None;
    }
    if !is_digits(codigo) {
        return Some("El código postal solo puede contener números".into());
    }
    if codigo.len() < MIN_POSTAL_LEN {
        return Some(format!(
            "El código postal debe tener al menos {} dígitos",
            MIN_POSTAL_LEN
        ));
    }
    if codigo.len() > MAX_POSTAL_LEN {
        return Some(format!(
            "El código postal no puede tener más de {} dígitos",
            MAX_POSTAL_LEN
        ));
    }
    if codigo.chars().all(|c| c == '0') {
        return Some("El código postal no puede ser solo ceros".into());
    }
    None
}

pub fn validate_role(rol: &str) -> Option<String> {
    match rol.trim().parse::<i64>() {
        Ok(id) if id > 0 => None,
        _ => Some("Debe seleccionar un rol".into()),
    }
}

pub fn validate_user_form(form: &UserForm, creating: bool) -> FormErrors {
    let mut errors = FormErrors::new();
    collect(&mut errors, "nombre", validate_user_name(&form.nombre));
    collect(&mut errors, "email", validate_user_email(&form.email));
    collect(&mut errors, "password", validate_password(&form.password, creating));
    collect(&mut errors, "direccion", validate_user_address(&form.direccion));
    collect(&mut errors, "telefono", validate_user_phone(&form.telefono));
    collect(&mut errors, "ciudad", validate_user_city(&form.ciudad));
    collect(&mut errors, "codigoPostal", validate_postal_code(&form.codigo_postal));
    collect(&mut errors, "rol", validate_role(&form.rol));
    errors
}

/// Users matching `search` (name or email) and, when given, the role
pub fn filter_users<'a>(users: &'a [User], search: &str, role_id: Option<i64>) -> Vec<&'a User> {
    users
        .iter()
        .filter(|u| matches_search(search, &[Some(u.nombre.as_str()), Some(u.email.as_str())]))
        .filter(|u| role_id.is_none() || u.role_id() == role_id)
        .collect()
}

/// Badge color for a role
pub fn role_badge_color(role: Option<&Role>) -> &'static str {
    match role.map(Role::display_name) {
        Some("Administrador") => "#dc3545",
        Some("Vendedor") => "#ffc107",
        _ => "#0066cc",
    }
}
