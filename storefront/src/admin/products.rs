//! Product screen: validation, stock alerts and search

use super::{FormErrors, collect, matches_search};
use crate::util::validation::{MAX_DESCRIPTION_LEN, char_len, contains_script, is_letter};
use rust_decimal::Decimal;
use shared::models::{ImageUpload, Product, ProductForm};
use std::str::FromStr;

pub const MIN_PRODUCT_NAME_LEN: usize = 3;
pub const MAX_PRODUCT_NAME_LEN: usize = 100;
pub const MAX_BRAND_LEN: usize = 50;
pub const MAX_STOCK: i64 = 999_999;
pub const LOW_STOCK_THRESHOLD: i64 = 10;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MIN_IMAGE_BYTES: usize = 1024;
pub const IMAGE_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

fn max_price() -> Decimal {
    Decimal::new(99_999_999, 2)
}

pub fn validate_product_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return Some("El nombre del producto es requerido".into());
    }
    let len = char_len(name);
    if len < MIN_PRODUCT_NAME_LEN {
        return Some(format!(
            "El nombre debe tener al menos {} caracteres",
            MIN_PRODUCT_NAME_LEN
        ));
    }
    if len > MAX_PRODUCT_NAME_LEN {
        return Some(format!(
            "El nombre no puede superar los {} caracteres",
            MAX_PRODUCT_NAME_LEN
        ));
    }
    if contains_script(name) {
        return Some("El nombre contiene caracteres no permitidos".into());
    }
    if !name.chars().any(char::is_alphanumeric) {
        return Some("El nombre debe contener al menos letras o números".into());
    }
    None
}

pub fn validate_product_description(description: &str) -> Option<String> {
    let description = description.trim();
    if char_len(description) > MAX_DESCRIPTION_LEN {
        return Some(format!(
            "La descripción no puede superar los {} caracteres",
            MAX_DESCRIPTION_LEN
        ));
    }
    if contains_script(description) {
        return Some("La descripción contiene caracteres no permitidos".into());
    }
    None
}

pub fn validate_price(precio: &str) -> Option<String> {
    let precio = precio.trim();
    if precio.is_empty() {
        return Some("El precio es requerido".into());
    }
    let Ok(value) = Decimal::from_str(precio) else {
        return Some("El precio debe ser un número válido".into());
    };
    if value <= Decimal::ZERO {
        return Some("El precio debe ser mayor a 0".into());
    }
    if value > max_price() {
        return Some("El precio no puede superar $999,999.99".into());
    }
    if value.scale() > 2 {
        return Some("El precio solo puede tener hasta 2 decimales".into());
    }
    None
}

pub fn validate_stock(stock: &str) -> Option<String> {
    let stock = stock.trim();
    if stock.is_empty() {
        return Some("El stock es requerido".into());
    }
    let Ok(value) = Decimal::from_str(stock) else {
        return Some("El stock debe ser un número válido".into());
    };
    if value.is_sign_negative() && !value.is_zero() {
        return Some("El stock no puede ser negativo".into());
    }
    if value > Decimal::from(MAX_STOCK) {
        return Some("El stock no puede superar 999,999 unidades".into());
    }
    if !value.fract().is_zero() {
        return Some("El stock debe ser un número entero".into());
    }
    None
}

pub fn validate_brand(marca: &str) -> Option<String> {
    let marca = marca.trim();
    if char_len(marca) > MAX_BRAND_LEN {
        return Some(format!(
            "La marca no puede superar los {} caracteres",
            MAX_BRAND_LEN
        ));
    }
    let allowed = |c: char| is_letter(c) || c.is_ascii_digit() || matches!(c, ' ' | '&' | '.' | '-');
    if !marca.chars().all(allowed) {
        return Some("La marca contiene caracteres no válidos".into());
    }
    None
}

pub fn validate_category_id(categoria_id: &str) -> Option<String> {
    let categoria_id = categoria_id.trim();
    if categoria_id.is_empty() {
        return Some("Debes seleccionar una categoría".into());
    }
    match categoria_id.parse::<i64>() {
        Ok(id) if id > 0 => None,
        _ => Some("Categoría inválida".into()),
    }
}

pub fn validate_image(image: &ImageUpload) -> Option<String> {
    let mime = image.mime_type.trim().to_lowercase();
    if !IMAGE_MIME_TYPES.contains(&mime.as_str()) {
        return Some("Solo se permiten imágenes (JPG, PNG, GIF, WEBP)".into());
    }
    if image.size() > MAX_IMAGE_BYTES {
        return Some("La imagen no puede superar los 5MB".into());
    }
    if image.size() < MIN_IMAGE_BYTES {
        return Some("La imagen es demasiado pequeña".into());
    }
    None
}

pub fn validate_product_form(
    form: &ProductForm,
    existing: &[Product],
    editing_id: Option<i64>,
) -> FormErrors {
    let mut errors = FormErrors::new();
    let name_error = validate_product_name(&form.nombre).or_else(|| {
        let name = form.nombre.trim().to_lowercase();
        existing
            .iter()
            .filter(|p| Some(p.id) != editing_id)
            .any(|p| p.nombre.trim().to_lowercase() == name)
            .then(|| "Ya existe un producto con ese nombre".to_string())
    });
    collect(&mut errors, "nombre", name_error);
    collect(
        &mut errors,
        "descripcion",
        validate_product_description(&form.descripcion),
    );
    collect(&mut errors, "precio", validate_price(&form.precio));
    collect(&mut errors, "stock", validate_stock(&form.stock));
    collect(&mut errors, "marca", validate_brand(&form.marca));
    collect(
        &mut errors,
        "categoria_id",
        validate_category_id(&form.categoria_id),
    );
    collect(
        &mut errors,
        "imagen",
        form.imagen.as_ref().and_then(validate_image),
    );
    errors
}

pub fn is_low_stock(product: &Product) -> bool {
    product.stock <= LOW_STOCK_THRESHOLD
}

/// Products matching `search` (name or description) and, when given, the category
pub fn filter_products<'a>(
    products: &'a [Product],
    search: &str,
    category_id: Option<i64>,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| matches_search(search, &[Some(p.nombre.as_str()), p.descripcion.as_deref()]))
        .filter(|p| category_id.is_none() || p.category_id() == category_id)
        .collect()
}
