//! Category screen: validation, search and deactivation guard

use super::{FormErrors, collect, matches_search};
use crate::util::validation::{MAX_CATALOG_NAME_LEN, all_chars, char_len, is_letter};
use shared::models::{Category, CategoryForm};

pub const MIN_CATEGORY_NAME_LEN: usize = 3;
pub const MAX_CATEGORY_DESCRIPTION_LEN: usize = 200;

fn is_name_char(c: char) -> bool {
    is_letter(c) || c.is_ascii_digit() || matches!(c, ' ' | '-' | '_')
}

pub fn validate_category_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return Some("El nombre de la categoría es obligatorio".into());
    }
    let len = char_len(name);
    if len < MIN_CATEGORY_NAME_LEN {
        return Some(format!(
            "El nombre debe tener al menos {} caracteres",
            MIN_CATEGORY_NAME_LEN
        ));
    }
    if len > MAX_CATALOG_NAME_LEN {
        return Some(format!(
            "El nombre no puede exceder {} caracteres",
            MAX_CATALOG_NAME_LEN
        ));
    }
    if !all_chars(name, is_name_char) {
        return Some(
            "El nombre solo puede contener letras, números, espacios, guiones y guiones bajos"
                .into(),
        );
    }
    None
}

pub fn validate_category_description(description: &str) -> Option<String> {
    if char_len(description.trim()) > MAX_CATEGORY_DESCRIPTION_LEN {
        return Some(format!(
            "La descripción no puede exceder {} caracteres",
            MAX_CATEGORY_DESCRIPTION_LEN
        ));
    }
    None
}

/// Another category (not `editing_id`) already uses this name
pub fn is_duplicate_name(categories: &[Category], name: &str, editing_id: Option<i64>) -> bool {
    let name = name.trim().to_lowercase();
    categories
        .iter()
        .filter(|c| Some(c.id) != editing_id)
        .any(|c| c.nombre.trim().to_lowercase() == name)
}

pub fn validate_category_form(
    form: &CategoryForm,
    existing: &[Category],
    editing_id: Option<i64>,
) -> FormErrors {
    let mut errors = FormErrors::new();
    let name_error = validate_category_name(&form.nombre).or_else(|| {
        is_duplicate_name(existing, &form.nombre, editing_id)
            .then(|| "Ya existe una categoría con este nombre".to_string())
    });
    collect(&mut errors, "nombre", name_error);
    collect(
        &mut errors,
        "descripcion",
        validate_category_description(&form.descripcion),
    );
    errors
}

/// Categories whose name or description contains `search`
pub fn filter_categories<'a>(categories: &'a [Category], search: &str) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|c| matches_search(search, &[Some(c.nombre.as_str()), c.descripcion.as_deref()]))
        .collect()
}

/// Confirmation prompt before deactivating a category that still has products
pub fn deactivation_warning(category: &Category) -> Option<String> {
    let count = category.product_count();
    (category.is_active() && count > 0).then(|| {
        format!(
            "Esta categoría tiene {} producto(s) asociado(s). ¿Desea desactivarla de todas formas?",
            count
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn category(id: i64, nombre: &str, activo: bool, productos: usize) -> Category {
        Category {
            id,
            nombre: nombre.into(),
            descripcion: Some(format!("Productos de {}", nombre.to_lowercase())),
            estado: Some(json!(activo)),
            productos: vec![json!({}); productos],
        }
    }

    #[test]
    fn test_category_name_rules() {
        assert_eq!(
            validate_category_name("   ").as_deref(),
            Some("El nombre de la categoría es obligatorio")
        );
        assert_eq!(
            validate_category_name("ab").as_deref(),
            Some("El nombre debe tener al menos 3 caracteres")
        );
        assert!(validate_category_name(&"a".repeat(51)).is_some());
        assert!(validate_category_name("Cuidado_personal-2").is_none());
        assert!(validate_category_name("Niños y bebés").is_none());
        assert!(validate_category_name("Vinos & licores").is_some());
    }

    #[test]
    fn test_category_form_duplicate() {
        let existing = vec![category(1, "Lácteos", true, 0), category(2, "Bebidas", true, 0)];
        let form = CategoryForm {
            nombre: " lácteos ".into(),
            descripcion: String::new(),
            estado: true,
        };
        let errors = validate_category_form(&form, &existing, None);
        assert_eq!(
            errors.get("nombre").map(String::as_str),
            Some("Ya existe una categoría con este nombre")
        );
        // editing the same category keeps its name
        assert!(validate_category_form(&form, &existing, Some(1)).is_empty());
        let edit = CategoryForm::from_category(&existing[1]);
        assert!(validate_category_form(&edit, &existing, Some(2)).is_empty());
    }

    #[test]
    fn test_category_description_limit() {
        let form = CategoryForm {
            nombre: "Panadería".into(),
            descripcion: "x".repeat(201),
            estado: true,
        };
        let errors = validate_category_form(&form, &[], None);
        assert!(errors.contains_key("descripcion"));
        assert!(!errors.contains_key("nombre"));
    }

    #[test]
    fn test_filter_and_warning() {
        let categories = vec![category(1, "Lácteos", true, 2), category(2, "Bebidas", false, 3)];
        let found = filter_categories(&categories, "BEB");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
        assert_eq!(filter_categories(&categories, "").len(), 2);

        assert_eq!(
            deactivation_warning(&categories[0]).as_deref(),
            Some("Esta categoría tiene 2 producto(s) asociado(s). ¿Desea desactivarla de todas formas?")
        );
        // already inactive: activating needs no confirmation
        assert!(deactivation_warning(&categories[1]).is_none());
    }
}
