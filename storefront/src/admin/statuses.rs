//! Order status screen: validation, ordering and reorder swaps

use super::{FormErrors, collect, matches_search};
use crate::util::validation::{
    MAX_CATALOG_NAME_LEN, MAX_DESCRIPTION_LEN, brightness, char_len, is_letter, parse_hex_color,
};
use shared::models::{OrderStatus, OrderStatusForm, StatusPosition, StatusReorder};

pub const MIN_STATUS_NAME_LEN: usize = 3;
pub const MIN_STATUS_DESCRIPTION_LEN: usize = 10;

/// Colors brighter than this are unreadable on the white badge background
pub const MAX_COLOR_BRIGHTNESS: f64 = 220.0;

pub fn validate_status_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return Some("El nombre del estado es requerido".into());
    }
    let len = char_len(name);
    if len < MIN_STATUS_NAME_LEN {
        return Some(format!(
            "El nombre debe tener al menos {} caracteres",
            MIN_STATUS_NAME_LEN
        ));
    }
    if len > MAX_CATALOG_NAME_LEN {
        return Some(format!(
            "El nombre no puede exceder {} caracteres",
            MAX_CATALOG_NAME_LEN
        ));
    }
    let allowed = |c: char| is_letter(c) || c.is_ascii_digit() || matches!(c, ' ' | '-' | '_');
    if !name.chars().all(allowed) {
        return Some(
            "El nombre solo puede contener letras, números, espacios, guiones y guión bajo".into(),
        );
    }
    None
}

/// Optional; when given it must carry real text
pub fn validate_status_description(description: &str) -> Option<String> {
    let description = description.trim();
    if description.is_empty() {
        return None;
    }
    let len = char_len(description);
    if len < MIN_STATUS_DESCRIPTION_LEN {
        return Some(format!(
            "La descripción debe tener al menos {} caracteres",
            MIN_STATUS_DESCRIPTION_LEN
        ));
    }
    if len > MAX_DESCRIPTION_LEN {
        return Some(format!(
            "La descripción no puede exceder {} caracteres",
            MAX_DESCRIPTION_LEN
        ));
    }
    if !description.chars().any(char::is_alphanumeric) {
        return Some("La descripción debe contener texto válido".into());
    }
    None
}

pub fn validate_status_color(color: &str) -> Option<String> {
    let color = color.trim();
    if color.is_empty() {
        return Some("El color es requerido".into());
    }
    let Some((r, g, b)) = parse_hex_color(color) else {
        return Some("El color debe estar en formato hexadecimal (#RRGGBB)".into());
    };
    if brightness(r, g, b) > MAX_COLOR_BRIGHTNESS {
        return Some(
            "El color es demasiado claro. Elige un color más oscuro para mejor visibilidad".into(),
        );
    }
    None
}

/// Highest position a status may take: the last slot when editing, one past
/// it when creating
pub fn max_order(status_count: usize, editing: bool) -> i64 {
    let count = status_count as i64;
    if editing { count.max(1) } else { count + 1 }
}

pub fn validate_status_order(orden: &str, max: i64) -> Option<String> {
    let orden = orden.trim();
    if orden.is_empty() {
        return Some("El orden es requerido".into());
    }
    let Ok(value) = orden.parse::<i64>() else {
        return Some("El orden debe ser un número válido".into());
    };
    if value < 1 {
        return Some("El orden debe ser mayor o igual a 1".into());
    }
    if value > max {
        return Some(format!("El orden no puede ser mayor a {}", max));
    }
    None
}

pub fn validate_status_form(
    form: &OrderStatusForm,
    existing: &[OrderStatus],
    editing_id: Option<i64>,
) -> FormErrors {
    let mut errors = FormErrors::new();
    let others = move || existing.iter().filter(move |s| Some(s.id) != editing_id);

    let name_error = validate_status_name(&form.nombre).or_else(|| {
        let name = form.nombre.trim().to_lowercase();
        others()
            .any(|s| s.nombre.trim().to_lowercase() == name)
            .then(|| "Ya existe un estado con este nombre".to_string())
    });
    collect(&mut errors, "nombre", name_error);
    collect(
        &mut errors,
        "descripcion",
        validate_status_description(&form.descripcion),
    );
    collect(&mut errors, "color", validate_status_color(&form.color));

    let max = max_order(existing.len(), editing_id.is_some());
    let order_error = validate_status_order(&form.orden, max).or_else(|| {
        let orden: i32 = form.orden.trim().parse().ok()?;
        others()
            .any(|s| s.orden == orden)
            .then(|| "Ya existe un estado con este orden".to_string())
    });
    collect(&mut errors, "orden", order_error);
    errors
}

/// Statuses matching `search`, sorted by position
pub fn filter_statuses<'a>(statuses: &'a [OrderStatus], search: &str) -> Vec<&'a OrderStatus> {
    let mut found: Vec<_> = statuses
        .iter()
        .filter(|s| matches_search(search, &[Some(s.nombre.as_str()), s.descripcion.as_deref()]))
        .collect();
    found.sort_by_key(|s| s.orden);
    found
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Up is blocked at position 1, down at the last position
pub fn can_move(status: &OrderStatus, total: usize, direction: MoveDirection) -> bool {
    match direction {
        MoveDirection::Up => status.orden > 1,
        MoveDirection::Down => (status.orden as i64) < total as i64,
    }
}

/// Swap `id` with its neighbour in `direction`
///
/// Returns `None` when the status is unknown, already at the edge, or no
/// status holds the target position.
pub fn reorder_for(
    statuses: &[OrderStatus],
    id: i64,
    direction: MoveDirection,
) -> Option<StatusReorder> {
    let current = statuses.iter().find(|s| s.id == id)?;
    if !can_move(current, statuses.len(), direction) {
        return None;
    }
    let target = match direction {
        MoveDirection::Up => current.orden - 1,
        MoveDirection::Down => current.orden + 1,
    };
    let swap = statuses.iter().find(|s| s.orden == target)?;
    Some(StatusReorder {
        estados: vec![
            StatusPosition {
                id: current.id,
                orden: target,
            },
            StatusPosition {
                id: swap.id,
                orden: current.orden,
            },
        ],
    })
}
