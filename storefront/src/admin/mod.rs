//! Back-office helpers
//!
//! Form validators, search filters and payload helpers for the catalog,
//! order status and user screens. Validators return the user-facing message
//! for one field, or `None`; `validate_*_form` collects them per field name.

pub mod categories;
pub mod products;
pub mod statuses;
pub mod users;

use std::collections::BTreeMap;

/// Field name → message
pub type FormErrors = BTreeMap<&'static str, String>;

pub(crate) fn collect(
    errors: &mut FormErrors,
    field: &'static str,
    message: Option<String>,
) {
    if let Some(message) = message {
        errors.insert(field, message);
    }
}

/// Case-insensitive `contains` over any of `haystacks`; empty needle matches
pub(crate) fn matches_search(needle: &str, haystacks: &[Option<&str>]) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystacks
        .iter()
        .flatten()
        .any(|h| h.to_lowercase().contains(&needle))
}

pub use categories::{deactivation_warning, filter_categories, validate_category_form};
pub use products::{filter_products, is_low_stock, validate_product_form};
pub use statuses::{MoveDirection, can_move, filter_statuses, reorder_for, validate_status_form};
pub use users::{filter_users, role_badge_color, validate_user_form};
