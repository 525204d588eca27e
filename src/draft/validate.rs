//! Field-level and cross-field validation of a product draft.
//!
//! All rules are evaluated in full so multiple errors can surface together;
//! nothing short-circuits. The resulting map is advisory state for the form
//! and never reaches the network.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::draft::ProductDraft;
use crate::errors::FieldErrors;
use crate::models::Category;

/// Validate a full draft against the currently-loaded category list.
///
/// Row-scoped errors are keyed `size-{i}`, `price-{i}`, `dummyPrice-{i}`,
/// `stock-{i}` so the form can pinpoint the failing row and field. An empty
/// map means the draft is submit-eligible.
pub fn validate(draft: &ProductDraft, categories: &[Category]) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let category_id = draft.category_id.trim();
    if category_id.is_empty() {
        errors.insert("categoryId".into(), "Category is required".into());
    } else {
        let known = category_id
            .parse::<i64>()
            .map(|id| categories.iter().any(|c| c.id == id))
            .unwrap_or(false);
        if !known {
            errors.insert("categoryId".into(), "Selected category is invalid".into());
        }
    }

    if draft.name.trim().is_empty() {
        errors.insert("name".into(), "Name is required".into());
    }

    if draft.images.is_empty() {
        errors.insert("images".into(), "At least one image is required".into());
    }

    let mut seen_sizes: HashSet<String> = HashSet::new();
    for (i, row) in draft.sizes.rows().iter().enumerate() {
        let size = row.size.trim();
        if size.is_empty() {
            errors.insert(format!("size-{i}"), "Size is required".into());
        } else if !seen_sizes.insert(size.to_string()) {
            errors.insert(format!("size-{i}"), "Duplicate size".into());
        }

        match row.price.trim().parse::<Decimal>() {
            Ok(price) if price > Decimal::ZERO => {}
            _ => {
                errors.insert(format!("price-{i}"), "Price must be greater than 0".into());
            }
        }

        match row.dummy_price.trim().parse::<Decimal>() {
            Ok(dummy) if dummy > Decimal::ZERO => {}
            _ => {
                errors.insert(
                    format!("dummyPrice-{i}"),
                    "Dummy price must be greater than 0".into(),
                );
            }
        }

        match row.stock.trim().parse::<i64>() {
            Ok(stock) if stock >= 0 => {}
            _ => {
                errors.insert(format!("stock-{i}"), "Stock must be 0 or more".into());
            }
        }
    }

    errors
}

/// Convenience predicate over a validation result.
pub fn is_submit_eligible(errors: &FieldErrors) -> bool {
    errors.is_empty()
}
