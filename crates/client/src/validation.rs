//! Form checks run before a create request is sent.
//!
//! These are stricter than the server in one place: a description is
//! required here.

use std::collections::BTreeMap;

use pis_core::types::DbId;

use crate::api::{ProductForm, ProductSummary};

/// Form fields that can carry an error, keyed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Description,
    Quantity,
    CategoryIds,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Description => "description",
            FormField::Quantity => "quantity",
            FormField::CategoryIds => "categoryIds",
        }
    }
}

/// Outcome of [`validate_product_form`]: at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    pub errors: BTreeMap<FormField, String>,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

/// Check a product form against the rows currently on screen.
///
/// A name matching another listed product (ignoring case) is a duplicate.
/// `editing_id` excludes the product being edited from that check.
pub fn validate_product_form(
    form: &ProductForm,
    existing: &[ProductSummary],
    editing_id: Option<DbId>,
) -> FormValidation {
    let mut errors = BTreeMap::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.insert(FormField::Name, "Product name is required".to_string());
    } else {
        let lowered = name.to_lowercase();
        let duplicate = existing
            .iter()
            .any(|p| p.name.to_lowercase() == lowered && Some(p.id) != editing_id);
        if duplicate {
            errors.insert(FormField::Name, "Product name already exists".to_string());
        }
    }

    if form.description.trim().is_empty() {
        errors.insert(FormField::Description, "Description is required".to_string());
    }

    match form.quantity {
        None => {
            errors.insert(FormField::Quantity, "Quantity is required".to_string());
        }
        Some(q) if q < 0 => {
            errors.insert(
                FormField::Quantity,
                "Quantity must be a positive number".to_string(),
            );
        }
        Some(_) => {}
    }

    if form.category_ids.is_empty() {
        errors.insert(
            FormField::CategoryIds,
            "At least one category must be selected".to_string(),
        );
    }

    FormValidation { errors }
}
