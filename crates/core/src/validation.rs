//! Helpers shared by the request validation rules.
//!
//! Validation reports every violated rule at once, so all helpers here
//! accumulate messages rather than returning on the first failure.

use validator::ValidationErrors;

use crate::error::CoreError;
use crate::types::DbId;

/// Flatten `validator` field errors into human-readable messages.
///
/// Messages are ordered by field name so responses are deterministic.
/// Errors without an explicit message fall back to `"<field>" is invalid`.
pub fn messages_from(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("\"{field}\" is invalid"),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Parse a path or query value as a positive database id.
pub fn parse_positive_id(field: &str, raw: &str) -> Result<DbId, String> {
    match raw.trim().parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(_) => Err(format!("\"{field}\" must be a positive number")),
        Err(_) => Err(format!("\"{field}\" must be a number")),
    }
}

/// Parse a single `id` path segment, producing a validation error on failure.
pub fn parse_path_id(raw: &str) -> Result<DbId, CoreError> {
    parse_positive_id("id", raw).map_err(CoreError::validation)
}

/// Append a message for every non-positive id in `ids`.
pub fn check_positive_ids(field: &str, ids: &[DbId], messages: &mut Vec<String>) {
    for (index, id) in ids.iter().enumerate() {
        if *id <= 0 {
            messages.push(format!("\"{field}[{index}]\" must be a positive number"));
        }
    }
}

/// Drop repeated ids while keeping the first occurrence order.
pub fn dedup_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
