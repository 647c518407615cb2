//! Classification of PostgreSQL constraint violations.

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Unique,
    ForeignKey,
}

/// A constraint violation reported by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation<'a> {
    pub kind: ViolationKind,
    /// Constraint name, when the server reports one.
    pub constraint: Option<&'a str>,
}

/// Inspect `err` for a unique or foreign-key violation.
pub fn violation(err: &sqlx::Error) -> Option<Violation<'_>> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    let kind = match db_err.code().as_deref() {
        Some(UNIQUE_VIOLATION) => ViolationKind::Unique,
        Some(FOREIGN_KEY_VIOLATION) => ViolationKind::ForeignKey,
        _ => return None,
    };
    Some(Violation {
        kind,
        constraint: db_err.constraint(),
    })
}

/// Whether `err` is a unique violation of the named constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(
        violation(err),
        Some(Violation { kind: ViolationKind::Unique, constraint: Some(c) }) if c == constraint
    )
}

/// Whether `err` is any foreign-key violation.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(
        violation(err),
        Some(Violation {
            kind: ViolationKind::ForeignKey,
            ..
        })
    )
}
