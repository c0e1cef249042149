//! # Error Types
//!
//! Validation outcomes and schema errors for pizza-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pizza-core errors (this file)                                         │
//! │  ├── ConstraintViolation - one field failed one rule                   │
//! │  ├── ValidationFailure   - every violation of a full-record pass       │
//! │  └── SchemaError         - a schema that cannot back the form          │
//! │                                                                         │
//! │  order-form errors (app crate)                                         │
//! │  ├── FormError           - misuse of the store by the rendering layer  │
//! │  └── AppError            - config / IO / event decoding                │
//! │                                                                         │
//! │  Flow: ConstraintViolation → ValidationFailure → ErrorMap → FormView   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Violations are ordinary values, never panics
//! 2. Every violation carries the field it belongs to
//! 3. Nothing in this file is fatal: the user fixes input and tries again

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Constraint Violation
// =============================================================================

/// A single field failed a single schema rule.
///
/// `Display` is exactly the rule's message so it can be rendered next to the
/// field without further formatting.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ConstraintViolation {
    /// Field name as the form knows it (`fullName`, `size`, `toppings`).
    pub field: String,

    /// Message declared on the failing rule.
    pub message: String,
}

impl ConstraintViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConstraintViolation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result of validating a single field.
pub type FieldResult = Result<(), ConstraintViolation>;

// =============================================================================
// Aggregate Validation Failure
// =============================================================================

/// Every violation produced by a full-record pass.
///
/// ## Ordering
/// Violations are ordered by schema field order, then by rule order within a
/// field. A field may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} constraint(s) failed", violations.len())]
pub struct ValidationFailure {
    pub violations: Vec<ConstraintViolation>,
}

impl ValidationFailure {
    /// Number of violations (not fields).
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Collapses the violations into one visible message per field.
    ///
    /// The first violation of a field wins, matching what per-field
    /// validation would have surfaced for the same value.
    pub fn into_error_map(self) -> ErrorMap {
        let mut map = ErrorMap::new();
        for violation in self.violations {
            if !map.contains(&violation.field) {
                map.insert(violation.field, violation.message);
            }
        }
        map
    }
}

/// Result of validating a whole record.
pub type RecordResult = Result<(), ValidationFailure>;

// =============================================================================
// Error Map
// =============================================================================

/// Currently visible per-field messages.
///
/// Absence of a key means the field has no error. Keys keep insertion
/// order so a full pass lists fields in schema order when rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    entries: IndexMap<String, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        ErrorMap::default()
    }

    /// Sets the message for `field`, replacing any previous one in place.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(field.into(), message.into());
    }

    /// Clears the message for `field`, returning it if one was present.
    ///
    /// Remaining fields keep their order.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.entries.shift_remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(field, message)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }
}

impl From<ValidationFailure> for ErrorMap {
    fn from(failure: ValidationFailure) -> Self {
        failure.into_error_map()
    }
}

// =============================================================================
// Schema Error
// =============================================================================

/// A schema that cannot back the order form.
///
/// ## When This Occurs
/// Only while loading configuration at startup. A running form never sees
/// these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Schema names a field the form does not render.
    #[error("schema references unknown field '{field}'")]
    UnknownField { field: String },

    /// Field declared twice; each field has exactly one entry.
    #[error("field '{field}' is declared more than once")]
    DuplicateField { field: String },

    /// Rule declared without a message to show.
    #[error("rule on '{field}' has an empty message")]
    EmptyMessage { field: String },

    /// Bounds that can never be satisfied.
    #[error("field '{field}' has invalid bounds: {reason}")]
    InvalidBound { field: String, reason: String },
}

/// Convenience type alias for schema construction results.
pub type SchemaResult<T> = Result<T, SchemaError>;

// =============================================================================
// Unit Tests
// =============================================================================
