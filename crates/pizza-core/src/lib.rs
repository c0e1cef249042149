//! # pizza-core: Pure Validation Engine for the Pizza Order Form
//!
//! This crate is the **heart** of the order form. It decides what input is
//! acceptable, which message is attached to which field, and what a
//! successful order looks like. Everything here is a pure function over
//! in-memory data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pizza Order Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Rendering layer (external)                   │   │
//! │  │    Name input ──► Size select ──► Topping boxes ──► Submit      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ FormEvent / FormView                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 order-form (store + submission)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pizza-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  schema   │  │ validation │  │ confirm-  │  │   │
//! │  │   │  Draft    │  │  Rules    │  │  field /   │  │ ation     │  │   │
//! │  │   │  Size     │  │  Variants │  │  record    │  │ message   │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING SUBSCRIBER • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Draft, size, topping set and catalog
//! - [`schema`] - Declarative field constraints and built-in variants
//! - [`validation`] - Field and record validation, eligibility gate
//! - [`confirmation`] - Placed order and success message
//! - [`error`] - Constraint violations, aggregate failures, schema errors
//!
//! ## Example Usage
//!
//! ```rust
//! use pizza_core::schema::Schema;
//! use pizza_core::types::OrderDraft;
//!
//! let mut draft = OrderDraft::new();
//! draft.full_name = "Al".to_string();
//! draft.size = "M".to_string();
//!
//! let failure = Schema::standard().validate_record(&draft).unwrap_err();
//! assert_eq!(
//!     failure.violations[0].message,
//!     "full name must be at least 3 characters"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod confirmation;
pub mod error;
pub mod schema;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use confirmation::PlacedOrder;
pub use error::{ConstraintViolation, ErrorMap, SchemaError, ValidationFailure};
pub use schema::{FieldConstraint, FieldRules, Rule, Schema, SchemaVariant};
pub use types::*;
pub use validation::is_eligible;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum trimmed name length accepted by the eligibility gate.
///
/// ## Why separate from the schema?
/// The submit button is enabled by a lightweight UI check that lives apart
/// from the schema. Changing the schema's bounds does not move this gate.
pub const ELIGIBLE_NAME_MIN_LEN: usize = 3;

/// Lower bound of the built-in `fullName` length rule.
pub const FULL_NAME_MIN_LEN: usize = 3;

/// Upper bound of the built-in `fullName` length rule.
pub const FULL_NAME_MAX_LEN: usize = 20;

/// Minimum number of toppings in the `toppings_required` schema variant.
pub const MIN_TOPPINGS: usize = 1;
