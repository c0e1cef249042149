//! # Form State Store
//!
//! Owns the draft, the visible errors and the submission flag, and applies
//! every input event as one transition.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Form Store Operations                                │
//! │                                                                         │
//! │  Input Event              Store Method              State Change        │
//! │  ───────────              ────────────              ────────────        │
//! │                                                                         │
//! │  Type in name ───────────► set_field("fullName") ──► draft.full_name   │
//! │                                                      (+ error key in   │
//! │                                                       on_change mode)  │
//! │                                                                         │
//! │  Pick size ──────────────► set_field("size") ──────► draft.size        │
//! │                                                                         │
//! │  Tick checkbox ──────────► toggle_topping() ───────► draft.toppings    │
//! │                                                                         │
//! │  Press submit ───────────► submit() ───────────────► see submission.rs │
//! │                                                                         │
//! │  Render ─────────────────► view() ─────────────────► (read only)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The store is owned by the single event-processing context. Nothing in it
//! is shared across threads except the read-only schema.
//!
//! ## Superseding In-flight Validations
//! Each field carries a generation counter. A ticket from
//! [`FormStore::begin_field_validation`] is only honoured if no newer edit,
//! ticket or submit has happened for that field since it was issued.

use std::collections::HashMap;
use std::sync::Arc;

use pizza_core::error::FieldResult;
use pizza_core::{
    is_eligible, topping_catalog, ErrorMap, OrderDraft, Schema, FULL_NAME, SIZE, TOPPINGS,
};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use super::config::{FormConfig, ValidationMode};
use crate::error::{AppResult, FormError};

/// Banner shown while the error map is non-empty.
pub const FAILURE_BANNER: &str = "Something went wrong";

// =============================================================================
// Submission State
// =============================================================================

/// Where the form is in the submit cycle.
///
/// ```text
/// Idle ──submit()──► Validating ──pass──► Succeeded ──next event──► Idle
///                               └─fail──► Failed    ──next event──► Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Succeeded,
    Failed,
}

// =============================================================================
// Validation Ticket
// =============================================================================

/// Handle for a field validation running outside the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTicket {
    field: String,
    generation: u64,
}

impl FieldTicket {
    pub fn field(&self) -> &str {
        &self.field
    }
}

// =============================================================================
// Form Store
// =============================================================================

/// The order form's state.
#[derive(Debug)]
pub struct FormStore {
    pub(crate) schema: Arc<Schema>,
    pub(crate) mode: ValidationMode,
    pub(crate) draft: OrderDraft,
    pub(crate) errors: ErrorMap,
    pub(crate) state: SubmissionState,
    pub(crate) submitting: bool,
    pub(crate) success_message: Option<String>,
    generations: HashMap<String, u64>,
}

impl FormStore {
    /// Creates a store with an empty draft.
    pub fn new(schema: Arc<Schema>, mode: ValidationMode) -> Self {
        FormStore {
            schema,
            mode,
            draft: OrderDraft::new(),
            errors: ErrorMap::new(),
            state: SubmissionState::Idle,
            submitting: false,
            success_message: None,
            generations: HashMap::new(),
        }
    }

    /// Creates a store from resolved configuration.
    pub fn from_config(config: &FormConfig) -> AppResult<Self> {
        Ok(FormStore::new(config.resolve_schema()?, config.validation_mode))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Overwrites a text field.
    ///
    /// Other fields are untouched. In `on_change` mode the field is
    /// re-validated and only its own error key changes.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let slot = match name {
            FULL_NAME => &mut self.draft.full_name,
            SIZE => &mut self.draft.size,
            TOPPINGS => {
                return Err(FormError::NotATextField {
                    field: name.to_string(),
                })
            }
            _ => {
                return Err(FormError::UnknownField {
                    field: name.to_string(),
                })
            }
        };
        *slot = value.into();

        debug!(field = %name, "Field changed");
        self.settle();
        self.bump_generation(name);

        if self.mode.is_incremental() {
            self.revalidate(name);
        }
        Ok(())
    }

    /// Checks or unchecks a topping. Returns whether the set changed.
    ///
    /// Repeating the same change is a no-op on the set.
    pub fn toggle_topping(&mut self, name: &str, selected: bool) -> bool {
        let changed = self.draft.toppings.set(name, selected);

        debug!(topping = %name, selected, changed, "Topping changed");
        self.settle();
        self.bump_generation(TOPPINGS);

        if self.mode.is_incremental() {
            self.revalidate(TOPPINGS);
        }
        changed
    }

    /// Whether the submit control is enabled.
    ///
    /// Independent of the schema: name and size only.
    pub fn compute_eligibility(&self) -> bool {
        is_eligible(&self.draft)
    }

    /// Re-checks one field and updates only its error key.
    fn revalidate(&mut self, field: &str) {
        let result = self
            .schema
            .validate_field(field, self.draft.value_of(field), &self.draft);
        self.apply_field_result(field, result);
    }

    fn apply_field_result(&mut self, field: &str, result: FieldResult) {
        match result {
            Ok(()) => {
                self.errors.remove(field);
            }
            Err(violation) => self.errors.insert(violation.field, violation.message),
        }
    }

    /// Leaves a finished submit cycle on the next event.
    fn settle(&mut self) {
        if matches!(
            self.state,
            SubmissionState::Succeeded | SubmissionState::Failed
        ) {
            self.state = SubmissionState::Idle;
        }
    }

    // =========================================================================
    // Out-of-band Field Validation
    // =========================================================================

    /// Starts a validation of `field` that will be resolved later.
    ///
    /// Any earlier ticket for the same field becomes stale.
    pub fn begin_field_validation(&mut self, field: &str) -> Result<FieldTicket, FormError> {
        if !pizza_core::FORM_FIELDS.contains(&field) {
            return Err(FormError::UnknownField {
                field: field.to_string(),
            });
        }

        let generation = self.bump_generation(field);
        Ok(FieldTicket {
            field: field.to_string(),
            generation,
        })
    }

    /// Applies the outcome of a ticketed validation.
    ///
    /// Returns `false` and changes nothing if the ticket was superseded.
    pub fn resolve_field_validation(&mut self, ticket: FieldTicket, result: FieldResult) -> bool {
        if self.generations.get(&ticket.field) != Some(&ticket.generation) {
            debug!(field = %ticket.field, "Discarding superseded validation result");
            return false;
        }

        self.apply_field_result(&ticket.field, result);
        true
    }

    fn bump_generation(&mut self, field: &str) -> u64 {
        let generation = self.generations.entry(field.to_string()).or_insert(0);
        *generation += 1;
        *generation
    }

    /// Invalidates every outstanding ticket.
    pub(crate) fn supersede_all(&mut self) {
        self.generations.values_mut().for_each(|g| *g += 1);
    }

    // =========================================================================
    // Rendering Snapshot
    // =========================================================================

    /// Everything the rendering layer needs for one frame.
    pub fn view(&self) -> FormView {
        let failure_banner = (!self.submitting && !self.errors.is_empty())
            .then(|| FAILURE_BANNER.to_string());

        FormView {
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            state: self.state,
            submitting: self.submitting,
            success_message: self.success_message.clone(),
            failure_banner,
            eligible: self.compute_eligibility(),
            validation_mode: self.mode,
            topping_options: topping_catalog()
                .iter()
                .map(|t| ToppingChoice {
                    topping_id: t.topping_id.clone(),
                    text: t.text.clone(),
                    checked: self.draft.toppings.contains(&t.text),
                })
                .collect(),
        }
    }
}

/// A topping checkbox as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ToppingChoice {
    pub topping_id: String,
    pub text: String,
    pub checked: bool,
}

/// Read-only snapshot of the form for the rendering layer.
///
/// ## Serialization
/// ```json
/// {
///   "draft": { "fullName": "Al", "size": "M", "toppings": [] },
///   "errors": { "fullName": "full name must be at least 3 characters" },
///   "state": "failed",
///   "submitting": false,
///   "successMessage": null,
///   "failureBanner": "Something went wrong",
///   "eligible": false,
///   "validationMode": "on_submit",
///   "toppingOptions": [ { "toppingId": "1", "text": "Pepperoni", "checked": false } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormView {
    pub draft: OrderDraft,
    #[ts(type = "Record<string, string>")]
    pub errors: ErrorMap,
    pub state: SubmissionState,
    pub submitting: bool,
    pub success_message: Option<String>,
    pub failure_banner: Option<String>,
    /// Drives the submit control's `disabled` attribute.
    pub eligible: bool,
    pub validation_mode: ValidationMode,
    pub topping_options: Vec<ToppingChoice>,
}
