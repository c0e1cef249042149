//! # Submission Workflow
//!
//! Runs a full-record validation and either places the order or publishes
//! every failure to the error map.
//!
//! ## Submit Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit()                                                               │
//! │    │                                                                    │
//! │    ├── already submitting? ──► Err(SubmitInProgress), nothing changes   │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  submitting = true, state = Validating                                  │
//! │  clear ErrorMap and previous success message                            │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  schema.validate_record(draft)                                          │
//! │    │                                                                    │
//! │    ├── pass ─► PlacedOrder + message, state = Succeeded,                │
//! │    │           draft reset, ErrorMap cleared                            │
//! │    │                                                                    │
//! │    └── fail ─► ErrorMap = first message per field (schema order),       │
//! │                state = Failed, draft kept                               │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  submitting = false              (both branches)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Succeeded` / `Failed` stay visible until the next event, which moves the
//! form back to `Idle`.

use pizza_core::{OrderDraft, PlacedOrder, ValidationFailure};
use tracing::{info, warn};

use crate::error::FormError;
use crate::state::{FormStore, SubmissionState};

/// What a submit attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every rule passed; the draft has been reset.
    Placed(PlacedOrder),

    /// At least one rule failed; the draft is unchanged.
    Rejected(ValidationFailure),
}

impl SubmitOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, SubmitOutcome::Placed(_))
    }
}

impl FormStore {
    /// Validates the whole draft and completes the submit cycle.
    pub fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        if self.submitting {
            warn!("Submit ignored: a submission is already in progress");
            return Err(FormError::SubmitInProgress);
        }

        self.submitting = true;
        self.state = SubmissionState::Validating;
        self.errors.clear();
        self.success_message = None;
        self.supersede_all();

        let outcome = match self.schema.validate_record(&self.draft) {
            Ok(()) => self.accept(),
            Err(failure) => self.reject(failure),
        };

        self.submitting = false;
        Ok(outcome)
    }

    fn accept(&mut self) -> SubmitOutcome {
        let order = PlacedOrder::from_draft(&self.draft);

        info!(
            order_id = %order.id,
            size = ?order.size,
            toppings = order.toppings.len(),
            "Order placed"
        );

        self.success_message = Some(order.message());
        self.state = SubmissionState::Succeeded;
        self.draft = OrderDraft::new();
        self.errors.clear();

        SubmitOutcome::Placed(order)
    }

    fn reject(&mut self, failure: ValidationFailure) -> SubmitOutcome {
        self.errors = failure.clone().into_error_map();
        self.state = SubmissionState::Failed;

        info!(
            violations = failure.len(),
            fields = self.errors.len(),
            "Order rejected"
        );

        SubmitOutcome::Rejected(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use pizza_core::schema::messages;
    use pizza_core::{ConstraintViolation, Schema, Size, FULL_NAME, SIZE, TOPPINGS};

    use crate::state::ValidationMode;

    fn store(schema: &Schema) -> FormStore {
        FormStore::new(Arc::new(schema.clone()), ValidationMode::OnSubmit)
    }

    fn fill(form: &mut FormStore, name: &str, size: &str, toppings: &[&str]) {
        form.set_field(FULL_NAME, name).unwrap();
        form.set_field(SIZE, size).unwrap();
        for topping in toppings {
            form.toggle_topping(topping, true);
        }
    }

    #[test]
    fn test_short_name_is_rejected_and_draft_kept() {
        let mut form = store(Schema::standard());
        fill(&mut form, "Al", "M", &[]);
        let before = form.draft().clone();

        let outcome = form.submit().unwrap();

        assert!(!outcome.is_placed());
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.errors().get(FULL_NAME), Some(messages::FULL_NAME_TOO_SHORT));
        assert_eq!(form.state(), SubmissionState::Failed);
        assert!(!form.is_submitting());
        assert_eq!(form.draft(), &before);
        assert!(form.success_message().is_none());
    }

    #[test]
    fn test_valid_order_is_placed_and_form_reset() {
        let mut form = store(Schema::standard());
        fill(&mut form, "Alice", "L", &["Ham", "Pineapple"]);

        let outcome = form.submit().unwrap();

        let order = match outcome {
            SubmitOutcome::Placed(order) => order,
            other => panic!("expected placed order, got {:?}", other),
        };
        assert_eq!(order.size, Some(Size::Large));
        assert_eq!(order.toppings.len(), 2);

        let message = form.success_message().unwrap();
        assert!(message.contains("large"));
        assert!(message.contains("2 toppings"));

        assert_eq!(form.state(), SubmissionState::Succeeded);
        assert_eq!(form.draft(), &OrderDraft::new());
        assert!(form.errors().is_empty());
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_message_uses_trimmed_name() {
        let mut form = store(Schema::standard());
        fill(&mut form, "  Alice  ", "S", &[]);
        form.submit().unwrap();
        assert_eq!(
            form.success_message(),
            Some("Thank you for your order, Alice! Your small pizza with no toppings")
        );
    }

    #[test]
    fn test_every_failing_field_is_reported_in_schema_order() {
        let mut form = store(Schema::toppings_required());
        form.submit().unwrap();

        let fields: Vec<_> = form.errors().iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![FULL_NAME, SIZE, TOPPINGS]);
        assert_eq!(form.errors().get(SIZE), Some(messages::SIZE_REQUIRED));
    }

    #[test]
    fn test_unpicked_size_is_reported_as_required() {
        let mut form = store(Schema::standard());
        form.set_field(FULL_NAME, "Alice").unwrap();

        form.submit().unwrap();
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.errors().get(SIZE), Some(messages::SIZE_REQUIRED));

        form.set_field(SIZE, "XL").unwrap();
        form.submit().unwrap();
        assert_eq!(form.errors().get(SIZE), Some(messages::SIZE_INCORRECT));
    }

    #[test]
    fn test_submit_replaces_incremental_errors() {
        let mut form = FormStore::new(
            Arc::new(Schema::standard().clone()),
            ValidationMode::OnChange,
        );
        form.set_field(SIZE, "XL").unwrap();
        form.set_field(FULL_NAME, "Alice").unwrap();
        assert!(form.errors().contains(SIZE));

        form.set_field(SIZE, "M").unwrap();
        form.submit().unwrap();
        assert!(form.errors().is_empty());
        assert_eq!(form.state(), SubmissionState::Succeeded);
    }

    #[test]
    fn test_next_event_returns_to_idle() {
        let mut form = store(Schema::standard());
        form.submit().unwrap();
        assert_eq!(form.state(), SubmissionState::Failed);

        form.set_field(FULL_NAME, "Alice").unwrap();
        assert_eq!(form.state(), SubmissionState::Idle);
        // Errors stay until the next validation pass
        assert!(form.errors().contains(FULL_NAME));
    }

    #[test]
    fn test_success_message_survives_edits_until_next_submit() {
        let mut form = store(Schema::standard());
        fill(&mut form, "Alice", "M", &[]);
        form.submit().unwrap();

        form.set_field(FULL_NAME, "B").unwrap();
        assert!(form.success_message().is_some());

        form.submit().unwrap();
        assert!(form.success_message().is_none());
    }

    #[test]
    fn test_concurrent_submit_is_refused() {
        let mut form = store(Schema::standard());
        form.submitting = true;

        assert_eq!(form.submit(), Err(FormError::SubmitInProgress));
        assert_eq!(form.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_submit_supersedes_outstanding_tickets() {
        let mut form = store(Schema::standard());
        fill(&mut form, "Alice", "M", &[]);
        let ticket = form.begin_field_validation(FULL_NAME).unwrap();

        form.submit().unwrap();

        let late = Err(ConstraintViolation::new(FULL_NAME, "taken"));
        assert!(!form.resolve_field_validation(ticket, late));
        assert!(form.errors().is_empty());
    }
}
