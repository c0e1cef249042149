//! # Validation Engine
//!
//! Evaluates a [`Schema`] against one field or a whole [`OrderDraft`].
//!
//! ## Two Entry Points
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Entry Points                            │
//! │                                                                         │
//! │  validate_field(name, value, draft)        validate_record(draft)       │
//! │  ──────────────────────────────────        ─────────────────────        │
//! │  • rules of ONE field                      • every field, every rule    │
//! │  • stops at the first failing rule         • collects ALL failures      │
//! │  • used while the user types               • used on submit             │
//! │  • Err(ConstraintViolation)                • Err(ValidationFailure)     │
//! │                                                                         │
//! │  Both walk rules in declaration order and never touch the draft.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Measuring Values
//! - Text is trimmed before it is measured or compared. The stored value is
//!   left as typed.
//! - Lengths are counted in characters, not bytes.
//! - A selection is measured by how many entries it holds.
//! - A missing value (`None`) only fails [`Rule::Required`].
//!
//! ## Eligibility Gate
//! [`is_eligible`] is the submit button's own check. It looks at the name
//! and size only, so a draft can be eligible while the schema still
//! rejects it (for example with no toppings under `toppings_required`).

use crate::error::{ConstraintViolation, FieldResult, RecordResult, ValidationFailure};
use crate::schema::{FieldConstraint, Rule, Schema};
use crate::types::{FieldValue, OrderDraft};
use crate::ELIGIBLE_NAME_MIN_LEN;

impl Schema {
    /// Checks `value` against the rules of `field` only.
    ///
    /// Returns the message of the first failing rule. Fields without a
    /// schema entry always pass.
    ///
    /// `_context` is the full draft, for rules that compare against sibling
    /// fields. None of the current rules do.
    ///
    /// ## Example
    /// ```rust
    /// use pizza_core::schema::Schema;
    /// use pizza_core::types::{FieldValue, OrderDraft, FULL_NAME};
    ///
    /// let draft = OrderDraft::new();
    /// let err = Schema::standard()
    ///     .validate_field(FULL_NAME, Some(FieldValue::Text("  Al  ")), &draft)
    ///     .unwrap_err();
    /// assert_eq!(err.message, "full name must be at least 3 characters");
    /// ```
    pub fn validate_field(
        &self,
        field: &str,
        value: Option<FieldValue<'_>>,
        _context: &OrderDraft,
    ) -> FieldResult {
        match self
            .rules_for(field)
            .iter()
            .find(|constraint| !satisfies(constraint, value))
        {
            Some(failed) => Err(ConstraintViolation::new(field, failed.message.clone())),
            None => Ok(()),
        }
    }

    /// Checks every rule of every field against `record`.
    ///
    /// Not fail-fast: all failures are collected in schema field order,
    /// then rule order.
    pub fn validate_record(&self, record: &OrderDraft) -> RecordResult {
        let mut violations = Vec::new();

        for rules in &self.fields {
            let value = record.value_of(&rules.name);
            violations.extend(
                rules
                    .constraints
                    .iter()
                    .filter(|constraint| !satisfies(constraint, value))
                    .map(|failed| ConstraintViolation::new(&rules.name, failed.message.clone())),
            );
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { violations })
        }
    }
}

/// Whether the submit control should be enabled.
///
/// True iff the trimmed name has at least [`ELIGIBLE_NAME_MIN_LEN`]
/// characters and the size is one of S/M/L. Toppings are not consulted.
pub fn is_eligible(draft: &OrderDraft) -> bool {
    char_len(&draft.full_name) >= ELIGIBLE_NAME_MIN_LEN && draft.selected_size().is_some()
}

// =============================================================================
// Rule Evaluation
// =============================================================================

fn satisfies(constraint: &FieldConstraint, value: Option<FieldValue<'_>>) -> bool {
    let value = match value {
        Some(value) => value,
        None => return !matches!(constraint.rule, Rule::Required),
    };

    match &constraint.rule {
        Rule::Required => match value {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::Selection(set) => !set.is_empty(),
        },
        Rule::MinLength(bound) | Rule::MinCount(bound) => measure(value) >= *bound,
        Rule::MaxLength(bound) => measure(value) <= *bound,
        Rule::OneOf(allowed) => match value {
            FieldValue::Text(text) => allowed.iter().any(|a| a == text.trim()),
            FieldValue::Selection(set) => set.iter().all(|t| allowed.iter().any(|a| a == t)),
        },
    }
}

fn measure(value: FieldValue<'_>) -> usize {
    match value {
        FieldValue::Text(text) => char_len(text),
        FieldValue::Selection(set) => set.len(),
    }
}

fn char_len(text: &str) -> usize {
    text.trim().chars().count()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{messages, FieldConstraint};
    use crate::types::{ToppingSet, FULL_NAME, SIZE, TOPPINGS};

    fn draft(name: &str, size: &str, toppings: &[&str]) -> OrderDraft {
        OrderDraft {
            full_name: name.to_string(),
            size: size.to_string(),
            toppings: toppings.iter().collect(),
        }
    }

    fn name_error(name: &str) -> Option<String> {
        let ctx = OrderDraft::new();
        Schema::standard()
            .validate_field(FULL_NAME, Some(FieldValue::Text(name)), &ctx)
            .err()
            .map(|v| v.message)
    }

    #[test]
    fn test_full_name_bounds() {
        assert_eq!(name_error(""), Some(messages::FULL_NAME_TOO_SHORT.to_string()));
        assert_eq!(name_error("Al"), Some(messages::FULL_NAME_TOO_SHORT.to_string()));
        assert_eq!(name_error("Bob"), None);
        assert_eq!(name_error(&"a".repeat(20)), None);
        assert_eq!(
            name_error(&"a".repeat(21)),
            Some(messages::FULL_NAME_TOO_LONG.to_string())
        );
    }

    #[test]
    fn test_full_name_is_trimmed_before_measuring() {
        assert_eq!(name_error("   "), Some(messages::FULL_NAME_TOO_SHORT.to_string()));
        assert_eq!(name_error("  Al  "), Some(messages::FULL_NAME_TOO_SHORT.to_string()));
        assert_eq!(name_error("  Bob  "), None);

        let padded = format!("  {}  ", "a".repeat(20));
        assert_eq!(name_error(&padded), None);
    }

    #[test]
    fn test_length_counts_characters() {
        // 3 characters, 6 bytes
        assert_eq!(name_error("Zoë"), None);
        assert_eq!(name_error(&"é".repeat(20)), None);
    }

    #[test]
    fn test_size_rules() {
        let ctx = OrderDraft::new();
        let schema = Schema::standard();
        let check = |v: &str| schema.validate_field(SIZE, Some(FieldValue::Text(v)), &ctx);

        for ok in ["S", "M", "L"] {
            assert!(check(ok).is_ok());
        }
        for bad in ["XL", "m", "Small"] {
            assert_eq!(check(bad).unwrap_err().message, messages::SIZE_INCORRECT);
        }
    }

    #[test]
    fn test_unpicked_size_reports_required() {
        let record = draft("Alice", "", &[]);
        let err = Schema::standard()
            .validate_field(SIZE, record.value_of(SIZE), &record)
            .unwrap_err();
        assert_eq!(err.message, messages::SIZE_REQUIRED);

        let failure = Schema::standard().validate_record(&record).unwrap_err();
        assert_eq!(failure.len(), 1);
        assert_eq!(failure.violations[0].message, messages::SIZE_REQUIRED);
    }

    #[test]
    fn test_missing_value_fails_required_with_its_message() {
        let ctx = OrderDraft::new();
        let err = Schema::standard().validate_field(SIZE, None, &ctx).unwrap_err();
        assert_eq!(err.field, SIZE);
        assert_eq!(err.message, messages::SIZE_REQUIRED);

        let err = Schema::standard()
            .validate_field(FULL_NAME, None, &ctx)
            .unwrap_err();
        assert_eq!(err.message, messages::FULL_NAME_REQUIRED);
    }

    #[test]
    fn test_unconstrained_field_passes() {
        let ctx = OrderDraft::new();
        let empty = ToppingSet::new();
        assert!(Schema::standard()
            .validate_field(TOPPINGS, Some(FieldValue::Selection(&empty)), &ctx)
            .is_ok());
        assert!(Schema::standard()
            .validate_field("crust", Some(FieldValue::Text("")), &ctx)
            .is_ok());
    }

    #[test]
    fn test_validate_field_does_not_mutate_context() {
        let ctx = draft("  Alice  ", "L", &[]);
        let before = ctx.clone();
        let _ = Schema::standard().validate_field(FULL_NAME, ctx.value_of(FULL_NAME), &ctx);
        assert_eq!(ctx, before);
    }

    #[test]
    fn test_record_collects_all_failures_in_order() {
        let failure = Schema::toppings_required()
            .validate_record(&draft("", "", &[]))
            .unwrap_err();

        let pairs: Vec<_> = failure
            .violations
            .iter()
            .map(|v| (v.field.as_str(), v.message.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                (FULL_NAME, messages::FULL_NAME_TOO_SHORT),
                (FULL_NAME, messages::FULL_NAME_REQUIRED),
                (SIZE, messages::SIZE_REQUIRED),
                (TOPPINGS, messages::TOPPINGS_TOO_FEW),
            ]
        );
    }

    #[test]
    fn test_topping_count_depends_on_variant() {
        let record = draft("Alice", "M", &[]);
        let failure = Schema::toppings_required()
            .validate_record(&record)
            .unwrap_err();
        assert_eq!(failure.len(), 1);
        assert_eq!(failure.violations[0].message, messages::TOPPINGS_TOO_FEW);

        assert!(Schema::standard().validate_record(&record).is_ok());
        assert!(Schema::toppings_required()
            .validate_record(&draft("Alice", "M", &["Ham"]))
            .is_ok());
    }

    #[test]
    fn test_topping_count_ignores_identity() {
        let schema =
            Schema::new().field(TOPPINGS, vec![FieldConstraint::min_count(2, "pick two")]);
        assert!(schema.validate_record(&draft("Alice", "M", &["Ham", "Pepperoni"])).is_ok());
        assert!(schema.validate_record(&draft("Alice", "M", &["X", "Y"])).is_ok());
        assert!(schema.validate_record(&draft("Alice", "M", &["Ham", "Ham"])).is_err());
    }

    #[test]
    fn test_one_of_on_selection_checks_every_entry() {
        let schema = Schema::new().field(
            TOPPINGS,
            vec![FieldConstraint::one_of(["Ham", "Pineapple"], "not on the menu")],
        );
        assert!(schema.validate_record(&draft("Alice", "M", &["Ham"])).is_ok());
        assert!(schema
            .validate_record(&draft("Alice", "M", &["Ham", "Anchovies"]))
            .is_err());
    }

    #[test]
    fn test_missing_record_field_fails_required() {
        let schema = Schema::new().field("crust", vec![FieldConstraint::required("pick a crust")]);
        let failure = schema.validate_record(&OrderDraft::new()).unwrap_err();
        assert_eq!(failure.violations[0].field, "crust");
        assert_eq!(failure.violations[0].message, "pick a crust");
    }

    #[test]
    fn test_eligibility_gate() {
        assert!(is_eligible(&draft("Bob", "S", &[])));
        assert!(!is_eligible(&draft("Bob", "", &[])));
        assert!(!is_eligible(&draft("Al", "M", &[])));
        assert!(!is_eligible(&draft("  Al  ", "M", &[])));
        assert!(!is_eligible(&draft("Bob", "XL", &[])));

        // Eligible even though the stricter schema rejects it
        let record = draft("Alice", "L", &[]);
        assert!(is_eligible(&record));
        assert!(Schema::toppings_required().validate_record(&record).is_err());
    }
}
