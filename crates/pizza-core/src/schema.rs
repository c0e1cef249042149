//! # Schema Definition
//!
//! Declarative per-field constraints and the message each one produces.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Schema                                                                 │
//! │  ├── FieldRules "fullName"                                              │
//! │  │   ├── min_length 3   → "full name must be at least 3 characters"    │
//! │  │   ├── max_length 20  → "full name must be at most 20 characters"    │
//! │  │   └── required       → "Full name is required"                      │
//! │  ├── FieldRules "size"                                                  │
//! │  │   ├── one_of S,M,L   → "size must be S or M or L"                   │
//! │  │   └── required       → "Size is required"                           │
//! │  └── FieldRules "toppings"          (toppings_required variant only)   │
//! │      └── min_count 1    → "At least one topping must be selected"      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field order and rule order are significant: per-field validation
//! surfaces the first failing rule, and record validation reports failures
//! in this order.
//!
//! ## Schema Files
//! Schemas are plain data and deserialize from TOML or JSON:
//! ```toml
//! [[fields]]
//! name = "fullName"
//!
//! [[fields.constraints]]
//! rule = { min_length = 3 }
//! message = "full name must be at least 3 characters"
//!
//! [[fields.constraints]]
//! rule = "required"
//! message = "Full name is required"
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};
use crate::types::{FULL_NAME, SIZE, TOPPINGS};
use crate::{FULL_NAME_MAX_LEN, FULL_NAME_MIN_LEN, MIN_TOPPINGS};

/// Messages of the built-in schemas.
pub mod messages {
    pub const FULL_NAME_TOO_SHORT: &str = "full name must be at least 3 characters";
    pub const FULL_NAME_TOO_LONG: &str = "full name must be at most 20 characters";
    pub const FULL_NAME_REQUIRED: &str = "Full name is required";
    pub const SIZE_INCORRECT: &str = "size must be S or M or L";
    pub const SIZE_REQUIRED: &str = "Size is required";
    pub const TOPPINGS_TOO_FEW: &str = "At least one topping must be selected";
}

// =============================================================================
// Rules & Constraints
// =============================================================================

/// What a constraint checks.
///
/// Text rules measure the trimmed value in characters. Rules other than
/// [`Rule::Required`] let an absent value through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Trimmed text has at least this many characters.
    MinLength(usize),

    /// Trimmed text has at most this many characters.
    MaxLength(usize),

    /// A value is supplied and is not blank / not an empty selection.
    Required,

    /// Trimmed text is one of the listed values.
    OneOf(Vec<String>),

    /// Selection holds at least this many entries.
    MinCount(usize),
}

/// A rule together with the message shown when it fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConstraint {
    pub rule: Rule,
    pub message: String,
}

impl FieldConstraint {
    pub fn new(rule: Rule, message: impl Into<String>) -> Self {
        FieldConstraint {
            rule,
            message: message.into(),
        }
    }

    pub fn min_length(bound: usize, message: impl Into<String>) -> Self {
        Self::new(Rule::MinLength(bound), message)
    }

    pub fn max_length(bound: usize, message: impl Into<String>) -> Self {
        Self::new(Rule::MaxLength(bound), message)
    }

    pub fn required(message: impl Into<String>) -> Self {
        Self::new(Rule::Required, message)
    }

    pub fn one_of<I, S>(allowed: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            Rule::OneOf(allowed.into_iter().map(Into::into).collect()),
            message,
        )
    }

    pub fn min_count(bound: usize, message: impl Into<String>) -> Self {
        Self::new(Rule::MinCount(bound), message)
    }
}

/// Ordered constraints of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRules {
    pub name: String,

    #[serde(default)]
    pub constraints: Vec<FieldConstraint>,
}

// =============================================================================
// Schema
// =============================================================================

/// Field name → ordered constraints, in declaration order.
///
/// ## Invariants
/// Checked by [`Schema::check_fields`], not by construction:
/// - each field appears at most once
/// - every field is one the form renders
/// - every rule has a message and satisfiable bounds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub fields: Vec<FieldRules>,
}

impl Schema {
    /// Empty schema: every record passes.
    pub fn new() -> Self {
        Schema::default()
    }

    /// Appends a field with its ordered constraints.
    pub fn field(mut self, name: impl Into<String>, constraints: Vec<FieldConstraint>) -> Self {
        self.fields.push(FieldRules {
            name: name.into(),
            constraints,
        });
        self
    }

    /// Constraints attached to `name`, in declaration order.
    ///
    /// An unconstrained field yields an empty slice.
    pub fn rules_for(&self, name: &str) -> &[FieldConstraint] {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.constraints.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the schema has an entry for `name`.
    pub fn declares(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Name + size rules. Toppings are unconstrained.
    pub fn standard() -> &'static Schema {
        &STANDARD
    }

    /// [`Schema::standard`] plus "at least one topping".
    pub fn toppings_required() -> &'static Schema {
        &TOPPINGS_REQUIRED
    }

    /// Verifies the schema can back a form rendering `known` fields.
    pub fn check_fields(&self, known: &[&str]) -> SchemaResult<()> {
        for (idx, rules) in self.fields.iter().enumerate() {
            let field = rules.name.as_str();

            if !known.contains(&field) {
                return Err(SchemaError::UnknownField {
                    field: field.to_string(),
                });
            }

            if self.fields[..idx].iter().any(|f| f.name == field) {
                return Err(SchemaError::DuplicateField {
                    field: field.to_string(),
                });
            }

            check_rules(field, &rules.constraints)?;
        }

        Ok(())
    }
}

fn check_rules(field: &str, constraints: &[FieldConstraint]) -> SchemaResult<()> {
    let invalid = |reason: &str| SchemaError::InvalidBound {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let mut min_len = None;
    let mut max_len = None;

    for constraint in constraints {
        if constraint.message.trim().is_empty() {
            return Err(SchemaError::EmptyMessage {
                field: field.to_string(),
            });
        }

        match &constraint.rule {
            Rule::MinLength(n) => min_len = Some(*n),
            Rule::MaxLength(n) => max_len = Some(*n),
            Rule::OneOf(allowed) if allowed.is_empty() => {
                return Err(invalid("one_of lists no values"));
            }
            _ => {}
        }
    }

    if let (Some(min), Some(max)) = (min_len, max_len) {
        if min > max {
            return Err(invalid("min_length exceeds max_length"));
        }
    }

    Ok(())
}

// =============================================================================
// Built-in Variants
// =============================================================================

static STANDARD: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .field(
            FULL_NAME,
            vec![
                FieldConstraint::min_length(FULL_NAME_MIN_LEN, messages::FULL_NAME_TOO_SHORT),
                FieldConstraint::max_length(FULL_NAME_MAX_LEN, messages::FULL_NAME_TOO_LONG),
                FieldConstraint::required(messages::FULL_NAME_REQUIRED),
            ],
        )
        .field(
            SIZE,
            vec![
                FieldConstraint::one_of(["S", "M", "L"], messages::SIZE_INCORRECT),
                FieldConstraint::required(messages::SIZE_REQUIRED),
            ],
        )
});

static TOPPINGS_REQUIRED: Lazy<Schema> = Lazy::new(|| {
    Schema::clone(&STANDARD).field(
        TOPPINGS,
        vec![FieldConstraint::min_count(
            MIN_TOPPINGS,
            messages::TOPPINGS_TOO_FEW,
        )],
    )
});

/// Which built-in schema the form validates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    /// Name and size rules only.
    #[default]
    Standard,

    /// Name and size rules plus at least one topping.
    ToppingsRequired,
}

impl SchemaVariant {
    pub fn schema(&self) -> &'static Schema {
        match self {
            SchemaVariant::Standard => Schema::standard(),
            SchemaVariant::ToppingsRequired => Schema::toppings_required(),
        }
    }
}

impl std::fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaVariant::Standard => write!(f, "standard"),
            SchemaVariant::ToppingsRequired => write!(f, "toppings_required"),
        }
    }
}

impl std::str::FromStr for SchemaVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(SchemaVariant::Standard),
            "toppings_required" | "toppings-required" => Ok(SchemaVariant::ToppingsRequired),
            other => Err(format!(
                "Unknown schema variant: '{}'. Valid options: standard, toppings_required",
                other
            )),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FORM_FIELDS;

    #[test]
    fn test_standard_rule_order() {
        let rules = Schema::standard().rules_for(FULL_NAME);
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].rule, Rule::MinLength(3));
        assert_eq!(rules[1].rule, Rule::MaxLength(20));
        assert_eq!(rules[2].rule, Rule::Required);

        assert!(Schema::standard().rules_for(TOPPINGS).is_empty());
        assert!(!Schema::standard().declares(TOPPINGS));
    }

    #[test]
    fn test_toppings_required_extends_standard() {
        let schema = Schema::toppings_required();
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec![FULL_NAME, SIZE, TOPPINGS]);
        assert_eq!(schema.rules_for(TOPPINGS)[0].rule, Rule::MinCount(1));
    }

    #[test]
    fn test_builtin_schemas_pass_field_check() {
        assert!(Schema::standard().check_fields(&FORM_FIELDS).is_ok());
        assert!(Schema::toppings_required().check_fields(&FORM_FIELDS).is_ok());
    }

    #[test]
    fn test_check_fields_rejects_bad_schemas() {
        let unknown = Schema::new().field("crust", vec![]);
        assert!(matches!(
            unknown.check_fields(&FORM_FIELDS),
            Err(SchemaError::UnknownField { .. })
        ));

        let duplicate = Schema::new().field(SIZE, vec![]).field(SIZE, vec![]);
        assert!(matches!(
            duplicate.check_fields(&FORM_FIELDS),
            Err(SchemaError::DuplicateField { .. })
        ));

        let silent = Schema::new().field(SIZE, vec![FieldConstraint::required("  ")]);
        assert!(matches!(
            silent.check_fields(&FORM_FIELDS),
            Err(SchemaError::EmptyMessage { .. })
        ));

        let inverted = Schema::new().field(
            FULL_NAME,
            vec![
                FieldConstraint::min_length(10, "min"),
                FieldConstraint::max_length(5, "max"),
            ],
        );
        assert!(matches!(
            inverted.check_fields(&FORM_FIELDS),
            Err(SchemaError::InvalidBound { .. })
        ));

        let empty_set = Schema::new().field(
            SIZE,
            vec![FieldConstraint::one_of(Vec::<String>::new(), "x")],
        );
        assert!(empty_set.check_fields(&FORM_FIELDS).is_err());
    }

    #[test]
    fn test_schema_from_toml() {
        let toml_str = r#"
            [[fields]]
            name = "fullName"

            [[fields.constraints]]
            rule = { min_length = 2 }
            message = "too short"

            [[fields.constraints]]
            rule = "required"
            message = "needed"

            [[fields]]
            name = "size"

            [[fields.constraints]]
            rule = { one_of = ["M", "L"] }
            message = "no small pizzas"
        "#;

        let schema: Schema = toml::from_str(toml_str).unwrap();
        assert_eq!(schema.rules_for(FULL_NAME)[0].rule, Rule::MinLength(2));
        assert_eq!(schema.rules_for(FULL_NAME)[1].rule, Rule::Required);
        assert_eq!(
            schema.rules_for(SIZE)[0].rule,
            Rule::OneOf(vec!["M".to_string(), "L".to_string()])
        );
        assert!(schema.check_fields(&FORM_FIELDS).is_ok());
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!(
            "standard".parse::<SchemaVariant>().unwrap(),
            SchemaVariant::Standard
        );
        assert_eq!(
            "toppings-required".parse::<SchemaVariant>().unwrap(),
            SchemaVariant::ToppingsRequired
        );
        assert!("strict".parse::<SchemaVariant>().is_err());
        assert_eq!(SchemaVariant::ToppingsRequired.to_string(), "toppings_required");
    }
}
