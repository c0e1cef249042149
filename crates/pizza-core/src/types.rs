//! # Domain Types
//!
//! Core types shared by the validation engine and the form store.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderDraft    │   │      Size       │   │   ToppingSet    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  full_name      │   │  S  "small"     │   │  unique names   │       │
//! │  │  size (raw)     │   │  M  "medium"    │   │  in selection   │       │
//! │  │  toppings       │   │  L  "large"     │   │  order          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   FieldValue    │   │     Topping     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Text(&str)     │   │  id, text       │                             │
//! │  │  Selection(..)  │   │  (catalog)      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Raw vs. Typed Size
//! The draft stores the size exactly as the select control reported it, so
//! that an out-of-range value can still be validated and reported. Use
//! [`OrderDraft::selected_size`] for the typed view.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Field Names
// =============================================================================

/// Name field key, as used by the rendering layer and schemas.
pub const FULL_NAME: &str = "fullName";

/// Size select key.
pub const SIZE: &str = "size";

/// Topping checkbox group key.
pub const TOPPINGS: &str = "toppings";

/// Every field the form renders, in display order.
pub const FORM_FIELDS: [&str; 3] = [FULL_NAME, SIZE, TOPPINGS];

// =============================================================================
// Size
// =============================================================================

/// Pizza size offered by the select control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Size {
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl Size {
    /// All sizes in the order they are offered.
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    /// Parses the select control's value (`"S"`, `"M"`, `"L"`).
    ///
    /// Surrounding whitespace is ignored; anything else (including the
    /// empty placeholder option) is `None`.
    pub fn from_code(code: &str) -> Option<Size> {
        match code.trim() {
            "S" => Some(Size::Small),
            "M" => Some(Size::Medium),
            "L" => Some(Size::Large),
            _ => None,
        }
    }

    /// Value submitted by the select control.
    pub const fn code(&self) -> &'static str {
        match self {
            Size::Small => "S",
            Size::Medium => "M",
            Size::Large => "L",
        }
    }

    /// Lowercase label used inside the confirmation sentence.
    pub const fn label(&self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }

    /// Option text shown in the select control.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Topping Set
// =============================================================================

/// Selected topping names.
///
/// Behaves as a set (no duplicates) but remembers selection order, which is
/// the order the confirmation lists them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ToppingSet(IndexSet<String>);

impl ToppingSet {
    pub fn new() -> Self {
        ToppingSet(IndexSet::new())
    }

    /// Adds `name`. Returns `false` if it was already selected.
    pub fn insert(&mut self, name: &str) -> bool {
        self.0.insert(name.to_string())
    }

    /// Removes `name`. Returns `false` if it was not selected.
    pub fn remove(&mut self, name: &str) -> bool {
        self.0.shift_remove(name)
    }

    /// Applies a checkbox change. Returns whether the set changed.
    pub fn set(&mut self, name: &str, selected: bool) -> bool {
        if selected {
            self.insert(name)
        } else {
            self.remove(name)
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ToppingSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ToppingSet(iter.into_iter().map(|n| n.as_ref().to_string()).collect())
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// The in-progress order before a successful submission.
///
/// ## Ownership
/// Owned by the form store. The validation engine only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderDraft {
    /// Customer name exactly as typed (never trimmed in place).
    pub full_name: String,

    /// Raw select value; empty string means unset.
    pub size: String,

    /// Checked toppings.
    pub toppings: ToppingSet,
}

impl OrderDraft {
    /// Creates an empty draft (no name, size unset, no toppings).
    pub fn new() -> Self {
        OrderDraft::default()
    }

    /// Typed size, if the raw value is one of S/M/L.
    pub fn selected_size(&self) -> Option<Size> {
        Size::from_code(&self.size)
    }

    /// Looks up a field's value by its form name.
    ///
    /// Returns `None` for names the draft does not carry and for a size
    /// that has not been picked, which the validation engine treats as "no
    /// value supplied". A blank name is still a value.
    pub fn value_of(&self, field: &str) -> Option<FieldValue<'_>> {
        match field {
            FULL_NAME => Some(FieldValue::Text(&self.full_name)),
            SIZE if self.size.trim().is_empty() => None,
            SIZE => Some(FieldValue::Text(&self.size)),
            TOPPINGS => Some(FieldValue::Selection(&self.toppings)),
            _ => None,
        }
    }
}

// =============================================================================
// Field Value
// =============================================================================

/// Borrowed view of a field's value handed to the validation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Text input or select value.
    Text(&'a str),

    /// Checkbox group.
    Selection(&'a ToppingSet),
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(text: &'a str) -> Self {
        FieldValue::Text(text)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(text: &'a String) -> Self {
        FieldValue::Text(text.as_str())
    }
}

impl<'a> From<&'a ToppingSet> for FieldValue<'a> {
    fn from(set: &'a ToppingSet) -> Self {
        FieldValue::Selection(set)
    }
}

// =============================================================================
// Topping Catalog
// =============================================================================

/// A topping offered as a checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Topping {
    pub topping_id: String,
    pub text: String,
}

static CATALOG: Lazy<Vec<Topping>> = Lazy::new(|| {
    [
        ("1", "Pepperoni"),
        ("2", "Green Peppers"),
        ("3", "Pineapple"),
        ("4", "Mushrooms"),
        ("5", "Ham"),
    ]
    .into_iter()
    .map(|(id, text)| Topping {
        topping_id: id.to_string(),
        text: text.to_string(),
    })
    .collect()
});

/// Toppings offered by the form, in display order.
pub fn topping_catalog() -> &'static [Topping] {
    &CATALOG
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_codes() {
        assert_eq!(Size::from_code("S"), Some(Size::Small));
        assert_eq!(Size::from_code(" L "), Some(Size::Large));
        assert_eq!(Size::from_code(""), None);
        assert_eq!(Size::from_code("XL"), None);
        assert_eq!(Size::from_code("s"), None);

        for size in Size::ALL {
            assert_eq!(Size::from_code(size.code()), Some(size));
        }
        assert_eq!(Size::Medium.label(), "medium");
    }

    #[test]
    fn test_size_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Size::Large).unwrap(), r#""L""#);
    }

    #[test]
    fn test_topping_set_behaves_as_set() {
        let mut set = ToppingSet::new();
        assert!(set.insert("Ham"));
        assert!(!set.insert("Ham"));
        assert_eq!(set.len(), 1);

        assert!(set.set("Pineapple", true));
        assert!(!set.set("Mushrooms", false));
        assert!(set.set("Ham", false));

        assert_eq!(set.to_vec(), vec!["Pineapple".to_string()]);
    }

    #[test]
    fn test_topping_set_from_iter_dedups() {
        let set: ToppingSet = ["Ham", "Ham", "Pepperoni"].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Ham", "Pepperoni"]);
    }

    #[test]
    fn test_draft_defaults_and_lookup() {
        let draft = OrderDraft::new();
        assert_eq!(draft.full_name, "");
        assert_eq!(draft.selected_size(), None);
        assert!(draft.toppings.is_empty());

        assert_eq!(draft.value_of(FULL_NAME), Some(FieldValue::Text("")));
        assert!(matches!(
            draft.value_of(TOPPINGS),
            Some(FieldValue::Selection(_))
        ));
        assert_eq!(draft.value_of("crust"), None);
    }

    #[test]
    fn test_unpicked_size_has_no_value() {
        let mut draft = OrderDraft::new();
        assert_eq!(draft.value_of(SIZE), None);

        draft.size = "  ".to_string();
        assert_eq!(draft.value_of(SIZE), None);

        draft.size = "X".to_string();
        assert_eq!(draft.value_of(SIZE), Some(FieldValue::Text("X")));
    }

    #[test]
    fn test_topping_set_remove_keeps_selection_order() {
        let mut set: ToppingSet = ["Ham", "Pineapple", "Mushrooms"].into_iter().collect();
        assert!(set.remove("Ham"));
        assert!(set.insert("Ham"));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["Pineapple", "Mushrooms", "Ham"]
        );
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let mut draft = OrderDraft::new();
        draft.full_name = "Alice".to_string();
        draft.toppings.insert("Ham");

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["fullName"], "Alice");
        assert_eq!(json["size"], "");
        assert_eq!(json["toppings"][0], "Ham");
    }

    #[test]
    fn test_catalog() {
        let catalog = topping_catalog();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog[0].text, "Pepperoni");
        assert_eq!(catalog[4].topping_id, "5");
    }
}
