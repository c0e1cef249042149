//! # Order Confirmation
//!
//! What a successful submission hands back: the accepted order and the
//! sentence shown to the customer.
//!
//! ```text
//! Thank you for your order, Alice! Your large pizza with 2 toppings
//!                           ─────       ─────            ──────────
//!                           trimmed     size label       topping clause
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::types::{OrderDraft, Size};

/// An order accepted by the schema.
///
/// Not persisted anywhere; the id only lets the caller refer to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlacedOrder {
    /// Reference id (UUID v4).
    pub id: String,

    /// Customer name, trimmed.
    pub customer: String,

    /// `None` only when the active schema does not constrain the size.
    pub size: Option<Size>,

    /// Toppings in the order they were checked.
    pub toppings: Vec<String>,

    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

impl PlacedOrder {
    /// Freezes a validated draft into an order.
    pub fn from_draft(draft: &OrderDraft) -> Self {
        PlacedOrder {
            id: Uuid::new_v4().to_string(),
            customer: draft.full_name.trim().to_string(),
            size: draft.selected_size(),
            toppings: draft.toppings.to_vec(),
            placed_at: Utc::now(),
        }
    }

    /// The success message shown after submission.
    ///
    /// ## Example
    /// ```rust
    /// use pizza_core::confirmation::PlacedOrder;
    /// use pizza_core::types::OrderDraft;
    ///
    /// let mut draft = OrderDraft::new();
    /// draft.full_name = " Alice ".to_string();
    /// draft.size = "L".to_string();
    ///
    /// assert_eq!(
    ///     PlacedOrder::from_draft(&draft).message(),
    ///     "Thank you for your order, Alice! Your large pizza with no toppings"
    /// );
    /// ```
    pub fn message(&self) -> String {
        let pizza = match self.size {
            Some(size) => format!("{} pizza", size.label()),
            None => "pizza".to_string(),
        };

        format!(
            "Thank you for your order, {}! Your {} with {}",
            self.customer,
            pizza,
            topping_clause(self.toppings.len())
        )
    }
}

fn topping_clause(count: usize) -> String {
    match count {
        0 => "no toppings".to_string(),
        1 => "1 topping".to_string(),
        n => format!("{} toppings", n),
    }
}
