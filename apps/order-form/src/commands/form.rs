//! # Form Commands
//!
//! One handler per input event the form consumes.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EventError, FormError};
use crate::state::{FormStore, FormView};

/// An input event from the rendering layer.
///
/// ```json
/// {"event":"field_changed","name":"size","value":"M"}
/// {"event":"topping_changed","name":"Ham","checked":true}
/// {"event":"submit"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    /// Text input or select changed.
    FieldChanged { name: String, value: String },

    /// Topping checkbox changed.
    ToppingChanged { name: String, checked: bool },

    /// Submit pressed (default page navigation already suppressed).
    Submit,
}

/// What is written back for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    View(Box<FormView>),
    Error { error: EventError },
}

/// Applies one event and returns the resulting snapshot.
pub fn handle_event(store: &mut FormStore, event: FormEvent) -> Result<FormView, FormError> {
    match event {
        FormEvent::FieldChanged { name, value } => {
            debug!(field = %name, "field_changed event");
            store.set_field(&name, value)?;
        }
        FormEvent::ToppingChanged { name, checked } => {
            debug!(topping = %name, checked, "topping_changed event");
            store.toggle_topping(&name, checked);
        }
        FormEvent::Submit => {
            debug!("submit event");
            store.submit()?;
        }
    }

    Ok(store.view())
}

/// Decodes and applies one JSON line.
///
/// Never fails: undecodable or rejected events become [`Reply::Error`] and
/// leave the store untouched.
pub fn handle_line(store: &mut FormStore, line: &str) -> Reply {
    let result = serde_json::from_str::<FormEvent>(line)
        .map_err(EventError::from)
        .and_then(|event| handle_event(store, event).map_err(EventError::from));

    match result {
        Ok(view) => Reply::View(Box::new(view)),
        Err(error) => {
            warn!(code = ?error.code, "Event rejected: {}", error.message);
            Reply::Error { error }
        }
    }
}
