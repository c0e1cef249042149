//! # State Module
//!
//! Form state and the configuration it was built from.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────────────┐    │
//! │  │    FormConfig        │  builds  │        FormStore             │    │
//! │  │                      │ ───────► │                              │    │
//! │  │  validation_mode     │          │  Arc<Schema>  (read-only)    │    │
//! │  │  schema / path       │          │  OrderDraft   (owned)        │    │
//! │  └──────────────────────┘          │  ErrorMap     (owned)        │    │
//! │                                    │  SubmissionState + flag      │    │
//! │                                    └──────────────────────────────┘    │
//! │                                                                         │
//! │  OWNERSHIP: the store lives in exactly one event loop. No locks.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod form;

pub use config::{FormConfig, ValidationMode};
pub use form::{FieldTicket, FormStore, FormView, SubmissionState, ToppingChoice, FAILURE_BANNER};
