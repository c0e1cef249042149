//! # Commands Module
//!
//! Translates input events from the rendering layer into store
//! transitions and answers with a fresh snapshot.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Rendering layer                                                        │
//! │  ───────────────                                                        │
//! │  {"event":"field_changed","name":"fullName","value":"Al"}              │
//! │         │                                                               │
//! │         │ (one JSON object per line on stdin)                           │
//! │         ▼                                                               │
//! │  commands::form::handle_line(&mut store, line)                          │
//! │         │                                                               │
//! │         ├── decode FormEvent                                            │
//! │         ├── apply to FormStore                                          │
//! │         └── FormView  |  { "error": { code, message } }                 │
//! │         │                                                               │
//! │         │ (one JSON object per line on stdout)                          │
//! │         ▼                                                               │
//! │  Rendering layer re-renders                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod form;

pub use form::{handle_event, handle_line, FormEvent, Reply};
