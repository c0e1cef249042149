//! # Form Configuration
//!
//! Which schema the form validates against and when it validates.
//!
//! ## Configuration Sources (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Default Values (lowest priority)                                   │
//! │     validation_mode = on_submit, schema = standard                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/order-form/order-form.toml (Linux)                       │
//! │     ~/Library/Application Support/com.pizza.order-form/... (macOS)     │
//! │                                                                         │
//! │  3. Environment Variables (highest priority)                           │
//! │     PIZZA_VALIDATION_MODE=on_change                                    │
//! │     PIZZA_SCHEMA=toppings_required                                     │
//! │     PIZZA_SCHEMA_PATH=/etc/pizza/schema.toml                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # order-form.toml
//! validation_mode = "on_change"   # on_submit | on_change
//! schema = "toppings_required"    # standard | toppings_required
//! # schema_path = "schema.toml"   # full custom schema, wins over `schema`
//! ```
//!
//! The resolved schema is built once at startup and shared read-only.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pizza_core::{Schema, SchemaVariant, FORM_FIELDS};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::{AppError, AppResult};

// =============================================================================
// Validation Mode
// =============================================================================

/// When field errors are computed.
///
/// ## Mode Comparison
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  ON_SUBMIT (Default)               │  ON_CHANGE                         │
/// │  ───────────────────               │  ─────────                         │
/// │  • ErrorMap empty until submit     │  • Each edit re-checks that field  │
/// │  • Submit replaces whole ErrorMap  │  • Only that field's key changes   │
/// │                                    │  • Submit still replaces all       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationMode {
    #[default]
    OnSubmit,
    OnChange,
}

impl ValidationMode {
    pub fn is_incremental(&self) -> bool {
        matches!(self, ValidationMode::OnChange)
    }
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationMode::OnSubmit => write!(f, "on_submit"),
            ValidationMode::OnChange => write!(f, "on_change"),
        }
    }
}

impl std::str::FromStr for ValidationMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on_submit" | "submit" => Ok(ValidationMode::OnSubmit),
            "on_change" | "change" | "incremental" => Ok(ValidationMode::OnChange),
            other => Err(AppError::InvalidConfig(format!(
                "Unknown validation mode: '{}'. Valid options: on_submit, on_change",
                other
            ))),
        }
    }
}

// =============================================================================
// Form Config
// =============================================================================

/// Complete form configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub validation_mode: ValidationMode,

    /// Built-in schema, used when `schema_path` is not set.
    #[serde(default)]
    pub schema: SchemaVariant,

    /// TOML file holding a full custom schema.
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
}

impl FormConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`order-form.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading form config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load form config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(ref path) = self.schema_path {
            if !path.exists() {
                return Err(AppError::InvalidConfig(format!(
                    "schema file does not exist: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Builds the schema this configuration selects.
    ///
    /// A custom schema file wins over the built-in variant. Either way the
    /// schema must only name fields the form renders.
    pub fn resolve_schema(&self) -> AppResult<Arc<Schema>> {
        let schema = match &self.schema_path {
            Some(path) => load_schema_file(path)?,
            None => self.schema.schema().clone(),
        };

        schema.check_fields(&FORM_FIELDS)?;

        info!(
            fields = schema.fields.len(),
            variant = %self.schema,
            custom = self.schema_path.is_some(),
            "Schema resolved"
        );
        Ok(Arc::new(schema))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `PIZZA_*` overrides from `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(mode) = lookup("PIZZA_VALIDATION_MODE") {
            match mode.parse() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding validation mode from environment");
                    self.validation_mode = parsed;
                }
                Err(e) => warn!("Ignoring PIZZA_VALIDATION_MODE: {}", e),
            }
        }

        if let Some(variant) = lookup("PIZZA_SCHEMA") {
            match variant.parse() {
                Ok(parsed) => {
                    debug!(schema = %variant, "Overriding schema variant from environment");
                    self.schema = parsed;
                }
                Err(e) => warn!("Ignoring PIZZA_SCHEMA: {}", e),
            }
        }

        if let Some(path) = lookup("PIZZA_SCHEMA_PATH") {
            debug!(path = %path, "Overriding schema path from environment");
            self.schema_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "pizza", "order-form")
            .map(|dirs| dirs.config_dir().join("order-form.toml"))
    }
}

fn load_schema_file(path: &Path) -> AppResult<Schema> {
    info!(?path, "Loading custom schema");
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}
