//! Maintenance mode settings model

use serde::Serialize;
use serde_json::Value;

use crate::AppResult;
use crate::models::option::SettingsStore;
use crate::sanitize::{sanitize_boolean, Sanitizer};

/// Settings group both options are registered under
pub const OPTION_GROUP: &str = "wp_simple_maintenance_options";

/// Store key of the on/off flag
pub const ACTIVE_KEY: &str = "wp_simple_maintenance_active";

/// Store key of the notice message
pub const MESSAGE_KEY: &str = "wp_simple_maintenance_message";

pub const DEFAULT_MESSAGE: &str =
    "We are currently performing scheduled maintenance. Please check back soon.";

/// The two persisted maintenance values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceSettings {
    pub active: bool,
    pub message: String,
}

impl Default for MaintenanceSettings {
    fn default() -> Self {
        Self {
            active: false,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

/// Raw settings-form submission, before sanitization
#[derive(Debug, Clone, Default)]
pub struct SettingsSubmission {
    pub active: Option<String>,
    pub message: Option<String>,
}

impl MaintenanceSettings {
    /// Read both options, substituting defaults for anything missing
    pub async fn load(store: &dyn SettingsStore) -> AppResult<Self> {
        let active = store
            .get_option(ACTIVE_KEY)
            .await?
            .map(|value| coerce_active(&value))
            .unwrap_or(false);

        let message = match store.get_option(MESSAGE_KEY).await? {
            Some(Value::String(message)) => message,
            _ => DEFAULT_MESSAGE.to_string(),
        };

        Ok(Self { active, message })
    }

    /// Like [`MaintenanceSettings::load`], but a store failure yields the defaults
    pub async fn load_or_default(store: &dyn SettingsStore) -> Self {
        match Self::load(store).await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Falling back to default maintenance settings: {}", e);
                Self::default()
            }
        }
    }

    /// Apply the save-time sanitizers to a form submission
    pub fn from_submission(submission: &SettingsSubmission, sanitizer: &dyn Sanitizer) -> Self {
        Self {
            active: sanitize_boolean(submission.active.as_deref()),
            message: sanitizer.sanitize(submission.message.as_deref().unwrap_or("")),
        }
    }

    /// Persist both options
    pub async fn save(&self, store: &dyn SettingsStore) -> AppResult<()> {
        store.update_option(ACTIVE_KEY, Value::Bool(self.active)).await?;
        store
            .update_option(MESSAGE_KEY, Value::String(self.message.clone()))
            .await?;
        Ok(())
    }
}

/// Interpret a stored flag written by this service or by hand
fn coerce_active(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(raw) => sanitize_boolean(Some(raw)),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        _ => false,
    }
}
