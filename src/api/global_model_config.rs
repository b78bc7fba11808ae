use serde::{Deserialize, Serialize};

use crate::error::{ComponentError, ComponentResult};

use super::Theme;

/// What a build does with a component whose class is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingClassPolicy {
    /// Log and drop that one component; the rest of the document still builds.
    #[default]
    Skip,
    /// Abort the build with the `NotFound` error.
    Fail,
}

/// Public global model configuration.
///
/// Serializable so hosts can persist the theme and build policy alongside
/// their documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalModelConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub missing_class_policy: MissingClassPolicy,
}

impl GlobalModelConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the theme overlay.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets how unregistered component classes are handled.
    #[must_use]
    pub fn with_missing_class_policy(mut self, policy: MissingClassPolicy) -> Self {
        self.missing_class_policy = policy;
        self
    }

    pub fn to_json_pretty(&self) -> ComponentResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ComponentError::InvalidData(format!("failed to serialize global model config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ComponentResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ComponentError::InvalidData(format!("failed to parse global model config: {e}"))
        })
    }
}
