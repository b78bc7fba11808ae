use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::OptionObject;
use crate::error::{ComponentError, ComponentResult};

/// Source of theme option fragments keyed by component main type.
pub trait ThemeSource {
    fn get(&self, main_type: &str) -> Option<&Value>;
}

impl ThemeSource for OptionObject {
    fn get(&self, main_type: &str) -> Option<&Value> {
        serde_json::Map::get(self, main_type)
    }
}

/// Theme document: a JSON object whose keys are main types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    fragments: OptionObject,
}

impl Theme {
    #[must_use]
    pub fn new(fragments: OptionObject) -> Self {
        Self { fragments }
    }

    pub fn from_value(value: Value) -> ComponentResult<Self> {
        match value {
            Value::Object(fragments) => Ok(Self { fragments }),
            other => Err(ComponentError::InvalidData(format!(
                "theme must be a json object, got `{other}`"
            ))),
        }
    }

    pub fn from_json_str(input: &str) -> ComponentResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ComponentError::InvalidData(format!("failed to parse theme json: {e}")))?;
        Self::from_value(value)
    }

    /// Sets the fragment for `main_type`.
    #[must_use]
    pub fn with_fragment(mut self, main_type: &str, fragment: Value) -> Self {
        self.fragments.insert(main_type.to_owned(), fragment);
        self
    }

    #[must_use]
    pub fn fragments(&self) -> &OptionObject {
        &self.fragments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl ThemeSource for Theme {
    fn get(&self, main_type: &str) -> Option<&Value> {
        self.fragments.get(main_type)
    }
}
