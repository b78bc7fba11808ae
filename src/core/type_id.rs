use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between main type and sub type in a type identifier.
pub const TYPE_DELIMITER: char = '.';

/// Parsed component type identifier of the form `main` or `main.sub`.
///
/// A missing sub type is the wildcard (`sub == None`): a class registered
/// under it serves every sub type of its main type that has no class of its
/// own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentTypeId {
    pub main: String,
    pub sub: Option<String>,
}

impl ComponentTypeId {
    #[must_use]
    pub fn new(main: impl Into<String>, sub: Option<String>) -> Self {
        Self {
            main: main.into(),
            sub: sub.filter(|value| !value.is_empty()),
        }
    }

    /// Parses `main` or `main.sub`. Never fails: an empty sub part, or any
    /// part after a second delimiter, is dropped.
    #[must_use]
    pub fn parse(identifier: &str) -> Self {
        let mut parts = identifier.split(TYPE_DELIMITER);
        let main = parts.next().unwrap_or_default().to_owned();
        let sub = parts.next().map(str::to_owned);
        Self::new(main, sub)
    }

    #[must_use]
    pub fn main(&self) -> &str {
        &self.main
    }

    #[must_use]
    pub fn sub(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.sub.is_none()
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub {
            Some(sub) => write!(f, "{}{TYPE_DELIMITER}{sub}", self.main),
            None => f.write_str(&self.main),
        }
    }
}

impl From<&str> for ComponentTypeId {
    fn from(identifier: &str) -> Self {
        Self::parse(identifier)
    }
}
