use serde_json::Value;
use tracing::{debug, trace};

use crate::core::{ComponentTypeId, OptionObject};
use crate::error::{ComponentError, ComponentResult};

use super::ComponentRegistry;

impl ComponentRegistry {
    /// Installs the sub type defaulter of `main_type`, replacing any earlier one.
    pub fn register_sub_type_defaulter<F>(&mut self, main_type: &str, defaulter: F)
    where
        F: Fn(&OptionObject) -> Option<String> + 'static,
    {
        debug!(main_type, "register sub type defaulter");
        self.sub_type_defaulters
            .insert(main_type.to_owned(), Box::new(defaulter));
    }

    /// Resolves the sub type a raw option block asks for.
    ///
    /// An explicit `type` field (`"main.sub"` or `"sub"`) wins, then the
    /// registered defaulter. Without either, the wildcard (`None`) is returned
    /// when `main_type` has a wildcard class or no sub types at all, the single
    /// registered sub type when there is exactly one, and
    /// [`ComponentError::AmbiguousSubtype`] otherwise.
    pub fn determine_sub_type(
        &self,
        main_type: &str,
        raw_option: &OptionObject,
    ) -> ComponentResult<Option<String>> {
        if let Some(sub_type) = explicit_sub_type(raw_option) {
            trace!(main_type, sub_type = %sub_type, "explicit sub type");
            return Ok(Some(sub_type));
        }

        let main = ComponentTypeId::parse(main_type).main;
        if let Some(sub_type) = self
            .sub_type_defaulters
            .get(&main)
            .and_then(|defaulter| defaulter(raw_option))
            .filter(|sub_type| !sub_type.is_empty())
        {
            trace!(main_type, sub_type = %sub_type, "defaulted sub type");
            return Ok(Some(sub_type));
        }

        if self.has_class(&main, None) {
            return Ok(None);
        }
        let mut candidates = self.sub_types(&main);
        match candidates.len() {
            0 => Ok(None),
            1 => Ok(candidates.pop()),
            _ => Err(ComponentError::AmbiguousSubtype {
                main_type: main,
                candidates,
            }),
        }
    }
}

pub(super) fn explicit_sub_type(raw_option: &OptionObject) -> Option<String> {
    let Some(Value::String(declared)) = raw_option.get("type") else {
        return None;
    };
    let sub_type = match declared.split_once(crate::core::TYPE_DELIMITER) {
        Some((_, sub)) => ComponentTypeId::parse(sub).main,
        None => declared.clone(),
    };
    (!sub_type.is_empty()).then_some(sub_type)
}
