use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::core::{OptionObject, get_path};

use super::{ComponentClass, ComponentRegistry, ThemeSource};

/// Already-built components of one dependency main type, keyed by main type.
pub type DependentModels = IndexMap<String, Vec<ComponentHandle>>;

/// Stable reference to a component held by a global model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentHandle {
    pub main_type: String,
    pub component_index: usize,
}

impl ComponentHandle {
    #[must_use]
    pub fn new(main_type: impl Into<String>, component_index: usize) -> Self {
        Self {
            main_type: main_type.into(),
            component_index,
        }
    }
}

/// Identity fields computed by the caller before construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentIdentity {
    pub main_type: String,
    pub sub_type: Option<String>,
    pub id: String,
    pub name: String,
    pub component_index: usize,
}

impl ComponentIdentity {
    #[must_use]
    pub fn new(main_type: impl Into<String>, component_index: usize) -> Self {
        let main_type = main_type.into();
        Self {
            id: format!("\0{main_type}\0{component_index}"),
            main_type,
            sub_type: None,
            name: String::new(),
            component_index,
        }
    }

    #[must_use]
    pub fn with_sub_type(mut self, sub_type: Option<String>) -> Self {
        self.sub_type = sub_type;
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Collaborators a component reads while it is being built.
#[derive(Clone, Copy)]
pub struct ModelContext<'a> {
    pub registry: &'a ComponentRegistry,
    pub theme: &'a dyn ThemeSource,
}

impl<'a> ModelContext<'a> {
    #[must_use]
    pub fn new(registry: &'a ComponentRegistry, theme: &'a dyn ThemeSource) -> Self {
        Self { registry, theme }
    }
}

/// Inputs of a single component construction.
#[derive(Debug, Clone)]
pub struct ComponentInit {
    pub identity: ComponentIdentity,
    pub raw_option: OptionObject,
    pub dependent_models: DependentModels,
}

impl ComponentInit {
    #[must_use]
    pub fn new(identity: ComponentIdentity, raw_option: OptionObject) -> Self {
        Self {
            identity,
            raw_option,
            dependent_models: DependentModels::new(),
        }
    }

    #[must_use]
    pub fn with_dependent_models(mut self, dependent_models: DependentModels) -> Self {
        self.dependent_models = dependent_models;
        self
    }
}

/// One resolved component instance.
#[derive(Debug, Clone)]
pub struct ComponentModel {
    identity: ComponentIdentity,
    pub(super) option: OptionObject,
    pub(super) class: Arc<ComponentClass>,
    default_option: Arc<OptionObject>,
    dependent_models: DependentModels,
}

impl ComponentModel {
    /// Builds a component: merges theme and defaults under the raw option,
    /// then runs the class `option_updated` hook with `is_init == true`.
    #[must_use]
    pub fn new(context: ModelContext<'_>, class: Arc<ComponentClass>, init: ComponentInit) -> Self {
        let default_option = context.registry.default_option(&class);
        let mut model = Self {
            identity: init.identity,
            option: OptionObject::new(),
            class,
            default_option,
            dependent_models: init.dependent_models,
        };

        let mut option = init.raw_option.clone();
        model.merge_default_and_theme(&mut option, context.theme);
        model.option = option;
        trace!(
            main_type = %model.identity.main_type,
            sub_type = model.identity.sub_type.as_deref().unwrap_or("*"),
            index = model.identity.component_index,
            "constructed component"
        );

        let behavior = Arc::clone(model.class.behavior());
        behavior.option_updated(&mut model, &init.raw_option, true);
        model
    }

    #[must_use]
    pub fn identity(&self) -> &ComponentIdentity {
        &self.identity
    }

    #[must_use]
    pub fn main_type(&self) -> &str {
        &self.identity.main_type
    }

    #[must_use]
    pub fn sub_type(&self) -> Option<&str> {
        self.identity.sub_type.as_deref()
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.identity.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    #[must_use]
    pub fn component_index(&self) -> usize {
        self.identity.component_index
    }

    #[must_use]
    pub fn handle(&self) -> ComponentHandle {
        ComponentHandle::new(self.identity.main_type.clone(), self.identity.component_index)
    }

    #[must_use]
    pub fn option(&self) -> &OptionObject {
        &self.option
    }

    /// Mutable access for `option_updated` hooks deriving secondary fields.
    pub fn option_mut(&mut self) -> &mut OptionObject {
        &mut self.option
    }

    /// Reads a dotted path from the resolved option.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        get_path(&self.option, path)
    }

    #[must_use]
    pub fn class(&self) -> &Arc<ComponentClass> {
        &self.class
    }

    /// Inheritance-merged default option of this component's class.
    #[must_use]
    pub fn get_default_option(&self) -> &OptionObject {
        &self.default_option
    }

    #[must_use]
    pub fn dependent_models(&self) -> &DependentModels {
        &self.dependent_models
    }

    #[must_use]
    pub fn dependent_models_of(&self, main_type: &str) -> &[ComponentHandle] {
        self.dependent_models
            .get(main_type)
            .map_or(&[], Vec::as_slice)
    }

    pub fn set_dependent_models(&mut self, dependent_models: DependentModels) {
        self.dependent_models = dependent_models;
    }
}
