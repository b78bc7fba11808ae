use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::core::{ComponentTypeId, LayoutMode, OptionObject};
use crate::error::{ComponentError, ComponentResult};

use super::ComponentModel;

static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a declared component class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u64);

impl ClassId {
    fn next() -> Self {
        Self(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Override point for component kinds.
///
/// `option_updated` runs after construction (`is_init == true`) and after
/// every `merge_option` patch, with the raw option that triggered it.
pub trait ComponentBehavior {
    fn option_updated(
        &self,
        _model: &mut ComponentModel,
        _new_option: &OptionObject,
        _is_init: bool,
    ) {
    }
}

/// Behavior used by classes that declare none.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBehavior;

impl ComponentBehavior for NoopBehavior {}

/// Declaration of a component class: its type plus static metadata.
pub struct ClassSpec {
    pub type_id: ComponentTypeId,
    pub default_option: OptionObject,
    pub dependencies: Option<Vec<String>>,
    pub layout_mode: Option<LayoutMode>,
    pub behavior: Option<Arc<dyn ComponentBehavior>>,
}

impl ClassSpec {
    #[must_use]
    pub fn new(type_identifier: &str) -> Self {
        Self {
            type_id: ComponentTypeId::parse(type_identifier),
            default_option: OptionObject::new(),
            dependencies: None,
            layout_mode: None,
            behavior: None,
        }
    }

    /// Sets the declared default option. Non-object values declare no fields.
    #[must_use]
    pub fn with_default_option(mut self, default_option: Value) -> Self {
        self.default_option = match default_option {
            Value::Object(map) => map,
            _ => OptionObject::new(),
        };
        self
    }

    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = Some(dependencies.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_layout_mode(mut self, layout_mode: LayoutMode) -> Self {
        self.layout_mode = Some(layout_mode);
        self
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: Arc<dyn ComponentBehavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }
}

/// A concrete component implementation: static metadata plus behavior.
///
/// Classes made by [`ComponentClass::declare`] carry their default option as
/// final. Classes made by [`ComponentClass::extend`] keep a link to their base
/// and get their default option merged along that chain on first use.
pub struct ComponentClass {
    id: ClassId,
    type_id: ComponentTypeId,
    default_option: Arc<OptionObject>,
    dependencies: Vec<String>,
    layout_mode: Option<LayoutMode>,
    super_class: Option<Arc<ComponentClass>>,
    behavior: Arc<dyn ComponentBehavior>,
}

impl ComponentClass {
    #[must_use]
    pub fn declare(spec: ClassSpec) -> Arc<Self> {
        Arc::new(Self {
            id: ClassId::next(),
            type_id: spec.type_id,
            default_option: Arc::new(spec.default_option),
            dependencies: spec.dependencies.unwrap_or_default(),
            layout_mode: spec.layout_mode,
            super_class: None,
            behavior: spec.behavior.unwrap_or_else(|| Arc::new(NoopBehavior)),
        })
    }

    /// Derives a class from `base`. Dependencies, layout mode and behavior are
    /// inherited unless `spec` sets them; the default option is `spec`'s own
    /// and is merged over the base chain lazily.
    #[must_use]
    pub fn extend(base: &Arc<Self>, spec: ClassSpec) -> Arc<Self> {
        Arc::new(Self {
            id: ClassId::next(),
            type_id: spec.type_id,
            default_option: Arc::new(spec.default_option),
            dependencies: spec
                .dependencies
                .unwrap_or_else(|| base.dependencies.clone()),
            layout_mode: spec.layout_mode.or(base.layout_mode),
            super_class: Some(Arc::clone(base)),
            behavior: spec.behavior.unwrap_or_else(|| Arc::clone(&base.behavior)),
        })
    }

    #[must_use]
    pub fn id(&self) -> ClassId {
        self.id
    }

    #[must_use]
    pub fn type_id(&self) -> &ComponentTypeId {
        &self.type_id
    }

    /// The default option declared by this class alone.
    #[must_use]
    pub fn own_default_option(&self) -> &Arc<OptionObject> {
        &self.default_option
    }

    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    #[must_use]
    pub fn layout_mode(&self) -> Option<LayoutMode> {
        self.layout_mode
    }

    #[must_use]
    pub fn super_class(&self) -> Option<&Arc<ComponentClass>> {
        self.super_class.as_ref()
    }

    #[must_use]
    pub fn is_extended(&self) -> bool {
        self.super_class.is_some()
    }

    #[must_use]
    pub fn behavior(&self) -> &Arc<dyn ComponentBehavior> {
        &self.behavior
    }
}

impl fmt::Debug for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClass")
            .field("id", &self.id)
            .field("type_id", &self.type_id)
            .field("dependencies", &self.dependencies)
            .field("layout_mode", &self.layout_mode)
            .field(
                "super_class",
                &self.super_class.as_ref().map(|base| base.type_id.to_string()),
            )
            .finish_non_exhaustive()
    }
}

/// Computes a default sub type from a raw option block.
pub type SubTypeDefaulter = Box<dyn Fn(&OptionObject) -> Option<String>>;

/// Maps `(main, sub)` type pairs to component classes.
///
/// Registration is expected to finish before any resolution starts; the
/// registry has no guard against interleaving the two and is not `Sync`.
#[derive(Default)]
pub struct ComponentRegistry {
    pub(super) classes: IndexMap<String, IndexMap<Option<String>, Arc<ComponentClass>>>,
    pub(super) sub_type_defaulters: HashMap<String, SubTypeDefaulter>,
    pub(super) default_option_cache: RefCell<HashMap<ClassId, Arc<OptionObject>>>,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every class, defaulter and cached default option.
    pub fn reset(&mut self) {
        debug!(main_types = self.classes.len(), "reset component registry");
        self.classes.clear();
        self.sub_type_defaulters.clear();
        self.default_option_cache.borrow_mut().clear();
    }

    /// Stores `class` under `identifier`. A later registration of the same
    /// `(main, sub)` pair replaces the earlier one in place and drops its
    /// memoized default option.
    pub fn register(&mut self, identifier: &str, class: Arc<ComponentClass>) {
        let type_id = ComponentTypeId::parse(identifier);
        debug!(
            main_type = %type_id.main,
            sub_type = type_id.sub().unwrap_or("*"),
            extended = class.is_extended(),
            "register component class"
        );
        let replaced = self
            .classes
            .entry(type_id.main)
            .or_default()
            .insert(type_id.sub, class);
        if let Some(replaced) = replaced {
            self.default_option_cache
                .get_mut()
                .remove(&replaced.id());
        }
    }

    /// Registers `class` under its own declared type.
    pub fn register_class(&mut self, class: Arc<ComponentClass>) {
        let identifier = class.type_id().to_string();
        self.register(&identifier, class);
    }

    /// Returns the class for `(main, sub)`, falling back to the wildcard class
    /// of `main` when the sub type has none.
    pub fn get_class(
        &self,
        main_type: &str,
        sub_type: Option<&str>,
    ) -> ComponentResult<Arc<ComponentClass>> {
        let not_found = || ComponentError::NotFound {
            main_type: main_type.to_owned(),
            sub_type: sub_type.map(str::to_owned),
        };
        let by_sub = self.classes.get(main_type).ok_or_else(not_found)?;
        let exact = sub_type.and_then(|sub| by_sub.get(&Some(sub.to_owned())));
        let class = exact.or_else(|| by_sub.get(&None)).ok_or_else(not_found)?;
        trace!(
            main_type,
            sub_type = sub_type.unwrap_or("*"),
            resolved = %class.type_id(),
            "resolved component class"
        );
        Ok(Arc::clone(class))
    }

    /// Every class under `main_type`, wildcard included, in registration order.
    #[must_use]
    pub fn get_classes_by_main_type(&self, main_type: &str) -> Vec<Arc<ComponentClass>> {
        self.classes
            .get(main_type)
            .map(|by_sub| by_sub.values().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_class(&self, main_type: &str, sub_type: Option<&str>) -> bool {
        self.classes.get(main_type).is_some_and(|by_sub| {
            by_sub.contains_key(&sub_type.map(str::to_owned))
        })
    }

    #[must_use]
    pub fn has_main_type(&self, main_type: &str) -> bool {
        self.classes.contains_key(main_type)
    }

    /// `true` when at least one non-wildcard sub type is registered.
    #[must_use]
    pub fn has_sub_types(&self, main_type: &str) -> bool {
        !self.sub_types(main_type).is_empty()
    }

    /// Registered non-wildcard sub types of `main_type`, in registration order.
    #[must_use]
    pub fn sub_types(&self, main_type: &str) -> Vec<String> {
        self.classes
            .get(main_type)
            .map(|by_sub| by_sub.keys().flatten().cloned().collect())
            .unwrap_or_default()
    }

    /// Registered main types, in registration order.
    #[must_use]
    pub fn main_types(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("classes", &self.classes)
            .field(
                "sub_type_defaulters",
                &self.sub_type_defaulters.keys().collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
