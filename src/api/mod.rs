mod class_registry;
mod component_model;
mod default_option;
mod dependency_resolver;
mod global_model;
mod global_model_config;
mod option_merge;
mod referring_components;
mod shared_registry;
mod subtype_defaulter;
mod theme;

pub use class_registry::{
    ClassId, ClassSpec, ComponentBehavior, ComponentClass, ComponentRegistry, NoopBehavior,
    SubTypeDefaulter,
};
pub use component_model::{
    ComponentHandle, ComponentIdentity, ComponentInit, ComponentModel, DependentModels,
    ModelContext,
};
pub use dependency_resolver::{DATASET_MAIN_TYPE, DependencyGraph, topological_travel};
pub use global_model::{BuildReport, GlobalModel, SetOptionMode};
pub use global_model_config::{GlobalModelConfig, MissingClassPolicy};
pub use referring_components::{
    ComponentQuery, QueryCondition, ReferringComponents, ReferringOptions,
    query_referring_components,
};
pub use shared_registry::{reset_registry, with_registry, with_registry_mut};
pub use theme::{Theme, ThemeSource};
