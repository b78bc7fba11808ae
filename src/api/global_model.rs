use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::core::{ComponentTypeId, OptionObject};
use crate::error::{ComponentError, ComponentResult};

use super::referring_components::scalar_to_string;
use super::subtype_defaulter::explicit_sub_type;
use super::{
    ComponentClass, ComponentHandle, ComponentIdentity, ComponentInit, ComponentModel,
    ComponentQuery, ComponentRegistry, DependentModels, GlobalModelConfig, MissingClassPolicy,
    ModelContext, QueryCondition, Theme,
};

/// How `set_option` treats components built by earlier calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOptionMode {
    /// Patch existing components and append new ones.
    #[default]
    Merge,
    /// Drop every component first and build from scratch.
    Replace,
}

/// Summary of one `set_option` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Main types in the order they were built.
    pub order: Vec<String>,
    pub created: usize,
    pub merged: usize,
    /// Components dropped because no class was registered for them.
    pub skipped: Vec<ComponentTypeId>,
}

/// Owner of every built component of one document, grouped by main type in
/// index order.
#[derive(Debug, Clone, Default)]
pub struct GlobalModel {
    config: GlobalModelConfig,
    components: IndexMap<String, Vec<ComponentModel>>,
}

impl GlobalModel {
    #[must_use]
    pub fn new(config: GlobalModelConfig) -> Self {
        Self {
            config,
            components: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GlobalModelConfig {
        &self.config
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    /// Builds or patches components from a raw document.
    ///
    /// Keys of `raw_root` that are registered main types are built in
    /// dependency order; other keys are ignored. Each value is an option
    /// block or an array of them, where `null` entries leave the component at
    /// that position untouched. A block patches the existing component with
    /// the same `id`, else the one at its position, as long as the sub type
    /// is unchanged; otherwise a component is created.
    ///
    /// On error the model keeps the components it had before the call.
    pub fn set_option(
        &mut self,
        registry: &ComponentRegistry,
        raw_root: &OptionObject,
        mode: SetOptionMode,
    ) -> ComponentResult<BuildReport> {
        // Built into a staged copy; `self.components` changes only on success.
        let mut staged = match mode {
            SetOptionMode::Merge => self.components.clone(),
            SetOptionMode::Replace => {
                debug!(
                    main_types = self.components.len(),
                    "replace mode drops existing components"
                );
                IndexMap::new()
            }
        };

        let main_types: Vec<&str> = raw_root
            .keys()
            .map(String::as_str)
            .filter(|main_type| {
                let registered = registry.has_main_type(main_type);
                if !registered {
                    trace!(main_type, "ignoring unregistered option key");
                }
                registered
            })
            .collect();

        let mut builder = DocumentBuilder {
            context: ModelContext::new(registry, &self.config.theme),
            policy: self.config.missing_class_policy,
            components: &mut staged,
            report: BuildReport::default(),
        };
        registry.topological_travel(&main_types, |main_type, dependencies| {
            let raw_value = raw_root.get(main_type).unwrap_or(&Value::Null);
            builder.build_main_type(main_type, dependencies, raw_value)
        })?;

        let report = builder.report;
        self.components = staged;
        debug!(
            order = ?report.order,
            created = report.created,
            merged = report.merged,
            skipped = report.skipped.len(),
            "set option finished"
        );
        Ok(report)
    }

    /// Drops the components of `main_type`; returns how many were removed.
    pub fn remove_components(&mut self, main_type: &str) -> usize {
        self.components
            .shift_remove(main_type)
            .map_or(0, |removed| removed.len())
    }

    #[must_use]
    pub fn component(&self, main_type: &str, index: usize) -> Option<&ComponentModel> {
        self.components.get(main_type)?.get(index)
    }

    pub fn component_mut(&mut self, main_type: &str, index: usize) -> Option<&mut ComponentModel> {
        self.components.get_mut(main_type)?.get_mut(index)
    }

    #[must_use]
    pub fn component_by_handle(&self, handle: &ComponentHandle) -> Option<&ComponentModel> {
        self.component(&handle.main_type, handle.component_index)
    }

    #[must_use]
    pub fn components_of(&self, main_type: &str) -> &[ComponentModel] {
        self.components.get(main_type).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.values().map(Vec::len).sum()
    }

    /// Main types holding components, in build order.
    #[must_use]
    pub fn main_types(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }
}

impl ComponentQuery for GlobalModel {
    fn query_components(&self, condition: &QueryCondition) -> Vec<&ComponentModel> {
        let components = self.components_of(&condition.main_type);
        let mut result: Vec<&ComponentModel> = if let Some(indices) = &condition.index {
            indices
                .iter()
                .filter_map(|index| components.get(*index))
                .collect()
        } else if let Some(ids) = &condition.id {
            components
                .iter()
                .filter(|model| ids.iter().any(|id| id == model.id()))
                .collect()
        } else if let Some(names) = &condition.name {
            components
                .iter()
                .filter(|model| names.iter().any(|name| name == model.name()))
                .collect()
        } else {
            components.iter().collect()
        };

        if let Some(sub_type) = &condition.sub_type {
            result.retain(|model| model.sub_type() == Some(sub_type.as_str()));
        }
        result
    }
}

struct DocumentBuilder<'a> {
    context: ModelContext<'a>,
    policy: MissingClassPolicy,
    components: &'a mut IndexMap<String, Vec<ComponentModel>>,
    report: BuildReport,
}

impl DocumentBuilder<'_> {
    fn build_main_type(
        &mut self,
        main_type: &str,
        dependencies: &[String],
        raw_value: &Value,
    ) -> ComponentResult<()> {
        self.report.order.push(main_type.to_owned());
        let blocks = option_blocks(main_type, raw_value)?;
        let dependent_models = self.dependent_models(dependencies);

        let existing_len = self.components.get(main_type).map_or(0, Vec::len);
        let mut touched = vec![false; existing_len];
        for (position, raw) in blocks.into_iter().enumerate() {
            let Some(raw) = raw else {
                continue;
            };
            let raw_id = raw.get("id").and_then(scalar_to_string);
            let existing = self.components.get(main_type).map_or(&[][..], Vec::as_slice);
            let target = match &raw_id {
                Some(id) => existing.iter().position(|model| model.id() == id),
                None => (position < existing.len()
                    && !touched.get(position).copied().unwrap_or(true))
                .then_some(position),
            };

            // A patch without an explicit type keeps the sub type it patches.
            let sub_type = match target {
                Some(index) if explicit_sub_type(raw).is_none() => {
                    existing[index].sub_type().map(str::to_owned)
                }
                _ => self.context.registry.determine_sub_type(main_type, raw)?,
            };
            let class = match self
                .context
                .registry
                .get_class(main_type, sub_type.as_deref())
            {
                Ok(class) => class,
                Err(err @ ComponentError::NotFound { .. }) => {
                    if self.policy == MissingClassPolicy::Fail {
                        return Err(err);
                    }
                    warn!(error = %err, position, "skipping component without registered class");
                    self.report
                        .skipped
                        .push(ComponentTypeId::new(main_type, sub_type));
                    continue;
                }
                Err(err) => return Err(err),
            };

            let models = self.components.entry(main_type.to_owned()).or_default();
            match target {
                Some(index) if same_kind(&models[index], &class, sub_type.as_deref()) => {
                    let model = &mut models[index];
                    model.merge_option(raw);
                    model.set_dependent_models(dependent_models.clone());
                    mark_touched(&mut touched, index);
                    self.report.merged += 1;
                }
                Some(index) => {
                    let previous = models[index].identity().clone();
                    let identity = ComponentIdentity {
                        main_type: main_type.to_owned(),
                        sub_type,
                        id: raw_id.unwrap_or(previous.id),
                        name: raw_name(raw).unwrap_or(previous.name),
                        component_index: index,
                    };
                    let init = ComponentInit::new(identity, raw.clone())
                        .with_dependent_models(dependent_models.clone());
                    models[index] = ComponentModel::new(self.context, class, init);
                    mark_touched(&mut touched, index);
                    self.report.created += 1;
                }
                None => {
                    let index = models.len();
                    let mut identity =
                        ComponentIdentity::new(main_type, index).with_sub_type(sub_type);
                    if let Some(id) = raw_id {
                        identity = identity.with_id(id);
                    }
                    if let Some(name) = raw_name(raw) {
                        identity = identity.with_name(name);
                    }
                    let init = ComponentInit::new(identity, raw.clone())
                        .with_dependent_models(dependent_models.clone());
                    models.push(ComponentModel::new(self.context, class, init));
                    mark_touched(&mut touched, index);
                    self.report.created += 1;
                }
            }
        }
        Ok(())
    }

    fn dependent_models(&self, dependencies: &[String]) -> DependentModels {
        dependencies
            .iter()
            .map(|dependency| {
                let handles = self
                    .components
                    .get(dependency)
                    .map(|models| models.iter().map(ComponentModel::handle).collect())
                    .unwrap_or_default();
                (dependency.clone(), handles)
            })
            .collect()
    }
}

/// Splits a raw main-type value into option blocks; `None` marks a `null`
/// placeholder inside an array.
fn option_blocks<'v>(
    main_type: &str,
    raw_value: &'v Value,
) -> ComponentResult<Vec<Option<&'v OptionObject>>> {
    match raw_value {
        Value::Null => Ok(Vec::new()),
        Value::Object(block) => Ok(vec![Some(block)]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(position, item)| match item {
                Value::Null => Ok(None),
                Value::Object(block) => Ok(Some(block)),
                other => Err(ComponentError::InvalidData(format!(
                    "`{main_type}[{position}]` must be an object, got `{other}`"
                ))),
            })
            .collect(),
        other => Err(ComponentError::InvalidData(format!(
            "`{main_type}` must be an object or an array of objects, got `{other}`"
        ))),
    }
}

fn same_kind(model: &ComponentModel, class: &Arc<ComponentClass>, sub_type: Option<&str>) -> bool {
    model.sub_type() == sub_type && model.class().id() == class.id()
}

fn raw_name(raw: &OptionObject) -> Option<String> {
    raw.get("name").and_then(scalar_to_string)
}

fn mark_touched(touched: &mut Vec<bool>, index: usize) {
    if index >= touched.len() {
        touched.resize(index + 1, false);
    }
    touched[index] = true;
}
