use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::ComponentTypeId;
use crate::error::{ComponentError, ComponentResult};

use super::ComponentRegistry;

/// Main type that every other main type implicitly depends on.
pub const DATASET_MAIN_TYPE: &str = "dataset";

/// Dependency lists keyed by main type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I, S>(&mut self, main_type: impl Into<String>, dependencies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.edges.insert(
            main_type.into(),
            dependencies.into_iter().map(Into::into).collect(),
        );
    }

    #[must_use]
    pub fn with_edges<I, S>(mut self, main_type: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(main_type, dependencies);
        self
    }

    /// Dependencies of `main_type`; empty when unknown.
    #[must_use]
    pub fn dependencies(&self, main_type: &str) -> &[String] {
        self.edges.get(main_type).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl ComponentRegistry {
    /// Union of the declared dependencies of every class under `main_type`,
    /// reduced to main types and deduplicated in first-seen order.
    ///
    /// `dataset` is put first for every registered main type but itself.
    /// Unregistered main types have no dependencies.
    #[must_use]
    pub fn get_dependencies(&self, main_type: &str) -> Vec<String> {
        let classes = self.get_classes_by_main_type(main_type);
        if classes.is_empty() {
            return Vec::new();
        }

        let mut dependencies: Vec<String> = Vec::new();
        for class in &classes {
            for declared in class.dependencies() {
                let main = ComponentTypeId::parse(declared).main;
                if !main.is_empty() && !dependencies.contains(&main) {
                    dependencies.push(main);
                }
            }
        }

        if main_type != DATASET_MAIN_TYPE
            && !dependencies.iter().any(|main| main == DATASET_MAIN_TYPE)
        {
            dependencies.insert(0, DATASET_MAIN_TYPE.to_owned());
        }
        dependencies
    }

    /// Dependency graph over every registered main type.
    #[must_use]
    pub fn dependency_graph(&self) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for main_type in self.classes.keys() {
            graph.insert(main_type.clone(), self.get_dependencies(main_type));
        }
        graph
    }

    /// Visits `main_types` in dependency order using the registry's graph.
    pub fn topological_travel<S, F>(&self, main_types: &[S], visit: F) -> ComponentResult<()>
    where
        S: AsRef<str>,
        F: FnMut(&str, &[String]) -> ComponentResult<()>,
    {
        topological_travel(main_types, &self.dependency_graph(), visit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Visits every entry of `main_types` once, each after all of its
/// dependencies that are also in `main_types`.
///
/// Dependencies outside `main_types` are skipped. Unrelated types keep
/// their input order. A dependency cycle fails with
/// [`ComponentError::CyclicDependency`] naming the type found twice on the
/// current path. `visit` receives the type and its full dependency list; its
/// first error stops the travel.
pub fn topological_travel<S, F>(
    main_types: &[S],
    graph: &DependencyGraph,
    mut visit: F,
) -> ComponentResult<()>
where
    S: AsRef<str>,
    F: FnMut(&str, &[String]) -> ComponentResult<()>,
{
    let in_set: HashSet<&str> = main_types.iter().map(AsRef::as_ref).collect();
    let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(in_set.len());
    debug!(count = in_set.len(), "topological travel");

    for main_type in main_types {
        visit_node(main_type.as_ref(), graph, &in_set, &mut marks, &mut visit)?;
    }
    Ok(())
}

fn visit_node<'a, F>(
    main_type: &'a str,
    graph: &'a DependencyGraph,
    in_set: &HashSet<&'a str>,
    marks: &mut HashMap<&'a str, Mark>,
    visit: &mut F,
) -> ComponentResult<()>
where
    F: FnMut(&str, &[String]) -> ComponentResult<()>,
{
    match marks.get(main_type) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            return Err(ComponentError::CyclicDependency {
                main_type: main_type.to_owned(),
            });
        }
        None => {}
    }

    marks.insert(main_type, Mark::Visiting);
    let dependencies = graph.dependencies(main_type);
    for dependency in dependencies {
        if in_set.contains(dependency.as_str()) {
            visit_node(dependency.as_str(), graph, in_set, marks, visit)?;
        }
    }
    marks.insert(main_type, Mark::Done);

    trace!(main_type, "visit main type");
    visit(main_type, dependencies)
}
