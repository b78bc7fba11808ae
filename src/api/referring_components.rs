use serde_json::Value;

use crate::core::OptionObject;

use super::ComponentModel;

/// Filter for [`ComponentQuery::query_components`].
///
/// `index` takes precedence over `id`, which takes precedence over `name`;
/// with none of them every component of `main_type` matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCondition {
    pub main_type: String,
    pub sub_type: Option<String>,
    pub index: Option<Vec<usize>>,
    pub id: Option<Vec<String>>,
    pub name: Option<Vec<String>>,
}

impl QueryCondition {
    #[must_use]
    pub fn main_type(main_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }

    #[must_use]
    pub fn with_index(mut self, index: impl IntoIterator<Item = usize>) -> Self {
        self.index = Some(index.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_id<I, S>(mut self, id: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.id = Some(id.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_name<I, S>(mut self, name: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.name = Some(name.into_iter().map(Into::into).collect());
        self
    }
}

/// Component lookup offered by the model that owns the components.
pub trait ComponentQuery {
    fn query_components(&self, condition: &QueryCondition) -> Vec<&ComponentModel>;
}

/// Options of [`ComponentModel::query_referring_components`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferringOptions {
    /// Without an explicit reference, fall back to the first component.
    pub use_default: bool,
}

/// Result of resolving `<mainType>Index` / `<mainType>Id` / `<mainType>Name`.
#[derive(Debug, Clone, Default)]
pub struct ReferringComponents<'a> {
    pub models: Vec<&'a ComponentModel>,
    /// Whether the option carried any explicit reference.
    pub specified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum IndexReference {
    Unspecified,
    Indices(Vec<usize>),
    All,
    Disabled,
}

impl ComponentModel {
    /// Components of `target_main_type` this one refers to. Empty when the
    /// option carries no reference or nothing matches.
    #[must_use]
    pub fn get_referring_components<'a>(
        &self,
        target_main_type: &str,
        query: &'a dyn ComponentQuery,
    ) -> Vec<&'a ComponentModel> {
        self.query_referring_components(target_main_type, query, ReferringOptions::default())
            .models
    }

    #[must_use]
    pub fn query_referring_components<'a>(
        &self,
        target_main_type: &str,
        query: &'a dyn ComponentQuery,
        options: ReferringOptions,
    ) -> ReferringComponents<'a> {
        query_referring_components(query, target_main_type, self.option(), options)
    }
}

/// Resolves the references `option` makes to components of `main_type`.
///
/// An index of `"none"` or `false` selects nothing; `"all"` selects every
/// component regardless of id and name.
#[must_use]
pub fn query_referring_components<'a>(
    query: &'a dyn ComponentQuery,
    main_type: &str,
    option: &OptionObject,
    options: ReferringOptions,
) -> ReferringComponents<'a> {
    let index = index_reference(option.get(&format!("{main_type}Index")));
    let id = string_list(option.get(&format!("{main_type}Id")));
    let name = string_list(option.get(&format!("{main_type}Name")));

    let specified = index != IndexReference::Unspecified || id.is_some() || name.is_some();
    if !specified {
        let models = if options.use_default {
            query
                .query_components(&QueryCondition::main_type(main_type))
                .into_iter()
                .take(1)
                .collect()
        } else {
            Vec::new()
        };
        return ReferringComponents { models, specified };
    }

    let condition = match index {
        IndexReference::Disabled => {
            return ReferringComponents {
                models: Vec::new(),
                specified,
            };
        }
        IndexReference::All => QueryCondition::main_type(main_type),
        IndexReference::Indices(indices) => QueryCondition {
            index: Some(indices),
            id,
            name,
            ..QueryCondition::main_type(main_type)
        },
        IndexReference::Unspecified => QueryCondition {
            id,
            name,
            ..QueryCondition::main_type(main_type)
        },
    };
    ReferringComponents {
        models: query.query_components(&condition),
        specified,
    }
}

fn index_reference(value: Option<&Value>) -> IndexReference {
    match value {
        None | Some(Value::Null) => IndexReference::Unspecified,
        Some(Value::Bool(false)) => IndexReference::Disabled,
        Some(Value::String(text)) if text == "none" => IndexReference::Disabled,
        Some(Value::String(text)) if text == "all" => IndexReference::All,
        Some(Value::Array(items)) => {
            IndexReference::Indices(items.iter().filter_map(Value::as_u64).map(to_index).collect())
        }
        Some(other) => IndexReference::Indices(other.as_u64().map(to_index).into_iter().collect()),
    }
}

fn to_index(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::Null => None,
        Value::Array(items) => Some(items.iter().filter_map(scalar_to_string).collect()),
        scalar => Some(scalar_to_string(scalar).into_iter().collect()),
    }
}

/// Ids and names may be written as strings or numbers.
pub(super) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
