use serde_json::{Map, Value};

/// JSON-like option object carried by every component.
pub type OptionObject = Map<String, Value>;

/// Recursively merges `source` into `target`.
///
/// Nested objects present on both sides are merged field by field. Any other
/// pair (arrays, scalars, an object meeting a non-object) is resolved as a
/// whole value: `source` replaces `target` when `overwrite` is set, and only
/// fills keys `target` does not have otherwise. A key holding `null` counts as
/// present.
pub fn deep_merge(target: &mut OptionObject, source: &OptionObject, overwrite: bool) {
    for (key, source_value) in source {
        match target.get_mut(key) {
            Some(Value::Object(target_child)) if source_value.is_object() => {
                if let Value::Object(source_child) = source_value {
                    deep_merge(target_child, source_child, overwrite);
                }
            }
            Some(slot) => {
                if overwrite {
                    *slot = source_value.clone();
                }
            }
            None => {
                target.insert(key.clone(), source_value.clone());
            }
        }
    }
}

/// Same as [`deep_merge`] for an arbitrary `source` value; non-object sources
/// carry no fields and leave `target` untouched.
pub fn deep_merge_value(target: &mut OptionObject, source: &Value, overwrite: bool) {
    if let Value::Object(source) = source {
        deep_merge(target, source, overwrite);
    }
}

/// Looks up a dotted path (`"axisLabel.show"`) inside an option object.
#[must_use]
pub fn get_path<'a>(option: &'a OptionObject, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = option.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Returns `true` when the value is neither missing nor `null`.
#[must_use]
pub fn has_value(option: &OptionObject, key: &str) -> bool {
    option.get(key).is_some_and(|value| !value.is_null())
}
