use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::option::OptionObject;

/// Position and size fields taking part in box layout.
pub const LOCATION_PARAMS: [&str; 6] = ["left", "right", "top", "bottom", "width", "height"];

/// Per-axis field groups: size first, then the two edges in priority order.
const HV_NAMES: [[&str; 3]; 2] = [["width", "left", "right"], ["height", "top", "bottom"]];

/// Enough set fields on one axis to fully place a box.
const ENOUGH_PARAM_COUNT: usize = 2;

/// Declares that a component option takes part in box-style position merging.
///
/// `ignore_size` is indexed horizontal then vertical. An ignore-size axis
/// keeps at most one edge and never reconciles against the size field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutMode {
    #[serde(default)]
    pub ignore_size: [bool; 2],
}

impl LayoutMode {
    #[must_use]
    pub fn box_layout() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ignore_size() -> Self {
        Self {
            ignore_size: [true, true],
        }
    }

    #[must_use]
    pub fn with_ignore_size(horizontal: bool, vertical: bool) -> Self {
        Self {
            ignore_size: [horizontal, vertical],
        }
    }
}

/// Extracts the position/size fields present in `option`.
#[must_use]
pub fn get_layout_params(option: &OptionObject) -> OptionObject {
    let mut params = OptionObject::new();
    for name in LOCATION_PARAMS {
        if let Some(value) = option.get(name) {
            params.insert(name.to_owned(), value.clone());
        }
    }
    params
}

/// Re-applies box fields from `source` onto `target`, resolving over- and
/// under-constrained axes.
///
/// For each axis, when the merged fields already place the box (exactly two
/// set) or `source` sets nothing, the plain merge stands. When `source` sets
/// two or more, only its fields are kept. Otherwise `source` is completed with
/// the first field of the axis group that `target` had and `source` lacked.
/// `null` and `"auto"` never count as set.
pub fn merge_layout_param(target: &mut OptionObject, source: &OptionObject, mode: LayoutMode) {
    for (axis, names) in HV_NAMES.iter().enumerate() {
        let resolved = merge_axis(target, source, names, mode.ignore_size[axis]);
        for (name, value) in names.iter().zip(resolved) {
            match value {
                Some(value) => {
                    target.insert((*name).to_owned(), value);
                }
                None => {
                    target.remove(*name);
                }
            }
        }
    }
}

fn merge_axis(
    target: &OptionObject,
    source: &OptionObject,
    names: &[&str; 3],
    ignore_size: bool,
) -> [Option<Value>; 3] {
    let mut merged: [Option<Value>; 3] = names.map(|name| target.get(name).cloned());
    let mut incoming: [Option<Value>; 3] = [None, None, None];
    let mut incoming_count = 0;
    let mut merged_count = 0;

    for (index, name) in names.iter().enumerate() {
        if let Some(value) = source.get(*name) {
            incoming[index] = Some(value.clone());
            merged[index] = Some(value.clone());
        }
        if is_set(incoming[index].as_ref()) {
            incoming_count += 1;
        }
        if is_set(merged[index].as_ref()) {
            merged_count += 1;
        }
    }

    if ignore_size {
        if is_set(source.get(names[1])) {
            merged[2] = Some(Value::Null);
        } else if is_set(source.get(names[2])) {
            merged[1] = Some(Value::Null);
        }
        return merged;
    }

    if merged_count == ENOUGH_PARAM_COUNT || incoming_count == 0 {
        return merged;
    }
    if incoming_count >= ENOUGH_PARAM_COUNT {
        return incoming;
    }

    for (index, name) in names.iter().enumerate() {
        if incoming[index].is_none() {
            if let Some(value) = target.get(*name) {
                incoming[index] = Some(value.clone());
                break;
            }
        }
    }
    incoming
}

fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => text != "auto",
        Some(_) => true,
    }
}
