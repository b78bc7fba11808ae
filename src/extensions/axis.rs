use std::sync::Arc;

use serde_json::{Value, json};

use crate::api::{ClassSpec, ComponentClass, ComponentRegistry};
use crate::core::OptionObject;

pub const AXIS_MAIN_TYPES: [&str; 2] = ["xAxis", "yAxis"];
pub const AXIS_SUB_TYPES: [&str; 4] = ["category", "value", "time", "log"];

fn axis_base(main_type: &str) -> Arc<ComponentClass> {
    let position = if main_type == "xAxis" { "bottom" } else { "left" };
    ComponentClass::declare(
        ClassSpec::new(main_type)
            .with_dependencies(["grid"])
            .with_default_option(json!({
                "show": true,
                "z": 0,
                "gridIndex": 0,
                "position": position,
                "inverse": false,
                "name": "",
                "nameLocation": "end",
                "nameGap": 15,
                "silent": false,
                "axisLine": {
                    "show": true,
                    "onZero": true,
                    "lineStyle": { "color": "#6E7079", "width": 1 },
                },
                "axisTick": { "show": true, "inside": false, "length": 5 },
                "axisLabel": { "show": true, "inside": false, "rotate": 0, "margin": 8 },
                "splitLine": { "show": true },
            })),
    )
}

fn sub_type_default_option(sub_type: &str) -> Value {
    match sub_type {
        "category" => json!({
            "boundaryGap": true,
            "splitLine": { "show": false },
            "axisTick": { "alignWithLabel": false, "interval": "auto" },
        }),
        "value" => json!({
            "boundaryGap": [0, 0],
            "splitNumber": 5,
        }),
        "time" => json!({
            "splitNumber": 6,
            "axisLabel": { "hideOverlap": true },
        }),
        "log" => json!({
            "scale": true,
            "logBase": 10,
        }),
        _ => json!({}),
    }
}

/// Axes carrying `data` are category axes, all others value axes.
fn default_axis_sub_type(raw_option: &OptionObject) -> Option<String> {
    let sub_type = if raw_option.contains_key("data") {
        "category"
    } else {
        "value"
    };
    Some(sub_type.to_owned())
}

/// Registers `xAxis` and `yAxis` with one class per axis sub type, each
/// derived from the shared per-direction base.
pub fn register_axes(registry: &mut ComponentRegistry) {
    for main_type in AXIS_MAIN_TYPES {
        let base = axis_base(main_type);
        for sub_type in AXIS_SUB_TYPES {
            let identifier = format!("{main_type}.{sub_type}");
            let class = ComponentClass::extend(
                &base,
                ClassSpec::new(&identifier).with_default_option(sub_type_default_option(sub_type)),
            );
            registry.register(&identifier, class);
        }
        registry.register_sub_type_defaulter(main_type, default_axis_sub_type);
    }
}
