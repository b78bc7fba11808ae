use std::sync::Arc;

use serde_json::{Value, json};

use crate::api::{ClassSpec, ComponentBehavior, ComponentClass, ComponentModel, ComponentRegistry};
use crate::core::{LayoutMode, OptionObject};

/// Keeps `selected` an object and, in single selection mode, leaves at most
/// one entry selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegendSelectionBehavior;

impl ComponentBehavior for LegendSelectionBehavior {
    fn option_updated(&self, model: &mut ComponentModel, _new_option: &OptionObject, _is_init: bool) {
        let single = model
            .get("selectedMode")
            .and_then(Value::as_str)
            .is_some_and(|mode| mode == "single");
        let option = model.option_mut();
        let selected = option
            .entry("selected")
            .or_insert_with(|| Value::Object(OptionObject::new()));
        if !selected.is_object() {
            *selected = Value::Object(OptionObject::new());
        }
        if !single {
            return;
        }
        if let Value::Object(entries) = selected {
            let mut kept = false;
            for flag in entries.values_mut() {
                if flag.as_bool() == Some(true) {
                    if kept {
                        *flag = Value::Bool(false);
                    }
                    kept = true;
                }
            }
        }
    }
}

/// Registers `legend.plain` and `legend.scroll`, the latter derived from the
/// former. Legends without a `type` are plain.
pub fn register_legend(registry: &mut ComponentRegistry) {
    let plain = ComponentClass::declare(
        ClassSpec::new("legend.plain")
            .with_dependencies(["series"])
            .with_layout_mode(LayoutMode::ignore_size())
            .with_behavior(Arc::new(LegendSelectionBehavior))
            .with_default_option(json!({
                "z": 4,
                "show": true,
                "orient": "horizontal",
                "left": "center",
                "top": 0,
                "align": "auto",
                "backgroundColor": "rgba(0,0,0,0)",
                "borderColor": "#ccc",
                "borderRadius": 0,
                "borderWidth": 0,
                "padding": 5,
                "itemGap": 10,
                "itemWidth": 25,
                "itemHeight": 14,
                "inactiveColor": "#ccc",
                "selectedMode": true,
                "textStyle": {
                    "color": "#333",
                },
            })),
    );
    let scroll = ComponentClass::extend(
        &plain,
        ClassSpec::new("legend.scroll").with_default_option(json!({
            "scrollDataIndex": 0,
            "pageButtonItemGap": 5,
            "pageButtonGap": null,
            "pageButtonPosition": "end",
            "pageFormatter": "{current}/{total}",
            "pageIconColor": "#2f4554",
            "pageIconInactiveColor": "#aaa",
            "pageIconSize": 15,
            "animationDurationUpdate": 800,
        })),
    );

    registry.register_class(plain);
    registry.register_class(scroll);
    registry.register_sub_type_defaulter("legend", |_| Some("plain".to_owned()));
}
