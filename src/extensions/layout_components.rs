use serde_json::json;

use crate::api::{ClassSpec, ComponentClass, ComponentRegistry};
use crate::core::LayoutMode;

pub fn register_dataset(registry: &mut ComponentRegistry) {
    registry.register_class(ComponentClass::declare(
        ClassSpec::new("dataset").with_default_option(json!({
            "seriesLayoutBy": "column",
            "sourceHeader": null,
        })),
    ));
}

/// Plot container; positioned as a full box.
pub fn register_grid(registry: &mut ComponentRegistry) {
    registry.register_class(ComponentClass::declare(
        ClassSpec::new("grid")
            .with_layout_mode(LayoutMode::box_layout())
            .with_default_option(json!({
                "show": false,
                "z": 0,
                "left": "10%",
                "top": 60,
                "right": "10%",
                "bottom": 70,
                "containLabel": false,
                "backgroundColor": "rgba(0,0,0,0)",
                "borderWidth": 1,
                "borderColor": "#ccc",
            })),
    ));
}

/// Chart title; sized by its text, so only edges are reconciled.
pub fn register_title(registry: &mut ComponentRegistry) {
    registry.register_class(ComponentClass::declare(
        ClassSpec::new("title")
            .with_layout_mode(LayoutMode::ignore_size())
            .with_default_option(json!({
                "z": 6,
                "show": true,
                "text": "",
                "target": "blank",
                "subtext": "",
                "left": 0,
                "top": 0,
                "backgroundColor": "rgba(0,0,0,0)",
                "borderColor": "#ccc",
                "borderWidth": 0,
                "padding": 5,
                "itemGap": 10,
                "textStyle": {
                    "fontSize": 18,
                    "fontWeight": "bold",
                    "color": "#464646",
                },
                "subtextStyle": {
                    "fontSize": 12,
                    "color": "#6E7079",
                },
            })),
    ));
}
