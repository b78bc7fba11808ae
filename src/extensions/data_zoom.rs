use std::sync::Arc;

use serde_json::{Value, json};

use crate::api::{ClassSpec, ComponentBehavior, ComponentClass, ComponentModel, ComponentRegistry};
use crate::core::OptionObject;

const PERCENT_MIN: f64 = 0.0;
const PERCENT_MAX: f64 = 100.0;

/// Clamps the `start`/`end` percentage window into `[0, 100]` and orders it.
///
/// Values already in range are written back untouched, so integer percents
/// stay integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataZoomRangeBehavior;

impl ComponentBehavior for DataZoomRangeBehavior {
    fn option_updated(&self, model: &mut ComponentModel, _new_option: &OptionObject, _is_init: bool) {
        let start = percent(model.get("start"), PERCENT_MIN);
        let end = percent(model.get("end"), PERCENT_MAX);
        let (start, end) = if start.0 <= end.0 { (start, end) } else { (end, start) };

        let option = model.option_mut();
        option.insert("start".to_owned(), start.1);
        option.insert("end".to_owned(), end.1);
    }
}

/// Resolved percent and the value to store for it.
fn percent(value: Option<&Value>, fallback: f64) -> (f64, Value) {
    let resolved = value
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
        .map_or(fallback, |value| value.clamp(PERCENT_MIN, PERCENT_MAX));
    let stored = match value {
        Some(original) if original.as_f64() == Some(resolved) => original.clone(),
        _ => json!(resolved),
    };
    (resolved, stored)
}

/// Registers `dataZoom.inside` and `dataZoom.slider`, both derived from a
/// shared base that depends on the cartesian axes. Zooms without a `type`
/// are sliders.
pub fn register_data_zoom(registry: &mut ComponentRegistry) {
    let base = ComponentClass::declare(
        ClassSpec::new("dataZoom")
            .with_dependencies(["xAxis", "yAxis", "series"])
            .with_behavior(Arc::new(DataZoomRangeBehavior))
            .with_default_option(json!({
                "z": 4,
                "filterMode": "filter",
                "throttle": null,
                "start": 0,
                "end": 100,
            })),
    );
    let inside = ComponentClass::extend(
        &base,
        ClassSpec::new("dataZoom.inside").with_default_option(json!({
            "disabled": false,
            "zoomLock": false,
            "zoomOnMouseWheel": true,
            "moveOnMouseMove": true,
            "moveOnMouseWheel": false,
            "preventDefaultMouseMove": true,
        })),
    );
    let slider = ComponentClass::extend(
        &base,
        ClassSpec::new("dataZoom.slider").with_default_option(json!({
            "show": true,
            "z": 6,
            "showDetail": true,
            "showDataShadow": "auto",
            "realtime": true,
            "zoomLock": false,
            "brushSelect": true,
            "handleSize": "100%",
            "fillerColor": "rgba(135,175,274,0.2)",
        })),
    );

    registry.register_class(inside);
    registry.register_class(slider);
    registry.register_sub_type_defaulter("dataZoom", |_| Some("slider".to_owned()));
}
