use chart_components::ComponentError;
use chart_components::api::{
    ClassSpec, ComponentClass, ComponentHandle, ComponentQuery, ComponentRegistry, GlobalModel,
    GlobalModelConfig, MissingClassPolicy, QueryCondition, ReferringOptions, SetOptionMode,
    Theme,
};
use chart_components::core::{ComponentTypeId, OptionObject};
use chart_components::extensions::register_builtin_components;
use serde_json::{Value, json};

fn object(value: Value) -> OptionObject {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object literal"),
    }
}

fn builtin_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    register_builtin_components(&mut registry);
    registry
}

fn sample_document() -> OptionObject {
    object(json!({
        "xAxis": {"data": ["Mon", "Tue"]},
        "yAxis": {},
        "grid": {"left": 30},
        "dataZoom": [{"type": "inside"}, {"start": 80, "end": 20}],
        "dataset": {"source": [[1, 2]]},
        "title": {"text": "Sales", "id": "main-title"},
        "color": ["#5470c6"],
    }))
}

fn built_model(registry: &ComponentRegistry) -> GlobalModel {
    let mut model = GlobalModel::new(GlobalModelConfig::new());
    model
        .set_option(registry, &sample_document(), SetOptionMode::Merge)
        .expect("sample document builds");
    model
}

#[test]
fn document_builds_in_dependency_order() {
    let registry = builtin_registry();
    let mut model = GlobalModel::new(GlobalModelConfig::new());
    let report = model
        .set_option(&registry, &sample_document(), SetOptionMode::Merge)
        .expect("sample document builds");

    assert_eq!(
        report.order,
        vec!["dataset", "grid", "xAxis", "yAxis", "dataZoom", "title"]
    );
    assert_eq!(report.created, 7);
    assert_eq!(report.merged, 0);
    assert!(report.skipped.is_empty());
    assert_eq!(model.component_count(), 7);
    assert_eq!(
        model.main_types(),
        vec!["dataset", "grid", "xAxis", "yAxis", "dataZoom", "title"]
    );
}

#[test]
fn sub_types_are_resolved_through_defaulters_and_explicit_types() {
    let registry = builtin_registry();
    let model = built_model(&registry);

    let x_axis = model.component("xAxis", 0).expect("x axis");
    assert_eq!(x_axis.sub_type(), Some("category"));
    assert_eq!(x_axis.get("boundaryGap"), Some(&json!(true)));
    assert_eq!(x_axis.get("position"), Some(&json!("bottom")));

    let y_axis = model.component("yAxis", 0).expect("y axis");
    assert_eq!(y_axis.sub_type(), Some("value"));
    assert_eq!(y_axis.get("splitNumber"), Some(&json!(5)));

    let zooms = model.components_of("dataZoom");
    assert_eq!(zooms[0].sub_type(), Some("inside"));
    assert_eq!(zooms[1].sub_type(), Some("slider"));
    assert_eq!(zooms[1].get("start").and_then(Value::as_f64), Some(20.0));
    assert_eq!(zooms[1].get("end").and_then(Value::as_f64), Some(80.0));
}

#[test]
fn identity_uses_option_id_or_generated_one() {
    let registry = builtin_registry();
    let model = built_model(&registry);

    let title = model.component("title", 0).expect("title");
    assert_eq!(title.id(), "main-title");
    let grid = model.component("grid", 0).expect("grid");
    assert!(!grid.id().is_empty());
    assert_ne!(grid.id(), model.component("dataset", 0).expect("dataset").id());
    assert_eq!(model.components_of("dataZoom")[1].component_index(), 1);
}

#[test]
fn dependent_models_point_at_built_components() {
    let registry = builtin_registry();
    let model = built_model(&registry);

    let x_axis = model.component("xAxis", 0).expect("x axis");
    assert_eq!(
        x_axis.dependent_models_of("grid"),
        [ComponentHandle::new("grid", 0)]
    );
    assert_eq!(
        x_axis.dependent_models_of("dataset"),
        [ComponentHandle::new("dataset", 0)]
    );
    let grid = model
        .component_by_handle(&x_axis.dependent_models_of("grid")[0])
        .expect("handle resolves");
    assert_eq!(grid.get("left"), Some(&json!(30)));

    let zoom = &model.components_of("dataZoom")[0];
    assert_eq!(zoom.dependent_models_of("xAxis").len(), 1);
    assert_eq!(zoom.dependent_models_of("yAxis").len(), 1);
    assert!(zoom.dependent_models_of("series").is_empty());
}

#[test]
fn referring_components_follow_index_fields() {
    let registry = builtin_registry();
    let model = built_model(&registry);

    let x_axis = model.component("xAxis", 0).expect("x axis");
    let grids = x_axis.get_referring_components("grid", &model);
    assert_eq!(grids.len(), 1);
    assert_eq!(grids[0].main_type(), "grid");

    let zoom = &model.components_of("dataZoom")[0];
    assert!(zoom.get_referring_components("xAxis", &model).is_empty());

    let defaulted = zoom.query_referring_components(
        "xAxis",
        &model,
        ReferringOptions { use_default: true },
    );
    assert!(!defaulted.specified);
    assert_eq!(defaulted.models.len(), 1);
}

#[test]
fn referring_components_support_ids_all_and_none() {
    let registry = builtin_registry();
    let mut model = GlobalModel::new(GlobalModelConfig::new());
    model
        .set_option(
            &registry,
            &object(json!({
                "xAxis": [{"id": "days", "data": ["a"]}, {"id": "hours"}],
                "dataZoom": [
                    {"xAxisId": "hours"},
                    {"xAxisIndex": "all"},
                    {"xAxisIndex": "none"},
                    {"xAxisIndex": [1, 7]},
                ],
            })),
            SetOptionMode::Merge,
        )
        .expect("document builds");

    let zooms = model.components_of("dataZoom");
    let by_id = zooms[0].get_referring_components("xAxis", &model);
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0].id(), "hours");

    assert_eq!(zooms[1].get_referring_components("xAxis", &model).len(), 2);

    let none = zooms[2].query_referring_components("xAxis", &model, ReferringOptions::default());
    assert!(none.specified);
    assert!(none.models.is_empty());

    let by_index = zooms[3].get_referring_components("xAxis", &model);
    assert_eq!(by_index.len(), 1);
    assert_eq!(by_index[0].component_index(), 1);
}

#[test]
fn patch_keeps_sub_type_and_merges_fields() {
    let registry = builtin_registry();
    let mut model = built_model(&registry);

    let report = model
        .set_option(
            &registry,
            &object(json!({"xAxis": {"name": "Weekday"}})),
            SetOptionMode::Merge,
        )
        .expect("patch builds");
    assert_eq!(report.merged, 1);
    assert_eq!(report.created, 0);

    let x_axis = model.component("xAxis", 0).expect("x axis");
    assert_eq!(x_axis.sub_type(), Some("category"));
    assert_eq!(x_axis.get("name"), Some(&json!("Weekday")));
    assert_eq!(x_axis.get("data"), Some(&json!(["Mon", "Tue"])));
    assert_eq!(model.component_count(), 7);
}

#[test]
fn explicit_sub_type_change_recreates_component_in_place() {
    let registry = builtin_registry();
    let mut model = built_model(&registry);
    let previous_id = model.components_of("dataZoom")[0].id().to_owned();

    let report = model
        .set_option(
            &registry,
            &object(json!({"dataZoom": [{"type": "slider"}]})),
            SetOptionMode::Merge,
        )
        .expect("patch builds");
    assert_eq!(report.created, 1);
    assert_eq!(report.merged, 0);

    let zoom = &model.components_of("dataZoom")[0];
    assert_eq!(zoom.sub_type(), Some("slider"));
    assert_eq!(zoom.id(), previous_id);
    assert_eq!(zoom.get("showDetail"), Some(&json!(true)));
}

#[test]
fn null_entries_leave_positions_untouched() {
    let registry = builtin_registry();
    let mut model = built_model(&registry);

    let report = model
        .set_option(
            &registry,
            &object(json!({"dataZoom": [null, {"end": 50}]})),
            SetOptionMode::Merge,
        )
        .expect("patch builds");
    assert_eq!(report.merged, 1);

    let zooms = model.components_of("dataZoom");
    assert_eq!(zooms[0].sub_type(), Some("inside"));
    assert_eq!(zooms[1].get("start").and_then(Value::as_f64), Some(20.0));
    assert_eq!(zooms[1].get("end").and_then(Value::as_f64), Some(50.0));
}

#[test]
fn blocks_match_existing_components_by_id() {
    let registry = builtin_registry();
    let mut model = built_model(&registry);

    model
        .set_option(
            &registry,
            &object(json!({"title": {"id": "main-title", "text": "Revenue"}})),
            SetOptionMode::Merge,
        )
        .expect("patch by id");
    assert_eq!(model.components_of("title").len(), 1);
    assert_eq!(
        model.component("title", 0).and_then(|title| title.get("text")),
        Some(&json!("Revenue"))
    );

    model
        .set_option(
            &registry,
            &object(json!({"title": [{"id": "sub-title", "text": "Q1"}]})),
            SetOptionMode::Merge,
        )
        .expect("new id appends");
    assert_eq!(model.components_of("title").len(), 2);
    assert_eq!(model.components_of("title")[1].id(), "sub-title");
}

#[test]
fn replace_mode_drops_previous_components() {
    let registry = builtin_registry();
    let mut model = built_model(&registry);

    model
        .set_option(
            &registry,
            &object(json!({"title": {"text": "Fresh"}})),
            SetOptionMode::Replace,
        )
        .expect("replace builds");
    assert_eq!(model.component_count(), 1);
    assert!(model.components_of("xAxis").is_empty());
}

#[test]
fn unregistered_sub_type_is_skipped_by_default() {
    let registry = builtin_registry();
    let mut model = GlobalModel::new(GlobalModelConfig::new());
    let report = model
        .set_option(
            &registry,
            &object(json!({"legend": [{"type": "fancy"}, {}], "grid": {}})),
            SetOptionMode::Merge,
        )
        .expect("skip policy keeps building");

    assert_eq!(report.skipped, vec![ComponentTypeId::parse("legend.fancy")]);
    assert_eq!(model.components_of("legend").len(), 1);
    assert_eq!(model.components_of("legend")[0].sub_type(), Some("plain"));
    assert_eq!(model.components_of("grid").len(), 1);
}

#[test]
fn unregistered_sub_type_fails_under_fail_policy() {
    let registry = builtin_registry();
    let mut model = GlobalModel::new(
        GlobalModelConfig::new().with_missing_class_policy(MissingClassPolicy::Fail),
    );
    let err = model
        .set_option(
            &registry,
            &object(json!({"legend": {"type": "fancy"}})),
            SetOptionMode::Merge,
        )
        .expect_err("fail policy propagates");
    assert!(matches!(err, ComponentError::NotFound { .. }));
}

#[test]
fn ambiguous_sub_type_aborts_the_build() {
    let mut registry = builtin_registry();
    registry.register_class(ComponentClass::declare(ClassSpec::new("marker.pin")));
    registry.register_class(ComponentClass::declare(ClassSpec::new("marker.flag")));

    let mut model = GlobalModel::new(GlobalModelConfig::new());
    let err = model
        .set_option(
            &registry,
            &object(json!({"marker": {}})),
            SetOptionMode::Merge,
        )
        .expect_err("ambiguous marker");
    assert!(matches!(
        err,
        ComponentError::AmbiguousSubtype { ref main_type, .. } if main_type == "marker"
    ));
}

#[test]
fn failed_merge_leaves_components_untouched() {
    let registry = builtin_registry();
    let mut model = GlobalModel::new(GlobalModelConfig::new());
    model
        .set_option(
            &registry,
            &object(json!({"grid": {"left": 30}, "title": {"text": "Sales"}})),
            SetOptionMode::Merge,
        )
        .expect("document builds");

    let err = model
        .set_option(
            &registry,
            &object(json!({"grid": {"left": 99}, "title": 5})),
            SetOptionMode::Merge,
        )
        .expect_err("title block is not an object");
    assert!(matches!(err, ComponentError::InvalidData(_)));
    assert_eq!(
        model.component("grid", 0).and_then(|grid| grid.get("left")),
        Some(&json!(30))
    );
    assert_eq!(model.component_count(), 2);
}

#[test]
fn failed_replace_keeps_the_previous_document() {
    let registry = builtin_registry();
    let mut model = GlobalModel::new(GlobalModelConfig::new());
    model
        .set_option(
            &registry,
            &object(json!({"grid": {"left": 30}, "title": {"text": "Sales"}})),
            SetOptionMode::Merge,
        )
        .expect("document builds");

    model
        .set_option(
            &registry,
            &object(json!({"grid": {"left": 99}, "title": 5})),
            SetOptionMode::Replace,
        )
        .expect_err("title block is not an object");
    assert_eq!(model.components_of("title").len(), 1);
    assert_eq!(
        model.component("title", 0).and_then(|title| title.get("text")),
        Some(&json!("Sales"))
    );
    assert_eq!(
        model.component("grid", 0).and_then(|grid| grid.get("left")),
        Some(&json!(30))
    );
}

#[test]
fn non_object_block_is_invalid_data() {
    let registry = builtin_registry();
    let mut model = GlobalModel::new(GlobalModelConfig::new());
    let err = model
        .set_option(&registry, &object(json!({"grid": 5})), SetOptionMode::Merge)
        .expect_err("scalar block");
    assert!(matches!(err, ComponentError::InvalidData(_)));
}

#[test]
fn theme_from_config_sits_between_user_and_defaults() {
    let registry = builtin_registry();
    let config = GlobalModelConfig::from_json_str(
        r##"{"theme": {"grid": {"show": true, "borderColor": "#000"}}}"##,
    )
    .expect("config json");
    assert_eq!(config.missing_class_policy, MissingClassPolicy::Skip);

    let mut model = GlobalModel::new(config);
    model
        .set_option(
            &registry,
            &object(json!({"grid": {"borderColor": "#f00"}})),
            SetOptionMode::Merge,
        )
        .expect("grid builds");
    let grid = model.component("grid", 0).expect("grid");
    assert_eq!(grid.get("show"), Some(&json!(true)));
    assert_eq!(grid.get("borderColor"), Some(&json!("#f00")));
    assert_eq!(grid.get("borderWidth"), Some(&json!(1)));
}

#[test]
fn config_json_round_trip_keeps_policy_and_theme() {
    let config = GlobalModelConfig::new()
        .with_theme(Theme::default().with_fragment("title", json!({"textStyle": {"color": "#fff"}})))
        .with_missing_class_policy(MissingClassPolicy::Fail);
    let json = config.to_json_pretty().expect("serialize config");
    assert!(json.contains("\"fail\""));
    let restored = GlobalModelConfig::from_json_str(&json).expect("parse config");
    assert_eq!(restored, config);
}

#[test]
fn theme_must_be_a_json_object() {
    let err = Theme::from_json_str("[1, 2]").expect_err("array theme");
    assert!(matches!(err, ComponentError::InvalidData(_)));
    let theme = Theme::from_json_str(r#"{"legend": {"top": 10}}"#).expect("object theme");
    assert!(!theme.is_empty());
}

#[test]
fn query_components_filters_by_index_id_name_and_sub_type() {
    let registry = builtin_registry();
    let mut model = GlobalModel::new(GlobalModelConfig::new());
    model
        .set_option(
            &registry,
            &object(json!({
                "legend": [
                    {"name": "left legend"},
                    {"type": "scroll", "id": "scroller", "name": "right legend"},
                ],
            })),
            SetOptionMode::Merge,
        )
        .expect("legends build");

    let all = model.query_components(&QueryCondition::main_type("legend"));
    assert_eq!(all.len(), 2);
    let by_index = model.query_components(&QueryCondition::main_type("legend").with_index([1]));
    assert_eq!(by_index[0].id(), "scroller");
    let by_id = model.query_components(&QueryCondition::main_type("legend").with_id(["scroller"]));
    assert_eq!(by_id.len(), 1);
    let by_name =
        model.query_components(&QueryCondition::main_type("legend").with_name(["left legend"]));
    assert_eq!(by_name[0].component_index(), 0);
    let scrolls =
        model.query_components(&QueryCondition::main_type("legend").with_sub_type("scroll"));
    assert_eq!(scrolls.len(), 1);
    assert_eq!(scrolls[0].get("pageIconSize"), Some(&json!(15)));
    assert_eq!(scrolls[0].get("orient"), Some(&json!("horizontal")));
    assert!(model.query_components(&QueryCondition::main_type("tooltip")).is_empty());
}

#[test]
fn legend_single_selection_keeps_one_entry() {
    let registry = builtin_registry();
    let mut model = GlobalModel::new(GlobalModelConfig::new());
    model
        .set_option(
            &registry,
            &object(json!({
                "legend": {
                    "selectedMode": "single",
                    "selected": {"a": false, "b": true, "c": true},
                },
            })),
            SetOptionMode::Merge,
        )
        .expect("legend builds");

    let legend = model.component("legend", 0).expect("legend");
    assert_eq!(
        legend.get("selected"),
        Some(&json!({"a": false, "b": true, "c": false}))
    );
}

#[test]
fn data_zoom_window_is_clamped_and_keeps_in_range_values() {
    let registry = builtin_registry();
    let mut model = GlobalModel::new(GlobalModelConfig::new());
    model
        .set_option(
            &registry,
            &object(json!({
                "dataZoom": [
                    {"start": -5, "end": 150},
                    {"start": 20, "end": 60},
                    {"start": 90, "end": 10},
                ],
            })),
            SetOptionMode::Merge,
        )
        .expect("zooms build");

    let zooms = model.components_of("dataZoom");
    assert_eq!(zooms[0].get("start"), Some(&json!(0.0)));
    assert_eq!(zooms[0].get("end"), Some(&json!(100.0)));
    assert_eq!(zooms[1].get("start"), Some(&json!(20)));
    assert_eq!(zooms[1].get("end"), Some(&json!(60)));
    assert_eq!(zooms[2].get("start"), Some(&json!(10)));
    assert_eq!(zooms[2].get("end"), Some(&json!(90)));

    model
        .set_option(
            &registry,
            &object(json!({"dataZoom": [null, {"end": 300}]})),
            SetOptionMode::Merge,
        )
        .expect("patch builds");
    let patched = &model.components_of("dataZoom")[1];
    assert_eq!(patched.get("start"), Some(&json!(20)));
    assert_eq!(patched.get("end"), Some(&json!(100.0)));
}

#[test]
fn remove_components_drops_one_main_type() {
    let registry = builtin_registry();
    let mut model = built_model(&registry);
    assert_eq!(model.remove_components("dataZoom"), 2);
    assert_eq!(model.remove_components("dataZoom"), 0);
    assert_eq!(model.component_count(), 5);
}
