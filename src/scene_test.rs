#![allow(clippy::float_cmp)]

use super::*;

fn rect_at(x: f64, y: f64) -> SceneObject {
    SceneObject::new(ObjectKind::Rectangle, x, y, 100.0, 50.0)
}

fn text(content: &str) -> SceneObject {
    let kind = ObjectKind::Text { content: content.to_owned(), font: Font::new(48.0, "Arial") };
    SceneObject::new(kind, 0.0, 0.0, 120.0, 48.0)
}

fn scene_of(n: usize) -> Scene {
    let mut scene = Scene::new();
    for i in 0..n {
        #[allow(clippy::cast_precision_loss)]
        scene.add(rect_at(i as f64 * 10.0, 0.0));
    }
    scene
}

// =============================================================
// Font
// =============================================================

#[test]
fn font_display_is_css_shorthand() {
    assert_eq!(Font::new(48.0, "Arial").to_string(), "48px Arial");
    assert_eq!(Font::new(52.5, "Times New Roman").to_string(), "52.5px Times New Roman");
}

#[test]
fn font_parses_shorthand() {
    assert_eq!("48px Arial".parse::<Font>(), Ok(Font::new(48.0, "Arial")));
    assert_eq!("12.5px Comic Sans MS".parse::<Font>(), Ok(Font::new(12.5, "Comic Sans MS")));
}

#[test]
fn font_rejects_malformed_strings() {
    assert!("Arial".parse::<Font>().is_err());
    assert!("bigpx Arial".parse::<Font>().is_err());
    assert!("48px ".parse::<Font>().is_err());
    assert!("-3px Arial".parse::<Font>().is_err());
}

// =============================================================
// Fill / Shadow
// =============================================================

#[test]
fn fill_defaults_to_solid_gray() {
    let fill = Fill::default();
    assert_eq!(fill.kind, FillKind::Solid);
    assert_eq!(fill.color1, "#495057");
    assert_eq!(fill.end_color(), "#495057");
}

#[test]
fn shadow_defaults_disabled_with_offsets() {
    let shadow = Shadow::default();
    assert!(!shadow.enabled);
    assert_eq!(shadow.color, "#000000");
    assert_eq!((shadow.blur, shadow.offset_x, shadow.offset_y), (5.0, 5.0, 5.0));
}

#[test]
fn object_serializes_with_type_tag_and_camel_case() {
    let mut scene = Scene::new();
    scene.add(text("hi"));
    let Some(obj) = scene.get(0) else {
        panic!("object just added");
    };
    let Ok(value) = serde_json::to_value(obj) else {
        panic!("scene objects serialize");
    };
    assert_eq!(value["type"], "text");
    assert_eq!(value["font"], "48px Arial");
    assert_eq!(value["displayName"], "Text 0");
    assert_eq!(value["isVisible"], true);
    assert_eq!(value["shadow"]["offsetX"], 5.0);
}

#[test]
fn object_deserializes_without_style_fields() {
    let json = r#"{"id":3,"displayName":"Box","x":1,"y":2,"width":3,"height":4,
        "rotation":0,"isVisible":true,"type":"rectangle"}"#;
    let Ok(obj) = serde_json::from_str::<SceneObject>(json) else {
        panic!("minimal rectangle should parse");
    };
    assert_eq!(obj.kind, ObjectKind::Rectangle);
    assert_eq!(obj.fill, Fill::default());
    assert_eq!(obj.shadow, Shadow::default());
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn contains_respects_rotation() {
    let mut obj = SceneObject::new(ObjectKind::Rectangle, 0.0, 0.0, 100.0, 10.0);
    assert!(obj.contains(Point::new(90.0, 5.0)));
    obj.rotation = std::f64::consts::FRAC_PI_2;
    // Now a tall thin box centered at (50, 5).
    assert!(!obj.contains(Point::new(90.0, 5.0)));
    assert!(obj.contains(Point::new(50.0, 45.0)));
}

// =============================================================
// Add / paste
// =============================================================

#[test]
fn add_assigns_ids_names_and_selects() {
    let mut scene = Scene::new();
    let a = scene.add(rect_at(0.0, 0.0));
    let b = scene.add(text("x"));
    assert_eq!((a, b), (0, 1));
    assert_eq!(scene.selected(), Some(1));
    assert_eq!(scene.objects()[0].display_name, "Rectangle 0");
    assert_eq!(scene.objects()[1].display_name, "Text 1");
    assert_eq!(scene.next_id(), 2);
}

#[test]
fn add_keeps_explicit_name() {
    let mut scene = Scene::new();
    let mut obj = rect_at(0.0, 0.0);
    obj.display_name = "Backdrop".to_owned();
    scene.add(obj);
    assert_eq!(scene.objects()[0].display_name, "Backdrop");
}

#[test]
fn paste_offsets_and_renames() {
    let mut scene = scene_of(1);
    let source = scene.objects()[0].clone();
    let index = scene.paste(&source, 20.0);
    let copy = &scene.objects()[index];
    assert_eq!((copy.x, copy.y), (20.0, 20.0));
    assert_eq!(copy.id, 1);
    assert_eq!(copy.display_name, "Rectangle 1");
    assert_eq!(scene.selected(), Some(1));
}

// =============================================================
// Delete / reorder
// =============================================================

#[test]
fn delete_selected_clears_selection() {
    let mut scene = scene_of(3);
    scene.select(Some(1));
    assert!(scene.delete(1));
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.selected(), None);
}

#[test]
fn delete_below_selection_shifts_it() {
    let mut scene = scene_of(3);
    assert!(scene.delete(0));
    assert_eq!(scene.selected(), Some(1));
    assert_eq!(scene.selected_object().map(|o| o.id), Some(2));
}

#[test]
fn delete_out_of_range_is_noop() {
    let mut scene = scene_of(1);
    assert!(!scene.delete(5));
    assert_eq!(scene.len(), 1);
}

#[test]
fn move_forward_swaps_and_selection_follows() {
    let mut scene = scene_of(3);
    scene.select(Some(0));
    assert!(scene.move_object(0, Direction::Forward));
    assert_eq!(scene.objects()[1].id, 0);
    assert_eq!(scene.selected(), Some(1));
}

#[test]
fn move_follows_selected_neighbor() {
    let mut scene = scene_of(3);
    scene.select(Some(1));
    assert!(scene.move_object(0, Direction::Forward));
    assert_eq!(scene.selected(), Some(0));
    assert_eq!(scene.selected_object().map(|o| o.id), Some(1));
}

#[test]
fn move_forward_then_back_restores_order_and_selection() {
    for selected in [None, Some(0), Some(1), Some(2), Some(3)] {
        let mut scene = scene_of(4);
        scene.select(selected);
        let ids: Vec<ObjectId> = scene.objects().iter().map(|o| o.id).collect();
        assert!(scene.move_object(1, Direction::Forward));
        assert!(scene.move_object(2, Direction::Backward));
        let after: Vec<ObjectId> = scene.objects().iter().map(|o| o.id).collect();
        assert_eq!(after, ids, "selection {selected:?}");
        assert_eq!(scene.selected(), selected);
    }
}

#[test]
fn move_past_either_end_is_noop() {
    let mut scene = scene_of(2);
    assert!(!scene.move_object(0, Direction::Backward));
    assert!(!scene.move_object(1, Direction::Forward));
    assert_eq!(scene.objects()[0].id, 0);
}

// =============================================================
// Selection / visibility
// =============================================================

#[test]
fn select_hidden_object_refused() {
    let mut scene = scene_of(2);
    scene.select(None);
    assert!(scene.toggle_visibility(0));
    assert!(!scene.select(Some(0)));
    assert_eq!(scene.selected(), None);
}

#[test]
fn select_reports_change() {
    let mut scene = scene_of(2);
    assert!(!scene.select(Some(1)));
    assert!(scene.select(Some(0)));
    assert!(scene.select(None));
    assert!(!scene.select(Some(9)));
}

#[test]
fn hiding_selected_object_deselects() {
    let mut scene = scene_of(1);
    assert!(scene.toggle_visibility(0));
    assert_eq!(scene.selected(), None);
    assert!(scene.toggle_visibility(0));
    assert!(scene.objects()[0].is_visible);
}

#[test]
fn nudge_moves_selected_only() {
    let mut scene = scene_of(2);
    assert!(scene.nudge(10.0, -1.0));
    assert_eq!((scene.objects()[1].x, scene.objects()[1].y), (20.0, -1.0));
    scene.select(None);
    assert!(!scene.nudge(1.0, 1.0));
}

// =============================================================
// Replace / counter
// =============================================================

#[test]
fn replace_clears_selection_and_restore_counter_uses_max_id() {
    let mut scene = scene_of(1);
    let mut a = rect_at(0.0, 0.0);
    a.id = 7;
    let mut b = rect_at(0.0, 0.0);
    b.id = 3;
    scene.replace(vec![a, b]);
    assert_eq!(scene.selected(), None);
    scene.restore_counter();
    assert_eq!(scene.next_id(), 8);
}

#[test]
fn restore_counter_saturates_at_max_id() {
    let mut scene = Scene::new();
    let mut obj = rect_at(0.0, 0.0);
    obj.id = ObjectId::MAX;
    scene.replace(vec![obj]);
    scene.restore_counter();
    assert_eq!(scene.next_id(), ObjectId::MAX);
}

#[test]
fn restore_counter_on_empty_scene_is_zero() {
    let mut scene = scene_of(2);
    scene.replace(Vec::new());
    scene.restore_counter();
    assert_eq!(scene.next_id(), 0);
}

// =============================================================
// View models
// =============================================================

#[test]
fn layers_list_topmost_first() {
    let mut scene = scene_of(3);
    scene.select(Some(2));
    let rows = scene.layers();
    let order: Vec<usize> = rows.iter().map(|r| r.index).collect();
    assert_eq!(order, vec![2, 1, 0]);
    assert!(rows[0].is_selected);
    assert!(!rows[0].can_move_up);
    assert!(rows[0].can_move_down);
    assert!(rows[2].can_move_up);
    assert!(!rows[2].can_move_down);
}

#[test]
fn property_panel_hidden_without_selection() {
    let mut scene = scene_of(1);
    scene.select(None);
    assert!(scene.property_panel().is_none());
}

#[test]
fn property_panel_for_rectangle_shows_fill() {
    let scene = scene_of(1);
    let Some(panel) = scene.property_panel() else {
        panic!("rectangle is selected");
    };
    assert!(panel.show_fill);
    assert!(!panel.show_filters);
}

#[test]
fn linear_fill_gets_white_end_color() {
    let mut scene = scene_of(1);
    assert!(scene.set_fill_kind(FillKind::Linear));
    let fill = &scene.objects()[0].fill;
    assert_eq!(fill.kind, FillKind::Linear);
    assert_eq!(fill.end_color(), "#ffffff");
}

#[test]
fn fill_colors_and_shadow_apply_to_selection() {
    let mut scene = scene_of(1);
    assert!(scene.set_fill_color(false, "#ff0000"));
    assert!(scene.set_fill_color(true, "#00ff00"));
    let shadow = Shadow { enabled: true, ..Shadow::default() };
    assert!(scene.set_shadow(shadow.clone()));
    let obj = &scene.objects()[0];
    assert_eq!(obj.fill.color1, "#ff0000");
    assert_eq!(obj.fill.color2.as_deref(), Some("#00ff00"));
    assert_eq!(obj.shadow, shadow);
}
