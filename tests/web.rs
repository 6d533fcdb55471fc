//! Browser smoke tests. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use springbox_engine::World;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn init_and_version() {
    springbox_engine::init();
    assert!(!springbox_engine::version().is_empty());
}

#[wasm_bindgen_test]
fn demo_scene_steps_from_frame_timestamps() {
    let mut world = World::new();
    world.populate_demo_scene().unwrap();
    assert_eq!(world.step_frame(0.0), 0.0);
    world.step_frame(16.0);
    assert_eq!(world.frame(), 2);

    world.extract_bodies();
    assert_eq!(world.bodies_len(), 4 * springbox_engine::simulation::BODY_STRIDE);
}

#[wasm_bindgen_test]
fn errors_surface_as_js_strings() {
    let mut world = World::new();
    let err = world.set_parameter("wind", 1.0).unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("unknown parameter: wind"));

    let err = world.add_circle(None, None, Some(-1.0), None).unwrap_err();
    assert!(err.as_string().unwrap_or_default().starts_with("invalid parameter radius"));
}

#[wasm_bindgen_test]
fn soft_body_ids_come_back_as_json() {
    let mut world = World::new();
    let json = world
        .add_soft_body(None, None, Some(3), Some(2), None, None, None)
        .unwrap();
    assert!(json.contains("\"particles\":[0,1,2,3,4,5]"));
    assert_eq!(world.body_count(), 6);
    assert_eq!(world.spring_count(), 2 * 2 + 3);

    let err = world
        .add_soft_body(None, None, Some(1), None, None, None, None)
        .unwrap_err();
    assert!(err.as_string().unwrap_or_default().starts_with("invalid parameter cols"));
}
