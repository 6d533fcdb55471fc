use springbox_engine::World;

#[test]
fn perf_smoke_step() {
    let mut world = World::new();
    world.enable_perf_metrics(true);
    for i in 0..12 {
        let x = -8.0 + i as f32 * 1.4;
        world.add_circle(Some(x), Some(4.0), Some(0.4), Some(1.0)).unwrap();
        world
            .add_rectangle(Some(x), Some(6.0), Some(0.8), Some(0.8), Some(1.0))
            .unwrap();
    }
    world.populate_demo_scene().unwrap();
    for frame in 0..120 {
        world.step_frame(frame as f64 * 16.0);
    }
    let stats = world.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.bodies(), 28);
    assert_eq!(stats.springs(), 1);
    assert_eq!(stats.pairs_tested(), 28 * 27 / 2);
}
