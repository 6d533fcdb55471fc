use springbox_engine::collision::{circle_circle, resolve_collisions};
use springbox_engine::{RigidBody, Spring, Vec2, WorldCore};

fn frictionless_world(gravity: f32) -> WorldCore {
    let mut world = WorldCore::new();
    world.set_parameter("gravity", gravity).unwrap();
    world.set_parameter("friction", 0.0).unwrap();
    world
}

#[test]
fn free_bodies_keep_their_velocity() {
    let mut world = frictionless_world(0.0);
    let ball = world.add_circle(Vec2::new(-4.0, 0.0), 0.5, 2.0).unwrap();
    let crate_box = world.add_rectangle(Vec2::new(4.0, 0.0), 1.0, 1.0, 1.0).unwrap();
    world.apply_impulse(ball, Vec2::new(2.0, 1.0)).unwrap();
    world.apply_impulse(crate_box, Vec2::new(-0.5, -0.25)).unwrap();

    for _ in 0..100 {
        world.step(0.01);
    }

    assert_eq!(world.body(ball).unwrap().velocity, Vec2::new(1.0, 0.5));
    assert_eq!(world.body(crate_box).unwrap().velocity, Vec2::new(-0.5, -0.25));
}

#[test]
fn elastic_floor_bounce_returns_to_drop_height() {
    let mut world = frictionless_world(9.8);
    world.set_parameter("elasticity", 1.0).unwrap();
    let ball = world.add_circle(Vec2::new(0.0, 5.0), 0.5, 1.0).unwrap();

    let mut bounced = false;
    let mut apex = f32::MIN;
    for _ in 0..20_000 {
        world.step(0.0005);
        let body = world.body(ball).unwrap();
        if !bounced {
            bounced = body.velocity.y > 0.0;
            continue;
        }
        apex = apex.max(body.pos.y);
        if body.velocity.y < 0.0 {
            break;
        }
    }

    assert!(bounced);
    assert!((apex - 5.0).abs() < 0.05, "apex {apex}");
}

#[test]
fn exactly_touching_circles_do_not_collide() {
    assert!(circle_circle(Vec2::new(0.0, 0.0), 0.5, Vec2::new(1.0, 0.0), 0.5).is_none());

    let mut world = frictionless_world(0.0);
    let a = world.add_circle(Vec2::new(0.0, 0.0), 0.5, 1.0).unwrap();
    let b = world.add_circle(Vec2::new(1.0, 0.0), 0.5, 1.0).unwrap();
    world.apply_impulse(a, Vec2::new(1.0, 0.0)).unwrap();
    world.apply_impulse(b, Vec2::new(-1.0, 0.0)).unwrap();

    world.step(0.0);

    assert_eq!(world.body(a).unwrap().velocity, Vec2::new(1.0, 0.0));
    assert_eq!(world.body(b).unwrap().velocity, Vec2::new(-1.0, 0.0));
}

#[test]
fn circle_correction_leaves_no_penetration() {
    let cases = [
        (Vec2::new(0.0, 0.0), 0.5, Vec2::new(0.3, 0.4), 0.7),
        (Vec2::new(1.0, 1.0), 1.0, Vec2::new(1.2, 1.0), 1.0),
        (Vec2::new(-2.0, 3.0), 0.25, Vec2::new(-2.1, 2.8), 0.6),
    ];
    let params = *WorldCore::new().params();

    for (p1, r1, p2, r2) in cases {
        let mut bodies = [
            RigidBody::new_circle(p1, r1, 1.0).unwrap(),
            RigidBody::new_circle(p2, r2, 3.0).unwrap(),
        ];
        let first = resolve_collisions(&mut bodies, &params);
        assert_eq!(first.contacts, 1);

        let gap = bodies[0].pos.distance(bodies[1].pos);
        assert!(gap <= r1 + r2 + 1e-5, "over-separated: {gap}");
        if let Some(contact) = circle_circle(bodies[0].pos, r1, bodies[1].pos, r2) {
            assert!(contact.depth < 1e-5, "still penetrating: {}", contact.depth);
        }
    }
}

#[test]
fn spring_at_rest_length_applies_no_force() {
    let mut world = frictionless_world(0.0);
    let spawn = world
        .add_spring(Vec2::new(-1.5, 2.0), Vec2::new(1.5, 2.0), None, Some(5.0))
        .unwrap();

    world.step(0.02);

    assert_eq!(world.body(spawn.anchor1).unwrap().velocity, Vec2::zero());
    assert_eq!(world.body(spawn.anchor2).unwrap().velocity, Vec2::zero());

    let spring = world.spring(spawn.spring).unwrap();
    let force = spring
        .force(Vec2::new(0.0, 0.0), Vec2::new(0.0, spring.rest_length()))
        .unwrap();
    assert_eq!(force, Vec2::zero());
}

#[test]
fn box_pair_separates_along_minimum_overlap() {
    let mut world = frictionless_world(0.0);
    let a = world.add_rectangle(Vec2::new(0.0, 0.0), 2.0, 2.0, 1.0).unwrap();
    let b = world.add_rectangle(Vec2::new(1.5, 0.0), 2.0, 2.0, 1.0).unwrap();

    world.step(0.0);

    let (pa, pb) = (world.body(a).unwrap().pos, world.body(b).unwrap().pos);
    assert!(pa.x < 0.0 && pb.x > 1.5);
    assert!((pa.x + 0.25).abs() < 1e-6);
    assert!((pb.x - 1.75).abs() < 1e-6);
    assert_eq!(pa.y, 0.0);
    assert_eq!(pb.y, 0.0);
}

#[test]
fn stiffness_parameter_reaches_existing_springs() {
    let mut world = WorldCore::new();
    world.add_pendulum(Vec2::new(0.0, 8.0), 5.0, 2.0).unwrap();
    world
        .add_spring(Vec2::new(-2.0, 5.0), Vec2::new(2.0, 5.0), None, None)
        .unwrap();
    world.add_spring_chain(Vec2::new(5.0, 7.0), 2, 1.0, 0.5).unwrap();

    world.set_parameter("springStiffness", 0.15).unwrap();

    let stiffness: Vec<f32> = world.springs().iter().map(|(_, s)| s.stiffness).collect();
    assert_eq!(stiffness, vec![0.15; 4]);
}

#[test]
fn degenerate_geometry_stays_finite() {
    let mut world = WorldCore::new();
    world.add_circle(Vec2::new(1.0, 1.0), 0.5, 1.0).unwrap();
    world.add_circle(Vec2::new(1.0, 1.0), 0.5, 1.0).unwrap();
    world.add_rectangle(Vec2::new(-3.0, 0.0), 2.0, 2.0, 1.0).unwrap();
    world.add_circle(Vec2::new(-3.0, 0.0), 0.3, 1.0).unwrap();
    world
        .add_spring(Vec2::new(4.0, 4.0), Vec2::new(4.0, 4.0), None, None)
        .unwrap();

    for _ in 0..200 {
        world.step(0.016);
    }

    for (_, body) in world.bodies().iter() {
        assert!(body.pos.is_finite() && body.velocity.is_finite());
        assert!(body.angle.is_finite() && body.angular_vel.is_finite());
    }
}

#[test]
fn anchored_bob_motion_decays() {
    let mut world = frictionless_world(9.8);
    world.set_parameter("elasticity", 0.7).unwrap();

    let anchor = world.add_static_circle(Vec2::new(0.0, 8.0), 0.3).unwrap();
    let bob = world.add_circle(Vec2::new(0.0, 3.0), 0.5, 2.0).unwrap();
    world.connect(anchor, bob, Some(5.0), Some(0.8)).unwrap();

    // Window of roughly one spring period, sqrt(m / k) * 2pi ~ 9.9s
    let dt = 0.01;
    let window = 1000;
    let mut peaks = Vec::new();
    for _ in 0..4 {
        let mut peak = 0.0f32;
        for _ in 0..window {
            world.step(dt);
            peak = peak.max(world.body(bob).unwrap().velocity.length());
        }
        peaks.push(peak);
    }

    for pair in peaks.windows(2) {
        assert!(pair[1] <= pair[0] * 1.05 + 1e-3, "peaks grew: {peaks:?}");
    }
    assert!(peaks[3] < peaks[0] * 0.5, "no decay: {peaks:?}");
    assert_eq!(world.body(anchor).unwrap().pos, Vec2::new(0.0, 8.0));
}

#[test]
fn stretched_spring_pulls_anchor1_toward_anchor2() {
    let mut world = WorldCore::new();
    let a = world.add_circle(Vec2::new(0.0, 0.0), 0.3, 1.0).unwrap();
    let b = world.add_circle(Vec2::new(3.0, 0.0), 0.3, 1.0).unwrap();
    let spring = Spring::new(a, b, 1.0, 2.0).unwrap();

    let force = spring.force(Vec2::new(0.0, 0.0), Vec2::new(3.0, 0.0)).unwrap();
    assert_eq!(force, Vec2::new(4.0, 0.0));
    assert!(spring.force(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)).is_none());
}
