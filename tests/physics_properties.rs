//! System-level physics properties, checked against the native rlib.

use gravitas_engine::body::Body;
use gravitas_engine::forces::{direct_acceleration, GravityParams, G};
use gravitas_engine::math::Vec2;
use gravitas_engine::solver;
use gravitas_engine::spatial::{QuadTree, UniformGrid};
use gravitas_engine::EngineCore;

fn params() -> GravityParams {
    GravityParams {
        g_eff: G * 50.0,
        adhesion_distance: 10.0,
        adhesion_strength: 0.2,
    }
}

/// Deterministic scatter without pulling in an RNG crate for one test.
fn scattered_bodies(count: usize, width: f32, height: f32) -> Vec<Body> {
    let mut state = 0x2545_f491u32;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state >> 8) as f32 / (1u32 << 24) as f32
    };
    (0..count)
        .map(|_| {
            let x = 3.0 + next() * (width - 6.0);
            let y = 3.0 + next() * (height - 6.0);
            Body::new(x, y, 3.0)
        })
        .collect()
}

fn total_momentum(engine: &EngineCore) -> Vec2 {
    engine
        .bodies()
        .iter()
        .fold(Vec2::zero(), |acc, b| acc + b.vel * b.mass)
}

fn total_energy(bodies: &[Body]) -> f32 {
    bodies
        .iter()
        .map(|b| {
            0.5 * b.mass * b.vel.length_squared()
                + 0.5 * b.inertia * b.angular_vel * b.angular_vel
        })
        .sum()
}

#[test]
fn momentum_is_conserved_away_from_the_walls() {
    let mut engine = EngineCore::new(512.0, 512.0, 0);
    let spots = [
        (220.0, 240.0, 2.0, 0.5),
        (290.0, 240.0, -2.0, 0.5),
        (255.0, 200.0, 0.5, 2.0),
        (255.0, 300.0, 0.5, -2.0),
        (230.0, 280.0, 1.0, -1.0),
        (280.0, 210.0, -1.0, 1.0),
    ];
    for (x, y, vx, vy) in spots {
        let idx = engine.spawn(x, y, vx, vy).unwrap();
        // Equal masses keep the short-range adhesion term symmetric.
        engine.body_mut(idx).unwrap().set_mass(1.0e9);
    }

    let before = total_momentum(&engine);
    let scale: f32 = engine
        .bodies()
        .iter()
        .map(|b| b.mass * b.speed())
        .sum();
    for _ in 0..8 {
        engine.step_dt(0.05);
    }
    let after = total_momentum(&engine);

    // Internal forces only (gravity, adhesion, contacts): every impulse has
    // an equal and opposite partner.
    assert!((after - before).length() < scale * 1e-4 + 1e-3);
}

#[test]
fn elastic_frictionless_impact_conserves_momentum_and_energy() {
    let mut a = Body::new(100.0, 100.0, 3.0);
    let mut b = Body::new(104.0, 101.0, 3.0);
    for body in [&mut a, &mut b] {
        body.restitution = 1.0;
        body.friction = 0.0;
        body.static_friction = 0.0;
    }
    a.vel = Vec2::new(3.0, 1.0);
    b.vel = Vec2::new(-2.0, 0.5);
    let mut bodies = vec![a, b];

    let momentum = |bodies: &[Body]| {
        bodies
            .iter()
            .fold(Vec2::zero(), |acc, b| acc + b.vel * b.mass)
    };
    let p_before = momentum(&bodies);
    let e_before = total_energy(&bodies);

    let mut contacts = Vec::new();
    solver::detect_contacts_brute(&bodies, &mut contacts);
    assert_eq!(contacts.len(), 1);
    solver::solve_contacts(&mut bodies, &contacts, 10);

    let p_after = momentum(&bodies);
    let e_after = total_energy(&bodies);
    let p_scale = p_before.length().max(1.0);
    assert!((p_after - p_before).length() < p_scale * 1e-5);
    // Restitution 1 and no friction: kinetic energy survives the bounce.
    assert!((e_after - e_before).abs() < e_before * 1e-4);
}

#[test]
fn contact_resolution_never_adds_energy() {
    let mut a = Body::new(100.0, 100.0, 3.0);
    let mut b = Body::new(105.0, 100.0, 3.0);
    a.vel = Vec2::new(20.0, 0.0);
    b.vel = Vec2::new(-20.0, 0.0);
    let mut bodies = vec![a, b];

    let before = total_energy(&bodies);
    let mut contacts = Vec::new();
    solver::detect_contacts_brute(&bodies, &mut contacts);
    assert_eq!(contacts.len(), 1);
    solver::solve_contacts(&mut bodies, &contacts, 10);
    for contact in &contacts {
        solver::positional_correction(&mut bodies, contact);
    }
    let after = total_energy(&bodies);

    assert!(after <= before * (1.0 + 1e-5));
    // Restitution < 1 actually dissipates on a hard head-on hit.
    assert!(after < before);
}

#[test]
fn overlap_decays_toward_the_slop_bound() {
    let mut engine = EngineCore::new(512.0, 512.0, 0);
    // Gravity off: only the contact pipeline acts.
    engine.load_config_json(r#"{"gravityScale": 0.0}"#).unwrap();
    let a = engine.spawn(250.0, 250.0, 0.0, 0.0).unwrap();
    let b = engine.spawn(252.0, 250.0, 0.0, 0.0).unwrap();
    let radius_sum = engine.body(a).unwrap().radius + engine.body(b).unwrap().radius;

    let gap = |e: &EngineCore| (e.body(b).unwrap().pos - e.body(a).unwrap().pos).length();
    let overlap_before = radius_sum - gap(&engine);
    assert!(overlap_before > 1.0, "pair starts deeply interpenetrated");

    for _ in 0..40 {
        engine.step_dt(0.1);
    }
    let overlap_after = radius_sum - gap(&engine);
    assert!(overlap_after < 0.1, "overlap {overlap_after} not resolved");
}

#[test]
fn grid_detection_matches_the_brute_force_oracle() {
    let mut bodies = scattered_bodies(200, 256.0, 256.0);
    let mut grid = UniformGrid::new(256.0, 256.0, 8.0);
    grid.update(&mut bodies);

    let mut scratch = Vec::new();
    let mut via_grid = Vec::new();
    solver::detect_contacts(&bodies, &grid, &mut scratch, &mut via_grid);
    let mut via_brute = Vec::new();
    solver::detect_contacts_brute(&bodies, &mut via_brute);

    let mut grid_pairs: Vec<(usize, usize)> = via_grid.iter().map(|c| (c.a, c.b)).collect();
    let mut brute_pairs: Vec<(usize, usize)> = via_brute.iter().map(|c| (c.a, c.b)).collect();
    grid_pairs.sort_unstable();
    brute_pairs.sort_unstable();

    assert!(!brute_pairs.is_empty(), "scatter should produce overlaps");
    assert_eq!(grid_pairs, brute_pairs);
}

#[test]
fn tree_at_theta_zero_reproduces_direct_summation() {
    // Jittered lattice: positions stay pairwise separated, so every body
    // sits in its own leaf and theta 0 recurses down to exact pair terms.
    let mut state = 0x9e37_79b9u32;
    let mut jitter = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state >> 8) as f32 / (1u32 << 24) as f32 * 16.0 - 8.0
    };
    let mut bodies = Vec::new();
    for gy in 0..10 {
        for gx in 0..12 {
            let x = 40.0 + gx as f32 * 36.0 + jitter();
            let y = 40.0 + gy as f32 * 44.0 + jitter();
            bodies.push(Body::new(x, y, 3.0));
        }
    }
    let mut tree = QuadTree::new(512.0, 512.0);
    tree.build(&bodies);
    let p = params();

    for i in 0..bodies.len() {
        let exact = direct_acceleration(i, &bodies, &p);
        let via_tree = tree.acceleration(i, &bodies, 0.0, &p);
        let tolerance = 1e-4 * exact.length() + 1e-7;
        assert!(
            (via_tree - exact).length() <= tolerance,
            "body {i}: tree {via_tree:?} vs direct {exact:?}"
        );
    }
}

#[test]
fn still_body_falls_asleep_and_a_heavy_arrival_wakes_it() {
    let mut engine = EngineCore::new(512.0, 512.0, 0);
    let idx = engine.spawn(256.0, 256.0, 0.0, 0.0).unwrap();

    // Nothing pulls on a lone body; it goes quiet after the time limit.
    for _ in 0..12 {
        engine.step_dt(0.1);
    }
    assert!(engine.body(idx).unwrap().sleeping);
    let frozen_pos = engine.body(idx).unwrap().pos;

    // Frozen means frozen: more ticks move nothing.
    for _ in 0..5 {
        engine.step_dt(0.1);
    }
    assert_eq!(engine.body(idx).unwrap().pos, frozen_pos);

    // A massive neighbor produces a pull over the wake threshold.
    let heavy = engine.spawn(306.0, 256.0, 0.0, 0.0).unwrap();
    engine.body_mut(heavy).unwrap().set_mass(1.0e12);
    engine.step_dt(0.1);
    assert!(!engine.body(idx).unwrap().sleeping);

    // And it starts moving again afterwards.
    for _ in 0..5 {
        engine.step_dt(0.1);
    }
    assert!((engine.body(idx).unwrap().pos - frozen_pos).length() > 0.0);
}

#[test]
fn every_body_stays_inside_the_bounds() {
    let mut engine = EngineCore::new(256.0, 256.0, 80);
    // Stir hard so plenty of wall hits happen.
    for i in 0..engine.body_count() {
        let kick = if i % 2 == 0 { 60.0 } else { -45.0 };
        engine.body_mut(i).unwrap().vel = Vec2::new(kick, -kick * 0.7);
    }
    for _ in 0..100 {
        engine.step_dt(0.1);
    }
    for (i, body) in engine.bodies().iter().enumerate() {
        assert!(
            body.pos.x >= body.radius - 0.05 && body.pos.x <= 256.0 - body.radius + 0.05,
            "body {i} escaped horizontally: {:?}",
            body.pos
        );
        assert!(
            body.pos.y >= body.radius - 0.05 && body.pos.y <= 256.0 - body.radius + 0.05,
            "body {i} escaped vertically: {:?}",
            body.pos
        );
    }
}
