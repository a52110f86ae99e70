use approx::assert_relative_eq;
use backdrop_wasm::engine::surface::{NullSurface, RecordingSurface};
use backdrop_wasm::{Engine, SimConfig, Variant};
use glam::DVec2;

const W: f64 = 800.0;
const H: f64 = 600.0;

fn mesh(seed: u64) -> Engine {
    Engine::initialized(SimConfig::with_variant(Variant::Mesh), DVec2::new(W, H), seed)
}

#[test]
fn count_follows_viewport_density() {
    // min(floor(480000 / 8000), 180)
    assert_eq!(mesh(1).entities().len(), 60);

    let big = Engine::initialized(SimConfig::with_variant(Variant::Mesh), DVec2::new(2560.0, 1440.0), 1);
    assert_eq!(big.entities().len(), 180);

    let tiny = Engine::initialized(SimConfig::with_variant(Variant::Mesh), DVec2::new(50.0, 50.0), 1);
    assert_eq!(tiny.entities().len(), 0);
}

#[test]
fn count_is_stable_under_steps() {
    let mut engine = mesh(2);
    for _ in 0..300 {
        engine.step(&mut NullSurface);
        assert_eq!(engine.entities().len(), 60);
    }
}

#[test]
fn one_step_moves_by_velocity_then_damps() {
    let mut engine = mesh(1234);
    let before = engine.entities().to_vec();

    engine.step(&mut NullSurface);

    for (old, new) in before.iter().zip(engine.entities()) {
        let mut expected = old.pos + old.vel;
        if expected.x < 0.0 {
            expected.x = W;
        } else if expected.x > W {
            expected.x = 0.0;
        }
        if expected.y < 0.0 {
            expected.y = H;
        } else if expected.y > H {
            expected.y = 0.0;
        }
        assert_relative_eq!(new.pos.x, expected.x, epsilon = 1e-9);
        assert_relative_eq!(new.pos.y, expected.y, epsilon = 1e-9);
        assert_relative_eq!(new.vel.x, old.vel.x * 0.99, epsilon = 1e-12);
        assert_relative_eq!(new.vel.y, old.vel.y * 0.99, epsilon = 1e-12);
    }
}

#[test]
fn left_edge_wraps_to_canvas_width() {
    let mut engine = mesh(5);
    {
        let p = &mut engine.entities_mut()[0];
        p.pos = DVec2::new(-1.0, 300.0);
        p.vel = DVec2::new(-0.5, 0.0);
    }

    engine.step(&mut NullSurface);

    let p = &engine.entities()[0];
    assert_eq!(p.pos.x, W);
    assert_eq!(p.pos.y, 300.0);
}

#[test]
fn speed_decays_geometrically_without_force() {
    let mut engine = mesh(77);
    let initial: Vec<f64> = engine.entities().iter().map(|p| p.vel.length()).collect();

    let mut previous = initial.clone();
    for n in 1..=120 {
        engine.step(&mut NullSurface);
        for (i, p) in engine.entities().iter().enumerate() {
            let speed = p.vel.length();
            assert_relative_eq!(speed, initial[i] * 0.99f64.powi(n), max_relative = 1e-9);
            if previous[i] > 0.0 {
                assert!(speed < previous[i]);
                assert!(speed > 0.0);
            }
            previous[i] = speed;
        }
    }
}

#[test]
fn pointer_repels_nearby_particle() {
    let mut engine = mesh(8);
    {
        let p = &mut engine.entities_mut()[0];
        p.pos = DVec2::new(400.0, 300.0);
        p.vel = DVec2::ZERO;
    }
    engine.on_pointer_move(DVec2::new(340.0, 300.0));

    engine.step(&mut NullSurface);

    // 0.6 * (120 - 60) / 120, then damped
    let v = engine.entities()[0].vel;
    assert_relative_eq!(v.x, 0.3 * 0.99, epsilon = 1e-12);
    assert_relative_eq!(v.y, 0.0, epsilon = 1e-12);
}

#[test]
fn pointer_out_of_range_or_on_top_applies_no_force() {
    let mut engine = mesh(8);
    {
        let particles = engine.entities_mut();
        particles[0].pos = DVec2::new(400.0, 300.0);
        particles[0].vel = DVec2::ZERO;
        particles[1].pos = DVec2::new(100.0, 100.0);
        particles[1].vel = DVec2::ZERO;
    }
    engine.on_pointer_move(DVec2::new(400.0, 300.0));

    engine.step(&mut NullSurface);

    let particles = engine.entities();
    assert_eq!(particles[0].vel, DVec2::ZERO);
    assert_eq!(particles[0].pos, DVec2::new(400.0, 300.0));
    assert_eq!(particles[1].vel, DVec2::ZERO);
}

#[test]
fn resize_reseeds_for_new_density() {
    let mut engine = mesh(3);
    engine.on_resize(DVec2::new(400.0, 400.0));
    assert_eq!(engine.entities().len(), 20);
    for p in engine.entities() {
        assert!(p.pos.x >= 0.0 && p.pos.x < 400.0);
        assert!(p.pos.y >= 0.0 && p.pos.y < 400.0);
    }
    assert_eq!(engine.viewport().center(), DVec2::new(200.0, 200.0));
}

#[test]
fn draws_a_dot_per_particle_and_a_line_per_close_pair() {
    let mut engine = mesh(21);
    let mut surface = RecordingSurface::default();
    engine.step(&mut surface);

    let particles = engine.entities();
    let mut close_pairs = 0;
    for i in 0..particles.len() {
        for j in i + 1..particles.len() {
            if particles[i].pos.distance(particles[j].pos) < 150.0 {
                close_pairs += 1;
            }
        }
    }
    assert_eq!(surface.discs().count(), 60);
    assert_eq!(surface.lines().count(), close_pairs);
}

#[test]
fn seeded_particles_are_inside_and_slow() {
    let engine = mesh(99);
    for p in engine.entities() {
        assert!(p.pos.x >= 0.0 && p.pos.x < W);
        assert!(p.pos.y >= 0.0 && p.pos.y < H);
        assert!(p.vel.x.abs() <= 0.5 && p.vel.y.abs() <= 0.5);
        assert!(p.radius >= 1.0 && p.radius <= 2.5);
    }
}
