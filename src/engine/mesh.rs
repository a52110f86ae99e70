//! Particle mesh: small particles wrapping at the edges, pushed away by the
//! pointer and linked to every neighbour within the connection distance.

use glam::DVec2;

use crate::config::MeshConfig;

use super::dynamics::{self, PointerForce};
use super::entity::{Entity, Pointer, Viewport};
use super::surface::{Rgb, Surface};
use super::{uniform, SimRng};

/// `min(floor(W * H / density_area), max_count)`; zero for an empty viewport.
pub fn particle_count(cfg: &MeshConfig, size: DVec2) -> usize {
    if size.x <= 0.0 || size.y <= 0.0 {
        return 0;
    }
    let by_area = (size.x * size.y / cfg.density_area).floor() as usize;
    by_area.min(cfg.max_count)
}

pub fn seed(cfg: &MeshConfig, size: DVec2, rng: &mut SimRng) -> Vec<Entity> {
    (0..particle_count(cfg, size))
        .map(|_| Entity {
            pos: DVec2::new(uniform(rng, 0.0, size.x), uniform(rng, 0.0, size.y)),
            vel: DVec2::new(
                uniform(rng, -cfg.max_speed, cfg.max_speed),
                uniform(rng, -cfg.max_speed, cfg.max_speed),
            ),
            radius: uniform(rng, cfg.radius_min, cfg.radius_max),
            color: Rgb::from_hsl(uniform(rng, cfg.hue_min, cfg.hue_max), 0.8, 0.65),
            ..Entity::default()
        })
        .collect()
}

pub fn force(cfg: &MeshConfig) -> PointerForce {
    PointerForce { mode: cfg.force, radius: cfg.interaction_radius, strength: cfg.force_strength }
}

pub fn step<S: Surface + ?Sized>(
    particles: &mut [Entity],
    cfg: &MeshConfig,
    viewport: &Viewport,
    pointer: &Pointer,
    surface: &mut S,
) {
    let force = force(cfg);
    for p in particles.iter_mut() {
        dynamics::integrate(p);
        p.vel += force.delta_v(p.pos, pointer);
        dynamics::damp(p, cfg.damping);
        dynamics::wrap(p, viewport.size);

        surface.fill_disc(p.pos, p.radius, p.color.with_alpha(cfg.dot_alpha));
    }
    link(particles, cfg, surface);
}

/// O(n²) pass over all pairs; the particle count is capped by `max_count`.
fn link<S: Surface + ?Sized>(particles: &[Entity], cfg: &MeshConfig, surface: &mut S) {
    let max_d = cfg.connection_distance;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let d = a.pos.distance(b.pos);
            if d < max_d {
                let alpha = cfg.line_alpha * (1.0 - d / max_d);
                surface.stroke_line(a.pos, b.pos, cfg.line_width, a.color.with_alpha(alpha));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::surface::{DrawCall, RecordingSurface};

    #[test]
    fn count_follows_area_then_caps() {
        let cfg = MeshConfig::default();
        assert_eq!(particle_count(&cfg, DVec2::new(800.0, 600.0)), 60);
        assert_eq!(particle_count(&cfg, DVec2::new(100.0, 79.0)), 0);
        assert_eq!(particle_count(&cfg, DVec2::new(3840.0, 2160.0)), 180);
        assert_eq!(particle_count(&cfg, DVec2::new(0.0, 2160.0)), 0);
    }

    #[test]
    fn link_alpha_falls_off_linearly() {
        let cfg = MeshConfig::default();
        let at = |x: f64| Entity { pos: DVec2::new(x, 0.0), ..Entity::default() };
        let particles = [at(0.0), at(75.0), at(300.0)];

        let mut surface = RecordingSurface::default();
        link(&particles, &cfg, &mut surface);

        // only the 0-75 pair is within 150
        let lines: Vec<_> = surface.lines().collect();
        assert_eq!(lines.len(), 1);
        match lines[0] {
            DrawCall::Line { color, .. } => assert!((color.a - 0.125).abs() < 1e-12),
            other => panic!("unexpected call {other:?}"),
        }
    }
}
