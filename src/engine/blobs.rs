//! Blobs: a handful of large radial gradients drifting around the centre,
//! pulled by the pointer, with one extra glow that follows it.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use crate::config::BlobConfig;

use super::dynamics::{self, PointerForce};
use super::entity::{Entity, Pointer, Viewport};
use super::surface::{Rgb, Surface};
use super::{uniform, SimRng};

/// Blobs sit at equal angular steps on a ring around the viewport centre.
pub fn seed(cfg: &BlobConfig, size: DVec2, rng: &mut SimRng) -> Vec<Entity> {
    let center = size * 0.5;
    let min_dim = size.min_element().max(0.0);
    let ring = cfg.ring_fraction * min_dim;
    let n = cfg.count.max(1) as f64;

    (0..cfg.count)
        .map(|i| {
            let angle = i as f64 / n * TAU;
            Entity {
                pos: center + DVec2::from_angle(angle) * ring,
                vel: DVec2::new(
                    uniform(rng, -cfg.max_speed, cfg.max_speed),
                    uniform(rng, -cfg.max_speed, cfg.max_speed),
                ),
                radius: (min_dim * uniform(rng, cfg.radius_min, cfg.radius_max)).max(1.0),
                color: Rgb::pick(&cfg.palette, rng.gen_range(0..cfg.palette.len().max(1))),
                ..Entity::default()
            }
        })
        .collect()
}

pub fn force(cfg: &BlobConfig) -> PointerForce {
    PointerForce { mode: cfg.force, radius: cfg.interaction_radius, strength: cfg.force_strength }
}

pub fn step<S: Surface + ?Sized>(
    blobs: &mut [Entity],
    cfg: &BlobConfig,
    viewport: &Viewport,
    pointer: &Pointer,
    surface: &mut S,
) {
    let force = force(cfg);
    for blob in blobs.iter_mut() {
        dynamics::integrate(blob);
        blob.vel += force.delta_v(blob.pos, pointer);
        dynamics::damp(blob, cfg.damping);
        dynamics::respawn_opposite(blob, viewport.size);

        surface.fill_radial(
            blob.pos,
            blob.radius,
            blob.color.with_alpha(cfg.alpha),
            blob.color.with_alpha(0.0),
        );
    }

    if pointer.active {
        surface.fill_radial(
            pointer.pos,
            cfg.pointer_glow_radius,
            cfg.pointer_glow.with_alpha(cfg.pointer_glow_alpha),
            cfg.pointer_glow.with_alpha(0.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn seeded_on_a_ring_around_centre() {
        let cfg = BlobConfig { count: 4, ..BlobConfig::default() };
        let size = DVec2::new(800.0, 600.0);
        let mut rng = SimRng::seed_from_u64(3);
        let blobs = seed(&cfg, size, &mut rng);

        assert_eq!(blobs.len(), 4);
        let ring = 0.25 * 600.0;
        for (i, b) in blobs.iter().enumerate() {
            let offset = b.pos - DVec2::new(400.0, 300.0);
            assert!((offset.length() - ring).abs() < 1e-9);
            let expected = DVec2::from_angle(i as f64 * TAU / 4.0) * ring;
            assert!((offset - expected).length() < 1e-9);
            assert!(b.radius >= 0.18 * 600.0 && b.radius <= 0.32 * 600.0);
        }
    }

    #[test]
    fn degenerate_viewport_still_gives_positive_radius() {
        let mut rng = SimRng::seed_from_u64(3);
        let blobs = seed(&BlobConfig::default(), DVec2::ZERO, &mut rng);
        assert!(blobs.iter().all(|b| b.radius > 0.0));
    }
}
