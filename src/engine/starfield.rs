//! Star-field: stars fly from the far plane toward the viewer and are
//! perspective-projected around the vanishing point.

use glam::DVec2;
use rand::Rng;

use crate::config::StarfieldConfig;

use super::entity::{Entity, Viewport};
use super::surface::{Rgb, Surface};
use super::SimRng;

/// Give `star` a fresh lateral position and colour. With `spread` the depth is
/// uniform over `(0, depth]` (initial seeding), otherwise it starts at the far
/// plane.
pub fn reset(star: &mut Entity, cfg: &StarfieldConfig, rng: &mut SimRng, spread: bool) {
    star.pos = DVec2::new(
        (rng.gen::<f64>() - 0.5) * cfg.depth * 2.0,
        (rng.gen::<f64>() - 0.5) * cfg.depth * 2.0,
    );
    // 1 - [0, 1) keeps the depth strictly positive
    star.z = if spread { cfg.depth * (1.0 - rng.gen::<f64>()) } else { cfg.depth };
    star.pz = star.z;
    star.vel = DVec2::ZERO;
    star.radius = star_radius(cfg.depth / star.z);
    star.color = Rgb::pick(&cfg.palette, rng.gen_range(0..cfg.palette.len().max(1)));
}

pub fn seed(cfg: &StarfieldConfig, rng: &mut SimRng) -> Vec<Entity> {
    (0..cfg.count)
        .map(|_| {
            let mut star = Entity::default();
            reset(&mut star, cfg, rng, true);
            star
        })
        .collect()
}

/// Screen position of a lateral point at depth `z`.
pub fn project(lateral: DVec2, z: f64, depth: f64, focus: DVec2) -> DVec2 {
    lateral * (depth / z) + focus
}

fn star_radius(scale: f64) -> f64 {
    (scale * 1.4).max(0.3)
}

fn opacity(z: f64, depth: f64) -> f64 {
    ((1.0 - z / depth) * 0.9 + 0.1).min(0.9)
}

fn off_screen(p: DVec2, size: DVec2, margin: f64) -> bool {
    p.x < -margin || p.x > size.x + margin || p.y < -margin || p.y > size.y + margin
}

pub fn step<S: Surface + ?Sized>(
    stars: &mut [Entity],
    cfg: &StarfieldConfig,
    viewport: &Viewport,
    rng: &mut SimRng,
    surface: &mut S,
) {
    let focus = viewport.focus;
    for star in stars.iter_mut() {
        star.pz = star.z;
        star.z -= cfg.speed;

        if star.z <= cfg.near_plane {
            reset(star, cfg, rng, false);
            continue;
        }

        let scale = cfg.depth / star.z;
        let current = project(star.pos, star.z, cfg.depth, focus);
        let previous = project(star.pos, star.pz, cfg.depth, focus);

        if off_screen(current, viewport.size, cfg.cull_margin) {
            reset(star, cfg, rng, false);
            continue;
        }

        let alpha = opacity(star.z, cfg.depth);
        star.radius = star_radius(scale);

        surface.stroke_line(previous, current, star.radius * 0.55, star.color.with_alpha(alpha * 0.5));
        surface.fill_disc(current, star.radius, star.color.with_alpha(alpha));
    }
}
