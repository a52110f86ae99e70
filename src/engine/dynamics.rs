//! Per-entity motion: integration, pointer force, damping and boundary policy.
//!
//! Every function here touches a single entity so the engine can run the
//! whole update for one entity before moving on to the next.

use glam::DVec2;

use crate::config::ForceMode;

use super::entity::{Entity, Pointer};

/// Pointer force term: linear falloff inside `radius`.
#[derive(Debug, Clone, Copy)]
pub struct PointerForce {
    pub mode: ForceMode,
    pub radius: f64,
    pub strength: f64,
}

impl PointerForce {
    /// Velocity change for an entity at `pos`, or zero when the pointer is
    /// inactive, out of range, or exactly on top of the entity.
    pub fn delta_v(&self, pos: DVec2, pointer: &Pointer) -> DVec2 {
        if !pointer.active {
            return DVec2::ZERO;
        }
        let to_pointer = pointer.pos - pos;
        let d = to_pointer.length();
        if d == 0.0 || d >= self.radius {
            return DVec2::ZERO;
        }
        let dir = match self.mode {
            ForceMode::Attract => to_pointer / d,
            ForceMode::Repel => -to_pointer / d,
        };
        dir * self.strength * (self.radius - d) / self.radius
    }
}

/// Explicit Euler drift, one frame.
pub fn integrate(e: &mut Entity) {
    e.pos += e.vel;
}

pub fn damp(e: &mut Entity, damping: f64) {
    e.vel *= damping;
}

/// Re-enter at the opposite edge once past it (particle mesh).
pub fn wrap(e: &mut Entity, size: DVec2) {
    if e.pos.x < 0.0 {
        e.pos.x = size.x;
    } else if e.pos.x > size.x {
        e.pos.x = 0.0;
    }
    if e.pos.y < 0.0 {
        e.pos.y = size.y;
    } else if e.pos.y > size.y {
        e.pos.y = 0.0;
    }
}

/// Teleport to the opposite edge once fully outside by the entity's own
/// radius (blobs). The entity reappears just off-screen on the other side.
pub fn respawn_opposite(e: &mut Entity, size: DVec2) {
    let r = e.radius;
    if e.pos.x < -r {
        e.pos.x = size.x + r;
    } else if e.pos.x > size.x + r {
        e.pos.x = -r;
    }
    if e.pos.y < -r {
        e.pos.y = size.y + r;
    } else if e.pos.y > size.y + r {
        e.pos.y = -r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_at(x: f64, y: f64) -> Pointer {
        Pointer { pos: DVec2::new(x, y), active: true }
    }

    const REPEL: PointerForce = PointerForce { mode: ForceMode::Repel, radius: 100.0, strength: 1.0 };

    #[test]
    fn repel_points_away_with_linear_falloff() {
        let dv = REPEL.delta_v(DVec2::new(75.0, 0.0), &active_at(0.0, 0.0));
        assert!((dv.x - 0.25).abs() < 1e-12);
        assert_eq!(dv.y, 0.0);
    }

    #[test]
    fn attract_points_toward_pointer() {
        let f = PointerForce { mode: ForceMode::Attract, ..REPEL };
        let dv = f.delta_v(DVec2::new(0.0, 50.0), &active_at(0.0, 0.0));
        assert!((dv.y + 0.5).abs() < 1e-12);
    }

    #[test]
    fn no_force_outside_radius_inactive_or_coincident() {
        assert_eq!(REPEL.delta_v(DVec2::new(100.0, 0.0), &active_at(0.0, 0.0)), DVec2::ZERO);
        let idle = Pointer { pos: DVec2::ZERO, active: false };
        assert_eq!(REPEL.delta_v(DVec2::new(10.0, 0.0), &idle), DVec2::ZERO);
        let dv = REPEL.delta_v(DVec2::new(5.0, 5.0), &active_at(5.0, 5.0));
        assert_eq!(dv, DVec2::ZERO);
        assert!(dv.is_finite());
    }

    #[test]
    fn blob_respawns_only_past_its_radius() {
        let size = DVec2::new(800.0, 600.0);
        let mut e = Entity { pos: DVec2::new(-30.0, 300.0), radius: 40.0, ..Entity::default() };
        respawn_opposite(&mut e, size);
        assert_eq!(e.pos.x, -30.0);

        e.pos.x = -41.0;
        respawn_opposite(&mut e, size);
        assert_eq!(e.pos.x, 840.0);

        e.pos.y = 641.0;
        respawn_opposite(&mut e, size);
        assert_eq!(e.pos.y, -40.0);
    }

    #[test]
    fn wrap_moves_to_opposite_edge() {
        let size = DVec2::new(800.0, 600.0);
        let mut e = Entity { pos: DVec2::new(801.0, -0.1), ..Entity::default() };
        wrap(&mut e, size);
        assert_eq!(e.pos, DVec2::new(0.0, 600.0));
    }
}
