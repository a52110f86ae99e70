//! Entity, viewport and pointer state.

use glam::DVec2;

use super::surface::Rgb;

/// One simulated star, blob or particle. Fields a variant does not use stay
/// at their defaults (stars have no velocity; blobs and particles no depth).
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub pos: DVec2, // screen px (blob, mesh) or lateral world units (star)
    pub vel: DVec2,
    pub z: f64,  // depth, star-field only
    pub pz: f64, // depth one frame ago, for the trail
    pub radius: f64,
    pub color: Rgb,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            pos: DVec2::ZERO,
            vel: DVec2::ZERO,
            z: 0.0,
            pz: 0.0,
            radius: 1.0,
            color: Rgb::WHITE,
        }
    }
}

/// Drawing surface extent plus the star-field vanishing point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: DVec2,
    pub focus: DVec2,
    pub target_focus: DVec2,
}

impl Viewport {
    pub fn new(size: DVec2) -> Self {
        let center = size * 0.5;
        Self { size, focus: center, target_focus: center }
    }

    pub fn center(&self) -> DVec2 {
        self.size * 0.5
    }

    /// True when there is nothing to draw onto.
    pub fn is_degenerate(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    pub fn recenter(&mut self) {
        self.focus = self.center();
        self.target_focus = self.focus;
    }

    /// Ease the focus point toward its target by `easing` of the gap.
    pub fn ease_focus(&mut self, easing: f64) {
        self.focus += (self.target_focus - self.focus) * easing;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DVec2::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub pos: DVec2,
    pub active: bool,
}

/// Translation in px applied to the hero content so it drifts with the
/// pointer: up to 6px horizontally and 4px vertically from centre.
pub fn parallax_offset(pointer: DVec2, viewport: DVec2) -> DVec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return DVec2::ZERO;
    }
    let c = (pointer / viewport - 0.5) * 2.0;
    DVec2::new(c.x * 6.0, c.y * 4.0)
}
