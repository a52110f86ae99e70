//! Immediate-mode drawing surface the engine rasterizes onto.
//!
//! The engine only needs four primitives. In the browser they map onto a
//! `CanvasRenderingContext2d` (see `wasm::render`); tests use a recording
//! implementation.

use std::fmt;

use glam::DVec2;
use serde::Deserialize;

/// Opaque colour, deserialized from an `[r, g, b]` triple.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(from = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// HSL to RGB. `hue` in degrees (wrapped), `saturation` and `lightness`
    /// in `[0, 1]`.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }

    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba { rgb: self, a: a.clamp(0.0, 1.0) }
    }

    /// Palette lookup that never goes out of range; an empty palette yields white.
    pub fn pick(palette: &[Rgb], index: usize) -> Rgb {
        if palette.is_empty() {
            Rgb::WHITE
        } else {
            palette[index % palette.len()]
        }
    }
}

/// Colour with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f64,
}

/// CSS colour string, e.g. `rgba(99,102,241,0.45)`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{:.2})", self.rgb.r, self.rgb.g, self.rgb.b, self.a)
    }
}

pub trait Surface {
    /// Clear the whole drawing area.
    fn clear(&mut self, size: DVec2);

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba);

    fn fill_disc(&mut self, center: DVec2, radius: f64, color: Rgba);

    /// Disc filled with a radial gradient from `inner` at the centre to
    /// `outer` at `radius`.
    fn fill_radial(&mut self, center: DVec2, radius: f64, inner: Rgba, outer: Rgba);
}

/// Surface that draws nothing.
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self, _size: DVec2) {}
    fn stroke_line(&mut self, _from: DVec2, _to: DVec2, _width: f64, _color: Rgba) {}
    fn fill_disc(&mut self, _center: DVec2, _radius: f64, _color: Rgba) {}
    fn fill_radial(&mut self, _center: DVec2, _radius: f64, _inner: Rgba, _outer: Rgba) {}
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear { size: DVec2 },
    Line { from: DVec2, to: DVec2, width: f64, color: Rgba },
    Disc { center: DVec2, radius: f64, color: Rgba },
    Radial { center: DVec2, radius: f64, inner: Rgba, outer: Rgba },
}

/// Surface that keeps every call, for inspecting what a frame drew.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Line { .. }))
    }

    pub fn discs(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Disc { .. }))
    }

    pub fn radials(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Radial { .. }))
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, size: DVec2) {
        self.calls.push(DrawCall::Clear { size });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.calls.push(DrawCall::Line { from, to, width, color });
    }

    fn fill_disc(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.calls.push(DrawCall::Disc { center, radius, color });
    }

    fn fill_radial(&mut self, center: DVec2, radius: f64, inner: Rgba, outer: Rgba) {
        self.calls.push(DrawCall::Radial { center, radius, inner, outer });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_string_rounds_alpha() {
        let c = Rgb::new(99, 102, 241).with_alpha(0.456);
        assert_eq!(c.to_string(), "rgba(99,102,241,0.46)");
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(Rgb::WHITE.with_alpha(1.7).a, 1.0);
        assert_eq!(Rgb::WHITE.with_alpha(-0.2).a, 0.0);
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hsl(120.0, 1.0, 0.5), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hsl(240.0, 1.0, 0.5), Rgb::new(0, 0, 255));
        assert_eq!(Rgb::from_hsl(600.0, 1.0, 0.5), Rgb::new(0, 0, 255));
    }

    #[test]
    fn pick_wraps_and_handles_empty() {
        let palette = [Rgb::new(1, 1, 1), Rgb::new(2, 2, 2)];
        assert_eq!(Rgb::pick(&palette, 3), Rgb::new(2, 2, 2));
        assert_eq!(Rgb::pick(&[], 3), Rgb::WHITE);
    }
}
