//! Backdrop configuration.
//!
//! Every tuning constant of the three variants lives here with its default
//! value, so a page can override any of them from the canvas' `data-backdrop`
//! attribute:
//!
//! ```json
//! {
//!   "variant": "mesh",
//!   "seed": 7,
//!   "mesh": { "connection_distance": 120.0, "max_count": 120 }
//! }
//! ```
//!
//! Missing fields fall back to their defaults; [`SimConfig::validate`] rejects
//! values that would break the engine's invariants.

use serde::Deserialize;
use thiserror::Error;

use crate::engine::surface::Rgb;

/// Which behaviour mode the engine runs.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[serde(rename = "starfield", alias = "stars")]
    #[default]
    Starfield,

    #[serde(rename = "blobs", alias = "magneto")]
    Blobs,

    #[serde(rename = "mesh", alias = "neural")]
    Mesh,
}

/// Sign of the pointer force.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Entity is pulled toward the pointer.
    #[serde(rename = "attract")]
    Attract,
    /// Entity is pushed away from the pointer.
    #[serde(rename = "repel")]
    Repel,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed backdrop config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid backdrop config `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// 3D star-field flying toward the viewer.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    pub depth: f64,           // far plane, stars spawn here
    pub speed: f64,           // depth units per frame
    pub near_plane: f64,      // reset when z <= near_plane
    pub cull_margin: f64,     // px beyond the viewport before a star is reset
    pub focus_easing: f64,    // vanishing point lerp factor per frame
    pub pointer_weight: f64,  // share of the pointer in the target vanishing point
    pub palette: Vec<Rgb>,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 280,
            depth: 1000.0,
            speed: 2.8,
            near_plane: 1.0,
            cull_margin: 20.0,
            focus_easing: 0.055,
            pointer_weight: 0.7,
            palette: vec![
                Rgb::new(99, 102, 241),  // indigo
                Rgb::new(139, 92, 246),  // violet
                Rgb::new(6, 182, 212),   // cyan
                Rgb::new(168, 85, 247),  // purple
                Rgb::new(120, 160, 255), // blue
            ],
        }
    }
}

/// Large soft blobs drifting around the centre.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BlobConfig {
    pub count: usize,
    pub ring_fraction: f64, // seed ring radius as a fraction of min(W, H)
    pub radius_min: f64,    // blob radius as a fraction of min(W, H)
    pub radius_max: f64,
    pub max_speed: f64,
    pub damping: f64,
    pub interaction_radius: f64,
    pub force_strength: f64,
    pub force: ForceMode,
    pub alpha: f64,
    pub pointer_glow_radius: f64,
    pub pointer_glow: Rgb,
    pub pointer_glow_alpha: f64,
    pub palette: Vec<Rgb>,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            count: 6,
            ring_fraction: 0.25,
            radius_min: 0.18,
            radius_max: 0.32,
            max_speed: 1.2,
            damping: 0.98,
            interaction_radius: 420.0,
            force_strength: 0.35,
            force: ForceMode::Attract,
            alpha: 0.35,
            pointer_glow_radius: 260.0,
            pointer_glow: Rgb::new(139, 92, 246),
            pointer_glow_alpha: 0.25,
            palette: vec![
                Rgb::new(99, 102, 241),
                Rgb::new(139, 92, 246),
                Rgb::new(6, 182, 212),
                Rgb::new(168, 85, 247),
            ],
        }
    }
}

/// Density-sized particle mesh with distance-faded links.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MeshConfig {
    pub density_area: f64, // px² of viewport per particle
    pub max_count: usize,
    pub max_speed: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub damping: f64,
    pub interaction_radius: f64,
    pub force_strength: f64,
    pub force: ForceMode,
    pub connection_distance: f64,
    pub line_alpha: f64,
    pub line_width: f64,
    pub dot_alpha: f64,
    pub hue_min: f64,
    pub hue_max: f64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            density_area: 8000.0,
            max_count: 180,
            max_speed: 0.5,
            radius_min: 1.0,
            radius_max: 2.5,
            damping: 0.99,
            interaction_radius: 120.0,
            force_strength: 0.6,
            force: ForceMode::Repel,
            connection_distance: 150.0,
            line_alpha: 0.25,
            line_width: 0.6,
            dot_alpha: 0.8,
            hue_min: 220.0,
            hue_max: 290.0,
        }
    }
}

/// Top-level configuration.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SimConfig {
    pub variant: Variant,
    pub seed: Option<u64>, // fixed seed for reproducible runs, clock-seeded otherwise
    pub parallax_selector: Option<String>, // element shifted slightly with the pointer
    pub starfield: StarfieldConfig,
    pub blobs: BlobConfig,
    pub mesh: MeshConfig,
}

impl SimConfig {
    /// Parse and validate a JSON document. An empty string yields the defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_variant(variant: Variant) -> Self {
        Self { variant, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.starfield;
        check(s.depth > s.near_plane, "starfield.depth", "must exceed near_plane")?;
        check(s.near_plane > 0.0, "starfield.near_plane", "must be positive")?;
        check(s.speed > 0.0, "starfield.speed", "must be positive")?;
        check(s.cull_margin >= 0.0, "starfield.cull_margin", "must not be negative")?;
        check(unit(s.focus_easing), "starfield.focus_easing", "must be in (0, 1]")?;
        check(
            (0.0..=1.0).contains(&s.pointer_weight),
            "starfield.pointer_weight",
            "must be in [0, 1]",
        )?;

        let b = &self.blobs;
        check(damping(b.damping), "blobs.damping", "must be in (0, 1)")?;
        check(b.radius_min > 0.0, "blobs.radius_min", "must be positive")?;
        check(b.radius_max >= b.radius_min, "blobs.radius_max", "must be >= radius_min")?;
        check(b.max_speed >= 0.0, "blobs.max_speed", "must not be negative")?;
        check(b.interaction_radius > 0.0, "blobs.interaction_radius", "must be positive")?;

        let m = &self.mesh;
        check(damping(m.damping), "mesh.damping", "must be in (0, 1)")?;
        check(m.density_area > 0.0, "mesh.density_area", "must be positive")?;
        check(m.radius_min > 0.0, "mesh.radius_min", "must be positive")?;
        check(m.radius_max >= m.radius_min, "mesh.radius_max", "must be >= radius_min")?;
        check(m.max_speed >= 0.0, "mesh.max_speed", "must not be negative")?;
        check(m.interaction_radius > 0.0, "mesh.interaction_radius", "must be positive")?;
        check(m.connection_distance > 0.0, "mesh.connection_distance", "must be positive")?;
        check(m.hue_max >= m.hue_min, "mesh.hue_max", "must be >= hue_min")?;
        Ok(())
    }
}

fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason })
    }
}

fn unit(v: f64) -> bool {
    v > 0.0 && v <= 1.0
}

fn damping(v: f64) -> bool {
    v > 0.0 && v < 1.0
}
