//! Particle/field simulator shared by the three backdrop variants.
//!
//! [`Engine`] owns the entity set together with viewport and pointer state.
//! Observers (resize, pointer) only write viewport/pointer fields, the mesh
//! reseed on resize aside; [`Engine::step`] advances and rasterizes one frame.

pub mod blobs;
pub mod dynamics;
pub mod entity;
pub mod frame;
pub mod mesh;
pub mod starfield;
pub mod surface;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{SimConfig, Variant};

use entity::{Entity, Pointer, Viewport};
use surface::Surface;

pub type SimRng = ChaCha8Rng;

/// Uniform sample in `[lo, hi)`; returns `lo` when the range is empty.
pub(crate) fn uniform(rng: &mut SimRng, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.gen::<f64>()
}

pub struct Engine {
    config: SimConfig,
    viewport: Viewport,
    pointer: Pointer,
    entities: Vec<Entity>,
    rng: SimRng,
    initialized: bool,
    frame: u64,
}

impl Engine {
    /// Engine with no entities yet; [`Engine::initialize`] seeds them.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            pointer: Pointer::default(),
            entities: Vec::new(),
            rng: SimRng::seed_from_u64(seed),
            initialized: false,
            frame: 0,
        }
    }

    pub fn initialized(config: SimConfig, size: DVec2, seed: u64) -> Self {
        let mut engine = Self::new(config, seed);
        engine.initialize(size);
        engine
    }

    /// Seed all entities for `size`. Calling it again reseeds from scratch.
    pub fn initialize(&mut self, size: DVec2) {
        self.viewport = Viewport::new(size);
        self.reseed();
        self.initialized = true;
    }

    /// Initialize only if that never happened, e.g. when the loop resumes.
    pub fn ensure_initialized(&mut self, size: DVec2) {
        if !self.initialized {
            self.initialize(size);
        }
    }

    pub fn on_resize(&mut self, size: DVec2) {
        self.viewport.size = size;
        if !self.initialized {
            self.viewport.recenter();
            return;
        }
        match self.config.variant {
            Variant::Mesh => {
                self.viewport.recenter();
                self.reseed();
            }
            Variant::Starfield | Variant::Blobs => self.viewport.recenter(),
        }
    }

    /// Record the pointer. The star-field also retargets its vanishing point
    /// to a blend of pointer and centre; easing happens in [`Engine::step`].
    pub fn on_pointer_move(&mut self, pos: DVec2) {
        self.pointer = Pointer { pos, active: true };
        if self.config.variant == Variant::Starfield {
            let w = self.config.starfield.pointer_weight;
            self.viewport.target_focus = pos * w + self.viewport.size * ((1.0 - w) * 0.5);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer.active = false;
        self.viewport.target_focus = self.viewport.center();
    }

    /// Advance and draw one frame. Returns `false` when the frame was skipped
    /// (not initialized yet, or a zero-sized viewport).
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.initialized || self.viewport.is_degenerate() {
            return false;
        }
        let Self { config, viewport, pointer, entities, rng, .. } = self;

        if config.variant == Variant::Starfield {
            viewport.ease_focus(config.starfield.focus_easing);
        }
        surface.clear(viewport.size);

        match config.variant {
            Variant::Starfield => {
                starfield::step(entities, &config.starfield, viewport, rng, surface)
            }
            Variant::Blobs => blobs::step(entities, &config.blobs, viewport, pointer, surface),
            Variant::Mesh => mesh::step(entities, &config.mesh, viewport, pointer, surface),
        }

        self.frame += 1;
        true
    }

    fn reseed(&mut self) {
        let size = self.viewport.size;
        self.entities = match self.config.variant {
            Variant::Starfield => starfield::seed(&self.config.starfield, &mut self.rng),
            Variant::Blobs => blobs::seed(&self.config.blobs, size, &mut self.rng),
            Variant::Mesh => mesh::seed(&self.config.mesh, size, &mut self.rng),
        };
        log::debug!(
            "seeded {} {:?} entities for {}x{}",
            self.entities.len(),
            self.config.variant,
            size.x,
            size.y
        );
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
