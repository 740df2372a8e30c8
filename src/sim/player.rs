//! Player ship: movement, fire bindings and hit counting

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Collider};
use super::fire::{Emitter, ShotRequest};
use super::shot::ShotSpec;
use crate::assets::{TextureAtlas, TextureId};
use crate::config::GameConfig;
use crate::consts::DEFAULT_FIRE_ANGLE_DEG;
use crate::error::ConfigError;

/// Number of distinct fire slots an input source can report
pub const MAX_FIRE_SLOTS: usize = 8;

/// Abstract controls, decoupled from any keyboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Fire(u8),
}

/// Anything that can report which controls are held this tick
pub trait InputSource {
    fn is_down(&self, control: Control) -> bool;
}

/// A shot spec bound to a fire slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireBinding {
    pub slot: u8,
    /// Minimum time since the previous player shot, any binding
    pub interval_ms: f64,
    pub spec: ShotSpec,
}

impl FireBinding {
    pub fn new(slot: u8, interval_ms: f64, spec: ShotSpec) -> Self {
        Self {
            slot,
            interval_ms,
            spec,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    active: bool,
    pub pos: DVec2,
    /// Hitbox, equal to the texture size
    pub size: DVec2,
    pub texture: TextureId,
    pub hits: u32,
    speed: f64,
    screen_width: f64,
    muzzle_offset: f64,
    bindings: Vec<FireBinding>,
    emitter: Emitter,
    clock_ms: f64,
    last_shot_ms: f64,
}

impl Player {
    pub fn new(config: &GameConfig, atlas: &TextureAtlas) -> Result<Self, ConfigError> {
        let texture = atlas.require_player(&config.player.texture)?;
        Ok(Self {
            active: true,
            pos: DVec2::new(
                config.screen.width * config.player.start_x_ratio,
                config.player.start_y,
            ),
            size: texture.size(),
            texture: texture.id,
            hits: 0,
            speed: config.player.speed,
            screen_width: config.screen.width,
            muzzle_offset: config.player.muzzle_offset,
            bindings: config.loadout.clone(),
            emitter: Emitter::new(),
            clock_ms: 0.0,
            last_shot_ms: f64::NEG_INFINITY,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn bindings(&self) -> &[FireBinding] {
        &self.bindings
    }

    /// Apply one tick of held controls, pushing any fired shots into `out`
    pub fn handle_input(&mut self, input: &impl InputSource, dt: f64, out: &mut Vec<ShotRequest>) {
        self.clock_ms += dt * 1000.0;
        if !self.active {
            return;
        }

        let half_width = self.size.x / 2.0;
        if input.is_down(Control::MoveLeft) {
            self.pos.x = (self.pos.x - self.speed * dt).max(half_width);
        }
        if input.is_down(Control::MoveRight) {
            self.pos.x = (self.pos.x + self.speed * dt).min(self.screen_width - half_width);
        }

        for binding in &self.bindings {
            if !input.is_down(Control::Fire(binding.slot)) {
                continue;
            }
            if self.clock_ms - self.last_shot_ms <= binding.interval_ms {
                continue;
            }
            let origin = muzzle(self.pos, &binding.spec, self.muzzle_offset);
            self.emitter
                .fire(&binding.spec, origin, DEFAULT_FIRE_ANGLE_DEG, out);
            self.last_shot_ms = self.clock_ms;
        }
    }

    /// Fire `spec` right now, ignoring the cooldown
    pub fn fire(&mut self, spec: &ShotSpec, out: &mut Vec<ShotRequest>) {
        let origin = muzzle(self.pos, spec, self.muzzle_offset);
        self.emitter.fire(spec, origin, DEFAULT_FIRE_ANGLE_DEG, out);
    }

    pub fn update(&mut self, dt: f64) {
        self.emitter.advance(dt);
    }

    pub fn take_hit(&mut self) {
        self.hits += 1;
        log::debug!("player hit ({} total)", self.hits);
    }
}

fn muzzle(pos: DVec2, spec: &ShotSpec, default_offset: f64) -> DVec2 {
    DVec2::new(pos.x, pos.y - spec.offset_y.unwrap_or(default_offset))
}

impl Collider for Player {
    fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}
