//! Declarative shot specifications
//!
//! A `ShotSpec` says where a burst goes (pattern), how each shot's heading
//! evolves (trajectory) and what rides along with it (scale, speed, texture,
//! lifetime, child shots). Specs are immutable; child specs are shared through
//! `Arc`, so a spec tree is always finite. Its depth is still capped at setup
//! by `validate`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assets::TextureAtlas;
use crate::error::ConfigError;
use crate::sim::EntityKind;

/// Spatial placement of a burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pattern {
    /// All shots share one heading; optional lateral spacing
    #[default]
    Line,
    /// Shots spread evenly across an arc centred on the base angle
    Fan,
    /// Shots spread evenly around a full circle
    Ring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrajectoryMode {
    /// Heading never changes after launch
    #[default]
    Fixed,
    /// The emitter's base angle advances by `rate` degrees per fire call
    Rotary,
    /// Heading oscillates around the launch angle by ±`range` at `rate` rad/s
    Wave,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryOption {
    pub mode: TrajectoryMode,
    pub rate: f64,
    /// Oscillation amplitude in degrees (WAVE only)
    #[serde(default)]
    pub range: Option<f64>,
}

impl TrajectoryOption {
    pub fn rotary(rate: f64) -> Self {
        Self {
            mode: TrajectoryMode::Rotary,
            rate,
            range: None,
        }
    }

    pub fn wave(rate: f64, range: f64) -> Self {
        Self {
            mode: TrajectoryMode::Wave,
            rate,
            range: Some(range),
        }
    }

    pub fn range_deg(&self) -> f64 {
        self.range.unwrap_or(crate::consts::DEFAULT_WAVE_RANGE_DEG)
    }

    pub fn is_wave(&self) -> bool {
        self.mode == TrajectoryMode::Wave
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScaleMode {
    /// scale += rate * dt, bounded by min/max
    #[default]
    Linear,
    /// scale follows a sine of lifetime between min and max
    Sine,
}

/// Time-varying visual (and hitbox) scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleOption {
    #[serde(default)]
    pub mode: ScaleMode,
    /// Units per second (LINEAR) or angular frequency (SINE)
    pub rate: f64,
    #[serde(default)]
    pub min_scale: Option<f64>,
    #[serde(default)]
    pub max_scale: Option<f64>,
    #[serde(default)]
    pub initial: Option<f64>,
}

impl ScaleOption {
    pub fn linear(rate: f64) -> Self {
        Self {
            mode: ScaleMode::Linear,
            rate,
            min_scale: None,
            max_scale: None,
            initial: None,
        }
    }

    pub fn sine(rate: f64, min_scale: f64, max_scale: f64) -> Self {
        Self {
            mode: ScaleMode::Sine,
            rate,
            min_scale: Some(min_scale),
            max_scale: Some(max_scale),
            initial: None,
        }
    }

    pub fn with_initial(mut self, initial: f64) -> Self {
        self.initial = Some(initial);
        self
    }

    pub fn with_min(mut self, min_scale: f64) -> Self {
        self.min_scale = Some(min_scale);
        self
    }

    pub fn with_max(mut self, max_scale: f64) -> Self {
        self.max_scale = Some(max_scale);
        self
    }

    pub fn initial_scale(&self) -> f64 {
        self.initial.unwrap_or(1.0)
    }

    pub fn min(&self) -> f64 {
        match self.mode {
            ScaleMode::Linear => self.min_scale.unwrap_or(0.1),
            ScaleMode::Sine => self.min_scale.unwrap_or(0.5),
        }
    }

    pub fn max(&self) -> f64 {
        match self.mode {
            ScaleMode::Linear => self.max_scale.unwrap_or(f64::INFINITY),
            ScaleMode::Sine => self.max_scale.unwrap_or(1.5),
        }
    }
}

/// Scalar acceleration applied along the current heading (px/s²)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedOption {
    pub rate: f64,
}

/// A child spec fired periodically while the parent shot is alive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireRateSpec {
    pub shot: Arc<ShotSpec>,
    pub interval_ms: f64,
}

/// One firing action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotSpec {
    #[serde(default)]
    pub pattern: Pattern,
    pub count: u32,
    /// Launch speed (px/s)
    pub speed: f64,
    /// Heading of the burst centre; the caller's default applies when unset
    #[serde(default)]
    pub base_angle_deg: Option<f64>,
    /// FAN arc width (degrees)
    #[serde(default)]
    pub angle: Option<f64>,
    /// LINE lateral spacing (px)
    #[serde(default)]
    pub spacing: Option<f64>,
    #[serde(default)]
    pub trajectory: Option<TrajectoryOption>,
    #[serde(default)]
    pub scale: Option<ScaleOption>,
    #[serde(default)]
    pub speed_mod: Option<SpeedOption>,
    #[serde(default)]
    pub texture_key: Option<String>,
    /// Overrides the configured maximum shot lifetime
    #[serde(default)]
    pub lifetime_ms: Option<f64>,
    /// Vertical muzzle offset when the player fires this spec
    #[serde(default)]
    pub offset_y: Option<f64>,
    #[serde(default)]
    pub on_death_shot: Option<Arc<ShotSpec>>,
    #[serde(default)]
    pub fire_rate: Option<FireRateSpec>,
}

impl ShotSpec {
    pub fn new(pattern: Pattern, count: u32, speed: f64) -> Self {
        Self {
            pattern,
            count,
            speed,
            base_angle_deg: None,
            angle: None,
            spacing: None,
            trajectory: None,
            scale: None,
            speed_mod: None,
            texture_key: None,
            lifetime_ms: None,
            offset_y: None,
            on_death_shot: None,
            fire_rate: None,
        }
    }

    pub fn line(count: u32, speed: f64) -> Self {
        Self::new(Pattern::Line, count, speed)
    }

    pub fn fan(count: u32, speed: f64, arc_deg: f64) -> Self {
        Self {
            angle: Some(arc_deg),
            ..Self::new(Pattern::Fan, count, speed)
        }
    }

    pub fn ring(count: u32, speed: f64) -> Self {
        Self::new(Pattern::Ring, count, speed)
    }

    pub fn with_base_angle(mut self, deg: f64) -> Self {
        self.base_angle_deg = Some(deg);
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_trajectory(mut self, trajectory: TrajectoryOption) -> Self {
        self.trajectory = Some(trajectory);
        self
    }

    pub fn with_scale(mut self, scale: ScaleOption) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_speed_mod(mut self, rate: f64) -> Self {
        self.speed_mod = Some(SpeedOption { rate });
        self
    }

    pub fn with_texture(mut self, key: impl Into<String>) -> Self {
        self.texture_key = Some(key.into());
        self
    }

    pub fn with_lifetime(mut self, lifetime_ms: f64) -> Self {
        self.lifetime_ms = Some(lifetime_ms);
        self
    }

    pub fn with_death_shot(mut self, child: ShotSpec) -> Self {
        self.on_death_shot = Some(Arc::new(child));
        self
    }

    pub fn with_fire_rate(mut self, child: ShotSpec, interval_ms: f64) -> Self {
        self.fire_rate = Some(FireRateSpec {
            shot: Arc::new(child),
            interval_ms,
        });
        self
    }

    /// Levels of nesting, counting this spec as 1
    pub fn depth(&self) -> usize {
        let death = self.on_death_shot.as_ref().map_or(0, |s| s.depth());
        let periodic = self.fire_rate.as_ref().map_or(0, |f| f.shot.depth());
        1 + death.max(periodic)
    }

    /// Reject specs that could never work at runtime; warn about ones that merely degrade
    pub fn validate(&self, atlas: &TextureAtlas, max_depth: usize) -> Result<(), ConfigError> {
        let depth = self.depth();
        if depth > max_depth {
            return Err(ConfigError::ShotTooDeep {
                depth,
                max: max_depth,
            });
        }
        self.validate_node(atlas)
    }

    fn validate_node(&self, atlas: &TextureAtlas) -> Result<(), ConfigError> {
        if let Some(key) = &self.texture_key {
            atlas.require(EntityKind::PlayerShot, key)?;
        }
        if self.count == 0 {
            log::warn!("{:?} shot spec has count 0 and will fire nothing", self.pattern);
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            log::warn!("shot spec speed {} is invalid and will fire nothing", self.speed);
        }
        if let Some(fire_rate) = &self.fire_rate {
            if fire_rate.interval_ms <= 0.0 {
                log::warn!("fire-rate interval {} ms is ignored", fire_rate.interval_ms);
            }
            fire_rate.shot.validate_node(atlas)?;
        }
        if let Some(child) = &self.on_death_shot {
            child.validate_node(atlas)?;
        }
        Ok(())
    }

    /// Every texture key reachable from this spec
    pub fn texture_keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_texture_keys(&mut keys);
        keys
    }

    fn collect_texture_keys<'a>(&'a self, keys: &mut Vec<&'a str>) {
        if let Some(key) = &self.texture_key {
            keys.push(key);
        }
        if let Some(child) = &self.on_death_shot {
            child.collect_texture_keys(keys);
        }
        if let Some(fire_rate) = &self.fire_rate {
            fire_rate.shot.collect_texture_keys(keys);
        }
    }
}
