//! Barrage - simulation core of a 2D arcade shoot-em-up
//!
//! Core modules:
//! - `sim`: Pooled entities, shot-pattern resolution, per-frame pipeline
//! - `config`: Data-driven tuning and player loadout
//! - `assets`: Host-provided texture lookup
//! - `error`: Setup-time configuration errors

pub mod assets;
pub mod config;
pub mod error;
pub mod sim;

pub use assets::{TextureAtlas, TextureId, TextureInfo};
pub use config::GameConfig;
pub use error::ConfigError;

use glam::DVec2;

/// Engine constants that are not part of gameplay tuning
pub mod consts {
    /// Default firing direction in degrees (screen "up"; 0° = right, 90° = down)
    pub const DEFAULT_FIRE_ANGLE_DEG: f64 = 270.0;
    /// Default FAN arc width when a spec leaves it unset (degrees)
    pub const DEFAULT_FAN_ARC_DEG: f64 = 60.0;
    /// Default WAVE amplitude when a spec leaves it unset (degrees)
    pub const DEFAULT_WAVE_RANGE_DEG: f64 = 30.0;
    /// Pools grow by this many instances when exhausted
    pub const POOL_GROWTH: usize = 5;
    /// Largest dt accepted per frame (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;
    /// A shrinking shot dies once its scale reaches min_scale * this ratio
    pub const SCALE_DEATH_RATIO: f64 = 0.2;
    /// Deepest allowed nesting of death-shot / fire-rate specs
    pub const MAX_SHOT_DEPTH: usize = 8;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a < 0.0 { a + 360.0 } else { a }
}

/// Velocity of magnitude `speed` heading `angle_deg` (0° = right, 90° = down)
#[inline]
pub fn velocity_from_degrees(speed: f64, angle_deg: f64) -> DVec2 {
    let rad = angle_deg.to_radians();
    DVec2::new(speed * rad.cos(), speed * rad.sin())
}

/// Heading of a velocity in degrees, same convention as `velocity_from_degrees`
#[inline]
pub fn heading_degrees(vel: DVec2) -> f64 {
    vel.y.atan2(vel.x).to_degrees()
}

/// Sprite rotation (radians) for a texture drawn pointing up
#[inline]
pub fn sprite_rotation(vel: DVec2) -> f64 {
    vel.y.atan2(vel.x) + std::f64::consts::FRAC_PI_2
}
