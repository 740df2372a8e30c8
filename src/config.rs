//! Game tuning and player loadout
//!
//! Every field has a default, so a partial JSON document only overrides what
//! it names.

use serde::{Deserialize, Serialize};

use crate::assets::TextureAtlas;
use crate::consts::{MAX_FRAME_DT, MAX_SHOT_DEPTH, POOL_GROWTH, SCALE_DEATH_RATIO};
use crate::error::ConfigError;
use crate::sim::player::{FireBinding, MAX_FIRE_SLOTS};
use crate::sim::projectile::{MotionContext, Playfield};
use crate::sim::shot::{ScaleOption, ShotSpec, TrajectoryOption};
use crate::sim::EntityKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f64,
    pub height: f64,
    /// Distance past the screen edge before an entity counts as gone
    pub margin: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal speed, px/s
    pub speed: f64,
    /// Initial x as a fraction of screen width
    pub start_x_ratio: f64,
    pub start_y: f64,
    /// Default distance above the ship where shots appear
    pub muzzle_offset: f64,
    pub texture: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 300.0,
            start_x_ratio: 0.5,
            start_y: 500.0,
            muzzle_offset: 20.0,
            texture: "playerShip1_blue.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f64,
    pub pool_size: usize,
    pub lifetime_ms: f64,
    pub texture: String,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 600.0,
            pool_size: 30,
            lifetime_ms: 5000.0,
            texture: "laserBlue07.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub speed: f64,
    pub spawn_interval_ms: f64,
    pub pool_size: usize,
    pub score_value: u64,
    pub fire_interval_ms: f64,
    pub texture: String,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed: 120.0,
            spawn_interval_ms: 2000.0,
            pool_size: 10,
            score_value: 100,
            fire_interval_ms: 1500.0,
            texture: "enemyBlack5.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyBulletConfig {
    pub speed: f64,
    pub pool_size: usize,
    pub lifetime_ms: f64,
    pub texture: String,
}

impl Default for EnemyBulletConfig {
    fn default() -> Self {
        Self {
            speed: 400.0,
            pool_size: 50,
            lifetime_ms: 5000.0,
            texture: "laserRed07.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    pub lifetime_ms: f64,
    pub pool_size: usize,
    pub texture: String,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            lifetime_ms: 300.0,
            pool_size: 15,
            texture: "meteorGrey_big1.png".to_string(),
        }
    }
}

/// Engine knobs that are not gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub pool_growth: usize,
    /// Upper clamp on a frame's dt, seconds
    pub max_frame_dt: f64,
    /// Shrinking shots die at `min_scale * scale_death_ratio`
    pub scale_death_ratio: f64,
    pub max_shot_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_growth: POOL_GROWTH,
            max_frame_dt: MAX_FRAME_DT,
            scale_death_ratio: SCALE_DEATH_RATIO,
            max_shot_depth: MAX_SHOT_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub player: PlayerConfig,
    pub bullet: BulletConfig,
    pub enemy: EnemyConfig,
    pub enemy_bullet: EnemyBulletConfig,
    pub explosion: ExplosionConfig,
    pub engine: EngineConfig,
    /// Fire bindings, checked in order every tick
    pub loadout: Vec<FireBinding>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            player: PlayerConfig::default(),
            bullet: BulletConfig::default(),
            enemy: EnemyConfig::default(),
            enemy_bullet: EnemyBulletConfig::default(),
            explosion: ExplosionConfig::default(),
            engine: EngineConfig::default(),
            loadout: default_loadout(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn playfield(&self) -> Playfield {
        Playfield {
            width: self.screen.width,
            height: self.screen.height,
            margin: self.screen.margin,
        }
    }

    pub fn motion_context(&self) -> MotionContext {
        MotionContext {
            playfield: self.playfield(),
            scale_death_ratio: self.engine.scale_death_ratio,
        }
    }

    /// Texture key used by each entity kind when a shot names none
    pub fn texture_key(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::PlayerShot => &self.bullet.texture,
            EntityKind::HostileShot => &self.enemy_bullet.texture,
            EntityKind::Hostile => &self.enemy.texture,
            EntityKind::Effect => &self.explosion.texture,
        }
    }

    pub fn pool_size(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::PlayerShot => self.bullet.pool_size,
            EntityKind::HostileShot => self.enemy_bullet.pool_size,
            EntityKind::Hostile => self.enemy.pool_size,
            EntityKind::Effect => self.explosion.pool_size,
        }
    }

    /// Check everything that would otherwise fail mid-game
    pub fn validate(&self, atlas: &TextureAtlas) -> Result<(), ConfigError> {
        atlas.require_player(&self.player.texture)?;
        for kind in EntityKind::ALL {
            atlas.require(kind, self.texture_key(kind))?;
            if self.pool_size(kind) == 0 {
                return Err(ConfigError::InvalidPool { kind });
            }
        }

        for binding in &self.loadout {
            if binding.slot as usize >= MAX_FIRE_SLOTS {
                return Err(ConfigError::InvalidFireSlot {
                    slot: binding.slot,
                    max: (MAX_FIRE_SLOTS - 1) as u8,
                });
            }
            if !binding.interval_ms.is_finite() || binding.interval_ms <= 0.0 {
                return Err(ConfigError::InvalidFireInterval { slot: binding.slot });
            }
            binding.spec.validate(atlas, self.engine.max_shot_depth)?;
        }
        Ok(())
    }
}

/// The stock loadout: one pattern family per slot
pub fn default_loadout() -> Vec<FireBinding> {
    let cluster = ShotSpec::ring(8, 200.0)
        .with_texture("laserRed07.png")
        .with_scale(ScaleOption::linear(-1.0).with_initial(1.0));

    vec![
        // Single straight shot
        FireBinding::new(0, 150.0, ShotSpec::line(1, 600.0)),
        // 7-way fan
        FireBinding::new(1, 250.0, ShotSpec::fan(7, 550.0, 90.0)),
        // Spinning stream
        FireBinding::new(
            2,
            20.0,
            ShotSpec::line(1, 400.0).with_trajectory(TrajectoryOption::rotary(15.0)),
        ),
        // Wavy line that shrinks away
        FireBinding::new(
            3,
            100.0,
            ShotSpec::line(4, 600.0)
                .with_spacing(30.0)
                .with_trajectory(TrajectoryOption::wave(5.0, 30.0))
                .with_scale(ScaleOption::linear(-0.5).with_initial(1.2)),
        ),
        // Slow, accelerating and shrinking
        FireBinding::new(
            4,
            150.0,
            ShotSpec::line(1, 150.0)
                .with_texture("laserRed07.png")
                .with_speed_mod(400.0)
                .with_scale(ScaleOption::linear(-0.8).with_initial(2.0).with_min(0.1)),
        ),
        // Pulsing ring
        FireBinding::new(
            5,
            1000.0,
            ShotSpec::ring(16, 150.0)
                .with_trajectory(TrajectoryOption::wave(3.0, 10.0))
                .with_scale(ScaleOption::sine(4.0, 0.8, 1.8)),
        ),
        // Growing shell that bursts into a cluster
        FireBinding::new(
            6,
            500.0,
            ShotSpec::line(1, 400.0)
                .with_scale(ScaleOption::linear(0.5).with_initial(1.0).with_max(3.0))
                .with_death_shot(cluster),
        ),
        // Carrier that sprays a small fan while it flies
        FireBinding::new(
            7,
            500.0,
            ShotSpec::line(1, 200.0)
                .with_lifetime(1500.0)
                .with_fire_rate(ShotSpec::fan(3, 300.0, 30.0), 250.0),
        ),
    ]
}
