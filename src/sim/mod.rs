//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders, plays audio
//! or reads devices:
//! - Variable timestep, clamped per frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each kind)

pub mod collision;
pub mod entities;
pub mod fire;
pub mod manager;
pub mod player;
pub mod pool;
pub mod projectile;
pub mod shot;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Collider, check_aabb_collision};
pub use entities::{Effect, EntityKind, Hostile, HostileShot, PlayerShot, Visual};
pub use fire::{Emitter, ShotRequest, resolve_shots};
pub use manager::{EntityManager, SimCommand, SimEvent, clamp_dt};
pub use player::{Control, FireBinding, InputSource, Player};
pub use pool::{Handle, Pool, Poolable};
pub use projectile::{Fate, MotionContext, Playfield, Projectile};
pub use shot::{
    FireRateSpec, Pattern, ScaleMode, ScaleOption, ShotSpec, SpeedOption, TrajectoryMode,
    TrajectoryOption,
};
pub use state::{GameState, ScoreKeeper};
pub use tick::{TickInput, tick};
