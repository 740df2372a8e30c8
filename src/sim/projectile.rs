//! Projectile motion model
//!
//! Shared per-tick evolution for every shot-like entity. The order inside
//! `advance` is fixed: lifetime, scale, trajectory, speed, position, expiry.
//! Scale and speed decay end the tick immediately and report `Fate::Decayed`,
//! which is the only fate that chains a death shot.

use glam::DVec2;

use super::collision::Aabb;
use super::shot::{ScaleMode, ScaleOption, SpeedOption, TrajectoryOption};
use crate::{sprite_rotation, velocity_from_degrees};

/// How a tick ended for a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Alive,
    /// Left the playfield or outlived its lifetime; never chains
    Expired,
    /// Shrank below its scale floor or slowed to a stop; chains a death shot
    Decayed,
}

/// Screen rectangle plus the off-screen margin entities may drift into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Playfield {
    /// True while `pos` is within the screen grown by the margin
    pub fn contains(&self, pos: DVec2) -> bool {
        pos.x >= -self.margin
            && pos.x <= self.width + self.margin
            && pos.y >= -self.margin
            && pos.y <= self.height + self.margin
    }
}

/// Frame-invariant parameters for `Projectile::advance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionContext {
    pub playfield: Playfield,
    pub scale_death_ratio: f64,
}

/// Launch parameters for a projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Launch {
    pub pos: DVec2,
    pub vel: DVec2,
    pub angle_deg: f64,
    /// Unscaled texture size; hitbox is size * scale * 0.5
    pub size: DVec2,
    pub scale: Option<ScaleOption>,
    pub speed_mod: Option<SpeedOption>,
    pub trajectory: Option<TrajectoryOption>,
    pub max_life_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projectile {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Seconds since launch
    pub life_time: f64,
    pub scale: f64,
    /// Sprite rotation (radians); only WAVE shots update it after launch
    pub rotation: f64,
    pub size: DVec2,
    scale_opt: Option<ScaleOption>,
    speed_opt: Option<SpeedOption>,
    trajectory: Option<TrajectoryOption>,
    initial_angle_deg: f64,
    max_life_ms: f64,
}

impl Projectile {
    pub fn launch(&mut self, launch: Launch) {
        self.pos = launch.pos;
        self.vel = launch.vel;
        self.life_time = 0.0;
        self.size = launch.size;
        self.scale_opt = launch.scale;
        self.speed_opt = launch.speed_mod;
        self.trajectory = launch.trajectory;
        self.initial_angle_deg = launch.angle_deg;
        self.max_life_ms = launch.max_life_ms;
        self.scale = launch.scale.map_or(1.0, |s| s.initial_scale());
        self.rotation = sprite_rotation(launch.vel);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size * self.scale * 0.5)
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Run one tick of motion
    pub fn advance(&mut self, dt: f64, ctx: &MotionContext) -> Fate {
        self.life_time += dt;

        if self.update_scale(dt, ctx.scale_death_ratio) {
            return Fate::Decayed;
        }
        self.update_trajectory();
        if self.update_speed(dt) {
            return Fate::Decayed;
        }

        self.pos += self.vel * dt;

        if self.life_time * 1000.0 > self.max_life_ms || !ctx.playfield.contains(self.pos) {
            return Fate::Expired;
        }
        Fate::Alive
    }

    /// Returns true when the scale reached its death floor
    fn update_scale(&mut self, dt: f64, death_ratio: f64) -> bool {
        let Some(opt) = self.scale_opt else {
            return false;
        };
        let min = opt.min();
        let floor = min * death_ratio;

        self.scale = match opt.mode {
            ScaleMode::Sine => {
                let wave = (1.0 + (self.life_time * opt.rate).sin()) / 2.0;
                min + wave * (opt.max() - min)
            }
            ScaleMode::Linear if opt.rate > 0.0 => (self.scale + opt.rate * dt).min(opt.max()),
            ScaleMode::Linear if opt.rate < 0.0 => (self.scale + opt.rate * dt).max(floor),
            ScaleMode::Linear => self.scale,
        };

        self.scale <= floor
    }

    fn update_trajectory(&mut self) {
        let Some(trajectory) = self.trajectory.filter(|t| t.is_wave()) else {
            return;
        };
        let speed = self.speed();
        if speed == 0.0 {
            return;
        }
        let offset = (self.life_time * trajectory.rate).sin() * trajectory.range_deg();
        self.vel = velocity_from_degrees(speed, self.initial_angle_deg + offset);
        self.rotation = sprite_rotation(self.vel);
    }

    /// Returns true when the shot slowed to a stop
    fn update_speed(&mut self, dt: f64) -> bool {
        let Some(opt) = self.speed_opt else {
            return false;
        };
        let current = self.speed();
        let next = (current + opt.rate * dt).max(0.0);
        if next <= 0.0 {
            self.vel = DVec2::ZERO;
            return true;
        }
        self.vel = if current > 0.0 {
            self.vel * (next / current)
        } else {
            velocity_from_degrees(next, self.initial_angle_deg)
        };
        false
    }
}
