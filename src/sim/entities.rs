//! Pooled entity kinds
//!
//! The set of kinds is closed: player shots, hostile shots, hostile spawners
//! and transient effects. Each is a plain struct recycled by its own `Pool`;
//! `EntityKind` tags them wherever the manager needs to talk about a kind
//! without holding one.

use std::fmt;
use std::sync::Arc;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Collider};
use super::fire::{Emitter, ShotRequest};
use super::manager::SimCommand;
use super::pool::Poolable;
use super::projectile::{Fate, Launch, MotionContext, Playfield, Projectile};
use super::shot::{FireRateSpec, ShotSpec};
use crate::assets::{TextureId, TextureInfo};
use crate::consts::DEFAULT_FIRE_ANGLE_DEG;

/// Entity kinds managed by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    PlayerShot,
    HostileShot,
    Hostile,
    Effect,
}

impl EntityKind {
    /// Update order within a frame
    pub const ALL: [EntityKind; 4] = [
        EntityKind::PlayerShot,
        EntityKind::Hostile,
        EntityKind::HostileShot,
        EntityKind::Effect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::PlayerShot => "player shot",
            EntityKind::HostileShot => "hostile shot",
            EntityKind::Hostile => "hostile",
            EntityKind::Effect => "effect",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// What a renderer needs to draw one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub kind: EntityKind,
    pub texture: TextureId,
    pub pos: DVec2,
    pub scale: f64,
    /// Radians
    pub rotation: f64,
    pub visible: bool,
}

// ---------------------------------------------------------------------------
// Player shot
// ---------------------------------------------------------------------------

pub struct PlayerShotArgs {
    pub request: ShotRequest,
    pub texture: TextureInfo,
    /// Lifetime used when the request carries none
    pub max_life_ms: f64,
}

/// A shot fired by the player; may chain a death shot and fire periodic children
#[derive(Debug, Clone, Default)]
pub struct PlayerShot {
    active: bool,
    pub motion: Projectile,
    pub texture: TextureId,
    on_death_shot: Option<Arc<ShotSpec>>,
    fire_rate: Option<FireRateSpec>,
    /// Own emitter, so periodic ROTARY children spin per shot
    emitter: Emitter,
    last_fire_ms: f64,
}

impl Poolable for PlayerShot {
    type Args = PlayerShotArgs;

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn reset(&mut self, args: PlayerShotArgs) {
        let PlayerShotArgs {
            request,
            texture,
            max_life_ms,
        } = args;
        self.motion.launch(Launch {
            pos: request.pos,
            vel: request.vel,
            angle_deg: request.angle_deg,
            size: texture.size(),
            scale: request.scale,
            speed_mod: request.speed_mod,
            trajectory: request.trajectory,
            max_life_ms: request.lifetime_ms.unwrap_or(max_life_ms),
        });
        self.texture = texture.id;
        self.on_death_shot = request.on_death_shot;
        self.fire_rate = request.fire_rate;
        self.emitter = Emitter::new();
        self.last_fire_ms = 0.0;
    }
}

impl PlayerShot {
    pub fn pos(&self) -> DVec2 {
        self.motion.pos
    }

    pub fn has_death_shot(&self) -> bool {
        self.on_death_shot.is_some()
    }

    pub fn update(&mut self, dt: f64, ctx: &MotionContext, out: &mut Vec<SimCommand>) {
        if !self.active {
            return;
        }
        self.emitter.advance(dt);

        match self.motion.advance(dt, ctx) {
            Fate::Decayed => self.retire(out),
            Fate::Expired => self.active = false,
            Fate::Alive => self.fire_periodic(out),
        }
    }

    /// Deactivate and resolve the death shot (if any) at the current position
    ///
    /// Only the first call on an active shot chains.
    pub fn retire(&mut self, out: &mut Vec<SimCommand>) {
        if !self.active {
            return;
        }
        self.active = false;

        let Some(spec) = &self.on_death_shot else {
            return;
        };
        let mut shots = Vec::with_capacity(spec.count as usize);
        Emitter::new().fire(spec, self.motion.pos, DEFAULT_FIRE_ANGLE_DEG, &mut shots);
        log::debug!(
            "death shot: {} children at ({:.1}, {:.1})",
            shots.len(),
            self.motion.pos.x,
            self.motion.pos.y
        );
        out.extend(shots.into_iter().map(SimCommand::SpawnPlayerShot));
    }

    fn fire_periodic(&mut self, out: &mut Vec<SimCommand>) {
        let Some(fire_rate) = &self.fire_rate else {
            return;
        };
        if fire_rate.interval_ms <= 0.0 {
            return;
        }
        let now_ms = self.motion.life_time * 1000.0;
        if now_ms - self.last_fire_ms < fire_rate.interval_ms {
            return;
        }
        let mut shots = Vec::new();
        self.emitter
            .fire(&fire_rate.shot, self.motion.pos, DEFAULT_FIRE_ANGLE_DEG, &mut shots);
        out.extend(shots.into_iter().map(SimCommand::SpawnPlayerShot));
        self.last_fire_ms = now_ms;
    }

    pub fn visual(&self) -> Visual {
        Visual {
            kind: EntityKind::PlayerShot,
            texture: self.texture,
            pos: self.motion.pos,
            scale: self.motion.scale,
            rotation: self.motion.rotation,
            visible: self.active,
        }
    }
}

impl Collider for PlayerShot {
    fn aabb(&self) -> Aabb {
        self.motion.aabb()
    }
}

// ---------------------------------------------------------------------------
// Hostile shot
// ---------------------------------------------------------------------------

pub struct HostileShotArgs {
    pub pos: DVec2,
    pub vel: DVec2,
    pub texture: TextureInfo,
    pub max_life_ms: f64,
}

/// Straight shot aimed at the player when fired; no chaining
#[derive(Debug, Clone, Default)]
pub struct HostileShot {
    active: bool,
    pub motion: Projectile,
    pub texture: TextureId,
}

impl Poolable for HostileShot {
    type Args = HostileShotArgs;

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn reset(&mut self, args: HostileShotArgs) {
        self.motion.launch(Launch {
            pos: args.pos,
            vel: args.vel,
            angle_deg: crate::heading_degrees(args.vel),
            size: args.texture.size(),
            scale: None,
            speed_mod: None,
            trajectory: None,
            max_life_ms: args.max_life_ms,
        });
        self.texture = args.texture.id;
    }
}

impl HostileShot {
    pub fn pos(&self) -> DVec2 {
        self.motion.pos
    }

    pub fn update(&mut self, dt: f64, ctx: &MotionContext) {
        if !self.active {
            return;
        }
        if self.motion.advance(dt, ctx) != Fate::Alive {
            self.active = false;
        }
    }

    pub fn visual(&self) -> Visual {
        Visual {
            kind: EntityKind::HostileShot,
            texture: self.texture,
            pos: self.motion.pos,
            scale: self.motion.scale,
            rotation: self.motion.rotation,
            visible: self.active,
        }
    }
}

impl Collider for HostileShot {
    fn aabb(&self) -> Aabb {
        self.motion.aabb()
    }
}

// ---------------------------------------------------------------------------
// Hostile spawner
// ---------------------------------------------------------------------------

pub struct HostileArgs {
    pub pos: DVec2,
    pub speed: f64,
    pub fire_interval_ms: f64,
    pub texture: TextureInfo,
}

/// Descends the screen and periodically requests a shot at the player
#[derive(Debug, Clone, Default)]
pub struct Hostile {
    active: bool,
    pub pos: DVec2,
    pub vel: DVec2,
    /// Hitbox, 80% of the texture
    pub size: DVec2,
    pub texture: TextureId,
    fire_timer_ms: f64,
    fire_interval_ms: f64,
}

impl Poolable for Hostile {
    type Args = HostileArgs;

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn reset(&mut self, args: HostileArgs) {
        self.pos = args.pos;
        self.vel = DVec2::new(0.0, args.speed);
        self.size = args.texture.size() * 0.8;
        self.texture = args.texture.id;
        self.fire_timer_ms = 0.0;
        self.fire_interval_ms = args.fire_interval_ms;
    }
}

impl Hostile {
    pub fn update(&mut self, dt: f64, playfield: &Playfield, out: &mut Vec<SimCommand>) {
        if !self.active {
            return;
        }
        self.pos += self.vel * dt;

        if self.pos.y > playfield.height + playfield.margin {
            self.active = false;
            return;
        }

        self.fire_timer_ms += dt * 1000.0;
        if self.fire_timer_ms >= self.fire_interval_ms {
            // Fire from the bottom centre of the hull
            let origin = self.pos + DVec2::new(0.0, self.size.y / 2.0);
            out.push(SimCommand::SpawnHostileShot { origin });
            self.fire_timer_ms = 0.0;
        }
    }

    pub fn visual(&self) -> Visual {
        Visual {
            kind: EntityKind::Hostile,
            texture: self.texture,
            pos: self.pos,
            scale: 1.0,
            rotation: 0.0,
            visible: self.active,
        }
    }
}

impl Collider for Hostile {
    fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

pub struct EffectArgs {
    pub pos: DVec2,
    pub lifetime_ms: f64,
    pub texture: TextureInfo,
}

/// Short-lived explosion; no motion, no collision
#[derive(Debug, Clone, Default)]
pub struct Effect {
    active: bool,
    pub pos: DVec2,
    pub texture: TextureId,
    remaining_ms: f64,
}

impl Poolable for Effect {
    type Args = EffectArgs;

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn reset(&mut self, args: EffectArgs) {
        self.pos = args.pos;
        self.texture = args.texture.id;
        self.remaining_ms = args.lifetime_ms;
    }
}

impl Effect {
    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms
    }

    pub fn update(&mut self, dt: f64) {
        if !self.active {
            return;
        }
        self.remaining_ms -= dt * 1000.0;
        if self.remaining_ms <= 0.0 {
            self.active = false;
        }
    }

    pub fn visual(&self) -> Visual {
        Visual {
            kind: EntityKind::Effect,
            texture: self.texture,
            pos: self.pos,
            scale: 0.5,
            rotation: 0.0,
            visible: self.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fire::resolve_shots;
    use crate::sim::shot::{ScaleOption, TrajectoryOption};

    const CTX: MotionContext = MotionContext {
        playfield: Playfield {
            width: 800.0,
            height: 600.0,
            margin: 50.0,
        },
        scale_death_ratio: 0.2,
    };

    const TEX: TextureInfo = TextureInfo {
        id: TextureId(1),
        width: 10.0,
        height: 40.0,
    };

    fn player_shot(spec: &ShotSpec, origin: DVec2) -> PlayerShot {
        let mut requests = Vec::new();
        resolve_shots(spec, origin, 270.0, 0.0, &mut requests);
        let mut shot = PlayerShot::default();
        shot.set_active(true);
        shot.reset(PlayerShotArgs {
            request: requests.remove(0),
            texture: TEX,
            max_life_ms: 5000.0,
        });
        shot
    }

    fn spawned_positions(commands: &[SimCommand]) -> Vec<DVec2> {
        commands
            .iter()
            .filter_map(|c| match c {
                SimCommand::SpawnPlayerShot(req) => Some(req.pos),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_scale_decay_chains_death_shot_once() {
        let spec = ShotSpec::line(1, 0.0)
            .with_scale(ScaleOption::linear(-0.8).with_initial(2.0).with_min(0.1))
            .with_death_shot(ShotSpec::ring(8, 200.0));
        let mut shot = player_shot(&spec, DVec2::new(300.0, 200.0));
        let mut out = Vec::new();

        for _ in 0..40 {
            shot.update(0.1, &CTX, &mut out);
        }

        assert!(!shot.is_active());
        let positions = spawned_positions(&out);
        assert_eq!(positions.len(), 8);
        assert!(positions.iter().all(|p| *p == DVec2::new(300.0, 200.0)));
    }

    #[test]
    fn test_decay_at_edge_chains_instead_of_expiring() {
        let spec = ShotSpec::line(1, 100.0)
            .with_base_angle(0.0)
            .with_scale(ScaleOption::linear(-1.0).with_initial(0.05).with_min(0.1))
            .with_death_shot(ShotSpec::ring(4, 50.0));
        let mut shot = player_shot(&spec, DVec2::new(849.0, 300.0));
        let mut out = Vec::new();
        shot.update(0.1, &CTX, &mut out);
        assert!(!shot.is_active());
        assert_eq!(spawned_positions(&out).len(), 4);
    }

    #[test]
    fn test_offscreen_never_chains() {
        let spec = ShotSpec::line(1, 600.0)
            .with_base_angle(0.0)
            .with_death_shot(ShotSpec::ring(8, 200.0));
        let mut shot = player_shot(&spec, DVec2::new(845.0, 300.0));
        let mut out = Vec::new();
        shot.update(0.1, &CTX, &mut out);
        assert!(!shot.is_active());
        assert!(out.is_empty());
    }

    #[test]
    fn test_lifetime_expiry_never_chains() {
        let spec = ShotSpec::line(1, 0.0)
            .with_lifetime(100.0)
            .with_death_shot(ShotSpec::ring(8, 200.0));
        let mut shot = player_shot(&spec, DVec2::new(400.0, 300.0));
        let mut out = Vec::new();
        shot.update(0.2, &CTX, &mut out);
        assert!(!shot.is_active());
        assert!(out.is_empty());
    }

    #[test]
    fn test_retire_chains_only_once() {
        let spec = ShotSpec::line(1, 0.0).with_death_shot(ShotSpec::ring(3, 10.0));
        let mut shot = player_shot(&spec, DVec2::new(10.0, 10.0));
        let mut out = Vec::new();
        shot.retire(&mut out);
        shot.retire(&mut out);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_fire_rate_emits_on_interval() {
        let spec = ShotSpec::line(1, 0.0)
            .with_fire_rate(ShotSpec::fan(3, 300.0, 30.0), 250.0);
        let mut shot = player_shot(&spec, DVec2::new(400.0, 300.0));
        let mut out = Vec::new();

        shot.update(0.1, &CTX, &mut out);
        shot.update(0.1, &CTX, &mut out);
        assert!(out.is_empty());
        shot.update(0.1, &CTX, &mut out);
        assert_eq!(out.len(), 3);
        for _ in 0..3 {
            shot.update(0.1, &CTX, &mut out);
        }
        assert_eq!(out.len(), 6);
        assert!(shot.is_active());
    }

    fn spawned_requests(commands: &[SimCommand]) -> Vec<&ShotRequest> {
        commands
            .iter()
            .filter_map(|c| match c {
                SimCommand::SpawnPlayerShot(req) => Some(req),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_decaying_carrier_skips_its_due_fire_rate_child() {
        let spec = ShotSpec::line(1, 0.0)
            .with_scale(ScaleOption::linear(-1.0).with_initial(0.05).with_min(0.1))
            .with_fire_rate(ShotSpec::fan(3, 300.0, 30.0), 50.0)
            .with_death_shot(ShotSpec::ring(4, 10.0));
        let mut shot = player_shot(&spec, DVec2::new(400.0, 300.0));
        let mut out = Vec::new();

        // 100 ms covers the 50 ms fire interval, but the shot decays in the same tick
        shot.update(0.1, &CTX, &mut out);

        assert!(!shot.is_active());
        assert_eq!(out.len(), 4);
        let requests = spawned_requests(&out);
        assert_eq!(requests.len(), 4);
        for req in requests {
            assert_eq!(req.pos, DVec2::new(400.0, 300.0));
            assert!((req.vel.length() - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_death_shot_fans_around_straight_up() {
        let spec = ShotSpec::line(1, 0.0).with_death_shot(ShotSpec::fan(3, 100.0, 90.0));
        let mut shot = player_shot(&spec, DVec2::new(200.0, 200.0));
        let mut out = Vec::new();
        shot.retire(&mut out);

        let mut angles: Vec<f64> = spawned_requests(&out).iter().map(|r| r.angle_deg).collect();
        angles.sort_by(f64::total_cmp);
        assert_eq!(angles.len(), 3);
        for (angle, want) in angles.iter().zip([225.0, 270.0, 315.0]) {
            assert!((angle - want).abs() < 1e-9, "{angle} != {want}");
        }

        // An explicit base angle on the child wins over the default
        let spec = ShotSpec::line(1, 0.0)
            .with_death_shot(ShotSpec::line(1, 100.0).with_base_angle(90.0));
        let mut shot = player_shot(&spec, DVec2::new(200.0, 200.0));
        let mut out = Vec::new();
        shot.retire(&mut out);
        let requests = spawned_requests(&out);
        assert_eq!(requests.len(), 1);
        assert!((requests[0].angle_deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_each_death_shot_gets_a_fresh_emitter() {
        let spec = ShotSpec::line(1, 0.0).with_death_shot(
            ShotSpec::line(1, 10.0).with_trajectory(TrajectoryOption::rotary(15.0)),
        );
        let mut first = player_shot(&spec, DVec2::new(100.0, 100.0));
        let mut second = player_shot(&spec, DVec2::new(300.0, 100.0));
        let mut out = Vec::new();
        first.retire(&mut out);
        second.retire(&mut out);

        let requests = spawned_requests(&out);
        assert_eq!(requests.len(), 2);
        // Both start from an empty accumulator: 0 + 15
        for req in requests {
            assert!((req.angle_deg - 15.0).abs() < 1e-9);
        }
    }

    fn hostile_at(pos: DVec2) -> Hostile {
        let mut hostile = Hostile::default();
        hostile.set_active(true);
        hostile.reset(HostileArgs {
            pos,
            speed: 120.0,
            fire_interval_ms: 1500.0,
            texture: TEX,
        });
        hostile
    }

    #[test]
    fn test_hostile_fires_from_hull_bottom_on_timer() {
        let mut hostile = hostile_at(DVec2::new(100.0, 100.0));
        let mut out = Vec::new();

        hostile.update(0.5, &CTX.playfield, &mut out);
        hostile.update(0.5, &CTX.playfield, &mut out);
        assert!(out.is_empty());
        hostile.update(0.5, &CTX.playfield, &mut out);
        assert_eq!(out.len(), 1);
        match out[0] {
            SimCommand::SpawnHostileShot { origin } => {
                assert_eq!(origin.x, 100.0);
                // y = 100 + 3 * 60, plus half of the 32px hitbox height
                assert!((origin.y - 296.0).abs() < 1e-9);
            }
            _ => panic!("expected a hostile shot"),
        }
        assert!(hostile.is_active());
    }

    #[test]
    fn test_hostile_leaves_past_bottom_margin_without_firing() {
        let mut hostile = hostile_at(DVec2::new(100.0, 640.0));
        let mut out = Vec::new();
        // Timer would fire this tick, but the hostile is already gone
        hostile.fire_timer_ms = 1400.0;
        hostile.update(0.2, &CTX.playfield, &mut out);
        assert!(!hostile.is_active());
        assert!(out.is_empty());
    }

    #[test]
    fn test_effect_counts_down() {
        let mut effect = Effect::default();
        effect.set_active(true);
        effect.reset(EffectArgs {
            pos: DVec2::ZERO,
            lifetime_ms: 300.0,
            texture: TEX,
        });
        effect.update(0.2);
        assert!(effect.is_active());
        effect.update(0.2);
        assert!(!effect.is_active());
    }
}
