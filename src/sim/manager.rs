//! Entity manager: pools, active lists and the per-frame pipeline
//!
//! A frame runs in five fixed steps:
//! 1. hostile spawn timer
//! 2. update every active entity (in `EntityKind::ALL` order)
//! 3. collision pass
//! 4. cleanup: drop inactive entities from the active lists, release to pools
//! 5. apply spawn commands queued during steps 2-3
//!
//! Entities never reach back into the manager. Anything they want spawned goes
//! through a `SimCommand`, so nothing spawned this frame is seen by this
//! frame's collision pass.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::check_aabb_collision;
use super::entities::{
    Effect, EffectArgs, EntityKind, Hostile, HostileArgs, HostileShot, HostileShotArgs,
    PlayerShot, PlayerShotArgs, Visual,
};
use super::fire::ShotRequest;
use super::player::Player;
use super::pool::{Handle, Pool, Poolable};
use super::projectile::MotionContext;
use crate::assets::{TextureAtlas, TextureInfo};
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Spawn requests raised while the frame is being processed
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    SpawnPlayerShot(ShotRequest),
    /// Aimed at the player's position when the command is applied
    SpawnHostileShot { origin: DVec2 },
    SpawnEffect { pos: DVec2 },
}

/// Gameplay outcomes of a frame, for scoring and presentation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    EnemyDestroyed { pos: DVec2 },
    PlayerHit { pos: DVec2 },
}

/// Clamp a frame delta to `[0, max]`; non-finite input counts as no time
pub fn clamp_dt(dt: f64, max: f64) -> f64 {
    if dt.is_finite() { dt.min(max).max(0.0) } else { 0.0 }
}

/// A pool plus the handles currently in play, in spawn order
struct Lane<T> {
    pool: Pool<T>,
    active: Vec<Handle>,
}

impl<T: Poolable> Lane<T> {
    fn new(pool: Pool<T>) -> Self {
        Self {
            active: Vec::with_capacity(pool.len()),
            pool,
        }
    }

    fn spawn(&mut self, args: T::Args) -> Handle {
        let handle = self.pool.get(args);
        self.active.push(handle);
        handle
    }

    fn for_each_active(&mut self, mut f: impl FnMut(&mut T)) {
        for &handle in &self.active {
            f(self.pool.get_mut(handle));
        }
    }

    fn iter_active(&self) -> impl Iterator<Item = &T> + '_ {
        self.active.iter().map(|&h| self.pool.get_ref(h))
    }

    /// Remove inactive entities, walking backwards so removal keeps order
    fn sweep(&mut self) -> usize {
        let mut released = 0;
        for i in (0..self.active.len()).rev() {
            let handle = self.active[i];
            if !self.pool.get_ref(handle).is_active() {
                self.active.remove(i);
                self.pool.release(handle);
                released += 1;
            }
        }
        released
    }

    fn contains(&self, handle: Handle) -> bool {
        self.active.contains(&handle)
    }
}

/// Default textures per kind, resolved once at setup
#[derive(Debug, Clone, Copy)]
struct KindTextures {
    player_shot: TextureInfo,
    hostile_shot: TextureInfo,
    hostile: TextureInfo,
    effect: TextureInfo,
}

pub struct EntityManager {
    player_shots: Lane<PlayerShot>,
    hostiles: Lane<Hostile>,
    hostile_shots: Lane<HostileShot>,
    effects: Lane<Effect>,
    textures: KindTextures,
    atlas: TextureAtlas,
    config: GameConfig,
    motion: MotionContext,
    spawn_timer_ms: f64,
    rng: Pcg32,
    commands: Vec<SimCommand>,
    events: Vec<SimEvent>,
}

impl EntityManager {
    pub fn new(config: &GameConfig, atlas: &TextureAtlas, seed: u64) -> Result<Self, ConfigError> {
        for kind in EntityKind::ALL {
            if config.pool_size(kind) == 0 {
                return Err(ConfigError::InvalidPool { kind });
            }
        }
        let texture = |kind: EntityKind| atlas.require(kind, config.texture_key(kind));
        let textures = KindTextures {
            player_shot: texture(EntityKind::PlayerShot)?,
            hostile_shot: texture(EntityKind::HostileShot)?,
            hostile: texture(EntityKind::Hostile)?,
            effect: texture(EntityKind::Effect)?,
        };

        let growth = config.engine.pool_growth;
        let manager = Self {
            player_shots: Lane::new(Pool::new(
                config.bullet.pool_size,
                growth,
                PlayerShot::default,
            )),
            hostiles: Lane::new(Pool::new(config.enemy.pool_size, growth, Hostile::default)),
            hostile_shots: Lane::new(Pool::new(
                config.enemy_bullet.pool_size,
                growth,
                HostileShot::default,
            )),
            effects: Lane::new(Pool::new(config.explosion.pool_size, growth, Effect::default)),
            textures,
            atlas: atlas.clone(),
            config: config.clone(),
            motion: config.motion_context(),
            // First hostile appears on the first frame
            spawn_timer_ms: config.enemy.spawn_interval_ms,
            rng: Pcg32::seed_from_u64(seed),
            commands: Vec::new(),
            events: Vec::new(),
        };

        log::info!(
            "entity pools ready: {} player shots, {} hostiles, {} hostile shots, {} effects (seed {})",
            manager.player_shots.pool.all_objects().len(),
            manager.hostiles.pool.all_objects().len(),
            manager.hostile_shots.pool.all_objects().len(),
            manager.effects.pool.all_objects().len(),
            seed
        );
        Ok(manager)
    }

    /// Run one frame and return what happened in it
    pub fn update(&mut self, dt: f64, player: &mut Player) -> Vec<SimEvent> {
        let dt = clamp_dt(dt, self.config.engine.max_frame_dt);

        self.spawn_timer_ms += dt * 1000.0;
        if self.spawn_timer_ms >= self.config.enemy.spawn_interval_ms {
            self.spawn_random_hostile();
            self.spawn_timer_ms = 0.0;
        }

        let ctx = self.motion;
        let commands = &mut self.commands;
        self.player_shots
            .for_each_active(|shot| shot.update(dt, &ctx, commands));
        self.hostiles
            .for_each_active(|hostile| hostile.update(dt, &ctx.playfield, commands));
        self.hostile_shots
            .for_each_active(|shot| shot.update(dt, &ctx));
        self.effects.for_each_active(|effect| effect.update(dt));

        self.collide(player);
        self.cleanup();
        self.flush_commands(player.pos);

        std::mem::take(&mut self.events)
    }

    fn collide(&mut self, player: &mut Player) {
        let Self {
            player_shots,
            hostiles,
            hostile_shots,
            commands,
            events,
            ..
        } = self;

        // One shot may take out several overlapping hostiles; its death shot chains once
        for &shot_handle in &player_shots.active {
            let shot = player_shots.pool.get_mut(shot_handle);
            if !shot.is_active() {
                continue;
            }
            for &hostile_handle in &hostiles.active {
                let hostile = hostiles.pool.get_mut(hostile_handle);
                if !hostile.is_active() || !check_aabb_collision(&*shot, &*hostile) {
                    continue;
                }
                shot.retire(commands);
                hostile.set_active(false);
                commands.push(SimCommand::SpawnEffect { pos: hostile.pos });
                events.push(SimEvent::EnemyDestroyed { pos: hostile.pos });
            }
        }

        if !player.is_active() {
            return;
        }
        for &handle in &hostile_shots.active {
            let shot = hostile_shots.pool.get_mut(handle);
            if !shot.is_active() || !check_aabb_collision(&*shot, &*player) {
                continue;
            }
            shot.set_active(false);
            player.take_hit();
            commands.push(SimCommand::SpawnEffect { pos: player.pos });
            events.push(SimEvent::PlayerHit { pos: player.pos });
            break;
        }
    }

    fn cleanup(&mut self) {
        let released = [
            self.player_shots.sweep(),
            self.hostiles.sweep(),
            self.hostile_shots.sweep(),
            self.effects.sweep(),
        ];
        if released.iter().any(|&n| n > 0) {
            log::trace!(
                "released {} player shots, {} hostiles, {} hostile shots, {} effects",
                released[0],
                released[1],
                released[2],
                released[3]
            );
        }
    }

    fn flush_commands(&mut self, player_pos: DVec2) {
        let mut commands = std::mem::take(&mut self.commands);
        for command in commands.drain(..) {
            match command {
                SimCommand::SpawnPlayerShot(request) => {
                    self.spawn_player_shot(request);
                }
                SimCommand::SpawnHostileShot { origin } => {
                    self.spawn_hostile_shot(origin, player_pos);
                }
                SimCommand::SpawnEffect { pos } => {
                    self.spawn_effect(pos);
                }
            }
        }
        self.commands = commands;
    }

    /// Bring a player shot into play
    ///
    /// A shot naming a texture the atlas does not know is skipped.
    pub fn spawn_player_shot(&mut self, request: ShotRequest) -> Option<Handle> {
        let texture = match &request.texture_key {
            Some(key) => match self.atlas.get(key) {
                Some(texture) => texture,
                None => {
                    log::warn!("skipping shot with unknown texture '{key}'");
                    return None;
                }
            },
            None => self.textures.player_shot,
        };
        Some(self.player_shots.spawn(PlayerShotArgs {
            request,
            texture,
            max_life_ms: self.config.bullet.lifetime_ms,
        }))
    }

    pub fn spawn_hostile(&mut self, pos: DVec2) -> Handle {
        self.hostiles.spawn(HostileArgs {
            pos,
            speed: self.config.enemy.speed,
            fire_interval_ms: self.config.enemy.fire_interval_ms,
            texture: self.textures.hostile,
        })
    }

    /// Spawn a hostile just above the screen at a random x
    pub fn spawn_random_hostile(&mut self) -> Handle {
        let width = self.config.screen.width;
        let x = if width > 0.0 { self.rng.random_range(0.0..width) } else { 0.0 };
        self.spawn_hostile(DVec2::new(x, -self.config.screen.margin))
    }

    /// Spawn a hostile shot from `origin` aimed at `target`
    pub fn spawn_hostile_shot(&mut self, origin: DVec2, target: DVec2) -> Handle {
        let dir = (target - origin).normalize_or_zero();
        let dir = if dir == DVec2::ZERO { DVec2::Y } else { dir };
        self.hostile_shots.spawn(HostileShotArgs {
            pos: origin,
            vel: dir * self.config.enemy_bullet.speed,
            texture: self.textures.hostile_shot,
            max_life_ms: self.config.enemy_bullet.lifetime_ms,
        })
    }

    pub fn spawn_effect(&mut self, pos: DVec2) -> Handle {
        self.effects.spawn(EffectArgs {
            pos,
            lifetime_ms: self.config.explosion.lifetime_ms,
            texture: self.textures.effect,
        })
    }

    pub fn active_count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::PlayerShot => self.player_shots.active.len(),
            EntityKind::HostileShot => self.hostile_shots.active.len(),
            EntityKind::Hostile => self.hostiles.active.len(),
            EntityKind::Effect => self.effects.active.len(),
        }
    }

    /// Instances a kind's pool has created so far
    pub fn pool_size(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::PlayerShot => self.player_shots.pool.len(),
            EntityKind::HostileShot => self.hostile_shots.pool.len(),
            EntityKind::Hostile => self.hostiles.pool.len(),
            EntityKind::Effect => self.effects.pool.len(),
        }
    }

    /// True while `handle` is in `kind`'s active list
    pub fn is_live(&self, kind: EntityKind, handle: Handle) -> bool {
        match kind {
            EntityKind::PlayerShot => self.player_shots.contains(handle),
            EntityKind::HostileShot => self.hostile_shots.contains(handle),
            EntityKind::Hostile => self.hostiles.contains(handle),
            EntityKind::Effect => self.effects.contains(handle),
        }
    }

    pub fn player_shot(&self, handle: Handle) -> &PlayerShot {
        self.player_shots.pool.get_ref(handle)
    }

    pub fn player_shot_mut(&mut self, handle: Handle) -> &mut PlayerShot {
        self.player_shots.pool.get_mut(handle)
    }

    pub fn hostile(&self, handle: Handle) -> &Hostile {
        self.hostiles.pool.get_ref(handle)
    }

    pub fn hostile_mut(&mut self, handle: Handle) -> &mut Hostile {
        self.hostiles.pool.get_mut(handle)
    }

    pub fn hostile_shot(&self, handle: Handle) -> &HostileShot {
        self.hostile_shots.pool.get_ref(handle)
    }

    pub fn player_shots(&self) -> impl Iterator<Item = &PlayerShot> + '_ {
        self.player_shots.iter_active()
    }

    pub fn hostile_shots(&self) -> impl Iterator<Item = &HostileShot> + '_ {
        self.hostile_shots.iter_active()
    }

    pub fn effects(&self) -> impl Iterator<Item = &Effect> + '_ {
        self.effects.iter_active()
    }

    /// Draw list for every entity in play
    pub fn visuals(&self) -> impl Iterator<Item = Visual> + '_ {
        self.player_shots
            .iter_active()
            .map(PlayerShot::visual)
            .chain(self.hostiles.iter_active().map(Hostile::visual))
            .chain(self.hostile_shots.iter_active().map(HostileShot::visual))
            .chain(self.effects.iter_active().map(Effect::visual))
    }

    /// Reset the hostile spawn timer; a large value forces a spawn next frame
    pub fn set_spawn_timer_ms(&mut self, ms: f64) {
        self.spawn_timer_ms = ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureId;
    use crate::sim::shot::{ScaleOption, ShotSpec};

    fn atlas() -> TextureAtlas {
        let mut atlas = TextureAtlas::new();
        atlas.insert("playerShip1_blue.png", 99.0, 75.0);
        atlas.insert("laserBlue07.png", 10.0, 40.0);
        atlas.insert("enemyBlack5.png", 100.0, 80.0);
        atlas.insert("meteorGrey_big1.png", 101.0, 84.0);
        atlas.insert("laserRed07.png", 10.0, 40.0);
        atlas
    }

    /// Manager with hostile spawning pushed far into the future
    fn quiet_manager(config: &GameConfig) -> (EntityManager, Player) {
        let atlas = atlas();
        let mut manager = EntityManager::new(config, &atlas, 7).unwrap();
        manager.set_spawn_timer_ms(f64::NEG_INFINITY);
        let player = Player::new(config, &atlas).unwrap();
        (manager, player)
    }

    fn request(spec: &ShotSpec, origin: DVec2) -> Vec<ShotRequest> {
        let mut out = Vec::new();
        crate::sim::fire::resolve_shots(spec, origin, 270.0, 0.0, &mut out);
        out
    }

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(0.5, 0.1), 0.1);
        assert_eq!(clamp_dt(-1.0, 0.1), 0.0);
        assert_eq!(clamp_dt(f64::NAN, 0.1), 0.0);
        assert_eq!(clamp_dt(0.016, 0.1), 0.016);
    }

    #[test]
    fn test_first_hostile_spawns_immediately() {
        let config = GameConfig::default();
        let atlas = atlas();
        let mut manager = EntityManager::new(&config, &atlas, 1).unwrap();
        let mut player = Player::new(&config, &atlas).unwrap();
        manager.update(0.016, &mut player);
        assert_eq!(manager.active_count(EntityKind::Hostile), 1);
        manager.update(0.016, &mut player);
        assert_eq!(manager.active_count(EntityKind::Hostile), 1);
    }

    #[test]
    fn test_random_spawn_is_seeded() {
        let config = GameConfig::default();
        let atlas = atlas();
        let mut a = EntityManager::new(&config, &atlas, 42).unwrap();
        let mut b = EntityManager::new(&config, &atlas, 42).unwrap();
        let ha = a.spawn_random_hostile();
        let hb = b.spawn_random_hostile();
        assert_eq!(a.hostile(ha).pos, b.hostile(hb).pos);
        assert_eq!(a.hostile(ha).pos.y, -50.0);
        assert!((0.0..800.0).contains(&a.hostile(ha).pos.x));
    }

    #[test]
    fn test_zero_pool_rejected() {
        let mut config = GameConfig::default();
        config.enemy.pool_size = 0;
        assert!(matches!(
            EntityManager::new(&config, &atlas(), 0),
            Err(ConfigError::InvalidPool {
                kind: EntityKind::Hostile
            })
        ));
    }

    #[test]
    fn test_shot_destroys_hostile_and_leaves_effect() {
        let config = GameConfig::default();
        let (mut manager, mut player) = quiet_manager(&config);
        let hostile = manager.spawn_hostile(DVec2::new(200.0, 200.0));
        let shot = request(&ShotSpec::line(1, 0.0), DVec2::new(200.0, 200.0));
        let shot = manager.spawn_player_shot(shot[0].clone()).unwrap();

        let events = manager.update(0.016, &mut player);

        let destroyed = events
            .iter()
            .filter(|e| matches!(e, SimEvent::EnemyDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
        assert!(!manager.is_live(EntityKind::Hostile, hostile));
        assert!(!manager.is_live(EntityKind::PlayerShot, shot));
        assert_eq!(manager.active_count(EntityKind::Effect), 1);
    }

    #[test]
    fn test_one_shot_clears_every_overlapping_hostile() {
        let config = GameConfig::default();
        let (mut manager, mut player) = quiet_manager(&config);
        manager.spawn_hostile(DVec2::new(200.0, 200.0));
        manager.spawn_hostile(DVec2::new(210.0, 200.0));
        let spec = ShotSpec::line(1, 0.0).with_death_shot(ShotSpec::ring(4, 100.0));
        let shot = request(&spec, DVec2::new(205.0, 200.0));
        manager.spawn_player_shot(shot[0].clone());

        let events = manager.update(0.016, &mut player);
        assert_eq!(events.len(), 2);
        assert_eq!(manager.active_count(EntityKind::Hostile), 0);
        // Death shot chained once
        assert_eq!(manager.active_count(EntityKind::PlayerShot), 4);
    }

    #[test]
    fn test_chained_shots_appear_after_cleanup() {
        let config = GameConfig::default();
        let (mut manager, mut player) = quiet_manager(&config);
        let spec = ShotSpec::line(1, 0.0)
            .with_scale(ScaleOption::linear(-10.0).with_initial(0.05).with_min(0.1))
            .with_death_shot(ShotSpec::ring(6, 100.0));
        let shot = request(&spec, DVec2::new(400.0, 300.0));
        manager.spawn_player_shot(shot[0].clone());

        manager.update(0.016, &mut player);

        assert_eq!(manager.active_count(EntityKind::PlayerShot), 6);
        // Parent's slot went back to the pool before the children were spawned
        assert!(manager.player_shots().any(|s| s.pos() == DVec2::new(400.0, 300.0)));
        assert_eq!(manager.pool_size(EntityKind::PlayerShot), 30);
    }

    #[test]
    fn test_chained_children_miss_the_frame_they_spawn_in() {
        let config = GameConfig::default();
        let mut atlas = atlas();
        atlas.insert("tiny.png", 1.0, 1.0);
        atlas.insert("big.png", 200.0, 200.0);
        let mut manager = EntityManager::new(&config, &atlas, 7).unwrap();
        manager.set_spawn_timer_ms(f64::NEG_INFINITY);
        let mut player = Player::new(&config, &atlas).unwrap();

        // Child box is 100x100, hostile box 80x64: only the child reaches it
        let hostile = manager.spawn_hostile(DVec2::new(480.0, 300.0));
        let spec = ShotSpec::line(1, 0.0)
            .with_texture("tiny.png")
            .with_scale(ScaleOption::linear(-10.0).with_initial(0.05).with_min(0.1))
            .with_death_shot(ShotSpec::ring(1, 0.0).with_texture("big.png"));
        manager.spawn_player_shot(request(&spec, DVec2::new(400.0, 300.0))[0].clone());

        let events = manager.update(0.016, &mut player);
        assert!(events.is_empty());
        assert!(manager.is_live(EntityKind::Hostile, hostile));
        assert_eq!(manager.active_count(EntityKind::PlayerShot), 1);

        let events = manager.update(0.016, &mut player);
        let destroyed = events
            .iter()
            .filter(|e| matches!(e, SimEvent::EnemyDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
        assert!(!manager.is_live(EntityKind::Hostile, hostile));
    }

    #[test]
    fn test_hostile_shot_misses_the_frame_it_spawns_in() {
        let mut config = GameConfig::default();
        config.enemy.fire_interval_ms = 1.0;
        let (mut manager, mut player) = quiet_manager(&config);
        // Hull bottom sits inside the player's box, so the shot spawns on the player
        manager.spawn_hostile(player.pos - DVec2::new(0.0, 30.0));

        let events = manager.update(0.016, &mut player);
        assert!(events.is_empty());
        assert_eq!(player.hits, 0);
        assert_eq!(manager.active_count(EntityKind::HostileShot), 1);

        let events = manager.update(0.016, &mut player);
        assert_eq!(events, vec![SimEvent::PlayerHit { pos: player.pos }]);
        assert_eq!(player.hits, 1);
    }

    #[test]
    fn test_sweep_releases_inactive_to_pool() {
        let mut lane = Lane::new(Pool::new(2, 5, Effect::default));
        let args = |x: f64| EffectArgs {
            pos: DVec2::new(x, 0.0),
            lifetime_ms: 100.0,
            texture: TextureInfo {
                id: TextureId(1),
                width: 10.0,
                height: 10.0,
            },
        };
        let keep = lane.spawn(args(1.0));
        let gone = lane.spawn(args(2.0));
        lane.pool.get_mut(gone).set_active(false);

        assert_eq!(lane.sweep(), 1);
        assert_eq!(lane.active, vec![keep]);
        assert!(lane.pool.is_free(gone));
        assert_eq!(lane.pool.free_count(), 1);
        assert_eq!(lane.sweep(), 0);
    }

    #[test]
    fn test_hostile_shot_hits_player_once_per_frame() {
        let config = GameConfig::default();
        let (mut manager, mut player) = quiet_manager(&config);
        manager.spawn_hostile_shot(player.pos, player.pos + DVec2::new(0.0, 1.0));
        manager.spawn_hostile_shot(player.pos, player.pos + DVec2::new(0.0, 1.0));

        let events = manager.update(0.016, &mut player);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SimEvent::PlayerHit { .. }));
        assert_eq!(player.hits, 1);
        assert_eq!(manager.active_count(EntityKind::HostileShot), 1);

        manager.update(0.016, &mut player);
        assert_eq!(player.hits, 2);
    }

    #[test]
    fn test_hostile_shot_aims_at_player() {
        let config = GameConfig::default();
        let (mut manager, _player) = quiet_manager(&config);
        let handle = manager.spawn_hostile_shot(DVec2::new(100.0, 100.0), DVec2::new(400.0, 500.0));
        let vel = manager.hostile_shot(handle).motion.vel;
        assert!((vel.length() - 400.0).abs() < 1e-9);
        assert!((vel.x - 240.0).abs() < 1e-9);
        assert!((vel.y - 320.0).abs() < 1e-9);

        // Degenerate aim falls back to straight down
        let handle = manager.spawn_hostile_shot(DVec2::new(100.0, 100.0), DVec2::new(100.0, 100.0));
        assert_eq!(manager.hostile_shot(handle).motion.vel, DVec2::new(0.0, 400.0));
    }

    #[test]
    fn test_hostile_fire_is_spawned_through_commands() {
        let config = GameConfig::default();
        let (mut manager, mut player) = quiet_manager(&config);
        let hostile = manager.spawn_hostile(DVec2::new(400.0, 100.0));
        let interval = config.enemy.fire_interval_ms;

        let mut elapsed = 0.0;
        while elapsed < interval {
            manager.update(0.1, &mut player);
            elapsed += 100.0;
        }
        assert!(manager.is_live(EntityKind::Hostile, hostile));
        assert_eq!(manager.active_count(EntityKind::HostileShot), 1);
    }

    #[test]
    fn test_unknown_texture_shot_is_skipped() {
        let config = GameConfig::default();
        let (mut manager, _player) = quiet_manager(&config);
        let spec = ShotSpec::line(3, 100.0).with_texture("missing.png");
        for req in request(&spec, DVec2::new(10.0, 10.0)) {
            assert!(manager.spawn_player_shot(req).is_none());
        }
        assert_eq!(manager.active_count(EntityKind::PlayerShot), 0);
    }

    #[test]
    fn test_visuals_cover_every_active_entity() {
        let config = GameConfig::default();
        let (mut manager, _player) = quiet_manager(&config);
        manager.spawn_hostile(DVec2::new(100.0, 100.0));
        manager.spawn_effect(DVec2::new(300.0, 300.0));
        for req in request(&ShotSpec::ring(3, 100.0), DVec2::new(500.0, 300.0)) {
            manager.spawn_player_shot(req);
        }
        let visuals: Vec<_> = manager.visuals().collect();
        assert_eq!(visuals.len(), 5);
        assert!(visuals.iter().all(|v| v.visible));
        assert_eq!(visuals[0].kind, EntityKind::PlayerShot);
        assert_eq!(visuals[4].kind, EntityKind::Effect);
    }
}
