//! Game state: everything a frame driver needs to hold between ticks

use serde::{Deserialize, Serialize};

use super::manager::{EntityManager, SimEvent};
use super::player::Player;
use crate::assets::TextureAtlas;
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Running score, fed by frame events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    pub score: u64,
    pub kills: u32,
    pub hits_taken: u32,
    /// Points per destroyed hostile
    pub per_kill: u64,
}

impl ScoreKeeper {
    pub fn new(per_kill: u64) -> Self {
        Self {
            per_kill,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, event: &SimEvent) {
        match event {
            SimEvent::EnemyDestroyed { .. } => {
                self.kills += 1;
                self.score += self.per_kill;
            }
            SimEvent::PlayerHit { .. } => self.hits_taken += 1,
        }
    }
}

/// Complete simulation state
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub manager: EntityManager,
    pub player: Player,
    pub score: ScoreKeeper,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Validate `config` against `atlas` and build a fresh run
    pub fn new(config: GameConfig, atlas: &TextureAtlas, seed: u64) -> Result<Self, ConfigError> {
        config.validate(atlas)?;
        let manager = EntityManager::new(&config, atlas, seed)?;
        let player = Player::new(&config, atlas)?;
        log::info!(
            "game state ready: {} fire bindings, seed {}",
            player.bindings().len(),
            seed
        );
        Ok(Self {
            seed,
            score: ScoreKeeper::new(config.enemy.score_value),
            config,
            manager,
            player,
            time_ticks: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;

    #[test]
    fn test_score_keeper_applies_events() {
        let mut score = ScoreKeeper::new(100);
        score.apply(&SimEvent::EnemyDestroyed { pos: DVec2::ZERO });
        score.apply(&SimEvent::EnemyDestroyed { pos: DVec2::ZERO });
        score.apply(&SimEvent::PlayerHit { pos: DVec2::ZERO });
        assert_eq!(score.score, 200);
        assert_eq!(score.kills, 2);
        assert_eq!(score.hits_taken, 1);
    }

    #[test]
    fn test_new_rejects_missing_textures() {
        let result = GameState::new(GameConfig::default(), &TextureAtlas::new(), 1);
        assert!(result.is_err());
    }
}
