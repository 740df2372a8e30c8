//! Frame tick
//!
//! Advances the whole game by one variable timestep.

use super::fire::ShotRequest;
use super::manager::{SimEvent, clamp_dt};
use super::player::{Control, InputSource, MAX_FIRE_SLOTS};
use super::state::GameState;

/// Controls held during a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Fire slots, indexed by binding slot
    pub fire: [bool; MAX_FIRE_SLOTS],
}

impl TickInput {
    /// Input with a single fire slot held
    pub fn firing(slot: u8) -> Self {
        let mut input = Self::default();
        if let Some(held) = input.fire.get_mut(slot as usize) {
            *held = true;
        }
        input
    }
}

impl InputSource for TickInput {
    fn is_down(&self, control: Control) -> bool {
        match control {
            Control::MoveLeft => self.left,
            Control::MoveRight => self.right,
            Control::Fire(slot) => self.fire.get(slot as usize).copied().unwrap_or(false),
        }
    }
}

/// Advance the game by `dt` seconds and return the frame's events
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) -> Vec<SimEvent> {
    let dt = clamp_dt(dt, state.config.engine.max_frame_dt);

    let mut requests: Vec<ShotRequest> = Vec::new();
    state.player.handle_input(input, dt, &mut requests);
    for request in requests {
        state.manager.spawn_player_shot(request);
    }
    state.player.update(dt);

    let events = state.manager.update(dt, &mut state.player);
    for event in &events {
        state.score.apply(event);
    }

    state.time_ticks += 1;
    events
}
