//! Fire control: turning a `ShotSpec` into concrete shots
//!
//! `resolve_shots` is pure. All state that makes successive bursts differ
//! (rotary accumulator, launch wave timer) lives on an `Emitter` owned by
//! whoever fires, so two emitters never share phase.

use std::sync::Arc;

use glam::DVec2;

use super::shot::{
    FireRateSpec, Pattern, ScaleOption, ShotSpec, SpeedOption, TrajectoryMode, TrajectoryOption,
};
use crate::consts::DEFAULT_FAN_ARC_DEG;
use crate::{normalize_degrees, velocity_from_degrees};

/// Fully resolved parameters for one player-fired shot
///
/// This is what crosses from the shooter to the entity manager; the manager
/// never looks at patterns or placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotRequest {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Launch heading in degrees (centre of in-flight WAVE oscillation)
    pub angle_deg: f64,
    pub texture_key: Option<String>,
    pub scale: Option<ScaleOption>,
    pub speed_mod: Option<SpeedOption>,
    pub trajectory: Option<TrajectoryOption>,
    pub lifetime_ms: Option<f64>,
    pub on_death_shot: Option<Arc<ShotSpec>>,
    pub fire_rate: Option<FireRateSpec>,
}

/// Start angle and per-shot step for a pattern
fn pattern_angles(spec: &ShotSpec, base_angle_deg: f64) -> (f64, f64) {
    let count = spec.count;
    match spec.pattern {
        Pattern::Line => (base_angle_deg, 0.0),
        Pattern::Fan => {
            let arc = spec.angle.unwrap_or(DEFAULT_FAN_ARC_DEG);
            let step = if count > 1 {
                arc / (count - 1) as f64
            } else {
                0.0
            };
            (base_angle_deg - arc / 2.0, step)
        }
        Pattern::Ring => {
            let step = if count > 0 { 360.0 / count as f64 } else { 0.0 };
            (base_angle_deg, step)
        }
    }
}

/// Resolve `spec` fired from `origin` into `out`
///
/// `wave_offset_deg` is the launch-time wave offset chosen by the emitter.
/// Malformed specs (no shots, negative or non-finite speed) resolve to nothing.
pub fn resolve_shots(
    spec: &ShotSpec,
    origin: DVec2,
    base_angle_deg: f64,
    wave_offset_deg: f64,
    out: &mut Vec<ShotRequest>,
) {
    if spec.count == 0 || !spec.speed.is_finite() || spec.speed < 0.0 {
        return;
    }

    let (start, step) = pattern_angles(spec, base_angle_deg + wave_offset_deg);
    let centre = (spec.count - 1) as f64 / 2.0;

    out.reserve(spec.count as usize);
    for i in 0..spec.count {
        let angle_deg = start + i as f64 * step;
        let mut pos = origin;
        if spec.pattern == Pattern::Line {
            if let Some(spacing) = spec.spacing {
                pos.x += spacing * (i as f64 - centre);
            }
        }
        out.push(ShotRequest {
            pos,
            vel: velocity_from_degrees(spec.speed, angle_deg),
            angle_deg,
            texture_key: spec.texture_key.clone(),
            scale: spec.scale,
            speed_mod: spec.speed_mod,
            trajectory: spec.trajectory,
            lifetime_ms: spec.lifetime_ms,
            on_death_shot: spec.on_death_shot.clone(),
            fire_rate: spec.fire_rate.clone(),
        });
    }
}

/// Per-shooter firing state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Emitter {
    /// Accumulated ROTARY base angle (degrees, [0, 360))
    pub rotary_angle_deg: f64,
    /// Seconds of emitter time driving launch-time WAVE offsets
    pub wave_timer: f64,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the launch wave clock
    pub fn advance(&mut self, dt: f64) {
        self.wave_timer += dt;
    }

    /// Fire `spec` from `origin`, updating rotary state
    ///
    /// ROTARY advances the accumulator once per call (not per second) and
    /// replaces the base angle for this call.
    pub fn fire(
        &mut self,
        spec: &ShotSpec,
        origin: DVec2,
        default_angle_deg: f64,
        out: &mut Vec<ShotRequest>,
    ) {
        let mut base = spec.base_angle_deg.unwrap_or(default_angle_deg);
        let mut wave_offset = 0.0;

        if let Some(trajectory) = spec.trajectory {
            match trajectory.mode {
                TrajectoryMode::Rotary => {
                    self.rotary_angle_deg =
                        normalize_degrees(self.rotary_angle_deg + trajectory.rate);
                    base = self.rotary_angle_deg;
                }
                TrajectoryMode::Wave => {
                    wave_offset = (self.wave_timer * trajectory.rate).sin() * trajectory.range_deg();
                }
                TrajectoryMode::Fixed => {}
            }
        }

        resolve_shots(spec, origin, base, wave_offset, out);
    }
}
