//! Gameplay tuning values, overridable from a JSON blob.
//!
//! Everything here has a sensible built-in default so the game runs with
//! no config file at all; a bad or partial blob degrades to the defaults
//! for the fields it omits.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Relaunch speed of the ball at score 0, pixels per second.
    pub base_ball_speed: f32,
    /// Keeper sweep speed at score 0, pixels per frame.
    pub base_keeper_speed: f32,
    /// Sideways push applied on relaunch, toward table center, px/s.
    pub lateral_push: f32,
    /// Frames after a relaunch during which sensors are ignored.
    pub grace_frames: u32,
    /// Lives at the start of a session.
    pub starting_lives: i32,
    /// Most player-spawned props alive at once; oldest are evicted past this.
    pub prop_cap: usize,
    /// Optional ceiling on the difficulty multiplier. `None` means the
    /// original unbounded escalation.
    pub max_speed_multiplier: Option<f32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_ball_speed: 150.0,
            base_keeper_speed: 1.5,
            lateral_push: 25.0,
            grace_frames: 30,
            starting_lives: 3,
            prop_cap: 64,
            max_speed_multiplier: None,
        }
    }
}

impl Tuning {
    /// Parse a tuning override blob. Unknown fields are rejected so typos
    /// surface in the log instead of silently doing nothing.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
