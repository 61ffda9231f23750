//! Score-linked difficulty scaling.
//!
//! One pure function feeds both the ball relaunch speed and the keeper's
//! sweep speed, so the two always escalate in lockstep.

/// Speed multiplier for the current score. Negative scores (the drop
/// penalty can push below zero) are treated as zero so the game never
/// slows below its base pace.
pub fn speed_multiplier(score: i32) -> f32 {
    1.0 + 0.5 * score.max(0) as f32
}

/// Multiplier with an optional ceiling. `None` preserves the unclamped
/// escalation; shells that want a playable upper bound set a cap in
/// [`crate::tuning::Tuning`].
pub fn capped_multiplier(score: i32, cap: Option<f32>) -> f32 {
    let m = speed_multiplier(score);
    match cap {
        Some(limit) => m.min(limit),
        None => m,
    }
}
