//! Session state machine and the collision router.
//!
//! Sensor contacts reported by the physics step never mutate score or
//! lives directly. They are classified into a [`TableEvent`] and parked
//! in a single-slot pending queue; the frame loop consumes the slot once,
//! after the physics step has fully returned. Transform mutation during
//! a step is undefined behavior in the simulator, so this ordering is a
//! correctness rule, not a convenience.

use tilt_core::core::physics::ContactEvent;
use tilt_core::EntityId;

/// Top-level game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

/// A scoring-relevant sensor crossing, already classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    /// Ball entered the opponent's goal.
    Goal,
    /// Ball entered our own goal.
    OwnGoal,
    /// Ball fell off the table.
    Drop,
}

/// Maps the session's fixed sensor entities (and the ball) to events.
/// A contact is meaningful only when it is a sensor pair with the ball
/// on one side; everything else the simulator reports is ignored.
#[derive(Debug, Clone, Copy)]
pub struct SensorMap {
    pub ball: EntityId,
    pub goal: EntityId,
    pub own_goal: EntityId,
    pub drop: EntityId,
}

impl SensorMap {
    pub fn classify(&self, contact: &ContactEvent) -> Option<TableEvent> {
        if !contact.sensor {
            return None;
        }
        let other = if contact.a == self.ball {
            contact.b
        } else if contact.b == self.ball {
            contact.a
        } else {
            return None;
        };

        if other == self.goal {
            Some(TableEvent::Goal)
        } else if other == self.own_goal {
            Some(TableEvent::OwnGoal)
        } else if other == self.drop {
            Some(TableEvent::Drop)
        } else {
            None
        }
    }
}

/// Score, lives and the deferred-reset machinery for one session.
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: Phase,
    pub score: i32,
    pub lives: i32,
    /// Frames left in the post-relaunch grace window.
    pub grace_frames: u32,
    /// Single-slot pending queue; first writer per frame wins.
    pending: Option<TableEvent>,
    starting_lives: i32,
}

impl Session {
    pub fn new(starting_lives: i32) -> Self {
        Self {
            phase: Phase::Menu,
            score: 0,
            lives: starting_lives,
            grace_frames: 0,
            pending: None,
            starting_lives,
        }
    }

    /// Enter (or re-enter) Playing with a fresh score and full lives.
    pub fn start(&mut self) {
        self.phase = Phase::Playing;
        self.score = 0;
        self.lives = self.starting_lives;
        self.grace_frames = 0;
        self.pending = None;
    }

    /// Route one classified event into the pending slot. Rejected unless
    /// the session is Playing, the grace window is closed, and no event
    /// is already pending this frame. Returns whether it was accepted.
    pub fn request(&mut self, event: TableEvent) -> bool {
        if self.phase != Phase::Playing || self.grace_frames > 0 || self.pending.is_some() {
            return false;
        }
        self.pending = Some(event);
        true
    }

    /// Consume the pending slot, applying its score/lives effect.
    /// The caller relaunches the ball whenever this returns an event.
    pub fn take_pending(&mut self) -> Option<TableEvent> {
        let event = self.pending.take()?;
        match event {
            TableEvent::Goal => self.score += 1,
            TableEvent::OwnGoal => self.lives -= 1,
            TableEvent::Drop => self.score -= 1,
        }
        Some(event)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Arm the grace window after a relaunch.
    pub fn arm_grace(&mut self, frames: u32) {
        self.grace_frames = frames;
    }

    /// Count the grace window down by one frame, never below zero.
    pub fn tick_grace(&mut self) {
        self.grace_frames = self.grace_frames.saturating_sub(1);
    }

    /// Checked at the top of every Playing frame, after any pending life
    /// decrement from the previous frame has landed.
    pub fn check_game_over(&mut self) -> bool {
        if self.phase == Phase::Playing && self.lives <= 0 {
            self.phase = Phase::GameOver;
            return true;
        }
        false
    }
}
