//! Table-football arcade game built on the tilt-core engine.
//!
//! Two motorized paddles defend a bottom goal box while an oscillating
//! keeper guards the top goal mouth; sensor crossings drive score, lives
//! and a score-scaled relaunch protocol.

pub mod difficulty;
pub mod game;
pub mod keeper;
pub mod level;
pub mod paddles;
pub mod props;
pub mod state;
pub mod tuning;

pub use game::Futbolin;
pub use state::{Phase, TableEvent};
pub use tuning::Tuning;
