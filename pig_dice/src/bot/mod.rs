//! Decision-making for computer players.
//!
//! Bots play a pure threshold policy: keep rolling while the pending box
//! is below both the hold threshold and the points still needed to win.
//! Difficulty presets vary the threshold.

pub mod decision;

pub use decision::{BotControls, BotDifficulty, HoldPolicy};
