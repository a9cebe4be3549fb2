//! # Pig Dice
//!
//! A Pig dice game implementation using a type-safe finite state machine
//! (FSM) design.
//!
//! Players take turns rolling a die, accumulating points in a temporary
//! score box. Each roll is a gamble: a one wipes out the turn's pending
//! points and passes the die, while holding banks them for good. First to
//! the target score wins; an optional timer can call the game early.
//!
//! ## Architecture
//!
//! The game consists of 4 distinct phases (states), each representing a
//! specific point in a turn's lifecycle:
//!
//! - **AwaitingTurnStart**: Checking terminal conditions, opening a turn
//! - **Rolling**: The active player rolling and deciding to roll or hold
//! - **TurnEnded**: Banking the box (or nothing, after a bust)
//! - **GameOver**: Terminal, carrying the resolved outcome
//!
//! State transitions are driven by [`PigState::step`], with `enum_dispatch`
//! for zero-cost trait dispatch across the states.
//!
//! ## Core Modules
//!
//! - [`game`]: Game state machine, entities, events, and the turn timer
//! - [`bot`]: Decision-making for computer players
//!
//! ## Example
//!
//! ```
//! use pig_dice::{GameData, GameSettings, PigState, entities::Player};
//!
//! let players = vec![Player::bot("alice"), Player::bot("bob")];
//! let data = GameData::new(players, GameSettings::default()).unwrap();
//! let mut game = PigState::new(data);
//! while !game.is_over() {
//!     game = game.step();
//! }
//! assert!(game.outcome().is_some());
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    GameData, GameError, GameEvent, GameOutcome, GameSettings, GameStateManagement, PigState,
    PlayerView, Standings,
    constants::{self, DEFAULT_TIME_LIMIT_SECS, HOLD_THRESHOLD, TARGET_SCORE},
    entities::{self, Die, Player},
    timer::{self, Clock, GameTimer, SystemClock},
};

/// Decision-making for computer players.
pub mod bot;
pub use bot::{BotControls, BotDifficulty, HoldPolicy};
