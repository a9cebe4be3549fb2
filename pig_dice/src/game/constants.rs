//! Game constants.

use super::entities::{Face, Score};

/// First player at or past this many points wins.
pub const TARGET_SCORE: Score = 100;

/// Pending box value at which a standard bot banks.
pub const HOLD_THRESHOLD: Score = 25;

/// Number of faces on the die.
pub const DIE_FACES: Face = 6;

/// Default timed-game length, in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 60;

/// Longest player name kept after sanitization.
pub const MAX_NAME_LENGTH: usize = 16;

/// A game needs at least this many players.
pub const MIN_PLAYERS: usize = 2;
