//! Game state definitions for the Pig FSM.
//!
//! Each state represents a specific phase of a turn's lifecycle.

use crate::game::entities::Score;
use crate::game::state_machine::GameOutcome;

/// Waiting for the next turn to begin. Terminal conditions (target score
/// reached, timer expired) are checked here, before the turn opens.
#[derive(Debug)]
pub struct AwaitingTurnStart {}

/// The active player is rolling. `awaiting_decision` is set between a roll
/// landing in the box and the player's roll-or-hold answer, so a front end
/// can show the roll before the player is asked.
#[derive(Debug)]
pub struct Rolling {
    pub awaiting_decision: bool,
}

/// The active player's turn is over, banked or busted.
#[derive(Debug)]
pub struct TurnEnded {
    /// Points banked this turn; zero after a bust.
    pub banked: Score,
}

/// Terminal state carrying the final result.
#[derive(Clone, Debug)]
pub struct GameOver {
    pub outcome: GameOutcome,
    pub timed_out: bool,
}
