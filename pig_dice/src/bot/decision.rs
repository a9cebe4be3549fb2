//! Bot decision-making logic with difficulty-based hold thresholds.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::constants::{HOLD_THRESHOLD, TARGET_SCORE};
use crate::game::entities::{Score, TurnDecision};

/// Bot difficulty presets.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    Cautious, // banks early, rarely gambles away a big box
    Standard, // the classic hold-at-25 heuristic
    Greedy,   // pushes well past the classic threshold
}

impl BotDifficulty {
    /// Parses a difficulty name; `None` for anything unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cautious" => Some(Self::Cautious),
            "standard" => Some(Self::Standard),
            "greedy" => Some(Self::Greedy),
            _ => None,
        }
    }
}

impl fmt::Display for BotDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cautious => write!(f, "cautious"),
            Self::Standard => write!(f, "standard"),
            Self::Greedy => write!(f, "greedy"),
        }
    }
}

/// Parameters governing when a bot banks its pending points.
///
/// The policy is deterministic and pure: keep rolling iff
/// `min(max_turn_points, target_score - banked) > pending`. Rolling past
/// the mid-twenties sharply raises the odds of busting away the box, and
/// there is no reason to gamble for more points than the win requires.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HoldPolicy {
    /// Bank once the pending box reaches this many points.
    pub max_turn_points: Score,
    /// The score the bot is racing to; ambition shrinks as it nears.
    pub target_score: Score,
}

impl Default for HoldPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl HoldPolicy {
    #[must_use]
    pub const fn new(max_turn_points: Score, target_score: Score) -> Self {
        Self {
            max_turn_points,
            target_score,
        }
    }

    /// Banks at 20 pending points.
    #[must_use]
    pub const fn cautious() -> Self {
        Self::new(20, TARGET_SCORE)
    }

    /// The classic hold-at-25 policy.
    #[must_use]
    pub const fn standard() -> Self {
        Self::new(HOLD_THRESHOLD, TARGET_SCORE)
    }

    /// Banks at 32 pending points.
    #[must_use]
    pub const fn greedy() -> Self {
        Self::new(32, TARGET_SCORE)
    }

    /// Parameters for a given difficulty.
    #[must_use]
    pub const fn from_difficulty(difficulty: BotDifficulty) -> Self {
        match difficulty {
            BotDifficulty::Cautious => Self::cautious(),
            BotDifficulty::Standard => Self::standard(),
            BotDifficulty::Greedy => Self::greedy(),
        }
    }

    /// Whether to keep rolling, given the pending box value and the banked
    /// score.
    #[must_use]
    pub fn keep_rolling(&self, pending: Score, banked: Score) -> bool {
        self.max_turn_points
            .min(self.target_score.saturating_sub(banked))
            > pending
    }
}

/// Bot-driven turn controls.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct BotControls {
    pub policy: HoldPolicy,
}

impl BotControls {
    #[must_use]
    pub fn new(policy: HoldPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn from_difficulty(difficulty: BotDifficulty) -> Self {
        Self::new(HoldPolicy::from_difficulty(difficulty))
    }
}

impl TurnDecision for BotControls {
    fn keep_rolling(&mut self, pending: Score, banked: Score) -> bool {
        self.policy.keep_rolling(pending, banked)
    }
}
