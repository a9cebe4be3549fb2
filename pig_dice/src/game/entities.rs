use enum_dispatch::enum_dispatch;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::constants::{DIE_FACES, MAX_NAME_LENGTH};
use crate::bot::BotControls;

/// Type alias for die faces.
pub type Face = u8;

/// Type alias for whole points. Scores only ever grow by at most one die
/// face per roll, so overflow is not a practical concern.
pub type Score = u32;

/// Outcome of a single roll. A one is not a value worth keeping; it is the
/// turn-ending bust signal, surfaced as its own variant so callers branch
/// on it instead of catching anything.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RollOutcome {
    Face(Face),
    Bust,
}

/// Source of die rolls. The engine owns one behind this trait so tests can
/// supply scripted sequences.
pub trait Roll: fmt::Debug {
    fn roll(&mut self) -> RollOutcome;
}

/// A six-sided die. Instantiated once at game start and shared by all
/// players.
#[derive(Debug)]
pub struct Die {
    value: Face,
    rng: StdRng,
}

impl Die {
    /// A die seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A die with a fixed seed, for reproducible games.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let value = rng.random_range(1..=DIE_FACES);
        Self { value, rng }
    }

    /// The last rolled face.
    #[must_use]
    pub fn value(&self) -> Face {
        self.value
    }
}

impl Default for Die {
    fn default() -> Self {
        Self::new()
    }
}

impl Roll for Die {
    fn roll(&mut self) -> RollOutcome {
        self.value = self.rng.random_range(1..=DIE_FACES);
        if self.value == 1 {
            RollOutcome::Bust
        } else {
            RollOutcome::Face(self.value)
        }
    }
}

/// Temporary holder for the active turn's not-yet-banked points. Reset at
/// the start of each turn and after a bust.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScoreBox {
    value: Score,
}

impl ScoreBox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn add_die_value(&mut self, face: Face) {
        self.value += Score::from(face);
    }

    /// The pending, not-yet-banked turn total.
    #[must_use]
    pub fn value(&self) -> Score {
        self.value
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: &str) -> Self {
        let mut name: String = s
            .chars()
            .map(|c| if c.is_ascii_whitespace() { '_' } else { c })
            .collect();
        name.truncate(MAX_NAME_LENGTH);
        Self(name)
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for PlayerName {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for PlayerName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Console input contract for human decisions.
///
/// Implementations keep asking until the response is a number within
/// `min..=max`, so a returned value is always in range. Validation and
/// retry live behind this trait, not in the engine.
pub trait NumberPrompt: fmt::Debug {
    fn read_number(&mut self, prompt: &str, min: u32, max: u32) -> u32;
}

/// Trait for the roll-or-hold decision, dispatched per player variant.
#[enum_dispatch]
pub trait TurnDecision {
    /// Whether the player wants to roll again, given the turn's pending
    /// box value and their banked score.
    fn keep_rolling(&mut self, pending: Score, banked: Score) -> bool;
}

/// Human-driven turn controls backed by an injected prompt.
#[derive(Debug)]
pub struct HumanControls {
    input: Box<dyn NumberPrompt>,
}

impl HumanControls {
    #[must_use]
    pub fn new(input: Box<dyn NumberPrompt>) -> Self {
        Self { input }
    }
}

impl TurnDecision for HumanControls {
    fn keep_rolling(&mut self, _pending: Score, _banked: Score) -> bool {
        self.input.read_number("  1 - Roll again, 0 - Hold? ", 0, 1) == 1
    }
}

/// How a player decides: asking a human, or a bot policy.
#[enum_dispatch(TurnDecision)]
#[derive(Debug)]
pub enum PlayerKind {
    Human(HumanControls),
    Bot(BotControls),
}

/// A player's name and banked score, plus their turn controls.
#[derive(Debug)]
pub struct Player {
    pub name: PlayerName,
    /// Cumulative banked score. Only ever grows.
    pub score: Score,
    pub controls: PlayerKind,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<PlayerName>, controls: PlayerKind) -> Self {
        Self {
            name: name.into(),
            score: 0,
            controls,
        }
    }

    /// A human player answering through the given prompt.
    #[must_use]
    pub fn human(name: impl Into<PlayerName>, input: Box<dyn NumberPrompt>) -> Self {
        Self::new(name, PlayerKind::Human(HumanControls::new(input)))
    }

    /// A bot player with the standard hold policy.
    #[must_use]
    pub fn bot(name: impl Into<PlayerName>) -> Self {
        Self::new(name, PlayerKind::Bot(BotControls::default()))
    }

    /// Adds a banked box value to the total score.
    pub fn add_score(&mut self, banked: Score) {
        self.score += banked;
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.score)
    }
}
