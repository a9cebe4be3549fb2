//! Pig game state machine implementation.
//!
//! This module contains the core FSM logic: state management, the turn
//! engine, event generation, and outcome resolution.

use enum_dispatch::enum_dispatch;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt, time::Duration};
use thiserror::Error;

use super::constants::{DEFAULT_TIME_LIMIT_SECS, MIN_PLAYERS, TARGET_SCORE};
use super::entities::{Die, Face, Player, PlayerName, Roll, RollOutcome, Score, ScoreBox, TurnDecision};
use super::states::{AwaitingTurnStart, GameOver, Rolling, TurnEnded};
use super::timer::GameTimer;

/// Errors that can occur while setting up a game. Stepping the machine
/// itself never fails.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum GameError {
    #[error("need 2+ players")]
    NotEnoughPlayers,
    #[error("target score must be greater than zero")]
    ZeroTargetScore,
    #[error("starting player index {0} out of bounds")]
    InvalidStartingPlayer(usize),
}

/// A single player's line on the scoreboard.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerView {
    pub name: PlayerName,
    pub score: Score,
}

impl fmt::Display for PlayerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.score)
    }
}

/// Scoreboard snapshot, in seating order.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Standings(pub Vec<PlayerView>);

impl fmt::Display for Standings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{repr}")
    }
}

/// Final result of a game. A tie for the highest score is a draw.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameOutcome {
    Winner { name: PlayerName, score: Score },
    Draw { score: Score },
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Winner { name, score } => format!("{name} has won with {score} points"),
            Self::Draw { score } => format!("draw at {score} points"),
        };
        write!(f, "{repr}")
    }
}

/// Events that occur during gameplay. Drained by the front end and printed
/// between steps; together they reconstruct the whole game.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameEvent {
    GameStarted { target: Score },
    StartingPlayer(PlayerName),
    StandingsUpdated(Standings),
    TurnStarted(PlayerName),
    Rolled { face: Face, pending: Score },
    RolledOne(PlayerName),
    Banked { player: PlayerName, amount: Score, total: Score },
    TimeExpired { limit: Duration },
    GameEnded(GameOutcome),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::GameStarted { target } => format!("first to {target} points wins"),
            Self::StartingPlayer(name) => format!("{name} starts"),
            Self::StandingsUpdated(standings) => format!("current score --> {standings}"),
            Self::TurnStarted(name) => format!("*** {name} to play ***"),
            Self::Rolled { face, pending } => {
                format!("last roll: {face}, new box value: {pending}")
            }
            Self::RolledOne(name) => format!("{name} rolled one, switching turns"),
            Self::Banked {
                player,
                amount,
                total,
            } => format!("{player} banks {amount} points for a total of {total}"),
            Self::TimeExpired { limit } => {
                format!("times up! {} seconds have passed", limit.as_secs())
            }
            Self::GameEnded(outcome) => outcome.to_string(),
        };
        write!(f, "{repr}")
    }
}

/// Game configuration settings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSettings {
    /// First score at or past this wins. Overshoot is kept as-is.
    pub target_score: Score,
    /// Wall-clock cap on the whole game; `None` plays to the target.
    pub time_limit: Option<Duration>,
    /// Pinned starting player for reproducible games; `None` draws one
    /// uniformly at random.
    pub starting_player: Option<usize>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(TARGET_SCORE, None)
    }
}

impl GameSettings {
    #[must_use]
    pub const fn new(target_score: Score, time_limit: Option<Duration>) -> Self {
        Self {
            target_score,
            time_limit,
            starting_player: None,
        }
    }

    /// Default settings with the classic 60 second limit.
    #[must_use]
    pub const fn timed() -> Self {
        Self::new(
            TARGET_SCORE,
            Some(Duration::from_secs(DEFAULT_TIME_LIMIT_SECS)),
        )
    }
}

/// Mutable game data shared across all states.
#[derive(Debug)]
pub struct GameData {
    /// Die shared by all players. Instantiated once at game start.
    pub(super) die: Box<dyn Roll>,
    /// Pending points for the active turn. Only ever reflects the current
    /// player's not-yet-banked total.
    pub(super) score_box: ScoreBox,
    pub players: Vec<Player>,
    pub current_idx: usize,
    pub(super) timer: Option<GameTimer>,
    /// Queue of game events that give insight into what happened due to
    /// rolls, decisions, and state changes.
    pub(super) events: VecDeque<GameEvent>,
    pub(super) settings: GameSettings,
}

impl GameData {
    /// Game data with an OS-seeded die.
    pub fn new(players: Vec<Player>, settings: GameSettings) -> Result<Self, GameError> {
        Self::with_die(players, settings, Box::new(Die::new()))
    }

    /// Game data rolling a caller-supplied die.
    pub fn with_die(
        players: Vec<Player>,
        settings: GameSettings,
        die: Box<dyn Roll>,
    ) -> Result<Self, GameError> {
        let timer = settings.time_limit.map(GameTimer::new);
        Self::build(players, settings, die, timer)
    }

    /// Game data with an explicit timer, e.g. one driven by a test clock.
    pub fn with_timer(
        players: Vec<Player>,
        settings: GameSettings,
        die: Box<dyn Roll>,
        timer: GameTimer,
    ) -> Result<Self, GameError> {
        Self::build(players, settings, die, Some(timer))
    }

    fn build(
        players: Vec<Player>,
        settings: GameSettings,
        die: Box<dyn Roll>,
        timer: Option<GameTimer>,
    ) -> Result<Self, GameError> {
        if players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }
        if settings.target_score == 0 {
            return Err(GameError::ZeroTargetScore);
        }
        if let Some(idx) = settings.starting_player {
            if idx >= players.len() {
                return Err(GameError::InvalidStartingPlayer(idx));
            }
        }
        Ok(Self {
            die,
            score_box: ScoreBox::new(),
            players,
            current_idx: 0,
            timer,
            events: VecDeque::new(),
            settings,
        })
    }

    /// Pending points for the active turn.
    #[must_use]
    pub fn score_box(&self) -> &ScoreBox {
        &self.score_box
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }
}

/// Trait for reading game progress (standings, queued events).
#[enum_dispatch]
pub trait GameStateManagement {
    fn drain_events(&mut self) -> VecDeque<GameEvent>;

    /// Scoreboard snapshot in seating order.
    #[must_use]
    fn standings(&self) -> Standings;
}

/// A Pig game with data and logic for running a game end-to-end.
///
/// This struct wraps game data and the current state; transitions are
/// `From` conversions between the per-state instantiations.
#[derive(Debug)]
pub struct Game<T> {
    pub data: GameData,
    pub state: T,
}

impl<T> Game<T> {
    fn current_player(&self) -> &Player {
        &self.data.players[self.data.current_idx]
    }
}

impl<T> GameStateManagement for Game<T> {
    fn drain_events(&mut self) -> VecDeque<GameEvent> {
        self.data.events.drain(..).collect()
    }

    fn standings(&self) -> Standings {
        Standings(
            self.data
                .players
                .iter()
                .map(|player| PlayerView {
                    name: player.name.clone(),
                    score: player.score,
                })
                .collect(),
        )
    }
}

/// Why a game is over, checked at each turn boundary. The target takes
/// precedence over the timer.
enum EndCondition {
    TargetReached,
    TimeExpired,
}

impl Game<AwaitingTurnStart> {
    fn end_condition(&self) -> Option<EndCondition> {
        let target = self.data.settings.target_score;
        if self.data.players.iter().any(|player| player.score >= target) {
            return Some(EndCondition::TargetReached);
        }
        match &self.data.timer {
            Some(timer) if timer.expired() => Some(EndCondition::TimeExpired),
            _ => None,
        }
    }
}

impl From<Game<AwaitingTurnStart>> for Game<Rolling> {
    fn from(mut value: Game<AwaitingTurnStart>) -> Self {
        value.data.score_box.reset();
        let standings = value.standings();
        let player = value.current_player().name.clone();
        value
            .data
            .events
            .push_back(GameEvent::StandingsUpdated(standings));
        value.data.events.push_back(GameEvent::TurnStarted(player));
        Self {
            data: value.data,
            state: Rolling {
                awaiting_decision: false,
            },
        }
    }
}

impl From<Game<Rolling>> for Game<TurnEnded> {
    fn from(mut value: Game<Rolling>) -> Self {
        let banked = value.data.score_box.value();
        let idx = value.data.current_idx;
        value.data.players[idx].add_score(banked);
        if banked > 0 {
            let player = &value.data.players[idx];
            value.data.events.push_back(GameEvent::Banked {
                player: player.name.clone(),
                amount: banked,
                total: player.score,
            });
        }
        Self {
            data: value.data,
            state: TurnEnded { banked },
        }
    }
}

impl From<Game<TurnEnded>> for Game<AwaitingTurnStart> {
    fn from(mut value: Game<TurnEnded>) -> Self {
        value.data.current_idx = (value.data.current_idx + 1) % value.data.players.len();
        Self {
            data: value.data,
            state: AwaitingTurnStart {},
        }
    }
}

impl From<Game<AwaitingTurnStart>> for Game<GameOver> {
    fn from(mut value: Game<AwaitingTurnStart>) -> Self {
        let timed_out = matches!(value.end_condition(), Some(EndCondition::TimeExpired));
        // The turn that was about to start never happened; the last
        // counted turn belongs to the previous player.
        let count = value.data.players.len();
        value.data.current_idx = (value.data.current_idx + count - 1) % count;
        if timed_out {
            if let Some(timer) = &value.data.timer {
                value.data.events.push_back(GameEvent::TimeExpired {
                    limit: timer.limit(),
                });
            }
        }
        let outcome = resolve_outcome(&value.data.players);
        log::debug!("game over: {outcome}");
        value
            .data
            .events
            .push_back(GameEvent::GameEnded(outcome.clone()));
        Self {
            data: value.data,
            state: GameOver { outcome, timed_out },
        }
    }
}

fn resolve_outcome(players: &[Player]) -> GameOutcome {
    let best = players.iter().map(|player| player.score).max().unwrap_or(0);
    let mut leaders = players.iter().filter(|player| player.score == best);
    match (leaders.next(), leaders.next()) {
        (Some(winner), None) => GameOutcome::Winner {
            name: winner.name.clone(),
            score: best,
        },
        _ => GameOutcome::Draw { score: best },
    }
}

/// The Pig FSM: one variant per state, stepped by consuming `self`.
#[enum_dispatch(GameStateManagement)]
#[derive(Debug)]
pub enum PigState {
    AwaitingTurnStart(Game<AwaitingTurnStart>),
    Rolling(Game<Rolling>),
    TurnEnded(Game<TurnEnded>),
    GameOver(Game<GameOver>),
}

impl From<GameData> for PigState {
    fn from(data: GameData) -> Self {
        Self::new(data)
    }
}

impl PigState {
    /// A fresh game in `AwaitingTurnStart`, with the starting player drawn
    /// and the opening events queued.
    #[must_use]
    pub fn new(mut data: GameData) -> Self {
        let starting = data
            .settings
            .starting_player
            .unwrap_or_else(|| rand::rng().random_range(0..data.players.len()));
        data.current_idx = starting;
        log::debug!(
            "new game: {} players, target {}",
            data.players.len(),
            data.settings.target_score
        );
        data.events.push_back(GameEvent::GameStarted {
            target: data.settings.target_score,
        });
        data.events
            .push_back(GameEvent::StartingPlayer(data.players[starting].name.clone()));
        Self::AwaitingTurnStart(Game {
            data,
            state: AwaitingTurnStart {},
        })
    }

    /// Advances the game by one transition. Turn boundaries check the
    /// terminal conditions; a `Rolling` step either rolls the die or
    /// resolves the pending roll-or-hold decision. `GameOver` absorbs.
    #[must_use]
    pub fn step(self) -> Self {
        match self {
            Self::AwaitingTurnStart(game) => {
                if game.end_condition().is_some() {
                    Self::GameOver(game.into())
                } else {
                    Self::Rolling(game.into())
                }
            }
            Self::Rolling(mut game) => {
                if game.state.awaiting_decision {
                    let pending = game.data.score_box.value();
                    let banked = game.current_player().score;
                    let idx = game.data.current_idx;
                    if game.data.players[idx].controls.keep_rolling(pending, banked) {
                        game.state.awaiting_decision = false;
                        Self::Rolling(game)
                    } else {
                        Self::TurnEnded(game.into())
                    }
                } else {
                    match game.data.die.roll() {
                        RollOutcome::Face(face) => {
                            game.data.score_box.add_die_value(face);
                            let pending = game.data.score_box.value();
                            game.data
                                .events
                                .push_back(GameEvent::Rolled { face, pending });
                            game.state.awaiting_decision = true;
                            Self::Rolling(game)
                        }
                        RollOutcome::Bust => {
                            game.data.score_box.reset();
                            let player = game.current_player().name.clone();
                            game.data.events.push_back(GameEvent::RolledOne(player));
                            Self::TurnEnded(game.into())
                        }
                    }
                }
            }
            Self::TurnEnded(game) => Self::AwaitingTurnStart(game.into()),
            Self::GameOver(game) => Self::GameOver(game),
        }
    }

    /// Steps until the game is over. Blocks on human prompts, so this is
    /// only sensible for bot-only or scripted games.
    #[must_use]
    pub fn run_to_end(mut self) -> Self {
        while !self.is_over() {
            self = self.step();
        }
        self
    }

    #[must_use]
    pub fn data(&self) -> &GameData {
        match self {
            Self::AwaitingTurnStart(game) => &game.data,
            Self::Rolling(game) => &game.data,
            Self::TurnEnded(game) => &game.data,
            Self::GameOver(game) => &game.data,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self, Self::GameOver(_))
    }

    /// The final result, once the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        match self {
            Self::GameOver(game) => Some(&game.state.outcome),
            _ => None,
        }
    }
}
