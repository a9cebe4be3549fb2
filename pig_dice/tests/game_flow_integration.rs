/// Integration tests for game flow scenarios
///
/// These tests drive the FSM with scripted dice, scripted prompts, and a
/// manual clock to verify turn accounting, rotation, and termination.
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use pig_dice::entities::{Face, NumberPrompt, Player, Roll, RollOutcome};
use pig_dice::timer::{Clock, GameTimer};
use pig_dice::{
    GameData, GameError, GameEvent, GameOutcome, GameSettings, GameStateManagement, PigState,
};

/// Die that plays back a fixed sequence of faces.
#[derive(Debug)]
struct ScriptedDie {
    faces: VecDeque<Face>,
}

impl ScriptedDie {
    fn new(faces: &[Face]) -> Box<Self> {
        Box::new(Self {
            faces: faces.iter().copied().collect(),
        })
    }
}

impl Roll for ScriptedDie {
    fn roll(&mut self) -> RollOutcome {
        match self.faces.pop_front() {
            Some(1) => RollOutcome::Bust,
            Some(face) => RollOutcome::Face(face),
            None => panic!("scripted die ran out of faces"),
        }
    }
}

/// Prompt that answers roll-or-hold questions from a fixed script.
#[derive(Debug)]
struct ScriptedPrompt {
    answers: VecDeque<u32>,
}

impl NumberPrompt for ScriptedPrompt {
    fn read_number(&mut self, _prompt: &str, min: u32, _max: u32) -> u32 {
        self.answers.pop_front().unwrap_or(min)
    }
}

/// Manually advanced clock shared with the test body.
#[derive(Clone, Debug, Default)]
struct ManualClock(Rc<Cell<Duration>>);

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.0.get()
    }
}

fn scripted_player(name: &str, answers: &[u32]) -> Player {
    Player::human(
        name,
        Box::new(ScriptedPrompt {
            answers: answers.iter().copied().collect(),
        }),
    )
}

fn pinned(starting_player: usize) -> GameSettings {
    GameSettings {
        starting_player: Some(starting_player),
        ..GameSettings::default()
    }
}

/// Runs a game to completion, collecting every emitted event.
fn run_game(data: GameData) -> (PigState, Vec<GameEvent>) {
    let mut game = PigState::new(data);
    let mut events = Vec::new();
    while !game.is_over() {
        events.extend(game.drain_events());
        game = game.step();
    }
    events.extend(game.drain_events());
    (game, events)
}

fn turn_starts(events: &[GameEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::TurnStarted(name) => Some(name.to_string()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_hold_banks_exact_sum() {
    let players = vec![scripted_player("alice", &[1, 1, 0]), scripted_player("bob", &[])];
    let mut settings = pinned(0);
    settings.target_score = 10;
    let data = GameData::with_die(players, settings, ScriptedDie::new(&[3, 4, 5])).unwrap();

    let (game, events) = run_game(data);

    assert_eq!(game.data().players[0].score, 12);
    assert_eq!(game.data().players[1].score, 0);
    assert!(events.contains(&GameEvent::Banked {
        player: "alice".into(),
        amount: 12,
        total: 12,
    }));
    assert_eq!(
        game.outcome(),
        Some(&GameOutcome::Winner {
            name: "alice".into(),
            score: 12,
        })
    );
}

#[test]
fn test_rolled_one_busts_the_turn() {
    // alice accumulates 12 pending, then busts; bob's bot turn ends the
    // game by reaching the target.
    let players = vec![scripted_player("alice", &[1, 1, 1]), Player::bot("bob")];
    let mut settings = pinned(0);
    settings.target_score = 12;
    let die = ScriptedDie::new(&[6, 6, 1, 6, 6, 6, 6, 6]);
    let data = GameData::with_die(players, settings, die).unwrap();

    let (game, events) = run_game(data);

    assert_eq!(game.data().players[0].score, 0);
    assert!(events.contains(&GameEvent::RolledOne("alice".into())));
    assert!(!events.iter().any(|event| matches!(
        event,
        GameEvent::Banked { player, .. } if player.to_string() == "alice"
    )));
    assert_eq!(
        game.outcome(),
        Some(&GameOutcome::Winner {
            name: "bob".into(),
            score: 30,
        })
    );
}

#[test]
fn test_turn_rotation_is_strictly_cyclic() {
    let players = vec![
        scripted_player("a", &[]),
        scripted_player("b", &[]),
        scripted_player("c", &[]),
    ];
    let die = ScriptedDie::new(&[1, 1, 1, 1]);
    let data = GameData::with_die(players, pinned(0), die).unwrap();
    let mut game = PigState::new(data);

    let mut turn_order = Vec::new();
    for _ in 0..4 {
        // AwaitingTurnStart -> Rolling opens the turn.
        game = game.step();
        turn_order.push(game.data().current_idx);
        // A single bust roll ends the turn; advance to the next boundary.
        game = game.step();
        game = game.step();
    }

    assert_eq!(turn_order, vec![0, 1, 2, 0]);
}

#[test]
fn test_bot_holds_at_threshold_and_overshoot_is_kept() {
    // The standard bot keeps rolling below 25 pending: 6, 12, 18, 24,
    // then banks at 30. The 30 > 20 overshoot is preserved.
    let players = vec![Player::bot("cpu1"), scripted_player("idle", &[])];
    let mut settings = pinned(0);
    settings.target_score = 20;
    let die = ScriptedDie::new(&[6, 6, 6, 6, 6]);
    let data = GameData::with_die(players, settings, die).unwrap();

    let (game, _) = run_game(data);

    assert_eq!(game.data().players[0].score, 30);
    assert_eq!(
        game.outcome(),
        Some(&GameOutcome::Winner {
            name: "cpu1".into(),
            score: 30,
        })
    );
}

#[test]
fn test_game_ends_at_first_boundary_after_target() {
    // alice banks 8, bob busts, alice banks 5 more to pass the target of
    // 10. The game ends at the next boundary, not mid-turn.
    let players = vec![scripted_player("alice", &[1, 0, 0]), scripted_player("bob", &[])];
    let mut settings = pinned(0);
    settings.target_score = 10;
    let die = ScriptedDie::new(&[4, 4, 1, 5]);
    let data = GameData::with_die(players, settings, die).unwrap();

    let (game, events) = run_game(data);

    assert_eq!(turn_starts(&events), vec!["alice", "bob", "alice"]);
    assert_eq!(
        game.outcome(),
        Some(&GameOutcome::Winner {
            name: "alice".into(),
            score: 13,
        })
    );
}

#[test]
fn test_time_expiry_ends_game_before_next_turn() {
    let clock = ManualClock::default();
    let players = vec![scripted_player("alice", &[0]), scripted_player("bob", &[])];
    let timer = GameTimer::with_clock(Duration::from_secs(60), Box::new(clock.clone()));
    let die = ScriptedDie::new(&[4]);
    let data = GameData::with_timer(players, pinned(0), die, timer).unwrap();
    let mut game = PigState::new(data);

    // alice's turn: one roll, then hold.
    game = game.step(); // -> Rolling
    game = game.step(); // roll 4
    game = game.step(); // hold -> TurnEnded
    game = game.step(); // -> AwaitingTurnStart (bob)
    clock.0.set(Duration::from_secs(60));
    game = game.step(); // boundary check -> GameOver

    assert!(game.is_over());
    // The interrupted turn does not count: the index rolls back to alice.
    assert_eq!(game.data().current_idx, 0);
    let events: Vec<_> = game.drain_events().into_iter().collect();
    assert!(events.contains(&GameEvent::TimeExpired {
        limit: Duration::from_secs(60),
    }));
    assert_eq!(
        game.outcome(),
        Some(&GameOutcome::Winner {
            name: "alice".into(),
            score: 4,
        })
    );
    // bob never got a turn.
    assert_eq!(turn_starts(&events), vec!["alice"]);
}

#[test]
fn test_equal_scores_at_time_expiry_is_a_draw() {
    let clock = ManualClock::default();
    let players = vec![scripted_player("alice", &[0]), scripted_player("bob", &[0])];
    let timer = GameTimer::with_clock(Duration::from_secs(60), Box::new(clock.clone()));
    let die = ScriptedDie::new(&[6, 6]);
    let data = GameData::with_timer(players, pinned(0), die, timer).unwrap();
    let mut game = PigState::new(data);

    // One banked turn each, then the clock runs out.
    for _ in 0..8 {
        game = game.step();
    }
    clock.0.set(Duration::from_secs(61));
    game = game.step();

    assert!(game.is_over());
    assert_eq!(game.outcome(), Some(&GameOutcome::Draw { score: 6 }));
    assert_eq!(game.data().current_idx, 1);
}

#[test]
fn test_standings_are_published_before_each_turn() {
    let players = vec![scripted_player("alice", &[0]), scripted_player("bob", &[])];
    let mut settings = pinned(0);
    settings.target_score = 4;
    let die = ScriptedDie::new(&[4]);
    let data = GameData::with_die(players, settings, die).unwrap();

    let (_, events) = run_game(data);

    assert_eq!(
        events[0],
        GameEvent::GameStarted { target: 4 }
    );
    assert_eq!(events[1], GameEvent::StartingPlayer("alice".into()));
    let standings: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            GameEvent::StandingsUpdated(standings) => Some(standings.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(standings, vec!["alice: 0, bob: 0"]);
}

#[test]
fn test_setup_validation() {
    assert_eq!(
        GameData::new(vec![Player::bot("solo")], GameSettings::default()).unwrap_err(),
        GameError::NotEnoughPlayers
    );

    let zero_target = GameSettings {
        target_score: 0,
        ..GameSettings::default()
    };
    assert_eq!(
        GameData::new(vec![Player::bot("a"), Player::bot("b")], zero_target).unwrap_err(),
        GameError::ZeroTargetScore
    );

    assert_eq!(
        GameData::new(vec![Player::bot("a"), Player::bot("b")], pinned(5)).unwrap_err(),
        GameError::InvalidStartingPlayer(5)
    );
}

#[test]
fn test_events_serialize() {
    let event = GameEvent::Banked {
        player: "alice".into(),
        amount: 12,
        total: 30,
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: GameEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(event, back);

    let outcome = GameOutcome::Winner {
        name: "alice".into(),
        score: 103,
    };
    let json = serde_json::to_string(&outcome).unwrap();
    let back: GameOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(outcome, back);
}
