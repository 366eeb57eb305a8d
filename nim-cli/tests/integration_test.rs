//! Integration tests for single-pile Nim
//!
//! Tests the full core stack: rules, strategies, engine, scores

use nim_core::{
    generate_pile_size, validate_move, GameConfig, InputError, MoveError, MoveInput, MovePrompt,
    MoveStrategy, PileRange, PlayError, Player, RoundState, Seat, TurnEngine, TurnEvent,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Answers human prompts from a fixed script
struct ScriptedInput {
    moves: Vec<u32>,
    prompts: Vec<MovePrompt>,
}

impl ScriptedInput {
    fn new(moves: &[u32]) -> Self {
        Self {
            moves: moves.to_vec(),
            prompts: Vec::new(),
        }
    }
}

impl MoveInput for ScriptedInput {
    fn request_move(&mut self, prompt: &MovePrompt) -> Result<u32, InputError> {
        self.prompts.push(prompt.clone());
        if self.moves.is_empty() {
            Err(InputError::Closed)
        } else {
            Ok(self.moves.remove(0))
        }
    }
}

fn human_pair() -> [Player; 2] {
    [
        Player::human(Seat::One, "Alice"),
        Player::human(Seat::Two, "Bob"),
    ]
}

fn against_computer() -> [Player; 2] {
    [Player::human(Seat::One, "Alice"), Player::computer(Seat::Two)]
}

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

// ============================================================================
// RULES
// ============================================================================

#[test]
fn test_validate_move_property() {
    for pile in 2..=100u32 {
        for mv in 0..=pile + 1 {
            let expected = mv >= 1 && mv <= pile / 2;
            assert_eq!(validate_move(mv, pile), expected, "move {} pile {}", mv, pile);
        }
    }
}

#[test]
fn test_pile_generation_seeded() {
    let range = PileRange::default();
    let mut a = rng(2024);
    let mut b = rng(2024);
    for _ in 0..100 {
        let pile = generate_pile_size(range, &mut a);
        assert!((10..=50).contains(&pile));
        assert_eq!(pile, generate_pile_size(range, &mut b));
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_two_player_round_with_rejected_move() {
    let mut engine =
        TurnEngine::with_start(GameConfig::two_player(), human_pair(), rng(1), 10, Seat::One).unwrap();

    assert!(matches!(engine.submit_move(3), Ok(TurnEvent::Moved { pile: 7, .. })));
    assert_eq!(engine.state(), RoundState::AwaitingMove { active: Seat::Two });

    assert_eq!(
        engine.submit_move(4),
        Err(MoveError::InvalidMove { requested: 4, pile: 7, max: 3 })
    );
    assert_eq!(engine.pile(), 7);
    assert_eq!(engine.state(), RoundState::AwaitingMove { active: Seat::Two });

    assert!(matches!(engine.submit_move(3), Ok(TurnEvent::Moved { pile: 4, .. })));
    assert!(!engine.is_round_over());

    // Play on through the input collaborator: Alice 2 -> 2, Bob 1 -> 1
    let mut input = ScriptedInput::new(&[2, 1]);
    let mut outcome = None;
    while !engine.is_round_over() {
        if let TurnEvent::RoundOver { outcome: o, .. } = engine.play_turn(&mut input).unwrap() {
            outcome = Some(o);
        }
    }

    let outcome = outcome.unwrap();
    assert_eq!(outcome.winner, Seat::Two);
    assert_eq!(outcome.winner_name, "Bob");
    assert_eq!(engine.scores().score(Seat::Two), 1);
    assert_eq!(engine.scores().score(Seat::One), 0);
    assert_eq!(input.prompts[0].player_name, "Alice");
    assert_eq!(input.prompts[0].max_move, 2);
}

#[test]
fn test_invalid_move_through_input_is_retried_by_same_player() {
    let mut engine =
        TurnEngine::with_start(GameConfig::two_player(), human_pair(), rng(1), 9, Seat::Two).unwrap();
    let mut input = ScriptedInput::new(&[0, 5, 4]);

    assert!(matches!(
        engine.play_turn(&mut input),
        Err(PlayError::Move(MoveError::InvalidMove { .. }))
    ));
    assert!(matches!(
        engine.play_turn(&mut input),
        Err(PlayError::Move(MoveError::InvalidMove { .. }))
    ));
    assert_eq!(engine.active_player().unwrap().name, "Bob");
    assert!(matches!(
        engine.play_turn(&mut input),
        Ok(TurnEvent::Moved { seat: Seat::Two, removed: 4, pile: 5 })
    ));
    assert_eq!(engine.active_player().unwrap().name, "Alice");
}

#[test]
fn test_computer_leaving_one_wins_immediately() {
    let mut engine = TurnEngine::with_start(
        GameConfig::single_player(),
        against_computer(),
        rng(1),
        2,
        Seat::Two,
    )
    .unwrap();

    let mut input = ScriptedInput::new(&[]);
    match engine.play_turn(&mut input).unwrap() {
        TurnEvent::RoundOver { removed, outcome } => {
            assert_eq!(removed, 1);
            assert_eq!(outcome.winner, Seat::Two);
            assert_eq!(outcome.winner_name, "AI");
            assert!(outcome.forced);
        }
        other => panic!("expected round over, got {:?}", other),
    }
    assert!(input.prompts.is_empty());
    assert_eq!(engine.scores().score(Seat::Two), 1);
}

#[test]
fn test_single_player_against_heuristic() {
    // Pile 20, Alice first: 20 -4-> 16, AI -8-> 8, Alice -1-> 7, AI -3-> 4,
    // Alice -2-> 2, AI -1-> 1 and wins by the forced rule.
    let mut engine = TurnEngine::with_start(
        GameConfig::single_player(),
        against_computer(),
        rng(1),
        20,
        Seat::One,
    )
    .unwrap();
    let mut input = ScriptedInput::new(&[4, 1, 2]);
    let mut outcome = None;
    while !engine.is_round_over() {
        if let TurnEvent::RoundOver { outcome: o, .. } = engine.play_turn(&mut input).unwrap() {
            outcome = Some(o);
        }
    }
    let outcome = outcome.unwrap();
    assert_eq!(outcome.winner, Seat::Two);
    assert!(outcome.forced);
    let removed: Vec<u32> = engine.history().iter().map(|t| t.removed).collect();
    assert_eq!(removed, vec![4, 8, 1, 3, 2, 1]);
}

#[test]
fn test_human_can_beat_the_heuristic() {
    // Pile 10, AI first: AI -5-> 5, Alice -2-> 3, AI -1-> 2, Alice -1-> 1
    let mut engine = TurnEngine::with_start(
        GameConfig::single_player(),
        against_computer(),
        rng(1),
        10,
        Seat::Two,
    )
    .unwrap();
    let mut input = ScriptedInput::new(&[2, 1]);
    let mut outcome = None;
    while !engine.is_round_over() {
        if let TurnEvent::RoundOver { outcome: o, .. } = engine.play_turn(&mut input).unwrap() {
            outcome = Some(o);
        }
    }
    let outcome = outcome.unwrap();
    assert_eq!(outcome.winner, Seat::One);
    assert!(!outcome.forced);
    assert_eq!(engine.scores().score(Seat::One), 1);
}

// ============================================================================
// SESSIONS
// ============================================================================

#[test]
fn test_reset_starts_fresh_round() {
    let config = GameConfig::two_player().with_pile_range(10, 50);
    let mut engine =
        TurnEngine::with_start(config, human_pair(), rng(77), 2, Seat::One).unwrap();
    engine.submit_move(1).unwrap();
    assert_eq!(engine.state(), RoundState::RoundOver { winner: Seat::One });

    engine.reset();
    assert!((10..=50).contains(&engine.pile()));
    assert!(matches!(engine.state(), RoundState::AwaitingMove { .. }));
    assert!(engine.history().is_empty());
    assert_eq!(engine.round(), 2);
    assert_eq!(engine.scores().score(Seat::One), 1);
}

#[test]
fn test_seeded_sessions_match() {
    let make = || {
        let players = [
            Player::new(Seat::One, "A", MoveStrategy::Automated),
            Player::new(Seat::Two, "B", MoveStrategy::Perfect),
        ];
        TurnEngine::new(GameConfig::two_player(), players, rng(5)).unwrap()
    };
    let mut a = make();
    let mut b = make();
    let mut input = ScriptedInput::new(&[]);
    for _ in 0..10 {
        assert_eq!(a.pile(), b.pile());
        assert_eq!(a.state(), b.state());
        while !a.is_round_over() {
            a.play_turn(&mut input).unwrap();
            b.play_turn(&mut input).unwrap();
        }
        assert_eq!(a.history(), b.history());
        a.reset();
        b.reset();
    }
    assert_eq!(a.scores().total_rounds(), 10);
    assert_eq!(a.scores().score(Seat::Two), b.scores().score(Seat::Two));
}

#[test]
fn test_score_queries_are_stable() {
    let mut engine =
        TurnEngine::with_start(GameConfig::two_player(), human_pair(), rng(1), 3, Seat::One).unwrap();
    engine.submit_move(1).unwrap();
    let first = engine.scores().score(Seat::Two);
    let second = engine.scores().score(Seat::Two);
    assert_eq!(first, second);
    assert_eq!(first, 0);
    assert_eq!(engine.pile(), 2);
}
