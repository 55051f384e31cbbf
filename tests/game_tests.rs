//! Game state machine scenarios

use std::convert::Infallible;

use simon_seg::config::{GAME_START_BYTE, SEQUENCE_LEN};
use simon_seg::display::DisplayValue;
use simon_seg::game::{sequences_match, Difficulty, Game, GameState, Platform};
use simon_seg::messages;
use simon_seg::rng::SequenceRng;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Show(DisplayValue),
    Hold(u16),
    Discard,
}

#[derive(Default)]
struct MockPlatform {
    out: String,
    events: Vec<Event>,
    states: Vec<GameState>,
    jitter: u32,
}

impl MockPlatform {
    fn holds(&self) -> Vec<u16> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Hold(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    fn take_output(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

impl ufmt::uWrite for MockPlatform {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.out.push_str(s);
        Ok(())
    }
}

impl Platform for MockPlatform {
    fn show(&mut self, value: DisplayValue) {
        self.events.push(Event::Show(value));
    }

    fn hold_ms(&mut self, ms: u16) {
        self.jitter = self.jitter.wrapping_add(ms as u32);
        self.events.push(Event::Hold(ms));
    }

    fn entropy(&mut self) -> u32 {
        self.jitter
    }

    fn discard_input(&mut self) {
        self.events.push(Event::Discard);
    }

    fn trace(&mut self, state: GameState) {
        self.states.push(state);
    }
}

fn game() -> Game {
    Game::new(SequenceRng::new(12345))
}

/// Play up to the input phase with the given difficulty byte.
fn start_round(game: &mut Game, p: &mut MockPlatform, difficulty: u8) {
    game.run(p).unwrap();
    assert_eq!(game.state(), GameState::WaitingToStart);
    assert!(game.on_byte(GAME_START_BYTE, p));
    game.run(p).unwrap();
    assert_eq!(game.state(), GameState::WaitingForDiff);
    assert!(game.on_byte(difficulty, p));
    game.run(p).unwrap();
    assert_eq!(game.state(), GameState::WaitingForInput);
}

fn answer(game: &mut Game, p: &mut MockPlatform, bytes: &[u8]) {
    for &b in bytes {
        assert!(game.on_byte(b, p));
    }
}

#[test]
fn test_start_prompt_then_wait() {
    let mut game = game();
    let mut p = MockPlatform::default();

    game.run(&mut p).unwrap();

    assert_eq!(game.state(), GameState::WaitingToStart);
    assert_eq!(p.out, messages::START_GAME);
    assert_eq!(p.states, vec![GameState::WaitingToStart]);
}

#[test]
fn test_difficulty_two_scenario() {
    let mut game = game();
    let mut p = MockPlatform::default();

    game.run(&mut p).unwrap();
    game.on_byte(GAME_START_BYTE, &mut p);
    assert_eq!(game.state(), GameState::SelectDiff);

    p.take_output();
    game.run(&mut p).unwrap();
    assert_eq!(p.out, messages::SELECT_DIFFICULTY);
    assert_eq!(game.state(), GameState::WaitingForDiff);

    game.on_byte(2, &mut p);
    assert_eq!(game.state(), GameState::ShowNumbers);
    assert_eq!(game.session().difficulty.hold_ms(), 1500);

    game.run(&mut p).unwrap();
    assert_eq!(game.state(), GameState::WaitingForInput);
    assert_eq!(p.holds(), vec![1500; SEQUENCE_LEN]);
}

#[test]
fn test_show_phase_displays_target_then_blanks() {
    let mut game = game();
    let mut p = MockPlatform::default();

    start_round(&mut game, &mut p, 1);

    let target = game.session().target;
    let mut expected = Vec::new();
    for &value in target.iter() {
        expected.push(Event::Show(DisplayValue::Number(value)));
        expected.push(Event::Hold(2000));
    }
    expected.push(Event::Show(DisplayValue::Blank));
    expected.push(Event::Discard);
    assert_eq!(p.events, expected);

    for pair in target.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
    assert!(target.iter().all(|&v| v <= 99));
}

#[test]
fn test_non_start_byte_resends_prompt() {
    let mut game = game();
    let mut p = MockPlatform::default();

    game.run(&mut p).unwrap();
    assert_eq!(p.take_output(), messages::START_GAME);

    assert!(game.on_byte(b'x', &mut p));
    assert_eq!(game.state(), GameState::GameStart);
    game.run(&mut p).unwrap();
    assert_eq!(game.state(), GameState::WaitingToStart);
    assert_eq!(p.take_output(), messages::START_GAME);

    assert!(game.on_byte(1, &mut p));
    game.run(&mut p).unwrap();
    assert_eq!(p.out, messages::START_GAME);

    // The start byte still works after stray input.
    assert!(game.on_byte(GAME_START_BYTE, &mut p));
    assert_eq!(game.state(), GameState::SelectDiff);
}

#[test]
fn test_unknown_difficulty_defaults_to_easy() {
    let mut game = game();
    let mut p = MockPlatform::default();

    start_round(&mut game, &mut p, 0x7F);

    assert_eq!(game.session().difficulty, Difficulty::Easy);
    assert_eq!(p.holds(), vec![2000; SEQUENCE_LEN]);
}

#[test]
fn test_hard_difficulty_hold() {
    let mut game = game();
    let mut p = MockPlatform::default();

    start_round(&mut game, &mut p, b'3');

    assert_eq!(p.holds(), vec![750; SEQUENCE_LEN]);
}

#[test]
fn test_matching_input_wins_and_scores() {
    let mut game = game();
    let mut p = MockPlatform::default();

    start_round(&mut game, &mut p, 2);
    let target = game.session().target;
    answer(&mut game, &mut p, &target);
    assert_eq!(game.state(), GameState::GameResult);

    p.take_output();
    game.run(&mut p).unwrap();

    assert!(game.session().last_won);
    assert_eq!(game.session().score, 1);
    assert_eq!(game.state(), GameState::WaitingToStart);

    let mut expected = String::new();
    expected.push_str(messages::WIN_GAME);
    expected.push('1');
    expected.push_str(messages::SPACES);
    expected.push_str(messages::START_GAME);
    assert_eq!(p.out, expected);
}

#[test]
fn test_score_carries_across_wins() {
    let mut game = game();
    let mut p = MockPlatform::default();

    for round in 1..=3u8 {
        start_round(&mut game, &mut p, 3);
        let target = game.session().target;
        answer(&mut game, &mut p, &target);
        game.run(&mut p).unwrap();
        assert_eq!(game.session().score, round);
    }
}

#[test]
fn test_single_mismatch_loses_and_resets_score() {
    let mut game = game();
    let mut p = MockPlatform::default();

    start_round(&mut game, &mut p, 2);
    let target = game.session().target;
    answer(&mut game, &mut p, &target);
    game.run(&mut p).unwrap();
    assert_eq!(game.session().score, 1);

    start_round(&mut game, &mut p, 2);
    let mut wrong = game.session().target;
    wrong[SEQUENCE_LEN - 1] = wrong[SEQUENCE_LEN - 1].wrapping_add(1);
    answer(&mut game, &mut p, &wrong);

    p.take_output();
    game.run(&mut p).unwrap();

    assert!(!game.session().last_won);
    assert_eq!(game.session().score, 0);
    assert!(p.out.starts_with(messages::LOSE_GAME));
    assert!(p.out.contains(&format!("{}0{}", messages::LOSE_GAME, messages::SPACES)));
}

#[test]
fn test_input_count_stops_at_sequence_len() {
    let mut game = game();
    let mut p = MockPlatform::default();

    start_round(&mut game, &mut p, 1);
    for i in 0..SEQUENCE_LEN {
        assert_eq!(game.session().receive_count(), i);
        assert_eq!(game.state(), GameState::WaitingForInput);
        game.on_byte(0, &mut p);
    }
    assert_eq!(game.state(), GameState::GameResult);

    // Byte outside an input state is dropped.
    assert!(!game.on_byte(0, &mut p));
    assert_eq!(game.session().receive_count(), SEQUENCE_LEN);
}

#[test]
fn test_full_round_trace() {
    let mut game = game();
    let mut p = MockPlatform::default();

    start_round(&mut game, &mut p, 1);
    answer(&mut game, &mut p, &[100; SEQUENCE_LEN]);
    game.run(&mut p).unwrap();

    assert_eq!(
        p.states,
        vec![
            GameState::WaitingToStart,
            GameState::SelectDiff,
            GameState::WaitingForDiff,
            GameState::ShowNumbers,
            GameState::WaitingForInput,
            GameState::GameResult,
            GameState::GameStart,
            GameState::WaitingToStart,
        ]
    );
}

#[test]
fn test_sequence_comparison_is_positional() {
    let target = [5, 12, 47, 3, 88, 19, 60, 7, 33, 91];
    let mut received = target;
    assert!(sequences_match(&target, &received));

    received[0] = 12;
    received[1] = 5;
    assert!(!sequences_match(&target, &received));

    let mut one_off = target;
    one_off[9] = 90;
    assert!(!sequences_match(&target, &one_off));
}
