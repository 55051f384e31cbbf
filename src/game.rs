//! Memory game state machine.
//!
//! Received bytes advance the machine one transition at a time through
//! [`Game::on_byte`]. States with no input dependency (prompts, the timed
//! show phase, scoring) are executed by [`Game::run`], which stops as soon
//! as the machine waits for a byte. The session lives entirely in the main
//! task; interrupt handlers only queue bytes.

use heapless::Vec;
use ufmt::{uwrite, uWrite};

use crate::config::{
    GAME_START_BYTE, HOLD_EASY_MS, HOLD_HARD_MS, HOLD_MEDIUM_MS, SEQUENCE_LEN,
};
use crate::display::DisplayValue;
use crate::messages;
use crate::rng::SequenceRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    GameStart,
    WaitingToStart,
    SelectDiff,
    WaitingForDiff,
    ShowNumbers,
    WaitingForInput,
    GameResult,
}

impl GameState {
    pub fn name(self) -> &'static str {
        match self {
            GameState::GameStart => "GAME_START",
            GameState::WaitingToStart => "WAITING_TO_START",
            GameState::SelectDiff => "SELECT_DIFF",
            GameState::WaitingForDiff => "WAITING_FOR_DIFF",
            GameState::ShowNumbers => "SHOW_NUMBERS",
            GameState::WaitingForInput => "WAITING_FOR_INPUT",
            GameState::GameResult => "GAME_RESULT",
        }
    }

    /// States that only leave on a received byte.
    pub fn awaits_byte(self) -> bool {
        matches!(
            self,
            GameState::WaitingToStart | GameState::WaitingForDiff | GameState::WaitingForInput
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// 1, 2 and 3 select a preset, raw or as ASCII digits. Anything else is easy.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            2 | b'2' => Difficulty::Medium,
            3 | b'3' => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }

    /// How long each number stays on the display.
    pub fn hold_ms(self) -> u16 {
        match self {
            Difficulty::Easy => HOLD_EASY_MS,
            Difficulty::Medium => HOLD_MEDIUM_MS,
            Difficulty::Hard => HOLD_HARD_MS,
        }
    }
}

/// What the machine needs from the board.
///
/// Text goes out through the `uWrite` supertrait.
pub trait Platform: uWrite {
    fn show(&mut self, value: DisplayValue);

    /// Hold for `ms` milliseconds. Always runs to completion.
    fn hold_ms(&mut self, ms: u16);

    /// Current value of the jitter counter.
    fn entropy(&mut self) -> u32;

    /// Drop every byte received so far.
    fn discard_input(&mut self);

    fn trace(&mut self, _state: GameState) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    pub difficulty: Difficulty,
    pub target: [u8; SEQUENCE_LEN],
    pub received: Vec<u8, SEQUENCE_LEN>,
    pub score: u8,
    pub last_won: bool,
}

impl GameSession {
    pub const fn new() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            target: [0; SEQUENCE_LEN],
            received: Vec::new(),
            score: 0,
            last_won: false,
        }
    }

    pub fn receive_count(&self) -> usize {
        self.received.len()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Every position must match.
pub fn sequences_match(target: &[u8], received: &[u8]) -> bool {
    target.len() == received.len() && target.iter().zip(received).all(|(a, b)| a == b)
}

pub struct Game {
    state: GameState,
    session: GameSession,
    rng: SequenceRng,
}

impl Game {
    pub fn new(rng: SequenceRng) -> Self {
        Self {
            state: GameState::GameStart,
            session: GameSession::new(),
            rng,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Feed one received byte. Returns `false` if the current state does
    /// not take input and the byte was dropped.
    ///
    /// Any byte other than the start byte sends the start prompt again.
    pub fn on_byte<P: Platform>(&mut self, byte: u8, p: &mut P) -> bool {
        let next = match self.state {
            GameState::WaitingToStart if byte == GAME_START_BYTE => GameState::SelectDiff,
            GameState::WaitingToStart => GameState::GameStart,
            GameState::WaitingForDiff => {
                self.session.difficulty = Difficulty::from_byte(byte);
                GameState::ShowNumbers
            }
            GameState::WaitingForInput => {
                // Cannot overflow: the state changes on the last slot.
                self.session.received.push(byte).ok();
                if !self.session.received.is_full() {
                    return true;
                }
                GameState::GameResult
            }
            _ => return false,
        };
        self.enter(next, p);
        true
    }

    /// Execute states that need no input until the machine waits for a byte.
    pub fn run<P: Platform>(&mut self, p: &mut P) -> Result<(), P::Error> {
        while !self.state.awaits_byte() {
            let next = match self.state {
                GameState::GameStart => {
                    p.write_str(messages::START_GAME)?;
                    GameState::WaitingToStart
                }
                GameState::SelectDiff => {
                    p.write_str(messages::SELECT_DIFFICULTY)?;
                    GameState::WaitingForDiff
                }
                GameState::ShowNumbers => {
                    self.show_numbers(p);
                    GameState::WaitingForInput
                }
                GameState::GameResult => {
                    self.report_result(p)?;
                    GameState::GameStart
                }
                waiting => waiting,
            };
            self.enter(next, p);
        }
        Ok(())
    }

    fn enter<P: Platform>(&mut self, next: GameState, p: &mut P) {
        self.state = next;
        p.trace(next);
    }

    fn show_numbers<P: Platform>(&mut self, p: &mut P) {
        self.rng.reseed(p.entropy());
        self.rng.fill_distinct(&mut self.session.target);
        self.session.received.clear();

        let hold = self.session.difficulty.hold_ms();
        for &value in self.session.target.iter() {
            p.show(DisplayValue::Number(value));
            p.hold_ms(hold);
        }

        p.show(DisplayValue::Blank);
        p.discard_input();
    }

    fn report_result<P: Platform>(&mut self, p: &mut P) -> Result<(), P::Error> {
        let won = sequences_match(&self.session.target, &self.session.received);
        self.session.last_won = won;
        self.session.received.clear();

        if won {
            self.session.score = self.session.score.saturating_add(1);
            uwrite!(p, "{}{}{}", messages::WIN_GAME, self.session.score, messages::SPACES)
        } else {
            self.session.score = 0;
            uwrite!(p, "{}{}{}", messages::LOSE_GAME, self.session.score, messages::SPACES)
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(SequenceRng::default())
    }
}
