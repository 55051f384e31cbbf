//! Game-grade random numbers.
//!
//! The seed comes from [`Jitter`], a counter bumped on every multiplex tick.
//! How far it has advanced when a round starts depends on how long the
//! player took to answer, which is all the entropy a memory game needs. This
//! is not a cryptographic source.
//!
//! Range reduction divides a 15-bit draw by ten until it fits in 0..=99.
//! The result is far from uniform: 10..=32 dominate and single digits only
//! come from raw draws below ten. Kept that way on purpose.

use crate::config::{LCG_INITIAL_SEED, MAX_GAME_NUMBER};
use crate::mailbox::Shared;

/// Monotonic tick counter written by the multiplex interrupt.
pub struct Jitter {
    ticks: Shared<u32>,
}

impl Jitter {
    pub const fn new() -> Self {
        Self {
            ticks: Shared::new(0),
        }
    }

    /// Called once per multiplex tick.
    pub fn churn(&self) {
        self.ticks.set(self.ticks.get().wrapping_add(1));
    }

    pub fn sample(&self) -> u32 {
        self.ticks.get()
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear congruential generator.
pub struct SequenceRng {
    state: u32,
}

impl SequenceRng {
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Mix fresh jitter into the state.
    pub fn reseed(&mut self, jitter: u32) {
        self.state ^= jitter;
    }

    /// 15-bit draw.
    fn next_raw(&mut self) -> u16 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.state >> 17) as u16
    }

    /// Next number in 0..=99.
    pub fn next_value(&mut self) -> u8 {
        let mut x = self.next_raw();
        while x > MAX_GAME_NUMBER as u16 {
            x /= 10;
        }
        x as u8
    }

    /// Fill `out` so that no value equals its immediate predecessor.
    pub fn fill_distinct(&mut self, out: &mut [u8]) {
        let mut prev: Option<u8> = None;
        for slot in out.iter_mut() {
            let mut x = self.next_value();
            while Some(x) == prev {
                x = self.next_value();
            }
            *slot = x;
            prev = Some(x);
        }
    }
}

impl Default for SequenceRng {
    fn default() -> Self {
        Self::new(LCG_INITIAL_SEED)
    }
}
