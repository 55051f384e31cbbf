//! Two-digit time-multiplexed seven-segment display.
//!
//! The multiplexer owns the hardware lines and the [`DisplayState`]. Other
//! contexts only ever publish a [`DisplayValue`]; the next tick picks it up.

use embedded_hal::digital::{OutputPin, PinState};

use crate::config::MAX_GAME_NUMBER;
use crate::segment::{encode, BLANK};

/// Number shown on the two digits, or nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DisplayValue {
    #[default]
    Blank,
    Number(u8),
}

impl DisplayValue {
    /// Digit indices for (left, right). Values above 99 render blank.
    pub fn digits(self) -> (u8, u8) {
        match self {
            DisplayValue::Number(n) if n <= MAX_GAME_NUMBER => (n / 10, n % 10),
            _ => (BLANK, BLANK),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Left,
    Right,
}

impl Position {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Position::Left => Position::Right,
            Position::Right => Position::Left,
        }
    }
}

/// Patterns last shifted out for each position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayState {
    pub left: u8,
    pub right: u8,
    pub active: Position,
}

impl DisplayState {
    pub const fn new() -> Self {
        Self {
            left: 0,
            right: 0,
            active: Position::Left,
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Display lines: shift register data and clock, latch, digit select.
///
/// Digit select is high for the right digit.
pub struct Multiplexer<D, C, L, S> {
    data: D,
    clock: C,
    latch: L,
    select: S,
    state: DisplayState,
}

impl<D, C, L, S> Multiplexer<D, C, L, S>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
    S: OutputPin,
{
    pub fn new(data: D, clock: C, latch: L, select: S) -> Self {
        Self {
            data,
            clock,
            latch,
            select,
            state: DisplayState::new(),
        }
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// One multiplex tick: switch to the other digit and refresh it.
    ///
    /// Runs in interrupt context and must not stall, so pin errors are
    /// dropped.
    pub fn tick(&mut self, value: DisplayValue) {
        let active = self.state.active.other();
        let (left, right) = value.digits();
        let pattern = match active {
            Position::Left => encode(left),
            Position::Right => encode(right),
        };

        drive(&mut self.select, active == Position::Right);
        self.shift_out(pattern);

        match active {
            Position::Left => self.state.left = pattern,
            Position::Right => self.state.right = pattern,
        }
        self.state.active = active;
    }

    fn shift_out(&mut self, pattern: u8) {
        for bit in (0..8).rev() {
            drive(&mut self.data, pattern & (1 << bit) != 0);
            drive(&mut self.clock, false);
            drive(&mut self.clock, true);
        }
        drive(&mut self.latch, true);
        drive(&mut self.latch, false);
    }
}

#[inline]
fn drive<P: OutputPin>(pin: &mut P, high: bool) {
    pin.set_state(PinState::from(high)).ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_split_tens_and_units() {
        assert_eq!(DisplayValue::Number(47).digits(), (4, 7));
        assert_eq!(DisplayValue::Number(5).digits(), (0, 5));
        assert_eq!(DisplayValue::Number(100).digits(), (BLANK, BLANK));
        assert_eq!(DisplayValue::Blank.digits(), (BLANK, BLANK));
    }
}
