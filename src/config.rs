//! Compile-time calibration and game constants.
//!
//! All values are fixed at build time. Timer values assume the 16 MHz
//! ATmega2560 clock of the Arduino Mega.

/// Number of one-bit samples captured per IR frame.
pub const SAMPLE_CAPACITY: usize = 512;

/// Minimum run-length excess of mark over space that decodes a logical 1.
pub const PULSE_TOLERANCE: u16 = 3;

/// Bytes of the decoded value sent per IR report, least-significant first.
pub const REPORT_BYTES: usize = 5;

/// A frame with fewer decoded bits than this is suspect.
pub const MIN_FRAME_BITS: u8 = 40;

/// Numbers shown per round.
pub const SEQUENCE_LEN: usize = 10;

/// Largest number the two digits can show.
pub const MAX_GAME_NUMBER: u8 = 99;

/// Byte that starts a round.
pub const GAME_START_BYTE: u8 = b'S';

/// Per-number hold, milliseconds.
pub const HOLD_EASY_MS: u16 = 2000;
pub const HOLD_MEDIUM_MS: u16 = 1500;
pub const HOLD_HARD_MS: u16 = 750;

pub const BAUD_RATE: u32 = 9600;

/// TIMER3 runs CTC at clk/8; TOP 249 gives an 8 kHz sample clock.
pub const SAMPLE_TIMER_TOP: u16 = 249;

/// Seed the generator starts from before the first jitter reseed.
pub const LCG_INITIAL_SEED: u32 = 0xDEAD_BEEF;
