//! # simon-seg
//!
//! Memory game for a two-digit seven-segment display, plus an infrared
//! remote decoder, sharing one AVR's timers and serial port.
//!
//! Everything here is hardware-independent and runs on the host. The board
//! binary wires it to interrupts:
//! - multiplex timer: [`display::Multiplexer::tick`] and [`rng::Jitter::churn`]
//! - sample timer: [`ir::IrReceiver::tick`], finished frames into a [`mailbox::Mailbox`]
//! - serial receive: bytes into a [`mailbox::ByteQueue`]
//! - main task: [`game::Game`], IR reports through [`serial::SerialLink`]

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod display;
pub mod game;
pub mod ir;
pub mod mailbox;
pub mod messages;
pub mod rng;
pub mod segment;
pub mod serial;

pub use display::{DisplayValue, Multiplexer};
pub use game::{Difficulty, Game, GameState, Platform};
pub use ir::{DecodedFrame, IrReceiver, PulseSampler};
pub use mailbox::{ByteQueue, Mailbox, Shared};
pub use rng::{Jitter, SequenceRng};
pub use serial::{Receive, SerialLink, Transmit};
