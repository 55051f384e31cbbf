//! Byte-level serial channel seams.
//!
//! The hardware side only has to provide non-blocking single-byte transmit
//! and receive. [`SerialLink`] adds the busy-wait transmit, string output via
//! `ufmt` and the IR report framing on top.

use crate::ir::DecodedFrame;
use crate::mailbox::ByteQueue;

/// Non-blocking transmit. `WouldBlock` means the data register is busy.
pub trait Transmit {
    type Error;

    fn try_transmit(&mut self, byte: u8) -> nb::Result<(), Self::Error>;
}

/// Non-blocking receive. `WouldBlock` means no byte is ready.
pub trait Receive {
    type Error;

    fn try_receive(&mut self) -> nb::Result<u8, Self::Error>;
}

/// Bytes queued by the receive interrupt.
impl<const N: usize> Receive for &ByteQueue<N> {
    type Error = core::convert::Infallible;

    fn try_receive(&mut self) -> nb::Result<u8, Self::Error> {
        self.pop().ok_or(nb::Error::WouldBlock)
    }
}

pub struct SerialLink<T> {
    tx: T,
}

impl<T: Transmit> SerialLink<T> {
    pub fn new(tx: T) -> Self {
        Self { tx }
    }

    /// Busy-waits until the channel accepts the byte.
    pub fn send_byte(&mut self, byte: u8) -> Result<(), T::Error> {
        nb::block!(self.tx.try_transmit(byte))
    }

    pub fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), T::Error> {
        for &b in bytes {
            self.send_byte(b)?;
        }
        Ok(())
    }

    pub fn send_frame(&mut self, frame: &DecodedFrame) -> Result<(), T::Error> {
        self.send_bytes(&frame.report())
    }

    pub fn inner(&self) -> &T {
        &self.tx
    }
}

impl<T: Transmit> ufmt::uWrite for SerialLink<T> {
    type Error = T::Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.send_bytes(s.as_bytes())
    }
}
