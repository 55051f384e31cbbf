//! Infrared pulse sampler and mark/space length decoder.
//!
//! The sampler runs from a fixed-rate timer interrupt. It arms on the first
//! active sample, records one bit per tick until the buffer is full, then
//! decodes the whole buffer in that same tick.
//!
//! Decoding compares run lengths rather than timestamps. On every space to
//! mark transition the preceding mark run is compared with the space run
//! that followed it: a mark longer than the space by more than the
//! tolerance is a 1, anything else (ties included) is a 0. Bits are shifted
//! in MSB-first, so the first transition ends up in the highest decoded bit.

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use heapless::Vec;

use crate::config::{MIN_FRAME_BITS, PULSE_TOLERANCE, REPORT_BYTES};

/// Result of one decode cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DecodedFrame {
    pub value: u64,
    /// Number of transitions decoded. Only the low 64 survive in `value`.
    pub bits: u8,
}

impl DecodedFrame {
    /// Heuristic validity marker; the value is reported either way.
    pub fn is_complete(&self) -> bool {
        self.bits >= MIN_FRAME_BITS
    }

    /// Wire form: `REPORT_BYTES` bytes, least-significant first.
    pub fn report(&self) -> [u8; REPORT_BYTES] {
        let mut out = [0u8; REPORT_BYTES];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = (self.value >> (8 * i)) as u8;
        }
        out
    }
}

/// Decode a run of samples (`true` = mark).
pub fn decode(samples: &[bool], tolerance: u16) -> DecodedFrame {
    let mut marks: u16 = 0;
    let mut spaces: u16 = 0;
    let mut prev = true;
    let mut frame = DecodedFrame::default();

    for &sample in samples {
        if !prev && sample {
            let bit = marks > spaces && marks - spaces > tolerance;
            frame.value = (frame.value << 1) | bit as u64;
            frame.bits = frame.bits.saturating_add(1);
            spaces = 0;
            marks = 1;
        } else if sample {
            marks = marks.saturating_add(1);
        } else {
            spaces = spaces.saturating_add(1);
        }
        prev = sample;
    }

    frame
}

/// Capture state machine, independent of any pins.
pub struct PulseSampler<const N: usize> {
    samples: Vec<bool, N>,
    armed: bool,
    tolerance: u16,
}

impl<const N: usize> PulseSampler<N> {
    pub const fn new() -> Self {
        Self::with_tolerance(PULSE_TOLERANCE)
    }

    pub const fn with_tolerance(tolerance: u16) -> Self {
        Self {
            samples: Vec::new(),
            armed: false,
            tolerance,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Samples captured in the current cycle.
    pub fn captured(&self) -> usize {
        self.samples.len()
    }

    /// Feed one sample. Returns the frame on the tick that fills the buffer.
    pub fn push(&mut self, mark: bool) -> Option<DecodedFrame> {
        if mark {
            self.armed = true;
        }
        if !self.armed {
            return None;
        }

        // Cannot fail: a full buffer is decoded and cleared below.
        self.samples.push(mark).ok();
        if !self.samples.is_full() {
            return None;
        }

        let frame = decode(&self.samples, self.tolerance);
        self.samples.clear();
        self.armed = false;
        Some(frame)
    }
}

impl<const N: usize> Default for PulseSampler<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sensor input plus status output around a [`PulseSampler`].
///
/// The sensor is active-low: a low line is a mark. The status line mirrors
/// every sample.
pub struct IrReceiver<I, O, const N: usize> {
    sensor: I,
    status: O,
    sampler: PulseSampler<N>,
}

impl<I, O, const N: usize> IrReceiver<I, O, N>
where
    I: InputPin,
    O: OutputPin,
{
    pub fn new(sensor: I, status: O) -> Self {
        Self {
            sensor,
            status,
            sampler: PulseSampler::new(),
        }
    }

    pub fn sampler(&self) -> &PulseSampler<N> {
        &self.sampler
    }

    /// One sample tick. A sensor read error counts as an idle line.
    pub fn tick(&mut self) -> Option<DecodedFrame> {
        let mark = self.sensor.is_low().unwrap_or(false);
        self.status.set_state(PinState::from(mark)).ok();
        self.sampler.push(mark)
    }
}
