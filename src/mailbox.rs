//! Hand-off points between interrupt handlers and the main task.
//!
//! Each type has exactly one writer context and one reader context. Access
//! goes through `critical_section`, so a reader never sees a half-written
//! value even when the payload is wider than the AVR's 8-bit loads.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use heapless::Deque;

/// Single-slot mailbox. A post replaces any value not yet taken.
pub struct Mailbox<T: Copy> {
    slot: Mutex<Cell<Option<T>>>,
}

impl<T: Copy> Mailbox<T> {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(None)),
        }
    }

    pub fn post(&self, value: T) {
        critical_section::with(|cs| self.slot.borrow(cs).set(Some(value)));
    }

    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.slot.borrow(cs).take())
    }

    pub fn is_full(&self) -> bool {
        critical_section::with(|cs| self.slot.borrow(cs).get().is_some())
    }
}

impl<T: Copy> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Value published by one context and sampled by another.
pub struct Shared<T: Copy> {
    value: Mutex<Cell<T>>,
}

impl<T: Copy> Shared<T> {
    pub const fn new(value: T) -> Self {
        Self {
            value: Mutex::new(Cell::new(value)),
        }
    }

    pub fn get(&self) -> T {
        critical_section::with(|cs| self.value.borrow(cs).get())
    }

    pub fn set(&self, value: T) {
        critical_section::with(|cs| self.value.borrow(cs).set(value));
    }
}

/// Bounded FIFO of received bytes. Pushes onto a full queue are dropped.
pub struct ByteQueue<const N: usize> {
    bytes: Mutex<RefCell<Deque<u8, N>>>,
}

impl<const N: usize> ByteQueue<N> {
    pub const fn new() -> Self {
        Self {
            bytes: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Returns `false` when the byte was dropped.
    pub fn push(&self, byte: u8) -> bool {
        critical_section::with(|cs| self.bytes.borrow_ref_mut(cs).push_back(byte).is_ok())
    }

    pub fn pop(&self) -> Option<u8> {
        critical_section::with(|cs| self.bytes.borrow_ref_mut(cs).pop_front())
    }

    pub fn clear(&self) {
        critical_section::with(|cs| self.bytes.borrow_ref_mut(cs).clear());
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.bytes.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for ByteQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
