//! The address/register bytes that open every transaction.
//!
//! The control mask marks where the bus controller inserts extra conditions inside the preamble:
//! bit `n` of the low byte asks for a (repeated) start after byte `n`, bit `n` of the high byte for
//! a stop after byte `n`.

use crate::address::{RegisterAddress, SlaveAddress, SLAVE_ADDRESS_MASK};

/// Largest preamble the bus controller accepts.
pub const PREAMBLE_CAPACITY: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Preamble {
    buffer: [u8; PREAMBLE_CAPACITY],
    length: usize,
    ctrl_mask: u16,
}

impl Preamble {
    /// Builds a preamble from raw bytes with no extra start or stop conditions.  Returns `None` if
    /// `bytes` is empty or longer than [`PREAMBLE_CAPACITY`].
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > PREAMBLE_CAPACITY {
            return None;
        }
        let mut buffer = [0; PREAMBLE_CAPACITY];
        buffer[..bytes.len()].copy_from_slice(bytes);
        Some(Self {
            buffer,
            length: bytes.len(),
            ctrl_mask: 0,
        })
    }

    /// `[address, register...]`, no extra conditions.
    pub fn write(address: SlaveAddress, register: RegisterAddress) -> Self {
        let mut preamble = Self::addressed(u8::from(address), register);
        preamble.length = 1 + register.len();
        preamble
    }

    /// `[address & 0xFE, register..., address]` with a repeated start after the last register
    /// byte, so the controller switches from addressing the register to reading from it.
    pub fn read(address: SlaveAddress, register: RegisterAddress) -> Self {
        let raw = u8::from(address);
        let mut preamble = Self::addressed(raw & SLAVE_ADDRESS_MASK, register);
        let restart = register.len();
        preamble.buffer[restart + 1] = raw;
        preamble.length = restart + 2;
        preamble.with_start_after(restart)
    }

    fn addressed(first: u8, register: RegisterAddress) -> Self {
        let mut buffer = [0; PREAMBLE_CAPACITY];
        buffer[0] = first;
        let register_bytes = register.to_bytes();
        buffer[1..=register.len()].copy_from_slice(&register_bytes[..register.len()]);
        Self {
            buffer,
            length: 1,
            ctrl_mask: 0,
        }
    }

    /// Requests a start condition after byte `index`.  Indices past the end are ignored.
    #[must_use]
    pub fn with_start_after(mut self, index: usize) -> Self {
        if index < self.length {
            self.ctrl_mask |= 1_u16 << index;
        }
        self
    }

    /// Requests a stop condition after byte `index`.  Indices past the end are ignored.
    #[must_use]
    pub fn with_stop_after(mut self, index: usize) -> Self {
        if index < self.length {
            self.ctrl_mask |= 1_u16 << (index + PREAMBLE_CAPACITY);
        }
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer[..self.length]
    }

    pub const fn ctrl_mask(&self) -> u16 {
        self.ctrl_mask
    }

    pub const fn start_after(&self, index: usize) -> bool {
        index < PREAMBLE_CAPACITY && self.ctrl_mask & (1_u16 << index) != 0
    }

    pub const fn stop_after(&self, index: usize) -> bool {
        index < PREAMBLE_CAPACITY && self.ctrl_mask & (1_u16 << (index + PREAMBLE_CAPACITY)) != 0
    }

    /// Byte positions followed by a repeated start, in order.
    pub fn restarts(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.length).filter(|index| self.start_after(*index))
    }
}
