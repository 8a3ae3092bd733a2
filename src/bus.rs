//! The byte-level bus the transport drives.
//!
//! [`Bus`] mirrors a controller that takes a [`Preamble`] plus a payload and handles the start,
//! restart and stop conditions itself.  [`HalBus`] provides it on top of any [`embedded_hal`] I2C
//! master by translating the preamble shapes the transport produces into `write`, `read` and
//! `write_read` calls.

use embedded_hal::i2c::I2c;

use crate::preamble::{Preamble, PREAMBLE_CAPACITY};
use crate::transport::MAX_PAYLOAD;

pub trait Bus {
    type Error;

    /// Sends the preamble followed by `payload`.
    fn transmit(&mut self, preamble: &Preamble, payload: &[u8]) -> Result<(), Self::Error>;

    /// Sends the preamble, then fills `buffer` from the device.
    fn receive(&mut self, preamble: &Preamble, buffer: &mut [u8]) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalBusError<E> {
    I2cError(E),
    /// The preamble asks for conditions an `embedded-hal` transaction cannot express.
    UnsupportedPreamble,
}

/// [`Bus`] over an [`embedded_hal::i2c::I2c`] master.
pub struct HalBus<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> HalBus<I2C> {
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Bus for HalBus<I2C> {
    type Error = HalBusError<I2C::Error>;

    fn transmit(&mut self, preamble: &Preamble, payload: &[u8]) -> Result<(), Self::Error> {
        let bytes = preamble.bytes();
        if preamble.ctrl_mask() != 0 || bytes[0] & 0x01 != 0 || payload.len() > MAX_PAYLOAD {
            return Err(HalBusError::UnsupportedPreamble);
        }

        let mut data = [0_u8; PREAMBLE_CAPACITY + MAX_PAYLOAD];
        let head = bytes.len() - 1;
        data[..head].copy_from_slice(&bytes[1..]);
        data[head..head + payload.len()].copy_from_slice(payload);

        self.i2c
            .write(bytes[0] >> 1, &data[..head + payload.len()])
            .map_err(HalBusError::I2cError)
    }

    fn receive(&mut self, preamble: &Preamble, buffer: &mut [u8]) -> Result<(), Self::Error> {
        let bytes = preamble.bytes();
        let mut restarts = preamble.restarts();
        match (restarts.next(), restarts.next()) {
            // a bare read address, no register selection
            (None, None)
                if bytes.len() == 1 && bytes[0] & 0x01 == 1 && preamble.ctrl_mask() == 0 =>
            {
                self.i2c
                    .read(bytes[0] >> 1, buffer)
                    .map_err(HalBusError::I2cError)
            }
            // [write address, register..., read address] with one restart before the read address
            (Some(restart), None)
                if restart + 2 == bytes.len()
                    && restart > 0
                    && bytes[0] & 0x01 == 0
                    && bytes[restart + 1] == bytes[0] | 0x01
                    && preamble.ctrl_mask() >> PREAMBLE_CAPACITY == 0 =>
            {
                self.i2c
                    .write_read(bytes[0] >> 1, &bytes[1..=restart], buffer)
                    .map_err(HalBusError::I2cError)
            }
            _ => Err(HalBusError::UnsupportedPreamble),
        }
    }
}
