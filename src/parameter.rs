//! Runtime-tunable sensor settings, each bound to a single register.
//!
//! A new setting only needs a type implementing [`Parameter`]; the accessors are shared.

use embedded_hal::delay::DelayNs;

use crate::address::RegisterAddress;
use crate::bus::Bus;
use crate::registers::{REG_BRIGHTNESS, REG_GAIN};
use crate::transport::Transport;
use crate::Error;

pub trait Parameter {
    const REGISTER: RegisterAddress;
}

pub struct Brightness;

impl Parameter for Brightness {
    const REGISTER: RegisterAddress = RegisterAddress::Byte(REG_BRIGHTNESS);
}

/// Only addressable on sensors with two-byte registers.
pub struct Gain;

impl Parameter for Gain {
    const REGISTER: RegisterAddress = RegisterAddress::Word(REG_GAIN);
}

impl<B: Bus, D: DelayNs> Transport<B, D> {
    /// Reads the current value of `P` from the sensor.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedRegister`]: `P` needs two-byte registers and the sensor has one-byte
    ///   registers.
    /// - [`Error::BusError`]: the read failed; no stale value is returned.
    pub fn get<P: Parameter>(&mut self) -> Result<u8, Error<B::Error>> {
        self.read(self.sensor_read_address(), P::REGISTER)
    }

    /// Writes `value` to `P`.  The value is not read back.
    ///
    /// # Errors
    ///
    /// As for [`Transport::get`].
    pub fn set<P: Parameter>(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.write(self.sensor_write_address(), P::REGISTER, value)
    }
}
