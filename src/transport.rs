//! Register-level reads and writes over a [`Bus`].
//!
//! Every call validates the slave address, builds the preamble, issues exactly one bus
//! transaction and, when it succeeds, waits out the settling delay before returning.  Nothing is
//! cached: the device register is the only copy of a value.

use embedded_hal::delay::DelayNs;
use fugit::MicrosDurationU32;

use crate::address::{AddressStrap, Direction, RegisterAddress, RegisterWidth, SlaveAddress};
use crate::bus::Bus;
use crate::preamble::Preamble;
use crate::Error;

/// Largest payload moved in a single transaction.
pub const MAX_PAYLOAD: usize = 64;

pub struct Transport<B, D> {
    bus: B,
    delay: D,
    strap: AddressStrap,
    register_width: RegisterWidth,
    settle: MicrosDurationU32,
}

impl<B: Bus, D: DelayNs> Transport<B, D> {
    pub const fn new(bus: B, delay: D, strap: AddressStrap, settle: MicrosDurationU32) -> Self {
        Self {
            bus,
            delay,
            strap,
            register_width: RegisterWidth::Byte,
            settle,
        }
    }

    /// Sets the sensor's register address width.  One-byte registers are widened on a two-byte
    /// sensor; two-byte registers are refused on a one-byte sensor.  The memory device takes
    /// addresses as given.
    #[must_use]
    pub fn with_register_width(mut self, register_width: RegisterWidth) -> Self {
        self.register_width = register_width;
        self
    }

    /// The sensor's write address for the configured strap.
    pub fn sensor_write_address(&self) -> u8 {
        self.strap.sensor_write().into()
    }

    /// The sensor's read address for the configured strap.
    pub fn sensor_read_address(&self) -> u8 {
        self.strap.sensor_read().into()
    }

    /// Writes one byte to `register`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidAddress`]: `slave` is not a known write address for this strap.
    /// - [`Error::UnsupportedRegister`]: `register` is too wide for the sensor.
    /// - [`Error::BusError`]: the transaction failed.
    pub fn write(
        &mut self,
        slave: u8,
        register: impl Into<RegisterAddress>,
        data: u8,
    ) -> Result<(), Error<B::Error>> {
        self.write_bytes(slave, register, &[data])
    }

    /// Writes a big-endian 16-bit value starting at `register`.
    ///
    /// # Errors
    ///
    /// As for [`Transport::write`].
    pub fn write_u16(
        &mut self,
        slave: u8,
        register: impl Into<RegisterAddress>,
        data: u16,
    ) -> Result<(), Error<B::Error>> {
        self.write_bytes(slave, register, &data.to_be_bytes())
    }

    /// Writes up to [`MAX_PAYLOAD`] bytes starting at `register`.
    ///
    /// # Errors
    ///
    /// As for [`Transport::write`], plus [`Error::PayloadTooLong`].
    pub fn write_bytes(
        &mut self,
        slave: u8,
        register: impl Into<RegisterAddress>,
        data: &[u8],
    ) -> Result<(), Error<B::Error>> {
        let register = register.into();
        if data.len() > MAX_PAYLOAD {
            return Err(Error::PayloadTooLong(data.len()));
        }
        let address = self.validate(slave, Direction::Write)?;
        let register = self.fit(address, register)?;
        let preamble = Preamble::write(address, register);
        trace!("i2c write {=u8:#x} {=[u8]:#x}", slave, data);
        self.bus
            .transmit(&preamble, data)
            .map_err(Error::BusError)?;
        self.settle();
        Ok(())
    }

    /// Reads one byte from `register`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidAddress`]: `slave` is not a known read address for this strap.
    /// - [`Error::UnsupportedRegister`]: `register` is too wide for the sensor.
    /// - [`Error::BusError`]: the transaction failed.
    pub fn read(
        &mut self,
        slave: u8,
        register: impl Into<RegisterAddress>,
    ) -> Result<u8, Error<B::Error>> {
        let mut data = [0_u8; 1];
        self.read_bytes(slave, register, &mut data)?;
        Ok(data[0])
    }

    /// Reads a big-endian 16-bit value starting at `register`.
    ///
    /// # Errors
    ///
    /// As for [`Transport::read`].
    pub fn read_u16(
        &mut self,
        slave: u8,
        register: impl Into<RegisterAddress>,
    ) -> Result<u16, Error<B::Error>> {
        let mut data = [0_u8; 2];
        self.read_bytes(slave, register, &mut data)?;
        Ok(u16::from_be_bytes(data))
    }

    /// Fills `data` (up to [`MAX_PAYLOAD`] bytes) starting at `register`.
    ///
    /// # Errors
    ///
    /// As for [`Transport::read`], plus [`Error::PayloadTooLong`].
    pub fn read_bytes(
        &mut self,
        slave: u8,
        register: impl Into<RegisterAddress>,
        data: &mut [u8],
    ) -> Result<(), Error<B::Error>> {
        let register = register.into();
        if data.len() > MAX_PAYLOAD {
            return Err(Error::PayloadTooLong(data.len()));
        }
        let address = self.validate(slave, Direction::Read)?;
        let register = self.fit(address, register)?;
        let preamble = Preamble::read(address, register);
        self.bus
            .receive(&preamble, data)
            .map_err(Error::BusError)?;
        trace!("i2c read {=u8:#x} {=[u8]:#x}", slave, &*data);
        self.settle();
        Ok(())
    }

    /// The blocking delay shared with the reset sequence.
    pub fn delay(&mut self) -> &mut D {
        &mut self.delay
    }

    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    fn validate(&self, slave: u8, direction: Direction) -> Result<SlaveAddress, Error<B::Error>> {
        match SlaveAddress::try_from(slave) {
            Ok(address)
                if address.direction() == direction
                    && address.strap().map_or(true, |strap| strap == self.strap) =>
            {
                Ok(address)
            }
            _ => {
                error!("i2c slave address {=u8:#x} is not valid", slave);
                Err(Error::InvalidAddress(slave))
            }
        }
    }

    fn fit(
        &self,
        address: SlaveAddress,
        register: RegisterAddress,
    ) -> Result<RegisterAddress, Error<B::Error>> {
        if address.strap().is_none() {
            return Ok(register);
        }
        match (self.register_width, register) {
            (RegisterWidth::Byte, RegisterAddress::Word(_)) => {
                error!("register {} is wider than the sensor's registers", register);
                Err(Error::UnsupportedRegister(register))
            }
            (RegisterWidth::Word, RegisterAddress::Byte(byte)) => {
                Ok(RegisterAddress::Word(u16::from(byte)))
            }
            _ => Ok(register),
        }
    }

    fn settle(&mut self) {
        self.delay.delay_us(self.settle.to_micros());
    }
}
