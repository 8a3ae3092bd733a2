#![no_std]
#![doc = include_str!("../README.md")]

// must come first so the logging macros are in scope for every other module
mod fmt;

pub mod address;
pub mod bus;
pub mod config;
pub mod loader;
pub mod parameter;
pub mod preamble;
pub mod probe;
pub mod registers;
pub mod reset;
pub mod sensor;
pub mod transport;

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod sim;

pub use address::{AddressStrap, Direction, RegisterAddress, RegisterWidth, SlaveAddress};
pub use bus::{Bus, HalBus, HalBusError};
pub use config::{SensorConfig, Timing};
pub use loader::{LoadPolicy, LoadSummary};
pub use parameter::{Brightness, Gain, Parameter};
pub use preamble::Preamble;
pub use probe::ProbeMode;
pub use registers::{ConfigEntry, ConfigurationTable, OV7670_VGA};
pub use reset::{ControlLine, ResetError, ResetSequencer};
pub use sensor::{AbortReason, InitOutcome, Sensor};
pub use transport::Transport;

/// Failures surfaced by the transport and everything built on it.
///
/// `E` is the error type of the underlying [`Bus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The slave address is not one of the known device addresses for the selected strap and
    /// direction.  Nothing was sent on the bus.
    InvalidAddress(u8),
    /// The bus transaction itself failed (NACK, arbitration loss, timeout...).
    BusError(E),
    /// The presence probe did not get an answer from the sensor.
    DeviceNotFound,
    /// More than [`transport::MAX_PAYLOAD`] bytes were requested in one transaction.
    PayloadTooLong(usize),
    /// A two-byte register address was given to a sensor with one-byte registers.  Nothing was
    /// sent on the bus.
    UnsupportedRegister(RegisterAddress),
}

/// Devices that can report an identification value from a fixed register.  Used to decide whether
/// the sensor is answering on the bus at all.
pub trait WhoAmI<E> {
    /// Register holding the identification value.
    const ID_REGISTER: u8;

    /// Reads the identification register.
    ///
    /// # Errors
    ///
    /// Whatever the underlying read reports.
    fn whoami(&mut self) -> Result<u8, Error<E>>;

    /// Checks that the device answers.  With [`ProbeMode::Responds`] a completed read is enough;
    /// with [`ProbeMode::ExpectId`] the value read must also match.
    ///
    /// # Errors
    ///
    /// [`Error::DeviceNotFound`]: the read failed or (when asked to) returned the wrong value.
    fn probe(&mut self, mode: ProbeMode) -> Result<(), Error<E>> {
        let id = self.whoami().map_err(|_| {
            error!("sensor did not answer identification read");
            Error::DeviceNotFound
        })?;
        match mode {
            ProbeMode::Responds => Ok(()),
            ProbeMode::ExpectId(expected) if expected == id => Ok(()),
            ProbeMode::ExpectId(expected) => {
                error!(
                    "sensor id mismatch: expected {=u8:#x}, read {=u8:#x}",
                    expected,
                    id
                );
                Err(Error::DeviceNotFound)
            }
        }
    }
}
