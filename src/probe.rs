//! Presence test: is anything answering on the sensor's read address?

use embedded_hal::delay::DelayNs;

use crate::bus::Bus;
use crate::transport::Transport;
use crate::{Error, WhoAmI};

/// Identification register read by the presence test.
pub const REG_ID: u8 = 0x00;

/// How strict the presence test is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeMode {
    /// A completed read of the identification register is enough.
    #[default]
    Responds,
    /// The identification register must also hold this value.
    ExpectId(u8),
}

impl<B: Bus, D: DelayNs> WhoAmI<B::Error> for Transport<B, D> {
    const ID_REGISTER: u8 = REG_ID;

    fn whoami(&mut self) -> Result<u8, Error<B::Error>> {
        self.read(self.sensor_read_address(), Self::ID_REGISTER)
    }
}
