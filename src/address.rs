//! Slave and register addressing.
//!
//! Slave addresses are kept in their 8-bit bus form: the 7-bit device address shifted left with
//! the direction in bit 0.  The sensor answers on one of two address pairs depending on how its
//! address strap is wired; the auxiliary EEPROM always answers on `0xA0`/`0xA1`.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Clears the direction bit of an 8-bit slave address.
pub const SLAVE_ADDRESS_MASK: u8 = 0xFE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Write,
    Read,
}

/// Every slave address the driver is willing to put on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SlaveAddress {
    /// Sensor write address with the strap low
    SensorWrite = 0x42,
    /// Sensor read address with the strap low
    SensorRead = 0x43,
    /// Sensor write address with the strap high
    SensorWriteAlt = 0xBA,
    /// Sensor read address with the strap high
    SensorReadAlt = 0xBB,
    /// Auxiliary EEPROM write address
    MemoryWrite = 0xA0,
    /// Auxiliary EEPROM read address
    MemoryRead = 0xA1,
}

impl SlaveAddress {
    pub const fn direction(self) -> Direction {
        if (self as u8) & 0x01 == 0 {
            Direction::Write
        } else {
            Direction::Read
        }
    }

    /// The 7-bit device address, as `embedded-hal` expects it.
    pub const fn device(self) -> u8 {
        (self as u8) >> 1
    }

    /// Which strap setting makes this address valid.  `None` for addresses that do not depend on
    /// the strap.
    pub const fn strap(self) -> Option<AddressStrap> {
        match self {
            Self::SensorWrite | Self::SensorRead => Some(AddressStrap::Low),
            Self::SensorWriteAlt | Self::SensorReadAlt => Some(AddressStrap::High),
            Self::MemoryWrite | Self::MemoryRead => None,
        }
    }
}

/// Level of the sensor's address-select strap.  Resolved once, when the driver is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressStrap {
    #[default]
    Low,
    High,
}

impl AddressStrap {
    pub const fn sensor_write(self) -> SlaveAddress {
        match self {
            Self::Low => SlaveAddress::SensorWrite,
            Self::High => SlaveAddress::SensorWriteAlt,
        }
    }

    pub const fn sensor_read(self) -> SlaveAddress {
        match self {
            Self::Low => SlaveAddress::SensorRead,
            Self::High => SlaveAddress::SensorReadAlt,
        }
    }
}

/// A register address as it appears in the preamble: one byte, or two bytes sent high byte first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterAddress {
    Byte(u8),
    Word(u16),
}

impl RegisterAddress {
    /// Number of preamble bytes the address occupies.
    pub const fn len(self) -> usize {
        match self {
            Self::Byte(_) => 1,
            Self::Word(_) => 2,
        }
    }

    pub const fn width(self) -> RegisterWidth {
        match self {
            Self::Byte(_) => RegisterWidth::Byte,
            Self::Word(_) => RegisterWidth::Word,
        }
    }

    /// The address bytes in bus order, left-aligned in a two byte buffer.
    pub const fn to_bytes(self) -> [u8; 2] {
        match self {
            Self::Byte(register) => [register, 0],
            Self::Word(register) => register.to_be_bytes(),
        }
    }
}

/// Register address width of the sensor: OV7670-style one-byte registers, or the two-byte
/// variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterWidth {
    #[default]
    Byte,
    Word,
}

impl From<u8> for RegisterAddress {
    fn from(register: u8) -> Self {
        Self::Byte(register)
    }
}

impl From<u16> for RegisterAddress {
    fn from(register: u16) -> Self {
        Self::Word(register)
    }
}

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod test {
    use crate::address::{AddressStrap, Direction, RegisterAddress, SlaveAddress};

    #[test]
    pub fn known_addresses() {
        assert_eq!(
            SlaveAddress::try_from(0x42_u8).ok(),
            Some(SlaveAddress::SensorWrite)
        );
        assert_eq!(
            SlaveAddress::try_from(0xBB_u8).ok(),
            Some(SlaveAddress::SensorReadAlt)
        );
        assert_eq!(
            SlaveAddress::try_from(0xA1_u8).ok(),
            Some(SlaveAddress::MemoryRead)
        );
        assert!(SlaveAddress::try_from(0x44_u8).is_err());
        assert!(SlaveAddress::try_from(0x21_u8).is_err());
    }

    #[test]
    pub fn direction_and_device() {
        assert_eq!(SlaveAddress::SensorWrite.direction(), Direction::Write);
        assert_eq!(SlaveAddress::SensorRead.direction(), Direction::Read);
        assert_eq!(SlaveAddress::SensorWrite.device(), 0x21);
        assert_eq!(SlaveAddress::SensorRead.device(), 0x21);
        assert_eq!(SlaveAddress::SensorWriteAlt.device(), 0x5D);
        assert_eq!(SlaveAddress::MemoryRead.device(), 0x50);
    }

    #[test]
    pub fn strap_selects_pair() {
        assert_eq!(AddressStrap::default(), AddressStrap::Low);
        assert_eq!(u8::from(AddressStrap::Low.sensor_write()), 0x42);
        assert_eq!(u8::from(AddressStrap::Low.sensor_read()), 0x43);
        assert_eq!(u8::from(AddressStrap::High.sensor_write()), 0xBA);
        assert_eq!(u8::from(AddressStrap::High.sensor_read()), 0xBB);
        assert_eq!(SlaveAddress::MemoryWrite.strap(), None);
    }

    #[test]
    pub fn word_register_is_big_endian() {
        assert_eq!(RegisterAddress::from(0xCC12_u16).to_bytes(), [0xCC, 0x12]);
        assert_eq!(RegisterAddress::from(0xCC_u8).to_bytes(), [0xCC, 0x00]);
        assert_eq!(RegisterAddress::Word(0xCC12).len(), 2);
        assert_eq!(RegisterAddress::Byte(0xCC).len(), 1);
    }
}
