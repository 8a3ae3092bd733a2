//! Driver configuration, fixed when the [`Sensor`](crate::Sensor) is built.

use fugit::{MicrosDurationU32, MillisDurationU32};

use crate::address::{AddressStrap, RegisterWidth};
use crate::loader::LoadPolicy;
use crate::probe::ProbeMode;

/// Timing discipline for the bus and the control lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Pause after every successful transaction.  Without it the sensor NACKs a follow-up
    /// transaction that arrives too quickly.
    pub settle: MicrosDurationU32,
    /// How long reset is held low.
    pub reset_hold: MillisDurationU32,
    /// How long to wait after releasing reset before the first transaction.
    pub power_up: MillisDurationU32,
}

impl Timing {
    pub const DEFAULT: Self = Self {
        settle: MicrosDurationU32::from_ticks(10),
        reset_hold: MillisDurationU32::from_ticks(10),
        power_up: MillisDurationU32::from_ticks(10),
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Typical usage keeps the defaults and only picks the strap:
///
/// ```
/// use ov7670_fx3::{AddressStrap, SensorConfig};
///
/// let config = SensorConfig::default().with_strap(AddressStrap::High);
/// assert_eq!(u8::from(config.strap.sensor_write()), 0xBA);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SensorConfig {
    pub strap: AddressStrap,
    pub register_width: RegisterWidth,
    pub probe: ProbeMode,
    pub load_policy: LoadPolicy,
    pub timing: Timing,
}

impl SensorConfig {
    #[must_use]
    pub const fn with_strap(mut self, strap: AddressStrap) -> Self {
        self.strap = strap;
        self
    }

    #[must_use]
    pub const fn with_register_width(mut self, register_width: RegisterWidth) -> Self {
        self.register_width = register_width;
        self
    }

    #[must_use]
    pub const fn with_probe(mut self, probe: ProbeMode) -> Self {
        self.probe = probe;
        self
    }

    #[must_use]
    pub const fn with_load_policy(mut self, load_policy: LoadPolicy) -> Self {
        self.load_policy = load_policy;
        self
    }

    #[must_use]
    pub const fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }
}
