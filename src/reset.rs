//! Hardware reset through the sensor's power-down and reset lines.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::Timing;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlLine {
    PowerDown,
    Reset,
}

/// A control line could not be driven.  The sensor is left in an unknown state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetError {
    pub line: ControlLine,
    /// The level the line was being driven to
    pub high: bool,
}

pub struct ResetSequencer<RST, PWDN> {
    reset: RST,
    power_down: PWDN,
}

impl<RST: OutputPin, PWDN: OutputPin> ResetSequencer<RST, PWDN> {
    pub const fn new(reset: RST, power_down: PWDN) -> Self {
        Self { reset, power_down }
    }

    /// Powers the sensor and pulses reset:
    ///
    /// 1. power-down low (sensor powered)
    /// 2. reset low, wait [`Timing::reset_hold`]
    /// 3. reset high, wait [`Timing::power_up`]
    ///
    /// Stops at the first line that cannot be driven.
    ///
    /// # Errors
    ///
    /// [`ResetError`]: naming the line and level that failed.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D, timing: &Timing) -> Result<(), ResetError> {
        drive(self.power_down.set_low(), ControlLine::PowerDown, false)?;
        drive(self.reset.set_low(), ControlLine::Reset, false)?;
        delay.delay_ms(timing.reset_hold.to_millis());
        drive(self.reset.set_high(), ControlLine::Reset, true)?;
        delay.delay_ms(timing.power_up.to_millis());
        Ok(())
    }

    pub fn release(self) -> (RST, PWDN) {
        (self.reset, self.power_down)
    }
}

fn drive<E>(result: Result<(), E>, line: ControlLine, high: bool) -> Result<(), ResetError> {
    result.map_err(|_| {
        error!("failed to drive {} line (high: {})", line, high);
        ResetError { line, high }
    })
}
