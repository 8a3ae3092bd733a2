//! # OV7670 camera sensor behind an FX3-style I2C master
//!
//! [`Sensor`] owns the bus, the reset and power-down lines and a delay, and brings the sensor up
//! with [`Sensor::initialize`]: hardware reset, presence probe, then the compiled-in
//! [`OV7670_VGA`] register table.  Each step is also available on its own.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::bus::Bus;
use crate::config::SensorConfig;
use crate::loader::LoadSummary;
use crate::parameter::{Brightness, Gain, Parameter};
use crate::registers::{ConfigurationTable, OV7670_VGA};
use crate::reset::{ResetError, ResetSequencer};
use crate::transport::Transport;
use crate::{Error, WhoAmI};

/// Why [`Sensor::initialize`] gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AbortReason {
    ResetFailed(ResetError),
    ProbeFailed,
    /// Only under [`LoadPolicy::StopOnError`](crate::LoadPolicy::StopOnError).
    ConfigurationFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitOutcome {
    Ready(LoadSummary),
    Aborted(AbortReason),
}

impl InitOutcome {
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

pub struct Sensor<B, RST, PWDN, D> {
    transport: Transport<B, D>,
    lines: ResetSequencer<RST, PWDN>,
    config: SensorConfig,
}

impl<B, RST, PWDN, D> Sensor<B, RST, PWDN, D>
where
    B: Bus,
    RST: OutputPin,
    PWDN: OutputPin,
    D: DelayNs,
{
    /// Takes ownership of the hardware.  Nothing is driven or sent until a method is called.
    pub fn new(bus: B, reset: RST, power_down: PWDN, delay: D, config: SensorConfig) -> Self {
        Self {
            transport: Transport::new(bus, delay, config.strap, config.timing.settle)
                .with_register_width(config.register_width),
            lines: ResetSequencer::new(reset, power_down),
            config,
        }
    }

    pub const fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Resets, probes and configures the sensor.  Stops at the first step that fails; the
    /// configuration table is never touched unless the probe succeeded.
    pub fn initialize(&mut self) -> InitOutcome {
        debug!("resetting sensor");
        if let Err(error) = self.reset() {
            error!("initialization aborted: reset failed");
            return InitOutcome::Aborted(AbortReason::ResetFailed(error));
        }

        debug!("probing sensor");
        if self.probe().is_err() {
            error!("initialization aborted: sensor not found");
            return InitOutcome::Aborted(AbortReason::ProbeFailed);
        }

        debug!("configuring sensor");
        match self.apply_configuration(&OV7670_VGA) {
            Ok(summary) => {
                info!(
                    "sensor ready: {} registers written, {} failed",
                    summary.written,
                    summary.failed
                );
                InitOutcome::Ready(summary)
            }
            Err(_) => {
                error!("initialization aborted: configuration failed");
                InitOutcome::Aborted(AbortReason::ConfigurationFailed)
            }
        }
    }

    /// Runs the power-down/reset sequence with the configured timing.
    ///
    /// # Errors
    ///
    /// [`ResetError`]: a control line could not be driven.
    pub fn reset(&mut self) -> Result<(), ResetError> {
        self.lines
            .reset(self.transport.delay(), &self.config.timing)
    }

    /// Checks that the sensor answers, honouring the configured [`ProbeMode`](crate::ProbeMode).
    ///
    /// # Errors
    ///
    /// [`Error::DeviceNotFound`]
    pub fn probe(&mut self) -> Result<(), Error<B::Error>> {
        self.transport.probe(self.config.probe)
    }

    /// Writes `table` with the configured [`LoadPolicy`](crate::LoadPolicy).
    ///
    /// # Errors
    ///
    /// See [`Transport::apply_configuration`].
    pub fn apply_configuration(
        &mut self,
        table: &ConfigurationTable<'_>,
    ) -> Result<LoadSummary, Error<B::Error>> {
        self.transport
            .apply_configuration(table, self.config.load_policy)
    }

    /// # Errors
    ///
    /// [`Error::BusError`]
    pub fn get<P: Parameter>(&mut self) -> Result<u8, Error<B::Error>> {
        self.transport.get::<P>()
    }

    /// # Errors
    ///
    /// [`Error::BusError`]
    pub fn set<P: Parameter>(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.transport.set::<P>(value)
    }

    /// # Errors
    ///
    /// [`Error::BusError`]
    pub fn brightness(&mut self) -> Result<u8, Error<B::Error>> {
        self.get::<Brightness>()
    }

    /// # Errors
    ///
    /// [`Error::BusError`]
    pub fn set_brightness(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.set::<Brightness>(value)
    }

    /// Needs [`RegisterWidth::Word`](crate::RegisterWidth::Word) in the config.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedRegister`] on a one-byte sensor, otherwise [`Error::BusError`]
    pub fn gain(&mut self) -> Result<u8, Error<B::Error>> {
        self.get::<Gain>()
    }

    /// # Errors
    ///
    /// As for [`Sensor::gain`].
    pub fn set_gain(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.set::<Gain>(value)
    }

    /// Raw register access, including the auxiliary memory device.
    pub fn transport_mut(&mut self) -> &mut Transport<B, D> {
        &mut self.transport
    }

    pub fn release(self) -> (B, RST, PWDN, D) {
        let (bus, delay) = self.transport.release();
        let (reset, power_down) = self.lines.release();
        (bus, reset, power_down, delay)
    }
}
