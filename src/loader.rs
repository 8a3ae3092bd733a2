//! Applies a [`ConfigurationTable`] to the sensor.

use embedded_hal::delay::DelayNs;

use crate::bus::Bus;
use crate::registers::ConfigurationTable;
use crate::transport::Transport;
use crate::Error;

/// What to do when one write of a table fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadPolicy {
    /// Log the failure and carry on with the next entry.
    #[default]
    ContinueOnError,
    /// Return the first failure; later entries are not written.
    StopOnError,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoadSummary {
    /// Entries the sensor acknowledged
    pub written: usize,
    /// Entries that failed
    pub failed: usize,
}

impl<B: Bus, D: DelayNs> Transport<B, D> {
    /// Writes every entry of `table` to the sensor, in order, one transaction per entry.
    ///
    /// # Errors
    ///
    /// Only under [`LoadPolicy::StopOnError`]: the error of the first failed write.
    pub fn apply_configuration(
        &mut self,
        table: &ConfigurationTable<'_>,
        policy: LoadPolicy,
    ) -> Result<LoadSummary, Error<B::Error>> {
        let slave = self.sensor_write_address();
        let mut summary = LoadSummary::default();
        for entry in table.iter() {
            match self.write(slave, entry.register, entry.value) {
                Ok(()) => summary.written += 1,
                Err(error) if policy == LoadPolicy::StopOnError => {
                    error!(
                        "configuration stopped at register {=u8:#x}",
                        entry.register
                    );
                    return Err(error);
                }
                Err(_) => {
                    warn!(
                        "configuration write {=u8:#x} <- {=u8:#x} failed",
                        entry.register,
                        entry.value
                    );
                    summary.failed += 1;
                }
            }
        }
        debug!(
            "configuration applied: {} written, {} failed",
            summary.written,
            summary.failed
        );
        Ok(summary)
    }
}
