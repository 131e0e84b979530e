//! Driver interface shared by all integral backends
//!
//! A driver holds a validated [`MoleculeSpecification`](crate::molecule::MoleculeSpecification)
//! and knows how to turn it into an [`IntegralResult`] with one particular
//! engine. The trait is object safe so callers can treat every variant as
//! a `Box<dyn Driver>`.
//!
//! # Usage
//!
//! ```ignore
//! let options = OptionMap::from([("basis".to_string(), OptionValue::from("6-31g"))]);
//! let driver = PyQuanteDriver::from_options(&options)?;
//! driver.check_backend_valid()?;
//! let result = driver.run()?;
//! println!("{} orbitals", result.num_orbitals);
//! ```

mod pyquante;
#[cfg(test)]
mod tests;

pub use pyquante::PyQuanteDriver;

use crate::config::{ConfigSchema, OptionMap, ResolvedConfig};
use crate::error::Result;
use crate::integrals::IntegralResult;
use serde::Serialize;

/// Inspectable description of a driver and the options it accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverConfiguration {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: ConfigSchema,
}

pub trait Driver {
    fn configuration(&self) -> &DriverConfiguration;

    /// Check a candidate configuration against this driver's schema.
    fn validate(&self, config: &OptionMap) -> Result<ResolvedConfig> {
        self.configuration().input_schema.validate(config)
    }

    /// Fails with `BackendUnavailable` if the engine cannot be resolved.
    fn check_backend_valid(&self) -> Result<()>;

    /// Compute a fresh set of integrals. Nothing is cached between calls.
    fn run(&self) -> Result<IntegralResult>;
}
