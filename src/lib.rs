// Integral drivers: molecule options in, one- and two-electron integrals out

pub mod backend;
pub mod config;
pub mod driver;
pub mod error;
pub mod integrals;
pub mod io;
pub mod molecule;

pub use backend::{IntegralBackend, PyQuanteBackend};
pub use config::{OptionMap, OptionValue};
pub use driver::{Driver, DriverConfiguration, PyQuanteDriver};
pub use error::DriverError;
pub use integrals::{IntegralResult, TwoElectronIntegrals};
pub use molecule::{BasisSet, HfMethod, MoleculeSpecification, Units};
