use crate::error::{DriverError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of one Bohr radius in Angstrom.
pub const BOHR_IN_ANGSTROM: f64 = 0.52917721067;

/// Unit in which molecule coordinates are given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    #[default]
    Angstrom,
    Bohr,
}

impl Units {
    pub const NAMES: [&'static str; 2] = ["Angstrom", "Bohr"];

    pub fn name(self) -> &'static str {
        match self {
            Units::Angstrom => "Angstrom",
            Units::Bohr => "Bohr",
        }
    }

    /// Express a length given in `self` units in Bohr.
    pub fn to_bohr(self, value: f64) -> f64 {
        match self {
            Units::Angstrom => angstrom_to_bohr(value),
            Units::Bohr => value,
        }
    }

    /// Express a length given in `self` units in Angstrom.
    pub fn to_angstrom(self, value: f64) -> f64 {
        match self {
            Units::Angstrom => value,
            Units::Bohr => bohr_to_angstrom(value),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Units {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "angstrom" | "ang" | "a" => Ok(Units::Angstrom),
            "bohr" | "b" => Ok(Units::Bohr),
            _ => Err(DriverError::validation(
                "units",
                format!("unknown unit '{}', expected one of {:?}", s, Units::NAMES),
            )),
        }
    }
}

pub fn angstrom_to_bohr(value: f64) -> f64 {
    value / BOHR_IN_ANGSTROM
}

pub fn bohr_to_angstrom(value: f64) -> f64 {
    value * BOHR_IN_ANGSTROM
}
