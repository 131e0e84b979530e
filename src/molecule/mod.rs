//! Molecule specification held by a driver
//!
//! [`MoleculeSpecification`] is the validated, immutable form of the
//! driver options. It can only be built from a [`ResolvedConfig`] (or from
//! the defaults), so every instance satisfies the input schema.

mod geometry;
mod units;

pub use geometry::{parse_atoms, AtomSpec};
pub use units::{angstrom_to_bohr, bohr_to_angstrom, Units, BOHR_IN_ANGSTROM};

use crate::config::{OptionMap, OptionValue, ResolvedConfig};
use crate::error::{DriverError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ATOMS: &str = "H 0.0 0.0 0.0; H 0.0 0.0 0.735";
pub const DEFAULT_CHARGE: i64 = 0;
pub const DEFAULT_MULTIPLICITY: i64 = 1;
pub const DEFAULT_TOL: f64 = 1e-8;
pub const DEFAULT_MAXITERS: i64 = 100;

/// Atomic-orbital basis set requested from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BasisSet {
    #[default]
    #[serde(rename = "sto3g")]
    Sto3g,
    #[serde(rename = "6-31g")]
    Pople631G,
    #[serde(rename = "6-31g**")]
    Pople631Gss,
}

impl BasisSet {
    pub const NAMES: [&'static str; 3] = ["sto3g", "6-31g", "6-31g**"];

    pub fn name(self) -> &'static str {
        match self {
            BasisSet::Sto3g => "sto3g",
            BasisSet::Pople631G => "6-31g",
            BasisSet::Pople631Gss => "6-31g**",
        }
    }
}

impl fmt::Display for BasisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BasisSet {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sto3g" => Ok(BasisSet::Sto3g),
            "6-31g" => Ok(BasisSet::Pople631G),
            "6-31g**" => Ok(BasisSet::Pople631Gss),
            _ => Err(DriverError::validation(
                "basis",
                format!("unknown basis '{}', expected one of {:?}", s, BasisSet::NAMES),
            )),
        }
    }
}

/// Hartree-Fock solver the backend uses to obtain molecular orbitals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HfMethod {
    #[default]
    Rhf,
    Rohf,
    Uhf,
}

impl HfMethod {
    pub const NAMES: [&'static str; 3] = ["rhf", "rohf", "uhf"];

    pub fn name(self) -> &'static str {
        match self {
            HfMethod::Rhf => "rhf",
            HfMethod::Rohf => "rohf",
            HfMethod::Uhf => "uhf",
        }
    }
}

impl fmt::Display for HfMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HfMethod {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rhf" => Ok(HfMethod::Rhf),
            "rohf" => Ok(HfMethod::Rohf),
            "uhf" => Ok(HfMethod::Uhf),
            _ => Err(DriverError::validation(
                "hf_method",
                format!("unknown method '{}', expected one of {:?}", s, HfMethod::NAMES),
            )),
        }
    }
}

/// Validated molecule parameters. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeSpecification {
    atoms: String,
    units: Units,
    charge: i32,
    multiplicity: u32,
    basis: BasisSet,
    hf_method: HfMethod,
    tol: f64,
    maxiters: u32,
}

impl Default for MoleculeSpecification {
    fn default() -> Self {
        Self {
            atoms: DEFAULT_ATOMS.to_string(),
            units: Units::default(),
            charge: DEFAULT_CHARGE as i32,
            multiplicity: DEFAULT_MULTIPLICITY as u32,
            basis: BasisSet::default(),
            hf_method: HfMethod::default(),
            tol: DEFAULT_TOL,
            maxiters: DEFAULT_MAXITERS as u32,
        }
    }
}

impl MoleculeSpecification {
    /// Build from a configuration already checked against the input schema.
    pub fn from_resolved(config: &ResolvedConfig) -> Result<Self> {
        Ok(Self {
            atoms: config.get_str("atoms")?.to_string(),
            units: config.get_str("units")?.parse()?,
            charge: narrow("charge", config.get_i64("charge")?)?,
            multiplicity: narrow("multiplicity", config.get_i64("multiplicity")?)?,
            basis: config.get_str("basis")?.parse()?,
            hf_method: config.get_str("hf_method")?.parse()?,
            tol: config.get_f64("tol")?,
            maxiters: narrow("maxiters", config.get_i64("maxiters")?)?,
        })
    }

    pub fn atoms(&self) -> &str {
        &self.atoms
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    pub fn basis(&self) -> BasisSet {
        self.basis
    }

    pub fn hf_method(&self) -> HfMethod {
        self.hf_method
    }

    pub fn tol(&self) -> f64 {
        self.tol
    }

    pub fn maxiters(&self) -> u32 {
        self.maxiters
    }

    /// Parsed atoms, positions in the units the molecule was given in.
    pub fn geometry(&self) -> Result<Vec<AtomSpec>> {
        parse_atoms(&self.atoms)
    }

    /// Parsed atoms with positions converted to Bohr.
    pub fn geometry_in_bohr(&self) -> Result<Vec<AtomSpec>> {
        Ok(self
            .geometry()?
            .iter()
            .map(|atom| atom.in_bohr(self.units))
            .collect())
    }

    /// The specification as an option map accepted by the input schema.
    pub fn to_options(&self) -> OptionMap {
        OptionMap::from([
            ("atoms".to_string(), OptionValue::from(self.atoms.as_str())),
            ("units".to_string(), OptionValue::from(self.units.name())),
            ("charge".to_string(), OptionValue::from(self.charge as i64)),
            (
                "multiplicity".to_string(),
                OptionValue::from(self.multiplicity as i64),
            ),
            ("basis".to_string(), OptionValue::from(self.basis.name())),
            (
                "hf_method".to_string(),
                OptionValue::from(self.hf_method.name()),
            ),
            ("tol".to_string(), OptionValue::from(self.tol)),
            ("maxiters".to_string(), OptionValue::from(self.maxiters as i64)),
        ])
    }
}

fn narrow<T: TryFrom<i64>>(field: &str, value: i64) -> Result<T> {
    T::try_from(value)
        .map_err(|_| DriverError::validation(field, format!("{} is out of range", value)))
}
