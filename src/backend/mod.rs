//! External integral engines
//!
//! A backend receives a fully parsed geometry in Bohr and returns raw
//! integral data. Drivers never talk to an engine except through
//! [`IntegralBackend`].

mod probe;
mod pyquante;

pub use probe::{BackendProbe, PythonModuleProbe};
pub use pyquante::{PyQuanteBackend, PYQUANTE_HINT, PYQUANTE_MODULE, PYTHON_ENV_VAR};

use crate::error::Result;
use crate::molecule::{AtomSpec, BasisSet, HfMethod, MoleculeSpecification, Units};
use serde::{Deserialize, Serialize};

pub trait IntegralBackend {
    /// Human-readable engine name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Fails with `BackendUnavailable` when the engine cannot be resolved.
    fn check_available(&self) -> Result<()>;

    /// Run the engine. Blocks until it returns; failures are `Computation`.
    fn compute(&self, request: &BackendRequest) -> Result<RawIntegrals>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendAtom {
    pub atomic_number: u32,
    pub xyz: [f64; 3],
}

/// Everything an engine needs for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendRequest {
    pub atoms: Vec<BackendAtom>,
    pub units: Units,
    pub charge: i32,
    pub multiplicity: u32,
    pub basis: BasisSet,
    pub hf_method: HfMethod,
    pub tol: f64,
    pub maxiters: u32,
}

impl BackendRequest {
    /// `atoms` must already be converted to Bohr.
    pub fn new(molecule: &MoleculeSpecification, atoms: &[AtomSpec]) -> Self {
        Self {
            atoms: atoms
                .iter()
                .map(|atom| BackendAtom {
                    atomic_number: atom.atomic_number(),
                    xyz: [atom.position.x, atom.position.y, atom.position.z],
                })
                .collect(),
            units: Units::Bohr,
            charge: molecule.charge(),
            multiplicity: molecule.multiplicity(),
            basis: molecule.basis(),
            hf_method: molecule.hf_method(),
            tol: molecule.tol(),
            maxiters: molecule.maxiters(),
        }
    }
}

/// Raw engine output before shape checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIntegrals {
    pub hf_energy: f64,
    pub nuclear_repulsion_energy: f64,
    pub num_orbitals: usize,
    pub num_alpha: usize,
    pub num_beta: usize,
    pub mo_coeff: Vec<Vec<f64>>,
    #[serde(default)]
    pub mo_coeff_b: Option<Vec<Vec<f64>>>,
    pub orbital_energies: Vec<f64>,
    #[serde(default)]
    pub orbital_energies_b: Option<Vec<f64>>,
    pub mo_onee_ints: Vec<Vec<f64>>,
    /// Row-major `(ij|kl)`, `num_orbitals^4` values.
    pub mo_eri_ints: Vec<f64>,
}
