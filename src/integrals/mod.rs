//! Normalized integral output handed to downstream Hamiltonian builders
//!
//! The layout of [`IntegralResult`] is independent of the backend that
//! produced it. All integrals are in the molecular-orbital basis and all
//! lengths are in Bohr.


use crate::backend::RawIntegrals;
use crate::error::{DriverError, Result};
use crate::molecule::{AtomSpec, BasisSet, HfMethod, MoleculeSpecification};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

/// Four-index two-electron integrals `(ij|kl)` in chemist's notation,
/// stored row-major (`l` fastest).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwoElectronIntegrals {
    size: usize,
    data: Vec<f64>,
}

impl TwoElectronIntegrals {
    pub fn new(size: usize, data: Vec<f64>) -> Result<Self> {
        let expected = size.checked_pow(4).ok_or_else(|| {
            DriverError::computation(format!(
                "two-electron tensor for {} orbitals is too large",
                size
            ))
        })?;
        if data.len() != expected {
            return Err(DriverError::computation(format!(
                "two-electron tensor has {} elements, expected {} for {} orbitals",
                data.len(),
                expected,
                size
            )));
        }
        Ok(Self { size, data })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize, k: usize, l: usize) -> f64 {
        let n = self.size;
        self.data[((i * n + j) * n + k) * n + l]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Check the 8-fold permutational symmetry of real orbitals.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.size;
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    for l in 0..n {
                        let v = self.get(i, j, k, l);
                        let images = [
                            self.get(j, i, k, l),
                            self.get(i, j, l, k),
                            self.get(j, i, l, k),
                            self.get(k, l, i, j),
                            self.get(l, k, i, j),
                            self.get(k, l, j, i),
                            self.get(l, k, j, i),
                        ];
                        if images.iter().any(|w| (w - v).abs() > tol) {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}

/// An atom as the backend saw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomRecord {
    pub symbol: String,
    pub atomic_number: u32,
    /// Position in Bohr
    pub xyz: [f64; 3],
}

impl From<&AtomSpec> for AtomRecord {
    fn from(atom: &AtomSpec) -> Self {
        Self {
            symbol: atom.symbol().to_string(),
            atomic_number: atom.atomic_number(),
            xyz: [atom.position.x, atom.position.y, atom.position.z],
        }
    }
}

/// Integral data produced by one driver run.
#[derive(Debug, Clone, Serialize)]
pub struct IntegralResult {
    pub basis: BasisSet,
    pub hf_method: HfMethod,
    pub num_orbitals: usize,
    pub num_alpha: usize,
    pub num_beta: usize,
    pub molecular_charge: i32,
    pub multiplicity: u32,
    pub atoms: Vec<AtomRecord>,

    pub hf_energy: f64,
    pub nuclear_repulsion_energy: f64,

    pub mo_coeff: DMatrix<f64>,
    pub mo_coeff_b: Option<DMatrix<f64>>,
    pub orbital_energies: DVector<f64>,
    pub orbital_energies_b: Option<DVector<f64>>,

    pub mo_onee_ints: DMatrix<f64>,
    pub mo_eri_ints: TwoElectronIntegrals,
}

impl IntegralResult {
    /// Normalize raw backend output, checking every shape against the
    /// orbital count the backend reported.
    ///
    /// `atoms` must be the geometry sent to the backend, in Bohr.
    pub fn from_raw(
        raw: RawIntegrals,
        molecule: &MoleculeSpecification,
        atoms: &[AtomSpec],
    ) -> Result<Self> {
        let n = raw.num_orbitals;
        if n == 0 {
            return Err(DriverError::computation("backend reported zero orbitals"));
        }

        let mo_coeff = square_matrix("mo_coeff", &raw.mo_coeff, n)?;
        let mo_coeff_b = raw
            .mo_coeff_b
            .as_deref()
            .map(|rows| square_matrix("mo_coeff_b", rows, n))
            .transpose()?;
        let orbital_energies = vector("orbital_energies", raw.orbital_energies, n)?;
        let orbital_energies_b = raw
            .orbital_energies_b
            .map(|values| vector("orbital_energies_b", values, n))
            .transpose()?;
        let mo_onee_ints = square_matrix("mo_onee_ints", &raw.mo_onee_ints, n)?;
        let mo_eri_ints = TwoElectronIntegrals::new(n, raw.mo_eri_ints)?;

        Ok(Self {
            basis: molecule.basis(),
            hf_method: molecule.hf_method(),
            num_orbitals: n,
            num_alpha: raw.num_alpha,
            num_beta: raw.num_beta,
            molecular_charge: molecule.charge(),
            multiplicity: molecule.multiplicity(),
            atoms: atoms.iter().map(AtomRecord::from).collect(),
            hf_energy: raw.hf_energy,
            nuclear_repulsion_energy: raw.nuclear_repulsion_energy,
            mo_coeff,
            mo_coeff_b,
            orbital_energies,
            orbital_energies_b,
            mo_onee_ints,
            mo_eri_ints,
        })
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn one_electron(&self) -> &DMatrix<f64> {
        &self.mo_onee_ints
    }

    pub fn two_electron(&self) -> &TwoElectronIntegrals {
        &self.mo_eri_ints
    }
}

fn square_matrix(name: &str, rows: &[Vec<f64>], n: usize) -> Result<DMatrix<f64>> {
    if rows.len() != n || rows.iter().any(|row| row.len() != n) {
        return Err(DriverError::computation(format!(
            "{} is not a {}x{} matrix",
            name, n, n
        )));
    }
    Ok(DMatrix::from_fn(n, n, |i, j| rows[i][j]))
}

fn vector(name: &str, values: Vec<f64>, n: usize) -> Result<DVector<f64>> {
    if values.len() != n {
        return Err(DriverError::computation(format!(
            "{} has {} entries, expected {}",
            name,
            values.len(),
            n
        )));
    }
    Ok(DVector::from_vec(values))
}
