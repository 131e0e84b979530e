use super::{Driver, DriverConfiguration};
use crate::backend::{BackendRequest, IntegralBackend, PyQuanteBackend};
use crate::config::{ConfigSchema, OptionMap, OptionSchema, OptionType};
use crate::error::Result;
use crate::integrals::IntegralResult;
use crate::molecule::{
    BasisSet, HfMethod, MoleculeSpecification, Units, DEFAULT_ATOMS, DEFAULT_CHARGE,
    DEFAULT_MAXITERS, DEFAULT_MULTIPLICITY, DEFAULT_TOL,
};
use std::sync::LazyLock;
use tracing::info;

static CONFIGURATION: LazyLock<DriverConfiguration> = LazyLock::new(|| DriverConfiguration {
    name: "PYQUANTE",
    description: "PyQuante Driver",
    input_schema: ConfigSchema::new(
        "pyquante_schema",
        vec![
            OptionSchema::new("atoms", OptionType::String).with_default(DEFAULT_ATOMS),
            OptionSchema::new("units", OptionType::String)
                .with_default(Units::default().name())
                .one_of(&Units::NAMES),
            OptionSchema::new("charge", OptionType::Integer).with_default(DEFAULT_CHARGE),
            OptionSchema::new("multiplicity", OptionType::Integer)
                .with_default(DEFAULT_MULTIPLICITY)
                .at_least(1.0),
            OptionSchema::new("basis", OptionType::String)
                .with_default(BasisSet::default().name())
                .one_of(&BasisSet::NAMES),
            OptionSchema::new("hf_method", OptionType::String)
                .with_default(HfMethod::default().name())
                .one_of(&HfMethod::NAMES),
            OptionSchema::new("tol", OptionType::Number)
                .with_default(DEFAULT_TOL)
                .greater_than(0.0),
            OptionSchema::new("maxiters", OptionType::Integer)
                .with_default(DEFAULT_MAXITERS)
                .at_least(1.0),
        ],
    ),
});

/// Driver computing integrals with PyQuante2.
pub struct PyQuanteDriver {
    molecule: MoleculeSpecification,
    backend: Box<dyn IntegralBackend>,
}

impl PyQuanteDriver {
    pub fn driver_configuration() -> &'static DriverConfiguration {
        &CONFIGURATION
    }

    pub fn new(molecule: MoleculeSpecification) -> Self {
        Self::with_backend(molecule, PyQuanteBackend::new())
    }

    pub fn with_backend(
        molecule: MoleculeSpecification,
        backend: impl IntegralBackend + 'static,
    ) -> Self {
        Self {
            molecule,
            backend: Box::new(backend),
        }
    }

    /// Validate `options` against the schema and build a driver.
    pub fn from_options(options: &OptionMap) -> Result<Self> {
        Self::from_options_with_backend(options, PyQuanteBackend::new())
    }

    pub fn from_options_with_backend(
        options: &OptionMap,
        backend: impl IntegralBackend + 'static,
    ) -> Result<Self> {
        let resolved = CONFIGURATION.input_schema.validate(options)?;
        let molecule = MoleculeSpecification::from_resolved(&resolved)?;
        info!(
            "Configured {} driver: atoms=\"{}\" units={} charge={} multiplicity={} basis={}",
            CONFIGURATION.name,
            molecule.atoms(),
            molecule.units(),
            molecule.charge(),
            molecule.multiplicity(),
            molecule.basis()
        );
        Ok(Self::with_backend(molecule, backend))
    }

    pub fn molecule(&self) -> &MoleculeSpecification {
        &self.molecule
    }
}

impl Default for PyQuanteDriver {
    fn default() -> Self {
        Self::new(MoleculeSpecification::default())
    }
}

impl Driver for PyQuanteDriver {
    fn configuration(&self) -> &DriverConfiguration {
        &CONFIGURATION
    }

    fn check_backend_valid(&self) -> Result<()> {
        self.backend.check_available()
    }

    fn run(&self) -> Result<IntegralResult> {
        // Parse before touching the backend so format errors stay parse errors.
        let atoms = self.molecule.geometry_in_bohr()?;
        self.check_backend_valid()?;

        let request = BackendRequest::new(&self.molecule, &atoms);
        let raw = self.backend.compute(&request)?;
        let result = IntegralResult::from_raw(raw, &self.molecule, &atoms)?;

        info!(
            "{} finished: {} orbitals, E(HF) = {:.10} au, E(nuc) = {:.10} au",
            self.backend.name(),
            result.num_orbitals,
            result.hf_energy,
            result.nuclear_repulsion_energy
        );
        Ok(result)
    }
}
