//! Tests for the PyQuante driver using a mock backend

use super::*;
use crate::backend::{BackendRequest, IntegralBackend, RawIntegrals};
use crate::config::{OptionMap, OptionValue};
use crate::error::{DriverError, Result};
use crate::molecule::{BasisSet, Units, BOHR_IN_ANGSTROM};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Minimal-basis H2 integrals in the MO basis.
fn h2_raw_integrals() -> RawIntegrals {
    let n = 2;
    let mut eri = vec![0.0; 16];
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                for l in 0..n {
                    eri[((i * n + j) * n + k) * n + l] = match (i, j, k, l) {
                        (0, 0, 0, 0) => 0.6746,
                        (1, 1, 1, 1) => 0.6975,
                        (0, 0, 1, 1) | (1, 1, 0, 0) => 0.6636,
                        (0, 1, 0, 1) | (1, 0, 1, 0) | (0, 1, 1, 0) | (1, 0, 0, 1) => 0.1813,
                        _ => 0.0,
                    };
                }
            }
        }
    }

    RawIntegrals {
        hf_energy: -1.1167,
        nuclear_repulsion_energy: 0.7199,
        num_orbitals: n,
        num_alpha: 1,
        num_beta: 1,
        mo_coeff: vec![vec![0.5489, 1.2115], vec![0.5489, -1.2115]],
        mo_coeff_b: None,
        orbital_energies: vec![-0.5782, 0.6703],
        orbital_energies_b: None,
        mo_onee_ints: vec![vec![-1.2528, 0.0], vec![0.0, -0.4756]],
        mo_eri_ints: eri,
    }
}

#[derive(Clone)]
struct MockBackend {
    available: bool,
    output: std::result::Result<RawIntegrals, String>,
    calls: Rc<Cell<usize>>,
    last_request: Rc<RefCell<Option<BackendRequest>>>,
}

impl MockBackend {
    fn available() -> Self {
        Self {
            available: true,
            output: Ok(h2_raw_integrals()),
            calls: Rc::new(Cell::new(0)),
            last_request: Rc::new(RefCell::new(None)),
        }
    }

    fn missing() -> Self {
        Self {
            available: false,
            ..Self::available()
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            output: Err(message.to_string()),
            ..Self::available()
        }
    }
}

impl IntegralBackend for MockBackend {
    fn name(&self) -> &'static str {
        "Mock"
    }

    fn check_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(DriverError::unavailable("Mock", "install the mock engine"))
        }
    }

    fn compute(&self, request: &BackendRequest) -> Result<RawIntegrals> {
        self.calls.set(self.calls.get() + 1);
        *self.last_request.borrow_mut() = Some(request.clone());
        self.output.clone().map_err(DriverError::computation)
    }
}

fn options(pairs: &[(&str, OptionValue)]) -> OptionMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_defaults_run_h2() {
    let backend = MockBackend::available();
    let driver = PyQuanteDriver::from_options_with_backend(&OptionMap::new(), backend.clone())
        .unwrap();

    let result = driver.run().unwrap();
    assert_eq!(result.num_orbitals, 2);
    assert_eq!(result.one_electron().shape(), (2, 2));
    assert_eq!(result.two_electron().size(), 2);
    assert!(result.two_electron().is_symmetric(1e-12));
    assert_eq!(result.basis, BasisSet::Sto3g);
    assert_eq!(result.num_atoms(), 2);
    assert_eq!(result.atoms[0].symbol, "H");
    assert_eq!(backend.calls.get(), 1);
}

#[test]
fn test_backend_receives_bohr() {
    let backend = MockBackend::available();
    let driver = PyQuanteDriver::from_options_with_backend(&OptionMap::new(), backend.clone())
        .unwrap();
    let result = driver.run().unwrap();

    let request = backend.last_request.borrow().clone().unwrap();
    assert_eq!(request.units, Units::Bohr);
    assert_eq!(request.atoms.len(), 2);
    assert_eq!(request.atoms[0].atomic_number, 1);
    let expected = 0.735 / BOHR_IN_ANGSTROM;
    assert!((request.atoms[1].xyz[2] - expected).abs() < 1e-12);
    assert!((result.atoms[1].xyz[2] - expected).abs() < 1e-12);
}

#[test]
fn test_bohr_input_is_passed_through() {
    let backend = MockBackend::available();
    let opts = options(&[
        ("atoms", "H 0.0 0.0 0.0; H 0.0 0.0 1.4".into()),
        ("units", "Bohr".into()),
    ]);
    let driver = PyQuanteDriver::from_options_with_backend(&opts, backend.clone()).unwrap();
    driver.run().unwrap();

    let request = backend.last_request.borrow().clone().unwrap();
    assert_eq!(request.atoms[1].xyz[2], 1.4);
}

#[test]
fn test_run_recomputes_each_time() {
    let backend = MockBackend::available();
    let driver = PyQuanteDriver::from_options_with_backend(&OptionMap::new(), backend.clone())
        .unwrap();
    let first = driver.run().unwrap();
    let second = driver.run().unwrap();
    assert_eq!(backend.calls.get(), 2);
    assert_eq!(first.mo_onee_ints, second.mo_onee_ints);
}

#[test]
fn test_empty_atoms_is_parse_error_without_backend_call() {
    let backend = MockBackend::available();
    let opts = options(&[("atoms", "".into())]);
    let driver = PyQuanteDriver::from_options_with_backend(&opts, backend.clone()).unwrap();

    assert!(matches!(driver.run(), Err(DriverError::Parse { .. })));
    assert_eq!(backend.calls.get(), 0);
}

#[test]
fn test_parse_error_takes_precedence_over_missing_backend() {
    let backend = MockBackend::missing();
    let opts = options(&[("atoms", "H 0.0 0.0".into())]);
    let driver = PyQuanteDriver::from_options_with_backend(&opts, backend).unwrap();
    assert!(matches!(driver.run(), Err(DriverError::Parse { .. })));
}

#[test]
fn test_invalid_basis_rejected_at_construction() {
    let backend = MockBackend::available();
    let opts = options(&[("basis", "invalid-basis".into())]);
    match PyQuanteDriver::from_options_with_backend(&opts, backend.clone()) {
        Err(DriverError::Validation { field, .. }) => assert_eq!(field, "basis"),
        other => panic!("expected validation error, got {:?}", other.err()),
    }
    assert_eq!(backend.calls.get(), 0);
}

#[test]
fn test_missing_backend() {
    let backend = MockBackend::missing();
    let driver = PyQuanteDriver::from_options_with_backend(&OptionMap::new(), backend.clone())
        .unwrap();

    match driver.check_backend_valid() {
        Err(DriverError::BackendUnavailable { hint, .. }) => assert!(hint.contains("install")),
        other => panic!("expected unavailable backend, got {:?}", other),
    }
    assert!(matches!(
        driver.run(),
        Err(DriverError::BackendUnavailable { .. })
    ));
    assert_eq!(backend.calls.get(), 0);
}

#[test]
fn test_backend_failure_propagates() {
    let backend = MockBackend::failing("SCF did not converge");
    let driver = PyQuanteDriver::from_options_with_backend(&OptionMap::new(), backend).unwrap();
    match driver.run() {
        Err(DriverError::Computation { message }) => {
            assert!(message.contains("SCF did not converge"))
        }
        other => panic!("expected computation error, got {:?}", other.err()),
    }
}

#[test]
fn test_malformed_backend_output() {
    let mut raw = h2_raw_integrals();
    raw.mo_eri_ints.pop();
    let backend = MockBackend {
        output: Ok(raw),
        ..MockBackend::available()
    };
    let driver = PyQuanteDriver::from_options_with_backend(&OptionMap::new(), backend).unwrap();
    assert!(matches!(
        driver.run(),
        Err(DriverError::Computation { .. })
    ));
}

#[test]
fn test_driver_as_trait_object() {
    let drivers: Vec<Box<dyn Driver>> = vec![Box::new(
        PyQuanteDriver::from_options_with_backend(&OptionMap::new(), MockBackend::available())
            .unwrap(),
    )];

    for driver in &drivers {
        assert_eq!(driver.configuration().name, "PYQUANTE");
        let resolved = driver.validate(&OptionMap::new()).unwrap();
        assert_eq!(resolved.get_str("basis").unwrap(), "sto3g");
        assert!(driver.check_backend_valid().is_ok());
        assert_eq!(driver.run().unwrap().num_orbitals, 2);
    }
}

#[test]
fn test_supplied_values_are_kept() {
    let opts = options(&[
        ("atoms", "Li 0.0 0.0 0.0; H 0.0 0.0 1.6".into()),
        ("charge", 1i64.into()),
        ("multiplicity", 2i64.into()),
        ("basis", "6-31g**".into()),
        ("hf_method", "uhf".into()),
        ("tol", 1i64.into()),
    ]);
    let driver = PyQuanteDriver::from_options_with_backend(&opts, MockBackend::available()).unwrap();
    let molecule = driver.molecule();
    assert_eq!(molecule.atoms(), "Li 0.0 0.0 0.0; H 0.0 0.0 1.6");
    assert_eq!(molecule.charge(), 1);
    assert_eq!(molecule.multiplicity(), 2);
    assert_eq!(molecule.basis(), BasisSet::Pople631Gss);
    assert_eq!(molecule.tol(), 1.0);
    assert_eq!(molecule.units(), Units::Angstrom);
}

#[test]
fn test_to_options_round_trip() {
    let driver = PyQuanteDriver::from_options_with_backend(&OptionMap::new(), MockBackend::available())
        .unwrap();
    let rebuilt = PyQuanteDriver::from_options_with_backend(
        &driver.molecule().to_options(),
        MockBackend::available(),
    )
    .unwrap();
    assert_eq!(driver.molecule(), rebuilt.molecule());
    assert_eq!(driver.molecule(), &crate::molecule::MoleculeSpecification::default());
}
