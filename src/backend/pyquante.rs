use super::probe::{BackendProbe, PythonModuleProbe};
use super::{BackendRequest, IntegralBackend, RawIntegrals};
use crate::error::{DriverError, Result};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

pub const PYQUANTE_MODULE: &str = "pyquante2";
pub const PYQUANTE_HINT: &str =
    "PyQuante2 is not installed. See https://github.com/rpmuller/pyquante2";
/// Environment variable naming the Python interpreter to use.
pub const PYTHON_ENV_VAR: &str = "SCF_DRIVER_PYTHON";

const BACKEND_NAME: &str = "PyQuante2";
const DEFAULT_PYTHON: &str = "python3";
const HELPER_SCRIPT: &str = include_str!("pyquante_integrals.py");

/// PyQuante2 running under an external Python interpreter.
///
/// The request is written to the helper's stdin as JSON and the integrals
/// are read back from its stdout.
#[derive(Debug, Clone)]
pub struct PyQuanteBackend {
    probe: PythonModuleProbe,
}

impl PyQuanteBackend {
    /// Uses `$SCF_DRIVER_PYTHON`, falling back to `python3` on `PATH`.
    pub fn new() -> Self {
        let python = env::var_os(PYTHON_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PYTHON));
        Self::with_interpreter(python)
    }

    pub fn with_interpreter(python: impl Into<PathBuf>) -> Self {
        Self {
            probe: PythonModuleProbe::new(python, PYQUANTE_MODULE, BACKEND_NAME, PYQUANTE_HINT),
        }
    }

    pub fn interpreter(&self) -> &Path {
        self.probe.interpreter()
    }
}

impl Default for PyQuanteBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegralBackend for PyQuanteBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn check_available(&self) -> Result<()> {
        self.probe.check()
    }

    fn compute(&self, request: &BackendRequest) -> Result<RawIntegrals> {
        let payload = serde_json::to_vec(request)
            .map_err(|e| DriverError::computation(format!("cannot encode request: {}", e)))?;

        info!(
            "Running {} ({} basis, {}) for {} atoms",
            BACKEND_NAME,
            request.basis,
            request.hf_method,
            request.atoms.len()
        );
        let mut child = Command::new(self.interpreter())
            .arg("-c")
            .arg(HELPER_SCRIPT)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                DriverError::computation(format!(
                    "failed to start {}: {}",
                    self.interpreter().display(),
                    e
                ))
            })?;

        // The helper may exit before reading its input; reap it and keep its
        // stderr before reporting a failed write.
        let send_error = child
            .stdin
            .take()
            .and_then(|mut stdin| stdin.write_all(&payload).err());

        let output = child
            .wait_with_output()
            .map_err(|e| DriverError::computation(format!("backend process failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DriverError::computation(format!(
                "{} exited with {}: {}",
                BACKEND_NAME,
                output.status,
                stderr.trim()
            )));
        }
        if let Some(e) = send_error {
            return Err(DriverError::computation(format!(
                "cannot send request: {}",
                e
            )));
        }

        let raw: RawIntegrals = serde_json::from_slice(&output.stdout).map_err(|e| {
            DriverError::computation(format!("malformed {} output: {}", BACKEND_NAME, e))
        })?;
        debug!(
            "{} returned {} orbitals, E(HF) = {:.10}",
            BACKEND_NAME, raw.num_orbitals, raw.hf_energy
        );
        Ok(raw)
    }
}
