use crate::error::{DriverError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Existence check for an external engine. Performs no chemistry.
pub trait BackendProbe {
    fn check(&self) -> Result<()>;
}

/// Looks a Python module up with `importlib.util.find_spec` without
/// importing it.
#[derive(Debug, Clone)]
pub struct PythonModuleProbe {
    python: PathBuf,
    module: &'static str,
    backend: &'static str,
    hint: &'static str,
}

impl PythonModuleProbe {
    pub fn new(
        python: impl Into<PathBuf>,
        module: &'static str,
        backend: &'static str,
        hint: &'static str,
    ) -> Self {
        Self {
            python: python.into(),
            module,
            backend,
            hint,
        }
    }

    pub fn interpreter(&self) -> &Path {
        &self.python
    }

    fn find_spec(&self) -> std::io::Result<bool> {
        let script = format!(
            "import importlib.util, sys; sys.exit(0 if importlib.util.find_spec({:?}) else 1)",
            self.module
        );
        let status = Command::new(&self.python)
            .arg("-c")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(status.success())
    }
}

impl BackendProbe for PythonModuleProbe {
    fn check(&self) -> Result<()> {
        match self.find_spec() {
            Ok(true) => {
                debug!(
                    "Found Python module {} via {}",
                    self.module,
                    self.python.display()
                );
                Ok(())
            }
            Ok(false) => Err(DriverError::unavailable(self.backend, self.hint)),
            Err(err) => {
                debug!("{} check error {}", self.backend, err);
                Err(DriverError::unavailable(self.backend, self.hint))
            }
        }
    }
}
