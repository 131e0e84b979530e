//! Command-line argument parsing for the integral driver

use super::{OptionMap, OptionValue};
use clap::Parser;
use std::path::PathBuf;

/// Compute one- and two-electron integrals for a molecule through PyQuante2
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a YAML file with driver options
    #[arg(short, long = "config")]
    pub config_file: Option<PathBuf>,

    /// Molecule as "SYMBOL X Y Z; SYMBOL X Y Z; ..."
    #[arg(long)]
    pub atoms: Option<String>,

    /// Coordinate units (Angstrom or Bohr)
    #[arg(long)]
    pub units: Option<String>,

    /// Molecular charge
    #[arg(long, allow_hyphen_values = true)]
    pub charge: Option<i64>,

    /// Spin multiplicity (2S+1)
    #[arg(long)]
    pub multiplicity: Option<i64>,

    /// Basis set (sto3g, 6-31g or 6-31g**)
    #[arg(long)]
    pub basis: Option<String>,

    /// Hartree-Fock method (rhf, rohf or uhf)
    #[arg(long)]
    pub hf_method: Option<String>,

    /// SCF convergence tolerance
    #[arg(long)]
    pub tol: Option<f64>,

    /// Maximum SCF iterations
    #[arg(long)]
    pub maxiters: Option<i64>,

    /// Python interpreter used to run the backend
    #[arg(long)]
    pub python: Option<PathBuf>,

    /// Only check that the backend is available
    #[arg(long)]
    pub check: bool,

    /// Print the driver configuration schema as JSON and exit
    #[arg(long)]
    pub print_schema: bool,

    /// Override output file for logs: (default stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the integral result to this file (JSON, or YAML for .yaml/.yml)
    #[arg(short, long)]
    pub result: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Options given on the command line, to be merged over the option file.
    pub fn overrides(&self) -> OptionMap {
        let mut options = OptionMap::new();
        let mut insert = |name: &str, value: Option<OptionValue>| {
            if let Some(value) = value {
                options.insert(name.to_string(), value);
            }
        };

        insert("atoms", self.atoms.clone().map(OptionValue::from));
        insert("units", self.units.clone().map(OptionValue::from));
        insert("charge", self.charge.map(OptionValue::from));
        insert("multiplicity", self.multiplicity.map(OptionValue::from));
        insert("basis", self.basis.clone().map(OptionValue::from));
        insert("hf_method", self.hf_method.clone().map(OptionValue::from));
        insert("tol", self.tol.map(OptionValue::from));
        insert("maxiters", self.maxiters.map(OptionValue::from));

        options
    }
}
