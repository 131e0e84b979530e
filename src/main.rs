//! Integral driver command-line interface
//!
//! Reads molecule options from a YAML file and/or flags, runs the PyQuante2
//! driver and reports or exports the resulting integrals.

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use scf_driver::config::{load_options, merge_options, Args, OptionMap};
use scf_driver::io::{report_summary, setup_output, write_result};
use scf_driver::{Driver, PyQuanteBackend, PyQuanteDriver};
use tracing::info;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if args.print_schema {
        let schema = serde_json::to_string_pretty(PyQuanteDriver::driver_configuration())?;
        println!("{}", schema);
        return Ok(());
    }

    setup_output(args.output.as_deref(), args.verbose)?;

    let file_options = match &args.config_file {
        Some(path) => {
            info!("Reading configuration from: {}", path.display());
            load_options(path)?
        }
        None => OptionMap::new(),
    };
    let options = merge_options(file_options, args.overrides());

    let backend = match &args.python {
        Some(python) => PyQuanteBackend::with_interpreter(python),
        None => PyQuanteBackend::new(),
    };
    let driver = PyQuanteDriver::from_options_with_backend(&options, backend)
        .wrap_err("Invalid driver configuration")?;

    if args.check {
        driver.check_backend_valid()?;
        info!("PyQuante2 backend is available");
        return Ok(());
    }

    let result = driver.run().wrap_err("Integral computation failed")?;
    report_summary(&result);

    if let Some(path) = &args.result {
        write_result(path, &result)?;
    }

    Ok(())
}
