//! Logging setup and result export

use crate::integrals::IntegralResult;
use color_eyre::eyre::{Result, WrapErr};
use std::fmt;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, fmt::format::Writer, fmt::layer, fmt::time::FormatTime,
    layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        // HH:MM:SS
        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Setup log output to a file or stdout
pub fn setup_output(output_path: Option<&Path>, verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    match output_path {
        Some(path) => {
            let log = File::create(path)
                .wrap_err_with(|| format!("Could not create output file: {}", path.display()))?;
            let file_layer = layer()
                .with_writer(Mutex::new(log))
                .with_timer(SecondPrecisionTimer)
                .with_ansi(false)
                .with_filter(level);
            Registry::default().with(file_layer).try_init()?;
            info!("Output will be written to: {}", path.display());
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true)
                .with_filter(level);
            Registry::default().with(stdout_layer).try_init()?;
        }
    }
    Ok(())
}

/// Write an integral result as YAML (`.yaml`/`.yml`) or JSON (anything else).
pub fn write_result(path: &Path, result: &IntegralResult) -> Result<()> {
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    let content = if is_yaml {
        serde_yml::to_string(result).wrap_err("Failed to encode result as YAML")?
    } else {
        serde_json::to_string_pretty(result).wrap_err("Failed to encode result as JSON")?
    };

    fs::write(path, content)
        .wrap_err_with(|| format!("Unable to write result file: {}", path.display()))?;
    info!("Integral result written to: {}", path.display());
    Ok(())
}
