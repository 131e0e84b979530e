//! Input/Output operations for the integral driver
//!
//! This module handles logging setup, result export and run summaries.

mod output;
mod report;

pub use output::{setup_output, write_result};
pub use report::report_summary;
