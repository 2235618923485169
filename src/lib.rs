//! # quickstats: single-pass exploratory analysis for CSV files
//!
//! Given one tabular file, the pipeline produces a data-quality report,
//! per-column descriptive statistics, a pairwise correlation matrix, a set
//! of PNG chart artifacts and one formatted text report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn example() -> quickstats::error::Result<()> {
//! let report = quickstats::analysis::summarize(Path::new("data.csv"), Path::new("out"))?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! load_dataset ──> analyze_quality ──┐
//!              ──> compute_statistics ├──> plan_and_render ──> format_report
//!              ──> analyze_correlations ┘
//! ```
//!
//! Loader failures ([`error::PipelineError::NotFound`],
//! [`error::PipelineError::EmptyInput`],
//! [`error::PipelineError::MalformedInput`]) abort the run; everything after
//! a successful load degrades instead of failing, so a readable dataset
//! always yields a complete report.

#![warn(clippy::all, rust_2018_idioms)]

pub mod analysis;
pub mod charts;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;

pub use analysis::{run_analysis, summarize};
