use clap::Parser;
use std::path::PathBuf;

use quickstats::analysis::run_analysis;
use quickstats::charts::BitmapRenderer;
use quickstats::config::AnalysisOptions;
use quickstats::error::Result;
use quickstats::report::format_report;

#[derive(Parser)]
#[command(
    name = "quickstats",
    about = "Single-pass exploratory analysis for CSV files",
    version
)]
pub struct Cli {
    /// Path to the CSV file to analyse
    pub file: PathBuf,

    /// Directory for generated chart images
    #[arg(default_value = ".")]
    pub output_dir: PathBuf,

    /// Emit the analysis as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    let options = AnalysisOptions::default();
    let renderer = BitmapRenderer::new(options.clone());
    let analysis = run_analysis(&cli.file, &cli.output_dir, &options, &renderer)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&analysis)
            .map_err(|e| anyhow::anyhow!("failed to serialize analysis: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", format_report(&analysis));
    }

    Ok(())
}
