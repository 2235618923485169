//! Chart policy options.

use serde::{Deserialize, Serialize};

/// Knobs controlling chart generation.
///
/// The defaults encode the external contract: 30 histogram bins, up to 3
/// time-series panels, up to 4 distribution and categorical panels, top 10
/// categorical values. Canvas sizes are presentation-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Number of bins for distribution histograms.
    pub histogram_bins: usize,
    /// Maximum numeric columns plotted in the time-series chart.
    pub max_timeseries_panels: usize,
    /// Maximum numeric columns plotted in the distributions grid.
    pub max_distribution_panels: usize,
    /// Maximum categorical columns plotted in the categorical grid.
    pub max_categorical_panels: usize,
    /// Number of most-frequent values shown per categorical column.
    pub top_value_limit: usize,
    /// Pixel size of the correlation heatmap canvas.
    pub heatmap_canvas: (u32, u32),
    /// Pixel size of the 2x2 grid canvases (distributions, categorical).
    pub grid_canvas: (u32, u32),
    /// Pixel width of the time-series canvas.
    pub timeseries_width: u32,
    /// Pixel height of each time-series panel.
    pub timeseries_panel_height: u32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            histogram_bins: 30,
            max_timeseries_panels: 3,
            max_distribution_panels: 4,
            max_categorical_panels: 4,
            top_value_limit: 10,
            heatmap_canvas: (1000, 800),
            grid_canvas: (1400, 1100),
            timeseries_width: 1400,
            timeseries_panel_height: 420,
        }
    }
}
