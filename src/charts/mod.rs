pub mod planner;
pub mod render;
pub mod spec;
pub mod temporal;

pub use planner::{
    plan_and_render, CATEGORICAL_FILE, DISTRIBUTIONS_FILE, HEATMAP_FILE, TIME_SERIES_FILE,
};
pub use render::BitmapRenderer;
pub use spec::{ChartArtifact, ChartCategory, ChartRenderer, ChartSpec};
