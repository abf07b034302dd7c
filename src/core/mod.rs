mod engine;
mod series;
mod types;

pub use engine::compute;
pub use series::{ChartSeries, ChartView, DashStyle, chart_series};
pub use types::{
    MAX_DURATION_YEARS, MAX_INFLATION_RATES, ProjectionError, ProjectionResult, RateSeries,
    ScenarioParams,
};
