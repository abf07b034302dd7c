use thiserror::Error;

/// Upper bound on the number of inflation scenarios compared side by side.
pub const MAX_INFLATION_RATES: usize = 3;

/// Longest projection horizon the engine will accept, in years.
pub const MAX_DURATION_YEARS: u32 = 1_000;

/// Snapshot of every dashboard input, taken once per recomputation.
///
/// Rates are kept in percent, matching the input surface; conversion to
/// fractions happens inside the individual formulas.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub base_amount: f64,
    pub inflation_rates: Vec<f64>,
    pub initial_investment: f64,
    pub duration_years: u32,
    pub return_rate: f64,
    pub monthly_withdrawal: f64,
}

/// One curve tied to a specific inflation rate, aligned with
/// [`ProjectionResult::years`].
#[derive(Debug, Clone, PartialEq)]
pub struct RateSeries {
    pub rate: f64,
    pub values: Vec<f64>,
}

/// Output of one projection. Every series has `duration_years + 1` points,
/// one per entry of `years`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionResult {
    pub years: Vec<u32>,
    pub purchasing_power: Vec<RateSeries>,
    pub nominal_balance: Vec<f64>,
    pub real_balance: Vec<RateSeries>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("non-finite value in {series} series at year {year}")]
    NumericDegeneracy { series: &'static str, year: u32 },
}
