use serde::Serialize;

use super::types::{ProjectionResult, ScenarioParams};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChartView {
    Nominal,
    InflationAdjusted,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashStyle {
    Solid,
    Dot,
    Dash,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    pub dash: DashStyle,
    pub width: u32,
    pub values: Vec<f64>,
}

pub fn chart_series(
    params: &ScenarioParams,
    result: &ProjectionResult,
    view: ChartView,
) -> Vec<ChartSeries> {
    let mut series = Vec::with_capacity(result.purchasing_power.len() * 2 + 1);
    let return_label = fmt_number(params.return_rate);
    let withdrawal_label = fmt_number(params.monthly_withdrawal);

    for erosion in &result.purchasing_power {
        let label = match view {
            ChartView::Nominal => format!("Inflation @ {}%", fmt_number(erosion.rate)),
            ChartView::InflationAdjusted => {
                format!("Inflation @ {}% (purchasing power)", fmt_number(erosion.rate))
            }
        };
        series.push(ChartSeries {
            label,
            dash: DashStyle::Solid,
            width: 2,
            values: erosion.values.clone(),
        });
    }

    let balance_label = match view {
        ChartView::Nominal => {
            format!("Investment @ {return_label}% | {withdrawal_label}/mo withdrawal")
        }
        ChartView::InflationAdjusted => {
            format!("Nominal investment @ {return_label}% with {withdrawal_label}/mo withdrawal")
        }
    };
    series.push(ChartSeries {
        label: balance_label,
        dash: DashStyle::Dot,
        width: 4,
        values: result.nominal_balance.clone(),
    });

    if view == ChartView::InflationAdjusted {
        for real in &result.real_balance {
            series.push(ChartSeries {
                label: format!(
                    "Investment real @ {return_label}% adjusted for {}% inflation",
                    fmt_number(real.rate)
                ),
                dash: DashStyle::Dash,
                width: 3,
                values: real.values.clone(),
            });
        }
    }

    series
}

// Rates and amounts render without a trailing ".0"; display-time thousands
// separators stay in the frontend.
fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
