use super::types::{
    MAX_DURATION_YEARS, MAX_INFLATION_RATES, ProjectionError, ProjectionResult, RateSeries,
    ScenarioParams,
};

pub fn compute(params: &ScenarioParams) -> Result<ProjectionResult, ProjectionError> {
    validate(params)?;

    let years: Vec<u32> = (0..=params.duration_years).collect();

    let nominal_balance = balance_series(
        params.initial_investment,
        params.return_rate,
        params.monthly_withdrawal,
        params.duration_years,
    );
    ensure_finite("balance", &nominal_balance)?;

    let mut purchasing_power = Vec::with_capacity(params.inflation_rates.len());
    let mut real_balance = Vec::with_capacity(params.inflation_rates.len());
    for &rate in &params.inflation_rates {
        let erosion = purchasing_power_series(params.base_amount, rate, params.duration_years);
        ensure_finite("purchasing power", &erosion)?;
        purchasing_power.push(RateSeries {
            rate,
            values: erosion,
        });

        let real = real_value_series(&nominal_balance, rate);
        ensure_finite("real value", &real)?;
        real_balance.push(RateSeries { rate, values: real });
    }

    Ok(ProjectionResult {
        years,
        purchasing_power,
        nominal_balance,
        real_balance,
    })
}

fn validate(params: &ScenarioParams) -> Result<(), ProjectionError> {
    if !params.base_amount.is_finite() || params.base_amount <= 0.0 {
        return Err(invalid("base amount must be finite and > 0"));
    }

    if !params.initial_investment.is_finite() || params.initial_investment < 0.0 {
        return Err(invalid("initial investment must be finite and >= 0"));
    }

    if !params.monthly_withdrawal.is_finite() || params.monthly_withdrawal < 0.0 {
        return Err(invalid("monthly withdrawal must be finite and >= 0"));
    }

    if !params.return_rate.is_finite() || params.return_rate <= -100.0 {
        return Err(invalid("return rate must be finite and > -100"));
    }

    if params.duration_years > MAX_DURATION_YEARS {
        return Err(invalid(format!(
            "duration must be <= {MAX_DURATION_YEARS} years"
        )));
    }

    if params.inflation_rates.len() > MAX_INFLATION_RATES {
        return Err(invalid(format!(
            "at most {MAX_INFLATION_RATES} inflation rates are supported"
        )));
    }

    for &rate in &params.inflation_rates {
        if !rate.is_finite() || rate < 0.0 {
            return Err(invalid("inflation rates must be finite and >= 0"));
        }
        if rate >= 100.0 {
            return Err(invalid("inflation rates must be below 100"));
        }
    }

    Ok(())
}

fn invalid(reason: impl Into<String>) -> ProjectionError {
    ProjectionError::InvalidInput(reason.into())
}

fn purchasing_power_series(base_amount: f64, inflation_rate: f64, duration_years: u32) -> Vec<f64> {
    let retention = 1.0 - inflation_rate / 100.0;
    (0..=duration_years)
        .map(|t| base_amount * retention.powi(t as i32))
        .collect()
}

// Strictly sequential: each year's balance feeds the next, so the loop must
// run in year order.
fn balance_series(
    initial_investment: f64,
    return_rate: f64,
    monthly_withdrawal: f64,
    duration_years: u32,
) -> Vec<f64> {
    let growth = 1.0 + return_rate / 100.0;
    let annual_withdrawal = 12.0 * monthly_withdrawal;

    let mut values = Vec::with_capacity(duration_years as usize + 1);
    let mut balance = initial_investment;
    values.push(balance);
    for _ in 1..=duration_years {
        balance = balance * growth - annual_withdrawal;
        values.push(balance);
    }
    values
}

fn real_value_series(nominal_balance: &[f64], inflation_rate: f64) -> Vec<f64> {
    let deflator_base = 1.0 + inflation_rate / 100.0;
    nominal_balance
        .iter()
        .enumerate()
        .map(|(t, value)| value / deflator_base.powi(t as i32))
        .collect()
}

fn ensure_finite(series: &'static str, values: &[f64]) -> Result<(), ProjectionError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(year) => Err(ProjectionError::NumericDegeneracy {
            series,
            year: year as u32,
        }),
        None => Ok(()),
    }
}
