use crate::errors::{SimError, SimResult};
use crate::sim::{GbmParameters, TRADING_DAYS_PER_YEAR};
use statrs::statistics::Statistics;

/// Minimum number of closes for a usable calibration.
pub const MIN_HISTORY_POINTS: usize = 20;

/// Daily percentage changes `(p[t] / p[t-1]) - 1`, leading element dropped.
/// Non-finite changes are excluded, so a zero or missing close never
/// poisons the calibration.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|w| w[1] / w[0] - 1.0)
        .filter(|r| r.is_finite())
        .collect()
}

/// Annualized drift and volatility from a chronological close series,
/// on the standard 252-trading-day basis.
pub fn estimate(closes: &[f64]) -> SimResult<GbmParameters> {
    estimate_with_basis(closes, TRADING_DAYS_PER_YEAR)
}

/// Annualized drift and volatility with an explicit annualization basis.
///
/// drift = mean(returns) * basis
/// volatility = sample_std_dev(returns) * sqrt(basis)
///
/// Sample standard deviation (N-1 denominator), the conventional choice
/// for financial return series. Pure function of its input.
pub fn estimate_with_basis(closes: &[f64], basis: f64) -> SimResult<GbmParameters> {
    if closes.len() < MIN_HISTORY_POINTS {
        return Err(SimError::InsufficientData {
            got: closes.len(),
            min: MIN_HISTORY_POINTS,
        });
    }
    if !basis.is_finite() || basis <= 0.0 {
        return Err(SimError::InvalidParameter(format!(
            "annualization basis must be positive and finite, got {basis}"
        )));
    }

    let returns = daily_returns(closes);
    if returns.len() < 2 {
        return Err(SimError::InsufficientData {
            got: returns.len(),
            min: 2,
        });
    }

    let drift = returns.as_slice().mean() * basis;
    let volatility = returns.as_slice().std_dev() * basis.sqrt();

    Ok(GbmParameters { drift, volatility })
}
