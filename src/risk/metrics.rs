use crate::errors::{SimError, SimResult};
use statrs::statistics::Statistics;

/// Lower-tail probability of the VaR quantile (95% confidence level).
pub const VAR_TAIL: f64 = 0.05;

/// Distributional risk statistics over a value sequence.
/// Stack-allocated, Copy.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RiskMetrics {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub var_95: f64,
}

/// Compute min / max / mean / 95% VaR over a non-empty value sequence.
///
/// The caller picks the aggregation target: all points of a single path
/// (single-path reporting) or the final-price cross-section of an
/// ensemble (Monte Carlo reporting). Both modes go through this one
/// function.
///
/// VaR is the plain empirical quantile: sort ascending and take
/// `sorted[floor(0.05 * count)]`, no interpolation. count = 5 gives
/// index 0 (the minimum); count = 1 gives the only value.
///
/// Pure function; the only error path is empty input.
pub fn aggregate(values: &[f64]) -> SimResult<RiskMetrics> {
    if values.is_empty() {
        return Err(SimError::EmptyInput("aggregation over zero values"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let idx = (VAR_TAIL * sorted.len() as f64).floor() as usize;

    Ok(RiskMetrics {
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        average: values.mean(),
        var_95: sorted[idx],
    })
}

/// Cross-path average trajectory: entry `t` is the mean of `path[t]`
/// across all paths. All paths must share one length.
pub fn average_path(paths: &[Vec<f64>]) -> SimResult<Vec<f64>> {
    let Some(first) = paths.first() else {
        return Err(SimError::EmptyInput("average over zero paths"));
    };

    let expected = first.len();
    for p in paths {
        if p.len() != expected {
            return Err(SimError::DimensionMismatch {
                expected,
                got: p.len(),
            });
        }
    }

    let n = paths.len() as f64;
    Ok((0..expected)
        .map(|t| paths.iter().map(|p| p[t]).sum::<f64>() / n)
        .collect())
}
