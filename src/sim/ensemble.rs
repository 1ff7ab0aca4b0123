use crate::errors::{SimError, SimResult};
use crate::sim::path::simulate_path;
use crate::sim::rng::NormalSource;
use crate::sim::{GbmParameters, StepConvention};

/// A Monte Carlo ensemble of independently simulated price paths.
/// All paths have identical length `days + 1` and are stored in call
/// order, so the same seed reproduces the same ensemble in the same
/// order. Read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    paths: Vec<Vec<f64>>,
}

impl PathEnsemble {
    pub fn paths(&self) -> &[Vec<f64>] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Final price of every path, in path order. This is the
    /// cross-section the Monte Carlo risk metrics are computed over.
    pub fn final_prices(&self) -> Vec<f64> {
        self.paths
            .iter()
            .filter_map(|p| p.last().copied())
            .collect()
    }
}

/// Aggregate view of an ensemble produced without materializing it:
/// the final-price cross-section plus the cross-path average trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleSummary {
    pub final_prices: Vec<f64>,
    pub average_path: Vec<f64>,
}

/// Run `simulations` independent GBM paths on a shared draw source.
///
/// Each call consumes fresh draws, so paths are independent of each
/// other; draw consumption is strictly sequential, which keeps the
/// ensemble reproducible under a fixed seed.
pub fn run_ensemble(
    start_price: f64,
    days: usize,
    simulations: u32,
    params: GbmParameters,
    convention: StepConvention,
    rng: &mut NormalSource,
) -> SimResult<PathEnsemble> {
    if simulations == 0 {
        return Err(SimError::InputValidation(
            "simulation count must be positive".into(),
        ));
    }

    let mut paths = Vec::with_capacity(simulations as usize);
    for _ in 0..simulations {
        paths.push(simulate_path(start_price, days, params, convention, rng)?);
    }

    Ok(PathEnsemble { paths })
}

/// Streaming counterpart of [`run_ensemble`]: consumes each path as it
/// is generated, keeping only the final prices and the per-index sums
/// for the average trajectory. Memory is O(simulations + days) instead
/// of O(simulations * days), and for a given seed the resulting
/// statistics are identical to the materialized ensemble's.
pub fn run_streaming(
    start_price: f64,
    days: usize,
    simulations: u32,
    params: GbmParameters,
    convention: StepConvention,
    rng: &mut NormalSource,
) -> SimResult<EnsembleSummary> {
    if simulations == 0 {
        return Err(SimError::InputValidation(
            "simulation count must be positive".into(),
        ));
    }

    let mut final_prices = Vec::with_capacity(simulations as usize);
    let mut sums = vec![0.0; days + 1];

    for _ in 0..simulations {
        let path = simulate_path(start_price, days, params, convention, rng)?;
        for (slot, &p) in sums.iter_mut().zip(&path) {
            *slot += p;
        }
        if let Some(&last) = path.last() {
            final_prices.push(last);
        }
    }

    let n = simulations as f64;
    let average_path = sums.into_iter().map(|s| s / n).collect();

    Ok(EnsembleSummary {
        final_prices,
        average_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::metrics::{aggregate, average_path};

    const PARAMS: GbmParameters = GbmParameters {
        drift: 0.05,
        volatility: 0.3,
    };

    #[test]
    fn test_shape() {
        let mut rng = NormalSource::from_seed(42);
        let ens = run_ensemble(100.0, 30, 50, PARAMS, StepConvention::CalendarDays, &mut rng).unwrap();
        assert_eq!(ens.len(), 50);
        assert!(ens.paths().iter().all(|p| p.len() == 31));
        assert!(ens.paths().iter().all(|p| p[0] == 100.0));
        assert_eq!(ens.final_prices().len(), 50);
    }

    #[test]
    fn test_rejects_zero_simulations() {
        let mut rng = NormalSource::from_seed(42);
        assert!(matches!(
            run_ensemble(100.0, 30, 0, PARAMS, StepConvention::CalendarDays, &mut rng),
            Err(SimError::InputValidation(_))
        ));
        assert!(matches!(
            run_streaming(100.0, 30, 0, PARAMS, StepConvention::CalendarDays, &mut rng),
            Err(SimError::InputValidation(_))
        ));
    }

    #[test]
    fn test_same_seed_bit_identical_ensemble() {
        let mut rng_a = NormalSource::from_seed(2024);
        let mut rng_b = NormalSource::from_seed(2024);
        let a = run_ensemble(100.0, 60, 20, PARAMS, StepConvention::CalendarDays, &mut rng_a).unwrap();
        let b = run_ensemble(100.0, 60, 20, PARAMS, StepConvention::CalendarDays, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_paths_are_independent() {
        let mut rng = NormalSource::from_seed(42);
        let ens = run_ensemble(100.0, 30, 10, PARAMS, StepConvention::CalendarDays, &mut rng).unwrap();
        for (i, a) in ens.paths().iter().enumerate() {
            for b in ens.paths().iter().skip(i + 1) {
                assert_ne!(a, b, "two paths in one ensemble should not coincide");
            }
        }
    }

    #[test]
    fn test_single_path_mode_matches_simulate_path() {
        let mut rng_a = NormalSource::from_seed(77);
        let mut rng_b = NormalSource::from_seed(77);
        let ens = run_ensemble(100.0, 40, 1, PARAMS, StepConvention::CalendarDays, &mut rng_a).unwrap();
        let path = simulate_path(100.0, 40, PARAMS, StepConvention::CalendarDays, &mut rng_b).unwrap();
        assert_eq!(ens.paths(), std::slice::from_ref(&path));
    }

    #[test]
    fn test_streaming_matches_materialized() {
        let mut rng_a = NormalSource::from_seed(555);
        let mut rng_b = NormalSource::from_seed(555);

        let ens = run_ensemble(100.0, 50, 40, PARAMS, StepConvention::CalendarDays, &mut rng_a).unwrap();
        let summary = run_streaming(100.0, 50, 40, PARAMS, StepConvention::CalendarDays, &mut rng_b).unwrap();

        assert_eq!(summary.final_prices, ens.final_prices());
        assert_eq!(summary.average_path, average_path(ens.paths()).unwrap());

        let from_ens = aggregate(&ens.final_prices()).unwrap();
        let from_stream = aggregate(&summary.final_prices).unwrap();
        assert_eq!(from_ens, from_stream);
    }
}
