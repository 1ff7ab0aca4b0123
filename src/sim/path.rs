use crate::errors::{SimError, SimResult};
use crate::sim::rng::NormalSource;
use crate::sim::{GbmParameters, StepConvention};

/// Generate one GBM price path of length `days + 1`.
///
/// Exact log-normal discretization, for t = 1..=days:
///
///   path[t] = path[t-1] * exp((mu - sigma^2/2) * dt + sigma * sqrt(dt) * z)
///
/// with z ~ N(0, 1) drawn fresh per step. Exact for any dt under constant
/// drift and volatility, not an Euler approximation. `path[0]` is the
/// start price. At zero volatility the path is the deterministic
/// `S0 * exp(mu * dt * t)`; the per-step draw is still consumed so a
/// seeded source advances identically in both regimes.
pub fn simulate_path(
    start_price: f64,
    days: usize,
    params: GbmParameters,
    convention: StepConvention,
    rng: &mut NormalSource,
) -> SimResult<Vec<f64>> {
    if !start_price.is_finite() || start_price <= 0.0 {
        return Err(SimError::InvalidParameter(format!(
            "start price must be positive and finite, got {start_price}"
        )));
    }
    if days == 0 {
        return Err(SimError::InvalidParameter(
            "horizon must be at least one day".into(),
        ));
    }
    if !params.drift.is_finite() {
        return Err(SimError::InvalidParameter(format!(
            "drift must be finite, got {}",
            params.drift
        )));
    }
    if !params.volatility.is_finite() || params.volatility < 0.0 {
        return Err(SimError::InvalidParameter(format!(
            "volatility must be non-negative and finite, got {}",
            params.volatility
        )));
    }

    let dt = convention.dt();
    let drift_step = (params.drift - 0.5 * params.volatility * params.volatility) * dt;
    let vol_step = params.volatility * dt.sqrt();

    // One draw per step, taken up front
    let mut draws = vec![0.0; days];
    rng.fill_normal(&mut draws);

    let mut path = Vec::with_capacity(days + 1);
    path.push(start_price);

    let mut price = start_price;
    for &z in &draws {
        price *= (drift_step + vol_step * z).exp();
        path.push(price);
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: GbmParameters = GbmParameters {
        drift: 0.08,
        volatility: 0.25,
    };

    #[test]
    fn test_length_and_start() {
        let mut rng = NormalSource::from_seed(42);
        let path = simulate_path(150.0, 30, PARAMS, StepConvention::CalendarDays, &mut rng).unwrap();
        assert_eq!(path.len(), 31);
        assert_eq!(path[0], 150.0);
    }

    #[test]
    fn test_prices_stay_positive() {
        let mut rng = NormalSource::from_seed(42);
        let wild = GbmParameters { drift: -0.5, volatility: 1.5 };
        let path = simulate_path(10.0, 365, wild, StepConvention::CalendarDays, &mut rng).unwrap();
        assert!(path.iter().all(|&p| p > 0.0 && p.is_finite()));
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let mut rng = NormalSource::from_seed(99);
        let params = GbmParameters { drift: 0.10, volatility: 0.0 };
        let convention = StepConvention::TradingDays;
        let path = simulate_path(100.0, 20, params, convention, &mut rng).unwrap();

        let dt = convention.dt();
        for (t, &p) in path.iter().enumerate() {
            let expected = 100.0 * (params.drift * dt * t as f64).exp();
            assert!(
                (p - expected).abs() < 1e-9,
                "t={t}: got {p}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_zero_volatility_still_consumes_draws() {
        // A seeded source must advance by exactly one draw per step
        // whether or not volatility is zero
        let params = GbmParameters { drift: 0.10, volatility: 0.0 };
        let mut rng_a = NormalSource::from_seed(7);
        simulate_path(100.0, 25, params, StepConvention::CalendarDays, &mut rng_a).unwrap();

        let mut rng_b = NormalSource::from_seed(7);
        for _ in 0..25 {
            rng_b.next_normal();
        }

        assert_eq!(rng_a.next_normal().to_bits(), rng_b.next_normal().to_bits());
    }

    #[test]
    fn test_same_seed_same_path() {
        let mut rng_a = NormalSource::from_seed(1234);
        let mut rng_b = NormalSource::from_seed(1234);
        let a = simulate_path(100.0, 100, PARAMS, StepConvention::CalendarDays, &mut rng_a).unwrap();
        let b = simulate_path(100.0, 100, PARAMS, StepConvention::CalendarDays, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_conventions_differ() {
        let mut rng_a = NormalSource::from_seed(5);
        let mut rng_b = NormalSource::from_seed(5);
        let cal = simulate_path(100.0, 10, PARAMS, StepConvention::CalendarDays, &mut rng_a).unwrap();
        let trd = simulate_path(100.0, 10, PARAMS, StepConvention::TradingDays, &mut rng_b).unwrap();
        assert_ne!(cal, trd, "step convention must change the output");
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut rng = NormalSource::from_seed(1);
        let conv = StepConvention::CalendarDays;

        assert!(matches!(
            simulate_path(0.0, 10, PARAMS, conv, &mut rng),
            Err(SimError::InvalidParameter(_))
        ));
        assert!(matches!(
            simulate_path(-5.0, 10, PARAMS, conv, &mut rng),
            Err(SimError::InvalidParameter(_))
        ));
        assert!(matches!(
            simulate_path(100.0, 0, PARAMS, conv, &mut rng),
            Err(SimError::InvalidParameter(_))
        ));
        let neg_vol = GbmParameters { drift: 0.1, volatility: -0.2 };
        assert!(matches!(
            simulate_path(100.0, 10, neg_vol, conv, &mut rng),
            Err(SimError::InvalidParameter(_))
        ));
        let nan_drift = GbmParameters { drift: f64::NAN, volatility: 0.2 };
        assert!(matches!(
            simulate_path(100.0, 10, nan_drift, conv, &mut rng),
            Err(SimError::InvalidParameter(_))
        ));
    }
}
