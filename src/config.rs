use crate::errors::{SimError, SimResult};
use crate::sim::StepConvention;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub market_data_base_url: String,
    pub step_convention: StepConvention,
    pub default_simulations: u32,
    pub rng_seed: Option<u64>,
    pub plot_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> SimResult<Self> {
        dotenvy::dotenv().ok();

        let step_convention = env_var_or("STEP_CONVENTION", "calendar")
            .parse::<StepConvention>()
            .map_err(|e| SimError::Config(format!("STEP_CONVENTION: {e}")))?;

        let default_simulations = env_var_or("SIMULATIONS", "1000")
            .parse::<u32>()
            .map_err(|e| SimError::Config(format!("SIMULATIONS: {e}")))?;
        if default_simulations == 0 {
            return Err(SimError::Config("SIMULATIONS must be positive".into()));
        }

        let rng_seed = match std::env::var("RNG_SEED") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|e| SimError::Config(format!("RNG_SEED: {e}")))?,
            ),
            Err(_) => None,
        };

        // PLOT_PATH="none" (or empty) disables chart output entirely
        let plot_path = match env_var_or("PLOT_PATH", "simulation.png") {
            s if s.is_empty() || s.eq_ignore_ascii_case("none") => None,
            s => Some(PathBuf::from(s)),
        };

        Ok(Self {
            market_data_base_url: env_var_or(
                "MARKET_DATA_BASE_URL",
                "https://query1.finance.yahoo.com",
            ),
            step_convention,
            default_simulations,
            rng_seed,
            plot_path,
        })
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
