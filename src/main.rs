mod config;
mod errors;
mod feeds;
mod plot;
mod report;
mod risk;
mod sim;

use crate::config::AppConfig;
use crate::errors::{SimError, SimResult};
use crate::feeds::market_data;
use crate::report::RunSummary;
use crate::risk::metrics;
use crate::sim::{ensemble, estimator};
use crate::sim::rng::NormalSource;
use std::io::Write;

#[tokio::main]
async fn main() {
    // Structured logging on stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cfg).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: AppConfig) -> SimResult<()> {
    let input = read_input(&cfg)?;

    let client = market_data::client();
    let history =
        market_data::fetch_history(&client, &cfg.market_data_base_url, &input.ticker).await?;
    tracing::info!(
        ticker = %history.ticker,
        closes = history.closes.len(),
        latest = history.latest_close,
        "market history loaded"
    );

    let params = estimator::estimate(&history.closes)?;
    tracing::info!(
        drift = params.drift,
        volatility = params.volatility,
        "parameters calibrated"
    );

    let mut rng = match cfg.rng_seed {
        Some(seed) => {
            tracing::info!(seed, "using fixed RNG seed");
            NormalSource::from_seed(seed)
        }
        None => NormalSource::from_entropy(),
    };

    // A chart needs the materialized ensemble; a metrics-only Monte
    // Carlo run can stream it and keep memory flat. Single-path runs
    // keep the legacy reporting target (every point of the one path),
    // Monte Carlo runs aggregate final prices.
    let (target, average, materialized) = if cfg.plot_path.is_some() || input.simulations == 1 {
        let ens = ensemble::run_ensemble(
            history.latest_close,
            input.days,
            input.simulations,
            params,
            cfg.step_convention,
            &mut rng,
        )?;
        tracing::info!(paths = ens.len(), "ensemble simulated");
        let average = metrics::average_path(ens.paths())?;
        let target = if input.simulations == 1 {
            ens.paths().first().cloned().unwrap_or_default()
        } else {
            ens.final_prices()
        };
        (target, average, Some(ens))
    } else {
        let summary = ensemble::run_streaming(
            history.latest_close,
            input.days,
            input.simulations,
            params,
            cfg.step_convention,
            &mut rng,
        )?;
        tracing::info!(paths = summary.final_prices.len(), "ensemble simulated (streaming)");
        (summary.final_prices, summary.average_path, None)
    };
    let risk_metrics = metrics::aggregate(&target)?;

    let summary = RunSummary {
        ticker: history.ticker.clone(),
        days: input.days,
        simulations: input.simulations,
        start_price: history.latest_close,
        convention: cfg.step_convention,
        drift: params.drift,
        volatility: params.volatility,
        metrics: risk_metrics,
        expected_final: average.last().copied().unwrap_or(history.latest_close),
    };

    println!("{}", report::render(&summary));

    if let (Some(out), Some(ens)) = (&cfg.plot_path, &materialized) {
        match plot::render_png(out, ens, &average, &history.ticker) {
            Ok(()) => tracing::info!(path = %out.display(), "chart written"),
            Err(e) => tracing::warn!(error = %e, "chart rendering failed, metrics reported without plot"),
        }
    }

    Ok(())
}

struct RunInput {
    ticker: String,
    days: usize,
    simulations: u32,
}

/// Collect ticker, horizon, and simulation count from positional
/// arguments, prompting on stdin for whatever is missing.
fn read_input(cfg: &AppConfig) -> SimResult<RunInput> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let raw_ticker = arg_or_prompt(&args, 0, "Ticker symbol (e.g., AAPL, MSFT): ")?;
    let ticker = market_data::validate_ticker(&raw_ticker)?;

    let raw_days = arg_or_prompt(&args, 1, "Time horizon in days (e.g., 365): ")?;
    let days = raw_days
        .trim()
        .parse::<i64>()
        .map_err(|_| SimError::InputValidation(format!("horizon must be an integer, got {raw_days:?}")))?;
    if days <= 0 {
        return Err(SimError::InputValidation(
            "horizon must be a positive number of days".into(),
        ));
    }

    let raw_sims = arg_or_prompt(
        &args,
        2,
        &format!("Simulations (default {}): ", cfg.default_simulations),
    )?;
    let simulations = if raw_sims.trim().is_empty() {
        cfg.default_simulations
    } else {
        let n = raw_sims.trim().parse::<i64>().map_err(|_| {
            SimError::InputValidation(format!("simulation count must be an integer, got {raw_sims:?}"))
        })?;
        if n <= 0 {
            return Err(SimError::InputValidation(
                "simulation count must be positive".into(),
            ));
        }
        u32::try_from(n)
            .map_err(|_| SimError::InputValidation(format!("simulation count too large: {n}")))?
    };

    Ok(RunInput {
        ticker,
        days: days as usize,
        simulations,
    })
}

fn arg_or_prompt(args: &[String], idx: usize, prompt: &str) -> SimResult<String> {
    if let Some(value) = args.get(idx) {
        return Ok(value.clone());
    }

    let mut err = std::io::stderr();
    err.write_all(prompt.as_bytes())
        .and_then(|_| err.flush())
        .map_err(|e| SimError::InputValidation(format!("prompt failed: {e}")))?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| SimError::InputValidation(format!("reading input failed: {e}")))?;
    Ok(line.trim().to_string())
}
