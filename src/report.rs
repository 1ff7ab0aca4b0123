use crate::risk::metrics::RiskMetrics;
use crate::sim::StepConvention;

/// Everything the terminal report needs, gathered in one place.
/// Serializable so callers can emit it as JSON instead of text.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunSummary {
    pub ticker: String,
    pub days: usize,
    pub simulations: u32,
    pub start_price: f64,
    pub convention: StepConvention,
    pub drift: f64,
    pub volatility: f64,
    pub metrics: RiskMetrics,
    /// Mean final price across the ensemble (the last entry of the
    /// average trajectory). In single-path mode this is the path's
    /// actual final price.
    pub expected_final: f64,
}

/// Render the run summary as a terminal block. Pure string formatting;
/// the caller decides where it goes.
pub fn render(summary: &RunSummary) -> String {
    let mode = if summary.simulations == 1 {
        "single path".to_string()
    } else {
        format!("{} paths", summary.simulations)
    };

    let mut out = String::new();
    out.push_str(&"-".repeat(46));
    out.push('\n');
    out.push_str(&format!(
        "Simulation for {} days completed ({mode}).\n",
        summary.days
    ));
    out.push_str(&format!("Ticker:                {}\n", summary.ticker));
    out.push_str(&format!("Starting price:        {:.2}\n", summary.start_price));
    out.push_str(&format!("Step convention:       {}\n", summary.convention));
    out.push_str(&format!(
        "Calibrated drift:      {:.4} (annualized)\n",
        summary.drift
    ));
    out.push_str(&format!(
        "Calibrated volatility: {:.4} (annualized)\n",
        summary.volatility
    ));
    out.push_str(&format!("Highest price:         {:.2}\n", summary.metrics.max));
    out.push_str(&format!("Lowest price:          {:.2}\n", summary.metrics.min));
    out.push_str(&format!("Average:               {:.2}\n", summary.metrics.average));
    out.push_str(&format!(
        "VaR (95% confidence):  {:.2}\n",
        summary.metrics.var_95
    ));
    out.push_str(&format!(
        "Expected final price:  {:.2}\n",
        summary.expected_final
    ));
    out.push_str(&"-".repeat(46));
    out
}
