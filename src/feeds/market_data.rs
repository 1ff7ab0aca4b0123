use crate::errors::{SimError, SimResult};
use reqwest::Client;

/// Seconds of history requested from the provider (~one trading year of
/// daily closes once weekends and holidays are dropped).
const HISTORY_WINDOW_SECS: i64 = 365 * 24 * 3600;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Latest close plus a chronological daily close series for one ticker.
/// This is the entire surface the simulator needs from the outside world.
#[derive(Debug, Clone)]
pub struct MarketHistory {
    pub ticker: String,
    pub latest_close: f64,
    pub closes: Vec<f64>,
}

/// Normalize and validate a user-supplied ticker symbol.
/// The symbol is embedded in the request path, so only a conservative
/// character set is allowed.
pub fn validate_ticker(raw: &str) -> SimResult<String> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() || ticker.len() > 12 {
        return Err(SimError::InputValidation(format!(
            "ticker must be 1-12 characters, got {:?}",
            raw.trim()
        )));
    }
    if !ticker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
    {
        return Err(SimError::InputValidation(format!(
            "ticker contains unsupported characters: {ticker:?}"
        )));
    }
    Ok(ticker)
}

pub fn client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_default()
}

// Chart endpoint response shape (fields we do not read are omitted):
// {
//   "chart": {
//     "result": [
//       {
//         "meta": { "regularMarketPrice": 232.8, "symbol": "AAPL" },
//         "timestamp": [ ... ],
//         "indicators": { "quote": [ { "close": [230.1, null, ...] } ] }
//       }
//     ],
//     "error": null
//   }
// }

#[derive(serde::Deserialize)]
struct ChartResponse {
    chart: Option<Chart>,
}

#[derive(serde::Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(serde::Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
    indicators: Option<Indicators>,
}

#[derive(serde::Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(serde::Deserialize)]
struct Indicators {
    quote: Option<Vec<Quote>>,
}

#[derive(serde::Deserialize)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

/// Fetch ~one year of daily closes plus the most recent price.
/// Any provider failure is a terminal error for the run; nothing is
/// silently defaulted.
pub async fn fetch_history(
    client: &Client,
    base_url: &str,
    ticker: &str,
) -> SimResult<MarketHistory> {
    let period2 = chrono::Utc::now().timestamp();
    let period1 = period2 - HISTORY_WINDOW_SECS;
    let url = format!(
        "{}/v8/finance/chart/{ticker}?period1={period1}&period2={period2}&interval=1d",
        base_url.trim_end_matches('/'),
    );

    tracing::info!(ticker, "fetching market history");

    let resp = client
        .get(&url)
        .header("User-Agent", "riskcast/0.1")
        .send()
        .await
        .map_err(|e| SimError::Network(format!("request failed: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(SimError::DataUnavailable(format!(
            "provider returned HTTP {status} for {ticker}: {body}"
        )));
    }

    let payload: ChartResponse = resp
        .json()
        .await
        .map_err(|e| SimError::Parse(format!("chart payload: {e}")))?;

    extract_history(ticker, payload)
}

/// Pull the close series out of the chart payload. Null and non-finite
/// entries are dropped; the series stays chronological.
fn extract_history(ticker: &str, payload: ChartResponse) -> SimResult<MarketHistory> {
    let result = payload
        .chart
        .as_ref()
        .and_then(|c| c.result.as_ref())
        .and_then(|r| r.first())
        .ok_or_else(|| {
            let detail = payload
                .chart
                .as_ref()
                .and_then(|c| c.error.as_ref())
                .map(|e| e.to_string())
                .unwrap_or_else(|| "empty chart result".into());
            SimError::DataUnavailable(format!("no data for ticker {ticker:?}: {detail}"))
        })?;

    let closes: Vec<f64> = result
        .indicators
        .as_ref()
        .and_then(|i| i.quote.as_ref())
        .and_then(|q| q.first())
        .and_then(|q| q.close.as_ref())
        .ok_or_else(|| SimError::DataUnavailable(format!("no close series for {ticker:?}")))?
        .iter()
        .filter_map(|c| *c)
        .filter(|c| c.is_finite() && *c > 0.0)
        .collect();

    if closes.is_empty() {
        return Err(SimError::DataUnavailable(format!(
            "close series for {ticker:?} is empty"
        )));
    }

    // Prefer the provider's live quote; fall back to the newest close
    let latest_close = result
        .meta
        .as_ref()
        .and_then(|m| m.regular_market_price)
        .filter(|p| p.is_finite() && *p > 0.0)
        .or_else(|| closes.last().copied())
        .ok_or_else(|| SimError::DataUnavailable(format!("no usable price for {ticker:?}")))?;

    Ok(MarketHistory {
        ticker: ticker.to_string(),
        latest_close,
        closes,
    })
}
