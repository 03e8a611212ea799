use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;

use super::traits::QuoteProvider;
use crate::errors::CoreError;
use crate::models::asset::AssetType;
use crate::models::quote::Quote;

const BASE_URL: &str = "https://fundgz.1234567.com.cn/js";

/// A hung request would stall the whole sequential sync loop, so every
/// fetch is bounded.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Eastmoney fund-valuation feed for open-end funds.
///
/// - **Free**: no API key, keyed by fund code alone.
/// - **Payload**: JSONP — `jsonpgz({...});` wrapping one record with the
///   unit NAV (`dwjz`), its date (`jzrq`), and an intraday estimate
///   (`gsz` + `gztime`) that may be absent or non-numeric.
///
/// The feed reports through a single fixed JSONP channel shared by all
/// callers in a process, so at most one request may be in flight at a
/// time; `flight` serializes them.
pub struct EastmoneyFundProvider {
    client: Client,
    flight: Mutex<()>,
}

impl EastmoneyFundProvider {
    pub fn new() -> Self {
        let builder = Client::builder().timeout(REQUEST_TIMEOUT);
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            flight: Mutex::new(()),
        }
    }

    /// Strip the `jsonpgz(...);` padding and return the inner JSON.
    fn strip_jsonp(body: &str) -> Result<&str, CoreError> {
        match (body.find('('), body.rfind(')')) {
            (Some(start), Some(end)) if start + 1 < end => Ok(&body[start + 1..end]),
            _ => Err(CoreError::Quote {
                provider: "Eastmoney".into(),
                message: "Response is not a JSONP payload".into(),
            }),
        }
    }

    /// Normalize one fund valuation record.
    ///
    /// The intraday estimate (`gsz`) wins when it parses to a positive
    /// number; otherwise the record falls back to the unit NAV (`dwjz`).
    /// `yesterday_price` is the NAV in either case, and the freshness
    /// stamp follows whichever value was chosen.
    pub fn parse_payload(body: &str) -> Result<Quote, CoreError> {
        let json = Self::strip_jsonp(body)?;
        let record: FundValuationRecord =
            serde_json::from_str(json).map_err(|e| CoreError::Quote {
                provider: "Eastmoney".into(),
                message: format!("Malformed fund record: {e}"),
            })?;

        let nav = record.dwjz.parse::<f64>().unwrap_or(0.0);
        let estimate = record.gsz.parse::<f64>().ok().filter(|v| *v > 0.0);

        let (current_price, price_date) = match estimate {
            Some(v) => (v, non_empty(record.gztime)),
            None => (nav, non_empty(record.jzrq)),
        };

        Ok(Quote {
            name: record.name,
            current_price,
            yesterday_price: Some(nav),
            price_date,
        })
    }
}

impl Default for EastmoneyFundProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// ── Eastmoney payload types ─────────────────────────────────────────

/// Inner JSON of the `jsonpgz(...)` wrapper. Every numeric field arrives
/// as a string; absent fields default to empty.
#[derive(Deserialize)]
struct FundValuationRecord {
    #[serde(default)]
    name: String,
    /// Unit net asset value (prior close)
    #[serde(default)]
    dwjz: String,
    /// NAV date
    #[serde(default)]
    jzrq: String,
    /// Intraday estimate; may be absent or non-numeric
    #[serde(default)]
    gsz: String,
    /// Estimate timestamp
    #[serde(default)]
    gztime: String,
}

#[async_trait]
impl QuoteProvider for EastmoneyFundProvider {
    fn name(&self) -> &str {
        "Eastmoney"
    }

    fn supported_asset_types(&self) -> Vec<AssetType> {
        vec![AssetType::Fund]
    }

    async fn fetch_quote(&self, code: &str) -> Result<Quote, CoreError> {
        // Held across the whole request: the feed's response channel is
        // shared and non-reentrant.
        let _flight = self.flight.lock().await;

        let url = format!("{BASE_URL}/{code}.js");
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(CoreError::Quote {
                provider: "Eastmoney".into(),
                message: format!("HTTP {} for fund {code}", resp.status()),
            });
        }

        let body = resp.text().await?;
        Self::parse_payload(&body)
    }
}
