use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::traits::QuoteProvider;
use crate::errors::CoreError;
use crate::models::asset::AssetType;
use crate::models::quote::Quote;

const BASE_URL: &str = "https://hq.sinajs.cn";

/// The HQ endpoint rejects requests without a finance.sina.com.cn referer.
const REFERER: &str = "https://finance.sina.com.cn";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sina HQ feed for exchange-listed stocks.
///
/// - **Free**: no API key; keyed by a market-prefixed code
///   (`sh600519`, `sz000001`, …).
/// - **Payload**: one `var hq_str_…="…";` line per code, with
///   comma-separated positional fields.
///
/// Unlike the fund feed, each request gets its own response line, so no
/// single-flight guard is needed here.
pub struct SinaStockProvider {
    client: Client,
}

impl SinaStockProvider {
    pub fn new() -> Self {
        let builder = Client::builder().timeout(REQUEST_TIMEOUT);
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }

    /// Infer the market prefix from the code's leading digit:
    /// `6` → Shanghai, `0`/`3` → Shenzhen, `8`/`4` → Beijing.
    ///
    /// This is a heuristic, not authoritative exchange routing;
    /// unrecognized codes default to Shanghai.
    pub fn market_prefix(code: &str) -> &'static str {
        match code.chars().next() {
            Some('6') => "sh",
            Some('0') | Some('3') => "sz",
            Some('8') | Some('4') => "bj",
            _ => "sh",
        }
    }

    /// Parse one quoted record into a normalized quote.
    ///
    /// Fields are positional: name (0), previous close (2), current
    /// price (3), date (30), time (31). The current price falls back to
    /// the previous close when field 3 is missing or non-positive.
    pub fn parse_record(body: &str) -> Result<Quote, CoreError> {
        let payload = match (body.find('"'), body.rfind('"')) {
            (Some(start), Some(end)) if start < end => &body[start + 1..end],
            _ => {
                return Err(CoreError::Quote {
                    provider: "Sina HQ".into(),
                    message: "Response is not an hq_str record".into(),
                })
            }
        };

        let fields: Vec<&str> = payload.split(',').collect();
        if fields.len() < 32 {
            return Err(CoreError::Quote {
                provider: "Sina HQ".into(),
                message: format!("Record has {} fields, expected at least 32", fields.len()),
            });
        }

        let prev_close = fields[2].parse::<f64>().ok();
        let current_price = fields[3]
            .parse::<f64>()
            .ok()
            .filter(|v| *v > 0.0)
            .or(prev_close)
            .unwrap_or(0.0);

        Ok(Quote {
            name: fields[0].to_string(),
            current_price,
            yesterday_price: prev_close,
            price_date: Some(format!("{} {}", fields[30], fields[31])),
        })
    }
}

impl Default for SinaStockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for SinaStockProvider {
    fn name(&self) -> &str {
        "Sina HQ"
    }

    fn supported_asset_types(&self) -> Vec<AssetType> {
        vec![AssetType::Stock]
    }

    async fn fetch_quote(&self, code: &str) -> Result<Quote, CoreError> {
        let url = format!("{BASE_URL}/list={}{code}", Self::market_prefix(code));
        let resp = self
            .client
            .get(&url)
            .header("Referer", REFERER)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(CoreError::Quote {
                provider: "Sina HQ".into(),
                message: format!("HTTP {} for stock {code}", resp.status()),
            });
        }

        let body = resp.text().await?;
        Self::parse_record(&body)
    }
}
