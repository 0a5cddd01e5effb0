//! Exchange-rate fetcher for the cosmetic price conversion.

use std::time::{Duration, SystemTime};

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::RateTable;

const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest/CZK";
const USER_AGENT: &str = "doprava/3.0.0";

/// Rates are refreshed hourly; anything younger is served as-is.
pub const RATES_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Error)]
pub enum RateError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct RatesDto {
    base: String,
    rates: RateTable,
}

#[derive(Clone)]
pub struct RateClient {
    http: Client,
    url: Url,
}

impl RateClient {
    pub fn new() -> Result<Self, RateError> {
        Self::with_url(DEFAULT_RATES_URL)
    }

    pub fn with_url(url: &str) -> Result<Self, RateError> {
        let url = Url::parse(url)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, url })
    }

    /// Fetches the CZK-relative rate table. A failure here only suppresses
    /// the converted display, so callers treat errors as soft.
    pub async fn get_rates(&self) -> Result<(RateTable, SystemTime), RateError> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;
        let dto: RatesDto = response.json().await?;
        if !dto.base.eq_ignore_ascii_case("CZK") {
            println!("[rates] unexpected base currency {}; using table anyway", dto.base);
        }
        Ok((dto.rates, SystemTime::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_payload_parses_into_a_table() {
        let raw = serde_json::json!({
            "base": "CZK",
            "date": "2026-08-29",
            "rates": { "EUR": 0.0408, "HUF": 15.62, "PLN": 0.178 }
        });
        let dto: RatesDto = serde_json::from_value(raw).expect("parse");
        assert_eq!(dto.base, "CZK");
        assert_eq!(dto.rates.get("EUR").copied(), Some(0.0408));
    }
}
