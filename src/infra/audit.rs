//! Fire-and-forget audit sink for administrative actions.
//!
//! Writes never block the action that triggered them: the caller spawns the
//! send, the client retries a bounded number of times with doubling backoff,
//! and a final failure is surfaced as a warning only.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::domain::AuditEntry;

const DEFAULT_AUDIT_URL: &str = "https://doprava-backend.vyprodejpovleceni.cz/rest/v1/audit_log";
const USER_AGENT: &str = "doprava/3.0.0";
const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("audit sink rejected the entry after {0} attempts")]
    Exhausted(u32),
}

#[derive(Debug, Serialize)]
struct AuditRecord<'a> {
    action: &'a str,
    details: &'a str,
    timestamp: String,
}

#[derive(Clone)]
pub struct AuditClient {
    http: Client,
    url: Url,
}

impl AuditClient {
    pub fn new() -> Result<Self, AuditError> {
        Self::with_url(DEFAULT_AUDIT_URL)
    }

    pub fn with_url(url: &str) -> Result<Self, AuditError> {
        let url = Url::parse(url)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, url })
    }

    /// Records one administrative action. Retries transient failures with
    /// doubling backoff before giving up.
    pub async fn record(&self, action: &str, details: &str) -> Result<(), AuditError> {
        let record = AuditRecord {
            action,
            details,
            timestamp: now_rfc3339(),
        };

        let mut backoff = INITIAL_BACKOFF;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.http.post(self.url.clone()).json(&record).send().await {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response) => {
                    println!(
                        "[audit] attempt {attempt}/{MAX_ATTEMPTS} rejected: {}",
                        response.status()
                    );
                }
                Err(error) => {
                    println!("[audit] attempt {attempt}/{MAX_ATTEMPTS} failed: {error}");
                }
            }
            if attempt < MAX_ATTEMPTS {
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
        }

        Err(AuditError::Exhausted(MAX_ATTEMPTS))
    }

    /// Loads the audit trail for the viewer page, newest first.
    pub async fn get_entries(&self) -> Result<Vec<AuditEntry>, AuditError> {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("order", "timestamp.desc")
            .append_pair("limit", "200");
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_records_serialize_with_an_rfc3339_timestamp() {
        let record = AuditRecord {
            action: "carrier.update",
            details: "GLS: cena 299 -> 319",
            timestamp: now_rfc3339(),
        };
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["action"], "carrier.update");
        let stamp = value["timestamp"].as_str().expect("timestamp string");
        assert!(OffsetDateTime::parse(stamp, &Rfc3339).is_ok());
    }
}
