use std::{
    collections::HashMap,
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};

use super::currency::RateTable;
use super::entities::{AuditEntry, Carrier, CountryCode, LineItem, Product, QuoteResult};

/// Where the currently loaded catalog came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataOrigin {
    #[default]
    Bundled,
    DiskCache,
    Live,
}

impl DataOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            DataOrigin::Bundled => "vestavěná data",
            DataOrigin::DiskCache => "lokální cache",
            DataOrigin::Live => "backend",
        }
    }
}

/// Explicit edit state for the admin screens. Replaces the pile of
/// `isEditing`/`isSaving` booleans so impossible combinations cannot exist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(String),
    Saving,
}

impl EditState {
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            EditState::Editing(id) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, EditState::Saving)
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub products: Vec<Product>,
    pub carriers: Vec<Carrier>,
    /// Exchange rates relative to CZK; `None` until the first successful
    /// fetch, in which case prices render unconverted.
    pub rates: Option<RateTable>,
    pub line_items: Vec<LineItem>,
    pub selected_country: Option<CountryCode>,
    /// Result of the last "calculate" action; replaced wholesale.
    pub quote: Option<QuoteResult>,
    pub audit_entries: Vec<AuditEntry>,
    pub catalog_origin: DataOrigin,
    pub carrier_edit: EditState,
    pub product_edit: EditState,
    pub cache: CacheTimestamps,
    /// Backend base URL override from settings; `None` means the built-in
    /// default. Applied when the clients are constructed at startup.
    pub backend_url: Option<String>,
}

impl AppState {
    /// Countries served by at least one carrier, sorted by Czech name.
    pub fn available_countries(&self) -> Vec<CountryCode> {
        let mut countries: Vec<CountryCode> = Vec::new();
        for carrier in &self.carriers {
            for country in &carrier.supported_countries {
                if !countries.contains(country) {
                    countries.push(country.clone());
                }
            }
        }
        countries.sort_by_key(|code| country_name(code).to_string());
        countries
    }

    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.cache.is_stale(resource, ttl)
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.selected_country = persisted.selected_country;
        self.backend_url = persisted.backend_url;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            selected_country: self.selected_country.clone(),
            backend_url: self.backend_url.clone(),
        }
    }
}

/// Czech display names for the countries the tool knows about.
pub fn country_name(code: &str) -> &str {
    match code {
        "CZ" => "Česko",
        "SK" => "Slovensko",
        "DE" => "Německo",
        "HU" => "Maďarsko",
        "PL" => "Polsko",
        "HR" => "Chorvatsko",
        "SI" => "Slovinsko",
        "RO" => "Rumunsko",
        other => other,
    }
}

#[derive(Clone, Debug, Default)]
pub struct CacheTimestamps {
    entries: HashMap<CacheResource, SystemTime>,
}

impl CacheTimestamps {
    pub fn record_fetch(&mut self, resource: CacheResource, fetched_at: SystemTime) {
        self.entries.insert(resource, fetched_at);
    }

    pub fn fetched_at(&self, resource: &CacheResource) -> Option<SystemTime> {
        self.entries.get(resource).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CacheResource, &SystemTime)> {
        self.entries.iter()
    }

    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.fetched_at(resource)
            .map(|time| time.elapsed().map(|elapsed| elapsed > ttl).unwrap_or(true))
            .unwrap_or(true)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheResource {
    Products,
    Carriers,
    Rates,
    AuditLog,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub selected_country: Option<CountryCode>,
    #[serde(default)]
    pub backend_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback::fallback_carriers;

    #[test]
    fn available_countries_are_deduplicated_and_sorted_by_czech_name() {
        let state = AppState {
            carriers: fallback_carriers(),
            ..Default::default()
        };
        // "Česko" sorts after "Slovensko" in plain byte order but the list
        // is keyed by display name, which is what the select box shows.
        assert_eq!(state.available_countries(), vec!["SK".to_string(), "CZ".to_string()]);
    }

    #[test]
    fn persisted_state_round_trips_country_and_backend_url() {
        let mut state = AppState::default();
        state.apply_persisted(PersistedState {
            selected_country: Some("SK".into()),
            backend_url: Some("https://test.example/rest/v1/".into()),
        });
        assert_eq!(state.selected_country.as_deref(), Some("SK"));

        let out = state.to_persisted();
        assert_eq!(out.selected_country.as_deref(), Some("SK"));
        assert_eq!(out.backend_url.as_deref(), Some("https://test.example/rest/v1/"));
    }

    #[test]
    fn edit_state_exposes_the_edited_id() {
        let state = EditState::Editing("GLS".into());
        assert_eq!(state.editing_id(), Some("GLS"));
        assert!(!state.is_saving());
        assert_eq!(EditState::Idle.editing_id(), None);
    }
}
