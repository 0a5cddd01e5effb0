//! Persistent on-disk caching of the last good catalog snapshot.
//!
//! Keeps the calculator usable offline: when the backend is unreachable the
//! app falls back to this snapshot before resorting to the bundled data.

use std::{
    fs,
    path::PathBuf,
    sync::OnceLock,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::domain::{Carrier, Product};

const CACHE_FILENAME: &str = "catalog_cache.json";

/// Catalog snapshots are considered usable for a week; the roster changes
/// rarely and an old price beats no price for an internal estimate tool.
pub const CATALOG_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Last catalog successfully fetched from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Unix timestamp (seconds) when this snapshot was written.
    pub cached_at: u64,
    pub products: Vec<Product>,
    pub carriers: Vec<Carrier>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>, carriers: Vec<Carrier>) -> Self {
        let cached_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            cached_at,
            products,
            carriers,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.age() > CATALOG_CACHE_TTL
    }

    pub fn age(&self) -> Duration {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Duration::from_secs(now.saturating_sub(self.cached_at))
    }

    /// Human-readable age string.
    pub fn age_string(&self) -> String {
        let secs = self.age().as_secs();
        if secs < 60 {
            format!("{secs}s")
        } else if secs < 3600 {
            format!("{}m", secs / 60)
        } else if secs < 86400 {
            format!("{}h", secs / 3600)
        } else {
            format!("{}d", secs / 86400)
        }
    }
}

fn cache_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let base = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("doprava");
        let _ = fs::create_dir_all(&base);
        base.join(CACHE_FILENAME)
    })
    .clone()
}

/// Load the catalog snapshot from disk, if present and not expired.
pub fn load_catalog_snapshot() -> Option<CatalogSnapshot> {
    let path = cache_path();

    if !path.exists() {
        println!("[cache] no catalog snapshot at {}", path.display());
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str::<CatalogSnapshot>(&content) {
            Ok(snapshot) => {
                if snapshot.is_expired() {
                    println!("[cache] snapshot expired (age: {})", snapshot.age_string());
                    return None;
                }
                println!(
                    "[cache] loaded snapshot with {} products, {} carriers (age: {})",
                    snapshot.products.len(),
                    snapshot.carriers.len(),
                    snapshot.age_string()
                );
                Some(snapshot)
            }
            Err(e) => {
                println!("[cache] failed to parse snapshot: {e}");
                None
            }
        },
        Err(e) => {
            println!("[cache] failed to read snapshot: {e}");
            None
        }
    }
}

/// Save the catalog snapshot to disk.
pub fn save_catalog_snapshot(snapshot: &CatalogSnapshot) -> Result<(), std::io::Error> {
    let path = cache_path();
    let content = serde_json::to_string(snapshot)?;
    fs::write(&path, content)?;
    println!(
        "[cache] saved snapshot ({} products, {} carriers) to {}",
        snapshot.products.len(),
        snapshot.carriers.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{fallback_carriers, fallback_products};

    #[test]
    fn fresh_snapshots_are_not_expired() {
        let snapshot = CatalogSnapshot::new(fallback_products(), fallback_carriers());
        assert!(!snapshot.is_expired());
        assert!(snapshot.age() < Duration::from_secs(60));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = CatalogSnapshot::new(fallback_products(), fallback_carriers());
        let json = serde_json::to_string(&snapshot).expect("serialize");
        let back: CatalogSnapshot = serde_json::from_str(&json).expect("parse");
        assert_eq!(back.products, snapshot.products);
        assert_eq!(back.carriers, snapshot.carriers);
    }
}
