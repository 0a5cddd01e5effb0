//! Thin asynchronous client for the hosted catalog backend.
//!
//! - Typed reads for the product and carrier catalogs, with a one-hour
//!   in-memory cache and stale fallbacks when the backend is unreachable.
//! - Write operations for the admin screens (PostgREST-style endpoints).

use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};

use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::{Carrier, Product, Service, ShipmentType};

pub const DEFAULT_BASE_URL: &str = "https://doprava-backend.vyprodejpovleceni.cz/rest/v1/";
const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);
const USER_AGENT: &str = "doprava/3.0.0";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: SystemTime,
    pub status: CacheStatus,
}

impl<T> CachedPayload<T> {
    fn new(data: T, fetched_at: SystemTime, status: CacheStatus) -> Self {
        Self {
            data,
            fetched_at,
            status,
        }
    }
}

#[derive(Default)]
struct CatalogCache {
    products: Option<Cached<Vec<Product>>>,
    carriers: Option<Cached<Vec<Carrier>>>,
}

impl CatalogCache {
    fn clear(&mut self) {
        self.products = None;
        self.carriers = None;
    }
}

#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    cache: Arc<Mutex<CatalogCache>>,
    ttl: Duration,
}

impl CatalogClient {
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, CatalogError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            cache: Arc::new(Mutex::new(CatalogCache::default())),
            ttl: DEFAULT_TTL,
        })
    }

    pub async fn get_products(&self) -> Result<CachedPayload<Vec<Product>>, CatalogError> {
        {
            let cache = self.cache.lock().await;
            if let Some(payload) = cache.products.as_ref().and_then(|e| e.if_fresh(self.ttl)) {
                return Ok(payload);
            }
        }

        let mut url = self.url("products")?;
        url.query_pairs_mut().append_pair("select", "*");

        match self.fetch_json::<Vec<ProductDto>>(url).await {
            Ok(rows) => {
                let data: Vec<Product> = rows.into_iter().map(Product::from).collect();
                let fetched_at = SystemTime::now();
                let payload = CachedPayload::new(data.clone(), fetched_at, CacheStatus::Fresh);
                self.cache.lock().await.products = Some(Cached::new(data, fetched_at));
                Ok(payload)
            }
            Err(error) => {
                let cache = self.cache.lock().await;
                if let Some(stale) = cache.products.as_ref().map(Cached::stale) {
                    println!("[catalog] product fetch failed ({error}); serving stale cache");
                    return Ok(stale);
                }
                Err(error)
            }
        }
    }

    pub async fn get_carriers(&self) -> Result<CachedPayload<Vec<Carrier>>, CatalogError> {
        {
            let cache = self.cache.lock().await;
            if let Some(payload) = cache.carriers.as_ref().and_then(|e| e.if_fresh(self.ttl)) {
                return Ok(payload);
            }
        }

        let mut url = self.url("carriers")?;
        url.query_pairs_mut().append_pair("select", "*,services(*)");

        match self.fetch_json::<Vec<CarrierDto>>(url).await {
            Ok(rows) => {
                let data: Vec<Carrier> = rows.into_iter().map(Carrier::from).collect();
                let fetched_at = SystemTime::now();
                let payload = CachedPayload::new(data.clone(), fetched_at, CacheStatus::Fresh);
                self.cache.lock().await.carriers = Some(Cached::new(data, fetched_at));
                Ok(payload)
            }
            Err(error) => {
                let cache = self.cache.lock().await;
                if let Some(stale) = cache.carriers.as_ref().map(Cached::stale) {
                    println!("[catalog] carrier fetch failed ({error}); serving stale cache");
                    return Ok(stale);
                }
                Err(error)
            }
        }
    }

    pub async fn upsert_product(&self, product: &Product) -> Result<(), CatalogError> {
        let url = self.url("products")?;
        let dto = ProductDto::from(product.clone());
        let response = self
            .http
            .post(url)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&dto)
            .send()
            .await?;
        Self::check(response).await?;
        self.cache.lock().await.products = None;
        Ok(())
    }

    pub async fn delete_product(&self, code: &str) -> Result<(), CatalogError> {
        let mut url = self.url("products")?;
        url.query_pairs_mut()
            .append_pair("code", &format!("eq.{code}"));
        let response = self.http.delete(url).send().await?;
        Self::check(response).await?;
        self.cache.lock().await.products = None;
        Ok(())
    }

    pub async fn upsert_carrier(&self, carrier: &Carrier) -> Result<(), CatalogError> {
        let url = self.url("carriers")?;
        let dto = CarrierDto::from(carrier.clone());
        let response = self
            .http
            .post(url)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&dto)
            .send()
            .await?;
        Self::check(response).await?;
        self.cache.lock().await.carriers = None;
        Ok(())
    }

    /// Deletes a carrier. Services are owned by the carrier, so they are
    /// removed first; the backend cascade would do the same, but the client
    /// does not rely on it.
    pub async fn delete_carrier(&self, name: &str) -> Result<(), CatalogError> {
        let mut services_url = self.url("services")?;
        services_url
            .query_pairs_mut()
            .append_pair("carrier_name", &format!("eq.{name}"));
        let response = self.http.delete(services_url).send().await?;
        Self::check(response).await?;

        let mut url = self.url("carriers")?;
        url.query_pairs_mut()
            .append_pair("name", &format!("eq.{name}"));
        let response = self.http.delete(url).send().await?;
        Self::check(response).await?;
        self.cache.lock().await.carriers = None;
        Ok(())
    }

    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    async fn fetch_json<T>(&self, url: Url) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn check(response: reqwest::Response) -> Result<(), CatalogError> {
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(CatalogError::Backend(format!("{status}: {body}")))
        }
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

struct Cached<T> {
    value: T,
    fetched_at: SystemTime,
}

impl<T: Clone> Cached<T> {
    fn new(value: T, fetched_at: SystemTime) -> Self {
        Self { value, fetched_at }
    }

    fn if_fresh(&self, ttl: Duration) -> Option<CachedPayload<T>> {
        if self
            .fetched_at
            .elapsed()
            .map(|elapsed| elapsed <= ttl)
            .unwrap_or(false)
        {
            Some(CachedPayload::new(
                self.value.clone(),
                self.fetched_at,
                CacheStatus::Cached,
            ))
        } else {
            None
        }
    }

    fn stale(&self) -> CachedPayload<T> {
        CachedPayload::new(self.value.clone(), self.fetched_at, CacheStatus::Stale)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ProductDto {
    code: String,
    name: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    items_per_box: Option<u32>,
    #[serde(default)]
    items_per_pallet: Option<u32>,
    #[serde(default)]
    parcel_disabled: bool,
    #[serde(default)]
    pallet_disabled: bool,
    #[serde(default)]
    multiple_boxes: bool,
    #[serde(default)]
    boxes_per_item: Option<u32>,
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        // The disabled flags win over any leftover capacity value in the row.
        let items_per_box = if dto.parcel_disabled {
            None
        } else {
            dto.items_per_box
        };
        let items_per_pallet = if dto.pallet_disabled {
            None
        } else {
            dto.items_per_pallet
        };
        Self {
            code: dto.code,
            name: dto.name,
            image_url: dto.image_url,
            items_per_box,
            items_per_pallet,
            multiple_boxes: dto.multiple_boxes,
            boxes_per_item: dto.boxes_per_item.unwrap_or(1),
        }
    }
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            parcel_disabled: product.parcel_disabled(),
            pallet_disabled: product.pallet_disabled(),
            code: product.code,
            name: product.name,
            image_url: product.image_url,
            items_per_box: product.items_per_box,
            items_per_pallet: product.items_per_pallet,
            multiple_boxes: product.multiple_boxes,
            boxes_per_item: Some(product.boxes_per_item),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CarrierDto {
    name: String,
    #[serde(default)]
    logo_url: Option<String>,
    #[serde(default)]
    supported_countries: Vec<String>,
    #[serde(default)]
    services: Vec<ServiceDto>,
}

impl From<CarrierDto> for Carrier {
    fn from(dto: CarrierDto) -> Self {
        Self {
            name: dto.name,
            logo_url: dto.logo_url,
            supported_countries: dto.supported_countries,
            services: dto
                .services
                .into_iter()
                .filter_map(ServiceDto::into_service)
                .collect(),
        }
    }
}

impl From<Carrier> for CarrierDto {
    fn from(carrier: Carrier) -> Self {
        Self {
            services: carrier
                .services
                .iter()
                .map(|s| ServiceDto::from_service(s, &carrier.name))
                .collect(),
            name: carrier.name,
            logo_url: carrier.logo_url,
            supported_countries: carrier.supported_countries,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ServiceDto {
    name: String,
    /// Wire values are the historical Czech ones, "balik" and "paleta".
    shipment_type: String,
    price_per_unit: f64,
    #[serde(default)]
    carrier_name: Option<String>,
}

impl ServiceDto {
    fn into_service(self) -> Option<Service> {
        let shipment_type = match self.shipment_type.as_str() {
            "balik" | "parcel" => ShipmentType::Parcel,
            "paleta" | "pallet" => ShipmentType::Pallet,
            other => {
                println!("[catalog] skipping service with unknown shipment type: {other}");
                return None;
            }
        };
        Some(Service {
            name: self.name,
            shipment_type,
            price_per_unit: self.price_per_unit,
        })
    }

    fn from_service(service: &Service, carrier_name: &str) -> Self {
        let shipment_type = match service.shipment_type {
            ShipmentType::Parcel => "balik",
            ShipmentType::Pallet => "paleta",
        };
        Self {
            name: service.name.clone(),
            shipment_type: shipment_type.to_string(),
            price_per_unit: service.price_per_unit,
            carrier_name: Some(carrier_name.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrier_rows_map_nested_services() {
        let raw = serde_json::json!([{
            "name": "WEDO",
            "logo_url": "https://example.cz/wedo.png",
            "supported_countries": ["CZ"],
            "services": [
                { "name": "Doručení na vaši adresu", "shipment_type": "balik", "price_per_unit": 129 },
                { "name": "Nezn. služba", "shipment_type": "letecky", "price_per_unit": 1 }
            ]
        }]);
        let rows: Vec<CarrierDto> = serde_json::from_value(raw).expect("parse");
        let carriers: Vec<Carrier> = rows.into_iter().map(Carrier::from).collect();
        assert_eq!(carriers.len(), 1);
        // Unknown shipment types are dropped, not errors.
        assert_eq!(carriers[0].services.len(), 1);
        assert_eq!(carriers[0].services[0].shipment_type, ShipmentType::Parcel);
        assert!(carriers[0].serves("CZ"));
    }

    #[test]
    fn disabled_flags_override_capacity_columns() {
        let raw = serde_json::json!({
            "code": "matrace",
            "name": "Matrace",
            "items_per_box": 1,
            "items_per_pallet": 20,
            "parcel_disabled": true
        });
        let dto: ProductDto = serde_json::from_value(raw).expect("parse");
        let product = Product::from(dto);
        assert!(product.parcel_disabled());
        assert_eq!(product.items_per_pallet, Some(20));
        assert!(product.is_shippable());
    }

    #[test]
    fn product_round_trips_through_the_wire_shape() {
        let product = Product {
            code: "postel".into(),
            name: "Postel".into(),
            image_url: None,
            items_per_box: Some(1),
            items_per_pallet: Some(8),
            multiple_boxes: true,
            boxes_per_item: 2,
        };
        let dto = ProductDto::from(product.clone());
        assert!(!dto.parcel_disabled);
        assert_eq!(Product::from(dto), product);
    }
}
