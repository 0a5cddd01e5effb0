use serde::{Deserialize, Serialize};

/// ISO 3166-1 alpha-2 country code ("CZ", "SK", ...).
pub type CountryCode = String;

/// Product code used across the shop ("povleceni", "matrace", ...).
pub type ProductCode = String;

/// Shipment pricing axis: per discrete box or per pallet utilisation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentType {
    Parcel,
    Pallet,
}

impl ShipmentType {
    pub fn label(&self) -> &'static str {
        match self {
            ShipmentType::Parcel => "Balíková přeprava",
            ShipmentType::Pallet => "Paletová přeprava",
        }
    }
}

/// Packaging metadata for one product.
///
/// `items_per_box` being `None` means parcel shipping is disabled for the
/// product; `items_per_pallet` being `None` disables pallet shipping. A valid
/// product supports at least one of the two.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub code: ProductCode,
    pub name: String,
    pub image_url: Option<String>,
    pub items_per_box: Option<u32>,
    pub items_per_pallet: Option<u32>,
    /// Some bulky products need a fixed number of boxes per unit instead of
    /// packing several units into one box.
    #[serde(default)]
    pub multiple_boxes: bool,
    #[serde(default = "default_boxes_per_item")]
    pub boxes_per_item: u32,
}

fn default_boxes_per_item() -> u32 {
    1
}

impl Product {
    pub fn parcel_disabled(&self) -> bool {
        self.items_per_box.is_none()
    }

    pub fn pallet_disabled(&self) -> bool {
        self.items_per_pallet.is_none()
    }

    /// A product must keep at least one shipment method enabled.
    pub fn is_shippable(&self) -> bool {
        self.items_per_box.is_some() || self.items_per_pallet.is_some()
    }
}

/// A priced offering of one carrier for one shipment type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub shipment_type: ShipmentType,
    /// Price per box or per pallet in CZK.
    pub price_per_unit: f64,
}

/// A shipping provider with the countries it serves and its services.
/// Services are owned by the carrier and go away with it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub name: String,
    pub logo_url: Option<String>,
    pub supported_countries: Vec<CountryCode>,
    pub services: Vec<Service>,
}

impl Carrier {
    pub fn serves(&self, country: &str) -> bool {
        self.supported_countries.iter().any(|c| c == country)
    }
}

/// One row of the working list: a product with a user-entered quantity and
/// the per-item packing figures derived when the row was added. Rows are
/// append/remove only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub product_code: ProductCode,
    pub product_name: String,
    pub image_url: Option<String>,
    pub quantity: u32,
    /// `None` when the product has parcel shipping disabled.
    pub boxes_needed: Option<u32>,
    /// Pallet capacity consumed by this row, in percent. `None` when pallet
    /// shipping is disabled for the product.
    pub pallet_usage_pct: Option<f64>,
}

/// Cheapest eligible carrier/service for one shipment type.
#[derive(Clone, Debug, PartialEq)]
pub struct QuoteOption {
    pub carrier_name: String,
    pub service_name: String,
    pub logo_url: Option<String>,
    /// Total price in CZK for the whole order on this service.
    pub total_price: f64,
}

/// Result of one "calculate" action. Recomputed from scratch every time;
/// a `None` side means no eligible carrier (or the order disallows the axis).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuoteResult {
    pub parcel: Option<QuoteOption>,
    pub pallet: Option<QuoteOption>,
}

/// One administrative action recorded by the audit sink.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: String,
    pub details: String,
    pub timestamp: String,
}
