//! Domain logic for the shipping calculator lives here.

pub mod app_state;
pub mod currency;
pub mod entities;
pub mod fallback;
pub mod packing;
pub mod quote;

#[allow(unused_imports)]
pub use app_state::{
    country_name, AppState, CacheResource, CacheTimestamps, DataOrigin, EditState, PersistedState,
};
#[allow(unused_imports)]
pub use currency::{
    convert_price, currency_for_country, fallback_rates, format_price, DisplayPrice, RateTable,
    BASE_CURRENCY, BASE_SYMBOL,
};
#[allow(unused_imports)]
pub use entities::{
    AuditEntry, Carrier, CountryCode, LineItem, Product, ProductCode, QuoteOption, QuoteResult,
    Service, ShipmentType,
};
#[allow(unused_imports)]
pub use fallback::{fallback_carriers, fallback_products};
#[allow(unused_imports)]
pub use packing::{accumulate, boxes_for_item, pallet_usage_for_item, AxisTotal, ShipmentTotals};
#[allow(unused_imports)]
pub use quote::select_quote;
