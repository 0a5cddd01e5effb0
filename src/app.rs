use std::time::SystemTime;

use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::{fallback_carriers, fallback_products, fallback_rates, AppState, CacheResource, DataOrigin},
    infra::{
        audit::AuditClient,
        cache::{load_catalog_snapshot, save_catalog_snapshot, CatalogSnapshot},
        catalog::{CachedPayload, CacheStatus, CatalogClient, CatalogError},
        rates::{RateClient, RATES_TTL},
    },
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{AuditLogPage, CalculatorPage, CarriersPage, ProductsPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Calculator {},
    #[route("/carriers")]
    Carriers {},
    #[route("/products")]
    Products {},
    #[route("/audit")]
    AuditLog {},
    #[route("/settings")]
    Settings {},
}

/// Backend clients built once at startup and handed to the pages through
/// context, never through a process-wide singleton.
#[derive(Clone)]
struct Clients {
    catalog: CatalogClient,
    rates: RateClient,
    audit: AuditClient,
}

impl Clients {
    /// Builds the clients, honouring the persisted backend URL override. An
    /// override that fails to parse is logged and ignored rather than
    /// leaving the user with an unusable app.
    fn build(backend_url: Option<&str>) -> Result<Self, String> {
        let rates = RateClient::new().map_err(|e| e.to_string())?;

        if let Some(raw) = backend_url {
            let base = normalize_base_url(raw);
            let catalog = CatalogClient::with_base_url(&base);
            let audit = AuditClient::with_url(&format!("{base}audit_log"));
            match (catalog, audit) {
                (Ok(catalog), Ok(audit)) => {
                    return Ok(Self {
                        catalog,
                        rates,
                        audit,
                    })
                }
                (catalog, audit) => {
                    let error = catalog
                        .err()
                        .map(|e| e.to_string())
                        .or(audit.err().map(|e| e.to_string()))
                        .unwrap_or_default();
                    println!("[app] invalid backend URL override ({error}); using default");
                }
            }
        }

        Ok(Self {
            catalog: CatalogClient::new().map_err(|e| e.to_string())?,
            rates,
            audit: AuditClient::new().map_err(|e| e.to_string())?,
        })
    }
}

/// Relative endpoint paths are joined onto the base, so it must end in "/".
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state.clone();
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    // Bumped from settings to force a catalog refetch.
    let reload_tick = use_signal(|| 0u32);
    use_context_provider(|| reload_tick.clone());

    let clients = match use_hook({
        let state = state.clone();
        move || {
            let backend_url = state.with(|st| st.backend_url.clone());
            Clients::build(backend_url.as_deref())
        }
    }) {
        Ok(clients) => clients,
        Err(error) => {
            println!("[app] client init failed: {error}");
            return rsx! {
                div { class: "min-h-screen bg-slate-950 text-rose-400 flex items-center justify-center",
                    "Inicializace aplikace selhala: {error}"
                }
            };
        }
    };
    use_context_provider(|| clients.catalog.clone());
    use_context_provider(|| clients.audit.clone());

    let _catalog = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let catalog = clients.catalog.clone();
        let reload_tick = reload_tick.clone();
        move || {
            let state = state.clone();
            let toasts = toasts.clone();
            let catalog = catalog.clone();
            let reload_tick = reload_tick.clone();
            async move { fetch_catalog(state, toasts, catalog, reload_tick).await }
        }
    });

    let _rates = use_resource({
        let state = state.clone();
        let rates = clients.rates.clone();
        move || {
            let state = state.clone();
            let rates = rates.clone();
            async move { fetch_rates_hourly(state, rates).await }
        }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        println!("Failed to persist user state: {err}");
    }
}

/// Where one catalog collection ended up coming from. The two collections
/// degrade independently: a dead carriers endpoint must not throw away a
/// successful products fetch.
enum SideOrigin {
    Live { stale: bool, fetched_at: SystemTime },
    Snapshot,
    Bundled,
}

impl SideOrigin {
    fn is_stale(&self) -> bool {
        matches!(self, SideOrigin::Live { stale: true, .. })
    }
}

/// Resolves one collection: live data when the fetch succeeded with rows,
/// the disk snapshot when it failed, the bundled list as the floor.
fn resolve_side<T>(
    fetched: Result<CachedPayload<Vec<T>>, CatalogError>,
    snapshot: Option<Vec<T>>,
    bundled: fn() -> Vec<T>,
) -> (Vec<T>, SideOrigin) {
    match fetched {
        // An empty backend table falls back to the bundled list; the admin
        // may simply not have seeded it yet.
        Ok(payload) if !payload.data.is_empty() => {
            let origin = SideOrigin::Live {
                stale: payload.status == CacheStatus::Stale,
                fetched_at: payload.fetched_at,
            };
            (payload.data, origin)
        }
        Ok(_) => (bundled(), SideOrigin::Bundled),
        Err(_) => match snapshot {
            Some(data) if !data.is_empty() => (data, SideOrigin::Snapshot),
            _ => (bundled(), SideOrigin::Bundled),
        },
    }
}

fn combined_origin(products: &SideOrigin, carriers: &SideOrigin) -> DataOrigin {
    match (products, carriers) {
        (SideOrigin::Live { .. }, SideOrigin::Live { .. }) => DataOrigin::Live,
        (SideOrigin::Bundled, _) | (_, SideOrigin::Bundled) => DataOrigin::Bundled,
        _ => DataOrigin::DiskCache,
    }
}

/// Loads both catalogs, each preferring live data, then the on-disk
/// snapshot, then the bundled fallback. The calculator never starts empty.
async fn fetch_catalog(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    catalog: CatalogClient,
    reload_tick: Signal<u32>,
) {
    // Subscribe to the tick so settings can force a refetch.
    let _tick = reload_tick();

    let products = catalog.get_products().await;
    let carriers = catalog.get_carriers().await;

    if let Err(error) = &products {
        println!("[app] product fetch failed: {error}");
    }
    if let Err(error) = &carriers {
        println!("[app] carrier fetch failed: {error}");
    }
    let any_failed = products.is_err() || carriers.is_err();

    // The snapshot is only consulted for a side whose fetch failed.
    let (snap_products, snap_carriers) = if any_failed {
        match load_catalog_snapshot() {
            Some(snap) => (Some(snap.products), Some(snap.carriers)),
            None => (None, None),
        }
    } else {
        (None, None)
    };

    let (product_data, product_origin) = resolve_side(products, snap_products, fallback_products);
    let (carrier_data, carrier_origin) = resolve_side(carriers, snap_carriers, fallback_carriers);

    if let (SideOrigin::Live { stale: false, .. }, SideOrigin::Live { stale: false, .. }) =
        (&product_origin, &carrier_origin)
    {
        let snapshot = CatalogSnapshot::new(product_data.clone(), carrier_data.clone());
        if let Err(error) = save_catalog_snapshot(&snapshot) {
            println!("[app] failed to save catalog snapshot: {error}");
        }
    }

    let served_stale = product_origin.is_stale() || carrier_origin.is_stale();
    let origin = combined_origin(&product_origin, &carrier_origin);

    state.with_mut(|st| {
        if let SideOrigin::Live { fetched_at, .. } = product_origin {
            st.cache.record_fetch(CacheResource::Products, fetched_at);
        }
        if let SideOrigin::Live { fetched_at, .. } = carrier_origin {
            st.cache.record_fetch(CacheResource::Carriers, fetched_at);
        }
        st.products = product_data;
        st.carriers = carrier_data;
        st.catalog_origin = origin;
    });

    if served_stale {
        push_toast(
            toasts.clone(),
            ToastKind::Warning,
            "Katalog načten z cache; data mohou být zastaralá.",
        );
    }
    if any_failed {
        push_toast(
            toasts.clone(),
            ToastKind::Info,
            "Backend je nedostupný; počítám s offline daty.",
        );
    }
}

/// Fetches exchange rates once at start and then hourly. When the service is
/// down and no live table was ever loaded, the static table keeps the
/// converted display roughly useful.
async fn fetch_rates_hourly(mut state: Signal<AppState>, rates: RateClient) {
    loop {
        match rates.get_rates().await {
            Ok((table, fetched_at)) => {
                state.with_mut(|st| {
                    st.rates = Some(table);
                    st.cache.record_fetch(CacheResource::Rates, fetched_at);
                });
            }
            Err(error) => {
                println!("[rates] fetch failed: {error}");
                state.with_mut(|st| {
                    if st.rates.is_none() {
                        st.rates = Some(fallback_rates());
                    }
                });
            }
        }
        tokio::time::sleep(RATES_TTL).await;
    }
}

#[component]
pub fn Calculator() -> Element {
    rsx! { Shell { CalculatorPage {} } }
}

#[component]
pub fn Carriers() -> Element {
    rsx! { Shell { CarriersPage {} } }
}

#[component]
pub fn Products() -> Element {
    rsx! { Shell { ProductsPage {} } }
}

#[component]
pub fn AuditLog() -> Element {
    rsx! { Shell { AuditLogPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Carrier;

    fn live<T>(data: Vec<T>) -> Result<CachedPayload<Vec<T>>, CatalogError> {
        Ok(CachedPayload {
            data,
            fetched_at: SystemTime::now(),
            status: CacheStatus::Fresh,
        })
    }

    fn down<T>() -> Result<CachedPayload<Vec<T>>, CatalogError> {
        Err(CatalogError::Backend("503 Service Unavailable".into()))
    }

    #[test]
    fn one_failed_catalog_source_keeps_the_other_live() {
        let (products, product_origin) = resolve_side(live(fallback_products()), None, fallback_products);
        let (carriers, carrier_origin) =
            resolve_side(down::<Carrier>(), None, fallback_carriers);

        assert!(matches!(product_origin, SideOrigin::Live { stale: false, .. }));
        assert_eq!(products, fallback_products());
        assert!(matches!(carrier_origin, SideOrigin::Bundled));
        assert!(!carriers.is_empty());
    }

    #[test]
    fn failed_side_prefers_the_disk_snapshot_over_bundled_data() {
        let snapshot = fallback_carriers();
        let (carriers, origin) =
            resolve_side(down::<Carrier>(), Some(snapshot.clone()), fallback_carriers);
        assert!(matches!(origin, SideOrigin::Snapshot));
        assert_eq!(carriers, snapshot);
    }

    #[test]
    fn empty_backend_table_falls_back_to_bundled_data() {
        let (products, origin) = resolve_side(live(Vec::new()), None, fallback_products);
        assert!(matches!(origin, SideOrigin::Bundled));
        assert_eq!(products, fallback_products());
    }

    #[test]
    fn combined_origin_reports_the_most_degraded_side() {
        let live_side = SideOrigin::Live {
            stale: false,
            fetched_at: SystemTime::now(),
        };
        assert_eq!(
            combined_origin(&live_side, &SideOrigin::Snapshot),
            DataOrigin::DiskCache
        );
        assert_eq!(
            combined_origin(&live_side, &SideOrigin::Bundled),
            DataOrigin::Bundled
        );
        let live_again = SideOrigin::Live {
            stale: false,
            fetched_at: SystemTime::now(),
        };
        assert_eq!(combined_origin(&live_side, &live_again), DataOrigin::Live);
    }

    #[test]
    fn backend_base_urls_are_normalised_with_a_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://test.example/rest/v1"),
            "https://test.example/rest/v1/"
        );
        assert_eq!(
            normalize_base_url("https://test.example/rest/v1/ "),
            "https://test.example/rest/v1/"
        );
    }
}
