use std::time::SystemTime;

use dioxus::prelude::*;
use url::Url;

use crate::{
    app::persist_user_state,
    domain::{AppState, CacheResource},
    infra::catalog::{CatalogClient, DEFAULT_BASE_URL},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::APP_NAME,
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let catalog = use_context::<CatalogClient>();
    let reload_tick = use_context::<Signal<u32>>();

    let mut backend_input =
        use_signal(|| state.with(|st| st.backend_url.clone().unwrap_or_default()));

    let origin = state.with(|st| st.catalog_origin);
    let cache_entries = state.with(|st| {
        st.cache
            .iter()
            .map(|(resource, time)| (cache_label(resource), humanize_age(*time)))
            .collect::<Vec<_>>()
    });

    let on_refresh = {
        let toasts = toasts.clone();
        let catalog = catalog.clone();
        let mut reload_tick = reload_tick.clone();
        move |_| {
            let catalog = catalog.clone();
            let toasts = toasts.clone();
            spawn(async move {
                // The client cache must be gone before the refetch fires.
                catalog.clear_cache().await;
                push_toast(toasts.clone(), ToastKind::Info, "Obnovuji data z backendu...");
                reload_tick += 1;
            });
        }
    };

    let on_save_backend = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let raw = backend_input().trim().to_string();
            if !raw.is_empty() && Url::parse(&raw).is_err() {
                push_toast(toasts.clone(), ToastKind::Error, "Neplatná URL backendu.");
                return;
            }
            state.with_mut(|st| st.backend_url = (!raw.is_empty()).then_some(raw));
            persist_user_state(&state);
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Adresa backendu uložena. Změna se projeví po restartu aplikace.",
            );
        }
    };

    let on_clear_timestamps = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            state.with_mut(|st| st.cache.clear());
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Časové značky vymazány. Data se načtou při příštím požadavku.",
            );
        }
    };

    rsx! {
        div { class: "space-y-6",
            section { class: theme::CARD,
                h2 { class: "text-xl font-semibold tracking-tight mb-2", "Nastavení" }
                p { class: "text-sm text-slate-400",
                    "{APP_NAME} — zdroj katalogu: {origin.label()}"
                }
                div { class: "mt-4 flex gap-3",
                    button { class: theme::BTN_PRIMARY, onclick: on_refresh, "Obnovit data" }
                    button { class: theme::BTN_SECONDARY, onclick: on_clear_timestamps, "Vymazat časové značky" }
                }
            }

            section { class: theme::CARD,
                h3 { class: "text-sm font-semibold text-slate-400 mb-2", "Backend" }
                p { class: "text-xs text-slate-500 mb-3",
                    "Prázdné pole znamená výchozí adresu ({DEFAULT_BASE_URL})."
                }
                div { class: "flex flex-wrap items-center gap-3",
                    input {
                        class: "{theme::INPUT} w-96",
                        placeholder: "{DEFAULT_BASE_URL}",
                        value: "{backend_input}",
                        oninput: move |evt| backend_input.set(evt.value()),
                    }
                    button { class: theme::BTN_SECONDARY, onclick: on_save_backend, "Uložit adresu" }
                }
            }

            section { class: theme::CARD,
                h3 { class: "text-sm font-semibold text-slate-400 mb-2", "Stáří načtených dat" }
                if cache_entries.is_empty() {
                    p { class: "text-sm text-slate-500 italic", "Zatím nic nenačteno." }
                } else {
                    ul { class: "space-y-2",
                        for (label, age) in cache_entries {
                            li { class: "flex justify-between text-sm text-slate-300",
                                span { "{label}" }
                                span { class: "text-slate-500", "{age}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn cache_label(resource: &CacheResource) -> &'static str {
    match resource {
        CacheResource::Products => "Produkty",
        CacheResource::Carriers => "Dopravci",
        CacheResource::Rates => "Kurzy měn",
        CacheResource::AuditLog => "Audit log",
    }
}

pub fn humanize_age(time: SystemTime) -> String {
    let secs = time.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    if secs < 60 {
        format!("před {secs} s")
    } else if secs < 3600 {
        format!("před {} min", secs / 60)
    } else if secs < 86400 {
        format!("před {} h", secs / 3600)
    } else {
        format!("před {} dny", secs / 86400)
    }
}
