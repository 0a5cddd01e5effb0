use std::time::Duration;

use dioxus::prelude::*;

use crate::{
    domain::{AppState, CacheResource},
    infra::audit::AuditClient,
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
};

/// The viewer re-pulls the trail when the cached copy is older than this.
const AUDIT_TTL: Duration = Duration::from_secs(5 * 60);

#[component]
pub fn AuditLogPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let audit = use_context::<AuditClient>();

    let _entries = use_resource({
        let mut state = state.clone();
        let toasts = toasts.clone();
        let audit = audit.clone();
        move || {
            let mut state = state.clone();
            let toasts = toasts.clone();
            let audit = audit.clone();
            async move {
                let fresh = state.with(|st| !st.is_stale(&CacheResource::AuditLog, AUDIT_TTL));
                if fresh {
                    return;
                }
                match audit.get_entries().await {
                    Ok(entries) => {
                        state.with_mut(|st| {
                            st.audit_entries = entries;
                            st.cache
                                .record_fetch(CacheResource::AuditLog, std::time::SystemTime::now());
                        });
                    }
                    Err(error) => {
                        push_toast(
                            toasts.clone(),
                            ToastKind::Warning,
                            format!("Audit log se nepodařilo načíst: {error}"),
                        );
                    }
                }
            }
        }
    });

    let entries = state.with(|st| st.audit_entries.clone());

    rsx! {
        div { class: "space-y-6",
            section { class: theme::CARD,
                h2 { class: "text-xl font-semibold tracking-tight mb-2", "Audit log" }
                if entries.is_empty() {
                    p { class: "text-sm text-slate-500 italic", "Žádné záznamy." }
                } else {
                    table { class: "w-full",
                        thead {
                            tr { class: theme::TABLE_HEAD,
                                th { class: "py-2", "Čas" }
                                th { "Akce" }
                                th { "Detail" }
                            }
                        }
                        tbody {
                            for entry in entries {
                                tr { class: theme::TABLE_ROW,
                                    td { class: "py-2 text-xs text-slate-400", "{entry.timestamp}" }
                                    td { "{entry.action}" }
                                    td { class: "text-slate-400", "{entry.details}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
