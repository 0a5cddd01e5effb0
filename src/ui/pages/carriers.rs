use dioxus::prelude::*;

use crate::{
    domain::{AppState, Carrier, EditState, Service, ShipmentType},
    infra::{audit::AuditClient, catalog::CatalogClient},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
};

/// Mutable form row for one service of the edited carrier.
#[derive(Clone, Debug, Default, PartialEq)]
struct ServiceDraft {
    name: String,
    shipment_type: String,
    price: String,
}

impl ServiceDraft {
    fn from_service(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            shipment_type: match service.shipment_type {
                ShipmentType::Parcel => "balik".into(),
                ShipmentType::Pallet => "paleta".into(),
            },
            price: format!("{}", service.price_per_unit),
        }
    }

    fn into_service(self) -> Result<Service, String> {
        let shipment_type = match self.shipment_type.as_str() {
            "balik" => ShipmentType::Parcel,
            "paleta" => ShipmentType::Pallet,
            _ => return Err("Vyberte typ přepravy u každé služby.".into()),
        };
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| *p >= 0.0)
            .ok_or("Cena služby musí být nezáporné číslo.")?;
        if self.name.trim().is_empty() {
            return Err("Každá služba potřebuje název.".into());
        }
        Ok(Service {
            name: self.name.trim().to_string(),
            shipment_type,
            price_per_unit: price,
        })
    }
}

#[component]
pub fn CarriersPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let catalog = use_context::<CatalogClient>();
    let audit = use_context::<AuditClient>();

    let mut name_input = use_signal(String::new);
    let mut logo_input = use_signal(String::new);
    let mut countries_input = use_signal(String::new);
    let mut services = use_signal(Vec::<ServiceDraft>::new);

    let carriers = state.with(|st| st.carriers.clone());
    let edit_state = state.with(|st| st.carrier_edit.clone());

    let start_edit = {
        let mut state = state.clone();
        move |carrier: Carrier| {
            name_input.set(carrier.name.clone());
            logo_input.set(carrier.logo_url.clone().unwrap_or_default());
            countries_input.set(carrier.supported_countries.join(", "));
            services.set(carrier.services.iter().map(ServiceDraft::from_service).collect());
            state.with_mut(|st| st.carrier_edit = EditState::Editing(carrier.name));
        }
    };

    let cancel_edit = {
        let mut state = state.clone();
        move |_| {
            name_input.set(String::new());
            logo_input.set(String::new());
            countries_input.set(String::new());
            services.set(Vec::new());
            state.with_mut(|st| st.carrier_edit = EditState::Idle);
        }
    };

    let on_save = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let catalog = catalog.clone();
        let audit = audit.clone();
        move |_| {
            if state.with(|st| st.carrier_edit.is_saving()) {
                return;
            }

            let name = name_input().trim().to_string();
            if name.is_empty() {
                push_toast(toasts.clone(), ToastKind::Error, "Dopravce potřebuje název.");
                return;
            }

            let supported_countries: Vec<String> = countries_input()
                .split(',')
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .collect();
            if supported_countries.is_empty() {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    "Zadejte alespoň jednu zemi (kódy oddělené čárkou).",
                );
                return;
            }

            let mut parsed_services = Vec::new();
            for draft in services() {
                match draft.into_service() {
                    Ok(service) => parsed_services.push(service),
                    Err(message) => {
                        push_toast(toasts.clone(), ToastKind::Error, message);
                        return;
                    }
                }
            }
            if parsed_services.is_empty() {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    "Dopravce potřebuje alespoň jednu službu.",
                );
                return;
            }

            let logo = logo_input().trim().to_string();
            let carrier = Carrier {
                name: name.clone(),
                logo_url: (!logo.is_empty()).then_some(logo),
                supported_countries,
                services: parsed_services,
            };

            state.with_mut(|st| st.carrier_edit = EditState::Saving);

            let mut state = state.clone();
            let toasts = toasts.clone();
            let catalog = catalog.clone();
            let audit = audit.clone();
            spawn(async move {
                match catalog.upsert_carrier(&carrier).await {
                    Ok(()) => {
                        record_audit(audit, "carrier.save", format!("Dopravce {name} uložen"), toasts.clone());
                        refresh_carriers(&catalog, &mut state).await;
                        push_toast(toasts.clone(), ToastKind::Success, format!("Dopravce {name} uložen."));
                    }
                    Err(error) => {
                        push_toast(
                            toasts.clone(),
                            ToastKind::Error,
                            format!("Uložení selhalo: {error}"),
                        );
                    }
                }
                state.with_mut(|st| st.carrier_edit = EditState::Idle);
            });

            name_input.set(String::new());
            logo_input.set(String::new());
            countries_input.set(String::new());
            services.set(Vec::new());
        }
    };

    let on_delete = {
        let state = state.clone();
        let toasts = toasts.clone();
        let catalog = catalog.clone();
        let audit = audit.clone();
        move |name: String| {
            let mut state = state.clone();
            let toasts = toasts.clone();
            let catalog = catalog.clone();
            let audit = audit.clone();
            spawn(async move {
                match catalog.delete_carrier(&name).await {
                    Ok(()) => {
                        record_audit(audit, "carrier.delete", format!("Dopravce {name} smazán"), toasts.clone());
                        refresh_carriers(&catalog, &mut state).await;
                        push_toast(toasts.clone(), ToastKind::Success, format!("Dopravce {name} smazán."));
                    }
                    Err(error) => {
                        push_toast(
                            toasts.clone(),
                            ToastKind::Error,
                            format!("Smazání selhalo: {error}"),
                        );
                    }
                }
            });
        }
    };

    let editing_label = match &edit_state {
        EditState::Editing(name) => format!("Úprava dopravce {name}"),
        EditState::Saving => "Ukládám...".to_string(),
        EditState::Idle => "Nový dopravce".to_string(),
    };

    rsx! {
        div { class: "space-y-6",
            section { class: theme::CARD,
                h2 { class: "text-xl font-semibold tracking-tight mb-2", "Dopravci" }
                table { class: "w-full",
                    thead {
                        tr { class: theme::TABLE_HEAD,
                            th { class: "py-2", "Dopravce" }
                            th { "Země" }
                            th { "Služby" }
                            th {}
                        }
                    }
                    tbody {
                        for carrier in carriers {
                            tr { class: theme::TABLE_ROW,
                                td { class: "py-2",
                                    div { class: "flex items-center gap-3",
                                        if let Some(url) = carrier.logo_url.clone() {
                                            img { class: "carrier-logo", src: "{url}" }
                                        }
                                        span { "{carrier.name}" }
                                    }
                                }
                                td { {carrier.supported_countries.join(", ")} }
                                td {
                                    for service in carrier.services.iter() {
                                        p { class: "text-xs text-slate-400",
                                            "{service.name} · {service.shipment_type.label()} · {service.price_per_unit} Kč"
                                        }
                                    }
                                }
                                td { class: "text-right",
                                    div { class: "flex gap-2 justify-end",
                                        button {
                                            class: theme::BTN_SMALL,
                                            onclick: {
                                                let mut start_edit = start_edit.clone();
                                                let carrier = carrier.clone();
                                                move |_| start_edit(carrier.clone())
                                            },
                                            "Upravit"
                                        }
                                        button {
                                            class: theme::BTN_DANGER,
                                            onclick: {
                                                let on_delete = on_delete.clone();
                                                let name = carrier.name.clone();
                                                move |_| on_delete(name.clone())
                                            },
                                            "Smazat"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            section { class: theme::CARD,
                h3 { class: "text-sm font-semibold text-slate-400 mb-2", "{editing_label}" }
                div { class: "space-y-3",
                    div { class: "flex flex-wrap gap-3",
                        input {
                            class: theme::INPUT,
                            placeholder: "Název dopravce",
                            value: "{name_input}",
                            oninput: move |evt| name_input.set(evt.value()),
                        }
                        input {
                            class: theme::INPUT,
                            placeholder: "URL loga",
                            value: "{logo_input}",
                            oninput: move |evt| logo_input.set(evt.value()),
                        }
                        input {
                            class: theme::INPUT,
                            placeholder: "Země (CZ, SK, ...)",
                            value: "{countries_input}",
                            oninput: move |evt| countries_input.set(evt.value()),
                        }
                    }

                    for (index, draft) in services().into_iter().enumerate() {
                        div { class: "flex flex-wrap gap-3",
                            input {
                                class: theme::INPUT,
                                placeholder: "Název služby",
                                value: "{draft.name}",
                                oninput: move |evt| services.with_mut(|list| {
                                    if let Some(row) = list.get_mut(index) {
                                        row.name = evt.value();
                                    }
                                }),
                            }
                            select {
                                class: theme::SELECT,
                                value: "{draft.shipment_type}",
                                onchange: move |evt| services.with_mut(|list| {
                                    if let Some(row) = list.get_mut(index) {
                                        row.shipment_type = evt.value();
                                    }
                                }),
                                option { value: "", "— typ —" }
                                option { value: "balik", {ShipmentType::Parcel.label()} }
                                option { value: "paleta", {ShipmentType::Pallet.label()} }
                            }
                            input {
                                class: "{theme::INPUT} w-24",
                                r#type: "number",
                                min: "0",
                                placeholder: "Kč",
                                value: "{draft.price}",
                                oninput: move |evt| services.with_mut(|list| {
                                    if let Some(row) = list.get_mut(index) {
                                        row.price = evt.value();
                                    }
                                }),
                            }
                            button {
                                class: theme::BTN_DANGER,
                                onclick: move |_| services.with_mut(|list| {
                                    list.remove(index);
                                }),
                                "Odebrat"
                            }
                        }
                    }

                    div { class: "flex gap-3",
                        button {
                            class: theme::BTN_SECONDARY,
                            onclick: move |_| services.with_mut(|list| list.push(ServiceDraft::default())),
                            "Přidat službu"
                        }
                        button {
                            class: theme::BTN_PRIMARY,
                            disabled: edit_state.is_saving(),
                            onclick: on_save,
                            "Uložit dopravce"
                        }
                        if edit_state.editing_id().is_some() {
                            button { class: theme::BTN_SECONDARY, onclick: cancel_edit, "Zrušit úpravu" }
                        }
                    }
                }
            }
        }
    }
}

/// Pulls the carrier list again after a write; the client cache was
/// invalidated by the write itself.
async fn refresh_carriers(catalog: &CatalogClient, state: &mut Signal<AppState>) {
    if let Ok(payload) = catalog.get_carriers().await {
        state.with_mut(|st| st.carriers = payload.data);
    }
}

/// Audit writes are fire-and-forget; a final failure surfaces as a warning.
pub(crate) fn record_audit(
    audit: AuditClient,
    action: &'static str,
    details: String,
    toasts: Signal<Vec<ToastMessage>>,
) {
    spawn(async move {
        if let Err(error) = audit.record(action, &details).await {
            push_toast(
                toasts.clone(),
                ToastKind::Warning,
                format!("Audit log se nepodařilo zapsat: {error}"),
            );
        }
    });
}
