use dioxus::prelude::*;

use crate::{
    domain::{AppState, EditState, Product},
    infra::{audit::AuditClient, catalog::CatalogClient},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        pages::carriers::record_audit,
        theme,
    },
};

#[component]
pub fn ProductsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let catalog = use_context::<CatalogClient>();
    let audit = use_context::<AuditClient>();

    let mut code_input = use_signal(String::new);
    let mut name_input = use_signal(String::new);
    let mut image_input = use_signal(String::new);
    let mut per_box_input = use_signal(String::new);
    let mut per_pallet_input = use_signal(String::new);
    let mut multiple_boxes = use_signal(|| false);
    let mut boxes_per_item_input = use_signal(|| "1".to_string());

    let products = state.with(|st| st.products.clone());
    let edit_state = state.with(|st| st.product_edit.clone());

    let mut clear_form = move || {
        code_input.set(String::new());
        name_input.set(String::new());
        image_input.set(String::new());
        per_box_input.set(String::new());
        per_pallet_input.set(String::new());
        multiple_boxes.set(false);
        boxes_per_item_input.set("1".to_string());
    };

    let start_edit = {
        let mut state = state.clone();
        move |product: Product| {
            code_input.set(product.code.clone());
            name_input.set(product.name.clone());
            image_input.set(product.image_url.clone().unwrap_or_default());
            per_box_input.set(
                product
                    .items_per_box
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
            per_pallet_input.set(
                product
                    .items_per_pallet
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
            multiple_boxes.set(product.multiple_boxes);
            boxes_per_item_input.set(product.boxes_per_item.to_string());
            state.with_mut(|st| st.product_edit = EditState::Editing(product.code));
        }
    };

    let cancel_edit = {
        let mut state = state.clone();
        move |_| {
            clear_form();
            state.with_mut(|st| st.product_edit = EditState::Idle);
        }
    };

    let on_save = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let catalog = catalog.clone();
        let audit = audit.clone();
        move |_| {
            if state.with(|st| st.product_edit.is_saving()) {
                return;
            }

            let code = code_input().trim().to_lowercase();
            let name = name_input().trim().to_string();
            if code.is_empty() || name.is_empty() {
                push_toast(toasts.clone(), ToastKind::Error, "Kód a název jsou povinné.");
                return;
            }

            let items_per_box = match parse_capacity(&per_box_input()) {
                Ok(value) => value,
                Err(message) => {
                    push_toast(toasts.clone(), ToastKind::Error, message);
                    return;
                }
            };
            let items_per_pallet = match parse_capacity(&per_pallet_input()) {
                Ok(value) => value,
                Err(message) => {
                    push_toast(toasts.clone(), ToastKind::Error, message);
                    return;
                }
            };

            let boxes_per_item = if multiple_boxes() {
                match boxes_per_item_input().trim().parse::<u32>() {
                    Ok(value) if value > 0 => value,
                    _ => {
                        push_toast(
                            toasts.clone(),
                            ToastKind::Error,
                            "Počet krabic na kus musí být kladné číslo.",
                        );
                        return;
                    }
                }
            } else {
                1
            };

            let image = image_input().trim().to_string();
            let product = Product {
                code: code.clone(),
                name,
                image_url: (!image.is_empty()).then_some(image),
                items_per_box,
                items_per_pallet,
                multiple_boxes: multiple_boxes(),
                boxes_per_item,
            };

            // A product with both axes disabled could never ship.
            if !product.is_shippable() {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    "Produkt musí podporovat alespoň jeden způsob dopravy.",
                );
                return;
            }

            state.with_mut(|st| st.product_edit = EditState::Saving);

            let mut state = state.clone();
            let toasts = toasts.clone();
            let catalog = catalog.clone();
            let audit = audit.clone();
            spawn(async move {
                match catalog.upsert_product(&product).await {
                    Ok(()) => {
                        record_audit(audit, "product.save", format!("Produkt {code} uložen"), toasts.clone());
                        refresh_products(&catalog, &mut state).await;
                        push_toast(toasts.clone(), ToastKind::Success, format!("Produkt {code} uložen."));
                    }
                    Err(error) => {
                        push_toast(
                            toasts.clone(),
                            ToastKind::Error,
                            format!("Uložení selhalo: {error}"),
                        );
                    }
                }
                state.with_mut(|st| st.product_edit = EditState::Idle);
            });

            clear_form();
        }
    };

    let on_delete = {
        let state = state.clone();
        let toasts = toasts.clone();
        let catalog = catalog.clone();
        let audit = audit.clone();
        move |code: String| {
            let mut state = state.clone();
            let toasts = toasts.clone();
            let catalog = catalog.clone();
            let audit = audit.clone();
            spawn(async move {
                match catalog.delete_product(&code).await {
                    Ok(()) => {
                        record_audit(audit, "product.delete", format!("Produkt {code} smazán"), toasts.clone());
                        refresh_products(&catalog, &mut state).await;
                        push_toast(toasts.clone(), ToastKind::Success, format!("Produkt {code} smazán."));
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
        EditState::Editing(code) => format!("Úprava produktu {code}"),
        EditState::Saving => "Ukládám...".to_string(),
        EditState::Idle => "Nový produkt".to_string(),
    };

    rsx! {
        div { class: "space-y-6",
            section { class: theme::CARD,
                h2 { class: "text-xl font-semibold tracking-tight mb-2", "Produkty a balení" }
                table { class: "w-full",
                    thead {
                        tr { class: theme::TABLE_HEAD,
                            th { class: "py-2", "Produkt" }
                            th { "Ks / krabice" }
                            th { "Ks / paleta" }
                            th { "Krabic / ks" }
                            th {}
                        }
                    }
                    tbody {
                        for product in products {
                            tr { class: theme::TABLE_ROW,
                                td { class: "py-2",
                                    div { class: "flex items-center gap-3",
                                        if let Some(url) = product.image_url.clone() {
                                            img { class: "product-thumb", src: "{url}" }
                                        }
                                        div {
                                            span { "{product.name}" }
                                            p { class: "text-xs text-slate-500", "{product.code}" }
                                        }
                                    }
                                }
                                td { {capacity_label(product.items_per_box)} }
                                td { {capacity_label(product.items_per_pallet)} }
                                td {
                                    if product.multiple_boxes {
                                        "{product.boxes_per_item}"
                                    } else {
                                        "—"
                                    }
                                }
                                td { class: "text-right",
                                    div { class: "flex gap-2 justify-end",
                                        button {
                                            class: theme::BTN_SMALL,
                                            onclick: {
                                                let mut start_edit = start_edit.clone();
                                                let product = product.clone();
                                                move |_| start_edit(product.clone())
                                            },
                                            "Upravit"
                                        }
                                        button {
                                            class: theme::BTN_DANGER,
                                            onclick: {
                                                let on_delete = on_delete.clone();
                                                let code = product.code.clone();
                                                move |_| on_delete(code.clone())
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
                            placeholder: "Kód (např. povleceni)",
                            value: "{code_input}",
                            oninput: move |evt| code_input.set(evt.value()),
                        }
                        input {
                            class: theme::INPUT,
                            placeholder: "Název",
                            value: "{name_input}",
                            oninput: move |evt| name_input.set(evt.value()),
                        }
                        input {
                            class: theme::INPUT,
                            placeholder: "URL obrázku",
                            value: "{image_input}",
                            oninput: move |evt| image_input.set(evt.value()),
                        }
                    }
                    div { class: "flex flex-wrap items-center gap-3",
                        input {
                            class: "{theme::INPUT} w-24",
                            r#type: "number",
                            min: "0",
                            placeholder: "ks/krabice",
                            title: "Prázdné = balíková přeprava zakázána",
                            value: "{per_box_input}",
                            oninput: move |evt| per_box_input.set(evt.value()),
                        }
                        input {
                            class: "{theme::INPUT} w-24",
                            r#type: "number",
                            min: "0",
                            placeholder: "ks/paleta",
                            title: "Prázdné = paletová přeprava zakázána",
                            value: "{per_pallet_input}",
                            oninput: move |evt| per_pallet_input.set(evt.value()),
                        }
                        label { class: "flex items-center gap-2 text-sm text-slate-300",
                            input {
                                r#type: "checkbox",
                                checked: "{multiple_boxes}",
                                onchange: move |evt| multiple_boxes.set(evt.checked()),
                            }
                            "Více krabic na kus"
                        }
                        if multiple_boxes() {
                            input {
                                class: "{theme::INPUT} w-24",
                                r#type: "number",
                                min: "1",
                                placeholder: "krabic/ks",
                                value: "{boxes_per_item_input}",
                                oninput: move |evt| boxes_per_item_input.set(evt.value()),
                            }
                        }
                    }
                    div { class: "flex gap-3",
                        button {
                            class: theme::BTN_PRIMARY,
                            disabled: edit_state.is_saving(),
                            onclick: on_save,
                            "Uložit produkt"
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

/// Empty input disables the axis; otherwise the capacity must be positive.
fn parse_capacity(raw: &str) -> Result<Option<u32>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u32>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err("Kapacita musí být kladné celé číslo, nebo prázdná.".into()),
    }
}

fn capacity_label(capacity: Option<u32>) -> String {
    match capacity {
        Some(value) => value.to_string(),
        None => "zakázáno".to_string(),
    }
}

async fn refresh_products(catalog: &CatalogClient, state: &mut Signal<AppState>) {
    if let Ok(payload) = catalog.get_products().await {
        state.with_mut(|st| st.products = payload.data);
    }
}
