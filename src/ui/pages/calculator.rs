use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{
        accumulate, boxes_for_item, convert_price, country_name, format_price,
        pallet_usage_for_item, select_quote, AppState, AxisTotal, DisplayPrice, LineItem,
        QuoteOption, ShipmentType,
    },
    ui::{
        components::{
            item_table::{ItemRow, ItemTable},
            quote_card::{QuoteCard, QuoteOutcome, QuoteView},
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
    util::generate_id,
};

/// Orders beyond this many boxes get a second-press confirmation before the
/// quote is computed.
const LARGE_ORDER_BOXES: u32 = 1000;

#[component]
pub fn CalculatorPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut product_code = use_signal(String::new);
    let mut quantity_input = use_signal(String::new);
    let mut large_order_ack = use_signal(|| false);

    let products = state.with(|st| st.products.clone());
    let items = state.with(|st| st.line_items.clone());
    let countries = state.with(|st| st.available_countries());
    let selected_country = state.with(|st| st.selected_country.clone());
    let quote = state.with(|st| st.quote.clone());
    let rates = state.with(|st| st.rates.clone());

    let totals = accumulate(&items);

    let rows: Vec<ItemRow> = items
        .iter()
        .map(|item| ItemRow {
            id: item.id.clone(),
            name: item.product_name.clone(),
            image_url: item.image_url.clone(),
            quantity: item.quantity,
            boxes_label: match item.boxes_needed {
                Some(boxes) => format!("{boxes} ks"),
                None => "pouze paleta".to_string(),
            },
            pallet_label: match item.pallet_usage_pct {
                Some(pct) => format!("{pct:.1} %"),
                None => "pouze balík".to_string(),
            },
        })
        .collect();

    let on_add = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let products = products.clone();
        move |evt: FormEvent| {
            evt.prevent_default();

            let code = product_code();
            let Some(product) = products.iter().find(|p| p.code == code) else {
                push_toast(toasts.clone(), ToastKind::Warning, "Vyberte produkt.");
                return;
            };

            let quantity = match quantity_input().trim().parse::<u32>() {
                Ok(value) if value > 0 => value,
                _ => {
                    push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        "Množství musí být kladné celé číslo.",
                    );
                    return;
                }
            };

            let item = LineItem {
                id: generate_id("item"),
                product_code: product.code.clone(),
                product_name: product.name.clone(),
                image_url: product.image_url.clone(),
                quantity,
                boxes_needed: boxes_for_item(product, quantity),
                pallet_usage_pct: pallet_usage_for_item(product, quantity),
            };

            state.with_mut(|st| {
                st.line_items.push(item);
                // Any change to the list invalidates the shown quote.
                st.quote = None;
            });
            large_order_ack.set(false);
            product_code.set(String::new());
            quantity_input.set(String::new());
        }
    };

    let on_remove = {
        let mut state = state.clone();
        move |id: String| {
            state.with_mut(|st| {
                st.line_items.retain(|item| item.id != id);
                st.quote = None;
            });
            large_order_ack.set(false);
        }
    };

    let on_calculate = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let (items, country, carriers) = state.with(|st| {
                (
                    st.line_items.clone(),
                    st.selected_country.clone(),
                    st.carriers.clone(),
                )
            });

            if items.is_empty() {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    "Přidejte alespoň jednu položku.",
                );
                return;
            }
            let Some(country) = country else {
                push_toast(toasts.clone(), ToastKind::Error, "Vyberte cílovou zemi.");
                return;
            };

            let totals = accumulate(&items);

            if let AxisTotal::Available(boxes) = totals.boxes {
                if boxes > LARGE_ORDER_BOXES && !large_order_ack() {
                    large_order_ack.set(true);
                    push_toast(
                        toasts.clone(),
                        ToastKind::Warning,
                        format!(
                            "Objednávka má {boxes} krabic. Stiskněte Spočítat ještě jednou pro potvrzení."
                        ),
                    );
                    return;
                }
            }
            large_order_ack.set(false);

            let result = select_quote(&totals, &country, &carriers);
            state.with_mut(|st| st.quote = Some(result));
        }
    };

    let on_reset = {
        let mut state = state.clone();
        move |_| {
            state.with_mut(|st| {
                st.line_items.clear();
                st.quote = None;
                st.selected_country = None;
            });
            large_order_ack.set(false);
        }
    };

    let on_country_change = {
        let mut state = state.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            state.with_mut(|st| {
                st.selected_country = if value.is_empty() { None } else { Some(value) };
                st.quote = None;
            });
            persist_user_state(&state);
        }
    };

    let country = selected_country.clone().unwrap_or_default();

    let parcel_outcome = quote.as_ref().map(|q| {
        outcome_for_axis(
            q.parcel.as_ref(),
            totals.boxes,
            &country,
            rates.clone(),
        )
    });
    let pallet_outcome = quote.as_ref().map(|q| {
        outcome_for_axis(
            q.pallet.as_ref(),
            totals.pallets,
            &country,
            rates.clone(),
        )
    });

    rsx! {
        div { class: "space-y-6",
            section { class: theme::CARD,
                h2 { class: "text-xl font-semibold tracking-tight mb-2", "Kalkulace dopravy" }
                form { class: "flex flex-wrap items-center gap-3", onsubmit: on_add,
                    select {
                        class: theme::SELECT,
                        value: "{product_code}",
                        onchange: move |evt| product_code.set(evt.value()),
                        option { value: "", "— vyberte produkt —" }
                        for product in products.iter() {
                            option { value: "{product.code}", "{product.name}" }
                        }
                    }
                    input {
                        class: "{theme::INPUT} w-24",
                        r#type: "number",
                        min: "1",
                        placeholder: "ks",
                        value: "{quantity_input}",
                        oninput: move |evt| quantity_input.set(evt.value()),
                    }
                    button { class: theme::BTN_PRIMARY, r#type: "submit", "Přidat" }
                }
            }

            section { class: theme::CARD,
                ItemTable { rows, on_remove }
                if !items.is_empty() {
                    div { class: "mt-4 flex gap-6 text-sm text-slate-400",
                        span { {boxes_summary(&totals.boxes)} }
                        span { {pallets_summary(&totals.pallets)} }
                    }
                }
            }

            section { class: theme::CARD,
                div { class: "flex flex-wrap items-center gap-3",
                    label { class: theme::LABEL, "Cílová země" }
                    select {
                        class: theme::SELECT,
                        value: "{country}",
                        onchange: on_country_change,
                        option { value: "", "— vyberte zemi —" }
                        for code in countries.iter() {
                            option { value: "{code}", {country_name(code)} }
                        }
                    }
                    button { class: theme::BTN_PRIMARY, onclick: on_calculate, "Spočítat dopravu" }
                    button { class: theme::BTN_SECONDARY, onclick: on_reset, "Vymazat" }
                }
            }

            if let (Some(parcel), Some(pallet)) = (parcel_outcome, pallet_outcome) {
                div { class: "grid grid-cols-2 gap-4",
                    QuoteCard { title: ShipmentType::Parcel.label().to_string(), outcome: parcel }
                    QuoteCard { title: ShipmentType::Pallet.label().to_string(), outcome: pallet }
                }
            }
        }
    }
}

fn outcome_for_axis(
    option: Option<&QuoteOption>,
    axis: AxisTotal,
    country: &str,
    rates: Option<crate::domain::RateTable>,
) -> QuoteOutcome {
    if axis == AxisTotal::Unavailable {
        return QuoteOutcome::Unavailable;
    }
    match option {
        Some(option) => {
            let base = DisplayPrice {
                value: option.total_price,
                code: crate::domain::BASE_CURRENCY,
                symbol: crate::domain::BASE_SYMBOL,
                converted: false,
            };
            let converted = convert_price(option.total_price, country, rates.as_ref());
            QuoteOutcome::Found(QuoteView {
                carrier_name: option.carrier_name.clone(),
                service_name: option.service_name.clone(),
                logo_url: option.logo_url.clone(),
                base_price_label: format_price(&base),
                converted_label: converted
                    .converted
                    .then(|| format!("≈ {}", format_price(&converted))),
                price_czk: option.total_price,
            })
        }
        None => QuoteOutcome::NotFound,
    }
}

fn boxes_summary(axis: &AxisTotal) -> String {
    match axis {
        AxisTotal::Available(boxes) => format!("Celkem krabic: {boxes}"),
        AxisTotal::Unavailable => "Balíková přeprava: nedostupná (pouze paleta)".to_string(),
    }
}

fn pallets_summary(axis: &AxisTotal) -> String {
    match axis {
        AxisTotal::Available(pallets) => format!("Celkem palet: {pallets}"),
        AxisTotal::Unavailable => "Paletová přeprava: nedostupná".to_string(),
    }
}
