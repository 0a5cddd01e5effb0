use dioxus::prelude::*;

use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::theme;

/// What one side of the quote (parcel or pallet) resolved to.
#[derive(Clone, Debug, PartialEq)]
pub enum QuoteOutcome {
    /// Cheapest eligible carrier found.
    Found(QuoteView),
    /// Valid inputs, but no carrier serves this country/shipment type.
    NotFound,
    /// The order itself rules this shipment type out (all-or-nothing rule).
    Unavailable,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuoteView {
    pub carrier_name: String,
    pub service_name: String,
    pub logo_url: Option<String>,
    /// "1 234 Kč"
    pub base_price_label: String,
    /// Converted figure, e.g. "≈ 50,40 €"; absent when rates are missing or
    /// the destination pays in CZK.
    pub converted_label: Option<String>,
    /// Raw CZK amount, used for clipboard copy.
    pub price_czk: f64,
}

#[component]
pub fn QuoteCard(title: String, outcome: QuoteOutcome) -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    rsx! {
        section { class: theme::CARD,
            h3 { class: "text-sm font-semibold text-slate-400 mb-2", "{title}" }
            match outcome {
                QuoteOutcome::Found(view) => rsx! {
                    div { class: "flex items-center justify-between gap-4",
                        div { class: "flex items-center gap-3",
                            if let Some(url) = view.logo_url.clone() {
                                img { class: "carrier-logo", src: "{url}" }
                            }
                            div {
                                p { class: "text-lg font-semibold text-slate-100", "{view.carrier_name}" }
                                p { class: "text-xs text-slate-500", "{view.service_name}" }
                            }
                        }
                        div { class: "text-right",
                            p { class: "text-2xl font-bold text-sky-300", "{view.base_price_label}" }
                            if let Some(converted) = view.converted_label.clone() {
                                p { class: "text-sm text-slate-400", "{converted}" }
                            }
                        }
                    }
                    button {
                        class: "{theme::BTN_SMALL} mt-2",
                        onclick: move |_| {
                            copy_to_clipboard(view.price_czk);
                            push_toast(toasts.clone(), ToastKind::Success, "Cena zkopírována.");
                        },
                        "Kopírovat cenu"
                    }
                },
                QuoteOutcome::NotFound => rsx! {
                    p { class: "text-sm text-amber-300", "Pro tuto zemi nebyl nalezen žádný dopravce." }
                },
                QuoteOutcome::Unavailable => rsx! {
                    p { class: "text-sm text-slate-500 italic", "Tento způsob dopravy není pro objednávku dostupný." }
                },
            }
        }
    }
}

fn copy_to_clipboard(price_czk: f64) {
    // Webview clipboard; a failed eval only costs the copy, not the quote.
    let script = format!("navigator.clipboard.writeText('{}')", price_czk.round());
    document::eval(&script);
}
