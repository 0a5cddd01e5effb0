use dioxus::prelude::*;

use crate::ui::theme;

/// Row model for the working list of products to ship.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemRow {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub quantity: u32,
    /// "3 krabice" or "pouze paleta" when parcel is disabled.
    pub boxes_label: String,
    /// "12,5 % palety" or "pouze balík" when pallet is disabled.
    pub pallet_label: String,
}

#[component]
pub fn ItemTable(rows: Vec<ItemRow>, on_remove: EventHandler<String>) -> Element {
    if rows.is_empty() {
        return rsx! {
            p { class: "text-sm text-slate-500 italic", "Zatím žádné položky." }
        };
    }

    rsx! {
        table { class: "w-full",
            thead {
                tr { class: theme::TABLE_HEAD,
                    th { class: "py-2", "Produkt" }
                    th { "Množství" }
                    th { "Krabice" }
                    th { "Paleta" }
                    th {}
                }
            }
            tbody {
                for row in rows {
                    tr { class: theme::TABLE_ROW,
                        td { class: "py-2",
                            div { class: "flex items-center gap-3",
                                if let Some(url) = row.image_url.clone() {
                                    img { class: "product-thumb", src: "{url}" }
                                }
                                span { "{row.name}" }
                            }
                        }
                        td { "{row.quantity} ks" }
                        td { "{row.boxes_label}" }
                        td { "{row.pallet_label}" }
                        td { class: "text-right",
                            button {
                                class: theme::BTN_DANGER,
                                onclick: move |_| on_remove.call(row.id.clone()),
                                "Odebrat"
                            }
                        }
                    }
                }
            }
        }
    }
}
