//! Bundled catalog data used when the hosted backend is empty or down.
//!
//! The calculator must keep producing quotes offline, so the last known
//! carrier roster and product packaging list ship with the binary. Admin
//! edits only ever land in the backend; this file is the floor, not a store.

use super::entities::{Carrier, Product, Service, ShipmentType};

pub fn fallback_carriers() -> Vec<Carrier> {
    vec![
        Carrier {
            name: "WEDO".into(),
            logo_url: Some(
                "https://dl.memuplay.com/new_market/img/cz.wedo.receiverapp.icon.2022-11-26-09-45-30.png"
                    .into(),
            ),
            supported_countries: vec!["CZ".into()],
            services: vec![Service {
                name: "Doručení na vaši adresu".into(),
                shipment_type: ShipmentType::Parcel,
                price_per_unit: 129.0,
            }],
        },
        Carrier {
            name: "Česká pošta".into(),
            logo_url: Some("https://www.cernydul.cz/data/galerie/posta.jpg".into()),
            supported_countries: vec!["CZ".into()],
            services: vec![Service {
                name: "Balík do ruky".into(),
                shipment_type: ShipmentType::Parcel,
                price_per_unit: 139.0,
            }],
        },
        Carrier {
            name: "GLS".into(),
            logo_url: Some(
                "https://gls-group.com/CZ/media/images/logo_thumb_M02_ASIDE.png".into(),
            ),
            supported_countries: vec!["CZ".into()],
            services: vec![Service {
                name: "Nadrozměrná doprava XXL".into(),
                shipment_type: ShipmentType::Parcel,
                price_per_unit: 299.0,
            }],
        },
        Carrier {
            name: "GEIS".into(),
            logo_url: Some(
                "https://www.geis-group.cz/archiv/content_cs/logo-geis-global-logistic-cmyk.png"
                    .into(),
            ),
            supported_countries: vec!["CZ".into()],
            services: vec![Service {
                name: "Paletová doprava nábytku".into(),
                shipment_type: ShipmentType::Pallet,
                price_per_unit: 999.0,
            }],
        },
        Carrier {
            name: "QDL".into(),
            logo_url: Some(
                "https://www.qdl.sk/wp-content/uploads/2025/01/1Asset-133013.png".into(),
            ),
            supported_countries: vec!["SK".into()],
            services: vec![Service {
                name: "B2B - Slovensko".into(),
                shipment_type: ShipmentType::Parcel,
                price_per_unit: 249.0,
            }],
        },
        Carrier {
            name: "SDS".into(),
            logo_url: Some("https://www.recenzer.cz/wp-content/uploads/2024/01/sds.jpg".into()),
            supported_countries: vec!["SK".into()],
            services: vec![Service {
                name: "B2B - Nadrozměr - Slovensko".into(),
                shipment_type: ShipmentType::Pallet,
                price_per_unit: 1499.0,
            }],
        },
    ]
}

pub fn fallback_products() -> Vec<Product> {
    fn product(
        code: &str,
        name: &str,
        items_per_box: Option<u32>,
        items_per_pallet: Option<u32>,
    ) -> Product {
        Product {
            code: code.into(),
            name: name.into(),
            image_url: None,
            items_per_box,
            items_per_pallet,
            multiple_boxes: false,
            boxes_per_item: 1,
        }
    }

    let mut products = vec![
        product("polstar", "Polštář", Some(10), Some(500)),
        product("prikryvka", "Přikrývka", Some(10), Some(100)),
        product("set-prikryvka-polstar", "Set přikrývka + polštář", Some(6), Some(100)),
        product("povleceni", "Povlečení", Some(30), Some(1000)),
        product("prosteradlo-90", "Prostěradlo 90", Some(40), Some(1200)),
        product("prosteradlo-180", "Prostěradlo 180", Some(30), Some(1000)),
        product("rucnik", "Ručník", Some(50), Some(2000)),
        product("osuska", "Osuška", Some(50), Some(1500)),
        product("deky-prehozy", "Deky a přehozy", Some(20), Some(400)),
        product("chranic-matrace", "Chránič matrace", Some(30), Some(1000)),
        product("zidle", "Židle", Some(4), Some(40)),
        // Pallet-only; a single one in the list makes the order pallet-only.
        product("matrace", "Matrace", None, Some(20)),
    ];

    // Beds ship as two boxes per piece rather than pieces per box.
    let mut postel = product("postel", "Postel", Some(1), Some(8));
    postel.multiple_boxes = true;
    postel.boxes_per_item = 2;
    products.push(postel);

    products
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fallback_product_is_shippable() {
        for product in fallback_products() {
            assert!(product.is_shippable(), "{}", product.code);
        }
    }

    #[test]
    fn fallback_catalog_covers_both_shipment_types_for_cz() {
        let carriers = fallback_carriers();
        let cz: Vec<_> = carriers.iter().filter(|c| c.serves("CZ")).collect();
        assert!(cz
            .iter()
            .flat_map(|c| &c.services)
            .any(|s| s.shipment_type == ShipmentType::Parcel));
        assert!(cz
            .iter()
            .flat_map(|c| &c.services)
            .any(|s| s.shipment_type == ShipmentType::Pallet));
    }
}
