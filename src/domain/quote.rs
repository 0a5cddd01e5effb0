//! Cheapest-carrier selection for one accumulated order.

use super::entities::{Carrier, QuoteOption, QuoteResult, ShipmentType};
use super::packing::ShipmentTotals;

/// Picks the cheapest eligible carrier/service per shipment type.
///
/// Exhaustive linear scan over the catalog; the expected size is tens of
/// carriers, so nothing smarter is warranted. Strict less-than comparison
/// means the first carrier in catalog order wins exact price ties.
pub fn select_quote(totals: &ShipmentTotals, country: &str, carriers: &[Carrier]) -> QuoteResult {
    let mut result = QuoteResult::default();

    for carrier in carriers {
        if !carrier.serves(country) {
            continue;
        }

        for service in &carrier.services {
            let units = match service.shipment_type {
                ShipmentType::Parcel => totals.boxes.units(),
                ShipmentType::Pallet => totals.pallets.units(),
            };
            let Some(units) = units else {
                continue;
            };

            let price = service.price_per_unit * units as f64;
            let best = match service.shipment_type {
                ShipmentType::Parcel => &mut result.parcel,
                ShipmentType::Pallet => &mut result.pallet,
            };

            let beats_current = best
                .as_ref()
                .map(|current| price < current.total_price)
                .unwrap_or(true);
            if beats_current {
                *best = Some(QuoteOption {
                    carrier_name: carrier.name.clone(),
                    service_name: service.name.clone(),
                    logo_url: carrier.logo_url.clone(),
                    total_price: price,
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Service;
    use crate::domain::packing::AxisTotal;

    fn carrier(name: &str, countries: &[&str], services: Vec<Service>) -> Carrier {
        Carrier {
            name: name.into(),
            logo_url: None,
            supported_countries: countries.iter().map(|c| c.to_string()).collect(),
            services,
        }
    }

    fn parcel_service(name: &str, price: f64) -> Service {
        Service {
            name: name.into(),
            shipment_type: ShipmentType::Parcel,
            price_per_unit: price,
        }
    }

    fn pallet_service(name: &str, price: f64) -> Service {
        Service {
            name: name.into(),
            shipment_type: ShipmentType::Pallet,
            price_per_unit: price,
        }
    }

    fn totals(boxes: AxisTotal, pallets: AxisTotal) -> ShipmentTotals {
        ShipmentTotals { boxes, pallets }
    }

    #[test]
    fn picks_the_cheaper_parcel_carrier() {
        let catalog = vec![
            carrier("A", &["CZ"], vec![parcel_service("Standard", 100.0)]),
            carrier("B", &["CZ"], vec![parcel_service("Standard", 90.0)]),
        ];
        let result = select_quote(
            &totals(AxisTotal::Available(5), AxisTotal::Available(0)),
            "CZ",
            &catalog,
        );
        let parcel = result.parcel.expect("parcel option");
        assert_eq!(parcel.carrier_name, "B");
        assert_eq!(parcel.total_price, 450.0);
    }

    #[test]
    fn first_carrier_wins_exact_price_ties() {
        let catalog = vec![
            carrier("First", &["CZ"], vec![parcel_service("S", 100.0)]),
            carrier("Second", &["CZ"], vec![parcel_service("S", 100.0)]),
        ];
        let result = select_quote(
            &totals(AxisTotal::Available(3), AxisTotal::Unavailable),
            "CZ",
            &catalog,
        );
        assert_eq!(result.parcel.expect("parcel option").carrier_name, "First");
    }

    #[test]
    fn skips_carriers_not_serving_the_country() {
        let catalog = vec![
            carrier("CZ only", &["CZ"], vec![parcel_service("S", 10.0)]),
            carrier("SK only", &["SK"], vec![parcel_service("S", 999.0)]),
        ];
        let result = select_quote(
            &totals(AxisTotal::Available(1), AxisTotal::Available(1)),
            "SK",
            &catalog,
        );
        assert_eq!(result.parcel.expect("parcel option").carrier_name, "SK only");
    }

    #[test]
    fn unserved_country_yields_no_options() {
        let catalog = vec![carrier("A", &["CZ"], vec![parcel_service("S", 10.0)])];
        let result = select_quote(
            &totals(AxisTotal::Available(1), AxisTotal::Available(1)),
            "DE",
            &catalog,
        );
        assert_eq!(result.parcel, None);
        assert_eq!(result.pallet, None);
    }

    #[test]
    fn blocked_parcel_axis_never_produces_a_parcel_option() {
        let catalog = vec![carrier(
            "A",
            &["CZ"],
            vec![parcel_service("S", 10.0), pallet_service("P", 500.0)],
        )];
        let result = select_quote(
            &totals(AxisTotal::Unavailable, AxisTotal::Available(2)),
            "CZ",
            &catalog,
        );
        assert_eq!(result.parcel, None);
        let pallet = result.pallet.expect("pallet option");
        assert_eq!(pallet.total_price, 1000.0);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let catalog = vec![
            carrier("A", &["CZ"], vec![parcel_service("S", 129.0)]),
            carrier("B", &["CZ"], vec![pallet_service("P", 999.0)]),
        ];
        let t = totals(AxisTotal::Available(7), AxisTotal::Available(1));
        let first = select_quote(&t, "CZ", &catalog);
        let second = select_quote(&t, "CZ", &catalog);
        assert_eq!(first, second);
    }
}
