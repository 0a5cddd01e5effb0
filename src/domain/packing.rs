//! Turns the working list into the two scalar totals used for pricing.

use super::entities::{LineItem, Product};

/// Availability and size of one shipment axis for the whole order.
///
/// The order is priced all-or-nothing per axis: as soon as a single item in
/// the list cannot go by parcel, the whole order is treated as pallet-only
/// (and symmetrically for pallets). The UI reports `Unavailable` explicitly
/// instead of showing a zero unit count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisTotal {
    Available(u32),
    Unavailable,
}

impl AxisTotal {
    pub fn units(&self) -> Option<u32> {
        match self {
            AxisTotal::Available(units) => Some(*units),
            AxisTotal::Unavailable => None,
        }
    }
}

/// Accumulated totals for one "calculate" action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShipmentTotals {
    pub boxes: AxisTotal,
    pub pallets: AxisTotal,
}

/// Boxes one row needs, or `None` when the product has parcel disabled.
///
/// Products flagged `multiple_boxes` take a fixed number of boxes per unit;
/// everything else packs `items_per_box` units into one box, rounded up.
pub fn boxes_for_item(product: &Product, quantity: u32) -> Option<u32> {
    let items_per_box = product.items_per_box?;
    if product.multiple_boxes {
        return Some(product.boxes_per_item.saturating_mul(quantity));
    }
    Some(quantity.div_ceil(items_per_box.max(1)))
}

/// Pallet capacity one row consumes, in percent, or `None` when the product
/// has pallet shipping disabled.
pub fn pallet_usage_for_item(product: &Product, quantity: u32) -> Option<f64> {
    let items_per_pallet = product.items_per_pallet?;
    Some(quantity as f64 / items_per_pallet.max(1) as f64 * 100.0)
}

/// Folds the working list into per-axis totals.
pub fn accumulate(items: &[LineItem]) -> ShipmentTotals {
    let parcel_blocked = items.iter().any(|item| item.boxes_needed.is_none());
    let pallet_blocked = items.iter().any(|item| item.pallet_usage_pct.is_none());

    let boxes = if parcel_blocked {
        AxisTotal::Unavailable
    } else {
        let sum: u32 = items.iter().filter_map(|item| item.boxes_needed).sum();
        AxisTotal::Available(sum)
    };

    let pallets = if pallet_blocked {
        AxisTotal::Unavailable
    } else {
        let pct: f64 = items.iter().filter_map(|item| item.pallet_usage_pct).sum();
        AxisTotal::Available((pct / 100.0).ceil() as u32)
    };

    ShipmentTotals { boxes, pallets }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(items_per_box: Option<u32>, items_per_pallet: Option<u32>) -> Product {
        Product {
            code: "povleceni".into(),
            name: "Povlečení".into(),
            image_url: None,
            items_per_box,
            items_per_pallet,
            multiple_boxes: false,
            boxes_per_item: 1,
        }
    }

    fn item(id: &str, boxes: Option<u32>, pallet_pct: Option<f64>) -> LineItem {
        LineItem {
            id: id.into(),
            product_code: "p".into(),
            product_name: "p".into(),
            image_url: None,
            quantity: 1,
            boxes_needed: boxes,
            pallet_usage_pct: pallet_pct,
        }
    }

    #[test]
    fn boxes_round_up_to_whole_boxes() {
        let p = product(Some(10), Some(100));
        assert_eq!(boxes_for_item(&p, 25), Some(3));
        assert_eq!(boxes_for_item(&p, 30), Some(3));
        assert_eq!(boxes_for_item(&p, 31), Some(4));
    }

    #[test]
    fn multiple_boxes_scale_per_unit() {
        let mut p = product(Some(1), Some(10));
        p.multiple_boxes = true;
        p.boxes_per_item = 3;
        assert_eq!(boxes_for_item(&p, 4), Some(12));
    }

    #[test]
    fn absurd_quantities_saturate_instead_of_overflowing() {
        let mut p = product(Some(1), Some(10));
        p.multiple_boxes = true;
        p.boxes_per_item = 2;
        assert_eq!(boxes_for_item(&p, 3_000_000_000), Some(u32::MAX));
    }

    #[test]
    fn parcel_disabled_product_contributes_no_boxes() {
        let p = product(None, Some(10));
        assert_eq!(boxes_for_item(&p, 5), None);
    }

    #[test]
    fn boxes_are_monotonic_in_quantity() {
        let p = product(Some(7), Some(50));
        let mut last = 0;
        for qty in 0..200 {
            let boxes = boxes_for_item(&p, qty).expect("parcel enabled");
            assert!(boxes >= last);
            last = boxes;
        }
    }

    #[test]
    fn pallet_usage_is_proportional() {
        let p = product(Some(10), Some(50));
        assert_eq!(pallet_usage_for_item(&p, 25), Some(50.0));
        assert_eq!(pallet_usage_for_item(&p, 75), Some(150.0));
    }

    #[test]
    fn totals_sum_and_round_up() {
        let items = vec![
            item("a", Some(2), Some(40.0)),
            item("b", Some(3), Some(80.0)),
        ];
        let totals = accumulate(&items);
        assert_eq!(totals.boxes, AxisTotal::Available(5));
        // 120 % of a pallet needs two pallets.
        assert_eq!(totals.pallets, AxisTotal::Available(2));
    }

    #[test]
    fn one_parcel_disabled_item_blocks_the_whole_parcel_axis() {
        let items = vec![
            item("a", Some(10), Some(10.0)),
            item("b", None, Some(10.0)),
        ];
        let totals = accumulate(&items);
        assert_eq!(totals.boxes, AxisTotal::Unavailable);
        assert_eq!(totals.pallets, AxisTotal::Available(1));
    }

    #[test]
    fn one_pallet_disabled_item_blocks_the_whole_pallet_axis() {
        let items = vec![
            item("a", Some(1), Some(10.0)),
            item("b", Some(1), None),
        ];
        let totals = accumulate(&items);
        assert_eq!(totals.boxes, AxisTotal::Available(2));
        assert_eq!(totals.pallets, AxisTotal::Unavailable);
    }

    #[test]
    fn empty_list_yields_zero_totals() {
        let totals = accumulate(&[]);
        assert_eq!(totals.boxes, AxisTotal::Available(0));
        assert_eq!(totals.pallets, AxisTotal::Available(0));
    }
}
