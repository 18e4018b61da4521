use std::collections::BTreeMap;

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::core::{slot::PricedSlot, tier::PriceTier};

/// Price value to tier assignment.
///
/// Keyed by price rather than by slot, so equal prices always share a tier
/// even when a strict equal-size split would separate them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct TierMap(BTreeMap<OrderedFloat<f64>, PriceTier>);

impl TierMap {
    pub fn get(&self, price: f64) -> Option<PriceTier> {
        self.0.get(&OrderedFloat(price)).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(OrderedFloat<f64>, PriceTier)> for TierMap {
    /// Later pairs override earlier ones for the same price.
    fn from_iter<T: IntoIterator<Item = (OrderedFloat<f64>, PriceTier)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Split the price-sorted slots into five contiguous segments of `ceil(n / 5)`, cheapest first.
///
/// When duplicates straddle a segment boundary, the highest rank wins.
pub fn classify(slots: &[PricedSlot]) -> TierMap {
    if slots.is_empty() {
        return TierMap::default();
    }
    let segment_size = slots.len().div_ceil(PriceTier::ALL.len());
    slots
        .iter()
        .map(|slot| OrderedFloat(slot.value_inc_vat))
        .sorted()
        .enumerate()
        .map(|(rank, price)| (price, PriceTier::from_segment(rank / segment_size)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(prices: &[f64]) -> Vec<PricedSlot> {
        prices.iter().map(|price| PricedSlot::new("2024-01-01T00:00:00Z", *price)).collect()
    }

    #[test]
    fn test_empty() {
        assert!(classify(&[]).is_empty());
    }

    #[test]
    fn test_five_distinct_prices() {
        let slots = [
            PricedSlot::new("2024-01-01T00:00:00Z", 10.0),
            PricedSlot::new("2024-01-01T00:30:00Z", 20.0),
            PricedSlot::new("2024-01-01T01:00:00Z", 30.0),
            PricedSlot::new("2024-01-01T01:30:00Z", 40.0),
            PricedSlot::new("2024-01-01T02:00:00Z", 50.0),
        ];
        let tiers = classify(&slots);
        assert_eq!(tiers.len(), 5);
        assert_eq!(tiers.get(10.0), Some(PriceTier::Cheapest));
        assert_eq!(tiers.get(20.0), Some(PriceTier::Cheap));
        assert_eq!(tiers.get(30.0), Some(PriceTier::Mid));
        assert_eq!(tiers.get(40.0), Some(PriceTier::Expensive));
        assert_eq!(tiers.get(50.0), Some(PriceTier::Priciest));
    }

    #[test]
    fn test_input_order_is_irrelevant() {
        let tiers = classify(&slots(&[50.0, 10.0, 40.0, 20.0, 30.0]));
        assert_eq!(tiers.get(10.0), Some(PriceTier::Cheapest));
        assert_eq!(tiers.get(50.0), Some(PriceTier::Priciest));
    }

    #[test]
    fn test_fewer_than_five() {
        let tiers = classify(&slots(&[3.0, 1.0, 2.0]));
        assert_eq!(tiers.get(1.0), Some(PriceTier::Cheapest));
        assert_eq!(tiers.get(2.0), Some(PriceTier::Cheap));
        assert_eq!(tiers.get(3.0), Some(PriceTier::Mid));
    }

    #[test]
    fn test_uneven_segments() {
        // 12 slots, segment size 3, so four segments fill up and the priciest one stays empty:
        let prices = (1..=12).map(f64::from).collect::<Vec<_>>();
        let tiers = classify(&slots(&prices));
        assert_eq!(tiers.get(3.0), Some(PriceTier::Cheapest));
        assert_eq!(tiers.get(4.0), Some(PriceTier::Cheap));
        assert_eq!(tiers.get(12.0), Some(PriceTier::Expensive));
        assert_eq!(tiers.get(13.0), None);
    }

    #[test]
    fn test_duplicates_take_highest_rank() {
        // Ranks 0 and 1 share the price, segment size is 1:
        let tiers = classify(&slots(&[5.0, 5.0, 6.0, 7.0, 8.0]));
        assert_eq!(tiers.len(), 4);
        assert_eq!(tiers.get(5.0), Some(PriceTier::Cheap));
        assert_eq!(tiers.get(8.0), Some(PriceTier::Priciest));
    }

    #[test]
    fn test_tier_is_monotonic_in_price() {
        let prices = [13.2, 7.5, 22.1, 7.5, 30.0, 1.1, 19.9, 18.0, 25.5, 3.3, 11.0];
        let tiers = classify(&slots(&prices));
        let mut sorted = prices.to_vec();
        sorted.sort_by(f64::total_cmp);
        let assigned = sorted.iter().map(|price| tiers.get(*price).unwrap()).collect::<Vec<_>>();
        assert!(assigned.is_sorted());
    }
}
