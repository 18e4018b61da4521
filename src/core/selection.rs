//! Server-side slot subsets used when talking to Octopus directly.

use std::ops::RangeInclusive;

use chrono::{DateTime, Days, NaiveTime, Utc};
use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::{
    core::{slot::PricedSlot, view_state::Count},
    prelude::*,
};

/// A day's worth of half-hourly slots.
pub const ALLOWED_COUNTS: RangeInclusive<u32> = 1..=48;

/// All slots, chronologically.
pub fn all(slots: &[PricedSlot]) -> Vec<PricedSlot> {
    slots.iter().sorted_by_key(|slot| slot.valid_from).cloned().collect()
}

/// The `count` cheapest slots, chronologically.
pub fn cheapest(slots: &[PricedSlot], count: Count) -> Result<Vec<PricedSlot>> {
    ensure!(
        ALLOWED_COUNTS.contains(&count.get()),
        "count must be between {} and {}",
        ALLOWED_COUNTS.start(),
        ALLOWED_COUNTS.end(),
    );
    let count = usize::try_from(count.get())?;
    Ok(slots
        .iter()
        .sorted_by_key(|slot| OrderedFloat(slot.value_inc_vat))
        .take(count)
        .sorted_by_key(|slot| slot.valid_from)
        .cloned()
        .collect())
}

/// The `count` cheapest slots of the next UTC day, chronologically.
pub fn cheapest_tomorrow(
    slots: &[PricedSlot],
    count: Count,
    now: DateTime<Utc>,
) -> Result<Vec<PricedSlot>> {
    let tomorrow = now.date_naive().checked_add_days(Days::new(1)).context("out of range")?;
    let start = tomorrow.and_time(NaiveTime::MIN).and_utc();
    let end = start.checked_add_days(Days::new(1)).context("out of range")?;
    let slots = slots
        .iter()
        .filter(|slot| (start..end).contains(&slot.valid_from))
        .cloned()
        .collect_vec();
    cheapest(&slots, count)
}
