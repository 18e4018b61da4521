use chrono::{DateTime, Days, NaiveTime, Timelike, Utc};
use itertools::Itertools;

use crate::{
    core::{
        classifier::{TierMap, classify},
        locale::Locale,
        slot::PricedSlot,
        tier::PriceTier,
    },
    prelude::*,
};

/// Day heading.
///
/// The variant order defines the heading order: today, tomorrow, then the rest sorted as strings.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, derive_more::Display)]
pub enum DateKey {
    #[display("Today")]
    Today,

    #[display("Tomorrow")]
    Tomorrow,

    /// Locale-formatted date.
    ///
    /// TODO: compare as calendar dates, string order breaks across months with `%d/%m/%Y`.
    #[display("{_0}")]
    Date(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisplayRow {
    /// Locale-formatted time of day.
    pub time: String,

    /// Price with one decimal.
    pub price: String,

    pub tier: PriceTier,
}

/// Rows grouped by day, each day ordered by time.
#[derive(Clone, Debug, Default, Eq, PartialEq, derive_more::Deref, derive_more::IntoIterator)]
#[must_use]
pub struct GroupedView(#[into_iterator(owned, ref)] Vec<(DateKey, Vec<DisplayRow>)>);

impl GroupedView {
    /// Classify the slots and group them relative to `now`.
    pub fn build(slots: &[PricedSlot], now: DateTime<Utc>, locale: &Locale) -> Result<Self> {
        group(slots, &classify(slots), now, locale)
    }

    #[cfg(test)]
    pub const fn from_rows(rows: Vec<(DateKey, Vec<DisplayRow>)>) -> Self {
        Self(rows)
    }

    pub fn n_rows(&self) -> usize {
        self.0.iter().map(|(_, rows)| rows.len()).sum()
    }
}

/// Group the slots by locale date, relative to the reference instant `now`.
#[instrument(skip_all, fields(n_slots = slots.len(), n_tiers = tiers.len()))]
pub fn group(
    slots: &[PricedSlot],
    tiers: &TierMap,
    now: DateTime<Utc>,
    locale: &Locale,
) -> Result<GroupedView> {
    let today = locale.naive(now).date();
    let tomorrow = today.checked_add_days(Days::new(1)).context("the date is out of range")?;
    let (today, tomorrow) = (locale.format_date(today), locale.format_date(tomorrow));

    let mut buckets = Vec::<(DateKey, Vec<(NaiveTime, DisplayRow)>)>::new();
    for slot in slots {
        let valid_from = locale.naive(slot.valid_from);
        let date = locale.format_date(valid_from.date());
        let key = if date == today {
            DateKey::Today
        } else if date == tomorrow {
            DateKey::Tomorrow
        } else {
            DateKey::Date(date)
        };
        let tier = tiers
            .get(slot.value_inc_vat)
            .with_context(|| format!("no tier for price {}", slot.value_inc_vat))?;
        let time = valid_from.time();
        let row = DisplayRow {
            time: locale.format_time(time),
            price: format!("{:.1}", slot.value_inc_vat),
            tier,
        };

        // Labels carry minutes only, so seconds must not affect the order:
        let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);

        match buckets.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, rows)) => rows.push((time, row)),
            None => buckets.push((key, vec![(time, row)])),
        }
    }

    let view = buckets
        .into_iter()
        .sorted_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs))
        .map(|(key, rows)| {
            let rows = rows
                .into_iter()
                .sorted_by_key(|(time, _)| *time)
                .map(|(_, row)| row)
                .collect_vec();
            (key, rows)
        })
        .collect_vec();
    debug!(n_days = view.len(), "grouped");
    Ok(GroupedView(view))
}
