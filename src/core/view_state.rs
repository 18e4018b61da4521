use std::num::NonZeroU32;

use reqwest::Url;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    core::{provider::SlotSource, slot::PricedSlot},
    prelude::*,
};

/// Which slots the view requests.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum ViewSelector {
    #[default]
    All,
    Cheapest,
    CheapestTomorrow,
}

/// Number of cheapest slots to request.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, derive_more::Display, derive_more::FromStr)]
pub struct Count(NonZeroU32);

impl Default for Count {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Count {
    pub const DEFAULT: Self = Self(NonZeroU32::new(10).unwrap());

    pub const fn new(count: u32) -> Option<Self> {
        match NonZeroU32::new(count) {
            Some(count) => Some(Self(count)),
            None => None,
        }
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// The part of the view that lives in the navigable address.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
#[must_use]
pub struct ViewState {
    pub selector: ViewSelector,
    pub count: Count,
}

impl ViewState {
    pub const fn new(selector: ViewSelector, count: Count) -> Self {
        Self { selector, count }
    }

    /// Resolve the state from the address, falling back to defaults for anything unrecognised.
    ///
    /// Each parameter is resolved on its own, a malformed one does not affect the other.
    pub fn decode(address: &Url) -> Self {
        let mut state = Self::default();
        for (key, value) in address.query_pairs() {
            match key.as_ref() {
                Query::VIEW => {
                    state.selector = match value.as_ref() {
                        Query::CHEAPEST => ViewSelector::Cheapest,
                        Query::TOMORROW => ViewSelector::CheapestTomorrow,
                        _ => ViewSelector::All,
                    };
                }
                Query::COUNT => {
                    state.count = value
                        .parse()
                        .inspect_err(|_| debug!(%value, "ignoring invalid count"))
                        .unwrap_or_default();
                }
                _ => {}
            }
        }
        state
    }

    /// Replace the view parameters in the address, keeping any other query parameters.
    pub fn encode(self, address: &Url) -> Result<Url> {
        let preserved: Vec<(String, String)> = address
            .query_pairs()
            .filter(|(key, _)| !Query::KEYS.contains(&key.as_ref()))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        let mut address = address.clone();
        address.set_query(None);
        if !preserved.is_empty() {
            address.query_pairs_mut().extend_pairs(preserved);
        }
        let own = serde_qs::to_string(&Query::from(self)).context("failed to encode the view")?;
        if !own.is_empty() {
            let query = match address.query() {
                Some(preserved) => format!("{preserved}&{own}"),
                None => own,
            };
            address.set_query(Some(&query));
        }
        Ok(address)
    }

    pub fn title(self) -> String {
        match self.selector {
            ViewSelector::All => "All upcoming slots".to_owned(),
            ViewSelector::Cheapest => format!("{} cheapest upcoming slots", self.count),
            ViewSelector::CheapestTomorrow => {
                format!("{} cheapest slots for tomorrow only", self.count)
            }
        }
    }

    /// Call the source operation matching the selector.
    #[instrument(skip_all, fields(selector = ?self.selector, count = %self.count))]
    pub async fn fetch(self, source: &dyn SlotSource) -> Result<Vec<PricedSlot>> {
        let slots = match self.selector {
            ViewSelector::All => source.fetch_all().await?,
            ViewSelector::Cheapest => source.fetch_cheapest(self.count).await?,
            ViewSelector::CheapestTomorrow => source.fetch_cheapest_tomorrow(self.count).await?,
        };
        info!(n_slots = slots.len(), "fetched");
        Ok(slots)
    }
}

/// Canonical form on the way out, defaults are omitted.
#[serde_as]
#[derive(Serialize)]
struct Query {
    #[serde(skip_serializing_if = "Option::is_none")]
    view: Option<&'static str>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<Count>,
}

impl Query {
    const VIEW: &str = "view";
    const COUNT: &str = "count";
    const KEYS: [&str; 2] = [Self::VIEW, Self::COUNT];
    const CHEAPEST: &str = "cheapest";
    const TOMORROW: &str = "tomorrow";
}

impl From<ViewState> for Query {
    fn from(state: ViewState) -> Self {
        let view = match state.selector {
            ViewSelector::All => None,
            ViewSelector::Cheapest => Some(Self::CHEAPEST),
            ViewSelector::CheapestTomorrow => Some(Self::TOMORROW),
        };
        let count = (state.count != Count::DEFAULT).then_some(state.count);
        Self { view, count }
    }
}
