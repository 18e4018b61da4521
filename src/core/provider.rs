use async_trait::async_trait;

use crate::{
    core::{slot::PricedSlot, view_state::Count},
    prelude::*,
};

/// Where the priced slots come from.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, clap::ValueEnum)]
pub enum Provider {
    /// The `octorates` backend API.
    Backend,

    /// [Octopus Energy](https://developer.octopus.energy/rest/reference) directly,
    /// selecting the cheapest slots locally.
    Octopus,
}

#[async_trait]
pub trait SlotSource: Sync {
    /// All upcoming slots, chronologically.
    async fn fetch_all(&self) -> Result<Vec<PricedSlot>>;

    /// The `count` cheapest upcoming slots, chronologically.
    async fn fetch_cheapest(&self, count: Count) -> Result<Vec<PricedSlot>>;

    /// The `count` cheapest slots of tomorrow, chronologically.
    async fn fetch_cheapest_tomorrow(&self, count: Count) -> Result<Vec<PricedSlot>>;
}
