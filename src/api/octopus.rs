//! [Octopus Energy](https://developer.octopus.energy/rest/reference) Agile unit rates client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    api::client,
    core::{cache::Cache, provider::SlotSource, selection, slot::PricedSlot, view_state::Count},
    prelude::*,
};

pub const DEFAULT_URL: &str = "https://api.octopus.energy/v1/products/AGILE-FLEX-22-11-25/electricity-tariffs/E-1R-AGILE-FLEX-22-11-25-C/standard-unit-rates/";

pub struct Api {
    client: Client,
    url: Url,
    cache: Mutex<Cache<Vec<PricedSlot>>>,
}

impl Api {
    pub fn try_new(url: Url, cache_ttl: Duration) -> Result<Self> {
        Ok(Self { client: client::try_new()?, url, cache: Mutex::new(Cache::new(cache_ttl)) })
    }

    /// Get the upcoming unit rates, from the cache when they are recent enough.
    ///
    /// Falls back to the expired copy when Octopus is unavailable.
    #[instrument(skip_all)]
    pub async fn get_upcoming_slots(&self) -> Result<Vec<PricedSlot>> {
        let mut cache = self.cache.lock().await;
        if let Some(slots) = cache.get_fresh(Instant::now()) {
            debug!(n_slots = slots.len(), "cache hit");
            return Ok(slots.clone());
        }
        match self.fetch_upcoming_slots().await {
            Ok(slots) => Ok(cache.put(Instant::now(), slots).clone()),
            Err(error) => match cache.get_stale() {
                Some(slots) => {
                    warn!("serving stale unit rates: {error:#}");
                    Ok(slots.clone())
                }
                None => Err(error),
            },
        }
    }

    async fn fetch_upcoming_slots(&self) -> Result<Vec<PricedSlot>> {
        let period_from = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        info!(%period_from, "fetching…");
        let slots = self
            .client
            .get(self.url.clone())
            .query(&[("period_from", &period_from)])
            .send()
            .await
            .context("failed to call")?
            .error_for_status()
            .context("request failed")?
            .json::<Response>()
            .await
            .context("failed to deserialize the response")?
            .results;
        info!(n_slots = slots.len(), "fetched");
        Ok(slots)
    }
}

#[async_trait]
impl SlotSource for Api {
    async fn fetch_all(&self) -> Result<Vec<PricedSlot>> {
        Ok(selection::all(&self.get_upcoming_slots().await?))
    }

    async fn fetch_cheapest(&self, count: Count) -> Result<Vec<PricedSlot>> {
        selection::cheapest(&self.get_upcoming_slots().await?, count)
    }

    async fn fetch_cheapest_tomorrow(&self, count: Count) -> Result<Vec<PricedSlot>> {
        selection::cheapest_tomorrow(&self.get_upcoming_slots().await?, count, Utc::now())
    }
}

#[derive(Deserialize)]
struct Response {
    results: Vec<PricedSlot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_response() -> Result {
        let response: Response = serde_json::from_str(
            r#"{
                "count": 2,
                "next": null,
                "previous": null,
                "results": [
                    {
                        "value_exc_vat": 10,
                        "value_inc_vat": 12,
                        "valid_from": "2023-04-01T00:00:00Z",
                        "valid_to": "2023-04-01T00:30:00Z",
                        "payment_method": null
                    },
                    {
                        "value_exc_vat": 15,
                        "value_inc_vat": 18,
                        "valid_from": "2023-04-01T00:30:00Z",
                        "valid_to": "2023-04-01T01:00:00Z",
                        "payment_method": null
                    }
                ]
            }"#,
        )?;
        assert_eq!(response.results.len(), 2);
        Ok(())
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_get_upcoming_slots_ok() -> Result {
        let api = Api::try_new(DEFAULT_URL.parse()?, Duration::from_secs(600))?;
        let slots = api.get_upcoming_slots().await?;
        assert!(!slots.is_empty());

        // Second call is served from the cache:
        assert_eq!(api.get_upcoming_slots().await?, slots);
        Ok(())
    }
}
