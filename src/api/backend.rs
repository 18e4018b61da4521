//! Client for the `octorates` backend API.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    api::client,
    core::{provider::SlotSource, slot::PricedSlot, view_state::Count},
    prelude::*,
};

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn try_new(base_url: Url) -> Result<Self> {
        ensure!(!base_url.cannot_be_a_base(), "`{base_url}` cannot be a base URL");
        Ok(Self { client: client::try_new()?, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    #[instrument(skip_all, fields(url = %url))]
    async fn get(&self, url: Url) -> Result<Vec<PricedSlot>> {
        info!("fetching…");
        let slots = self
            .client
            .get(url)
            .send()
            .await
            .context("failed to call")?
            .error_for_status()
            .context("request failed")?
            .json::<Vec<PricedSlot>>()
            .await
            .context("failed to deserialize the response")?;
        info!(n_slots = slots.len(), "fetched");
        Ok(slots)
    }
}

#[async_trait]
impl SlotSource for Api {
    async fn fetch_all(&self) -> Result<Vec<PricedSlot>> {
        self.get(self.endpoint(&["all_slots"])).await
    }

    async fn fetch_cheapest(&self, count: Count) -> Result<Vec<PricedSlot>> {
        self.get(self.endpoint(&["cheapest_slots", &count.to_string()])).await
    }

    async fn fetch_cheapest_tomorrow(&self, count: Count) -> Result<Vec<PricedSlot>> {
        self.get(self.endpoint(&["cheapest_slots_tomorrow", &count.to_string()])).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() -> Result {
        let api = Api::try_new("http://localhost:8000".parse()?)?;
        assert_eq!(
            api.endpoint(&["cheapest_slots", "12"]).as_str(),
            "http://localhost:8000/api/cheapest_slots/12"
        );
        Ok(())
    }

    #[test]
    fn test_endpoint_with_prefix() -> Result {
        let api = Api::try_new("https://example.com/octorates/".parse()?)?;
        assert_eq!(
            api.endpoint(&["all_slots"]).as_str(),
            "https://example.com/octorates/api/all_slots"
        );
        Ok(())
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(Api::try_new("mailto:someone@example.com".parse().unwrap()).is_err());
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_fetch_all_ok() -> Result {
        let slots = Api::try_new("http://localhost:8000".parse()?)?.fetch_all().await?;
        assert!(slots.iter().is_sorted_by_key(|slot| slot.valid_from));
        Ok(())
    }
}
