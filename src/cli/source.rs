use clap::Parser;
use reqwest::Url;

use crate::{
    api::{backend, octopus},
    core::provider::{Provider, SlotSource},
    prelude::*,
};

#[derive(Parser)]
pub struct SourceArgs {
    #[clap(long, env = "PROVIDER", default_value = "backend")]
    provider: Provider,

    /// Backend base URL.
    #[clap(long, env = "BACKEND_URL", default_value = "http://localhost:8000/")]
    backend_url: Url,

    /// Octopus Agile standard unit rates endpoint.
    #[clap(long, env = "OCTOPUS_URL", default_value = octopus::DEFAULT_URL)]
    octopus_url: Url,

    /// How long to reuse the Octopus response for.
    #[clap(long, env = "CACHE_TTL", default_value = "10min")]
    cache_ttl: humantime::Duration,
}

impl SourceArgs {
    pub fn connect(&self) -> Result<Box<dyn SlotSource>> {
        info!(provider = ?self.provider, "connecting…");
        match self.provider {
            Provider::Backend => Ok(Box::new(backend::Api::try_new(self.backend_url.clone())?)),
            Provider::Octopus => Ok(Box::new(octopus::Api::try_new(
                self.octopus_url.clone(),
                self.cache_ttl.into(),
            )?)),
        }
    }
}
