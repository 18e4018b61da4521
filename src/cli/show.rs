use clap::Parser;
use reqwest::Url;

use crate::{
    cli::{locale::LocaleArgs, shell, source::SourceArgs},
    core::{
        controller::Controller,
        locale::Locale,
        provider::SlotSource,
        view_state::ViewState,
    },
    prelude::*,
};

#[derive(Parser)]
pub struct ShowArgs {
    /// Address with the `view` and `count` query parameters.
    #[clap(long, env = "ADDRESS", default_value = "http://localhost:8000/")]
    address: Url,

    /// Also list the backend endpoints.
    #[clap(long)]
    details: bool,

    #[clap(flatten)]
    source: SourceArgs,

    #[clap(flatten)]
    locale: LocaleArgs,
}

impl ShowArgs {
    #[instrument(skip_all, fields(address = %self.address))]
    pub async fn run(self) -> Result {
        let source = self.source.connect()?;
        let mut controller = Controller::new(ViewState::decode(&self.address));
        if self.details {
            controller.toggle_details();
        }
        let address = show(&mut controller, &*source, &self.locale.locale(), &self.address).await?;
        shell::render(&controller, &address);
        Ok(())
    }
}

/// Fetch the view once and return its canonical address.
async fn show(
    controller: &mut Controller,
    source: &dyn SlotSource,
    locale: &Locale,
    address: &Url,
) -> Result<Url> {
    if !shell::refresh(controller, source, locale).await {
        bail!("failed to fetch {}", controller.state().title().to_lowercase());
    }
    controller.state().encode(address)
}
