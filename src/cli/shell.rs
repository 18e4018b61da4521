use chrono::Utc;
use reqwest::Url;

use crate::{
    core::{controller::Controller, grouper::GroupedView, locale::Locale, provider::SlotSource},
    prelude::*,
    tables::{build_api_table, build_view_table},
};

/// Fetch, classify and group for the controller's current state.
///
/// Returns `true` when the view got updated.
#[instrument(skip_all, fields(state = ?controller.state()))]
pub async fn refresh(controller: &mut Controller, source: &dyn SlotSource, locale: &Locale) -> bool {
    let (token, state) = controller.begin_request();
    let result = state
        .fetch(source)
        .await
        .and_then(|slots| GroupedView::build(&slots, Utc::now(), locale));
    controller.complete(token, state, result)
}

pub fn render(controller: &Controller, address: &Url) {
    println!("{}", controller.title());
    println!("{}", build_view_table(controller.view()));
    if controller.show_details() {
        println!("{}", build_api_table(controller.state().count));
    }
    println!("{address}");
}
