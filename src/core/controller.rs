use crate::{
    core::{
        grouper::GroupedView,
        view_state::{Count, ViewSelector, ViewState},
    },
    prelude::*,
};

/// User action or navigation, applied to the view state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ViewEvent {
    ShowAll,
    ShowCheapest,
    ShowCheapestTomorrow,
    SetCount(Count),

    /// Back or forward navigation to an address with the decoded state.
    Navigated(ViewState),
}

impl ViewState {
    pub const fn apply(self, event: ViewEvent) -> Self {
        match event {
            ViewEvent::ShowAll => Self { selector: ViewSelector::All, ..self },
            ViewEvent::ShowCheapest => Self { selector: ViewSelector::Cheapest, ..self },
            ViewEvent::ShowCheapestTomorrow => {
                Self { selector: ViewSelector::CheapestTomorrow, ..self }
            }
            ViewEvent::SetCount(count) => Self { count, ..self },
            ViewEvent::Navigated(state) => state,
        }
    }
}

/// Identifies a fetch, later requests supersede earlier ones.
#[derive(Copy, Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
#[must_use]
pub struct RequestToken(u64);

/// View controller state.
#[derive(Default)]
pub struct Controller {
    state: ViewState,
    view: GroupedView,
    title: String,
    show_details: bool,
    latest_request: RequestToken,
}

impl Controller {
    pub fn new(state: ViewState) -> Self {
        Self { state, ..Self::default() }
    }

    pub const fn state(&self) -> ViewState {
        self.state
    }

    pub const fn view(&self) -> &GroupedView {
        &self.view
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn show_details(&self) -> bool {
        self.show_details
    }

    pub const fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    pub fn apply(&mut self, event: ViewEvent) {
        self.state = self.state.apply(event);
        debug!(?event, state = ?self.state, "applied");
    }

    /// Start a fetch for the current state.
    pub const fn begin_request(&mut self) -> (RequestToken, ViewState) {
        self.latest_request = RequestToken(self.latest_request.0 + 1);
        (self.latest_request, self.state)
    }

    /// Apply the outcome of a fetch.
    ///
    /// Returns `true` when the view got updated. Failures and superseded requests leave the
    /// previous view in place.
    pub fn complete(
        &mut self,
        token: RequestToken,
        state: ViewState,
        result: Result<GroupedView>,
    ) -> bool {
        if token != self.latest_request {
            debug!(?token, latest = ?self.latest_request, "discarding a superseded response");
            return false;
        }
        match result {
            Ok(view) => {
                info!(n_days = view.len(), n_rows = view.n_rows(), "updated the view");
                self.view = view;
                self.title = state.title();
                true
            }
            Err(error) => {
                warn!("keeping the previous view: {error:#}");
                false
            }
        }
    }
}
