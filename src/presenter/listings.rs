//! # Listings Coordinator
//!
//! Drives the listings screen. It never talks to the category screen directly: while in
//! the foreground it listens on the bus for [`CategorySelected`] and fetches listings for
//! whatever was picked last.
//!
//! ```text
//!  Idle ──fetch──▶ Loading(id) ──ok, empty──▶ ShowingEmpty
//!                      │      ──ok────────▶ ShowingResults
//!                      │      ──err───────▶ Failed
//!                      └── newer fetch: older completion is discarded
//! ```

use std::sync::Arc;

use log::{debug, error, info};

use crate::core::bus::{CategorySelected, EventBus};
use crate::core::category::Category;
use crate::core::listing::Listing;
use crate::core::scope::{Scope, Ticket};
use crate::presenter::contract::ListingsView;
use crate::presenter::{Action, ActionSender, send};
use crate::repository::{Repository, RepositoryError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingsState {
    Idle,
    /// Waiting on listings for this category id.
    Loading(String),
    ShowingResults,
    ShowingEmpty,
    Failed,
}

pub struct ListingsPresenter<V: ListingsView> {
    view: V,
    repository: Arc<dyn Repository>,
    bus: EventBus<CategorySelected>,
    actions: ActionSender,
    scope: Scope,
    state: ListingsState,
    /// Latest listings request; older completions are dropped.
    pending: Option<Ticket>,
    /// Ticket stamped on selections forwarded from the current bus subscription.
    subscription: Option<Ticket>,
}

impl<V: ListingsView> ListingsPresenter<V> {
    pub fn new(
        view: V,
        repository: Arc<dyn Repository>,
        bus: EventBus<CategorySelected>,
        actions: ActionSender,
    ) -> Self {
        Self {
            view,
            repository,
            bus,
            actions,
            scope: Scope::new(),
            state: ListingsState::Idle,
            pending: None,
            subscription: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn state(&self) -> &ListingsState {
        &self.state
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Loads listings for the initial selection. A missing category means id `""`.
    pub fn setup(&mut self, category: Option<&Category>) {
        let (id, name) = category
            .map(|c| (c.id.clone(), c.name.clone()))
            .unwrap_or_default();
        self.fetch(id, name);
    }

    /// Screen came to the foreground: start following category selections.
    pub fn resume(&mut self) {
        if self.subscription.is_some() {
            debug!("Listings already subscribed to category selections");
            return;
        }

        let (guard, mut receiver) = self.bus.subscribe().into_parts();
        self.scope.add(guard);

        let ticket = self.scope.issue();
        self.subscription = Some(ticket);

        let actions = self.actions.clone();
        self.scope.spawn(async move {
            while let Some(CategorySelected(category)) = receiver.recv().await {
                send(&actions, Action::CategorySelected { ticket, category });
            }
        });
    }

    /// Screen went to the background: stop following selections and drop pending results.
    ///
    /// A fetch cut short here takes its progress indicator with it and the screen goes
    /// back to `Idle`; the next selection after `resume()` fetches again.
    pub fn pause(&mut self) {
        if self.cancel_all() {
            debug!("Abandoning listings request for {:?}", self.state);
            self.view.hide_progress();
            self.state = ListingsState::Idle;
        }
    }

    /// Screen is going away: cancel everything without touching the view.
    pub fn teardown(&mut self) {
        self.cancel_all();
    }

    /// Returns whether a listings request was still pending.
    fn cancel_all(&mut self) -> bool {
        self.scope.clear();
        self.subscription = None;
        self.pending.take().is_some()
    }

    /// Applies a selection forwarded from the bus.
    pub fn on_category_selected(&mut self, ticket: Ticket, category: Category) {
        if !self.scope.is_live(ticket) || self.subscription != Some(ticket) {
            debug!("Dropping selection of {:?} from a cancelled subscription", category.id);
            return;
        }
        self.fetch(category.id, category.name);
    }

    /// Applies a finished listings fetch. Ignored unless it answers the latest live request.
    pub fn on_listings(
        &mut self,
        ticket: Ticket,
        category_name: &str,
        result: Result<Vec<Listing>, RepositoryError>,
    ) {
        if !self.scope.is_live(ticket) || self.pending != Some(ticket) {
            debug!("Dropping stale listings for {:?}", category_name);
            return;
        }
        self.pending = None;
        self.view.hide_progress();

        match result {
            Ok(listings) if listings.is_empty() => {
                info!("No listings in {:?}", category_name);
                self.view.show_empty_screen(category_name);
                self.state = ListingsState::ShowingEmpty;
            }
            Ok(listings) => {
                info!("{} listing(s) in {:?}", listings.len(), category_name);
                self.view.hide_empty_screen();
                self.view.set_listings(&listings);
                self.state = ListingsState::ShowingResults;
            }
            Err(e) => {
                error!("Failed to get listings for {:?}: {}", category_name, e);
                self.view.show_network_error_message();
                self.state = ListingsState::Failed;
            }
        }
    }

    /// Listing details are not part of this flow yet; clicks are logged and otherwise
    /// ignored.
    pub fn on_listing_clicked(&mut self, listing_id: &str) {
        info!("Listing {} clicked; no detail view to open", listing_id);
    }

    fn fetch(&mut self, category_id: String, category_name: String) {
        self.view.show_progress();
        self.state = ListingsState::Loading(category_id.clone());

        let ticket = self.scope.issue();
        self.pending = Some(ticket);

        let repository = Arc::clone(&self.repository);
        let actions = self.actions.clone();
        debug!("Requesting listings for {:?} from {}", category_id, repository.name());
        self.scope.spawn(async move {
            let result = repository.listings(&category_id).await;
            send(
                &actions,
                Action::ListingsLoaded {
                    ticket,
                    category_name,
                    result,
                },
            );
        });
    }
}
