//! # Category Navigator
//!
//! Drives the category screen: fetches the tree once, walks down on selection, and walks
//! back up by rebuilding the parent from the current id.
//!
//! ```text
//!            setup()              tree ok
//!  Loading ─────────▶ (fetching) ─────────▶ Ready("")  ──select(x)──▶ Ready(x.id)
//!     ▲                    │ tree err            ▲                        │
//!     │                    ▼                     └────────back()──────────┘
//!     └──── setup() ──── Failed
//! ```
//!
//! Back navigation never goes to the network: the ancestor is looked up in the tree the
//! presenter already holds.

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::core::bus::{CategorySelected, EventBus};
use crate::core::category::{Category, ancestor_at, depth_of, find};
use crate::core::scope::{Scope, Ticket};
use crate::presenter::contract::CategoriesView;
use crate::presenter::{Action, ActionSender, send};
use crate::repository::{Repository, RepositoryError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorState {
    Loading,
    /// Tree loaded; holds the id of the category whose children are on screen.
    Ready(String),
    Failed,
}

pub struct CategoriesPresenter<V: CategoriesView> {
    view: V,
    repository: Arc<dyn Repository>,
    bus: EventBus<CategorySelected>,
    actions: ActionSender,
    scope: Scope,
    state: NavigatorState,
    tree: Option<Category>,
    pending: Option<Ticket>,
}

impl<V: CategoriesView> CategoriesPresenter<V> {
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
            state: NavigatorState::Loading,
            tree: None,
            pending: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    pub fn tree(&self) -> Option<&Category> {
        self.tree.as_ref()
    }

    /// Id of the category whose children are displayed; `""` for the root or before load.
    pub fn current_category_id(&self) -> &str {
        match &self.state {
            NavigatorState::Ready(id) => id,
            NavigatorState::Loading | NavigatorState::Failed => "",
        }
    }

    /// Requests the category tree. Calling it again (e.g. after a failure) supersedes any
    /// earlier request still in flight.
    pub fn setup(&mut self) {
        self.view.show_progress();
        self.state = NavigatorState::Loading;

        let ticket = self.scope.issue();
        self.pending = Some(ticket);

        let repository = Arc::clone(&self.repository);
        let actions = self.actions.clone();
        info!("Requesting category tree from {}", repository.name());
        self.scope.spawn(async move {
            let result = repository.category_tree().await;
            send(&actions, Action::CategoryTreeLoaded { ticket, result });
        });
    }

    /// Applies a finished tree fetch. Ignored unless it answers the latest live request.
    pub fn on_category_tree(&mut self, ticket: Ticket, result: Result<Category, RepositoryError>) {
        if !self.scope.is_live(ticket) || self.pending != Some(ticket) {
            debug!("Dropping stale category tree completion");
            return;
        }
        self.pending = None;
        self.view.hide_progress();

        match result {
            Ok(root) => {
                info!("Category tree loaded: {} top-level categories", root.children().len());
                self.view.set_categories(root.children());
                self.tree = Some(root);
                self.state = NavigatorState::Ready(String::new());
            }
            Err(e) => {
                error!("Failed to get categories: {}", e);
                self.view.show_network_error_message();
                self.state = NavigatorState::Failed;
            }
        }
    }

    /// Announces `category` on the bus, then descends into it if it has children.
    ///
    /// Leaves keep the current list on screen; the listings screen takes over from the bus
    /// message.
    ///
    /// # Panics
    ///
    /// If `category` has children but is not part of the loaded tree. Only categories taken
    /// from the tree may become the current one.
    pub fn select(&mut self, category: Category) {
        debug!("Category {:?} ({}) selected", category.id, category.name);
        self.bus.publish(CategorySelected(category.clone()));

        if !category.has_children() {
            return;
        }
        let Some(tree) = self.tree.as_ref() else {
            warn!("Ignoring navigation into {:?}: no category tree loaded", category.id);
            return;
        };
        if let Err(e) = find(tree, &category.id) {
            panic!("category {:?} is not in the category tree: {e}", category.id);
        }
        self.view.set_categories(category.children());
        self.state = NavigatorState::Ready(category.id);
    }

    /// Shows the parent of the current category, or finishes the screen at the root.
    ///
    /// # Panics
    ///
    /// If the current id does not resolve against the loaded tree. The id is always taken
    /// from that tree, so this means the navigation state is corrupt.
    pub fn back(&mut self) {
        let current = self.current_category_id().to_string();
        if current.is_empty() {
            info!("Back pressed at the root, finishing");
            self.view.finish();
            return;
        }

        let Some(tree) = self.tree.as_ref() else {
            unreachable!("navigator is at {current:?} without a category tree");
        };
        let ancestor = match ancestor_at(tree, &current, depth_of(&current) - 1) {
            Ok(ancestor) => ancestor.clone(),
            Err(e) => panic!("navigation state {current:?} is not in the category tree: {e}"),
        };
        debug!("Back from {:?} to {:?}", current, ancestor.id);
        self.select(ancestor);
    }

    /// Cancels anything in flight. No view command fires for work started before this.
    pub fn teardown(&mut self) {
        self.scope.clear();
        self.pending = None;
    }
}
