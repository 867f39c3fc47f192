//! # Presenters
//!
//! The state/data logic behind the two screens. Presenters own a view (anything
//! implementing the traits in [`contract`]) and decide what it shows and when.
//!
//! ```text
//!   UI loop ──select/back──▶ CategoriesPresenter ──publish──▶ EventBus
//!      ▲                         │ spawn fetch                   │
//!      │                         ▼                               ▼
//!      └──── Action ◀──── tokio task              ListingsPresenter (subscribed)
//!                                                    │ spawn fetch
//!      ◀──── Action ◀──── tokio task ◀───────────────┘
//! ```
//!
//! ## Threading
//!
//! Presenters are only ever touched from one place: the UI loop (or a test standing in
//! for it). Fetches run on the tokio runtime and never touch a view; they report back by
//! sending an [`Action`] over an unbounded channel. The loop drains that channel and hands
//! each action to [`route`], which applies it on the UI side.
//!
//! Every action carries the [`Ticket`] of the request that produced it. A presenter applies
//! an action only if the ticket is still live in its scope and is the latest one it issued,
//! which is what makes teardown and last-selection-wins hold even for completions that
//! were already queued.

use log::warn;
use tokio::sync::mpsc::UnboundedSender;

use crate::core::category::Category;
use crate::core::listing::Listing;
use crate::core::scope::Ticket;
use crate::repository::RepositoryError;

pub mod categories;
pub mod contract;
pub mod listings;

pub use categories::{CategoriesPresenter, NavigatorState};
pub use contract::{BaseView, CategoriesView, ListingsView};
pub use listings::{ListingsPresenter, ListingsState};

/// Results of background work, marshalled back onto the UI loop.
#[derive(Debug)]
pub enum Action {
    CategoryTreeLoaded {
        ticket: Ticket,
        result: Result<Category, RepositoryError>,
    },
    /// A category selection delivered by the bus to the listings screen.
    CategorySelected { ticket: Ticket, category: Category },
    ListingsLoaded {
        ticket: Ticket,
        category_name: String,
        result: Result<Vec<Listing>, RepositoryError>,
    },
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::CategoryTreeLoaded { .. } => "CategoryTreeLoaded",
            Action::CategorySelected { .. } => "CategorySelected",
            Action::ListingsLoaded { .. } => "ListingsLoaded",
        }
    }
}

pub type ActionSender = UnboundedSender<Action>;

/// Sends `action` to the UI loop, logging if the loop has gone away.
pub(crate) fn send(actions: &ActionSender, action: Action) {
    if let Err(e) = actions.send(action) {
        warn!("Failed to deliver {}: receiver dropped", e.0.kind());
    }
}

/// Hands `action` to the presenter it belongs to.
pub fn route<C: CategoriesView, L: ListingsView>(
    action: Action,
    categories: &mut CategoriesPresenter<C>,
    listings: &mut ListingsPresenter<L>,
) {
    match action {
        Action::CategoryTreeLoaded { ticket, result } => {
            categories.on_category_tree(ticket, result);
        }
        Action::CategorySelected { ticket, category } => {
            listings.on_category_selected(ticket, category);
        }
        Action::ListingsLoaded {
            ticket,
            category_name,
            result,
        } => {
            listings.on_listings(ticket, &category_name, result);
        }
    }
}
