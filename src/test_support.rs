//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::category::Category;
use crate::core::listing::Listing;
use crate::presenter::contract::{BaseView, CategoriesView, ListingsView};
use crate::repository::{Repository, RepositoryError};

/// A small tree with leaves at depth 1 and 3:
///
/// ```text
/// "" Root
/// ├── "0001-" Motors
/// │   ├── "0001-0268-" Cars
/// │   │   ├── "0001-0268-3001-" Toyota
/// │   │   └── "0001-0268-3002-" Honda
/// │   └── "0001-0100-" Boats
/// └── "0002-" Books
/// ```
pub fn sample_tree() -> Category {
    Category::new("", "Root").with_children(vec![
        Category::new("0001-", "Motors").with_children(vec![
            Category::new("0001-0268-", "Cars").with_children(vec![
                Category::new("0001-0268-3001-", "Toyota"),
                Category::new("0001-0268-3002-", "Honda"),
            ]),
            Category::new("0001-0100-", "Boats"),
        ]),
        Category::new("0002-", "Books"),
    ])
}

/// In-memory repository with canned answers and call tracking.
pub struct StubRepository {
    tree: Mutex<Result<Category, RepositoryError>>,
    listings: HashMap<String, Result<Vec<Listing>, RepositoryError>>,
    tree_calls: AtomicUsize,
    listing_calls: Mutex<Vec<String>>,
}

impl StubRepository {
    pub fn new(tree: Category) -> Self {
        Self {
            tree: Mutex::new(Ok(tree)),
            listings: HashMap::new(),
            tree_calls: AtomicUsize::new(0),
            listing_calls: Mutex::new(Vec::new()),
        }
    }

    /// A repository whose tree fetch fails with a network error.
    pub fn failing() -> Self {
        let stub = Self::new(Category::default());
        stub.set_tree(Err(RepositoryError::Network("connection refused".into())));
        stub
    }

    /// Categories without an entry answer with no listings.
    pub fn with_listings(
        mut self,
        category_id: &str,
        result: Result<Vec<Listing>, RepositoryError>,
    ) -> Self {
        self.listings.insert(category_id.to_string(), result);
        self
    }

    pub fn set_tree(&self, tree: Result<Category, RepositoryError>) {
        *self.tree.lock().unwrap() = tree;
    }

    pub fn tree_calls(&self) -> usize {
        self.tree_calls.load(Ordering::SeqCst)
    }

    pub fn listing_calls(&self) -> Vec<String> {
        self.listing_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Repository for StubRepository {
    fn name(&self) -> &str {
        "stub"
    }

    async fn category_tree(&self) -> Result<Category, RepositoryError> {
        self.tree_calls.fetch_add(1, Ordering::SeqCst);
        self.tree.lock().unwrap().clone()
    }

    async fn listings(&self, category_id: &str) -> Result<Vec<Listing>, RepositoryError> {
        self.listing_calls
            .lock()
            .unwrap()
            .push(category_id.to_string());
        self.listings
            .get(category_id)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Everything a presenter asked a view to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    ShowProgress,
    HideProgress,
    NetworkError,
    Finish,
    /// Ids of the categories set.
    SetCategories(Vec<String>),
    /// Ids of the listings set.
    SetListings(Vec<String>),
    ShowEmpty(String),
    HideEmpty,
    Hide,
    Show,
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub commands: Vec<ViewCommand>,
}

impl RecordingView {
    /// Returns and forgets everything recorded so far.
    pub fn take(&mut self) -> Vec<ViewCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl BaseView for RecordingView {
    fn show_progress(&mut self) {
        self.commands.push(ViewCommand::ShowProgress);
    }

    fn hide_progress(&mut self) {
        self.commands.push(ViewCommand::HideProgress);
    }

    fn show_network_error_message(&mut self) {
        self.commands.push(ViewCommand::NetworkError);
    }

    fn finish(&mut self) {
        self.commands.push(ViewCommand::Finish);
    }
}

impl CategoriesView for RecordingView {
    fn set_categories(&mut self, categories: &[Category]) {
        self.commands.push(ViewCommand::SetCategories(
            categories.iter().map(|c| c.id.clone()).collect(),
        ));
    }
}

impl ListingsView for RecordingView {
    fn set_listings(&mut self, listings: &[Listing]) {
        self.commands.push(ViewCommand::SetListings(
            listings.iter().map(|l| l.id.clone()).collect(),
        ));
    }

    fn show_empty_screen(&mut self, label: &str) {
        self.commands.push(ViewCommand::ShowEmpty(label.to_string()));
    }

    fn hide_empty_screen(&mut self) {
        self.commands.push(ViewCommand::HideEmpty);
    }

    fn hide(&mut self) {
        self.commands.push(ViewCommand::Hide);
    }

    fn show(&mut self) {
        self.commands.push(ViewCommand::Show);
    }
}
