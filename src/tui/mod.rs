//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, renders the two panes, and turns key
//! presses into presenter calls.
//!
//! The panes are the presenters' views, so the loop reaches them through
//! `view_mut()` when drawing. Background fetches report back over an unbounded channel
//! that the loop drains once per iteration and hands to [`presenter::route`].
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only draws after a key press, a resize, or an action
//! from the channel. Between those it sleeps in `poll` for up to [`POLL_INTERVAL`].
//!
//! ## Focus
//!
//! One pane owns the cursor keys at a time. Tab swaps focus; selecting a leaf category
//! moves it to the listings; Back in the listings pane hands it back to the categories.
//! Hiding the listings pane (`l`) pauses its presenter, so selections made while it is
//! hidden are not fetched.

mod component;
mod components;
mod event;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};
use tokio::sync::mpsc::unbounded_channel;

use crate::core::bus::EventBus;
use crate::core::category::{Category, path_to};
use crate::core::config::ResolvedConfig;
use crate::presenter::{self, CategoriesPresenter, ListingsPresenter, ListingsView, NavigatorState};
use crate::repository::{Repository, TradeMeRepository};
use crate::tui::component::EventHandler;
use crate::tui::components::{CategoryPane, CategoryPaneEvent, ListingsPane, ListingsPaneEvent};
use crate::tui::event::{TuiEvent, poll_event_timeout};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Which pane receives cursor keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Categories,
    Listings,
}

/// TUI-specific presentation state (not part of the presenters)
pub struct TuiState {
    pub focus: Focus,
    /// Path to the category on screen, refreshed every frame.
    pub breadcrumb: String,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Categories,
            breadcrumb: String::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

type Categories = CategoriesPresenter<CategoryPane>;
type Listings = ListingsPresenter<ListingsPane>;

pub fn run(config: ResolvedConfig, initial_category: Option<String>) -> std::io::Result<()> {
    let repository: Arc<dyn Repository> = match TradeMeRepository::from_config(&config) {
        Ok(repository) => Arc::new(repository),
        Err(e) => {
            error!("Cannot start: {}", e);
            return Err(std::io::Error::other(e));
        }
    };
    info!("Using {} at {}", repository.name(), config.base_url);

    let bus = EventBus::new();
    let (tx, mut rx) = unbounded_channel();

    let mut categories = CategoriesPresenter::new(
        CategoryPane::new(),
        Arc::clone(&repository),
        bus.clone(),
        tx.clone(),
    );
    let mut listings = ListingsPresenter::new(ListingsPane::new(), repository, bus, tx);
    let mut tui = TuiState::new();

    categories.setup();
    listings.resume();
    if let Some(id) = initial_category {
        let initial = Category::new(id.clone(), id);
        listings.setup(Some(&initial));
    }

    let mut terminal = ratatui::init();
    let mut needs_redraw = true;

    let result = loop {
        if needs_redraw {
            refresh_props(&mut tui, &mut categories);
            if let Err(e) = terminal.draw(|f| {
                ui::draw_ui(f, categories.view_mut(), listings.view_mut(), &tui)
            }) {
                break Err(e);
            }
            needs_redraw = false;
        }

        match poll_event_timeout(POLL_INTERVAL) {
            Ok(Some(event)) => {
                needs_redraw = true;
                if handle_event(event, &mut tui, &mut categories, &mut listings) {
                    break Ok(());
                }
            }
            Ok(None) => {}
            Err(e) => break Err(e),
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received {}", action.kind());
            presenter::route(action, &mut categories, &mut listings);
        }

        if categories.view().is_finished() || listings.view().is_finished() {
            info!("Screen finished");
            break Ok(());
        }
    };

    categories.teardown();
    listings.teardown();
    ratatui::restore();
    result
}

/// Applies one input event. Returns `true` when the app should quit.
fn handle_event(
    event: TuiEvent,
    tui: &mut TuiState,
    categories: &mut Categories,
    listings: &mut Listings,
) -> bool {
    match event {
        TuiEvent::ForceQuit | TuiEvent::Quit => return true,
        TuiEvent::Resize => {}
        TuiEvent::SwitchFocus => {
            if listings.view().visible {
                tui.focus = match tui.focus {
                    Focus::Categories => Focus::Listings,
                    Focus::Listings => Focus::Categories,
                };
            }
        }
        TuiEvent::ToggleListings => toggle_listings(tui, listings),
        TuiEvent::Retry => {
            if *categories.state() == NavigatorState::Failed {
                info!("Retrying category tree");
                categories.setup();
            }
        }
        TuiEvent::Back if tui.focus == Focus::Listings => tui.focus = Focus::Categories,
        _ => match tui.focus {
            Focus::Categories => {
                if let Some(pane_event) = categories.view_mut().handle_event(&event) {
                    match pane_event {
                        CategoryPaneEvent::Select(category) => {
                            let leaf = !category.has_children();
                            categories.select(category);
                            if leaf && listings.view().visible {
                                tui.focus = Focus::Listings;
                            }
                        }
                        CategoryPaneEvent::Back => categories.back(),
                    }
                }
            }
            Focus::Listings => {
                if let Some(ListingsPaneEvent::Clicked(id)) =
                    listings.view_mut().handle_event(&event)
                {
                    listings.on_listing_clicked(&id);
                }
            }
        },
    }
    false
}

/// Hides and pauses the listings screen, or shows and resumes it.
fn toggle_listings(tui: &mut TuiState, listings: &mut Listings) {
    if listings.view().visible {
        debug!("Backgrounding listings");
        listings.view_mut().hide();
        listings.pause();
        tui.focus = Focus::Categories;
    } else {
        debug!("Foregrounding listings");
        listings.view_mut().show();
        listings.resume();
    }
}

/// Syncs breadcrumb and pane title with the navigator before drawing.
fn refresh_props(tui: &mut TuiState, categories: &mut Categories) {
    let names = path_names(categories.tree(), categories.current_category_id());
    tui.breadcrumb = names.join(" › ");
    categories.view_mut().title = names
        .last()
        .cloned()
        .unwrap_or_else(|| "Categories".to_string());
}

/// Names on the path to `id`, root excluded.
fn path_names(tree: Option<&Category>, id: &str) -> Vec<String> {
    let Some(tree) = tree else {
        return Vec::new();
    };
    match path_to(tree, id) {
        Ok(path) => path.iter().skip(1).map(|c| c.name.clone()).collect(),
        Err(e) => {
            debug!("Cannot build breadcrumb for {:?}: {}", id, e);
            Vec::new()
        }
    }
}
