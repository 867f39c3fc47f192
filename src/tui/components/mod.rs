//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `StatusBar`: top line with the category breadcrumb and key hints
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `CategoryPane`: the navigator's view; emits selections and back presses
//! - `ListingsPane`: the listings presenter's view; emits listing clicks
//!
//! The two panes double as presenter views: presenters push commands into them through
//! the traits in `presenter::contract`, the event loop reads them back to render.

pub mod category_pane;
pub mod listings_pane;
mod status_bar;

pub use category_pane::{CategoryPane, CategoryPaneEvent};
pub use listings_pane::{ListingsPane, ListingsPaneEvent};
pub use status_bar::StatusBar;
