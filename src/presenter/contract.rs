//! Rendering surfaces the presenters drive.
//!
//! Every method is a fire-and-forget command: presenters decide *what* is shown and when,
//! views decide how. Methods take `&mut self` so a view can keep its own presentation state.

use crate::core::category::Category;
use crate::core::listing::Listing;

/// Commands shared by both screens.
pub trait BaseView {
    fn show_progress(&mut self);
    fn hide_progress(&mut self);
    fn show_network_error_message(&mut self);
    /// Close the screen. Terminal: nothing else is expected afterwards.
    fn finish(&mut self);
}

pub trait CategoriesView: BaseView {
    /// Replace the displayed categories.
    fn set_categories(&mut self, categories: &[Category]);
}

pub trait ListingsView: BaseView {
    fn set_listings(&mut self, listings: &[Listing]);
    /// Show the "nothing here" state, labelled with the category name.
    fn show_empty_screen(&mut self, label: &str);
    fn hide_empty_screen(&mut self);
    fn hide(&mut self);
    fn show(&mut self);
}
