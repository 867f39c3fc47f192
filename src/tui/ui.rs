use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::tui::component::Component;
use crate::tui::components::{CategoryPane, ListingsPane, StatusBar};
use crate::tui::{Focus, TuiState};

const CATEGORY_HINTS: &str = "↑↓ move  ⏎ open  ← back  Tab listings  l hide listings  q quit";
const LISTINGS_HINTS: &str = "↑↓ move  ⏎ open listing  ← categories  l hide listings  q quit";

/// Status bar on top, categories on the left, listings on the right (when visible).
pub fn draw_ui(
    frame: &mut Frame,
    categories: &mut CategoryPane,
    listings: &mut ListingsPane,
    tui: &TuiState,
) {
    use Constraint::{Length, Min, Percentage};
    let [status_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    let hints = match tui.focus {
        Focus::Categories => CATEGORY_HINTS,
        Focus::Listings => LISTINGS_HINTS,
    };
    StatusBar::new(tui.breadcrumb.clone(), hints).render(frame, status_area);

    categories.focused = tui.focus == Focus::Categories;
    listings.focused = tui.focus == Focus::Listings;

    if listings.visible {
        let [left, right] =
            Layout::horizontal([Percentage(40), Percentage(60)]).areas(main_area);
        categories.render(frame, left);
        listings.render(frame, right);
    } else {
        categories.render(frame, main_area);
    }
}
