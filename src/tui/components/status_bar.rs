//! # StatusBar Component
//!
//! Single-line bar at the top: where the user is in the category tree and which keys do
//! what in the focused pane.
//!
//! Stateless: it receives everything as props and renders a plain `Span`, so it can be
//! rebuilt every frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct StatusBar {
    /// Category path, e.g. "Motors › Cars". Empty at the root.
    pub breadcrumb: String,
    /// Key hints for the focused pane.
    pub hints: &'static str,
}

impl StatusBar {
    pub fn new(breadcrumb: String, hints: &'static str) -> Self {
        Self { breadcrumb, hints }
    }

    fn text(&self) -> String {
        if self.breadcrumb.is_empty() {
            format!("marketnav | {}", self.hints)
        } else {
            format!("marketnav › {} | {}", self.breadcrumb, self.hints)
        }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_at_root() {
        let bar = StatusBar::new(String::new(), "q: quit");
        assert_eq!(bar.text(), "marketnav | q: quit");
    }

    #[test]
    fn test_text_with_breadcrumb() {
        let bar = StatusBar::new("Motors › Cars".into(), "q: quit");
        assert_eq!(bar.text(), "marketnav › Motors › Cars | q: quit");
    }
}
