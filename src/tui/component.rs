use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into a region of the screen.
///
/// Panes keep their list selection between frames, so `render` takes `&mut self` and
/// may update a `ListState` while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to key presses.
pub trait EventHandler {
    /// What the component reports back to the event loop (a selection, a click).
    type Event;

    /// Consumes a low-level `TuiEvent`. Cursor movement is handled internally and
    /// returns `None`; anything the presenters must act on comes back as `Some`.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
