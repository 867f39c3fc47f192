//! # ListingsPane Component
//!
//! Right-hand pane showing listings for the last selected category, or the empty/error
//! state the listings presenter asked for. It can be hidden; the event loop pauses the
//! presenter while it is.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};

use crate::core::listing::Listing;
use crate::presenter::contract::{BaseView, ListingsView};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingsPaneEvent {
    Clicked(String),
}

pub struct ListingsPane {
    pub listings: Vec<Listing>,
    pub selected: usize,
    pub list_state: ListState,
    pub loading: bool,
    pub network_error: bool,
    /// `Some(label)` while the empty state is up.
    pub empty_label: Option<String>,
    pub visible: bool,
    finished: bool,
    pub focused: bool,
}

impl Default for ListingsPane {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingsPane {
    pub fn new() -> Self {
        Self {
            listings: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
            loading: false,
            network_error: false,
            empty_label: None,
            visible: true,
            finished: false,
            focused: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Text shown instead of the list, if any. Progress beats errors beats the empty state.
    fn placeholder(&self) -> Option<(String, Style)> {
        if self.loading {
            return Some(("Loading listings…".to_string(), Style::default()));
        }
        if self.network_error {
            return Some((
                "Network error: couldn't load listings.".to_string(),
                Style::default().fg(Color::Red),
            ));
        }
        if let Some(label) = &self.empty_label {
            let text = if label.is_empty() {
                "No listings.".to_string()
            } else {
                format!("No listings in {label}.")
            };
            return Some((text, Style::default().fg(Color::DarkGray)));
        }
        if self.listings.is_empty() {
            return Some((
                "Select a category to see its listings.".to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        None
    }
}

impl BaseView for ListingsPane {
    fn show_progress(&mut self) {
        self.loading = true;
        self.network_error = false;
    }

    fn hide_progress(&mut self) {
        self.loading = false;
    }

    fn show_network_error_message(&mut self) {
        self.network_error = true;
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

impl ListingsView for ListingsPane {
    fn set_listings(&mut self, listings: &[Listing]) {
        self.listings = listings.to_vec();
        self.selected = 0;
        self.list_state
            .select(if self.listings.is_empty() { None } else { Some(0) });
    }

    fn show_empty_screen(&mut self, label: &str) {
        self.empty_label = Some(label.to_string());
        self.listings.clear();
        self.list_state.select(None);
    }

    fn hide_empty_screen(&mut self) {
        self.empty_label = None;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn show(&mut self) {
        self.visible = true;
    }
}

impl EventHandler for ListingsPane {
    type Event = ListingsPaneEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListingsPaneEvent> {
        match event {
            TuiEvent::CursorUp => {
                if !self.listings.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.listings.is_empty() {
                    self.selected = (self.selected + 1).min(self.listings.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .listings
                .get(self.selected)
                .map(|listing| ListingsPaneEvent::Clicked(listing.id.clone())),
            _ => None,
        }
    }
}

impl Component for ListingsPane {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let block = Block::bordered()
            .title(" Listings ")
            .border_style(border_style);

        if let Some((text, style)) = self.placeholder() {
            let paragraph = Paragraph::new(text)
                .style(style)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self
            .listings
            .iter()
            .map(|listing| ListItem::new(listing.summary()))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
