//! # CategoryPane Component
//!
//! Left-hand pane listing the categories the navigator put on screen.
//!
//! The pane is the navigator's view: the presenter pushes commands into it through
//! [`CategoriesView`], and the pane turns key presses into [`CategoryPaneEvent`]s for the
//! event loop to forward back. It holds no navigation logic of its own.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};

use crate::core::category::Category;
use crate::presenter::contract::{BaseView, CategoriesView};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Events emitted by the category pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryPaneEvent {
    Select(Category),
    Back,
}

#[derive(Default)]
pub struct CategoryPane {
    pub categories: Vec<Category>,
    pub selected: usize,
    pub list_state: ListState,
    pub loading: bool,
    pub network_error: bool,
    finished: bool,
    // Props, refreshed by the event loop every frame
    pub title: String,
    pub focused: bool,
}

impl CategoryPane {
    pub fn new() -> Self {
        Self {
            title: "Categories".to_string(),
            focused: true,
            ..Default::default()
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.categories.get(self.selected)
    }
}

impl BaseView for CategoryPane {
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

impl CategoriesView for CategoryPane {
    fn set_categories(&mut self, categories: &[Category]) {
        self.categories = categories.to_vec();
        self.selected = 0;
        self.list_state
            .select(if self.categories.is_empty() { None } else { Some(0) });
    }
}

impl EventHandler for CategoryPane {
    type Event = CategoryPaneEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<CategoryPaneEvent> {
        match event {
            TuiEvent::CursorUp => {
                if !self.categories.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.categories.is_empty() {
                    self.selected = (self.selected + 1).min(self.categories.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self.selected_category().cloned().map(CategoryPaneEvent::Select),
            TuiEvent::Back => Some(CategoryPaneEvent::Back),
            _ => None,
        }
    }
}

impl Component for CategoryPane {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(border_style);

        if self.loading {
            let text = Paragraph::new("Loading categories…").block(block);
            frame.render_widget(text, area);
            return;
        }
        if self.network_error && self.categories.is_empty() {
            let text = Paragraph::new("Couldn't load categories. Press r to retry.")
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(text, area);
            return;
        }

        let items: Vec<ListItem> = self
            .categories
            .iter()
            .map(|category| {
                let marker = if category.has_children() { " ›" } else { "" };
                ListItem::new(Line::from(vec![
                    Span::raw(category.name.clone()),
                    Span::styled(marker, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
