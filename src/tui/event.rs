use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    ForceQuit, // Ctrl+C
    Quit,
    CursorUp,
    CursorDown,
    Submit,
    Back,
    SwitchFocus,    // Tab
    ToggleListings, // 'l' - backgrounds/foregrounds the listings pane
    Retry,
    Resize,
}

/// Poll for an event, waiting at most `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> std::io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(match event::read()? {
        Event::Key(key_event) => map_key(key_event),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    })
}

pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Terminals with keyboard enhancement also report releases
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Enter) | (_, KeyCode::Right) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) | (_, KeyCode::Backspace) | (_, KeyCode::Left) => Some(TuiEvent::Back),
        (_, KeyCode::Tab) => Some(TuiEvent::SwitchFocus),
        (_, KeyCode::Char('l')) => Some(TuiEvent::ToggleListings),
        (_, KeyCode::Char('r')) => Some(TuiEvent::Retry),
        _ => None,
    }
}
