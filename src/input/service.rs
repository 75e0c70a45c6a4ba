//! High-level input service.
//!
//! Polls crossterm for terminal events, maps keys to picker actions and forwards
//! them from a dedicated thread to the render loop.

use crate::error::{PickerError, Result};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Domain-level actions understood by the settings surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    CursorUp,
    CursorDown,
    CursorFirst,
    CursorLast,
    /// Open the picker from the summary, or select the row under the cursor
    Activate,
    /// Leave the picker
    Back,
    Quit,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
}

/// Map a key press to an action. Releases and repeats are ignored.
pub fn map_key_event(key_event: KeyEvent) -> InputAction {
    if key_event.kind != KeyEventKind::Press {
        return InputAction::NoAction;
    }

    let plain = !key_event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Quit
        }
        KeyCode::Char('q') if plain => InputAction::Quit,
        KeyCode::Char('j') if plain => InputAction::CursorDown,
        KeyCode::Down => InputAction::CursorDown,
        KeyCode::Char('k') if plain => InputAction::CursorUp,
        KeyCode::Up => InputAction::CursorUp,
        KeyCode::Char('g') if plain => InputAction::CursorFirst,
        KeyCode::Home => InputAction::CursorFirst,
        KeyCode::Char('G') if plain => InputAction::CursorLast,
        KeyCode::End => InputAction::CursorLast,
        KeyCode::Enter => InputAction::Activate,
        KeyCode::Char(' ') if plain => InputAction::Activate,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => InputAction::Back,
        KeyCode::Char('h') if plain => InputAction::Back,
        _ => InputAction::NoAction,
    }
}

/// Translate one terminal event; `None` for events the picker ignores
pub fn map_event(event: Event) -> Option<InputAction> {
    let action = match event {
        Event::Key(key_event) => map_key_event(key_event),
        Event::Resize(width, height) => InputAction::Resize { width, height },
        _ => InputAction::NoAction,
    };

    match action {
        InputAction::NoAction => None,
        action => Some(action),
    }
}

/// Service responsible for producing `InputAction`s from terminal events.
#[derive(Debug, Default)]
pub struct InputService;

impl InputService {
    pub fn new() -> Self {
        Self
    }

    pub fn poll_action(&mut self, timeout: Option<Duration>) -> Result<Option<InputAction>> {
        let timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        let ready = event::poll(timeout)
            .map_err(|err| PickerError::ui(format!("failed to poll terminal: {err}")))?;
        if !ready {
            return Ok(None);
        }

        let event =
            event::read().map_err(|err| PickerError::ui(format!("failed to read event: {err}")))?;
        Ok(map_event(event))
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the render loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_action(Some(poll_interval)) {
                Ok(Some(action)) => {
                    if tx.send(action).is_err() {
                        return;
                    }
                }
                Ok(None) => continue,
                Err(err) => {
                    log::error!("Input thread error: {err}");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn navigation_keys_move_cursor() {
        assert_eq!(map_event(key(KeyCode::Char('j'))), Some(InputAction::CursorDown));
        assert_eq!(map_event(key(KeyCode::Down)), Some(InputAction::CursorDown));
        assert_eq!(map_event(key(KeyCode::Char('k'))), Some(InputAction::CursorUp));
        assert_eq!(map_event(key(KeyCode::Home)), Some(InputAction::CursorFirst));
        assert_eq!(map_event(key(KeyCode::End)), Some(InputAction::CursorLast));
    }

    #[test]
    fn activation_and_exit_keys() {
        assert_eq!(map_event(key(KeyCode::Enter)), Some(InputAction::Activate));
        assert_eq!(map_event(key(KeyCode::Char(' '))), Some(InputAction::Activate));
        assert_eq!(map_event(key(KeyCode::Esc)), Some(InputAction::Back));
        assert_eq!(map_event(key(KeyCode::Char('q'))), Some(InputAction::Quit));
        assert_eq!(
            map_event(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(InputAction::Quit)
        );
    }

    #[test]
    fn releases_and_unknown_keys_are_dropped() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(release), None);
        assert_eq!(map_event(key(KeyCode::Char('x'))), None);
        assert_eq!(map_event(Event::FocusGained), None);
    }

    #[test]
    fn resize_passes_through() {
        assert_eq!(
            map_event(Event::Resize(100, 40)),
            Some(InputAction::Resize {
                width: 100,
                height: 40
            })
        );
    }
}
