//! Keyboard input mapping
//!
//! Translates and rotations fire on discrete key presses (terminal
//! auto-repeat re-delivers presses for held keys). Soft drop is the one
//! press-and-hold control: it is tracked as held-key state with a repeat
//! timeout fallback, because key release events are unreliable on Linux
//! terminals.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Time after which we consider the soft-drop key released if no repeat
/// event arrived
const KEY_TIMEOUT: Duration = Duration::from_millis(150);

/// What a key press asks of the shell around the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Game(Action),
    Quit,
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> KeyCode {
        match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            s if s.len() == 1 => KeyCode::Char(s.chars().next().unwrap()),
            _ => KeyCode::Char(' '), // fallback
        }
    }

    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().map(|s| Self::parse_key(s)).collect()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            rotate: Self::parse_keys(&settings.keys.rotate),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec![KeyCode::Left, KeyCode::Char('a')],
            move_right: vec![KeyCode::Right, KeyCode::Char('d')],
            rotate: vec![KeyCode::Up, KeyCode::Char('x')],
            soft_drop: vec![KeyCode::Down, KeyCode::Char('s')],
            quit: vec![KeyCode::Char('q'), KeyCode::Esc],
        }
    }
}

/// Binding-driven input handler with soft-drop hold tracking
pub struct InputHandler {
    bindings: KeyBindings,
    /// Last time a soft-drop press (or repeat) was seen
    soft_drop_seen: Option<Instant>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            bindings: KeyBindings::default(),
            soft_drop_seen: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
            soft_drop_seen: None,
        }
    }

    /// Handle a key press event
    pub fn key_down(&mut self, key: KeyEvent) -> Option<InputEvent> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(InputEvent::Quit);
        }

        let code = normalize_key(key.code);

        if self.bindings.move_left.contains(&code) {
            Some(InputEvent::Game(Action::MoveLeft))
        } else if self.bindings.move_right.contains(&code) {
            Some(InputEvent::Game(Action::MoveRight))
        } else if self.bindings.rotate.contains(&code) {
            Some(InputEvent::Game(Action::Rotate))
        } else if self.bindings.soft_drop.contains(&code) {
            self.soft_drop_seen = Some(Instant::now());
            None
        } else if self.bindings.quit.contains(&code) {
            Some(InputEvent::Quit)
        } else {
            None
        }
    }

    /// Handle a key release event (may not be delivered on Linux)
    pub fn key_up(&mut self, key: KeyEvent) {
        let code = normalize_key(key.code);
        if self.bindings.soft_drop.contains(&code) {
            self.soft_drop_seen = None;
        }
    }

    /// Whether the soft-drop control is currently held. Call every frame;
    /// a press with no repeat inside KEY_TIMEOUT counts as released.
    pub fn soft_drop_held(&mut self) -> bool {
        match self.soft_drop_seen {
            Some(seen) if seen.elapsed() > KEY_TIMEOUT => {
                self.soft_drop_seen = None;
                false
            }
            Some(_) => true,
            None => false,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
