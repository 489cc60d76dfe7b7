//! Key handling: maps terminal key events to game and front-end commands
//!
//! Held keys rely on the terminal's own key repeat; there is no DAS/ARR.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward to the running game
    Game(Action),
    /// Leave the current screen for the menu
    Back,
    /// Exit the program
    Quit,
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub back: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let key = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "esc" | "escape" => KeyCode::Esc,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => {
                        tracing::warn!("Unknown key name in bindings: {:?}", s);
                        return None;
                    }
                }
            }
        };
        Some(key)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().filter_map(|s| Self::parse_key(s)).collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            rotate: Self::parse_keys(&settings.keys.rotate),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            back: Self::parse_keys(&settings.keys.back),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Input handler translating key presses through the bindings
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Translate a key press, `None` if the key is unbound
    pub fn key_down(&self, key: KeyEvent) -> Option<Command> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        let code = normalize_key(key.code);
        let b = &self.bindings;

        let command = if b.move_left.contains(&code) {
            Command::Game(Action::MoveLeft)
        } else if b.move_right.contains(&code) {
            Command::Game(Action::MoveRight)
        } else if b.soft_drop.contains(&code) {
            Command::Game(Action::SoftDrop)
        } else if b.rotate.contains(&code) {
            Command::Game(Action::Rotate)
        } else if b.hard_drop.contains(&code) {
            Command::Game(Action::HardDrop)
        } else if b.back.contains(&code) {
            Command::Back
        } else if b.quit.contains(&code) {
            Command::Quit
        } else {
            return None;
        };

        Some(command)
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let input = InputHandler::new();
        assert_eq!(input.key_down(press(KeyCode::Left)), Some(Command::Game(Action::MoveLeft)));
        assert_eq!(input.key_down(press(KeyCode::Right)), Some(Command::Game(Action::MoveRight)));
        assert_eq!(input.key_down(press(KeyCode::Down)), Some(Command::Game(Action::SoftDrop)));
        assert_eq!(input.key_down(press(KeyCode::Up)), Some(Command::Game(Action::Rotate)));
        assert_eq!(input.key_down(press(KeyCode::Char(' '))), Some(Command::Game(Action::HardDrop)));
        assert_eq!(input.key_down(press(KeyCode::Esc)), Some(Command::Back));
        assert_eq!(input.key_down(press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(input.key_down(press(KeyCode::F(5))), None);
    }

    #[test]
    fn test_uppercase_letters_match() {
        let input = InputHandler::new();
        assert_eq!(input.key_down(press(KeyCode::Char('A'))), Some(Command::Game(Action::MoveLeft)));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let input = InputHandler::new();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.key_down(key), Some(Command::Quit));
    }

    #[test]
    fn test_custom_bindings() {
        let mut settings = Settings::default();
        settings.keys.rotate = vec!["x".to_string(), "bogus-key".to_string()];
        let input = InputHandler::from_settings(&settings);
        assert_eq!(input.key_down(press(KeyCode::Char('x'))), Some(Command::Game(Action::Rotate)));
        assert_eq!(input.key_down(press(KeyCode::Up)), None);
    }
}
