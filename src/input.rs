//! Key to intent mapping for the terminal front-end

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};
use e60tris::settings::Settings;
use e60tris::Intent;

/// Key bindings configuration - supports multiple keys per intent
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(Intent, Vec<KeyCode>)>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode; unknown names give `None`
    fn parse_key(s: &str) -> Option<KeyCode> {
        let code = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "shift" => KeyCode::Modifier(ModifierKeyCode::LeftShift),
            "ctrl" | "control" => KeyCode::Modifier(ModifierKeyCode::LeftControl),
            "alt" => KeyCode::Modifier(ModifierKeyCode::LeftAlt),
            s if s.chars().count() == 1 => KeyCode::Char(s.chars().next()?),
            _ => return None,
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("Unknown key name in settings: {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        Self {
            bindings: vec![
                (Intent::MoveLeft, Self::parse_keys(&keys.move_left)),
                (Intent::MoveRight, Self::parse_keys(&keys.move_right)),
                (Intent::SoftDrop, Self::parse_keys(&keys.soft_drop)),
                (Intent::HardDrop, Self::parse_keys(&keys.hard_drop)),
                (Intent::RotateCw, Self::parse_keys(&keys.rotate_cw)),
                (Intent::RotateCcw, Self::parse_keys(&keys.rotate_ccw)),
                (Intent::Hold, Self::parse_keys(&keys.hold)),
                (Intent::Reset, Self::parse_keys(&keys.reset)),
                (Intent::PauseToggle, Self::parse_keys(&keys.pause)),
                (Intent::Quit, Self::parse_keys(&keys.quit)),
            ],
        }
    }

    /// Intent bound to a key press, if any. Ctrl+C always quits.
    pub fn intent_for(&self, key: KeyEvent) -> Option<Intent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Intent::Quit);
        }

        let code = normalize_key(key.code);
        self.bindings
            .iter()
            .find(|(_, codes)| codes.contains(&code))
            .map(|&(intent, _)| intent)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
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
        let keys = KeyBindings::default();
        assert_eq!(keys.intent_for(press(KeyCode::Left)), Some(Intent::MoveLeft));
        assert_eq!(keys.intent_for(press(KeyCode::Char(' '))), Some(Intent::HardDrop));
        assert_eq!(keys.intent_for(press(KeyCode::Up)), Some(Intent::RotateCw));
        assert_eq!(keys.intent_for(press(KeyCode::Char('z'))), Some(Intent::RotateCcw));
        assert_eq!(keys.intent_for(press(KeyCode::Char('r'))), Some(Intent::Reset));
        assert_eq!(keys.intent_for(press(KeyCode::Esc)), Some(Intent::PauseToggle));
    }

    #[test]
    fn test_uppercase_matches() {
        let keys = KeyBindings::default();
        assert_eq!(keys.intent_for(press(KeyCode::Char('X'))), Some(Intent::RotateCw));
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let keys = KeyBindings::default();
        assert_eq!(keys.intent_for(press(KeyCode::Char('m'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let keys = KeyBindings::default();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keys.intent_for(event), Some(Intent::Quit));
        // Plain c is still hold
        assert_eq!(keys.intent_for(press(KeyCode::Char('c'))), Some(Intent::Hold));
    }

    #[test]
    fn test_unknown_key_names_are_dropped() {
        let mut settings = Settings::default();
        settings.keys.hold = vec!["NoSuchKey".to_string(), "h".to_string()];
        let keys = KeyBindings::from_settings(&settings);
        assert_eq!(keys.intent_for(press(KeyCode::Char('h'))), Some(Intent::Hold));
        assert_eq!(keys.intent_for(press(KeyCode::Char('c'))), None);
    }
}
