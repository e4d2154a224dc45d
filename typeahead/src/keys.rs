//! Key codes delivered to the widget by the host.

/// Modifier key state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };
}

/// A key combination (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// The key code
    pub key: Key,
    /// Modifier keys
    pub modifiers: Modifiers,
}

impl KeyCombo {
    /// Create a key combo without modifiers
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Add ctrl modifier
    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }
}

impl From<Key> for KeyCombo {
    fn from(key: Key) -> Self {
        Self::key(key)
    }
}

/// Key codes the widget reacts to. Anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter/Return
    Enter,
    /// Tab
    Tab,
    /// Escape
    Escape,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Character key (text entry goes through text-change events instead)
    Char(char),
    /// Any other key
    Other,
}

impl Key {
    /// Parse a key name as used in host scripts and keymaps
    /// (`enter`, `tab`, `esc`, `up`, `down`, or a single character).
    pub fn parse(name: &str) -> Option<Self> {
        let key = match name.to_ascii_lowercase().as_str() {
            "enter" | "return" => Key::Enter,
            "tab" => Key::Tab,
            "esc" | "escape" => Key::Escape,
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(Key::parse("Enter"), Some(Key::Enter));
        assert_eq!(Key::parse("ESC"), Some(Key::Escape));
        assert_eq!(Key::parse("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::parse("x"), Some(Key::Char('x')));
        assert_eq!(Key::parse("nope"), None);
    }

    #[test]
    fn test_combo_modifiers() {
        let combo = KeyCombo::key(Key::Enter).ctrl();
        assert!(combo.modifiers.ctrl);
        assert!(!combo.modifiers.alt);
        assert_eq!(KeyCombo::from(Key::Up).modifiers, Modifiers::NONE);
    }
}
