//! Keyboard mapping
//!
//! Translates key names (as a browser `KeyboardEvent.key` or a terminal
//! would report them) into session actions.

/// What a key press does to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Append a character to the operation line
    Insert(char),
    /// Evaluate the operation line
    Calculate,
    /// Clear both lines
    Clear,
    /// Remove the last character
    DeleteLast,
}

impl KeyAction {
    /// Maps a key name to an action; unknown keys map to `None`
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Calculate),
            "Escape" => Some(Self::Clear),
            "Backspace" => Some(Self::DeleteLast),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if is_insertable(ch) => Some(Self::Insert(ch)),
                    _ => None,
                }
            }
        }
    }

    /// Whether the host's default handling of this key should be suppressed
    #[must_use]
    pub const fn prevents_default(&self) -> bool {
        match self {
            Self::Insert(ch) => matches!(ch, '+' | '-' | '*' | '/' | '.'),
            Self::Calculate | Self::Clear | Self::DeleteLast => true,
        }
    }
}

const fn is_insertable(ch: char) -> bool {
    matches!(ch, '0'..='9' | '+' | '-' | '*' | '/' | '.' | '(' | ')' | '%')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_insert() {
        for d in '0'..='9' {
            assert_eq!(
                KeyAction::from_key(&d.to_string()),
                Some(KeyAction::Insert(d))
            );
        }
    }

    #[test]
    fn test_operators_and_parens_insert() {
        for key in ["+", "-", "*", "/", ".", "(", ")", "%"] {
            assert!(matches!(
                KeyAction::from_key(key),
                Some(KeyAction::Insert(_))
            ));
        }
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(KeyAction::from_key("Enter"), Some(KeyAction::Calculate));
        assert_eq!(KeyAction::from_key("="), Some(KeyAction::Calculate));
        assert_eq!(KeyAction::from_key("Escape"), Some(KeyAction::Clear));
        assert_eq!(
            KeyAction::from_key("Backspace"),
            Some(KeyAction::DeleteLast)
        );
    }

    #[test]
    fn test_unknown_keys() {
        assert_eq!(KeyAction::from_key("a"), None);
        assert_eq!(KeyAction::from_key("Shift"), None);
        assert_eq!(KeyAction::from_key("12"), None);
        assert_eq!(KeyAction::from_key(""), None);
        assert_eq!(KeyAction::from_key("^"), None);
    }

    #[test]
    fn test_prevents_default() {
        assert!(KeyAction::Insert('+').prevents_default());
        assert!(KeyAction::Insert('.').prevents_default());
        assert!(!KeyAction::Insert('7').prevents_default());
        assert!(!KeyAction::Insert('(').prevents_default());
        assert!(KeyAction::Calculate.prevents_default());
        assert!(KeyAction::Clear.prevents_default());
        assert!(KeyAction::DeleteLast.prevents_default());
    }
}
