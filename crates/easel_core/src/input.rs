//! Platform-agnostic input identifiers
//!
//! Key, modifier and mouse-button identifiers carried by the event payloads.
//! Backends translate their toolkit's identifiers into these; keys a backend
//! cannot map are passed through opaquely, as [`Key::Code`] or [`Key::Other`].

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::errors::{EaselError, Result};
use crate::value::Value;

macro_rules! named_keys {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Keyboard key identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum Key {
            $($variant,)*
            /// Opaque backend-specific key code.
            Code(u32),
            /// Backend key name with no canonical entry.
            Other(String),
        }

        impl Key {
            /// Every named key, in declaration order.
            pub const NAMED: &'static [Key] = &[$(Key::$variant,)*];

            /// Canonical name, or `None` for opaque keys.
            #[must_use]
            pub fn name(&self) -> Option<&'static str> {
                match self {
                    $(Key::$variant => Some($name),)*
                    Key::Code(_) | Key::Other(_) => None,
                }
            }
        }
    };
}

named_keys! {
    A => "A", B => "B", C => "C", D => "D", E => "E", F => "F", G => "G",
    H => "H", I => "I", J => "J", K => "K", L => "L", M => "M", N => "N",
    O => "O", P => "P", Q => "Q", R => "R", S => "S", T => "T", U => "U",
    V => "V", W => "W", X => "X", Y => "Y", Z => "Z",

    Key0 => "0", Key1 => "1", Key2 => "2", Key3 => "3", Key4 => "4",
    Key5 => "5", Key6 => "6", Key7 => "7", Key8 => "8", Key9 => "9",

    F1 => "F1", F2 => "F2", F3 => "F3", F4 => "F4", F5 => "F5", F6 => "F6",
    F7 => "F7", F8 => "F8", F9 => "F9", F10 => "F10", F11 => "F11", F12 => "F12",

    Space => "Space",
    Enter => "Enter",
    Escape => "Escape",
    Backspace => "Backspace",
    Tab => "Tab",
    Delete => "Delete",
    Insert => "Insert",
    Home => "Home",
    End => "End",
    PageUp => "PageUp",
    PageDown => "PageDown",

    Shift => "Shift",
    Control => "Control",
    Alt => "Alt",
    Super => "Super",

    ArrowUp => "Up",
    ArrowDown => "Down",
    ArrowLeft => "Left",
    ArrowRight => "Right",

    Comma => ",",
    Period => ".",
    Slash => "/",
    Backslash => "\\",
    Semicolon => ";",
    Quote => "'",
    BracketLeft => "[",
    BracketRight => "]",
    Minus => "-",
    Equal => "=",
    Grave => "`",
}

impl Key {
    /// Coerces a loosely-typed value: integers become [`Key::Code`], strings
    /// are looked up by name (case-insensitive) and otherwise kept as
    /// [`Key::Other`].
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Int(code) => u32::try_from(*code)
                .map(Key::Code)
                .map_err(|_| value.coercion_error("key", "a key code or key name")),
            Value::Str(name) => name.parse(),
            _ => Err(value.coercion_error("key", "a key code or key name")),
        }
    }
}

impl FromStr for Key {
    type Err = EaselError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(Value::from(s).coercion_error("key", "a key code or key name"));
        }
        Ok(Key::NAMED
            .iter()
            .find(|k| k.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
            .cloned()
            .unwrap_or_else(|| Key::Other(name.to_owned())))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Code(code) => write!(f, "<{code}>"),
            Key::Other(name) => f.write_str(name),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

/// Modifier key held down at the time of an input event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Control,
    Alt,
    Super,
    /// Opaque backend-specific modifier id.
    Code(u32),
}

impl Modifier {
    /// Canonical name, or `None` for [`Modifier::Code`].
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        match self {
            Modifier::Shift => Some("Shift"),
            Modifier::Control => Some("Control"),
            Modifier::Alt => Some("Alt"),
            Modifier::Super => Some("Super"),
            Modifier::Code(_) => None,
        }
    }
}

impl FromStr for Modifier {
    type Err = EaselError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "shift" => Ok(Modifier::Shift),
            "control" | "ctrl" => Ok(Modifier::Control),
            "alt" | "option" => Ok(Modifier::Alt),
            "super" | "meta" | "cmd" => Ok(Modifier::Super),
            _ => Err(Value::from(s).coercion_error("modifiers", "a modifier name")),
        }
    }
}

/// Ordered set of modifiers, as reported by the backend.
pub type Modifiers = SmallVec<[Modifier; 4]>;

/// Coerces a loosely-typed sequence of modifier names or integer ids.
/// `None` is empty.
pub fn modifiers_from_value(value: &Value) -> Result<Modifiers> {
    value
        .to_sequence("modifiers")?
        .iter()
        .map(|item| match item {
            Value::Str(name) => name.parse(),
            Value::Int(code) => u32::try_from(*code)
                .map(Modifier::Code)
                .map_err(|_| item.coercion_error("modifiers", "a modifier name or id")),
            other => Err(other.coercion_error("modifiers", "a modifier name or id")),
        })
        .collect()
}

/// Mouse button identifier.
///
/// Payloads carry buttons as plain integers (left=1, right=2, middle=3);
/// this enum is the typed view of that convention.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    /// Integer code used in [`crate::event::MouseEvent::button`].
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 3,
            MouseButton::Back => 4,
            MouseButton::Forward => 5,
            MouseButton::Other(n) => i32::from(n),
        }
    }

    /// The button for an integer code, or `None` if no button has that code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(MouseButton::Left),
            2 => Some(MouseButton::Right),
            3 => Some(MouseButton::Middle),
            4 => Some(MouseButton::Back),
            5 => Some(MouseButton::Forward),
            n => u16::try_from(n).ok().map(MouseButton::Other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_round_trip_case_insensitively() {
        assert_eq!("escape".parse::<Key>().unwrap(), Key::Escape);
        assert_eq!("a".parse::<Key>().unwrap(), Key::A);
        assert_eq!(Key::ArrowLeft.to_string(), "Left");
        assert_eq!(Key::Other("F24".into()).to_string(), "F24");
    }

    #[test]
    fn unknown_key_names_are_kept_opaque() {
        assert_eq!(
            "PrintScreen".parse::<Key>().unwrap(),
            Key::Other("PrintScreen".into())
        );
        assert_eq!(
            Key::from_value(&Value::from(" Menu ")).unwrap(),
            Key::Other("Menu".into())
        );
        assert!("  ".parse::<Key>().is_err());
    }

    #[test]
    fn integer_keys_are_opaque_codes() {
        assert_eq!(Key::from_value(&Value::Int(0x1b)).unwrap(), Key::Code(0x1b));
        assert!(Key::from_value(&Value::Int(-1)).is_err());
        assert!(Key::from_value(&Value::Float(1.0)).is_err());
    }

    #[test]
    fn modifiers_keep_order() {
        let mods = modifiers_from_value(&Value::from(vec!["ctrl", "Shift"])).unwrap();
        assert_eq!(mods.as_slice(), &[Modifier::Control, Modifier::Shift]);
        assert!(modifiers_from_value(&Value::None).unwrap().is_empty());
        assert!(modifiers_from_value(&Value::from(vec!["Hyper"])).is_err());
    }

    #[test]
    fn integer_modifiers_are_opaque_ids() {
        let mods = modifiers_from_value(&Value::from(vec![1, 2])).unwrap();
        assert_eq!(mods.as_slice(), &[Modifier::Code(1), Modifier::Code(2)]);

        let mixed = Value::Tuple(vec![Value::from("Shift"), Value::Int(16)]);
        let mods = modifiers_from_value(&mixed).unwrap();
        assert_eq!(mods.as_slice(), &[Modifier::Shift, Modifier::Code(16)]);

        assert!(modifiers_from_value(&Value::from(vec![-1])).is_err());
    }

    #[test]
    fn mouse_button_codes_follow_convention() {
        assert_eq!(MouseButton::Left.code(), 1);
        assert_eq!(MouseButton::Right.code(), 2);
        assert_eq!(MouseButton::Middle.code(), 3);
        assert_eq!(MouseButton::from_code(3), Some(MouseButton::Middle));
        assert_eq!(MouseButton::from_code(9), Some(MouseButton::Other(9)));
    }

    #[test]
    fn unrepresentable_button_codes_have_no_button() {
        assert_eq!(MouseButton::from_code(-1), None);
        assert_eq!(MouseButton::from_code(70_000), None);
    }
}
