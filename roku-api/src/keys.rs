//! Remote-control keys and their ECP wire tokens

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{ApiError, Result};

/// Characters left unescaped in a path component: the same set
/// `encodeURIComponent` keeps.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode one URL path component
pub(crate) fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

macro_rules! define_keys {
    ($(($variant:ident, $method:ident, $token:literal)),* $(,)?) => {
        /// A symbolic remote-control key
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Key {
            $(
                #[doc = concat!("`", $token, "`")]
                $variant,
            )*
        }

        impl Key {
            /// Every key, in table order
            pub const ALL: &'static [Key] = &[$(Key::$variant),*];

            /// The token the ECP key endpoints expect
            pub fn token(&self) -> &'static str {
                match self {
                    $(Key::$variant => $token,)*
                }
            }
        }
    };
}

for_each_key!(define_keys);

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Key {
    type Err = ApiError;

    /// Accepts the wire token or a snake/kebab/lowercase spelling of it,
    /// e.g. `VolumeUp`, `volume_up`, `volume-up`, `volumeup`.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        Key::ALL
            .iter()
            .copied()
            .find(|key| normalize(key.token()) == wanted)
            .ok_or_else(|| ApiError::InvalidKey(s.to_string()))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// What a key event refers to: a symbolic key or one literal character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInput {
    Named(Key),
    Char(char),
}

impl KeyInput {
    /// A single character becomes [`KeyInput::Char`]; anything longer must name a [`Key`].
    pub fn parse(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(ApiError::InvalidKey(String::new())),
            (Some(c), None) => Ok(KeyInput::Char(c)),
            _ => s.parse().map(KeyInput::Named),
        }
    }

    /// Path segment for the key endpoints: the key token verbatim, or
    /// `Lit_` followed by the percent-encoded character.
    pub fn command(&self) -> Cow<'static, str> {
        match self {
            KeyInput::Named(key) => Cow::Borrowed(key.token()),
            KeyInput::Char(c) => {
                let mut buf = [0u8; 4];
                Cow::Owned(format!("Lit_{}", encode_component(c.encode_utf8(&mut buf))))
            }
        }
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        KeyInput::Named(key)
    }
}

impl From<char> for KeyInput {
    fn from(c: char) -> Self {
        KeyInput::Char(c)
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command())
    }
}

/// The three key endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Down,
    Up,
}

impl KeyAction {
    pub fn verb(&self) -> &'static str {
        match self {
            KeyAction::Press => "keypress",
            KeyAction::Down => "keydown",
            KeyAction::Up => "keyup",
        }
    }
}
