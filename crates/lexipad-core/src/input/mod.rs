//! Input abstraction layer.

pub mod mock;

/// Discrete actions consumed by the navigator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Backspace,
    /// Printable ASCII character typed into the dictionary query.
    Char(char),
}

impl InputEvent {
    /// Parses one keypad token.
    ///
    /// Direction tokens are two-letter prefixes (`up`, `do`, `le`, `ri`).
    /// Returns `None` for anything that is not a recognised token, including
    /// the empty token; see [`EventRepeat`] for how that one is handled.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "up" => return Some(Self::Up),
            "do" => return Some(Self::Down),
            "le" => return Some(Self::Left),
            "ri" => return Some(Self::Right),
            "bs" | "ba" | "\u{8}" | "\u{7f}" => return Some(Self::Backspace),
            _ => {}
        }

        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_graphic() || ch == ' ' => Some(Self::Char(ch)),
            _ => None,
        }
    }
}

/// Remembers the last accepted event so an empty token can repeat it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EventRepeat {
    last: Option<InputEvent>,
}

impl EventRepeat {
    pub const fn new() -> Self {
        Self { last: None }
    }

    pub fn last(&self) -> Option<InputEvent> {
        self.last
    }

    /// Resolves `token` to an event, repeating the previous one for an empty token.
    ///
    /// Unrecognised tokens resolve to `None` and leave the remembered event alone.
    pub fn resolve(&mut self, token: &str) -> Option<InputEvent> {
        if token.is_empty() {
            return self.last;
        }

        let event = InputEvent::parse(token)?;
        self.last = Some(event);
        Some(event)
    }
}

/// Blocking input provider; `Ok(None)` means the input has ended.
pub trait InputProvider {
    type Error;

    fn next_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
