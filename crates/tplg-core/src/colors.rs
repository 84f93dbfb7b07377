//! ANSI styling for block listings.

/// Escape sequences per role, empty when color is off.
///
/// Only the basic 16-color codes are used so the output reads on light and
/// dark terminals alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    /// Block kinds.
    pub kind: &'static str,
    /// Element names.
    pub name: &'static str,
    /// File offsets and notes.
    pub offset: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        kind: "\x1b[34m",
        name: "\x1b[32m",
        offset: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        kind: "",
        name: "",
        offset: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        *self != Self::OFF
    }

    /// Wraps `text` in `style` and a reset.
    pub fn paint(&self, style: &str, text: impl std::fmt::Display) -> String {
        format!("{}{}{}", style, text, self.reset)
    }
}
