//! Chat action types
//!
//! Keys of the action-start and action-end tables (`o.actions[0].type`).

use std::fmt;

/// Chat actions with a dedicated handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Member is typing
    Typing,
}

impl ActionKind {
    /// Get the wire name of the action
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Typing => "Typing",
        }
    }

    /// Parse an action from its wire name
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Typing" => Some(Self::Typing),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
