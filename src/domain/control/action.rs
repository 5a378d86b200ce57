//! Button sampling and action selection

use std::fmt;

/// Raw button signals sampled once per loop iteration.
/// `true` means the button is held down, regardless of pin polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub insert_pressed: bool,
    pub remove_pressed: bool,
}

impl ButtonState {
    pub const fn new(insert_pressed: bool, remove_pressed: bool) -> Self {
        Self {
            insert_pressed,
            remove_pressed,
        }
    }

    /// Resolve the sampled signals into a pending action
    pub const fn action(&self) -> PendingAction {
        PendingAction::resolve(self.insert_pressed, self.remove_pressed)
    }
}

/// Action requested by the user for this iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PendingAction {
    #[default]
    None,
    Insert,
    Remove,
}

impl PendingAction {
    /// Exactly one pressed button selects its action; both or neither
    /// select nothing.
    pub const fn resolve(insert: bool, remove: bool) -> Self {
        match (insert, remove) {
            (true, false) => Self::Insert,
            (false, true) => Self::Remove,
            _ => Self::None,
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Insert => "insert",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_truth_table() {
        assert_eq!(PendingAction::resolve(false, false), PendingAction::None);
        assert_eq!(PendingAction::resolve(true, false), PendingAction::Insert);
        assert_eq!(PendingAction::resolve(false, true), PendingAction::Remove);
        assert_eq!(PendingAction::resolve(true, true), PendingAction::None);
    }

    #[test]
    fn button_state_resolves_action() {
        assert_eq!(ButtonState::new(true, false).action(), PendingAction::Insert);
        assert_eq!(ButtonState::new(true, true).action(), PendingAction::None);
        assert_eq!(ButtonState::default().action(), PendingAction::None);
    }

    #[test]
    fn display() {
        assert_eq!(PendingAction::Insert.to_string(), "insert");
        assert_eq!(PendingAction::Remove.to_string(), "remove");
        assert!(PendingAction::None.is_none());
    }
}
