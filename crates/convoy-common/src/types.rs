//! Domain primitive types used across the Convoy workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a running unit (container), assigned by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(String);

impl UnitId {
    /// Creates a new unit ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random unit ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a unit as reported by the engine.
///
/// The orchestrator only observes these states; transitions are owned by
/// the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitState {
    /// Unit has been created but not yet started.
    Created,
    /// Unit is actively running.
    Running,
    /// Unit has stopped (normal exit, crash, or external removal).
    Stopped,
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_id_roundtrips_through_display() {
        let id = UnitId::new("abc123");
        assert_eq!(id.to_string(), "abc123");
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn generated_unit_ids_are_distinct() {
        assert_ne!(UnitId::generate(), UnitId::generate());
    }

    #[test]
    fn unit_state_display_is_lowercase() {
        assert_eq!(UnitState::Created.to_string(), "created");
        assert_eq!(UnitState::Running.to_string(), "running");
        assert_eq!(UnitState::Stopped.to_string(), "stopped");
    }
}
