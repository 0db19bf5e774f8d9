//! Domain-specific identifier types.

use std::fmt;
use thiserror::Error;

/// Simulated clock value. One tick is one scheduling slot.
pub type Tick = u64;

/// Process identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semaphore (contention token) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub usize);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

/// Rejected priority value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("priority {0} outside 1..={max}", max = Priority::LEVELS)]
pub struct InvalidPriority(pub u8);

/// Scheduling priority.
///
/// Levels run from 1 to [`Priority::LEVELS`]; a lower value is a higher
/// priority, so `Priority(1)` outranks every other level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Priority(u8);

impl Priority {
    /// Number of priority levels.
    pub const LEVELS: u8 = 7;

    /// Highest priority.
    pub const HIGHEST: Self = Priority(1);

    /// Lowest priority.
    pub const LOWEST: Self = Priority(Self::LEVELS);

    /// Create a priority, rejecting values outside `1..=LEVELS`.
    pub fn new(level: u8) -> Result<Self, InvalidPriority> {
        if (1..=Self::LEVELS).contains(&level) {
            Ok(Priority(level))
        } else {
            Err(InvalidPriority(level))
        }
    }

    /// Get the raw level.
    pub fn level(self) -> u8 {
        self.0
    }

    /// Zero-based bucket index for per-priority tables.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Check whether this priority strictly outranks `other`.
    pub fn outranks(self, other: Priority) -> bool {
        self.0 < other.0
    }

    /// All levels, highest first.
    pub fn all() -> impl Iterator<Item = Priority> {
        (1..=Self::LEVELS).map(Priority)
    }
}

impl TryFrom<u8> for Priority {
    type Error = InvalidPriority;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Priority::new(level)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_bounds() {
        assert_eq!(Priority::new(0), Err(InvalidPriority(0)));
        assert_eq!(Priority::new(8), Err(InvalidPriority(8)));
        assert_eq!(Priority::new(1), Ok(Priority::HIGHEST));
        assert_eq!(Priority::new(7), Ok(Priority::LOWEST));
    }

    #[test]
    fn test_priority_outranks() {
        let high = Priority::new(1).unwrap();
        let low = Priority::new(4).unwrap();

        assert!(high.outranks(low));
        assert!(!low.outranks(high));
        // Equal levels never outrank each other
        assert!(!low.outranks(low));
    }

    #[test]
    fn test_priority_index_and_iteration() {
        let levels: Vec<u8> = Priority::all().map(Priority::level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(Priority::HIGHEST.index(), 0);
        assert_eq!(Priority::LOWEST.index(), 6);
    }
}
