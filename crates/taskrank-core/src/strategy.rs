//! Prioritization strategies understood by the scoring service.
//!
//! The client never interprets a strategy; it only forwards the key and
//! shows the matching description. Unknown keys resolve to
//! [`Strategy::SmartBalance`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    SmartBalance,
    FastestWins,
    HighImpact,
    DeadlineDriven,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::SmartBalance,
        Strategy::FastestWins,
        Strategy::HighImpact,
        Strategy::DeadlineDriven,
    ];

    /// Wire key sent to the scoring service.
    pub fn key(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "smart_balance",
            Strategy::FastestWins => "fastest_wins",
            Strategy::HighImpact => "high_impact",
            Strategy::DeadlineDriven => "deadline_driven",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => {
                "Balances urgency, importance, effort and dependencies. Ideal default when you want a realistic view of what to pick next."
            }
            Strategy::FastestWins => {
                "Pushes small, low-effort tasks to the top so you can clear your queue quickly and build momentum."
            }
            Strategy::HighImpact => {
                "Optimised for importance. Great when you care more about impact than quantity of tasks completed."
            }
            Strategy::DeadlineDriven => {
                "Sorts primarily by due date so you rarely miss deadlines, even if a task is slightly less important."
            }
        }
    }

    /// Key with the first underscore replaced by a space ("smart balance").
    pub fn display_name(&self) -> String {
        humanize_key(self.key())
    }

    /// Resolve a selector value, falling back to the default for anything
    /// empty or unrecognized.
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a selector value names no known strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown strategy: {}", self.0)
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.key() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Static description for a raw selector value.
pub fn strategy_description(key: &str) -> &'static str {
    Strategy::from_key_or_default(key).description()
}

/// Only the first underscore is replaced; "a_b_c" becomes "a b_c".
pub fn humanize_key(key: &str) -> String {
    key.replacen('_', " ", 1)
}
