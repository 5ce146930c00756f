//! Order status workflow types
//!
//! The legal-transition table is data, not control flow: handlers ask
//! [`OrderStatus::can_transition_to`] and never match on raw strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order preparation lifecycle
///
/// Forward-only. `Done` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Served,
    Done,
    Cancelled,
}

impl OrderStatus {
    /// Legal forward transitions from this status
    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[OrderStatus::Served, OrderStatus::Cancelled],
            OrderStatus::Served => &[OrderStatus::Done],
            OrderStatus::Done | OrderStatus::Cancelled => &[],
        }
    }

    /// Whether `next` is a legal transition from this status
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Whether no further transitions are legal
    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Served => "served",
            OrderStatus::Done => "done",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state, tracked but not enforced against any real payment flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// Payment method, informational only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Online,
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_forward_transitions() {
        assert!(Pending.can_transition_to(Preparing));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Preparing.can_transition_to(Served));
        assert!(Preparing.can_transition_to(Cancelled));
        assert!(Served.can_transition_to(Done));
    }

    #[test]
    fn test_no_skipping_or_backtracking() {
        assert!(!Pending.can_transition_to(Served));
        assert!(!Pending.can_transition_to(Done));
        assert!(!Preparing.can_transition_to(Pending));
        assert!(!Preparing.can_transition_to(Done));
        assert!(!Served.can_transition_to(Cancelled));
        assert!(!Served.can_transition_to(Preparing));
    }

    #[test]
    fn test_no_self_transitions() {
        for s in [Pending, Preparing, Served, Done, Cancelled] {
            assert!(!s.can_transition_to(s));
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(Done.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Pending.is_terminal());
        assert!(!Preparing.is_terminal());
        assert!(!Served.is_terminal());
        assert!(Done.allowed_transitions().is_empty());
        assert!(Cancelled.allowed_transitions().is_empty());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Preparing).unwrap(), "\"preparing\"");
        let status: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, Cancelled);
    }
}
