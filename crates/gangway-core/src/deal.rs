//! # Deal Records
//!
//! A Deal is one sales-pipeline record: a charter request tracked from
//! first contact to completion.
//!
//! Deals are created externally (seed boundary) and live for the duration
//! of the session. The CORE mutates exactly one field — `stage` — and only
//! through [`crate::board::PipelineBoard::move_deal`]. Everything else is
//! read-only display data.

use crate::stage::Stage;
use crate::types::{DealId, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// PRIORITY
// =============================================================================

/// Operator-assigned urgency of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Get the lowercase wire form of this priority.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// DEAL
// =============================================================================

/// One charter deal on the pipeline board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    /// Unique identifier within the board.
    pub id: DealId,
    /// Short description, e.g. "Weekend catamaran, 8 guests".
    pub title: String,
    /// Client the deal is for.
    pub client_name: String,
    /// Deal value in minor currency units.
    pub value: Money,
    /// Current pipeline stage. The only field the CORE mutates.
    pub stage: Stage,
    /// Operator-assigned urgency.
    pub priority: Priority,
    /// Free-form labels, declaration order preserved.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Staff member responsible for the deal.
    pub owner_name: String,
    /// Expected close date, if scheduled.
    #[serde(default)]
    pub close_date: Option<NaiveDate>,
}

impl Deal {
    /// Create a deal in the given stage with empty tags and no close date.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        client_name: impl Into<String>,
        value: Money,
        stage: Stage,
        priority: Priority,
        owner_name: impl Into<String>,
    ) -> Self {
        Self {
            id: DealId::new(id),
            title: title.into(),
            client_name: client_name.into(),
            value,
            stage,
            priority,
            tags: Vec::new(),
            owner_name: owner_name.into(),
            close_date: None,
        }
    }

    /// Add a tag, builder-style.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the expected close date, builder-style.
    #[must_use]
    pub fn with_close_date(mut self, date: NaiveDate) -> Self {
        self.close_date = Some(date);
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_tag_order() {
        let deal = Deal::new(
            "D1",
            "Heli tour",
            "Ava Nyström",
            Money::new(420_000),
            Stage::New,
            Priority::High,
            "Joel",
        )
        .with_tag("helicopter")
        .with_tag("vip");

        assert_eq!(deal.tags, vec!["helicopter", "vip"]);
        assert_eq!(deal.close_date, None);
    }

    #[test]
    fn priority_round_trips_through_str() {
        for p in [
            Priority::Low,
            Priority::Medium,
            Priority::High,
            Priority::Urgent,
        ] {
            assert_eq!(p.as_str().parse::<Priority>(), Ok(p));
        }
        assert!("critical".parse::<Priority>().is_err());
    }
}
