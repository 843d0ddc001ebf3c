//! # Pipeline Stages
//!
//! The fixed, ordered stage sequence of the deal pipeline, with static
//! per-stage metadata and the derived per-stage aggregates.
//!
//! ## Current Semantics
//!
//! **Stage order is informational only.** `next()`/`previous()` describe
//! the expected funnel direction, but nothing gates on them: a deal may
//! move between any two declared stages, forward or backward. Free
//! reassignment is the contract, not an oversight.
//!
//! ## Stage Definitions
//!
//! | Stage | Display Name | Expected Conversion | Avg. Dwell |
//! |-------|--------------|---------------------|------------|
//! | New | New Requests | 35% | 3 days |
//! | Qualified | Qualified | 55% | 7 days |
//! | Offer | Offer Sent | 70% | 5 days |
//! | Prepaid | Prepaid | 90% | 2 days |
//! | Completed | Completed | 100% | 0 days |
//!
//! Conversion rates and dwell times are fleet-wide reference values for
//! column headers and forecasting hints; they are not measured live.

use crate::deal::Deal;
use crate::types::{GangwayError, Money};
use serde::{Deserialize, Serialize};

// =============================================================================
// STAGE ENUM
// =============================================================================

/// One named position in the deal pipeline, in funnel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Incoming request, not yet vetted.
    New,
    /// Request vetted, fleet availability confirmed.
    Qualified,
    /// Offer sent to the client.
    Offer,
    /// Prepayment received.
    Prepaid,
    /// Charter completed.
    Completed,
}

impl Stage {
    /// All stages in declared pipeline order.
    ///
    /// This order is the column order of every board view and the
    /// iteration order of every aggregate computation.
    pub const ALL: [Stage; 5] = [
        Stage::New,
        Stage::Qualified,
        Stage::Offer,
        Stage::Prepaid,
        Stage::Completed,
    ];

    /// Get the display name for column headers.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Stage::New => "New Requests",
            Stage::Qualified => "Qualified",
            Stage::Offer => "Offer Sent",
            Stage::Prepaid => "Prepaid",
            Stage::Completed => "Completed",
        }
    }

    /// Get the lowercase wire form of this stage.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::New => "new",
            Stage::Qualified => "qualified",
            Stage::Offer => "offer",
            Stage::Prepaid => "prepaid",
            Stage::Completed => "completed",
        }
    }

    /// Get the static metadata for this stage.
    #[must_use]
    pub fn metadata(&self) -> StageMetadata {
        match self {
            Stage::New => StageMetadata {
                stage: *self,
                display_name: self.name(),
                expected_conversion_percent: 35,
                average_dwell_days: 3,
            },
            Stage::Qualified => StageMetadata {
                stage: *self,
                display_name: self.name(),
                expected_conversion_percent: 55,
                average_dwell_days: 7,
            },
            Stage::Offer => StageMetadata {
                stage: *self,
                display_name: self.name(),
                expected_conversion_percent: 70,
                average_dwell_days: 5,
            },
            Stage::Prepaid => StageMetadata {
                stage: *self,
                display_name: self.name(),
                expected_conversion_percent: 90,
                average_dwell_days: 2,
            },
            Stage::Completed => StageMetadata {
                stage: *self,
                display_name: self.name(),
                expected_conversion_percent: 100,
                average_dwell_days: 0,
            },
        }
    }

    /// Get the next stage in funnel order, if any. Informational only.
    #[must_use]
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::New => Some(Stage::Qualified),
            Stage::Qualified => Some(Stage::Offer),
            Stage::Offer => Some(Stage::Prepaid),
            Stage::Prepaid => Some(Stage::Completed),
            Stage::Completed => None,
        }
    }

    /// Get the previous stage in funnel order, if any. Informational only.
    #[must_use]
    pub fn previous(&self) -> Option<Stage> {
        match self {
            Stage::New => None,
            Stage::Qualified => Some(Stage::New),
            Stage::Offer => Some(Stage::Qualified),
            Stage::Prepaid => Some(Stage::Offer),
            Stage::Completed => Some(Stage::Prepaid),
        }
    }

    /// Check if this stage is terminal (Completed).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Completed)
    }
}

impl std::str::FromStr for Stage {
    type Err = GangwayError;

    /// Parse a stage from its lowercase wire form.
    ///
    /// This is the boundary where the "unknown stage" precondition is
    /// enforced: a string outside the declared set fails here, before any
    /// board mutation can be attempted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Stage::New),
            "qualified" => Ok(Stage::Qualified),
            "offer" => Ok(Stage::Offer),
            "prepaid" => Ok(Stage::Prepaid),
            "completed" => Ok(Stage::Completed),
            other => Err(GangwayError::UnknownStage(other.to_string())),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.as_str(), self.name())
    }
}

// =============================================================================
// STAGE METADATA
// =============================================================================

/// Static reference values attached to a stage.
///
/// Serialize-only: the values are compiled in, never read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageMetadata {
    /// The stage these values describe.
    pub stage: Stage,
    /// Column header text.
    pub display_name: &'static str,
    /// Expected share of deals that convert out of this stage, in percent.
    pub expected_conversion_percent: u8,
    /// Typical days a deal sits in this stage.
    pub average_dwell_days: u16,
}

// =============================================================================
// STAGE AGGREGATES
// =============================================================================

/// Derived per-stage summary: deal count and total value.
///
/// Never stored — recomputed from the current deal set on every call.
/// Invariant: `total_value` equals the saturating sum of `value` over deals
/// currently in `stage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAggregate {
    /// The stage this aggregate summarizes.
    pub stage: Stage,
    /// Number of deals currently in the stage.
    pub deal_count: usize,
    /// Saturating sum of deal values in the stage.
    pub total_value: Money,
}

impl StageAggregate {
    /// Create a zero aggregate for a stage.
    #[must_use]
    pub const fn empty(stage: Stage) -> Self {
        Self {
            stage,
            deal_count: 0,
            total_value: Money::new(0),
        }
    }
}

/// Compute per-stage aggregates from a deal snapshot.
///
/// Pure function: one aggregate per declared stage, in pipeline order,
/// zero-valued for stages with no deals. Single pass over the input.
#[must_use]
pub fn aggregates_by_stage<'a, I>(deals: I) -> Vec<StageAggregate>
where
    I: IntoIterator<Item = &'a Deal>,
{
    let mut aggregates: Vec<StageAggregate> =
        Stage::ALL.iter().map(|s| StageAggregate::empty(*s)).collect();

    for deal in deals {
        // Index into the fixed stage order; ALL covers every variant.
        if let Some(slot) = aggregates.iter_mut().find(|a| a.stage == deal.stage) {
            slot.deal_count = slot.deal_count.saturating_add(1);
            slot.total_value = slot.total_value.saturating_add(deal.value);
        }
    }

    aggregates
}

// =============================================================================
// TESTS
// =============================================================================
