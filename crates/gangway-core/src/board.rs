//! # Pipeline Board
//!
//! The Pipeline Stage Assigner: exclusive owner of the deal collection.
//!
//! No other component writes `Deal::stage`. All mutation goes through
//! [`PipelineBoard::move_deal`], which validates, commits, then announces —
//! in that order. Readers get snapshots; the board never hands out mutable
//! deal references.
//!
//! Move semantics:
//! - unknown deal id → [`GangwayError::DealNotFound`], nothing mutated
//! - target equals current stage → [`MoveOutcome::Unchanged`], no event
//! - true move → stage committed, then exactly one [`DealMovedEvent`]
//!
//! Transitions are unrestricted between any two declared stages, backward
//! moves included. Stage order is informational, not a gate.

use crate::deal::Deal;
use crate::seed::Seed;
use crate::stage::{Stage, StageAggregate, aggregates_by_stage};
use crate::types::{DealId, DealMovedEvent, GangwayError, NotificationSink};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// MOVE OUTCOME
// =============================================================================

/// The result of one [`PipelineBoard::move_deal`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum MoveOutcome {
    /// Target equals the current stage. Nothing changed, no event emitted.
    Unchanged {
        /// The stage the deal already occupies.
        stage: Stage,
    },
    /// The deal changed stage. Exactly one event was emitted.
    Moved {
        /// Stage the deal left.
        from: Stage,
        /// Stage the deal entered.
        to: Stage,
        /// The deal as committed, post-move.
        deal: Deal,
    },
}

impl MoveOutcome {
    /// Check whether the deal actually changed stage.
    #[must_use]
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

// =============================================================================
// PIPELINE BOARD
// =============================================================================

/// The deal collection and its single mutation path.
///
/// Uses `BTreeMap` keyed by [`DealId`] for deterministic iteration. The
/// board is not `Sync`-shared state by itself — `move_deal` takes
/// `&mut self`, so a multi-threaded caller must serialize writers (one
/// owner, a mutex, or an actor), which preserves the exactly-one-event-per-
/// true-move guarantee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineBoard {
    deals: BTreeMap<DealId, Deal>,
}

impl PipelineBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a deal list.
    ///
    /// Rejects duplicate ids — the id is the handle every move uses, so a
    /// collision would make moves ambiguous.
    pub fn from_deals(deals: Vec<Deal>) -> Result<Self, GangwayError> {
        let mut map = BTreeMap::new();
        for deal in deals {
            let id = deal.id.clone();
            if map.insert(id.clone(), deal).is_some() {
                return Err(GangwayError::InvalidSeed(format!("duplicate deal id: {id}")));
            }
        }
        Ok(Self { deals: map })
    }

    /// Build a board from a validated seed.
    pub fn from_seed(seed: &Seed) -> Result<Self, GangwayError> {
        seed.validate()?;
        Self::from_deals(seed.deals.clone())
    }

    /// Number of deals on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    /// Check whether the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    /// Lookup a deal by id.
    #[must_use]
    pub fn get(&self, id: &DealId) -> Option<&Deal> {
        self.deals.get(id)
    }

    /// Iterate deals in id order.
    pub fn deals(&self) -> impl Iterator<Item = &Deal> {
        self.deals.values()
    }

    /// Owned snapshot of the deal list, in id order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Deal> {
        self.deals.values().cloned().collect()
    }

    /// Deals currently in one stage, in id order.
    pub fn deals_in_stage(&self, stage: Stage) -> impl Iterator<Item = &Deal> {
        self.deals.values().filter(move |d| d.stage == stage)
    }

    /// Per-stage aggregates for the current deal set.
    ///
    /// Recomputed fresh on every call; nothing is cached.
    #[must_use]
    pub fn aggregates(&self) -> Vec<StageAggregate> {
        aggregates_by_stage(self.deals.values())
    }

    /// Move a deal to a target stage.
    ///
    /// All-or-nothing: a failed lookup mutates nothing. The event is
    /// emitted strictly after the stage write is committed, so observers
    /// never see a move referencing pre-mutation state.
    pub fn move_deal(
        &mut self,
        id: &DealId,
        target: Stage,
        sink: &mut dyn NotificationSink,
    ) -> Result<MoveOutcome, GangwayError> {
        let deal = self
            .deals
            .get_mut(id)
            .ok_or_else(|| GangwayError::DealNotFound(id.clone()))?;

        let from = deal.stage;
        if from == target {
            return Ok(MoveOutcome::Unchanged { stage: from });
        }

        deal.stage = target;
        let committed = deal.clone();

        sink.notify(&DealMovedEvent {
            deal_id: committed.id.clone(),
            deal_title: committed.title.clone(),
            from,
            to: target,
        });

        Ok(MoveOutcome::Moved {
            from,
            to: target,
            deal: committed,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::Priority;
    use crate::types::{EventLog, Money};

    fn make_deal(id: &str, stage: Stage, value: u64) -> Deal {
        Deal::new(
            id,
            format!("Charter {id}"),
            "Nordvik AS",
            Money::new(value),
            stage,
            Priority::Medium,
            "Astrid",
        )
    }

    fn seeded_board() -> PipelineBoard {
        PipelineBoard::from_deals(vec![
            make_deal("D1", Stage::New, 100_000),
            make_deal("D2", Stage::Qualified, 200_000),
            make_deal("D3", Stage::New, 50_000),
        ])
        .expect("seed")
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = PipelineBoard::from_deals(vec![
            make_deal("D1", Stage::New, 1),
            make_deal("D1", Stage::Offer, 2),
        ])
        .expect_err("must fail");
        assert!(matches!(err, GangwayError::InvalidSeed(_)));
    }

    #[test]
    fn move_commits_stage_and_emits_once() {
        let mut board = seeded_board();
        let mut log = EventLog::new();

        let outcome = board
            .move_deal(&DealId::new("D1"), Stage::Qualified, &mut log)
            .expect("move");

        match outcome {
            MoveOutcome::Moved { from, to, deal } => {
                assert_eq!(from, Stage::New);
                assert_eq!(to, Stage::Qualified);
                // The returned deal is post-mutation state.
                assert_eq!(deal.stage, Stage::Qualified);
            }
            MoveOutcome::Unchanged { .. } => unreachable!("stage differs"),
        }

        assert_eq!(log.len(), 1);
        assert_eq!(log.events[0].deal_id, DealId::new("D1"));
        assert_eq!(log.events[0].from, Stage::New);
        assert_eq!(log.events[0].to, Stage::Qualified);
        assert_eq!(
            board.get(&DealId::new("D1")).expect("deal").stage,
            Stage::Qualified
        );
    }

    #[test]
    fn same_stage_move_is_idempotent_and_silent() {
        let mut board = seeded_board();
        let mut log = EventLog::new();
        let id = DealId::new("D1");

        board.move_deal(&id, Stage::Qualified, &mut log).expect("move");
        let second = board.move_deal(&id, Stage::Qualified, &mut log).expect("move");

        assert!(!second.moved());
        assert!(matches!(
            second,
            MoveOutcome::Unchanged {
                stage: Stage::Qualified
            }
        ));
        // Only the first call emitted.
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn backward_moves_are_allowed() {
        let mut board = seeded_board();
        let mut log = EventLog::new();

        let outcome = board
            .move_deal(&DealId::new("D2"), Stage::New, &mut log)
            .expect("move");
        assert!(outcome.moved());
        assert_eq!(
            board.get(&DealId::new("D2")).expect("deal").stage,
            Stage::New
        );
    }

    #[test]
    fn unknown_deal_mutates_nothing() {
        let mut board = seeded_board();
        let before = board.snapshot();
        let mut log = EventLog::new();

        let err = board
            .move_deal(&DealId::new("D99"), Stage::Offer, &mut log)
            .expect_err("must fail");

        assert!(matches!(err, GangwayError::DealNotFound(_)));
        assert_eq!(board.snapshot(), before);
        assert!(log.is_empty());
    }

    #[test]
    fn aggregates_track_moves() {
        let mut board = seeded_board();
        let mut log = EventLog::new();

        let before = board.aggregates();
        assert_eq!(before[0].deal_count, 2);
        assert_eq!(before[0].total_value, Money::new(150_000));
        assert_eq!(before[1].deal_count, 1);
        assert_eq!(before[1].total_value, Money::new(200_000));

        board
            .move_deal(&DealId::new("D1"), Stage::Qualified, &mut log)
            .expect("move");

        let after = board.aggregates();
        assert_eq!(after[0].deal_count, 1);
        assert_eq!(after[0].total_value, Money::new(50_000));
        assert_eq!(after[1].deal_count, 2);
        assert_eq!(after[1].total_value, Money::new(300_000));

        // Conservation: counts always sum to the board size.
        let total: usize = after.iter().map(|a| a.deal_count).sum();
        assert_eq!(total, board.len());
    }
}
