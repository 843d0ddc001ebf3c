//! # gangway-core
//!
//! The deterministic operations core for Gangway - THE LOGIC.
//!
//! This crate implements the CORE of a charter-operations platform
//! (boats, helicopters, buggies): role-based portal composition and the
//! deal pipeline board. It records, reassigns, and summarizes pipeline
//! state; it never renders, persists, or talks to a network.
//!
//! ## Components
//!
//! - `portal` — the Portal Composition Resolver: `Role` → `PortalConfig`,
//!   filtered down to the features a user's permissions allow
//! - `board` — the Pipeline Stage Assigner: exclusive owner of the deal
//!   collection; every stage move is validated, committed, then announced
//! - `filter` — stable, read-only deal filtering for column views
//! - `seed` — the validated boundary for externally supplied data
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is the ONLY place where pipeline state exists (stateful)
//! - Is closed: no external logic may be injected; sinks observe moves,
//!   they never decide them
//! - Is minimal: if a feature is not essential to portal resolution or
//!   stage assignment, it is removed
//! - Never initiates interaction; only reacts to explicit calls
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod board;
pub mod deal;
pub mod filter;
pub mod portal;
pub mod primitives;
pub mod seed;
pub mod stage;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    DealId, DealMovedEvent, EventLog, GangwayError, Money, NotificationSink, Permission, Role,
    UserContext,
};

// =============================================================================
// RE-EXPORTS: Deals & Pipeline
// =============================================================================

pub use board::{MoveOutcome, PipelineBoard};
pub use deal::{Deal, Priority};
pub use filter::{DealFilter, filter_deals};
pub use stage::{Stage, StageAggregate, StageMetadata, aggregates_by_stage};

// =============================================================================
// RE-EXPORTS: Portal Composition
// =============================================================================

pub use portal::{
    FeatureDescriptor, LayoutFlags, PortalCatalog, PortalConfig, ResolvedPortal, default_feature,
};

// =============================================================================
// RE-EXPORTS: Seed Boundary
// =============================================================================

pub use seed::Seed;
