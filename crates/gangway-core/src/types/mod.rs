//! # Core Type Definitions
//!
//! This module contains all core types for the Gangway deterministic
//! operations substrate:
//! - Identifiers and scalar newtypes (`DealId`, `Money`, `Permission`)
//! - Platform roles (`Role`)
//! - The externally supplied user context (`UserContext`)
//! - Observable move events (`DealMovedEvent`) and the sink trait
//! - Error types (`GangwayError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point; money is minor units)
//! - Implement `Ord` where used as keys, for deterministic ordering in
//!   `BTreeMap`/`BTreeSet`
//! - Use saturating arithmetic for sums to prevent overflow

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

// =============================================================================
// ROLE
// =============================================================================

/// A fixed category of platform user. Chosen once per session, immutable.
///
/// The variant set is closed: every portal the platform serves belongs to
/// exactly one of these eight roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Premium client with concierge-level access.
    VipClient,
    /// Regular retail client.
    StandardClient,
    /// Corporate client booking on behalf of a company.
    BusinessClient,
    /// Partner operating under its own brand on the platform.
    BrandPartner,
    /// Referral/agency partner.
    AgentPartner,
    /// External contractor (skippers, pilots, mechanics).
    Contractor,
    /// Internal staff operator.
    Staff,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// All roles in declaration order.
    pub const ALL: [Role; 8] = [
        Role::VipClient,
        Role::StandardClient,
        Role::BusinessClient,
        Role::BrandPartner,
        Role::AgentPartner,
        Role::Contractor,
        Role::Staff,
        Role::Admin,
    ];

    /// Get the kebab-case wire form of this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::VipClient => "vip-client",
            Role::StandardClient => "standard-client",
            Role::BusinessClient => "business-client",
            Role::BrandPartner => "brand-partner",
            Role::AgentPartner => "agent-partner",
            Role::Contractor => "contractor",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = GangwayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vip-client" => Ok(Role::VipClient),
            "standard-client" => Ok(Role::StandardClient),
            "business-client" => Ok(Role::BusinessClient),
            "brand-partner" => Ok(Role::BrandPartner),
            "agent-partner" => Ok(Role::AgentPartner),
            "contractor" => Ok(Role::Contractor),
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            other => Err(GangwayError::UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SCALAR NEWTYPES
// =============================================================================

/// Unique identifier for a deal within a pipeline board.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DealId(pub String);

impl DealId {
    /// Create a new deal id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DealId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque permission string granted to a user.
///
/// The permission space is open-ended: a permission unknown to the whole
/// system is not an error, it simply never matches a feature gate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Permission(pub String);

impl Permission {
    /// Create a new permission from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the permission as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A currency amount in minor units (e.g. cents).
///
/// Uses u64 with saturating arithmetic. Deal values are never negative and
/// aggregate sums must not wrap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(pub u64);

impl Money {
    /// Create a new amount from minor units.
    #[must_use]
    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// Add another amount using saturating arithmetic.
    /// This is the ONLY arithmetic used when totalling stage values.
    #[must_use]
    pub const fn saturating_add(self, other: Money) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Get the raw minor-unit value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

// =============================================================================
// USER CONTEXT
// =============================================================================

/// The externally supplied identity of the current user.
///
/// The resolver reads this; it never mutates it. Permissions are a set of
/// opaque strings — membership is the only operation performed on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// External user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Granted permissions. BTreeSet for deterministic ordering.
    pub permissions: BTreeSet<Permission>,
}

impl UserContext {
    /// Create a user context with no permissions.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            permissions: BTreeSet::new(),
        }
    }

    /// Add a permission, builder-style.
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(Permission::new(permission));
        self
    }

    /// Check whether this user holds a permission.
    #[must_use]
    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }
}

// =============================================================================
// MOVE EVENTS
// =============================================================================

/// The observable record of one committed stage move.
///
/// Emitted exactly once per true move, strictly after the board mutation.
/// Observers never see an event referencing pre-mutation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealMovedEvent {
    /// The deal that moved.
    pub deal_id: DealId,
    /// Title at the time of the move, for display-only sinks.
    pub deal_title: String,
    /// Stage the deal left.
    pub from: crate::stage::Stage,
    /// Stage the deal entered.
    pub to: crate::stage::Stage,
}

// =============================================================================
// NOTIFICATION SINK TRAIT
// =============================================================================

/// The NotificationSink trait is the CORE's only outbound interface.
///
/// Sinks receive `DealMovedEvent` records after each committed move. How
/// they are displayed or stored (toast, log line, audit trail) is entirely
/// the collaborator's concern — the CORE has no opinion and no dependency
/// on it.
///
/// Sinks must be `Send + Sync` so app layers can share them across threads.
pub trait NotificationSink: Send + Sync {
    /// Receive one committed move event.
    fn notify(&mut self, event: &DealMovedEvent);
}

/// An in-memory sink that records events in arrival order.
///
/// Used by tests and by callers that want to inspect or replay the event
/// sequence of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    /// Recorded events, oldest first.
    pub events: Vec<DealMovedEvent>,
}

impl EventLog {
    /// Create a new empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl NotificationSink for EventLog {
    fn notify(&mut self, event: &DealMovedEvent) {
        self.events.push(event.clone());
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Gangway system.
///
/// - No silent failures
/// - Use `Result<T, GangwayError>` for fallible operations
/// - The CORE should never panic; all errors must be recoverable, local to
///   a single call, and leave state untouched
#[derive(Debug, Error)]
pub enum GangwayError {
    /// No portal configuration is declared for the requested role.
    #[error("No portal configuration for role: {0}")]
    ConfigNotFound(Role),

    /// The requested deal is not present on the board.
    #[error("Deal not found: {0}")]
    DealNotFound(DealId),

    /// The named stage is not one of the declared pipeline stages.
    #[error("Unknown pipeline stage: {0}")]
    UnknownStage(String),

    /// The named role is not one of the declared platform roles.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Seed data failed validation.
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
