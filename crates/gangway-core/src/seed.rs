//! # Seed Boundary
//!
//! Externally supplied data enters the CORE here, and only here.
//!
//! A [`Seed`] carries the initial deal collection and the known user
//! contexts. The provider is a pure external input — the CORE does not
//! negotiate schemas, it validates. Limits live in [`crate::primitives`];
//! anything over them is rejected with `InvalidSeed` before any state is
//! built.
//!
//! Parsing bytes into a `Seed` (JSON, TOML, whatever the app speaks) is
//! the app layer's job; this module only defines the shape and the rules.

use crate::deal::{Deal, Priority};
use crate::primitives::{
    MAX_NAME_LENGTH, MAX_SEED_DEALS, MAX_SEED_USERS, MAX_TAG_COUNT, MAX_TAG_LENGTH,
    MAX_TITLE_LENGTH,
};
use crate::stage::Stage;
use crate::types::{GangwayError, Money, UserContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// SEED
// =============================================================================

/// The externally supplied session data set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    /// Initial deal collection.
    #[serde(default)]
    pub deals: Vec<Deal>,
    /// Known user contexts, for portal resolution.
    #[serde(default)]
    pub users: Vec<UserContext>,
}

impl Seed {
    /// Validate the seed against the compiled-in limits.
    ///
    /// Checks sizes, string lengths, tag counts, and id uniqueness for
    /// both deals and users. Returns the first violation found.
    pub fn validate(&self) -> Result<(), GangwayError> {
        if self.deals.len() > MAX_SEED_DEALS {
            return Err(GangwayError::InvalidSeed(format!(
                "deal count {} exceeds maximum {}",
                self.deals.len(),
                MAX_SEED_DEALS
            )));
        }
        if self.users.len() > MAX_SEED_USERS {
            return Err(GangwayError::InvalidSeed(format!(
                "user count {} exceeds maximum {}",
                self.users.len(),
                MAX_SEED_USERS
            )));
        }

        let mut deal_ids = BTreeSet::new();
        for deal in &self.deals {
            if !deal_ids.insert(&deal.id) {
                return Err(GangwayError::InvalidSeed(format!(
                    "duplicate deal id: {}",
                    deal.id
                )));
            }
            check_length("deal title", &deal.title, MAX_TITLE_LENGTH)?;
            check_length("client name", &deal.client_name, MAX_NAME_LENGTH)?;
            check_length("owner name", &deal.owner_name, MAX_NAME_LENGTH)?;
            if deal.tags.len() > MAX_TAG_COUNT {
                return Err(GangwayError::InvalidSeed(format!(
                    "deal {} carries {} tags, maximum is {}",
                    deal.id,
                    deal.tags.len(),
                    MAX_TAG_COUNT
                )));
            }
            for tag in &deal.tags {
                check_length("tag", tag, MAX_TAG_LENGTH)?;
            }
        }

        let mut user_ids = BTreeSet::new();
        for user in &self.users {
            if !user_ids.insert(&user.id) {
                return Err(GangwayError::InvalidSeed(format!(
                    "duplicate user id: {}",
                    user.id
                )));
            }
            check_length("user name", &user.name, MAX_NAME_LENGTH)?;
            check_length("user email", &user.email, MAX_NAME_LENGTH)?;
        }

        Ok(())
    }

    /// Find a seeded user by id.
    #[must_use]
    pub fn user(&self, id: &str) -> Option<&UserContext> {
        self.users.iter().find(|u| u.id == id)
    }

    /// The built-in demo data set: a small charter pipeline plus a couple
    /// of users. Used by `gangway init` and by tests.
    #[must_use]
    pub fn example() -> Self {
        Self {
            deals: vec![
                Deal::new(
                    "D-1001",
                    "Weekend catamaran, 8 guests",
                    "Brightwave Media",
                    Money::new(150_000),
                    Stage::New,
                    Priority::High,
                    "Astrid Holm",
                )
                .with_tag("boat")
                .with_tag("weekend"),
                Deal::new(
                    "D-1002",
                    "Glacier heli tour",
                    "Fjordline Tours",
                    Money::new(420_000),
                    Stage::Qualified,
                    Priority::Urgent,
                    "Joel Berg",
                )
                .with_tag("helicopter"),
                Deal::new(
                    "D-1003",
                    "Dune buggy safari, corporate offsite",
                    "Nordvik AS",
                    Money::new(95_000),
                    Stage::Offer,
                    Priority::Medium,
                    "Astrid Holm",
                )
                .with_tag("buggy")
                .with_tag("corporate"),
                Deal::new(
                    "D-1004",
                    "Sunset cruise, anniversary",
                    "Private client",
                    Money::new(60_000),
                    Stage::New,
                    Priority::Low,
                    "Joel Berg",
                )
                .with_tag("boat"),
                Deal::new(
                    "D-1005",
                    "Island hopper, full fleet week",
                    "Atlas Offsites",
                    Money::new(1_250_000),
                    Stage::Prepaid,
                    Priority::High,
                    "Mara Lindqvist",
                )
                .with_tag("boat")
                .with_tag("fleet"),
            ],
            users: vec![
                UserContext::new("u-astrid", "Astrid Holm", "astrid@example.com")
                    .with_permission("crm_access")
                    .with_permission("manage_bookings"),
                UserContext::new("u-ilse", "Ilse Vang", "ilse@example.com")
                    .with_permission("access_concierge"),
                UserContext::new("u-root", "Platform Admin", "admin@example.com")
                    .with_permission("crm_access")
                    .with_permission("cms_access")
                    .with_permission("manage_staff"),
            ],
        }
    }
}

fn check_length(what: &str, value: &str, max: usize) -> Result<(), GangwayError> {
    if value.len() > max {
        return Err(GangwayError::InvalidSeed(format!(
            "{what} length {} exceeds maximum {max}",
            value.len()
        )));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_seed_validates() {
        Seed::example().validate().expect("example must be valid");
    }

    #[test]
    fn oversized_title_is_rejected() {
        let mut seed = Seed::example();
        seed.deals[0].title = "x".repeat(MAX_TITLE_LENGTH + 1);

        let err = seed.validate().expect_err("must fail");
        assert!(matches!(err, GangwayError::InvalidSeed(_)));
    }

    #[test]
    fn duplicate_deal_ids_are_rejected() {
        let mut seed = Seed::example();
        let clone = seed.deals[0].clone();
        seed.deals.push(clone);

        let err = seed.validate().expect_err("must fail");
        assert!(matches!(err, GangwayError::InvalidSeed(ref msg) if msg.contains("duplicate")));
    }

    #[test]
    fn too_many_tags_are_rejected() {
        let mut seed = Seed::example();
        seed.deals[0].tags = (0..=MAX_TAG_COUNT).map(|i| format!("t{i}")).collect();

        assert!(seed.validate().is_err());
    }

    #[test]
    fn user_lookup_by_id() {
        let seed = Seed::example();
        assert!(seed.user("u-ilse").is_some());
        assert!(seed.user("u-ghost").is_none());
    }
}
