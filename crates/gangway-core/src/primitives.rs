//! # Innate Primitives
//!
//! Hardcoded runtime constants for the Gangway CORE.
//!
//! Gangway starts with zero deals but fixed logic. These values are
//! compiled into the binary and are immutable at runtime.

/// Number of pipeline stages.
///
/// The stage sequence is closed; boards always carry one column per stage,
/// present or not in the current deal set.
pub const STAGE_COUNT: usize = 5;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for deal titles.
///
/// Titles longer than this will be rejected at the seed boundary.
/// This prevents memory exhaustion from malicious or malformed input.
pub const MAX_TITLE_LENGTH: usize = 256;

/// Maximum length for client, owner, and user names.
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum length for a single deal tag.
pub const MAX_TAG_LENGTH: usize = 64;

/// Maximum number of tags on one deal.
pub const MAX_TAG_COUNT: usize = 16;

/// Maximum number of deals accepted in one seed.
///
/// Seeds larger than this will be rejected to prevent memory exhaustion.
pub const MAX_SEED_DEALS: usize = 10000;

/// Maximum number of user contexts accepted in one seed.
pub const MAX_SEED_USERS: usize = 1000;

/// Maximum length for filter search text.
///
/// Longer search strings are rejected by the app layer before filtering.
pub const MAX_SEARCH_LENGTH: usize = 256;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Stage;

    #[test]
    fn stage_count_matches_declared_order() {
        assert_eq!(STAGE_COUNT, Stage::ALL.len());
    }

    #[test]
    fn limits_are_nonzero() {
        assert!(MAX_TITLE_LENGTH > 0);
        assert!(MAX_TAG_COUNT > 0);
        assert!(MAX_SEED_DEALS > 0);
    }
}
