//! # Deal Filtering
//!
//! Structured, read-only filtering for column views.
//!
//! - Deterministic matching (case-insensitive substring, exact priority)
//! - Stable: input order is preserved, never re-sorted
//! - Pure: operates on snapshots, never touches board state

use crate::deal::{Deal, Priority};
use serde::{Deserialize, Serialize};

// =============================================================================
// DEAL FILTER
// =============================================================================

/// A filter predicate over deals.
///
/// `search` matches title, client name, or owner name, case-insensitively.
/// `priority` is exact-match; `None` means no priority filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealFilter {
    /// Substring to look for, if any.
    #[serde(default)]
    pub search: Option<String>,
    /// Priority to require, if any.
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl DealFilter {
    /// The match-everything filter.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Search-text helper.
    #[must_use]
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            priority: None,
        }
    }

    /// Priority helper.
    #[must_use]
    pub fn priority(priority: Priority) -> Self {
        Self {
            search: None,
            priority: Some(priority),
        }
    }

    /// Require a priority, builder-style.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Check whether one deal passes this filter.
    #[must_use]
    pub fn matches(&self, deal: &Deal) -> bool {
        if let Some(priority) = self.priority {
            if deal.priority != priority {
                return false;
            }
        }

        match &self.search {
            None => true,
            Some(text) => {
                let needle = text.to_lowercase();
                deal.title.to_lowercase().contains(&needle)
                    || deal.client_name.to_lowercase().contains(&needle)
                    || deal.owner_name.to_lowercase().contains(&needle)
            }
        }
    }
}

/// Apply a filter to a deal snapshot.
///
/// Returns the matching subsequence in input order.
#[must_use]
pub fn filter_deals<'a>(deals: &'a [Deal], filter: &DealFilter) -> Vec<&'a Deal> {
    deals.iter().filter(|d| filter.matches(d)).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Stage;
    use crate::types::Money;

    fn fixture() -> Vec<Deal> {
        vec![
            Deal::new(
                "D1",
                "Weekend catamaran",
                "Brightwave Media",
                Money::new(150_000),
                Stage::New,
                Priority::High,
                "Astrid",
            ),
            Deal::new(
                "D2",
                "Heli transfer",
                "Fjordline Tours",
                Money::new(90_000),
                Stage::Offer,
                Priority::Low,
                "Joel",
            ),
            Deal::new(
                "D3",
                "Buggy safari",
                "brightwave media",
                Money::new(40_000),
                Stage::New,
                Priority::High,
                "Astrid",
            ),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let deals = fixture();
        let matched = filter_deals(&deals, &DealFilter::any());
        assert_eq!(matched.len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let deals = fixture();

        let by_client = filter_deals(&deals, &DealFilter::search("BRIGHTWAVE"));
        assert_eq!(by_client.len(), 2);

        let by_title = filter_deals(&deals, &DealFilter::search("heli"));
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id.as_str(), "D2");

        let by_owner = filter_deals(&deals, &DealFilter::search("joel"));
        assert_eq!(by_owner.len(), 1);
    }

    #[test]
    fn priority_is_exact_match() {
        let deals = fixture();
        let matched = filter_deals(&deals, &DealFilter::priority(Priority::High));
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|d| d.priority == Priority::High));
    }

    #[test]
    fn search_and_priority_combine() {
        let deals = fixture();
        let filter = DealFilter::search("brightwave").with_priority(Priority::High);
        let matched = filter_deals(&deals, &filter);
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn filter_is_stable() {
        let deals = fixture();
        let matched = filter_deals(&deals, &DealFilter::priority(Priority::High));
        let ids: Vec<&str> = matched.iter().map(|d| d.id.as_str()).collect();
        // Input order preserved, no re-sort.
        assert_eq!(ids, vec!["D1", "D3"]);
    }

    #[test]
    fn no_match_returns_empty() {
        let deals = fixture();
        let matched = filter_deals(&deals, &DealFilter::search("submarine"));
        assert!(matched.is_empty());
    }
}
