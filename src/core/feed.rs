use std::collections::HashSet;

use crate::core::filters::{matches_location, matches_preferences};
use crate::models::{Listing, PreferenceSet};

/// Build the discovery feed from the full catalog
///
/// # Pipeline Stages
/// 1. Boat type filter
/// 2. Length range filter
/// 3. Location affinity (stable partition, matching locations first)
/// 4. Interaction exclusion (liked and disliked ids removed)
///
/// Pure and deterministic: the same inputs always give the same sequence, so
/// callers recompute it freely instead of caching it.
pub fn compute_feed<'a>(
    all_listings: &'a [Listing],
    preferences: &PreferenceSet,
    liked_ids: &HashSet<String>,
    disliked_ids: &HashSet<String>,
) -> Vec<&'a Listing> {
    let ranked = rank_by_preferences(all_listings, preferences);

    // Stage 4 runs last so a decision removes the listing whatever the filters say
    ranked
        .into_iter()
        .filter(|listing| !liked_ids.contains(&listing.id) && !disliked_ids.contains(&listing.id))
        .collect()
}

/// Stages 1 to 3 only: the feed as it looks with an empty ledger
pub fn rank_by_preferences<'a>(
    all_listings: &'a [Listing],
    preferences: &PreferenceSet,
) -> Vec<&'a Listing> {
    let mut listings: Vec<&Listing> = all_listings
        .iter()
        .filter(|listing| matches_preferences(listing, preferences))
        .collect();

    if let Some(preferred) = preferences.normalized_location() {
        // sort_by_key is stable; false orders before true
        listings.sort_by_key(|listing| !matches_location(listing, preferred));
    }

    listings
}
