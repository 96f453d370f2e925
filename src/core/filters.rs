use crate::models::{Listing, PreferenceSet};

/// Stage 1: boat type filter
///
/// An empty type set means "any type".
#[inline]
pub fn matches_boat_type(listing: &Listing, preferences: &PreferenceSet) -> bool {
    preferences.boat_types.is_empty() || preferences.boat_types.contains(&listing.boat_type)
}

/// Stage 2: length range filter
///
/// Both bounds are inclusive and applied independently.
#[inline]
pub fn matches_length_range(listing: &Listing, preferences: &PreferenceSet) -> bool {
    if let Some(min) = preferences.min_length_ft {
        if listing.length_ft < min {
            return false;
        }
    }

    if let Some(max) = preferences.max_length_ft {
        if listing.length_ft > max {
            return false;
        }
    }

    true
}

/// Stage 3 predicate: does the listing sit in (or contain) the preferred location
///
/// Case-insensitive. Equality or substring in either direction, so "Miami"
/// matches "Miami, FL" and "Miami, FL, USA" matches "Miami, FL".
/// `preferred` must already be trimmed and non-empty.
#[inline]
pub fn matches_location(listing: &Listing, preferred: &str) -> bool {
    let listing_location = listing.location.trim().to_lowercase();
    let preferred = preferred.to_lowercase();

    if listing_location.is_empty() {
        return false;
    }

    listing_location == preferred
        || listing_location.contains(&preferred)
        || preferred.contains(&listing_location)
}

/// Hard filters (type and length), everything except ranking and the ledger
#[inline]
pub fn matches_preferences(listing: &Listing, preferences: &PreferenceSet) -> bool {
    matches_boat_type(listing, preferences) && matches_length_range(listing, preferences)
}
