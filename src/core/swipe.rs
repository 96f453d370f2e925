use std::collections::HashSet;

use crate::core::feed::compute_feed;
use crate::models::{Listing, PreferenceSet};

/// Which side of the ledger a decision landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Liked,
    Disliked,
}

/// Liked and disliked listing ids for the current session
///
/// The two sets never overlap: an id already decided one way is left alone
/// when the opposite decision arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionLedger {
    liked: HashSet<String>,
    disliked: HashSet<String>,
}

impl InteractionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a like. Returns `true` when the ledger changed.
    pub fn like(&mut self, listing_id: &str) -> bool {
        self.record(listing_id, Decision::Liked)
    }

    /// Record a dislike. Returns `true` when the ledger changed.
    pub fn dislike(&mut self, listing_id: &str) -> bool {
        self.record(listing_id, Decision::Disliked)
    }

    fn record(&mut self, listing_id: &str, decision: Decision) -> bool {
        if self.decision(listing_id).is_some() {
            return false;
        }

        match decision {
            Decision::Liked => self.liked.insert(listing_id.to_string()),
            Decision::Disliked => self.disliked.insert(listing_id.to_string()),
        }
    }

    /// Existing decision for a listing, if any
    pub fn decision(&self, listing_id: &str) -> Option<Decision> {
        if self.liked.contains(listing_id) {
            Some(Decision::Liked)
        } else if self.disliked.contains(listing_id) {
            Some(Decision::Disliked)
        } else {
            None
        }
    }

    pub fn liked(&self) -> &HashSet<String> {
        &self.liked
    }

    pub fn disliked(&self) -> &HashSet<String> {
        &self.disliked
    }

    pub fn is_empty(&self) -> bool {
        self.liked.is_empty() && self.disliked.is_empty()
    }

    pub fn clear(&mut self) {
        self.liked.clear();
        self.disliked.clear();
    }
}

/// What the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeState<'a> {
    Presenting(&'a Listing),
    Exhausted,
}

impl<'a> SwipeState<'a> {
    pub fn listing(&self) -> Option<&'a Listing> {
        match self {
            SwipeState::Presenting(listing) => Some(listing),
            SwipeState::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, SwipeState::Exhausted)
    }
}

/// Swipe interaction state machine
///
/// Holds the cursor and the ledger only. The feed itself is recomputed from
/// the catalog and preferences on every call, so the machine never goes stale
/// relative to its inputs; `refresh` re-validates the cursor after the
/// preferences change.
///
/// Invariant: `0 <= cursor <= feed.len()`, with `cursor == feed.len()`
/// meaning exhausted.
#[derive(Debug, Clone, Default)]
pub struct SwipeMachine {
    ledger: InteractionLedger,
    cursor: usize,
}

impl SwipeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn ledger(&self) -> &InteractionLedger {
        &self.ledger
    }

    /// Current feed for this machine's ledger
    pub fn feed<'a>(&self, listings: &'a [Listing], preferences: &PreferenceSet) -> Vec<&'a Listing> {
        compute_feed(listings, preferences, self.ledger.liked(), self.ledger.disliked())
    }

    pub fn state<'a>(&self, listings: &'a [Listing], preferences: &PreferenceSet) -> SwipeState<'a> {
        match self.feed(listings, preferences).get(self.cursor) {
            Some(listing) => SwipeState::Presenting(listing),
            None => SwipeState::Exhausted,
        }
    }

    /// Record a like, then step the cursor over the recomputed feed
    ///
    /// The liked listing leaves the feed, so the one after it slides into the
    /// cursor slot and the step passes over it. That listing stays in the feed
    /// and shows again after `reset` or a preference change. Callers rely on
    /// this order, so the advance stays.
    pub fn like<'a>(
        &mut self,
        listing_id: &str,
        listings: &'a [Listing],
        preferences: &PreferenceSet,
    ) -> SwipeState<'a> {
        if !self.ledger.like(listing_id) {
            tracing::debug!("Like for {} left the ledger unchanged", listing_id);
        }
        self.advance(listings, preferences)
    }

    /// Record a dislike; steps the cursor exactly like [`SwipeMachine::like`]
    pub fn dislike<'a>(
        &mut self,
        listing_id: &str,
        listings: &'a [Listing],
        preferences: &PreferenceSet,
    ) -> SwipeState<'a> {
        if !self.ledger.dislike(listing_id) {
            tracing::debug!("Dislike for {} left the ledger unchanged", listing_id);
        }
        self.advance(listings, preferences)
    }

    /// Step forward one position, or into `Exhausted` from the last listing
    pub fn advance<'a>(&mut self, listings: &'a [Listing], preferences: &PreferenceSet) -> SwipeState<'a> {
        let feed = self.feed(listings, preferences);

        if self.cursor + 1 < feed.len() {
            self.cursor += 1;
        } else {
            self.cursor = feed.len();
            tracing::debug!("Feed exhausted after {} decisions", self.decision_count());
        }

        match feed.get(self.cursor) {
            Some(listing) => SwipeState::Presenting(listing),
            None => SwipeState::Exhausted,
        }
    }

    /// Forget every decision and start over at the top of the feed
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.cursor = 0;
    }

    /// Re-validate the cursor after the catalog or preferences changed
    ///
    /// A cursor past the end is pulled back to the end; an exhausted machine
    /// whose feed grew starts presenting again from the same position.
    pub fn refresh<'a>(&mut self, listings: &'a [Listing], preferences: &PreferenceSet) -> SwipeState<'a> {
        let feed = self.feed(listings, preferences);
        if self.cursor > feed.len() {
            self.cursor = feed.len();
        }

        match feed.get(self.cursor) {
            Some(listing) => SwipeState::Presenting(listing),
            None => SwipeState::Exhausted,
        }
    }

    fn decision_count(&self) -> usize {
        self.ledger.liked().len() + self.ledger.disliked().len()
    }
}
