// Core algorithm exports
pub mod conversations;
pub mod feed;
pub mod filters;
pub mod listing;
pub mod swipe;

pub use conversations::{build_conversations, conversation_id, search_conversations, thread_messages};
pub use feed::{compute_feed, rank_by_preferences};
pub use filters::{matches_boat_type, matches_length_range, matches_location, matches_preferences};
pub use listing::{build_listing, requires_broker, ListingError, BROKER_LENGTH_FT, BROKER_PRICE};
pub use swipe::{Decision, InteractionLedger, SwipeMachine, SwipeState};
