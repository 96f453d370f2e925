// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BoatType, Conversation, Listing, Message, PreferenceSet, UnknownBoatType, User};
pub use requests::{
    ConversationQuery, NewListingRequest, SavePreferencesRequest, SendMessageRequest, SwipeRequest,
    ThreadQuery,
};
pub use responses::{
    ConversationsResponse, ErrorResponse, FeedResponse, HealthResponse, ListingsResponse,
    LocationsResponse, PreferencesResponse, ThreadResponse,
};
