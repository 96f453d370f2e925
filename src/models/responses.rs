use serde::{Deserialize, Serialize};

use crate::models::domain::{Conversation, Listing, Message, User};

/// Swipe feed state as seen by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub listing: Option<Listing>,
    pub cursor: usize,
    pub remaining: usize,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    pub exhausted: bool,
}

/// Plain list of listings (liked, disliked)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsResponse {
    pub listings: Vec<Listing>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationsResponse {
    pub conversations: Vec<Conversation>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// One chat thread, oldest message first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadResponse {
    pub listing: Listing,
    #[serde(rename = "otherUser")]
    pub other_user: User,
    pub messages: Vec<Message>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Saved preferences together with the feed they produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub preferences: crate::models::domain::PreferenceSet,
    pub feed: FeedResponse,
}
