use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{BoatType, PreferenceSet};

/// Treat missing, empty and whitespace-only strings alike
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Like or dislike the listing currently presented
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwipeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "listing_id", rename = "listingId")]
    pub listing_id: String,
}

/// Profile form submission; replaces the stored preference set wholesale
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_length_bounds"))]
pub struct SavePreferencesRequest {
    #[validate(length(min = 2, max = 50))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub location: Option<String>,
    #[serde(alias = "boat_types", alias = "boatPreferences", rename = "boatTypes", default)]
    pub boat_types: Vec<BoatType>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "min_length_ft", rename = "minLengthFt", default)]
    pub min_length_ft: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_length_ft", rename = "maxLengthFt", default)]
    pub max_length_ft: Option<f64>,
}

fn validate_length_bounds(req: &SavePreferencesRequest) -> Result<(), ValidationError> {
    match (req.min_length_ft, req.max_length_ft) {
        (Some(min), Some(max)) if min > max => Err(ValidationError::new("min_length_exceeds_max")),
        _ => Ok(()),
    }
}

impl From<SavePreferencesRequest> for PreferenceSet {
    fn from(req: SavePreferencesRequest) -> Self {
        PreferenceSet {
            location: req.location,
            boat_types: req.boat_types.into_iter().collect(),
            min_length_ft: req.min_length_ft,
            max_length_ft: req.max_length_ft,
        }
    }
}

/// Add-listing form submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewListingRequest {
    #[validate(length(min = 3))]
    pub name: String,
    #[validate(length(min = 10))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0))]
    pub price: f64,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(alias = "length_ft", rename = "lengthFt")]
    pub length_ft: f64,
    #[validate(length(min = 2))]
    pub location: String,
    #[serde(rename = "type")]
    pub boat_type: BoatType,
    pub year: u16,
    #[serde(default)]
    pub cabins: Option<u8>,
    #[validate(url)]
    #[serde(alias = "image_url1", rename = "imageUrl1")]
    pub image_url1: String,
    #[validate(url)]
    #[serde(alias = "image_url2", rename = "imageUrl2", default, deserialize_with = "empty_string_as_none")]
    pub image_url2: Option<String>,
    #[validate(url)]
    #[serde(alias = "image_url3", rename = "imageUrl3", default, deserialize_with = "empty_string_as_none")]
    pub image_url3: Option<String>,
    #[validate(url)]
    #[serde(alias = "video_url", rename = "videoUrl", default, deserialize_with = "empty_string_as_none")]
    pub video_url: Option<String>,
    #[validate(length(min = 1))]
    #[serde(alias = "posted_by", rename = "postedBy")]
    pub posted_by: String,
}

/// New chat message
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "listing_id", rename = "listingId")]
    pub listing_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "from_user_id", rename = "fromUserId")]
    pub from_user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "to_user_id", rename = "toUserId")]
    pub to_user_id: String,
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// `?q=` filter for the conversation list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Participants of a chat thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadQuery {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(alias = "other_user_id", rename = "otherUserId")]
    pub other_user_id: String,
}
