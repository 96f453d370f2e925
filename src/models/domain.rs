use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Kind of vessel a listing advertises
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoatType {
    Sailboat,
    #[serde(rename = "Motor Yacht")]
    MotorYacht,
    Catamaran,
    Speedboat,
    #[serde(rename = "Fishing Boat")]
    FishingBoat,
}

impl BoatType {
    pub const ALL: [BoatType; 5] = [
        BoatType::Sailboat,
        BoatType::MotorYacht,
        BoatType::Catamaran,
        BoatType::Speedboat,
        BoatType::FishingBoat,
    ];

    /// Display name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            BoatType::Sailboat => "Sailboat",
            BoatType::MotorYacht => "Motor Yacht",
            BoatType::Catamaran => "Catamaran",
            BoatType::Speedboat => "Speedboat",
            BoatType::FishingBoat => "Fishing Boat",
        }
    }
}

impl fmt::Display for BoatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown boat type: {0}")]
pub struct UnknownBoatType(pub String);

impl FromStr for BoatType {
    type Err = UnknownBoatType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        BoatType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownBoatType(s.to_string()))
    }
}

/// Marketplace member (buyer, seller or both)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(rename = "avatarUrl", default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A boat offered for sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "imageUrls", default)]
    pub image_urls: Vec<String>,
    #[serde(rename = "videoUrl", default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub location: String,
    #[serde(rename = "lengthFt")]
    pub length_ft: f64,
    #[serde(rename = "type")]
    pub boat_type: BoatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabins: Option<u8>,
    #[serde(rename = "fuelType", default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(rename = "postedBy")]
    pub posted_by: User,
    #[serde(rename = "postedDate")]
    pub posted_date: chrono::DateTime<chrono::Utc>,
}

/// A single chat message about a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "listingId")]
    pub listing_id: String,
    #[serde(rename = "fromUserId")]
    pub from_user_id: String,
    #[serde(rename = "toUserId")]
    pub to_user_id: String,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Message {
    /// Whether `user_id` sent or received this message
    pub fn involves(&self, user_id: &str) -> bool {
        self.from_user_id == user_id || self.to_user_id == user_id
    }

    /// The participant on the other side from `user_id`
    pub fn counterpart(&self, user_id: &str) -> &str {
        if self.from_user_id == user_id {
            &self.to_user_id
        } else {
            &self.from_user_id
        }
    }
}

/// Latest state of a chat between the current user and another user about one listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub listing: Listing,
    #[serde(rename = "otherUser")]
    pub other_user: User,
    #[serde(rename = "lastMessage")]
    pub last_message: Message,
    #[serde(rename = "unreadCount")]
    pub unread_count: u32,
}

/// Per-browser discovery filters chosen on the profile page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSet {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "boatTypes", default)]
    pub boat_types: BTreeSet<BoatType>,
    #[serde(rename = "minLengthFt", default)]
    pub min_length_ft: Option<f64>,
    #[serde(rename = "maxLengthFt", default)]
    pub max_length_ft: Option<f64>,
}

impl PreferenceSet {
    /// Preferred location with surrounding whitespace removed, `None` when blank
    pub fn normalized_location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
    }
}
