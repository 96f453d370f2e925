use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::models::{BoatType, Listing, Message, User};

const BUILTIN_CATALOG: &str = include_str!("../../fixtures/catalog.json");

/// Errors that can occur when loading fixture data
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse fixture data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Listing as stored on disk: the owner is referenced by id
#[derive(Debug, Clone, Deserialize)]
struct ListingRecord {
    id: String,
    name: String,
    description: String,
    price: f64,
    #[serde(rename = "imageUrls", default)]
    image_urls: Vec<String>,
    #[serde(rename = "videoUrl", default)]
    video_url: Option<String>,
    location: String,
    #[serde(rename = "lengthFt")]
    length_ft: f64,
    #[serde(rename = "type")]
    boat_type: BoatType,
    #[serde(default)]
    manufacturer: Option<String>,
    year: u16,
    #[serde(default)]
    cabins: Option<u8>,
    #[serde(rename = "fuelType", default)]
    fuel_type: Option<String>,
    #[serde(rename = "postedBy")]
    posted_by: String,
    #[serde(rename = "postedDate")]
    posted_date: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    listings: Vec<ListingRecord>,
    #[serde(default)]
    messages: Vec<Message>,
}

/// Static users, listings and messages loaded once at start-up
#[derive(Debug, Clone, Default)]
pub struct FixtureData {
    pub users: Vec<User>,
    pub listings: Vec<Listing>,
    pub messages: Vec<Message>,
}

impl FixtureData {
    /// The catalog compiled into the binary
    pub fn builtin() -> Result<Self, FixtureError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog from a JSON file in the built-in format
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path.as_ref())?;
        tracing::info!("Loading fixtures from {}", path.as_ref().display());
        Self::from_json(&contents)
    }

    /// Parse a catalog document
    ///
    /// Listings whose owner is not among the users are dropped with a warning.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let file: FixtureFile = serde_json::from_str(json)?;

        let users_by_id: HashMap<&str, &User> =
            file.users.iter().map(|u| (u.id.as_str(), u)).collect();

        let listings = file
            .listings
            .into_iter()
            .filter_map(|record| match users_by_id.get(record.posted_by.as_str()) {
                Some(owner) => Some(record.into_listing((*owner).clone())),
                None => {
                    tracing::warn!(
                        "Dropping listing {} posted by unknown user {}",
                        record.id,
                        record.posted_by
                    );
                    None
                }
            })
            .collect();

        Ok(Self {
            listings,
            messages: file.messages,
            users: file.users,
        })
    }
}

impl ListingRecord {
    fn into_listing(self, posted_by: User) -> Listing {
        Listing {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_urls: self.image_urls,
            video_url: self.video_url,
            location: self.location,
            length_ft: self.length_ft,
            boat_type: self.boat_type,
            manufacturer: self.manufacturer,
            year: self.year,
            cabins: self.cabins,
            fuel_type: self.fuel_type,
            posted_by,
            posted_date: self.posted_date,
        }
    }
}
