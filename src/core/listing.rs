use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;
use validator::Validate;

use crate::models::{Listing, NewListingRequest, User};

/// Listings longer than this need a broker account
pub const BROKER_LENGTH_FT: f64 = 26.0;

/// Listings priced above this need a broker account
pub const BROKER_PRICE: f64 = 50_000.0;

const MIN_YEAR: u16 = 1900;

/// Errors that can occur when submitting a listing
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Year must be between {min} and {max}, got {year}")]
    InvalidYear { year: u16, min: u16, max: u16 },

    #[error("Broker account required for listings over 26 ft or priced above 50000")]
    BrokerRequired,

    #[error("Unknown user: {0}")]
    UnknownUser(String),
}

/// Whether a private seller may list this boat themselves
#[inline]
pub fn requires_broker(length_ft: f64, price: f64) -> bool {
    length_ft > BROKER_LENGTH_FT || price > BROKER_PRICE
}

/// Validate an add-listing submission and turn it into a catalog entry
pub fn build_listing(
    request: NewListingRequest,
    owner: User,
    now: DateTime<Utc>,
) -> Result<Listing, ListingError> {
    request.validate()?;

    let max_year = u16::try_from(now.year() + 1).unwrap_or(u16::MAX);
    if request.year < MIN_YEAR || request.year > max_year {
        return Err(ListingError::InvalidYear {
            year: request.year,
            min: MIN_YEAR,
            max: max_year,
        });
    }

    if requires_broker(request.length_ft, request.price) {
        tracing::info!(
            "Refusing private listing {:?}: {} ft at {}",
            request.name,
            request.length_ft,
            request.price
        );
        return Err(ListingError::BrokerRequired);
    }

    let image_urls = std::iter::once(request.image_url1)
        .chain(request.image_url2)
        .chain(request.image_url3)
        .collect();

    Ok(Listing {
        id: format!("listing-{}", uuid::Uuid::new_v4()),
        name: request.name,
        description: request.description,
        price: request.price,
        image_urls,
        video_url: request.video_url,
        location: request.location,
        length_ft: request.length_ft,
        boat_type: request.boat_type,
        manufacturer: None,
        year: request.year,
        cabins: request.cabins.filter(|&c| c > 0),
        fuel_type: None,
        posted_by: owner,
        posted_date: now,
    })
}
