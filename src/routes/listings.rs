use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use crate::core::listing::{build_listing, ListingError};
use crate::models::{LocationsResponse, NewListingRequest};
use crate::routes::{error_response, not_found, validation_failed, AppState};

/// Configure catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/listings", web::post().to(submit_listing))
        .route("/listings/{listing_id}", web::get().to(get_listing))
        .route("/locations", web::get().to(get_locations));
}

/// GET /api/v1/listings/{listing_id}
async fn get_listing(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let listing_id = path.into_inner();
    match state.catalog.listing(&listing_id) {
        Some(listing) => HttpResponse::Ok().json(listing),
        None => not_found("Listing", &listing_id),
    }
}

/// Distinct listing locations for the location picker
///
/// GET /api/v1/locations
async fn get_locations(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(LocationsResponse {
        locations: state.catalog.locations(),
    })
}

/// Add-listing form submission
///
/// POST /api/v1/listings
async fn submit_listing(state: web::Data<AppState>, req: web::Json<NewListingRequest>) -> impl Responder {
    let req = req.into_inner();

    let result = match state.catalog.user(&req.posted_by) {
        Some(owner) => build_listing(req, owner, chrono::Utc::now()),
        None => Err(ListingError::UnknownUser(req.posted_by.clone())),
    };

    match result {
        Ok(listing) => {
            state.catalog.add_listing(listing.clone());
            HttpResponse::Created().json(listing)
        }
        Err(ListingError::Validation(errors)) => validation_failed(&errors),
        Err(e @ ListingError::InvalidYear { .. }) => {
            error_response(StatusCode::BAD_REQUEST, "Validation failed", e.to_string())
        }
        Err(e @ ListingError::BrokerRequired) => {
            error_response(StatusCode::FORBIDDEN, "Broker account required", e.to_string())
        }
        Err(ListingError::UnknownUser(user_id)) => not_found("User", &user_id),
    }
}
