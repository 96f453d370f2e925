use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{Decision, SwipeMachine};
use crate::models::{
    FeedResponse, Listing, ListingsResponse, PreferenceSet, PreferencesResponse,
    SavePreferencesRequest, SwipeRequest,
};
use crate::routes::{error_response, validation_failed, AppState};

/// Configure all swipe-session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sessions/{session_id}")
            .route("", web::delete().to(forget_session))
            .route("/feed", web::get().to(get_feed))
            .route("/like", web::post().to(like))
            .route("/dislike", web::post().to(dislike))
            .route("/reset", web::post().to(reset))
            .route("/preferences", web::get().to(get_preferences))
            .route("/preferences", web::put().to(save_preferences))
            .route("/liked", web::get().to(liked_listings))
            .route("/disliked", web::get().to(disliked_listings)),
    );
}

/// Snapshot of the machine against the current catalog and preferences
pub fn feed_response(machine: &SwipeMachine, listings: &[Listing], preferences: &PreferenceSet) -> FeedResponse {
    let feed = machine.feed(listings, preferences);
    let cursor = machine.cursor();

    FeedResponse {
        listing: feed.get(cursor).map(|listing| (*listing).clone()),
        cursor,
        remaining: feed.len().saturating_sub(cursor),
        total_results: feed.len(),
        exhausted: cursor >= feed.len(),
    }
}

/// Current card
///
/// GET /api/v1/sessions/{session_id}/feed
///
/// Preferences may have changed since the last call, so the cursor is
/// re-validated before answering.
async fn get_feed(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();
    let preferences = state.sessions.preferences(&session_id).load();
    let machine = state.sessions.machine(&session_id).await;
    let mut machine = machine.lock().await;

    let response = state.catalog.with_listings(|listings| {
        machine.refresh(listings, &preferences);
        feed_response(&machine, listings, &preferences)
    });

    HttpResponse::Ok().json(response)
}

/// POST /api/v1/sessions/{session_id}/like
async fn like(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SwipeRequest>,
) -> impl Responder {
    swipe(state, path.into_inner(), req.into_inner(), Decision::Liked).await
}

/// POST /api/v1/sessions/{session_id}/dislike
async fn dislike(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SwipeRequest>,
) -> impl Responder {
    swipe(state, path.into_inner(), req.into_inner(), Decision::Disliked).await
}

async fn swipe(
    state: web::Data<AppState>,
    session_id: String,
    req: SwipeRequest,
    decision: Decision,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_failed(&errors);
    }

    tracing::info!("Session {} {:?} listing {}", session_id, decision, req.listing_id);

    let preferences = state.sessions.preferences(&session_id).load();
    let machine = state.sessions.machine(&session_id).await;
    let mut machine = machine.lock().await;

    let response = state.catalog.with_listings(|listings| {
        match decision {
            Decision::Liked => machine.like(&req.listing_id, listings, &preferences),
            Decision::Disliked => machine.dislike(&req.listing_id, listings, &preferences),
        };
        feed_response(&machine, listings, &preferences)
    });

    HttpResponse::Ok().json(response)
}

/// POST /api/v1/sessions/{session_id}/reset
async fn reset(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();
    let preferences = state.sessions.preferences(&session_id).load();
    let machine = state.sessions.machine(&session_id).await;
    let mut machine = machine.lock().await;

    machine.reset();
    tracing::info!("Session {} reset its interactions", session_id);

    let response = state
        .catalog
        .with_listings(|listings| feed_response(&machine, listings, &preferences));

    HttpResponse::Ok().json(response)
}

/// GET /api/v1/sessions/{session_id}/preferences
async fn get_preferences(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    HttpResponse::Ok().json(state.sessions.preferences(&path.into_inner()).load())
}

/// Replace the session's preferences and re-evaluate its feed
///
/// PUT /api/v1/sessions/{session_id}/preferences
async fn save_preferences(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SavePreferencesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(&errors);
    }

    let session_id = path.into_inner();
    let preferences = PreferenceSet::from(req.into_inner());

    if let Err(e) = state.sessions.preferences(&session_id).save(&preferences) {
        tracing::error!("Failed to save preferences for session {}: {}", session_id, e);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to save preferences",
            e.to_string(),
        );
    }

    let machine = state.sessions.machine(&session_id).await;
    let mut machine = machine.lock().await;

    let feed = state.catalog.with_listings(|listings| {
        machine.refresh(listings, &preferences);
        feed_response(&machine, listings, &preferences)
    });

    HttpResponse::Ok().json(PreferencesResponse { preferences, feed })
}

/// Discard the session's swipe state and stored preferences
///
/// DELETE /api/v1/sessions/{session_id}
async fn forget_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    match state.sessions.forget(&session_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => {
            tracing::error!("Failed to forget session {}: {}", session_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to forget session", e.to_string())
        }
    }
}

/// GET /api/v1/sessions/{session_id}/liked
async fn liked_listings(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    decided_listings(state, path.into_inner(), Decision::Liked).await
}

/// GET /api/v1/sessions/{session_id}/disliked
async fn disliked_listings(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    decided_listings(state, path.into_inner(), Decision::Disliked).await
}

async fn decided_listings(state: web::Data<AppState>, session_id: String, decision: Decision) -> HttpResponse {
    let machine = state.sessions.machine(&session_id).await;
    let machine = machine.lock().await;

    let ids = match decision {
        Decision::Liked => machine.ledger().liked(),
        Decision::Disliked => machine.ledger().disliked(),
    };
    let listings = state.catalog.listings_by_ids(ids);

    HttpResponse::Ok().json(ListingsResponse {
        total_results: listings.len(),
        listings,
    })
}
