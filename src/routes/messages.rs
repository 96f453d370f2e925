use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ConversationQuery, ConversationsResponse, SendMessageRequest, ThreadQuery, ThreadResponse};
use crate::routes::{error_response, not_found, validation_failed, AppState};
use crate::services::MessagingError;

/// Configure messaging routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/users/{user_id}/conversations", web::get().to(list_conversations))
        .route("/messages", web::post().to(send_message))
        .route("/messages/{listing_id}", web::get().to(get_thread));
}

/// GET /api/v1/users/{user_id}/conversations?q=term
async fn list_conversations(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ConversationQuery>,
) -> impl Responder {
    let user_id = path.into_inner();
    if state.catalog.user(&user_id).is_none() {
        return not_found("User", &user_id);
    }

    let conversations = state.catalog.conversations_for(&user_id, query.q.as_deref());

    HttpResponse::Ok().json(ConversationsResponse {
        total_results: conversations.len(),
        conversations,
    })
}

/// GET /api/v1/messages/{listing_id}?userId=..&otherUserId=..
async fn get_thread(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ThreadQuery>,
) -> impl Responder {
    let listing_id = path.into_inner();

    match state.catalog.thread(&listing_id, &query.user_id, &query.other_user_id) {
        Ok((listing, other_user, messages)) => HttpResponse::Ok().json(ThreadResponse {
            listing,
            other_user,
            messages,
        }),
        Err(e) => messaging_error(e),
    }
}

/// POST /api/v1/messages
async fn send_message(state: web::Data<AppState>, req: web::Json<SendMessageRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(&errors);
    }

    match state
        .catalog
        .send_message(&req.listing_id, &req.from_user_id, &req.to_user_id, &req.content)
    {
        Ok(message) => HttpResponse::Created().json(message),
        Err(e) => messaging_error(e),
    }
}

fn messaging_error(err: MessagingError) -> HttpResponse {
    match err {
        MessagingError::ListingNotFound(id) => not_found("Listing", &id),
        MessagingError::UserNotFound(id) => not_found("User", &id),
        e @ (MessagingError::EmptyMessage | MessagingError::SelfMessage) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid message", e.to_string())
        }
    }
}
