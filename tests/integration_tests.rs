// Integration tests for the YachtRow HTTP surface

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use yachtrow::config::{Settings, StorageBackend};
use yachtrow::models::{FeedResponse, ListingsResponse, PreferencesResponse};
use yachtrow::routes::{configure_extractors, configure_routes, AppState};

fn test_state() -> AppState {
    yachtrow::build_state(&Settings::default()).expect("default state")
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_extractors)
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let app = test_app!(test_state());
    let resp: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/health").to_request(),
    )
    .await;
    assert_eq!(resp["status"], "healthy");
}

#[actix_web::test]
async fn test_fresh_session_presents_first_listing() {
    let app = test_app!(test_state());
    let feed: FeedResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/sessions/s1/feed").to_request(),
    )
    .await;

    assert_eq!(feed.cursor, 0);
    assert_eq!(feed.total_results, 7);
    assert!(!feed.exhausted);
    assert_eq!(feed.listing.unwrap().id, "listing1");
}

#[actix_web::test]
async fn test_swipe_until_exhausted_then_reset() {
    let app = test_app!(test_state());

    let prefs: PreferencesResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/sessions/s2/preferences")
            .set_json(json!({ "boatTypes": ["Motor Yacht"] }))
            .to_request(),
    )
    .await;
    assert_eq!(prefs.feed.total_results, 2);
    assert_eq!(prefs.feed.listing.as_ref().unwrap().id, "listing1");

    let feed: FeedResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/sessions/s2/like")
            .set_json(json!({ "listingId": "listing1" }))
            .to_request(),
    )
    .await;
    assert_eq!(feed.total_results, 1);
    assert!(feed.exhausted);
    assert!(feed.listing.is_none());

    let liked: ListingsResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/sessions/s2/liked").to_request(),
    )
    .await;
    assert_eq!(liked.total_results, 1);
    assert_eq!(liked.listings[0].id, "listing1");

    let feed: FeedResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/v1/sessions/s2/reset").to_request(),
    )
    .await;
    assert_eq!(feed.cursor, 0);
    assert_eq!(feed.total_results, 2);
    assert_eq!(feed.listing.unwrap().id, "listing1");
}

#[actix_web::test]
async fn test_relaxing_preferences_recovers_exhausted_feed() {
    let app = test_app!(test_state());

    test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/sessions/s3/preferences")
            .set_json(json!({ "boatTypes": ["Catamaran"] }))
            .to_request(),
    )
    .await;

    let feed: FeedResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/sessions/s3/dislike")
            .set_json(json!({ "listingId": "listing5" }))
            .to_request(),
    )
    .await;
    assert!(feed.exhausted);

    let prefs: PreferencesResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/sessions/s3/preferences")
            .set_json(json!({ "boatTypes": [] }))
            .to_request(),
    )
    .await;
    assert!(!prefs.feed.exhausted);
    assert_eq!(prefs.feed.total_results, 6);
    assert!(prefs.feed.listing.is_some());
}

#[actix_web::test]
async fn test_sessions_are_independent() {
    let app = test_app!(test_state());

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/sessions/a/like")
            .set_json(json!({ "listingId": "listing1" }))
            .to_request(),
    )
    .await;

    let feed: FeedResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/sessions/b/feed").to_request(),
    )
    .await;
    assert_eq!(feed.total_results, 7);
}

#[actix_web::test]
async fn test_forgetting_session_clears_preferences_and_ledger() {
    let app = test_app!(test_state());

    test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/sessions/gone/preferences")
            .set_json(json!({ "boatTypes": ["Catamaran"] }))
            .to_request(),
    )
    .await;
    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/sessions/gone/like")
            .set_json(json!({ "listingId": "listing3" }))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/v1/sessions/gone").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let feed: FeedResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/sessions/gone/feed").to_request(),
    )
    .await;
    assert_eq!(feed.cursor, 0);
    assert_eq!(feed.total_results, 7);
}

#[actix_web::test]
async fn test_invalid_preferences_rejected() {
    let app = test_app!(test_state());
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/sessions/s4/preferences")
            .set_json(json!({ "minLengthFt": 80, "maxLengthFt": 20 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_preferences_persist_in_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.storage.backend = StorageBackend::File;
    settings.storage.path = dir.path().join("prefs.json");

    {
        let app = test_app!(yachtrow::build_state(&settings).unwrap());
        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/v1/sessions/persist/preferences")
                .set_json(json!({ "location": "Monaco", "boatTypes": ["Sailboat"] }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let app = test_app!(yachtrow::build_state(&settings).unwrap());
    let prefs: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/sessions/persist/preferences").to_request(),
    )
    .await;
    assert_eq!(prefs["location"], "Monaco");
    assert_eq!(prefs["boatTypes"], json!(["Sailboat"]));
}

#[actix_web::test]
async fn test_listing_lookup_and_not_found() {
    let app = test_app!(test_state());

    let listing: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/listings/listing2").to_request(),
    )
    .await;
    assert_eq!(listing["type"], "Sailboat");
    assert_eq!(listing["postedBy"]["name"], "Alice Skipper");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/listings/listing404").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_submit_listing_broker_rule() {
    let app = test_app!(test_state());
    let mut body = json!({
        "name": "Bay Runner",
        "description": "Tidy little runabout for the bay.",
        "price": 20000,
        "lengthFt": 18,
        "location": "Tampa, FL",
        "type": "Speedboat",
        "year": 2015,
        "imageUrl1": "https://placehold.co/800x600.png",
        "postedBy": "user1"
    });

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/v1/listings").set_json(&body).to_request(),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let feed: FeedResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/sessions/s5/feed").to_request(),
    )
    .await;
    assert_eq!(feed.total_results, 8);

    let fetched = test::call_service(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/listings/{}", id)).to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);

    body["lengthFt"] = json!(40);
    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/v1/listings").set_json(&body).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_conversations_and_threads() {
    let app = test_app!(test_state());

    let convos: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/users/user1/conversations").to_request(),
    )
    .await;
    assert_eq!(convos["totalResults"], 2);

    let filtered: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/user1/conversations?q=captain")
            .to_request(),
    )
    .await;
    assert_eq!(filtered["totalResults"], 1);
    assert_eq!(filtered["conversations"][0]["otherUser"]["id"], "user3");

    let thread: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/messages/listing1?userId=user2&otherUserId=user1")
            .to_request(),
    )
    .await;
    assert_eq!(thread["messages"].as_array().unwrap().len(), 3);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/messages/listing1?userId=user2&otherUserId=user99")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/messages")
            .set_json(json!({
                "listingId": "listing1",
                "fromUserId": "user2",
                "toUserId": "user1",
                "content": "Wednesday works."
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let thread: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/messages/listing1?userId=user1&otherUserId=user2")
            .to_request(),
    )
    .await;
    assert_eq!(thread["messages"].as_array().unwrap().len(), 4);
    assert_eq!(thread["messages"][3]["content"], "Wednesday works.");
}

#[actix_web::test]
async fn test_malformed_json_body_gets_error_response() {
    let app = test_app!(test_state());
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/sessions/s9/like")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"listingId\": ")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
    assert_eq!(body["status_code"], 400);
}
