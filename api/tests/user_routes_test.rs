//! Profile routes of the user service

mod common;

use actix_web::{test, web};
use serde_json::json;
use std::sync::Arc;

use ms_api::app::create_user_app;
use ms_api::routes::user::UserState;
use ms_core::domain::entities::Role;
use ms_core::repositories::{RevocationStore, UserRepository};

use common::{bearer, cors, read_json, Fixture};

macro_rules! user_app {
    ($fixture:expr) => {{
        let store: Arc<dyn RevocationStore> = $fixture.store.clone();
        test::init_service(create_user_app(
            web::Data::new(UserState::new($fixture.user_service(), store)),
            $fixture.gate(),
            cors(),
        ))
        .await
    }};
}

#[actix_web::test]
async fn test_update_username() {
    let fixture = Fixture::new();
    let user = fixture.seed_user("a@x.com", "alice01", "Abc123", Role::User).await;
    let pair = fixture.tokens.issue_pair(&user.email, user.id, user.role).unwrap();
    let app = user_app!(fixture);

    let req = test::TestRequest::put()
        .uri("/users/profile")
        .insert_header(bearer(&pair.access_token))
        .set_json(json!({ "username": "alice02" }))
        .to_request();
    let (status, body) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["msg_detail"], "profile updated");
    assert_eq!(body["data"]["username"], "alice02");

    let stored = fixture.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "alice02");

    // A read after the write sees the new name, not a stale cache entry
    let req = test::TestRequest::get()
        .uri("/users/profile")
        .insert_header(bearer(&pair.access_token))
        .to_request();
    let (status, body) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["username"], "alice02");
}

#[actix_web::test]
async fn test_update_with_current_values_reports_no_changes() {
    let fixture = Fixture::new();
    let user = fixture.seed_user("a@x.com", "alice01", "Abc123", Role::User).await;
    let pair = fixture.tokens.issue_pair(&user.email, user.id, user.role).unwrap();
    let app = user_app!(fixture);

    let req = test::TestRequest::put()
        .uri("/users/profile")
        .insert_header(bearer(&pair.access_token))
        .set_json(json!({ "username": "alice01", "email": "a@x.com" }))
        .to_request();
    let (status, body) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["msg_detail"], "no changes");
}

#[actix_web::test]
async fn test_update_rejects_bad_input() {
    let fixture = Fixture::new();
    let user = fixture.seed_user("a@x.com", "alice01", "Abc123", Role::User).await;
    fixture.seed_user("b@x.com", "bobby01", "Abc123", Role::User).await;
    let pair = fixture.tokens.issue_pair(&user.email, user.id, user.role).unwrap();
    let app = user_app!(fixture);

    let cases = vec![
        (json!({}), 400, "4001"),
        (json!({ "username": "a!" }), 400, "4001"),
        (json!({ "email": "nope" }), 400, "4001"),
        (json!({ "email": "b@x.com" }), 409, "4002"),
    ];

    for (payload, status_code, code) in cases {
        let req = test::TestRequest::put()
            .uri("/users/profile")
            .insert_header(bearer(&pair.access_token))
            .set_json(&payload)
            .to_request();
        let (status, body) = read_json(test::call_service(&app, req).await).await;
        assert_eq!(status, status_code, "payload {}", payload);
        assert_eq!(body["status_code"], code, "payload {}", payload);
    }

    let stored = fixture.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "alice01");
    assert_eq!(stored.email, "a@x.com");
}

#[actix_web::test]
async fn test_profile_of_deleted_account_is_not_found() {
    let fixture = Fixture::new();
    // Valid token for an id nobody holds
    let pair = fixture.tokens.issue_pair("ghost@x.com", 404, Role::User).unwrap();
    let app = user_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/users/profile")
        .insert_header(bearer(&pair.access_token))
        .to_request();
    let (status, body) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, 404);
    assert_eq!(body["status_code"], "4040");
}

#[actix_web::test]
async fn test_profile_requires_token() {
    let fixture = Fixture::new();
    let app = user_app!(fixture);

    let req = test::TestRequest::get().uri("/users/profile").to_request();
    let (status, body) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, 401);
    assert_eq!(body["msg_detail"], "Token missing");
}
