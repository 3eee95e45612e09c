//! Tests for users API handlers.

use super::*;
use crate::domain::ports::{MockUserRepository, UserPersistenceError};
use crate::domain::{TRACE_ID_HEADER, UserId, UserStore};
use crate::middleware::Trace;
use crate::outbound::memory::InMemoryUserRepository;
use actix_http::error::PayloadError;
use actix_http::{BoxedPayloadStream, Payload, Request};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use futures_util::stream;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

const MISSING_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn memory_state() -> HttpState {
    HttpState::from_store(UserStore::new(Arc::new(InMemoryUserRepository::new())))
}

fn failing_state() -> HttpState {
    let mut repo = MockUserRepository::new();
    repo.expect_list()
        .returning(|| Err(UserPersistenceError::unavailable("lock poisoned")));
    repo.expect_insert()
        .returning(|user| Err(UserPersistenceError::conflict(user.id().to_string())));
    repo.expect_find_by_id()
        .returning(|_| Err(UserPersistenceError::unavailable("lock poisoned")));
    repo.expect_replace()
        .returning(|_| Err(UserPersistenceError::unavailable("lock poisoned")));
    repo.expect_remove()
        .returning(|_| Err(UserPersistenceError::unavailable("lock poisoned")));
    HttpState::from_store(UserStore::new(Arc::new(repo)))
}

async fn init(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(web::scope("/api").configure(configure)),
    )
    .await
}

fn user_body(first: &str, last: &str, bio: &str) -> Value {
    json!({"firstName": first, "lastName": last, "biography": bio})
}

async fn json_body(response: ServiceResponse) -> Value {
    let bytes = actix_test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

async fn create(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    body: &Value,
) -> String {
    let request = actix_test::TestRequest::post()
        .uri("/api/users/")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let value = json_body(response).await;
    value["data"]["id"]
        .as_str()
        .expect("created record has an id")
        .to_owned()
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_record_in_envelope(memory_state: HttpState) {
    let app = init(memory_state).await;
    let bio = "x".repeat(25);
    let request = actix_test::TestRequest::post()
        .uri("/api/users/")
        .set_json(user_body("Al", "Bo", &bio))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));

    let value = json_body(response).await;
    let id = value["data"]["id"].as_str().expect("id is a string");
    assert!(UserId::new(id).is_ok(), "id should be a UUID, got {id}");
    assert_eq!(
        value,
        json!({"data": {"id": id, "firstName": "Al", "lastName": "Bo", "biography": bio}})
    );
}

#[rstest]
#[case("/api/users")]
#[case("/api/users/")]
#[actix_web::test]
async fn collection_routes_accept_optional_trailing_slash(
    memory_state: HttpState,
    #[case] uri: &str,
) {
    let app = init(memory_state).await;
    let post = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(user_body("Al", "Bo", &"x".repeat(25)))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, post).await.status(),
        StatusCode::CREATED
    );

    let get = actix_test::TestRequest::get().uri(uri).to_request();
    assert_eq!(
        actix_test::call_service(&app, get).await.status(),
        StatusCode::OK
    );
}

#[rstest]
#[case(user_body("", "Bo", &"x".repeat(25)))]
#[case(user_body("Al", "Bo", "short"))]
#[case(json!({"lastName": "Bo", "biography": "x".repeat(25)}))]
#[actix_web::test]
async fn create_rejects_invalid_fields(memory_state: HttpState, #[case] body: Value) {
    let app = init(memory_state).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/users/")
        .set_json(&body)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Please provide FirstName LastName and bio for the user"})
    );
}

#[rstest]
#[actix_web::test]
async fn create_with_malformed_json_is_internal_error(memory_state: HttpState) {
    let app = init(memory_state).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/users/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"error": "There was an error while saving the user to the database"})
    );
}

#[rstest]
#[actix_web::test]
async fn oversized_body_is_rejected_before_decoding(memory_state: HttpState) {
    let app = init(memory_state).await;
    let mut body = serde_json::to_string(&user_body("Al", "Bo", &"x".repeat(25)))
        .expect("body serializes");
    body.push_str(&" ".repeat(MAX_BODY_BYTES));
    let request = actix_test::TestRequest::post()
        .uri("/api/users/")
        .insert_header(("content-type", "application/json"))
        .set_payload(body)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"error": "something went wrong"})
    );

    let list = actix_test::TestRequest::get().uri("/api/users/").to_request();
    let listed = json_body(actix_test::call_service(&app, list).await).await;
    assert_eq!(listed, json!({"data": {}}));
}

#[rstest]
#[actix_web::test]
async fn unreadable_body_stream_is_internal_error(memory_state: HttpState) {
    let app = init(memory_state).await;
    let failing: BoxedPayloadStream = Box::pin(stream::once(async {
        Err(PayloadError::Incomplete(None))
    }));
    let (request, _) = actix_test::TestRequest::post()
        .uri("/api/users/")
        .to_request()
        .replace_payload(Payload::Stream { payload: failing });

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"error": "something went wrong"})
    );
}

#[rstest]
#[actix_web::test]
async fn list_returns_records_keyed_by_id(memory_state: HttpState) {
    let app = init(memory_state).await;
    let first = create(&app, &user_body("Al", "Bo", &"x".repeat(25))).await;
    let second = create(&app, &user_body("Cy", "Di", &"y".repeat(25))).await;

    let request = actix_test::TestRequest::get().uri("/api/users/").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let value = json_body(response).await;
    let data = value["data"].as_object().expect("data is an object");
    assert_eq!(data.len(), 2);
    assert_eq!(data[&first]["firstName"], "Al");
    assert_eq!(data[&second]["firstName"], "Cy");
    assert_eq!(data[&second]["id"], second.as_str());
}

#[rstest]
#[actix_web::test]
async fn list_on_empty_store_returns_empty_object(memory_state: HttpState) {
    let app = init(memory_state).await;
    let request = actix_test::TestRequest::get().uri("/api/users").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(json_body(response).await, json!({"data": {}}));
}

#[rstest]
#[actix_web::test]
async fn get_returns_stored_record(memory_state: HttpState) {
    let app = init(memory_state).await;
    let id = create(&app, &user_body("Al", "Bo", &"x".repeat(25))).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/users/{id}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let value = json_body(response).await;
    assert_eq!(value["data"]["id"], id.as_str());
    assert_eq!(value["data"]["lastName"], "Bo");
}

#[rstest]
#[case(MISSING_ID)]
#[case("not-a-uuid")]
#[actix_web::test]
async fn get_unknown_or_malformed_id_is_not_found(memory_state: HttpState, #[case] id: &str) {
    let app = init(memory_state).await;
    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/users/{id}"))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    assert_eq!(
        json_body(response).await,
        json!({"error": "The user with the specified ID does not exist"})
    );
}

#[rstest]
#[actix_web::test]
async fn update_returns_new_state_and_persists_it(memory_state: HttpState) {
    let app = init(memory_state).await;
    let id = create(&app, &user_body("Al", "Bo", &"x".repeat(25))).await;
    let uri = format!("/api/users/{id}");

    let put = actix_test::TestRequest::put()
        .uri(&uri)
        .set_json(user_body("Cy", "Di", &"y".repeat(30)))
        .to_request();
    let response = actix_test::call_service(&app, put).await;
    assert_eq!(response.status(), StatusCode::OK);
    let value = json_body(response).await;
    assert_eq!(value["data"]["id"], id.as_str());
    assert_eq!(value["data"]["firstName"], "Cy");

    let get = actix_test::TestRequest::get().uri(&uri).to_request();
    let fetched = json_body(actix_test::call_service(&app, get).await).await;
    assert_eq!(fetched, value);
}

#[rstest]
#[case(user_body("", "Di", &"y".repeat(30)), MISSING_ID, StatusCode::BAD_REQUEST, "Please provide name and bio for the user")]
#[case(user_body("Cy", "Di", &"y".repeat(30)), MISSING_ID, StatusCode::NOT_FOUND, "The user with the specified ID does not exist")]
#[case(user_body("Cy", "Di", &"y".repeat(30)), "12345", StatusCode::NOT_FOUND, "The user with the specified ID does not exist")]
#[actix_web::test]
async fn update_failures_map_to_status_and_message(
    memory_state: HttpState,
    #[case] body: Value,
    #[case] id: &str,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let app = init(memory_state).await;
    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/users/{id}"))
        .set_json(&body)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), status);
    assert_eq!(json_body(response).await, json!({ "error": message }));
}

#[rstest]
#[actix_web::test]
async fn update_with_malformed_json_is_internal_error(memory_state: HttpState) {
    let app = init(memory_state).await;
    let id = create(&app, &user_body("Al", "Bo", &"x".repeat(25))).await;
    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/users/{id}"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"error": "The user information could not be modified"})
    );
}

#[rstest]
#[actix_web::test]
async fn delete_succeeds_once_with_empty_body(memory_state: HttpState) {
    let app = init(memory_state).await;
    let id = create(&app, &user_body("Al", "Bo", &"x".repeat(25))).await;
    let uri = format!("/api/users/{id}");

    let first = actix_test::TestRequest::delete().uri(&uri).to_request();
    let response = actix_test::call_service(&app, first).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(actix_test::read_body(response).await.is_empty());

    let second = actix_test::TestRequest::delete().uri(&uri).to_request();
    let response = actix_test::call_service(&app, second).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn delete_unknown_id_is_not_found(memory_state: HttpState) {
    let app = init(memory_state).await;
    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/users/{MISSING_ID}"))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({"error": "The user with the specified ID does not exist"})
    );
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/api/users/"), "The users information could not be retrieved")]
#[case(actix_test::TestRequest::post().uri("/api/users/").set_json(user_body("Al", "Bo", &"x".repeat(25))), "There was an error while saving the user to the database")]
#[case(actix_test::TestRequest::get().uri(&format!("/api/users/{MISSING_ID}")), "The user information could not be retrieved")]
#[case(actix_test::TestRequest::put().uri(&format!("/api/users/{MISSING_ID}")).set_json(user_body("Al", "Bo", &"x".repeat(25))), "The user information could not be modified")]
#[case(actix_test::TestRequest::delete().uri(&format!("/api/users/{MISSING_ID}")), "The user could not be removed")]
#[actix_web::test]
async fn repository_failures_are_internal_errors(
    #[case] request: actix_test::TestRequest,
    #[case] message: &str,
) {
    let app = init(failing_state()).await;

    let response = actix_test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "error": message }));
}
