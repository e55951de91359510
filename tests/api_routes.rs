use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use seat_booking::{
    auth::jwt::{JwtKeys, encode_token, make_access_claims},
    db::dao::{DaoBase, UserDao},
    routes::API_PREFIX,
    test_helpers::{TEST_JWT_SECRET, sqlite_state, test_app},
};

fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

async fn app() -> (Router, sea_orm::DatabaseConnection) {
    let state = sqlite_state().await.expect("sqlite state");
    let db = state.db.clone();
    (test_app(state), db)
}

fn bearer(user_id: &uuid::Uuid) -> String {
    let keys = JwtKeys::from_secret(TEST_JWT_SECRET.as_bytes());
    let token = encode_token(&keys, &make_access_claims(user_id, 3600)).expect("encode token");
    format!("Bearer {token}")
}

async fn json_response(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json: Value = serde_json::from_slice(&body).expect("body should be json");
    (status, json)
}

fn json_request(method: &str, path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(api_path(path))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(api_path(path))
        .body(Body::empty())
        .expect("request should build")
}

async fn create_movie(app: &Router, title: &str) -> String {
    let (status, json) = json_response(
        app,
        json_request(
            "POST",
            "/movies",
            json!({
                "title": title,
                "description": "A test screening",
                "release_date": "1979-05-25",
                "duration": 117
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"]["id"].as_str().expect("movie id").to_string()
}

async fn create_seat(app: &Router, seat_number: &str) -> String {
    let (status, json) = json_response(
        app,
        json_request("POST", "/seats", json!({ "seat_number": seat_number })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"]["id"].as_str().expect("seat id").to_string()
}

async fn book(app: &Router, seat_id: &str, movie_id: &str) -> (StatusCode, Value) {
    json_response(
        app,
        json_request(
            "POST",
            &format!("/seats/{seat_id}/book"),
            json!({ "movie_id": movie_id }),
        ),
    )
    .await
}

#[tokio::test]
async fn booking_the_same_seat_twice_for_a_movie_is_rejected() {
    let (app, _) = app().await;
    let movie = create_movie(&app, "Alien").await;
    let seat = create_seat(&app, "A1").await;

    let (status, json) = book(&app, &seat, &movie).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["movie"]["id"], movie.as_str());
    assert_eq!(json["data"]["seat"]["seat_number"], "A1");
    assert!(json["data"]["booking_date"].is_string());

    let (status, json) = book(&app, &seat, &movie).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Seat already booked for this movie.");
    assert!(json["data"].is_null());

    let (_, json) = json_response(&app, get("/bookings")).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn same_seat_can_be_booked_for_different_movies() {
    let (app, _) = app().await;
    let alien = create_movie(&app, "Alien").await;
    let brazil = create_movie(&app, "Brazil").await;
    let seat = create_seat(&app, "B2").await;

    let (first, _) = book(&app, &seat, &alien).await;
    let (second, _) = book(&app, &seat, &brazil).await;
    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CREATED);
}

#[tokio::test]
async fn single_seat_booking_validates_movie_id() {
    let (app, _) = app().await;
    let seat = create_seat(&app, "C3").await;

    let (status, json) = json_response(
        &app,
        json_request("POST", &format!("/seats/{seat}/book"), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "movie_id is required.");

    let (status, json) = book(&app, &seat, &uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid movie_id.");

    let (status, json) = book(&app, &seat, "not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid movie_id.");

    let movie = create_movie(&app, "Alien").await;
    let (status, _) = book(&app, &uuid::Uuid::new_v4().to_string(), &movie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_movie_cascades_to_its_bookings_only() {
    let (app, _) = app().await;
    let alien = create_movie(&app, "Alien").await;
    let brazil = create_movie(&app, "Brazil").await;
    let a1 = create_seat(&app, "A1").await;
    let a2 = create_seat(&app, "A2").await;
    book(&app, &a1, &alien).await;
    book(&app, &a2, &alien).await;
    book(&app, &a1, &brazil).await;

    let (status, json) = json_response(
        &app,
        json_request("POST", &format!("/movies/{alien}/delete-movie"), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["message"], "Movie 'Alien' deleted successfully!");
    assert_eq!(json["data"]["bookings_deleted"], 2);

    let (status, _) = json_response(&app, get(&format!("/movies/{alien}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, bookings) = json_response(&app, get("/bookings")).await;
    let bookings = bookings["data"].as_array().expect("bookings array");
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["movie"]["title"], "Brazil");

    let (_, seats) = json_response(&app, get("/seats")).await;
    assert_eq!(seats["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn deleting_a_seat_removes_its_bookings() {
    let (app, _) = app().await;
    let movie = create_movie(&app, "Alien").await;
    let seat = create_seat(&app, "D4").await;
    book(&app, &seat, &movie).await;

    let (status, json) = json_response(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(api_path(&format!("/seats/{seat}")))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["bookings_deleted"], 1);

    let (_, bookings) = json_response(&app, get("/bookings")).await;
    assert_eq!(bookings["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn update_showtime_requires_a_valid_showtime() {
    let (app, _) = app().await;
    let movie = create_movie(&app, "Alien").await;
    let path = format!("/movies/{movie}/update-showtime");

    let (status, json) = json_response(&app, json_request("POST", &path, json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap_or_default().contains("showtime"));

    let (status, _) = json_response(
        &app,
        json_request("POST", &path, json!({ "showtime": "tomorrow" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = json_response(
        &app,
        json_request("POST", &path, json!({ "showtime": "2026-03-01T19:30:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["message"], "Showtime updated for 'Alien'");
    assert!(json["data"]["showtime"].is_string());

    let (status, _) = json_response(
        &app,
        json_request(
            "POST",
            &format!("/movies/{}/update-showtime", uuid::Uuid::new_v4()),
            json!({ "showtime": "2026-03-01T19:30:00Z" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn movies_are_listed_by_title_and_validated() {
    let (app, _) = app().await;
    create_movie(&app, "Zardoz").await;
    create_movie(&app, "Alien").await;

    let (_, json) = json_response(&app, get("/movies")).await;
    let titles: Vec<_> = json["data"]
        .as_array()
        .expect("movies array")
        .iter()
        .map(|movie| movie["title"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(titles, ["Alien", "Zardoz"]);

    let (status, _) = json_response(
        &app,
        json_request(
            "POST",
            "/movies",
            json!({
                "title": "Short",
                "description": "",
                "release_date": "2020-01-01",
                "duration": 0
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = json_response(
        &app,
        Request::builder()
            .method("POST")
            .uri(api_path("/movies"))
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .expect("request should build"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn patch_movie_updates_only_given_fields() {
    let (app, _) = app().await;
    let movie = create_movie(&app, "Alien").await;

    let (status, json) = json_response(
        &app,
        json_request("PATCH", &format!("/movies/{movie}"), json!({ "duration": 120 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["data"]["duration"], 120);
    assert_eq!(json["data"]["title"], "Alien");
}

#[tokio::test]
async fn anonymous_bookings_share_one_guest_user() {
    let (app, db) = app().await;
    let movie = create_movie(&app, "Alien").await;
    let a1 = create_seat(&app, "A1").await;
    let a2 = create_seat(&app, "A2").await;

    let (_, first) = book(&app, &a1, &movie).await;
    let (_, second) = book(&app, &a2, &movie).await;
    assert_eq!(first["data"]["user"], second["data"]["user"]);

    let guest = UserDao::new(&db)
        .find_by_username("guest")
        .await
        .expect("lookup should succeed")
        .expect("guest should exist");
    assert_eq!(first["data"]["user"], guest.id.to_string());
}

#[tokio::test]
async fn user_me_filter_applies_only_to_authenticated_callers() {
    let (app, db) = app().await;
    let alice = UserDao::new(&db)
        .create_user("alice")
        .await
        .expect("create user");
    let movie = create_movie(&app, "Alien").await;
    let a1 = create_seat(&app, "A1").await;
    let a2 = create_seat(&app, "A2").await;

    let (status, json) = json_response(
        &app,
        Request::builder()
            .method("POST")
            .uri(api_path("/bookings"))
            .header("authorization", bearer(&alice.id))
            .header("content-type", "application/json")
            .body(Body::from(json!({ "movie_id": movie, "seat_id": a1 }).to_string()))
            .expect("request should build"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["user"], alice.id.to_string());
    book(&app, &a2, &movie).await;

    let (_, mine) = json_response(
        &app,
        Request::builder()
            .uri(api_path("/bookings?user=me"))
            .header("authorization", bearer(&alice.id))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await;
    let mine = mine["data"].as_array().expect("bookings array");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["seat"]["seat_number"], "A1");

    let (_, everyone) = json_response(&app, get("/bookings?user=me")).await;
    assert_eq!(everyone["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn invalid_or_unknown_tokens_are_unauthorized() {
    let (app, _) = app().await;

    let (status, _) = json_response(
        &app,
        Request::builder()
            .uri(api_path("/bookings"))
            .header("authorization", "Bearer not-a-token")
            .body(Body::empty())
            .expect("request should build"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = json_response(
        &app,
        Request::builder()
            .uri(api_path("/bookings"))
            .header("authorization", bearer(&uuid::Uuid::new_v4()))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Unknown user");
}

#[tokio::test]
async fn generic_booking_create_and_update_reject_bad_references() {
    let (app, _) = app().await;
    let movie = create_movie(&app, "Alien").await;
    let a1 = create_seat(&app, "A1").await;
    let a2 = create_seat(&app, "A2").await;

    let (status, json) = json_response(
        &app,
        json_request(
            "POST",
            "/bookings",
            json!({ "movie_id": movie, "seat_id": uuid::Uuid::new_v4() }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid seat_id.");

    let (_, first) = book(&app, &a1, &movie).await;
    let (_, second) = book(&app, &a2, &movie).await;
    let second_id = second["data"]["id"].as_str().expect("booking id");

    let (status, json) = json_response(
        &app,
        json_request("PATCH", &format!("/bookings/{second_id}"), json!({ "seat_id": a1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Seat already booked for this movie.");

    let (status, json) = json_response(
        &app,
        json_request("PUT", &format!("/bookings/{second_id}"), json!({ "seat_id": a2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "movie_id is required.");

    let first_id = first["data"]["id"].as_str().expect("booking id");
    let (status, _) = json_response(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(api_path(&format!("/bookings/{first_id}")))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = json_response(
        &app,
        json_request("PATCH", &format!("/bookings/{second_id}"), json!({ "seat_id": a1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["data"]["seat"]["seat_number"], "A1");
}

#[tokio::test]
async fn movie_list_returns_every_tied_title_exactly_once() {
    let (app, db) = app().await;
    let movies = seat_booking::services::ServiceContext::new(&db).movie();
    for _ in 0..105 {
        movies
            .create(seat_booking::services::movie_service::MovieInput {
                title: "Metropolis".to_string(),
                description: "Restored print".to_string(),
                release_date: chrono::NaiveDate::from_ymd_opt(1927, 1, 10).expect("valid date"),
                duration: 153,
                showtime: None,
            })
            .await
            .expect("movie should be created");
    }

    let (status, json) = json_response(&app, get("/movies")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = json["data"]
        .as_array()
        .expect("movies array")
        .iter()
        .map(|movie| movie["id"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(ids.len(), 105);
    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), 105);
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted, "ties should fall back to id order");
}
