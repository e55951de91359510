use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;
use tokio::task::JoinSet;

use seat_booking::{
    config::DatabaseConfig,
    db::{
        connection,
        dao::{BookingDao, DaoBase, DaoLayerError},
        entities::{movie, seat, user},
    },
    error::AppError,
    services::{
        ServiceContext, booking_service::SEAT_ALREADY_BOOKED, movie_service::MovieInput,
    },
    state::AppState,
    test_helpers::test_config,
};

const WORKERS: usize = 8;

/// A pooled database in a temporary file, so concurrent requests use separate connections.
async fn file_state(dir: &TempDir) -> Arc<AppState> {
    let mut cfg = test_config();
    cfg.database = DatabaseConfig {
        url: format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("bookings.db").display()
        ),
        max_connections: WORKERS as u32,
        min_idle: 1,
    };
    let db = connection::connect(&cfg.database)
        .await
        .expect("file database should open");
    AppState::new(cfg, db)
}

async fn fixtures(state: &AppState) -> (movie::Model, Vec<seat::Model>, user::Model) {
    let services = ServiceContext::from_state(state);
    let movie = services
        .movie()
        .create(MovieInput {
            title: "Alien".to_string(),
            description: "Late show".to_string(),
            release_date: NaiveDate::from_ymd_opt(1979, 5, 25).expect("valid date"),
            duration: 117,
            showtime: None,
        })
        .await
        .expect("movie should be created");
    let mut seats = Vec::new();
    for number in ["A1", "A2", "A3"] {
        seats.push(
            services
                .seat()
                .create(number)
                .await
                .expect("seat should be created"),
        );
    }
    let guest = services
        .user()
        .guest(&state.guest)
        .await
        .expect("guest should resolve");
    (movie, seats, guest)
}

async fn booking_count(db: &DatabaseConnection) -> usize {
    ServiceContext::new(db)
        .booking()
        .list(None)
        .await
        .expect("bookings should list")
        .len()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_single_seat_bookings_have_one_winner() {
    let dir = TempDir::new().expect("temp dir");
    let state = file_state(&dir).await;
    let (movie, seats, guest) = fixtures(&state).await;
    let movie_id = movie.id.to_string();
    let seat_id = seats[0].id;

    let mut tasks = JoinSet::new();
    for _ in 0..WORKERS {
        let db = state.db.clone();
        let movie_id = movie_id.clone();
        let guest = guest.clone();
        tasks.spawn(async move {
            ServiceContext::new(&db)
                .booking()
                .book_seat(&seat_id, Some(movie_id.as_str()), &guest)
                .await
        });
    }

    let mut booked = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.expect("task should not panic") {
            Ok(_) => booked += 1,
            Err(AppError::BadRequest(message)) => assert_eq!(message, SEAT_ALREADY_BOOKED),
            Err(other) => panic!("unexpected booking error: {other:?}"),
        }
    }
    assert_eq!(booked, 1);
    assert_eq!(booking_count(&state.db).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_multi_seat_bookings_book_each_seat_once() {
    let dir = TempDir::new().expect("temp dir");
    let state = file_state(&dir).await;
    let (movie, seats, guest) = fixtures(&state).await;
    let movie_id = movie.id;
    let seat_ids: Vec<_> = seats.iter().map(|seat| seat.id).collect();

    let mut tasks = JoinSet::new();
    for _ in 0..WORKERS {
        let db = state.db.clone();
        let seat_ids = seat_ids.clone();
        let guest = guest.clone();
        tasks.spawn(async move {
            ServiceContext::new(&db)
                .booking()
                .book_seats(&movie_id, &seat_ids, &guest)
                .await
        });
    }

    let mut labels = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let booked = joined
            .expect("task should not panic")
            .expect("multi-seat booking should skip taken seats");
        labels.extend(booked);
    }
    labels.sort();
    assert_eq!(labels, ["A1", "A2", "A3"]);
    assert_eq!(booking_count(&state.db).await, 3);
}

#[tokio::test]
async fn storage_rejects_a_second_booking_for_the_same_pair() {
    let dir = TempDir::new().expect("temp dir");
    let state = file_state(&dir).await;
    let (movie, seats, guest) = fixtures(&state).await;
    let dao = BookingDao::new(&state.db);

    dao.insert_with(&state.db, movie.id, seats[0].id, guest.id)
        .await
        .expect("first insert should succeed");
    let err = dao
        .insert_with(&state.db, movie.id, seats[0].id, guest.id)
        .await
        .expect_err("second insert should hit the unique key");
    assert!(matches!(err, DaoLayerError::Duplicate(_)), "{err:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_grid_visits_seed_the_default_grid_once() {
    let dir = TempDir::new().expect("temp dir");
    let state = file_state(&dir).await;

    let mut tasks = JoinSet::new();
    for _ in 0..4 {
        let db = state.db.clone();
        tasks.spawn(async move {
            ServiceContext::new(&db)
                .seat()
                .ensure_default_grid("ABCDE", 5)
                .await
        });
    }

    let mut seeded = 0;
    while let Some(joined) = tasks.join_next().await {
        if joined
            .expect("task should not panic")
            .expect("seeding should not fail")
        {
            seeded += 1;
        }
    }
    assert_eq!(seeded, 1);

    let seats = ServiceContext::new(&state.db)
        .seat()
        .list()
        .await
        .expect("seats should list");
    assert_eq!(seats.len(), 25);
}

#[tokio::test]
async fn seat_numbers_are_unique() {
    let dir = TempDir::new().expect("temp dir");
    let state = file_state(&dir).await;
    let seats = ServiceContext::from_state(&state).seat();

    seats.create("Z9").await.expect("first seat should be created");
    let err = seats
        .create("Z9")
        .await
        .expect_err("second seat with the same number should fail");
    assert!(
        matches!(&err, AppError::BadRequest(message) if message == "Seat number already exists."),
        "{err:?}"
    );
}
