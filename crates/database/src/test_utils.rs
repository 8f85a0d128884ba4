//! Fixtures shared by the in-crate tests.

use chrono::NaiveDate;
use lightbnb_config::DatabaseConfig;
use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::entities::NewProperty;
use crate::{prepare_database, run_migrations};

/// A migrated database in a temporary directory; keep the `TempDir` alive.
pub async fn create_test_pool() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let config = DatabaseConfig {
        url: format!("sqlite:{}", db_path.display()),
        max_connections: 1,
    };

    let pool = prepare_database(&config).await.unwrap();
    run_migrations(&pool).await.unwrap();
    (pool, temp_dir)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub async fn insert_user(pool: &SqlitePool, email: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (name, email, password) VALUES (?, ?, ?) RETURNING id")
        .bind(format!("User {email}"))
        .bind(email)
        .bind("password")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_reservation(
    pool: &SqlitePool,
    guest_id: i64,
    property_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO reservations (guest_id, property_id, start_date, end_date) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(guest_id)
    .bind(property_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_review(pool: &SqlitePool, guest_id: i64, property_id: i64, rating: i64) {
    sqlx::query("INSERT INTO property_reviews (guest_id, property_id, rating) VALUES (?, ?, ?)")
        .bind(guest_id)
        .bind(property_id)
        .bind(rating)
        .execute(pool)
        .await
        .unwrap();
}

pub fn sample_property(owner_id: i64, title: &str, city: &str, cost_per_night: i64) -> NewProperty {
    NewProperty {
        owner_id,
        title: title.to_string(),
        description: "description".to_string(),
        thumbnail_photo_url: "https://images.pexels.com/photos/2086676/pexels-photo-2086676.jpeg?auto=compress&cs=tinysrgb&h=350".to_string(),
        cover_photo_url: "https://images.pexels.com/photos/2086676/pexels-photo-2086676.jpeg".to_string(),
        cost_per_night,
        street: "536 Namsub Highway".to_string(),
        city: city.to_string(),
        province: "Quebec".to_string(),
        post_code: "28142".to_string(),
        country: "Canada".to_string(),
        parking_spaces: 6,
        number_of_bathrooms: 4,
        number_of_bedrooms: 8,
    }
}
