//! LightBnB Database Crate
//!
//! Data access for users, properties and reservations: connection
//! management, migrations, typed repositories, and the [`QueryGateway`]
//! facade that callers use.

use lightbnb_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod filter;
pub mod gateway;
pub mod migrations;
pub mod repos;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use connection::{prepare_database, DatabaseConnection};
pub use migrations::run_migrations;

pub use repos::{PropertyRepository, ReservationRepository, UserRepository, DEFAULT_LIMIT};

pub use entities::{
    NewProperty, NewUser, Property, PropertyListing, PropertySearch, Reservation,
    ReservationWithProperty, User,
};

pub use filter::{Predicate, PropertyFilter};
pub use gateway::QueryGateway;

pub use types::{DatabaseError, DatabaseResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
