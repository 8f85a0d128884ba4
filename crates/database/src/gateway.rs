//! Option-returning facade over the repositories.
//!
//! Callers of this layer only distinguish "got a value" from "did not".
//! Every [`DatabaseError`](crate::DatabaseError) is turned into `None` here
//! for compatibility with that contract; use the repositories directly when
//! the error matters.

use sqlx::SqlitePool;
use tracing::debug;

use crate::entities::{
    NewProperty, NewUser, Property, PropertyListing, PropertySearch, ReservationWithProperty, User,
};
use crate::repos::{PropertyRepository, ReservationRepository, UserRepository, DEFAULT_LIMIT};
use crate::types::DatabaseResult;

#[derive(Clone)]
pub struct QueryGateway {
    users: UserRepository,
    reservations: ReservationRepository,
    properties: PropertyRepository,
    default_limit: i64,
}

impl QueryGateway {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_default_limit(pool, DEFAULT_LIMIT)
    }

    /// Use `default_limit` for list operations called without a limit.
    pub fn with_default_limit(pool: SqlitePool, default_limit: i64) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            reservations: ReservationRepository::new(pool.clone()),
            properties: PropertyRepository::new(pool),
            default_limit,
        }
    }

    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        collapse("find_user_by_email", self.users.find_by_email(email).await).flatten()
    }

    pub async fn find_user_by_id(&self, id: i64) -> Option<User> {
        collapse("find_user_by_id", self.users.find_by_id(id).await).flatten()
    }

    pub async fn create_user(&self, user: &NewUser) -> Option<User> {
        collapse("create_user", self.users.create(user).await)
    }

    /// Completed stays for the guest; `Some(vec![])` when there are none.
    pub async fn list_reservations_for_guest(
        &self,
        guest_id: i64,
        limit: Option<i64>,
    ) -> Option<Vec<ReservationWithProperty>> {
        let limit = Some(limit.unwrap_or(self.default_limit));
        collapse(
            "list_reservations_for_guest",
            self.reservations.completed_for_guest(guest_id, limit).await,
        )
    }

    pub async fn search_properties(
        &self,
        options: &PropertySearch,
        limit: Option<i64>,
    ) -> Option<Vec<PropertyListing>> {
        let limit = Some(limit.unwrap_or(self.default_limit));
        collapse(
            "search_properties",
            self.properties.search(options, limit).await,
        )
    }

    pub async fn create_property(&self, property: &NewProperty) -> Option<Property> {
        collapse("create_property", self.properties.create(property).await)
    }
}

fn collapse<T>(operation: &'static str, result: DatabaseResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            debug!(operation, %error, "query failed, returning none");
            None
        }
    }
}
