//! Repository for a guest's reservation history.

use crate::entities::{Reservation, ReservationWithProperty};
use crate::repos::property_repository::{property_from_row, PROPERTY_COLUMNS};
use crate::repos::{resolve_limit, DEFAULT_LIMIT};
use crate::types::DatabaseResult;
use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;

#[derive(Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Completed stays for a guest: reservations that ended before today.
    /// "Today" is the current UTC date on this host, not the database's
    /// local date; use [`Self::completed_for_guest_before`] for another day.
    pub async fn completed_for_guest(
        &self,
        guest_id: i64,
        limit: Option<i64>,
    ) -> DatabaseResult<Vec<ReservationWithProperty>> {
        self.completed_for_guest_before(guest_id, Utc::now().date_naive(), limit)
            .await
    }

    /// Reservations for `guest_id` whose end date is strictly before `cutoff`,
    /// earliest start first. `limit` defaults to [`DEFAULT_LIMIT`].
    pub async fn completed_for_guest_before(
        &self,
        guest_id: i64,
        cutoff: NaiveDate,
        limit: Option<i64>,
    ) -> DatabaseResult<Vec<ReservationWithProperty>> {
        let limit = resolve_limit(limit, DEFAULT_LIMIT)?;

        let query = format!(
            "SELECT {PROPERTY_COLUMNS}, \
                    reservations.id AS reservation_id, reservations.guest_id, \
                    reservations.property_id, reservations.start_date, reservations.end_date, \
                    avg(property_reviews.rating) AS average_rating \
             FROM reservations \
             JOIN properties ON reservations.property_id = properties.id \
             LEFT JOIN property_reviews ON properties.id = property_reviews.property_id \
             WHERE reservations.guest_id = ? \
             AND reservations.end_date < ? \
             GROUP BY properties.id, reservations.id \
             ORDER BY reservations.start_date, reservations.id \
             LIMIT ?"
        );

        debug!(guest_id, %cutoff, limit, "listing completed reservations");

        let rows = sqlx::query(&query)
            .bind(guest_id)
            .bind(cutoff)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let reservations = rows
            .iter()
            .map(|row| {
                Ok(ReservationWithProperty {
                    reservation: Reservation {
                        id: row.try_get("reservation_id")?,
                        guest_id: row.try_get("guest_id")?,
                        property_id: row.try_get("property_id")?,
                        start_date: row.try_get("start_date")?,
                        end_date: row.try_get("end_date")?,
                    },
                    property: property_from_row(row)?,
                    average_rating: row.try_get("average_rating")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(reservations)
    }
}
