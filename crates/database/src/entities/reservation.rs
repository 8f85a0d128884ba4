//! Reservation entity definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Property;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub guest_id: i64,
    pub property_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A completed stay joined with the property it was booked against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationWithProperty {
    pub reservation: Reservation,
    pub property: Property,
    /// `None` when the property has no reviews.
    pub average_rating: Option<f64>,
}
