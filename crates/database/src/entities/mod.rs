//! Domain entities for the database layer

pub mod property;
pub mod reservation;
pub mod user;

pub use property::{NewProperty, Property, PropertyListing, PropertySearch};
pub use reservation::{Reservation, ReservationWithProperty};
pub use user::{NewUser, User};
