//! Database repository implementations

pub mod property_repository;
pub mod reservation_repository;
pub mod user_repository;

pub use property_repository::*;
pub use reservation_repository::*;
pub use user_repository::*;

/// Row cap used when a caller does not pass one.
pub const DEFAULT_LIMIT: i64 = 10;

pub(crate) fn resolve_limit(limit: Option<i64>, default: i64) -> crate::types::DatabaseResult<i64> {
    let limit = limit.unwrap_or(default);
    if limit < 0 {
        return Err(crate::types::DatabaseError::ValidationError(format!(
            "limit must not be negative, got {limit}"
        )));
    }
    Ok(limit)
}
