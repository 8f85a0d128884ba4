//! Repository for property listings and search.

use crate::entities::{NewProperty, Property, PropertyListing, PropertySearch};
use crate::filter::PropertyFilter;
use crate::repos::{resolve_limit, DEFAULT_LIMIT};
use crate::types::DatabaseResult;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::{debug, info};

pub(crate) const PROPERTY_COLUMNS: &str = "properties.id, properties.owner_id, properties.title, \
     properties.description, properties.thumbnail_photo_url, properties.cover_photo_url, \
     properties.cost_per_night, properties.street, properties.city, properties.province, \
     properties.post_code, properties.country, properties.parking_spaces, \
     properties.number_of_bathrooms, properties.number_of_bedrooms";

/// Repository for property database operations
#[derive(Clone)]
pub struct PropertyRepository {
    pool: SqlitePool,
}

impl PropertyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Search listings, cheapest first, with their average review rating.
    ///
    /// `limit` defaults to [`DEFAULT_LIMIT`].
    pub async fn search(
        &self,
        search: &PropertySearch,
        limit: Option<i64>,
    ) -> DatabaseResult<Vec<PropertyListing>> {
        let limit = resolve_limit(limit, DEFAULT_LIMIT)?;
        let filter = PropertyFilter::from_search(search);

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT ");
        builder.push(PROPERTY_COLUMNS);
        builder.push(
            ", avg(property_reviews.rating) AS average_rating \
             FROM properties \
             LEFT JOIN property_reviews ON properties.id = property_reviews.property_id",
        );
        filter.push_where(&mut builder);
        builder.push(" GROUP BY properties.id");
        filter.push_having(&mut builder);
        builder.push(" ORDER BY properties.cost_per_night, properties.id LIMIT ");
        builder.push_bind(limit);

        debug!(?filter, limit, "searching properties");

        let rows = builder.build().fetch_all(&self.pool).await?;

        let listings = rows
            .iter()
            .map(|row| {
                Ok(PropertyListing {
                    property: property_from_row(row)?,
                    average_rating: row.try_get("average_rating")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(listings)
    }

    /// Insert a property and return the stored row
    pub async fn create(&self, request: &NewProperty) -> DatabaseResult<Property> {
        let query = format!(
            "INSERT INTO properties (owner_id, title, description, thumbnail_photo_url, cover_photo_url, \
             cost_per_night, street, city, province, post_code, country, parking_spaces, \
             number_of_bathrooms, number_of_bedrooms) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {PROPERTY_COLUMNS}"
        );

        let row = sqlx::query(&query)
            .bind(request.owner_id)
            .bind(&request.title)
            .bind(&request.description)
            .bind(&request.thumbnail_photo_url)
            .bind(&request.cover_photo_url)
            .bind(request.cost_per_night)
            .bind(&request.street)
            .bind(&request.city)
            .bind(&request.province)
            .bind(&request.post_code)
            .bind(&request.country)
            .bind(request.parking_spaces)
            .bind(request.number_of_bathrooms)
            .bind(request.number_of_bedrooms)
            .fetch_one(&self.pool)
            .await?;

        let property = property_from_row(&row)?;
        info!(
            property_id = property.id,
            owner_id = property.owner_id,
            "created new property"
        );
        Ok(property)
    }
}

pub(crate) fn property_from_row(row: &SqliteRow) -> Result<Property, sqlx::Error> {
    Ok(Property {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        thumbnail_photo_url: row.try_get("thumbnail_photo_url")?,
        cover_photo_url: row.try_get("cover_photo_url")?,
        cost_per_night: row.try_get("cost_per_night")?,
        street: row.try_get("street")?,
        city: row.try_get("city")?,
        province: row.try_get("province")?,
        post_code: row.try_get("post_code")?,
        country: row.try_get("country")?,
        parking_spaces: row.try_get("parking_spaces")?,
        number_of_bathrooms: row.try_get("number_of_bathrooms")?,
        number_of_bedrooms: row.try_get("number_of_bedrooms")?,
    })
}
