//! Structured WHERE/HAVING construction for property searches.
//!
//! A [`PropertyFilter`] is an ordered list of predicates, each carrying the
//! value it binds. Rendering joins them with `AND` behind a single `WHERE`,
//! so no clause needs to know whether it came first.

use sqlx::{QueryBuilder, Sqlite};

use crate::entities::PropertySearch;

/// Prices are supplied in major units; `cost_per_night` is stored in cents.
pub const CENTS_PER_UNIT: f64 = 100.0;

/// A single pre-aggregation condition on `properties`
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring match; holds the escaped `LIKE` pattern.
    CityContains(String),
    OwnerIs(i64),
    MinimumCostCents(i64),
    MaximumCostCents(i64),
}

impl Predicate {
    fn push_to(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Predicate::CityContains(pattern) => {
                builder.push("LOWER(properties.city) LIKE LOWER(");
                builder.push_bind(pattern.clone());
                builder.push(") ESCAPE '\\'");
            }
            Predicate::OwnerIs(owner_id) => {
                builder.push("properties.owner_id = ");
                builder.push_bind(*owner_id);
            }
            Predicate::MinimumCostCents(cents) => {
                builder.push("properties.cost_per_night >= ");
                builder.push_bind(*cents);
            }
            Predicate::MaximumCostCents(cents) => {
                builder.push("properties.cost_per_night <= ");
                builder.push_bind(*cents);
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    predicates: Vec<Predicate>,
    minimum_rating: Option<f64>,
}

impl PropertyFilter {
    /// Collect the filters present in `search`, in the fixed order city,
    /// owner, minimum price, maximum price.
    pub fn from_search(search: &PropertySearch) -> Self {
        let mut predicates = Vec::new();

        // Whitespace only decides blankness; the pattern keeps it
        if let Some(city) = search
            .city
            .as_deref()
            .filter(|city| !city.trim().is_empty())
        {
            predicates.push(Predicate::CityContains(format!("%{}%", escape_like(city))));
        }

        if let Some(owner_id) = search.owner_id.filter(|id| *id != 0) {
            predicates.push(Predicate::OwnerIs(owner_id));
        }

        if let Some(minimum) = search.minimum_price_per_night.filter(is_given) {
            predicates.push(Predicate::MinimumCostCents(to_cents(minimum)));
        }

        if let Some(maximum) = search.maximum_price_per_night.filter(is_given) {
            predicates.push(Predicate::MaximumCostCents(to_cents(maximum)));
        }

        let minimum_rating = search.minimum_rating.filter(is_given);

        Self {
            predicates,
            minimum_rating,
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn minimum_rating(&self) -> Option<f64> {
        self.minimum_rating
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty() && self.minimum_rating.is_none()
    }

    /// Append ` WHERE p1 AND p2 ...`, or nothing when no predicate applies.
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        for (index, predicate) in self.predicates.iter().enumerate() {
            builder.push(if index == 0 { " WHERE " } else { " AND " });
            predicate.push_to(builder);
        }
    }

    /// Append the post-aggregation rating filter. Properties without reviews
    /// average to NULL and never satisfy it.
    pub fn push_having(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        if let Some(rating) = self.minimum_rating {
            builder.push(" HAVING avg(property_reviews.rating) >= ");
            builder.push_bind(rating);
        }
    }
}

fn is_given(value: &f64) -> bool {
    *value != 0.0 && !value.is_nan()
}

/// Round to the nearest cent; the float-to-int cast saturates at the i64 bounds.
fn to_cents(units: f64) -> i64 {
    (units * CENTS_PER_UNIT).round() as i64
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
