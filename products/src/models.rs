use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::products;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Full-replace changeset. `treat_none_as_null` so replacing with a missing
/// description clears the column instead of leaving the old value behind.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = products)]
#[diesel(treat_none_as_null = true)]
pub struct ProductChanges {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}
