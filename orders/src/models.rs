use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::orders;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub created_at: DateTime<Utc>,
}

/// `created_at` is assigned by the database on insert.
#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub user_id: i32,
    pub product_id: i32,
}

/// Full-replace changeset for the mutable columns; `created_at` is
/// immutable and never part of an update.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = orders)]
pub struct OrderChanges {
    pub user_id: i32,
    pub product_id: i32,
}
