//! Diesel row structs for the `koders` table.
//!
//! Internal to the persistence adapter; the domain never sees them.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::koders;

/// Row read back from `koders`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = koders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct KoderRow {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub generation: Option<String>,
    pub module: Option<String>,
    pub sex: Option<String>,
}

/// Insertable row; `created_at` takes its column default.
#[derive(Debug, Insertable)]
#[diesel(table_name = koders)]
pub(crate) struct NewKoderRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub age: i32,
    pub generation: Option<&'a str>,
    pub module: Option<&'a str>,
    pub sex: Option<&'a str>,
}

/// Partial update; `None` columns are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = koders)]
pub(crate) struct KoderChangeset<'a> {
    pub name: Option<&'a str>,
    pub age: Option<i32>,
    pub generation: Option<&'a str>,
    pub module: Option<&'a str>,
    pub sex: Option<&'a str>,
}
