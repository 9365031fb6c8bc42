//! PostgreSQL-backed `KoderRepository` implementation using Diesel ORM.
//!
//! Records are listed in insertion order. Store messages are passed through
//! to the domain unchanged; `CHECK` constraint violations become
//! constraint errors so they surface as validation failures.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::koder::COLLECTION_NAME;
use crate::domain::ports::{KoderRepository, KoderRepositoryError};
use crate::domain::{Koder, KoderChanges, KoderFilter, KoderId, NewKoder, Sex};

use super::models::{KoderChangeset, KoderRow, NewKoderRow};
use super::pool::{DbPool, PoolError};
use super::schema::koders;

/// Diesel-backed implementation of the [`KoderRepository`] port.
#[derive(Clone)]
pub struct DieselKoderRepository {
    pool: DbPool,
}

impl DieselKoderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> KoderRepositoryError {
    KoderRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> KoderRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
            debug!(
                constraint = info.constraint_name(),
                message = info.message(),
                "check constraint rejected koder"
            );
            KoderRepositoryError::constraint(format!(
                "{COLLECTION_NAME} validation failed: {}",
                info.message()
            ))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            KoderRepositoryError::connection(info.message())
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            KoderRepositoryError::query(info.message())
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            KoderRepositoryError::query(other.to_string())
        }
    }
}

fn row_to_koder(row: KoderRow) -> Koder {
    let KoderRow {
        id,
        name,
        age,
        generation,
        module,
        sex,
    } = row;
    let sex = sex.and_then(|raw| match raw.parse::<Sex>() {
        Ok(sex) => Some(sex),
        Err(_) => {
            warn!(value = %raw, koder_id = %id, "unrecognised sex value, dropping it");
            None
        }
    });
    Koder {
        id: KoderId::from_uuid(id),
        name,
        age,
        generation,
        module,
        sex,
    }
}

#[async_trait]
impl KoderRepository for DieselKoderRepository {
    async fn list(&self, filter: &KoderFilter) -> Result<Vec<Koder>, KoderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = koders::table.into_boxed();
        if let Some(id) = filter.id() {
            query = query.filter(koders::id.eq(*id.as_uuid()));
        }
        if let Some(name) = filter.name() {
            query = query.filter(koders::name.eq(name));
        }
        if let Some(age) = filter.age() {
            query = query.filter(koders::age.eq(age));
        }
        if let Some(generation) = filter.generation() {
            query = query.filter(koders::generation.eq(generation));
        }
        if let Some(module) = filter.module() {
            query = query.filter(koders::module.eq(module));
        }
        if let Some(sex) = filter.sex() {
            query = query.filter(koders::sex.eq(sex));
        }

        let rows: Vec<KoderRow> = query
            .order((koders::created_at.asc(), koders::id.asc()))
            .select(KoderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_koder).collect())
    }

    async fn find_by_id(&self, id: &KoderId) -> Result<Option<Koder>, KoderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = koders::table
            .filter(koders::id.eq(*id.as_uuid()))
            .select(KoderRow::as_select())
            .first::<KoderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_koder))
    }

    async fn insert(&self, id: &KoderId, koder: &NewKoder) -> Result<Koder, KoderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewKoderRow {
            id: *id.as_uuid(),
            name: koder.name(),
            age: koder.age(),
            generation: koder.generation(),
            module: koder.module(),
            sex: koder.sex().map(Sex::as_str),
        };
        let stored = diesel::insert_into(koders::table)
            .values(&row)
            .returning(KoderRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_koder(stored))
    }

    async fn update(
        &self,
        id: &KoderId,
        changes: &KoderChanges,
    ) -> Result<Option<Koder>, KoderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = KoderChangeset {
            name: changes.name(),
            age: changes.age(),
            generation: changes.generation(),
            module: changes.module(),
            sex: changes.sex().map(Sex::as_str),
        };
        let updated = diesel::update(koders::table.filter(koders::id.eq(*id.as_uuid())))
            .set(&changeset)
            .returning(KoderRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(updated.map(row_to_koder))
    }

    async fn delete(&self, id: &KoderId) -> Result<bool, KoderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(koders::table.filter(koders::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
