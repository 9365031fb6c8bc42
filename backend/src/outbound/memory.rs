//! In-process `KoderRepository` used by HTTP tests and embedding callers.
//!
//! Records live in a `Vec` behind an `RwLock`, so list order is insertion
//! order, matching the Diesel adapter.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{KoderRepository, KoderRepositoryError};
use crate::domain::{Koder, KoderChanges, KoderFilter, KoderId, NewKoder};

/// Volatile Koder store.
///
/// # Examples
/// ```
/// use koders::domain::ports::KoderRepository;
/// use koders::domain::{KoderDraft, KoderFilter, KoderId};
/// use koders::outbound::memory::InMemoryKoderRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repository = InMemoryKoderRepository::default();
/// let draft = KoderDraft {
///     name: Some("Ana".to_owned()),
///     age: Some(25),
///     ..KoderDraft::default()
/// };
/// let new = draft.into_new_koder().unwrap();
/// repository.insert(&KoderId::random(), &new).await.unwrap();
/// assert_eq!(repository.list(&KoderFilter::default()).await.unwrap().len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryKoderRepository {
    records: RwLock<Vec<Koder>>,
}

impl InMemoryKoderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> KoderRepositoryError {
    KoderRepositoryError::query("in-memory koder store is poisoned")
}

#[async_trait]
impl KoderRepository for InMemoryKoderRepository {
    async fn list(&self, filter: &KoderFilter) -> Result<Vec<Koder>, KoderRepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .iter()
            .filter(|koder| filter.matches(koder))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &KoderId) -> Result<Option<Koder>, KoderRepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.iter().find(|koder| koder.id == *id).cloned())
    }

    async fn insert(&self, id: &KoderId, koder: &NewKoder) -> Result<Koder, KoderRepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        if records.iter().any(|stored| stored.id == *id) {
            return Err(KoderRepositoryError::constraint(format!(
                "duplicate key value violates unique constraint: id {id} already exists"
            )));
        }
        let stored = Koder::from_new(*id, koder.clone());
        records.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: &KoderId,
        changes: &KoderChanges,
    ) -> Result<Option<Koder>, KoderRepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        Ok(records
            .iter_mut()
            .find(|koder| koder.id == *id)
            .map(|koder| {
                koder.apply(changes);
                koder.clone()
            }))
    }

    async fn delete(&self, id: &KoderId) -> Result<bool, KoderRepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let before = records.len();
        records.retain(|koder| koder.id != *id);
        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{KoderDraft, Sex};
    use rstest::{fixture, rstest};

    fn new_koder(name: &str, age: i64, sex: &str) -> NewKoder {
        KoderDraft {
            name: Some(name.to_owned()),
            age: Some(age),
            sex: Some(sex.to_owned()),
            ..KoderDraft::default()
        }
        .into_new_koder()
        .expect("valid draft")
    }

    #[fixture]
    fn repository() -> InMemoryKoderRepository {
        InMemoryKoderRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn list_preserves_insertion_order_and_filters(repository: InMemoryKoderRepository) {
        for (name, sex) in [("Ana", "f"), ("Bruno", "m"), ("Carla", "f")] {
            repository
                .insert(&KoderId::random(), &new_koder(name, 30, sex))
                .await
                .expect("insert");
        }

        let all = repository
            .list(&KoderFilter::default())
            .await
            .expect("list all");
        let names: Vec<_> = all.iter().map(|koder| koder.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);

        let women = repository
            .list(&KoderFilter::default().with_sex(Sex::Female.as_str()))
            .await
            .expect("list filtered");
        assert_eq!(women.len(), 2);
        assert!(women.iter().all(|koder| koder.sex == Some(Sex::Female)));
    }

    #[rstest]
    #[tokio::test]
    async fn update_applies_changes_in_place(repository: InMemoryKoderRepository) {
        let id = KoderId::random();
        repository
            .insert(&id, &new_koder("Ana", 25, "f"))
            .await
            .expect("insert");
        let changes = KoderDraft {
            age: Some(26),
            ..KoderDraft::default()
        }
        .into_changes()
        .expect("valid changes");

        let updated = repository
            .update(&id, &changes)
            .await
            .expect("update")
            .expect("record exists");

        assert_eq!(updated.age, 26);
        let stored = repository
            .find_by_id(&id)
            .await
            .expect("find")
            .expect("record exists");
        assert_eq!(stored, updated);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_id_returns_none(repository: InMemoryKoderRepository) {
        let updated = repository
            .update(&KoderId::random(), &KoderChanges::default())
            .await
            .expect("update");
        assert!(updated.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_existence_once(repository: InMemoryKoderRepository) {
        let id = KoderId::random();
        repository
            .insert(&id, &new_koder("Ana", 25, "f"))
            .await
            .expect("insert");

        assert!(repository.delete(&id).await.expect("first delete"));
        assert!(!repository.delete(&id).await.expect("second delete"));
        assert!(repository.find_by_id(&id).await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_identifiers_are_rejected(repository: InMemoryKoderRepository) {
        let id = KoderId::random();
        let new = new_koder("Ana", 25, "f");
        repository.insert(&id, &new).await.expect("first insert");

        let err = repository.insert(&id, &new).await.expect_err("duplicate");
        assert!(matches!(err, KoderRepositoryError::Constraint { .. }));
    }
}
