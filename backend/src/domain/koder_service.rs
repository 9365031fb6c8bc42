//! Koder domain service.
//!
//! Implements the driving ports on top of a [`KoderRepository`], applying the
//! record schema before every write and translating store failures into
//! domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{KoderCommand, KoderQuery, KoderRepository, KoderRepositoryError};
use crate::domain::{
    DeleteOutcome, Error, Koder, KoderCastError, KoderDraft, KoderFilter, KoderId,
    KoderValidationError,
};

/// Koder service implementing [`KoderQuery`] and [`KoderCommand`].
#[derive(Clone)]
pub struct KoderService<R> {
    repository: Arc<R>,
}

impl<R> KoderService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl From<KoderRepositoryError> for Error {
    fn from(error: KoderRepositoryError) -> Self {
        match error {
            KoderRepositoryError::Constraint { message } => Self::validation(message),
            KoderRepositoryError::Connection { message } | KoderRepositoryError::Query { message } => {
                Self::store(message)
            }
        }
    }
}

impl From<KoderValidationError> for Error {
    fn from(error: KoderValidationError) -> Self {
        Self::validation(error.to_string())
    }
}

impl From<KoderCastError> for Error {
    fn from(error: KoderCastError) -> Self {
        Self::validation(error.to_string())
    }
}

#[async_trait]
impl<R> KoderQuery for KoderService<R>
where
    R: KoderRepository,
{
    async fn list(&self, filter: &KoderFilter) -> Result<Vec<Koder>, Error> {
        Ok(self.repository.list(filter).await?)
    }

    async fn get_by_id(&self, id: &KoderId) -> Result<Option<Koder>, Error> {
        Ok(self.repository.find_by_id(id).await?)
    }
}

#[async_trait]
impl<R> KoderCommand for KoderService<R>
where
    R: KoderRepository,
{
    async fn create(&self, draft: KoderDraft) -> Result<Koder, Error> {
        let new = draft.into_new_koder()?;
        let id = KoderId::random();
        let koder = self.repository.insert(&id, &new).await?;
        debug!(koder_id = %koder.id, "koder created");
        Ok(koder)
    }

    async fn update(&self, id: &KoderId, draft: KoderDraft) -> Result<Option<Koder>, Error> {
        let changes = draft.into_changes()?;
        if changes.is_empty() {
            return Ok(self.repository.find_by_id(id).await?);
        }
        let updated = self.repository.update(id, &changes).await?;
        if let Some(koder) = &updated {
            debug!(koder_id = %koder.id, ?koder, "koder updated");
        }
        Ok(updated)
    }

    async fn delete(&self, id: &KoderId) -> Result<DeleteOutcome, Error> {
        if self.repository.delete(id).await? {
            debug!(koder_id = %id, "koder deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for schema enforcement and error translation.

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockKoderRepository;
    use mockall::predicate::always;
    use rstest::rstest;

    fn ana_draft() -> KoderDraft {
        KoderDraft {
            name: Some("Ana".to_owned()),
            age: Some(25),
            sex: Some("f".to_owned()),
            ..KoderDraft::default()
        }
    }

    fn service(repository: MockKoderRepository) -> KoderService<MockKoderRepository> {
        KoderService::new(Arc::new(repository))
    }

    #[rstest]
    #[tokio::test]
    async fn create_validates_before_touching_the_store() {
        let mut repository = MockKoderRepository::new();
        repository.expect_insert().never();

        let draft = KoderDraft {
            name: Some("Al".to_owned()),
            age: Some(12),
            ..KoderDraft::default()
        };
        let err = service(repository)
            .create(draft)
            .await
            .expect_err("invalid draft");

        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert!(err.message().starts_with("Koders validation failed: name:"));
    }

    #[rstest]
    #[tokio::test]
    async fn create_stores_validated_document() {
        let mut repository = MockKoderRepository::new();
        repository
            .expect_insert()
            .with(always(), always())
            .times(1)
            .returning(|id, new| Ok(Koder::from_new(*id, new.clone())));

        let koder = service(repository)
            .create(ana_draft())
            .await
            .expect("created koder");

        assert_eq!(koder.name, "Ana");
        assert_eq!(koder.age, 25);
    }

    #[rstest]
    #[case(KoderRepositoryError::connection("pool exhausted"), ErrorCode::StoreError)]
    #[case(KoderRepositoryError::query("relation missing"), ErrorCode::StoreError)]
    #[case(KoderRepositoryError::constraint("check failed"), ErrorCode::ValidationError)]
    #[tokio::test]
    async fn store_failures_keep_their_message(
        #[case] failure: KoderRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let message = failure.to_string();
        let mut repository = MockKoderRepository::new();
        repository
            .expect_list()
            .returning(move |_| Err(failure.clone()));

        let err = service(repository)
            .list(&KoderFilter::default())
            .await
            .expect_err("store failure");

        assert_eq!(err.code(), expected);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_update_reads_back_the_record() {
        let id = KoderId::random();
        let existing = Koder::from_new(id, ana_draft().into_new_koder().expect("valid draft"));
        let returned = existing.clone();

        let mut repository = MockKoderRepository::new();
        repository.expect_update().never();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let updated = service(repository)
            .update(&id, KoderDraft::default())
            .await
            .expect("update succeeds");

        assert_eq!(updated, Some(existing));
    }

    #[rstest]
    #[tokio::test]
    async fn update_rejects_out_of_range_age() {
        let mut repository = MockKoderRepository::new();
        repository.expect_update().never();

        let draft = KoderDraft {
            age: Some(150),
            ..KoderDraft::default()
        };
        let err = service(repository)
            .update(&KoderId::random(), draft)
            .await
            .expect_err("invalid age");

        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[rstest]
    #[case(true, DeleteOutcome::Deleted)]
    #[case(false, DeleteOutcome::NotFound)]
    #[tokio::test]
    async fn delete_reports_whether_a_record_existed(
        #[case] existed: bool,
        #[case] expected: DeleteOutcome,
    ) {
        let mut repository = MockKoderRepository::new();
        repository.expect_delete().returning(move |_| Ok(existed));

        let outcome = service(repository)
            .delete(&KoderId::random())
            .await
            .expect("delete succeeds");

        assert_eq!(outcome, expected);
    }
}
