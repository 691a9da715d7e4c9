use super::StoreError;
use crate::infrastructure::localization::Localizer;
use forum_errors::AppError;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;

/// Opens one transaction per request.
#[derive(Clone)]
pub struct UnitOfWorkManager {
    db: DatabaseConnection,
    localizer: Arc<Localizer>,
}

impl UnitOfWorkManager {
    pub fn new(db: DatabaseConnection, localizer: Arc<Localizer>) -> Self {
        Self { db, localizer }
    }

    /// `generic_key` names the resource string shown to the caller when
    /// anything inside the unit fails unexpectedly.
    pub async fn begin(&self, generic_key: &'static str) -> Result<UnitOfWork, AppError> {
        match self.db.begin().await {
            Ok(txn) => Ok(UnitOfWork {
                txn,
                localizer: self.localizer.clone(),
                generic_key,
            }),
            Err(e) => {
                tracing::error!("Failed to open unit of work: {:?}", e);
                Err(AppError::Internal(self.localizer.get(generic_key)))
            }
        }
    }
}

/// A transaction scoped to a single request. Dropping it without calling
/// `complete` rolls it back.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
    localizer: Arc<Localizer>,
    generic_key: &'static str,
}

impl UnitOfWork {
    pub fn connection(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Commits on success. On failure rolls back, logs the full error and
    /// returns a localized message that carries none of its detail.
    pub async fn complete<T>(
        self,
        operation: &'static str,
        result: Result<T, StoreError>,
    ) -> Result<T, AppError> {
        let Self {
            txn,
            localizer,
            generic_key,
        } = self;

        let err = match result {
            Ok(value) => {
                return match txn.commit().await {
                    Ok(()) => Ok(value),
                    Err(e) => {
                        tracing::error!("{} failed to commit: {:?}", operation, e);
                        Err(AppError::Internal(localizer.get(generic_key)))
                    }
                };
            }
            Err(err) => err,
        };

        if let Err(e) = txn.rollback().await {
            tracing::error!("{} failed to roll back: {:?}", operation, e);
        }

        Err(match err {
            StoreError::NotFound { resource, id } => {
                tracing::warn!("{} rolled back: {} {} not found", operation, resource, id);
                AppError::NotFound(localizer.get("Errors.NotFound"))
            }
            StoreError::Invalid(key) => {
                tracing::warn!("{} rolled back: rejected as {}", operation, key);
                AppError::Validation(localizer.get(key))
            }
            StoreError::Db(e) => {
                tracing::error!("{} rolled back: {:?}", operation, e);
                AppError::Internal(localizer.get(generic_key))
            }
        })
    }
}
