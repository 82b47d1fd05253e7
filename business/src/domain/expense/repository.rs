use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

use super::date_range::DateRange;
use super::model::Expense;

/// Expense store. Every call is scoped to one user.
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Expenses dated within `range`, newest first.
    async fn get_in_range(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<Vec<Expense>, RepositoryError>;
    async fn get_by_id(&self, id: Uuid, user_id: &UserId) -> Result<Expense, RepositoryError>;
    async fn save(&self, expense: &Expense) -> Result<(), RepositoryError>;
    /// Fails with `NotFound` when nothing was deleted.
    async fn delete(&self, id: Uuid, user_id: &UserId) -> Result<(), RepositoryError>;
}
