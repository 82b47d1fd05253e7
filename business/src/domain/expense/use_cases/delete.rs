use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::expense::errors::ExpenseError;
use crate::domain::shared::value_objects::UserId;

pub struct DeleteExpenseParams {
    pub id: Uuid,
    pub user_id: UserId,
}

#[async_trait]
pub trait DeleteExpenseUseCase: Send + Sync {
    async fn execute(&self, params: DeleteExpenseParams) -> Result<(), ExpenseError>;
}
