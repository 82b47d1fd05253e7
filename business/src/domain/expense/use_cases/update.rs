use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::model::Expense;
use crate::domain::shared::amount::Amount;
use crate::domain::shared::category::ExpenseCategory;
use crate::domain::shared::value_objects::UserId;

pub struct UpdateExpenseParams {
    pub id: Uuid,
    pub user_id: UserId,
    pub description: String,
    pub amount: Amount,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
}

#[async_trait]
pub trait UpdateExpenseUseCase: Send + Sync {
    async fn execute(&self, params: UpdateExpenseParams) -> Result<Expense, ExpenseError>;
}
