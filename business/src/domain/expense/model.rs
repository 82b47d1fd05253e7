use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::errors::ExpenseError;
use crate::domain::shared::amount::Amount;
use crate::domain::shared::category::ExpenseCategory;
use crate::domain::shared::value_objects::UserId;

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: UserId,
    pub description: String,
    pub amount: Amount,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewExpenseProps {
    pub user_id: UserId,
    pub description: String,
    pub amount: Amount,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
}

impl Expense {
    pub fn new(props: NewExpenseProps) -> Result<Self, ExpenseError> {
        let description = clean_description(&props.description)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: props.user_id,
            description,
            amount: props.amount,
            date: props.date,
            category: props.category,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies user edits, keeping identity, owner and creation time.
    pub fn revise(
        self,
        description: &str,
        amount: Amount,
        date: NaiveDate,
        category: ExpenseCategory,
    ) -> Result<Self, ExpenseError> {
        Ok(Self {
            description: clean_description(description)?,
            amount,
            date,
            category,
            updated_at: Utc::now(),
            ..self
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: Uuid,
        user_id: UserId,
        description: String,
        amount: Amount,
        date: NaiveDate,
        category: ExpenseCategory,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            description,
            amount,
            date,
            category,
            created_at,
            updated_at,
        }
    }
}

fn clean_description(raw: &str) -> Result<String, ExpenseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExpenseError::DescriptionEmpty);
    }
    Ok(trimmed.to_string())
}
