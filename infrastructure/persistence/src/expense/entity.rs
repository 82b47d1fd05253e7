use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::expense::model::Expense;
use business::domain::shared::amount::Amount;
use business::domain::shared::category::ExpenseCategory;
use business::domain::shared::value_objects::UserId;

#[derive(Debug, FromRow)]
pub struct ExpenseEntity {
    pub id: Uuid,
    pub user_id: String,
    pub description: String,
    pub amount: BigDecimal,
    pub date: NaiveDate,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExpenseEntity {
    pub fn into_domain(self) -> Result<Expense, RepositoryError> {
        let amount = Amount::new(self.amount).map_err(|_| {
            tracing::error!(expense_id = %self.id, "Stored expense has a negative amount");
            RepositoryError::CorruptRow
        })?;

        Ok(Expense::from_repository(
            self.id,
            UserId::new(&self.user_id),
            self.description,
            amount,
            self.date,
            self.category
                .parse::<ExpenseCategory>()
                .unwrap_or(ExpenseCategory::Other),
            self.created_at,
            self.updated_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn entity(amount: &str, category: &str) -> ExpenseEntity {
        let now = Utc::now();
        ExpenseEntity {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            description: "Copec".to_string(),
            amount: BigDecimal::from_str(amount).unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            category: category.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn should_map_row_to_domain() {
        let expense = entity("35000.00", "transport").into_domain().unwrap();

        assert_eq!(expense.user_id, UserId::new("user-1"));
        assert_eq!(expense.amount.to_string(), "35000");
        assert_eq!(expense.category, ExpenseCategory::Transport);
    }

    #[test]
    fn should_fall_back_to_other_for_unknown_category() {
        let expense = entity("10", "groceries").into_domain().unwrap();
        assert_eq!(expense.category, ExpenseCategory::Other);
    }

    #[test]
    fn should_flag_negative_amount_as_corrupt() {
        let result = entity("-1", "food").into_domain();
        assert!(matches!(result, Err(RepositoryError::CorruptRow)));
    }
}
