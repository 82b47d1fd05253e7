use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::expense::date_range::DateRange;
use business::domain::expense::model::Expense;
use business::domain::expense::repository::ExpenseRepository;
use business::domain::shared::value_objects::UserId;

use super::entity::ExpenseEntity;

const EXPENSE_COLUMNS: &str =
    "id, user_id, description, amount, date, category, created_at, updated_at";

pub struct ExpenseRepositoryPostgres {
    pool: PgPool,
}

impl ExpenseRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(err: sqlx::Error) -> RepositoryError {
    tracing::error!(error = %err, "Expense query failed");
    RepositoryError::DatabaseError
}

#[async_trait]
impl ExpenseRepository for ExpenseRepositoryPostgres {
    async fn get_in_range(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<Vec<Expense>, RepositoryError> {
        let entities = sqlx::query_as::<_, ExpenseEntity>(&format!(
            "SELECT {} FROM expenses WHERE user_id = $1 AND date BETWEEN $2 AND $3 ORDER BY date DESC, created_at DESC",
            EXPENSE_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(range.from())
        .bind(range.to())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        entities.into_iter().map(|e| e.into_domain()).collect()
    }

    async fn get_by_id(&self, id: Uuid, user_id: &UserId) -> Result<Expense, RepositoryError> {
        let entity = sqlx::query_as::<_, ExpenseEntity>(&format!(
            "SELECT {} FROM expenses WHERE id = $1 AND user_id = $2",
            EXPENSE_COLUMNS
        ))
        .bind(id)
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or(RepositoryError::NotFound)?;

        entity.into_domain()
    }

    async fn save(&self, expense: &Expense) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO expenses (id, user_id, description, amount, date, category, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                description = EXCLUDED.description,
                amount = EXCLUDED.amount,
                date = EXCLUDED.date,
                category = EXCLUDED.category,
                updated_at = EXCLUDED.updated_at
            WHERE expenses.user_id = EXCLUDED.user_id"#,
        )
        .bind(expense.id)
        .bind(expense.user_id.as_str())
        .bind(&expense.description)
        .bind(expense.amount.value())
        .bind(expense.date)
        .bind(expense.category.to_string())
        .bind(expense.created_at)
        .bind(expense.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        // The conflict guard skips rows owned by someone else
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid, user_id: &UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
