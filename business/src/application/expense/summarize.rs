use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::expense::date_range::DateRange;
use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::repository::ExpenseRepository;
use crate::domain::expense::summary::ExpenseSummary;
use crate::domain::expense::use_cases::summarize::{
    SummarizeExpensesParams, SummarizeExpensesUseCase,
};
use crate::domain::logger::Logger;

pub struct SummarizeExpensesUseCaseImpl {
    pub repository: Arc<dyn ExpenseRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SummarizeExpensesUseCase for SummarizeExpensesUseCaseImpl {
    async fn execute(
        &self,
        params: SummarizeExpensesParams,
    ) -> Result<ExpenseSummary, ExpenseError> {
        let range = DateRange::resolve(params.from, params.to, Utc::now().date_naive())?;

        let expenses = self
            .repository
            .get_in_range(&params.user_id, &range)
            .await?;
        let summary = ExpenseSummary::from_expenses(range, &expenses);

        self.logger.info(&format!(
            "Summarized {} expenses for user {}: total {}",
            summary.count, params.user_id, summary.total
        ));
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::expense::model::{Expense, NewExpenseProps};
    use crate::domain::shared::amount::Amount;
    use crate::domain::shared::category::ExpenseCategory;
    use crate::domain::shared::value_objects::UserId;
    use chrono::NaiveDate;
    use mockall::mock;
    use uuid::Uuid;

    mock! {
        pub ExpenseRepo {}

        #[async_trait]
        impl ExpenseRepository for ExpenseRepo {
            async fn get_in_range(&self, user_id: &UserId, range: &DateRange) -> Result<Vec<Expense>, RepositoryError>;
            async fn get_by_id(&self, id: Uuid, user_id: &UserId) -> Result<Expense, RepositoryError>;
            async fn save(&self, expense: &Expense) -> Result<(), RepositoryError>;
            async fn delete(&self, id: Uuid, user_id: &UserId) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn expense(amount: &str, category: ExpenseCategory) -> Expense {
        Expense::new(NewExpenseProps {
            user_id: UserId::new("test-user-id"),
            description: "Item".to_string(),
            amount: Amount::parse(amount).unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            category,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn should_total_expenses_in_range() {
        let mut mock_repo = MockExpenseRepo::new();
        mock_repo.expect_get_in_range().times(1).returning(|_, _| {
            Ok(vec![
                expense("1.250", ExpenseCategory::Food),
                expense("35.000", ExpenseCategory::Transport),
                expense("750", ExpenseCategory::Food),
            ])
        });

        let use_case = SummarizeExpensesUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let summary = use_case
            .execute(SummarizeExpensesParams {
                user_id: UserId::new("test-user-id"),
                from: NaiveDate::from_ymd_opt(2024, 2, 1),
                to: NaiveDate::from_ymd_opt(2024, 2, 29),
            })
            .await
            .unwrap();

        assert_eq!(summary.count, 3);
        assert_eq!(summary.total.to_string(), "37000");
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.by_category[0].category, ExpenseCategory::Food);
        assert_eq!(summary.by_category[0].total.to_string(), "2000");
    }

    #[tokio::test]
    async fn should_propagate_repository_failure() {
        let mut mock_repo = MockExpenseRepo::new();
        mock_repo
            .expect_get_in_range()
            .returning(|_, _| Err(RepositoryError::DatabaseError));

        let use_case = SummarizeExpensesUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(SummarizeExpensesParams {
                user_id: UserId::new("test-user-id"),
                from: None,
                to: None,
            })
            .await;

        assert!(matches!(result, Err(ExpenseError::Repository(_))));
    }
}
