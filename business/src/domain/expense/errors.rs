use crate::domain::errors::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    #[error("expense.description_empty")]
    DescriptionEmpty,
    #[error("expense.invalid_amount")]
    InvalidAmount(#[from] crate::domain::shared::amount::AmountError),
    #[error("expense.invalid_range")]
    InvalidRange,
    #[error("expense.not_found")]
    NotFound,
    #[error("repository.persistence")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ExpenseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ExpenseError::NotFound,
            other => ExpenseError::Repository(other),
        }
    }
}
