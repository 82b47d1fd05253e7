use chrono::{DateTime, NaiveDate, Utc};
use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

use business::domain::expense::model::Expense;
use business::domain::expense::summary::{CategoryTotal, ExpenseSummary};
use business::domain::shared::category::ExpenseCategory;

#[derive(Debug, Clone, Serialize, Deserialize, Enum)]
pub enum ExpenseCategoryDto {
    #[oai(rename = "food")]
    Food,
    #[oai(rename = "transport")]
    Transport,
    #[oai(rename = "office")]
    Office,
    #[oai(rename = "software")]
    Software,
    #[oai(rename = "services")]
    Services,
    #[oai(rename = "other")]
    Other,
}

impl From<ExpenseCategory> for ExpenseCategoryDto {
    fn from(category: ExpenseCategory) -> Self {
        match category {
            ExpenseCategory::Food => ExpenseCategoryDto::Food,
            ExpenseCategory::Transport => ExpenseCategoryDto::Transport,
            ExpenseCategory::Office => ExpenseCategoryDto::Office,
            ExpenseCategory::Software => ExpenseCategoryDto::Software,
            ExpenseCategory::Services => ExpenseCategoryDto::Services,
            ExpenseCategory::Other => ExpenseCategoryDto::Other,
        }
    }
}

impl From<ExpenseCategoryDto> for ExpenseCategory {
    fn from(dto: ExpenseCategoryDto) -> Self {
        match dto {
            ExpenseCategoryDto::Food => ExpenseCategory::Food,
            ExpenseCategoryDto::Transport => ExpenseCategory::Transport,
            ExpenseCategoryDto::Office => ExpenseCategory::Office,
            ExpenseCategoryDto::Software => ExpenseCategory::Software,
            ExpenseCategoryDto::Services => ExpenseCategory::Services,
            ExpenseCategoryDto::Other => ExpenseCategory::Other,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CreateExpenseRequest {
    /// Merchant or short description (cannot be empty)
    pub description: String,
    /// Canonical decimal amount as text, e.g. "1250" or "12.5" (no grouping)
    pub amount: String,
    /// Expense date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Expense category
    pub category: ExpenseCategoryDto,
}

#[derive(Debug, Clone, Object)]
pub struct UpdateExpenseRequest {
    /// Merchant or short description (cannot be empty)
    pub description: String,
    /// Canonical decimal amount as text (no grouping)
    pub amount: String,
    /// Expense date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Expense category
    pub category: ExpenseCategoryDto,
}

#[derive(Debug, Clone, Object)]
pub struct ExpenseResponse {
    /// Expense unique identifier
    pub id: String,
    pub description: String,
    /// Canonical decimal amount without grouping separators
    pub amount: String,
    pub date: NaiveDate,
    pub category: ExpenseCategoryDto,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            description: expense.description,
            amount: expense.amount.to_string(),
            date: expense.date,
            category: expense.category.into(),
            created_at: expense.created_at,
            updated_at: expense.updated_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CategoryTotalResponse {
    pub category: ExpenseCategoryDto,
    /// Display label of the category
    pub label: String,
    pub total: String,
    pub count: u64,
}

impl From<CategoryTotal> for CategoryTotalResponse {
    fn from(total: CategoryTotal) -> Self {
        Self {
            category: total.category.into(),
            label: total.category.label().to_string(),
            total: total.total.to_string(),
            count: total.count as u64,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ExpenseSummaryResponse {
    /// First day of the summarized range (inclusive)
    pub from: NaiveDate,
    /// Last day of the summarized range (inclusive)
    pub to: NaiveDate,
    pub total: String,
    pub count: u64,
    /// Only categories with at least one expense
    pub by_category: Vec<CategoryTotalResponse>,
}

impl From<ExpenseSummary> for ExpenseSummaryResponse {
    fn from(summary: ExpenseSummary) -> Self {
        Self {
            from: summary.range.from(),
            to: summary.range.to(),
            total: summary.total.to_string(),
            count: summary.count as u64,
            by_category: summary.by_category.into_iter().map(|c| c.into()).collect(),
        }
    }
}
