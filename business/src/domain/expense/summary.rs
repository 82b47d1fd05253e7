use std::collections::BTreeMap;

use super::date_range::DateRange;
use super::model::Expense;
use crate::domain::shared::amount::Amount;
use crate::domain::shared::category::ExpenseCategory;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: Amount,
    pub count: usize,
}

/// Totals over a date range, per category and overall.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    pub range: DateRange,
    pub total: Amount,
    pub count: usize,
    /// Only categories with expenses, in the fixed category order.
    pub by_category: Vec<CategoryTotal>,
}

impl ExpenseSummary {
    pub fn from_expenses(range: DateRange, expenses: &[Expense]) -> Self {
        let mut totals: BTreeMap<ExpenseCategory, (Amount, usize)> = BTreeMap::new();
        for expense in expenses.iter().filter(|e| range.contains(e.date)) {
            let entry = totals
                .entry(expense.category)
                .or_insert_with(|| (Amount::zero(), 0));
            entry.0 = entry.0.clone() + expense.amount.clone();
            entry.1 += 1;
        }

        let by_category: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, (total, count))| CategoryTotal {
                category,
                total,
                count,
            })
            .collect();

        Self {
            range,
            total: by_category.iter().map(|c| c.total.clone()).sum(),
            count: by_category.iter().map(|c| c.count).sum(),
            by_category,
        }
    }
}
