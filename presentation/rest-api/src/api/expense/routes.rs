use std::sync::Arc;

use chrono::NaiveDate;
use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};
use uuid::Uuid;

use business::domain::expense::errors::ExpenseError;
use business::domain::expense::use_cases::create::{CreateExpenseParams, CreateExpenseUseCase};
use business::domain::expense::use_cases::delete::{DeleteExpenseParams, DeleteExpenseUseCase};
use business::domain::expense::use_cases::list::{ListExpensesParams, ListExpensesUseCase};
use business::domain::expense::use_cases::summarize::{
    SummarizeExpensesParams, SummarizeExpensesUseCase,
};
use business::domain::expense::use_cases::update::{UpdateExpenseParams, UpdateExpenseUseCase};
use business::domain::shared::amount::Amount;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::expense::dto::{
    CreateExpenseRequest, ExpenseResponse, ExpenseSummaryResponse, UpdateExpenseRequest,
};
use crate::api::security::SupabaseBearer;
use crate::api::tags::ApiTags;

pub struct ExpenseApi {
    create_use_case: Arc<dyn CreateExpenseUseCase>,
    list_use_case: Arc<dyn ListExpensesUseCase>,
    summarize_use_case: Arc<dyn SummarizeExpensesUseCase>,
    update_use_case: Arc<dyn UpdateExpenseUseCase>,
    delete_use_case: Arc<dyn DeleteExpenseUseCase>,
}

impl ExpenseApi {
    pub fn new(
        create_use_case: Arc<dyn CreateExpenseUseCase>,
        list_use_case: Arc<dyn ListExpensesUseCase>,
        summarize_use_case: Arc<dyn SummarizeExpensesUseCase>,
        update_use_case: Arc<dyn UpdateExpenseUseCase>,
        delete_use_case: Arc<dyn DeleteExpenseUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            list_use_case,
            summarize_use_case,
            update_use_case,
            delete_use_case,
        }
    }
}

fn invalid_id() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("ValidationError", "expense.invalid_id"))
}

/// Expense management API
///
/// Every endpoint only sees the expenses of the authenticated user.
#[OpenApi]
impl ExpenseApi {
    /// Create an expense
    ///
    /// Saves an expense, typically a receipt draft confirmed by the user.
    #[oai(path = "/expenses", method = "post", tag = "ApiTags::Expenses")]
    async fn create_expense(
        &self,
        auth: SupabaseBearer,
        body: Json<CreateExpenseRequest>,
    ) -> CreateExpenseResponse {
        let amount = match Amount::from_canonical(&body.0.amount) {
            Ok(amount) => amount,
            Err(err) => {
                let (_, json) = ExpenseError::from(err).into_error_response();
                return CreateExpenseResponse::BadRequest(json);
            }
        };

        let params = CreateExpenseParams {
            user_id: auth.0,
            description: body.0.description,
            amount,
            date: body.0.date,
            category: body.0.category.into(),
        };

        match self.create_use_case.execute(params).await {
            Ok(expense) => CreateExpenseResponse::Created(Json(expense.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateExpenseResponse::BadRequest(json),
                    _ => CreateExpenseResponse::InternalError(json),
                }
            }
        }
    }

    /// List expenses
    ///
    /// Returns the expenses dated within `from`..=`to`, newest first. Missing
    /// bounds default to the current calendar month.
    #[oai(path = "/expenses", method = "get", tag = "ApiTags::Expenses")]
    async fn list_expenses(
        &self,
        auth: SupabaseBearer,
        from: Query<Option<NaiveDate>>,
        to: Query<Option<NaiveDate>>,
    ) -> ListExpensesResponse {
        let params = ListExpensesParams {
            user_id: auth.0,
            from: from.0,
            to: to.0,
        };

        match self.list_use_case.execute(params).await {
            Ok(expenses) => {
                let responses: Vec<ExpenseResponse> =
                    expenses.into_iter().map(|e| e.into()).collect();
                ListExpensesResponse::Ok(Json(responses))
            }
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => ListExpensesResponse::BadRequest(json),
                    _ => ListExpensesResponse::InternalError(json),
                }
            }
        }
    }

    /// Summarize expenses
    ///
    /// Grand total and per-category totals over the same range as the list.
    #[oai(path = "/expenses/summary", method = "get", tag = "ApiTags::Expenses")]
    async fn summarize_expenses(
        &self,
        auth: SupabaseBearer,
        from: Query<Option<NaiveDate>>,
        to: Query<Option<NaiveDate>>,
    ) -> SummarizeExpensesResponse {
        let params = SummarizeExpensesParams {
            user_id: auth.0,
            from: from.0,
            to: to.0,
        };

        match self.summarize_use_case.execute(params).await {
            Ok(summary) => SummarizeExpensesResponse::Ok(Json(summary.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => SummarizeExpensesResponse::BadRequest(json),
                    _ => SummarizeExpensesResponse::InternalError(json),
                }
            }
        }
    }

    /// Update an expense
    #[oai(path = "/expenses/:id", method = "put", tag = "ApiTags::Expenses")]
    async fn update_expense(
        &self,
        auth: SupabaseBearer,
        id: Path<String>,
        body: Json<UpdateExpenseRequest>,
    ) -> UpdateExpenseResponse {
        let Ok(uuid) = Uuid::parse_str(&id.0) else {
            return UpdateExpenseResponse::BadRequest(invalid_id());
        };

        let amount = match Amount::from_canonical(&body.0.amount) {
            Ok(amount) => amount,
            Err(err) => {
                let (_, json) = ExpenseError::from(err).into_error_response();
                return UpdateExpenseResponse::BadRequest(json);
            }
        };

        let params = UpdateExpenseParams {
            id: uuid,
            user_id: auth.0,
            description: body.0.description,
            amount,
            date: body.0.date,
            category: body.0.category.into(),
        };

        match self.update_use_case.execute(params).await {
            Ok(expense) => UpdateExpenseResponse::Ok(Json(expense.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateExpenseResponse::BadRequest(json),
                    404 => UpdateExpenseResponse::NotFound(json),
                    _ => UpdateExpenseResponse::InternalError(json),
                }
            }
        }
    }

    /// Delete an expense
    #[oai(path = "/expenses/:id", method = "delete", tag = "ApiTags::Expenses")]
    async fn delete_expense(&self, auth: SupabaseBearer, id: Path<String>) -> DeleteExpenseResponse {
        let Ok(uuid) = Uuid::parse_str(&id.0) else {
            return DeleteExpenseResponse::BadRequest(invalid_id());
        };

        match self
            .delete_use_case
            .execute(DeleteExpenseParams {
                id: uuid,
                user_id: auth.0,
            })
            .await
        {
            Ok(()) => DeleteExpenseResponse::NoContent,
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => DeleteExpenseResponse::NotFound(json),
                    _ => DeleteExpenseResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateExpenseResponse {
    #[oai(status = 201)]
    Created(Json<ExpenseResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ListExpensesResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<ExpenseResponse>>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum SummarizeExpensesResponse {
    #[oai(status = 200)]
    Ok(Json<ExpenseSummaryResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateExpenseResponse {
    #[oai(status = 200)]
    Ok(Json<ExpenseResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteExpenseResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
