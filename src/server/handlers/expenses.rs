use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::core::services::ExpenseService;
use crate::domain::{Expense, ExpensePatch, Month, NewExpense};
use crate::server::{blocking, error::MessageBody, ApiResult, AppState};

use super::parse_id;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub month: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Expense>>> {
    let store = state.stores.expenses;
    let expenses =
        blocking(move || ExpenseService::list(store.as_ref(), params.month.as_deref())).await?;
    Ok(Json(expenses))
}

pub async fn by_month(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> ApiResult<Json<Vec<Expense>>> {
    let prefix = month.parse::<Month>()?.to_string();
    let store = state.stores.expenses;
    let expenses = blocking(move || ExpenseService::list(store.as_ref(), Some(&prefix))).await?;
    Ok(Json(expenses))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Expense>> {
    let id = parse_id(&id)?;
    let store = state.stores.expenses;
    let expense = blocking(move || ExpenseService::get(store.as_ref(), id)).await?;
    Ok(Json(expense))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewExpense>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let Json(new) = payload?;
    let store = state.stores.expenses;
    let expense = blocking(move || ExpenseService::create(store.as_ref(), new)).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ExpensePatch>, JsonRejection>,
) -> ApiResult<Json<Expense>> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let store = state.stores.expenses;
    let expense = blocking(move || ExpenseService::update(store.as_ref(), id, &patch)).await?;
    Ok(Json(expense))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let id = parse_id(&id)?;
    let store = state.stores.expenses;
    blocking(move || ExpenseService::delete(store.as_ref(), id)).await?;
    Ok(Json(MessageBody::new("Expense deleted successfully")))
}
