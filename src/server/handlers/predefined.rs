use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::core::services::{
    PredefinedExpenseService, RangeApplication, RecurrenceService, TemplateFailure,
    TemplateSelection,
};
use crate::domain::{Expense, NewPredefinedExpense, PredefinedExpense, PredefinedExpensePatch};
use crate::errors::BudgetError;
use crate::server::{blocking, error::MessageBody, ApiResult, AppState};

use super::parse_id;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyMonthRequest {
    #[serde(default)]
    pub predefined_expense_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRangeRequest {
    #[serde(default)]
    pub start_month: Option<String>,
    #[serde(default)]
    pub end_month: Option<String>,
    #[serde(default)]
    pub predefined_expense_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize)]
pub struct ApplyMonthResponse {
    pub message: String,
    pub created: Vec<Expense>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<TemplateFailure>>,
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<PredefinedExpense>>> {
    let store = state.stores.predefined;
    let templates = blocking(move || PredefinedExpenseService::list(store.as_ref())).await?;
    Ok(Json(templates))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PredefinedExpense>> {
    let id = parse_id(&id)?;
    let store = state.stores.predefined;
    let template = blocking(move || PredefinedExpenseService::get(store.as_ref(), id)).await?;
    Ok(Json(template))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewPredefinedExpense>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PredefinedExpense>)> {
    let Json(new) = payload?;
    let store = state.stores.predefined;
    let template =
        blocking(move || PredefinedExpenseService::create(store.as_ref(), new)).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PredefinedExpensePatch>, JsonRejection>,
) -> ApiResult<Json<PredefinedExpense>> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let store = state.stores.predefined;
    let template =
        blocking(move || PredefinedExpenseService::update(store.as_ref(), id, &patch)).await?;
    Ok(Json(template))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let id = parse_id(&id)?;
    let store = state.stores.predefined;
    blocking(move || PredefinedExpenseService::delete(store.as_ref(), id)).await?;
    Ok(Json(MessageBody::new(
        "Predefined expense deleted successfully",
    )))
}

pub async fn apply_month(
    State(state): State<AppState>,
    Path(month): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApplyMonthResponse>)> {
    let request: ApplyMonthRequest = optional_body(&body)?;
    let selection = TemplateSelection::from_ids(request.predefined_expense_ids);
    let application =
        blocking(move || recurrence(&state).apply_to_month(&month, &selection)).await?;

    let response = ApplyMonthResponse {
        message: format!(
            "Applied {} predefined expense(s)",
            application.created.len()
        ),
        created: application.created,
        errors: Some(application.errors).filter(|errors| !errors.is_empty()),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn apply_range(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<RangeApplication>)> {
    let request: ApplyRangeRequest = optional_body(&body)?;
    let selection = TemplateSelection::from_ids(request.predefined_expense_ids);
    let result = blocking(move || {
        recurrence(&state).apply_to_range(
            request.start_month.as_deref(),
            request.end_month.as_deref(),
            &selection,
        )
    })
    .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

fn recurrence(state: &AppState) -> RecurrenceService<'_> {
    RecurrenceService::new(
        state.stores.predefined.as_ref(),
        state.stores.expenses.as_ref(),
        state.clock.as_ref(),
    )
}

/// An empty body means "no options"; anything else must be valid JSON.
fn optional_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, BudgetError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| BudgetError::InvalidInput(format!("Invalid request body: {}", err)))
}
