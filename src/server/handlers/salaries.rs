use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::core::services::SalaryService;
use crate::domain::Salary;
use crate::errors::BudgetError;
use crate::server::{blocking, error::MessageBody, ApiResult, AppState};

/// Salary amounts arrive either as JSON numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Unparsable text counts as zero.
    pub fn value(&self) -> f64 {
        match self {
            AmountInput::Number(amount) => *amount,
            AmountInput::Text(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|amount| amount.is_finite())
                .unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpsertSalary {
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub amount: Option<AmountInput>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSalary {
    #[serde(default)]
    pub amount: Option<AmountInput>,
}

/// Either the stored salary or a zero placeholder for an empty month.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SalaryView {
    Stored(Salary),
    Missing { month: String, amount: f64 },
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Salary>>> {
    let store = state.stores.salaries;
    let salaries = blocking(move || SalaryService::list(store.as_ref())).await?;
    Ok(Json(salaries))
}

pub async fn get(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> ApiResult<Json<SalaryView>> {
    let store = state.stores.salaries;
    let view = blocking(move || {
        Ok(match SalaryService::for_month(store.as_ref(), &month)? {
            Some(salary) => SalaryView::Stored(salary),
            None => SalaryView::Missing { month, amount: 0.0 },
        })
    })
    .await?;
    Ok(Json(view))
}

pub async fn upsert(
    State(state): State<AppState>,
    payload: Result<Json<UpsertSalary>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Salary>)> {
    let Json(body) = payload?;
    let (Some(month), Some(amount)) = (body.month.filter(|m| !m.is_empty()), body.amount) else {
        return Err(BudgetError::InvalidInput("Month and amount are required".into()).into());
    };
    let store = state.stores.salaries;
    let salary =
        blocking(move || SalaryService::upsert(store.as_ref(), &month, amount.value())).await?;
    Ok((StatusCode::CREATED, Json(salary)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(month): Path<String>,
    payload: Result<Json<UpdateSalary>, JsonRejection>,
) -> ApiResult<Json<Salary>> {
    let Json(body) = payload?;
    let amount = body
        .amount
        .ok_or_else(|| BudgetError::InvalidInput("Amount is required".into()))?;
    let store = state.stores.salaries;
    let salary =
        blocking(move || SalaryService::update(store.as_ref(), &month, amount.value())).await?;
    Ok(Json(salary))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let store = state.stores.salaries;
    blocking(move || SalaryService::delete(store.as_ref(), &month)).await?;
    Ok(Json(MessageBody::new("Salary deleted successfully")))
}
