mod common;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use budget_tracker::{
    core::{ExpenseStore, PredefinedExpenseStore, Stores},
    domain::{Category, ExpensePatch, NewExpense},
    server::{
        handlers::{expenses, predefined, salaries, system},
        AppState,
    },
};
use common::{clock_on, memory_state, template, FailingExpenseStore};
use serde_json::json;

fn json_of<T: serde::Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (state, _store) = memory_state(clock_on(2025, 1, 1));
    let Json(health) = system::health(State(state)).await;
    let body = json_of(&health);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["build"]["hash"].is_string());
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let response = system::not_found().await.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expense_crud_flow() {
    let (state, _store) = memory_state(clock_on(2025, 1, 1));
    let new = NewExpense {
        title: "Coffee".into(),
        amount: 4.5,
        category: Category::Food,
        date: "2025-01-12".into(),
        kind: Default::default(),
    };
    let (status, Json(created)) = expenses::create(State(state.clone()), Ok(Json(new)))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let Json(listed) = expenses::list(
        State(state.clone()),
        Query(expenses::ListParams {
            month: Some("2025-01".into()),
        }),
    )
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);

    let patch = ExpensePatch {
        amount: Some(5.0),
        ..ExpensePatch::default()
    };
    let Json(updated) = expenses::update(
        State(state.clone()),
        Path(created.id.to_string()),
        Ok(Json(patch)),
    )
    .await
    .unwrap();
    assert_eq!(updated.amount, 5.0);

    let Json(deleted) = expenses::delete(State(state.clone()), Path(created.id.to_string()))
        .await
        .unwrap();
    assert_eq!(deleted.message, "Expense deleted successfully");
    let err = expenses::get(State(state), Path(created.id.to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_expense_is_rejected_with_400() {
    let (state, _store) = memory_state(clock_on(2025, 1, 1));
    let new = NewExpense {
        title: "   ".into(),
        amount: 10.0,
        category: Category::Other,
        date: "2025-01-12".into(),
        kind: Default::default(),
    };
    let err = expenses::create(State(state.clone()), Ok(Json(new)))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = expenses::by_month(State(state.clone()), Path("2025-13".into()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = expenses::get(State(state), Path("not-an-id".into()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn salary_upsert_accepts_string_amounts_and_defaults_missing_months() {
    let (state, _store) = memory_state(clock_on(2025, 1, 1));
    let body: salaries::UpsertSalary =
        serde_json::from_value(json!({"month": "2025-02", "amount": "5100"})).unwrap();
    let (status, Json(salary)) = salaries::upsert(State(state.clone()), Ok(Json(body)))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(salary.amount, 5100.0);

    let Json(view) = salaries::get(State(state.clone()), Path("2025-03".into()))
        .await
        .unwrap();
    assert_eq!(json_of(&view), json!({"month": "2025-03", "amount": 0.0}));

    let missing: salaries::UpsertSalary =
        serde_json::from_value(json!({"month": "2025-02"})).unwrap();
    let err = salaries::upsert(State(state.clone()), Ok(Json(missing)))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = salaries::delete(State(state), Path("2030-01".into()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn apply_month_reports_created_and_omits_empty_errors() {
    let (state, store) = memory_state(clock_on(2025, 2, 1));
    PredefinedExpenseStore::create(store.as_ref(), template("Rent", 1200.0, Category::Rent, 1))
        .unwrap();

    let (status, Json(response)) = predefined::apply_month(
        State(state.clone()),
        Path("2025-02".into()),
        Bytes::new(),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    let body = json_of(&response);
    assert_eq!(body["message"], "Applied 1 predefined expense(s)");
    assert!(body.get("errors").is_none());

    let (_, Json(response)) =
        predefined::apply_month(State(state), Path("2025-02".into()), Bytes::new())
            .await
            .unwrap();
    let body = json_of(&response);
    assert_eq!(body["message"], "Applied 0 predefined expense(s)");
    assert_eq!(
        body["errors"][0]["reason"],
        "Expense already exists for this month"
    );
}

#[tokio::test]
async fn apply_month_rejects_malformed_input() {
    let (state, _store) = memory_state(clock_on(2025, 2, 1));
    let err = predefined::apply_month(State(state.clone()), Path("2025-13".into()), Bytes::new())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.0.to_string(), "Invalid month format. Use YYYY-MM");

    let err = predefined::apply_month(
        State(state),
        Path("2025-02".into()),
        Bytes::from_static(b"{not json"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn apply_range_uses_request_bounds() {
    let (state, store) = memory_state(clock_on(2025, 2, 14));
    let rent = PredefinedExpenseStore::create(
        store.as_ref(),
        template("Rent", 1200.0, Category::Rent, 1),
    )
    .unwrap();
    let body = json!({
        "startMonth": "2025-02",
        "endMonth": "2025-04",
        "predefinedExpenseIds": [rent.id],
    });

    let (status, Json(result)) = predefined::apply_range(
        State(state.clone()),
        Bytes::from(serde_json::to_vec(&body).unwrap()),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    let body = json_of(&result);
    assert_eq!(body["totalMonths"], 3);
    assert_eq!(body["totalCreated"], 3);
    assert_eq!(body["monthsProcessed"][0]["month"], "2025-02");

    let err = predefined::apply_range(
        State(state),
        Bytes::from_static(br#"{"startMonth": "2025-01"}"#),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failures_surface_in_apply_response() {
    let (base, store) = memory_state(clock_on(2025, 5, 1));
    PredefinedExpenseStore::create(store.as_ref(), template("Rent", 800.0, Category::Rent, 1))
        .unwrap();
    PredefinedExpenseStore::create(store.as_ref(), template("Phone", 25.0, Category::Bills, 9))
        .unwrap();
    let failing: Arc<dyn ExpenseStore> =
        Arc::new(FailingExpenseStore::new(store.clone(), "Phone"));
    let state = AppState {
        stores: Stores {
            expenses: failing,
            ..base.stores.clone()
        },
        ..base
    };

    let (_, Json(response)) =
        predefined::apply_month(State(state), Path("2025-05".into()), Bytes::new())
            .await
            .unwrap();
    let body = json_of(&response);
    assert_eq!(body["created"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["template"], "Phone");
    assert_eq!(body["errors"][0]["kind"], "store");
}
