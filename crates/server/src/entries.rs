//! Income and expense endpoints

use api_types::{
    expense::{ExpenseNew, ExpenseView},
    income::{IncomeNew, IncomeView},
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use engine::{EntryType, Expense, ExpenseCmd, Income, IncomeCmd, User};

use crate::{ServerError, server::ServerState};

pub(crate) fn entry_type_to_wire(entry_type: EntryType) -> api_types::EntryType {
    match entry_type {
        EntryType::OneTime => api_types::EntryType::OneTime,
        EntryType::Recurring => api_types::EntryType::Recurring,
    }
}

fn entry_type_from_wire(entry_type: api_types::EntryType) -> EntryType {
    match entry_type {
        api_types::EntryType::OneTime => EntryType::OneTime,
        api_types::EntryType::Recurring => EntryType::Recurring,
    }
}

fn income_view(income: Income) -> IncomeView {
    IncomeView {
        id: income.id,
        user_id: income.user_id,
        amount: income.amount,
        source: income.source,
        entry_type: entry_type_to_wire(income.entry_type),
        category: income.category,
        date: income.date,
        created_at: income.created_at,
    }
}

fn expense_view(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        user_id: expense.user_id,
        amount: expense.amount,
        description: expense.description,
        entry_type: entry_type_to_wire(expense.entry_type),
        category: expense.category,
        date: expense.date,
        created_at: expense.created_at,
    }
}

/// Handle requests for listing the user income
pub async fn list_income(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<IncomeView>>, ServerError> {
    let income = state.engine.income(&user.id).await?;
    Ok(Json(income.into_iter().map(income_view).collect()))
}

/// Handle requests for recording a new income
pub async fn income_new(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<IncomeNew>, ServerError>,
) -> Result<(StatusCode, Json<IncomeView>), ServerError> {
    let cmd = IncomeCmd {
        user_id: user.id,
        amount: payload.amount,
        source: payload.source,
        entry_type: payload.entry_type.map(entry_type_from_wire),
        category: payload.category,
        date: payload.date.map(|date| date.with_timezone(&Utc)),
    };
    let income = state.engine.add_income(cmd).await?;

    Ok((StatusCode::CREATED, Json(income_view(income))))
}

/// Handle requests for listing the user expenses
pub async fn list_expenses(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state.engine.expenses(&user.id).await?;
    Ok(Json(expenses.into_iter().map(expense_view).collect()))
}

/// Handle requests for recording a new expense
pub async fn expense_new(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<ExpenseNew>, ServerError>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let cmd = ExpenseCmd {
        user_id: user.id,
        amount: payload.amount,
        description: payload.description,
        entry_type: payload.entry_type.map(entry_type_from_wire),
        category: payload.category,
        date: payload.date.map(|date| date.with_timezone(&Utc)),
    };
    let expense = state.engine.add_expense(cmd).await?;

    Ok((StatusCode::CREATED, Json(expense_view(expense))))
}
