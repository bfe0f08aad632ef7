//! Dashboard and advice endpoints

use api_types::{
    advice::{AdviceRequest, AdviceResponse, FinancialHealth},
    dashboard::{Analytics, Dashboard, RecentTransaction, TransactionKind},
};
use axum::{Extension, Json, extract::State};
use axum_extra::extract::WithRejection;
use engine::{
    AdviceCmd, Severity, User,
    ledger::{Activity, ActivityKind},
};

use crate::{
    ServerError, entries::entry_type_to_wire, goals::goal_view, server::ServerState,
};

fn recent_transaction(activity: Activity) -> RecentTransaction {
    RecentTransaction {
        id: activity.id,
        kind: match activity.kind {
            ActivityKind::Income => TransactionKind::Income,
            ActivityKind::Expense => TransactionKind::Expense,
        },
        amount: activity.amount,
        description: activity.label,
        category: activity.category,
        entry_type: entry_type_to_wire(activity.entry_type),
        date: activity.date,
    }
}

fn severity_to_wire(severity: Severity) -> api_types::advice::Severity {
    match severity {
        Severity::Success => api_types::advice::Severity::Success,
        Severity::Warning => api_types::advice::Severity::Warning,
        Severity::Danger => api_types::advice::Severity::Danger,
    }
}

/// Handle requests for the user dashboard
pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Dashboard>, ServerError> {
    let dashboard = state.engine.dashboard(&user.id).await?;

    Ok(Json(Dashboard {
        total_income: dashboard.totals.income,
        total_expenses: dashboard.totals.expenses,
        savings: dashboard.savings,
        savings_rate: format!("{:.2}", dashboard.savings_rate),
        recent_transactions: dashboard
            .recent_transactions
            .into_iter()
            .map(recent_transaction)
            .collect(),
        goals: dashboard.goals.into_iter().map(goal_view).collect(),
        analytics: Analytics {
            income_by_category: dashboard.income_by_category,
            expense_by_category: dashboard.expense_by_category,
        },
    }))
}

/// Handle requests for advice on a prospective expense
pub async fn advice(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<AdviceRequest>, ServerError>,
) -> Result<Json<AdviceResponse>, ServerError> {
    let cmd = AdviceCmd {
        user_id: user.id,
        expense_amount: payload.expense_amount,
        category: payload.expense_category,
        description: payload.description,
    };
    let advice = state.engine.advise(cmd).await?;
    let assessment = advice.assessment;

    Ok(Json(AdviceResponse {
        advice: advice.message,
        emotion: assessment.severity.emotion().to_string(),
        severity: severity_to_wire(assessment.severity),
        financial_health: FinancialHealth {
            current_balance: assessment.current_balance,
            expense_ratio: format!("{:.2}", assessment.expense_ratio * 100.0),
            can_afford: assessment.can_afford(),
        },
    }))
}
