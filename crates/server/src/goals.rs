//! Savings goal endpoints

use api_types::goal::{GoalFund, GoalNew, GoalView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use engine::{Goal, GoalCmd, User};

use crate::{ServerError, server::ServerState};

pub(crate) fn goal_view(goal: Goal) -> GoalView {
    let completed = goal.is_completed();
    let remaining_amount = goal.remaining();
    GoalView {
        id: goal.id,
        user_id: goal.user_id,
        title: goal.title,
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        category: goal.category,
        deadline: goal.deadline,
        created_at: goal.created_at,
        remaining_amount,
        completed,
    }
}

/// Handle requests for listing the user goals
pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<GoalView>>, ServerError> {
    let goals = state.engine.goals(&user.id).await?;
    Ok(Json(goals.into_iter().map(goal_view).collect()))
}

/// Handle requests for creating a new goal
pub async fn goal_new(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<GoalNew>, ServerError>,
) -> Result<(StatusCode, Json<GoalView>), ServerError> {
    let cmd = GoalCmd {
        user_id: user.id,
        title: payload.title,
        target_amount: payload.target_amount,
        category: payload.category,
        deadline: payload.deadline,
    };
    let goal = state.engine.new_goal(cmd).await?;

    Ok((StatusCode::CREATED, Json(goal_view(goal))))
}

/// Handle requests for moving money from the balance into a goal
pub async fn fund(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(goal_id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<GoalFund>, ServerError>,
) -> Result<Json<GoalView>, ServerError> {
    let goal = state
        .engine
        .fund_goal(&goal_id, &user.id, payload.amount)
        .await?;

    Ok(Json(goal_view(goal)))
}
