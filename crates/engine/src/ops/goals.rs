use chrono::Utc;

use crate::{
    EngineError, EntryType, Goal, GoalCmd, GoalPatch, NewExpense, NewGoal, ResultEngine,
    entry::category_or_default,
    ledger::{self, Totals},
    store::RecordKind,
};

use super::Engine;

/// Category of the expense mirroring a goal contribution.
pub const CONTRIBUTION_CATEGORY: &str = "savings";

impl Engine {
    /// Create a goal with nothing saved yet.
    pub async fn new_goal(&self, cmd: GoalCmd) -> ResultEngine<Goal> {
        let title = cmd.title.trim();
        if title.is_empty() {
            return Err(EngineError::Validation("Goal title is required".to_string()));
        }
        if !cmd.target_amount.is_finite() || cmd.target_amount <= 0.0 {
            return Err(EngineError::Validation(
                "Target amount must be positive".to_string(),
            ));
        }

        self.store
            .insert_goal(NewGoal {
                id: self.store.generate_id(RecordKind::Goal),
                user_id: cmd.user_id,
                title: title.to_string(),
                target_amount: cmd.target_amount,
                category: category_or_default(cmd.category.as_deref()),
                deadline: cmd.deadline,
            })
            .await
    }

    pub async fn goals(&self, user_id: &str) -> ResultEngine<Vec<Goal>> {
        self.store.list_goals(user_id).await
    }

    /// Balance the user can still move into `goal`.
    async fn available_balance_for(&self, goal: &Goal) -> ResultEngine<f64> {
        let income = self.store.list_income(&goal.user_id).await?;
        let expenses = self.store.list_expenses(&goal.user_id).await?;
        let goals = self.store.list_goals(&goal.user_id).await?;

        let totals = Totals::new(&income, &expenses);
        Ok(ledger::available_balance(&totals, &goals, goal))
    }

    /// Move `amount` into a goal.
    ///
    /// Every call is a new contribution. On success the goal grows by exactly
    /// `amount` and a companion `savings` expense of the same amount is
    /// recorded. Funding runs one at a time per user.
    ///
    /// Goals of other users are reported as not found.
    pub async fn fund_goal(&self, goal_id: &str, user_id: &str, amount: f64) -> ResultEngine<Goal> {
        let lock = self.funding_locks.for_key(user_id);
        let _guard = lock.lock().await;

        let not_found = || EngineError::NotFound("Goal not found".to_string());
        let goal = self
            .store
            .find_goal(goal_id, user_id)
            .await?
            .ok_or_else(not_found)?;

        if amount.is_nan() || amount <= 0.0 {
            return Err(EngineError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        let available = self.available_balance_for(&goal).await?;
        if amount > available {
            tracing::debug!(goal_id, user_id, amount, available, "funding refused");
            return Err(EngineError::InsufficientFunds(
                "Insufficient balance".to_string(),
            ));
        }

        let updated = self
            .store
            .update_goal(
                goal_id,
                user_id,
                GoalPatch::default().current_amount(goal.current_amount + amount),
            )
            .await?
            .ok_or_else(not_found)?;

        // The store has no multi-record transaction: the goal is already
        // updated when the companion expense is written.
        let companion = NewExpense {
            id: self.store.generate_id(RecordKind::Expense),
            user_id: user_id.to_string(),
            amount,
            description: Some(format!("Goal contribution: {}", goal.title)),
            entry_type: EntryType::OneTime,
            category: CONTRIBUTION_CATEGORY.to_string(),
            date: Utc::now(),
        };
        if let Err(err) = self.store.insert_expense(companion).await {
            tracing::error!(
                goal_id,
                user_id,
                amount,
                needs_reconciliation = true,
                "goal funded but companion expense not recorded: {err}"
            );
            return Err(EngineError::Internal(format!(
                "goal {goal_id} funded without companion expense"
            )));
        }

        tracing::info!(goal_id, user_id, amount, "goal funded");
        Ok(updated)
    }
}
