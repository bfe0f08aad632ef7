use crate::{
    AdviceCmd, EngineError, ResultEngine,
    advice::{Advice, Assessment},
    ledger::{Dashboard, Totals},
};

use super::Engine;

impl Engine {
    /// Aggregated view of the user's income, expenses and goals.
    pub async fn dashboard(&self, user_id: &str) -> ResultEngine<Dashboard> {
        let income = self.store.list_income(user_id).await?;
        let expenses = self.store.list_expenses(user_id).await?;
        let goals = self.store.list_goals(user_id).await?;

        Ok(Dashboard::build(&income, &expenses, goals))
    }

    /// Income and expense totals of the user.
    pub async fn totals(&self, user_id: &str) -> ResultEngine<Totals> {
        let income = self.store.list_income(user_id).await?;
        let expenses = self.store.list_expenses(user_id).await?;
        Ok(Totals::new(&income, &expenses))
    }

    /// Judge a prospective expense against the user's current totals.
    ///
    /// Nothing is recorded.
    pub async fn advise(&self, cmd: AdviceCmd) -> ResultEngine<Advice> {
        if !cmd.expense_amount.is_finite() || cmd.expense_amount < 0.0 {
            return Err(EngineError::Validation(
                "Expense amount must be a non-negative number".to_string(),
            ));
        }

        let totals = self.totals(&cmd.user_id).await?;
        let assessment = Assessment::new(totals.income, totals.expenses, cmd.expense_amount);
        tracing::debug!(
            user_id = %cmd.user_id,
            category = cmd.category.as_deref().unwrap_or_default(),
            description = cmd.description.as_deref().unwrap_or_default(),
            severity = assessment.severity.as_str(),
            "advice requested"
        );

        Ok(Advice {
            message: self.picker.pick(assessment.severity),
            assessment,
        })
    }
}
