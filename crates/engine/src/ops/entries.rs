use chrono::Utc;

use crate::{
    Expense, ExpenseCmd, Income, IncomeCmd, NewExpense, NewIncome, ResultEngine,
    entry::{category_or_default, validate_entry_amount},
    store::RecordKind,
    util::normalize_optional_text,
};

use super::Engine;

impl Engine {
    /// Record an income for `cmd.user_id`.
    pub async fn add_income(&self, cmd: IncomeCmd) -> ResultEngine<Income> {
        let amount = validate_entry_amount(cmd.amount)?;
        self.store
            .insert_income(NewIncome {
                id: self.store.generate_id(RecordKind::Income),
                user_id: cmd.user_id,
                amount,
                source: normalize_optional_text(cmd.source.as_deref()),
                entry_type: cmd.entry_type.unwrap_or_default(),
                category: category_or_default(cmd.category.as_deref()),
                date: cmd.date.unwrap_or_else(Utc::now),
            })
            .await
    }

    /// Record an expense for `cmd.user_id`.
    pub async fn add_expense(&self, cmd: ExpenseCmd) -> ResultEngine<Expense> {
        let amount = validate_entry_amount(cmd.amount)?;
        self.store
            .insert_expense(NewExpense {
                id: self.store.generate_id(RecordKind::Expense),
                user_id: cmd.user_id,
                amount,
                description: normalize_optional_text(cmd.description.as_deref()),
                entry_type: cmd.entry_type.unwrap_or_default(),
                category: category_or_default(cmd.category.as_deref()),
                date: cmd.date.unwrap_or_else(Utc::now),
            })
            .await
    }

    /// Every income of the user, in storage order.
    pub async fn income(&self, user_id: &str) -> ResultEngine<Vec<Income>> {
        self.store.list_income(user_id).await
    }

    /// Every expense of the user, goal contributions included.
    pub async fn expenses(&self, user_id: &str) -> ResultEngine<Vec<Expense>> {
        self.store.list_expenses(user_id).await
    }
}
