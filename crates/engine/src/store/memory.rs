//! Process-local store used when no database is configured or reachable.
//!
//! Data is lost on restart.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    Expense, Goal, GoalPatch, Income, NewExpense, NewGoal, NewIncome, NewUser, ResultEngine,
    User, UserFilter,
};

use super::{BackendKind, RecordKind, RecordStore, StoreStatus};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    income: Vec<Income>,
    expenses: Vec<Expense>,
    goals: Vec<Goal>,
}

#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    counters: [AtomicU64; 4],
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            counters: RecordKind::ALL.map(|_| AtomicU64::new(1)),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn generate_id(&self, kind: RecordKind) -> String {
        let next = self.counters[kind.index()].fetch_add(1, Ordering::Relaxed);
        format!("{}_{next}", kind.prefix())
    }

    fn status(&self) -> StoreStatus {
        StoreStatus {
            backend: BackendKind::InMemory,
            connected: false,
            message: "Using in-memory storage (data will be lost on restart)".to_string(),
        }
    }

    async fn find_user(&self, filter: &UserFilter) -> ResultEngine<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| filter.matches(u)).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> ResultEngine<User> {
        let user = user.into_record(Utc::now());
        self.tables.write().await.users.push(user.clone());
        Ok(user)
    }

    async fn list_income(&self, user_id: &str) -> ResultEngine<Vec<Income>> {
        let tables = self.tables.read().await;
        Ok(tables
            .income
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_income(&self, income: NewIncome) -> ResultEngine<Income> {
        let income = income.into_record(Utc::now());
        self.tables.write().await.income.push(income.clone());
        Ok(income)
    }

    async fn list_expenses(&self, user_id: &str) -> ResultEngine<Vec<Expense>> {
        let tables = self.tables.read().await;
        Ok(tables
            .expenses
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_expense(&self, expense: NewExpense) -> ResultEngine<Expense> {
        let expense = expense.into_record(Utc::now());
        self.tables.write().await.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn list_goals(&self, user_id: &str) -> ResultEngine<Vec<Goal>> {
        let tables = self.tables.read().await;
        Ok(tables
            .goals
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_goal(&self, goal_id: &str, user_id: &str) -> ResultEngine<Option<Goal>> {
        let tables = self.tables.read().await;
        Ok(tables
            .goals
            .iter()
            .find(|g| g.id == goal_id && g.user_id == user_id)
            .cloned())
    }

    async fn insert_goal(&self, goal: NewGoal) -> ResultEngine<Goal> {
        let goal = goal.into_record(Utc::now());
        self.tables.write().await.goals.push(goal.clone());
        Ok(goal)
    }

    async fn update_goal(
        &self,
        goal_id: &str,
        user_id: &str,
        patch: GoalPatch,
    ) -> ResultEngine<Option<Goal>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id && g.user_id == user_id)
            .map(|goal| {
                patch.apply(goal);
                goal.clone()
            }))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::EntryType;

    fn income(store: &MemoryStore, user_id: &str, amount: f64) -> NewIncome {
        NewIncome {
            id: store.generate_id(RecordKind::Income),
            user_id: user_id.to_string(),
            amount,
            source: Some("Salary".to_string()),
            entry_type: EntryType::Recurring,
            category: "employment".to_string(),
            date: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }

    #[test]
    fn ids_are_counted_per_kind() {
        let store = MemoryStore::new();
        assert_eq!(store.generate_id(RecordKind::User), "user_1");
        assert_eq!(store.generate_id(RecordKind::User), "user_2");
        assert_eq!(store.generate_id(RecordKind::Goal), "goal_1");
        assert_eq!(store.generate_id(RecordKind::Expense), "expense_1");
    }

    #[tokio::test]
    async fn listing_is_scoped_and_keeps_insertion_order() {
        let store = MemoryStore::new();
        for amount in [30.0, 10.0, 20.0] {
            store
                .insert_income(income(&store, "user_1", amount))
                .await
                .unwrap();
        }
        store
            .insert_income(income(&store, "user_2", 99.0))
            .await
            .unwrap();

        let amounts: Vec<f64> = store
            .list_income("user_1")
            .await
            .unwrap()
            .iter()
            .map(|i| i.amount)
            .collect();
        assert_eq!(amounts, vec![30.0, 10.0, 20.0]);
    }

    #[tokio::test]
    async fn update_goal_requires_owner() {
        let store = MemoryStore::new();
        let goal = store
            .insert_goal(NewGoal {
                id: store.generate_id(RecordKind::Goal),
                user_id: "user_1".to_string(),
                title: "Bike".to_string(),
                target_amount: 500.0,
                category: "other".to_string(),
                deadline: None,
            })
            .await
            .unwrap();

        let patch = GoalPatch::default().current_amount(50.0);
        let foreign = store
            .update_goal(&goal.id, "user_2", patch.clone())
            .await
            .unwrap();
        assert!(foreign.is_none());

        let updated = store
            .update_goal(&goal.id, "user_1", patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.current_amount, 50.0);
        let stored = store.find_goal(&goal.id, "user_1").await.unwrap().unwrap();
        assert_eq!(stored.current_amount, 50.0);
    }
}
