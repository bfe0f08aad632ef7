//! Record persistence.
//!
//! Business logic talks to [`RecordStore`] only. Two backends exist:
//!
//! - [`SqlStore`]: persistent, backed by a `sea-orm` connection. Ids are
//!   derived from the clock plus random bits.
//! - [`MemoryStore`]: ephemeral, process local. Ids come from a per-kind
//!   counter and insertion order is preserved.
//!
//! The backend is picked once at startup and never switched afterwards.

use std::fmt;

use async_trait::async_trait;

use crate::{
    Expense, Goal, GoalPatch, Income, NewExpense, NewGoal, NewIncome, NewUser, ResultEngine,
    User, UserFilter,
};

mod memory;
mod sql;

pub use memory::MemoryStore;
pub use sql::SqlStore;

/// The four record namespaces. Ids are unique within a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    User,
    Income,
    Expense,
    Goal,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [Self::User, Self::Income, Self::Expense, Self::Goal];

    /// Prefix of every id generated for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Goal => "goal",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::User => 0,
            Self::Income => 1,
            Self::Expense => 2,
            Self::Goal => 3,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Persistent,
    InMemory,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Persistent => "persistent",
            Self::InMemory => "in-memory",
        }
    }
}

/// What the store reports about itself on the health endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreStatus {
    pub backend: BackendKind,
    pub connected: bool,
    pub message: String,
}

/// Keyed storage for users, income, expenses and goals.
///
/// Lookups are exact-match only. Listing is always scoped by owner.
#[async_trait]
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Produce an id that is unique within `kind`.
    fn generate_id(&self, kind: RecordKind) -> String;

    fn status(&self) -> StoreStatus;

    /// First user matching every field of `filter`.
    async fn find_user(&self, filter: &UserFilter) -> ResultEngine<Option<User>>;

    /// Fails with `Conflict` on a username or email clash when the backend
    /// enforces uniqueness itself.
    async fn insert_user(&self, user: NewUser) -> ResultEngine<User>;

    async fn list_income(&self, user_id: &str) -> ResultEngine<Vec<Income>>;

    async fn insert_income(&self, income: NewIncome) -> ResultEngine<Income>;

    async fn list_expenses(&self, user_id: &str) -> ResultEngine<Vec<Expense>>;

    async fn insert_expense(&self, expense: NewExpense) -> ResultEngine<Expense>;

    async fn list_goals(&self, user_id: &str) -> ResultEngine<Vec<Goal>>;

    /// The goal with `goal_id` owned by `user_id`, if any.
    async fn find_goal(&self, goal_id: &str, user_id: &str) -> ResultEngine<Option<Goal>>;

    async fn insert_goal(&self, goal: NewGoal) -> ResultEngine<Goal>;

    /// Merge `patch` into the goal matching both `goal_id` and `user_id`.
    ///
    /// Returns `None` when no such goal exists. The merge is applied as a
    /// single write, readers never see a partial update.
    async fn update_goal(
        &self,
        goal_id: &str,
        user_id: &str,
        patch: GoalPatch,
    ) -> ResultEngine<Option<Goal>>;
}
