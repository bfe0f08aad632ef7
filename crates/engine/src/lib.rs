//! Ledger engine of the personal finance tracker.
//!
//! Users record income and expenses, open savings goals and fund them from
//! what they have left. The engine computes balances and the dashboard view,
//! enforces that a goal contribution never exceeds the available balance and
//! classifies prospective expenses for the advisor.
//!
//! All records go through a [`RecordStore`](store::RecordStore); the engine
//! does not care whether it is persistent or in-memory.

pub use advice::{Advice, Assessment, FirstMessagePicker, MessagePicker, RandomPicker, Severity};
pub use commands::{AdviceCmd, ExpenseCmd, GoalCmd, IncomeCmd, RegisterCmd};
pub use entry::{DEFAULT_CATEGORY, EntryType};
pub use error::EngineError;
pub use expenses::{Expense, NewExpense};
pub use goals::{Goal, GoalPatch, NewGoal};
pub use income::{Income, NewIncome};
pub use ledger::{Activity, ActivityKind, Dashboard, Totals};
pub use ops::{
    CONTRIBUTION_CATEGORY, DEMO_EMAIL, DEMO_NAME, DEMO_PASSWORD, DEMO_USERNAME, Engine,
    EngineBuilder,
};
pub use users::{NewUser, User, UserFilter};

pub mod advice;
mod commands;
mod entry;
mod error;
mod expenses;
mod goals;
mod income;
pub mod ledger;
mod ops;
pub mod store;
mod users;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
