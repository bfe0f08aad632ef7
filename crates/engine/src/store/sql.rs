//! Persistent store on top of a `sea-orm` connection.
//!
//! The schema lives in the `migration` crate and must be applied before the
//! store is used. Username and email uniqueness is enforced by the database.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, QueryFilter, QueryOrder, SqlErr, prelude::*,
    sea_query::Expr,
};

use crate::{
    EngineError, Expense, Goal, GoalPatch, Income, NewExpense, NewGoal, NewIncome, NewUser,
    ResultEngine, User, UserFilter, expenses, goals, income, users,
};

use super::{BackendKind, RecordKind, RecordStore, StoreStatus};

#[derive(Debug, Clone)]
pub struct SqlStore {
    database: DatabaseConnection,
}

impl SqlStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

fn map_insert_error(err: DbErr) -> EngineError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("unique constraint violated: {detail}");
            EngineError::Conflict("Username or email already exists".to_string())
        }
        _ => EngineError::Database(err),
    }
}

#[async_trait]
impl RecordStore for SqlStore {
    fn generate_id(&self, kind: RecordKind) -> String {
        format!(
            "{}_{}_{:08x}",
            kind.prefix(),
            Utc::now().timestamp_millis(),
            rand::random::<u32>()
        )
    }

    fn status(&self) -> StoreStatus {
        StoreStatus {
            backend: BackendKind::Persistent,
            connected: true,
            message: format!(
                "Connected to {:?} database",
                self.database.get_database_backend()
            ),
        }
    }

    async fn find_user(&self, filter: &UserFilter) -> ResultEngine<Option<User>> {
        let mut query = users::Entity::find();
        if let Some(id) = &filter.id {
            query = query.filter(users::Column::Id.eq(id.as_str()));
        }
        if let Some(username) = &filter.username {
            query = query.filter(users::Column::Username.eq(username.as_str()));
        }
        if let Some(email) = &filter.email {
            query = query.filter(users::Column::Email.eq(email.as_str()));
        }
        if let Some(password) = &filter.password {
            query = query.filter(users::Column::Password.eq(password.as_str()));
        }

        let model = query.one(&self.database).await?;
        Ok(model.map(User::from))
    }

    async fn insert_user(&self, user: NewUser) -> ResultEngine<User> {
        let user = user.into_record(Utc::now());
        users::ActiveModel::from(&user)
            .insert(&self.database)
            .await
            .map_err(map_insert_error)?;
        Ok(user)
    }

    async fn list_income(&self, user_id: &str) -> ResultEngine<Vec<Income>> {
        income::Entity::find()
            .filter(income::Column::UserId.eq(user_id))
            .order_by_asc(income::Column::CreatedAt)
            .order_by_asc(income::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Income::try_from)
            .collect()
    }

    async fn insert_income(&self, new_income: NewIncome) -> ResultEngine<Income> {
        let record = new_income.into_record(Utc::now());
        income::ActiveModel::from(&record)
            .insert(&self.database)
            .await
            .map_err(map_insert_error)?;
        Ok(record)
    }

    async fn list_expenses(&self, user_id: &str) -> ResultEngine<Vec<Expense>> {
        expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .order_by_asc(expenses::Column::CreatedAt)
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    async fn insert_expense(&self, expense: NewExpense) -> ResultEngine<Expense> {
        let record = expense.into_record(Utc::now());
        expenses::ActiveModel::from(&record)
            .insert(&self.database)
            .await
            .map_err(map_insert_error)?;
        Ok(record)
    }

    async fn list_goals(&self, user_id: &str) -> ResultEngine<Vec<Goal>> {
        let models = goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id))
            .order_by_asc(goals::Column::CreatedAt)
            .order_by_asc(goals::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Goal::from).collect())
    }

    async fn find_goal(&self, goal_id: &str, user_id: &str) -> ResultEngine<Option<Goal>> {
        let model = goals::Entity::find_by_id(goal_id.to_string())
            .filter(goals::Column::UserId.eq(user_id))
            .one(&self.database)
            .await?;
        Ok(model.map(Goal::from))
    }

    async fn insert_goal(&self, goal: NewGoal) -> ResultEngine<Goal> {
        let record = goal.into_record(Utc::now());
        goals::ActiveModel::from(&record)
            .insert(&self.database)
            .await
            .map_err(map_insert_error)?;
        Ok(record)
    }

    async fn update_goal(
        &self,
        goal_id: &str,
        user_id: &str,
        patch: GoalPatch,
    ) -> ResultEngine<Option<Goal>> {
        if let Some(current_amount) = patch.current_amount {
            let result = goals::Entity::update_many()
                .col_expr(goals::Column::CurrentAmount, Expr::value(current_amount))
                .filter(goals::Column::Id.eq(goal_id))
                .filter(goals::Column::UserId.eq(user_id))
                .exec(&self.database)
                .await?;
            if result.rows_affected == 0 {
                return Ok(None);
            }
        }

        self.find_goal(goal_id, user_id).await
    }
}
