//! Savings goals.
//!
//! A goal is created with `current_amount = 0` and only grows through
//! funding. Over-funding past `target_amount` is allowed.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

#[derive(Clone, Debug, PartialEq)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub category: String,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Amount still missing to reach the target, never negative.
    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }
}

/// A goal ready to be inserted; the store stamps `created_at`.
#[derive(Clone, Debug)]
pub struct NewGoal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: f64,
    pub category: String,
    pub deadline: Option<NaiveDate>,
}

impl NewGoal {
    pub fn into_record(self, created_at: DateTime<Utc>) -> Goal {
        Goal {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            target_amount: self.target_amount,
            current_amount: 0.0,
            category: self.category,
            deadline: self.deadline,
            created_at,
        }
    }
}

/// Partial update of a goal. Unset fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct GoalPatch {
    pub current_amount: Option<f64>,
}

impl GoalPatch {
    #[must_use]
    pub fn current_amount(mut self, amount: f64) -> Self {
        self.current_amount = Some(amount);
        self
    }

    pub fn apply(&self, goal: &mut Goal) {
        if let Some(amount) = self.current_amount {
            goal.current_amount = amount;
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[sea_orm(column_type = "Double")]
    pub target_amount: f64,
    #[sea_orm(column_type = "Double")]
    pub current_amount: f64,
    pub category: String,
    pub deadline: Option<Date>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Goal {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            target_amount: model.target_amount,
            current_amount: model.current_amount,
            category: model.category,
            deadline: model.deadline,
            created_at: model.created_at,
        }
    }
}

impl From<&Goal> for ActiveModel {
    fn from(value: &Goal) -> Self {
        Self {
            id: ActiveValue::Set(value.id.clone()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            title: ActiveValue::Set(value.title.clone()),
            target_amount: ActiveValue::Set(value.target_amount),
            current_amount: ActiveValue::Set(value.current_amount),
            category: ActiveValue::Set(value.category.clone()),
            deadline: ActiveValue::Set(value.deadline),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: f64) -> Goal {
        NewGoal {
            id: "goal_1".to_string(),
            user_id: "user_1".to_string(),
            title: "Vacation".to_string(),
            target_amount: target,
            category: "travel".to_string(),
            deadline: None,
        }
        .into_record(Utc::now())
    }

    #[test]
    fn new_goal_starts_empty() {
        let goal = goal(5000.0);
        assert_eq!(goal.current_amount, 0.0);
        assert!(!goal.is_completed());
        assert_eq!(goal.remaining(), 5000.0);
    }

    #[test]
    fn patch_only_touches_set_fields() {
        let mut goal = goal(100.0);
        GoalPatch::default().apply(&mut goal);
        assert_eq!(goal.current_amount, 0.0);

        GoalPatch::default().current_amount(150.0).apply(&mut goal);
        assert_eq!(goal.current_amount, 150.0);
        assert!(goal.is_completed());
        assert_eq!(goal.remaining(), 0.0);
    }
}
