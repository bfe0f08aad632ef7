//! Income records.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{EngineError, EntryType};

#[derive(Clone, Debug, PartialEq)]
pub struct Income {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub source: Option<String>,
    pub entry_type: EntryType,
    pub category: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// An income ready to be inserted; the store stamps `created_at`.
#[derive(Clone, Debug)]
pub struct NewIncome {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub source: Option<String>,
    pub entry_type: EntryType,
    pub category: String,
    pub date: DateTime<Utc>,
}

impl NewIncome {
    pub fn into_record(self, created_at: DateTime<Utc>) -> Income {
        Income {
            id: self.id,
            user_id: self.user_id,
            amount: self.amount,
            source: self.source,
            entry_type: self.entry_type,
            category: self.category,
            date: self.date,
            created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "income")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub source: Option<String>,
    pub entry_type: String,
    pub category: String,
    pub date: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Income {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            entry_type: EntryType::try_from(model.entry_type.as_str())
                .map_err(|err| EngineError::Internal(format!("income {}: {err}", model.id)))?,
            id: model.id,
            user_id: model.user_id,
            amount: model.amount,
            source: model.source,
            category: model.category,
            date: model.date,
            created_at: model.created_at,
        })
    }
}

impl From<&Income> for ActiveModel {
    fn from(value: &Income) -> Self {
        Self {
            id: ActiveValue::Set(value.id.clone()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            amount: ActiveValue::Set(value.amount),
            source: ActiveValue::Set(value.source.clone()),
            entry_type: ActiveValue::Set(value.entry_type.as_str().to_string()),
            category: ActiveValue::Set(value.category.clone()),
            date: ActiveValue::Set(value.date),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}
