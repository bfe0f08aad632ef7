//! Registered users.
//!
//! The `id` doubles as the opaque identity token sent by clients.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Opaque credential, compared by equality.
    pub password: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A user ready to be inserted; the store stamps `created_at`.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub id: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
}

impl NewUser {
    pub fn into_record(self, created_at: DateTime<Utc>) -> User {
        User {
            id: self.id,
            username: self.username,
            password: self.password,
            email: self.email,
            name: self.name,
            created_at,
        }
    }
}

/// Exact-match filter over users. Every set field must match.
#[derive(Clone, Debug, Default)]
pub struct UserFilter {
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UserFilter {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn matches(&self, user: &User) -> bool {
        fn field(expected: &Option<String>, actual: &str) -> bool {
            expected.as_deref().is_none_or(|e| e == actual)
        }

        field(&self.id, &user.id)
            && field(&self.username, &user.username)
            && field(&self.email, &user.email)
            && field(&self.password, &user.password)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password: model.password,
            email: model.email,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

impl From<&User> for ActiveModel {
    fn from(value: &User) -> Self {
        Self {
            id: ActiveValue::Set(value.id.clone()),
            username: ActiveValue::Set(value.username.clone()),
            password: ActiveValue::Set(value.password.clone()),
            email: ActiveValue::Set(value.email.clone()),
            name: ActiveValue::Set(value.name.clone()),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}
