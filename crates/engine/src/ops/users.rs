use crate::{
    EngineError, NewUser, RegisterCmd, ResultEngine, User, UserFilter, store::RecordKind,
};

use super::Engine;

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo123";
pub const DEMO_EMAIL: &str = "demo@spendwise.com";
pub const DEMO_NAME: &str = "Demo User";

impl Engine {
    /// Register a new user.
    ///
    /// The username is checked before the email, so a request clashing on
    /// both always reports the username.
    pub async fn register(&self, cmd: RegisterCmd) -> ResultEngine<User> {
        let username = cmd.username.trim();
        let email = cmd.email.trim();
        let name = cmd.name.trim();
        if username.is_empty() || cmd.password.is_empty() || email.is_empty() || name.is_empty() {
            return Err(EngineError::Validation(
                "All fields are required".to_string(),
            ));
        }

        if self
            .store
            .find_user(&UserFilter::default().username(username))
            .await?
            .is_some()
        {
            return Err(EngineError::Conflict("Username already exists".to_string()));
        }

        if self
            .store
            .find_user(&UserFilter::default().email(email))
            .await?
            .is_some()
        {
            return Err(EngineError::Conflict(
                "Email already registered".to_string(),
            ));
        }

        let user = self
            .store
            .insert_user(NewUser {
                id: self.store.generate_id(RecordKind::User),
                username: username.to_string(),
                password: cmd.password,
                email: email.to_string(),
                name: name.to_string(),
            })
            .await?;
        tracing::info!(user_id = %user.id, "registered user {}", user.username);
        Ok(user)
    }

    /// Check a username/password pair.
    ///
    /// The username is trimmed like on registration; the password is not.
    pub async fn login(&self, username: &str, password: &str) -> ResultEngine<User> {
        let invalid = || EngineError::Unauthenticated("Invalid credentials".to_string());
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(invalid());
        }

        self.store
            .find_user(&UserFilter::default().username(username).password(password))
            .await?
            .ok_or_else(invalid)
    }

    /// Map an identity token to its user.
    ///
    /// The token is the user id itself; there is no session nor signature.
    pub async fn resolve_identity(&self, token: &str) -> ResultEngine<User> {
        let token = token.trim();
        if token.is_empty() {
            return Err(EngineError::Unauthenticated(
                "Authentication required".to_string(),
            ));
        }

        self.store
            .find_user(&UserFilter::default().id(token))
            .await?
            .ok_or_else(|| EngineError::Unauthenticated("Invalid user".to_string()))
    }

    /// Create the demo account unless it already exists.
    pub async fn ensure_demo_user(&self) -> ResultEngine<User> {
        if let Some(user) = self
            .store
            .find_user(&UserFilter::default().username(DEMO_USERNAME))
            .await?
        {
            return Ok(user);
        }

        let user = self
            .store
            .insert_user(NewUser {
                id: self.store.generate_id(RecordKind::User),
                username: DEMO_USERNAME.to_string(),
                password: DEMO_PASSWORD.to_string(),
                email: DEMO_EMAIL.to_string(),
                name: DEMO_NAME.to_string(),
            })
            .await?;
        tracing::info!(user_id = %user.id, "demo user created");
        Ok(user)
    }
}
