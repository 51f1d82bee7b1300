//! Signup, login and session-identity lookup.

use std::sync::Arc;

use domains::{
    BoardError, NewUser, PasswordHasher, Result, SessionUser, User, UserRepo, UserRole,
};

/// Validates credentials against the user store. Session binding itself is
/// the HTTP layer's job; this service only produces the identity to bind.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepo>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepo>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Registers a new account and returns its id. The plaintext password
    /// is hashed before it goes anywhere and is never logged.
    pub async fn signup(&self, email: &str, password: &str) -> Result<i64> {
        if self.users.exists_by_email(email).await? {
            return Err(BoardError::DuplicateEmail);
        }
        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .insert(NewUser {
                email: email.to_owned(),
                password_hash,
                role: UserRole::User,
            })
            .await?;
        tracing::info!(user_id = user.id, "account registered");
        Ok(user.id)
    }

    /// Checks credentials and returns the identity to bind to the session.
    ///
    /// Unknown email and wrong password collapse into the same
    /// [`BoardError::BadCredentials`] so the response cannot be used to
    /// enumerate registered emails.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(BoardError::BadCredentials)?;
        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(BoardError::BadCredentials);
        }
        tracing::debug!(user_id = user.id, "login accepted");
        Ok(SessionUser {
            id: user.id,
            role: user.role,
        })
    }

    /// Resolves a session-carried id back to the stored account. `None`
    /// means the session is dangling and should be treated as absent.
    pub async fn current_user(&self, id: i64) -> Result<Option<User>> {
        self.users.find_by_id(id).await
    }
}
