use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct ValidateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct ValidateUserRequest {
    pub login: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> ValidateUser<'a, R> {
    /// Returns the first user for the login whose stored hash matches the password.
    pub async fn execute(&self, req: &ValidateUserRequest) -> anyhow::Result<Option<User>> {
        let rows = self.repo.find_by_login(&req.login).await?;
        let argon = Argon2::default();
        for row in rows {
            let parsed = match PasswordHash::new(&row.password_hash) {
                Ok(p) => p,
                Err(e) => {
                    // Rows written before hashing was introduced hold plaintext; they never validate.
                    tracing::warn!(user_id = row.user.id, error = %e, "stored_password_not_a_hash");
                    continue;
                }
            };
            if argon
                .verify_password(req.password.as_bytes(), &parsed)
                .is_ok()
            {
                return Ok(Some(row.user));
            }
        }
        Ok(None)
    }
}
