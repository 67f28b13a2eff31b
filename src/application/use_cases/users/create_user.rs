use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::user_repository::{NewUserRow, UserRepository};

pub struct CreateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub password: String,
    pub email: String,
    pub is_admin: bool,
}

impl<'a, R: UserRepository + ?Sized> CreateUser<'a, R> {
    pub async fn execute(&self, req: &CreateUserRequest) -> anyhow::Result<i64> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        let row = NewUserRow {
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            login: req.login.clone(),
            password_hash: hash,
            email: req.email.clone(),
            is_admin: req.is_admin,
        };
        self.repo.insert_user(&row).await
    }
}
