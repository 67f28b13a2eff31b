use async_trait::async_trait;

use crate::domain::users::user::User;

#[derive(Debug, Clone)]
pub struct NewUserRow {
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub password_hash: String,
    pub email: String,
    pub is_admin: bool,
}

/// A user together with the stored PHC password hash.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Raised by `insert_user` when the login is already taken.
#[derive(thiserror::Error, Debug)]
#[error("login '{login}' is already taken")]
pub struct DuplicateLogin {
    pub login: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> anyhow::Result<Vec<User>>;
    async fn insert_user(&self, row: &NewUserRow) -> anyhow::Result<i64>;
    async fn delete_user(&self, id: i64) -> anyhow::Result<bool>;
    /// Every row for the login. Tables created before logins were unique may hold several.
    async fn find_by_login(&self, login: &str) -> anyhow::Result<Vec<UserCredentials>>;
}
