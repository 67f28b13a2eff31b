use async_trait::async_trait;
use sqlx::Row;
use sqlx::mysql::MySqlRow;

use crate::application::ports::user_repository::{
    DuplicateLogin, NewUserRow, UserCredentials, UserRepository,
};
use crate::domain::users::user::User;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::repositories::text_or_empty;

pub struct SqlxUserRepository {
    pub pool: DbPool,
}

impl SqlxUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(r: &MySqlRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: r.try_get("idUsuario")?,
        first_name: text_or_empty(r, "nombre")?,
        last_name: text_or_empty(r, "apellido")?,
        login: text_or_empty(r, "usuario")?,
        email: text_or_empty(r, "mail")?,
        is_admin: r.try_get::<Option<bool>, _>("isAdmin")?.unwrap_or(false),
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        let rows =
            sqlx::query("SELECT idUsuario, nombre, apellido, usuario, mail, isAdmin FROM usuarios")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.iter().map(user_from_row).collect::<Result<_, _>>()?)
    }

    async fn insert_user(&self, row: &NewUserRow) -> anyhow::Result<i64> {
        let res = sqlx::query(
            r#"INSERT INTO usuarios (nombre, apellido, usuario, contrasena, mail, isAdmin)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.login)
        .bind(&row.password_hash)
        .bind(&row.email)
        .bind(row.is_admin)
        .execute(&self.pool)
        .await;
        let res = match res {
            Ok(res) => res,
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(DuplicateLogin {
                    login: row.login.clone(),
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(i64::try_from(res.last_insert_id())?)
    }

    async fn delete_user(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM usuarios WHERE idUsuario = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_by_login(&self, login: &str) -> anyhow::Result<Vec<UserCredentials>> {
        let rows = sqlx::query(
            r#"SELECT idUsuario, nombre, apellido, usuario, contrasena, mail, isAdmin
               FROM usuarios WHERE usuario = ? ORDER BY idUsuario"#,
        )
        .bind(login)
        .fetch_all(&self.pool)
        .await?;
        let creds = rows
            .iter()
            .map(|r| {
                Ok(UserCredentials {
                    user: user_from_row(r)?,
                    password_hash: text_or_empty(r, "contrasena")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        Ok(creds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::repositories::test_support::legacy_session;

    // Integration tests - run with DATABASE_URL pointing at a scratch MySQL database
    // cargo test -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn null_columns_decode_instead_of_panicking() {
        let pool = legacy_session(
            "CREATE TEMPORARY TABLE usuarios (
                idUsuario BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                nombre VARCHAR(255) NULL, apellido VARCHAR(255) NULL,
                usuario VARCHAR(255) NULL, contrasena VARCHAR(255) NULL,
                mail VARCHAR(255) NULL, isAdmin BOOLEAN NULL)",
        )
        .await;
        sqlx::query("INSERT INTO usuarios (usuario) VALUES ('solo')")
            .execute(&pool)
            .await
            .unwrap();
        let repo = SqlxUserRepository::new(pool);

        let users = repo.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].first_name, "");
        assert!(!users[0].is_admin);

        let creds = repo.find_by_login("solo").await.unwrap();
        assert_eq!(creds.len(), 1);
        assert_eq!(creds[0].password_hash, "");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn legacy_duplicates_are_all_returned() {
        let pool = legacy_session(
            "CREATE TEMPORARY TABLE usuarios (
                idUsuario BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                nombre VARCHAR(255), apellido VARCHAR(255), usuario VARCHAR(255),
                contrasena VARCHAR(255), mail VARCHAR(255), isAdmin BOOLEAN)",
        )
        .await;
        sqlx::query(
            "INSERT INTO usuarios (nombre, usuario, contrasena) VALUES ('A', 'dup', 'h1'), ('B', 'dup', 'h2')",
        )
        .execute(&pool)
        .await
        .unwrap();
        let repo = SqlxUserRepository::new(pool);

        let creds = repo.find_by_login("dup").await.unwrap();
        let hashes: Vec<_> = creds.iter().map(|c| c.password_hash.as_str()).collect();
        assert_eq!(hashes, vec!["h1", "h2"]);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unique_login_violation_maps_to_duplicate_login() {
        let pool = legacy_session(
            "CREATE TEMPORARY TABLE usuarios (
                idUsuario BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                nombre VARCHAR(255) NOT NULL, apellido VARCHAR(255) NOT NULL,
                usuario VARCHAR(255) NOT NULL, contrasena VARCHAR(255) NOT NULL,
                mail VARCHAR(255) NOT NULL, isAdmin BOOLEAN NOT NULL DEFAULT FALSE,
                UNIQUE KEY uq_usuarios_usuario (usuario))",
        )
        .await;
        let repo = SqlxUserRepository::new(pool);
        let row = NewUserRow {
            first_name: "Ana".into(),
            last_name: "Paz".into(),
            login: "ana".into(),
            password_hash: "$argon2id$stub".into(),
            email: "ana@example.com".into(),
            is_admin: false,
        };
        repo.insert_user(&row).await.unwrap();
        let err = repo.insert_user(&row).await.unwrap_err();
        assert!(err.downcast_ref::<DuplicateLogin>().is_some());
    }
}
