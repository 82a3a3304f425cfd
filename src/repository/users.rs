//! Staff accounts repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::{Role, User},
    repository::constraint_code,
};

const USER_COLUMNS: &str = r#"
    id, login, first_name, last_name, middle_name, email,
    password_hash, is_active, created_at, updated_at
"#;

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn get_all(&self) -> AppResult<Vec<User>> {
        let mut users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY login",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        for user in &mut users {
            user.roles = self.get_roles(user.id).await?;
        }

        Ok(users)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        self.with_roles(user).await
    }

    pub async fn get_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE login = $1",
            USER_COLUMNS
        ))
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        self.with_roles(user).await
    }

    async fn with_roles(&self, user: Option<User>) -> AppResult<Option<User>> {
        match user {
            Some(mut user) => {
                user.roles = self.get_roles(user.id).await?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn get_roles(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT r.id, r.code, r.name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.code
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    /// Insert a staff account and its role links in one transaction.
    pub async fn create(&self, user: &User, role_codes: &[String]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, login, first_name, last_name, middle_name,
                               email, password_hash, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(&user.login)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.middle_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .execute(&mut *tx)
        .await;

        if let Err(e) = result {
            return Err(match constraint_code(&e) {
                Some("unique") => {
                    AppError::Conflict(format!("Login '{}' already exists", user.login))
                }
                _ => e.into(),
            });
        }

        for code in role_codes {
            let done = sqlx::query(
                r#"
                INSERT INTO user_roles (user_id, role_id)
                SELECT $1, id FROM roles WHERE code = $2
                "#,
            )
            .bind(user.id)
            .bind(code)
            .execute(&mut *tx)
            .await?;

            if done.rows_affected() == 0 {
                return Err(AppError::Validation(format!("Unknown role '{}'", code)));
            }
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn update(&self, user: &User, role_codes: Option<&[String]>) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let done = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, middle_name = $4, email = $5,
                password_hash = $6, is_active = $7, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.middle_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .execute(&mut *tx)
        .await?;

        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", user.id)));
        }

        if let Some(codes) = role_codes {
            sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
                .bind(user.id)
                .execute(&mut *tx)
                .await?;

            for code in codes {
                let done = sqlx::query(
                    r#"
                    INSERT INTO user_roles (user_id, role_id)
                    SELECT $1, id FROM roles WHERE code = $2
                    "#,
                )
                .bind(user.id)
                .bind(code)
                .execute(&mut *tx)
                .await?;

                if done.rows_affected() == 0 {
                    return Err(AppError::Validation(format!("Unknown role '{}'", code)));
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let done = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        Ok(())
    }
}
