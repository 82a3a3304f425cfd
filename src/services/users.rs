//! Authentication and staff account service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User, UserClaims, ROLE_ADMIN},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by login and return a JWT token with the user
    pub async fn authenticate(&self, login: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_login(login)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid login or password".to_string()))?;

        if !user.is_active {
            return Err(AppError::Authentication("Account is disabled".to_string()));
        }

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid login or password".to_string()));
        }

        let token = self.create_token(&user)?;
        Ok((token, user))
    }

    fn create_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.login.clone(),
            user_id: user.id,
            roles: user.role_codes(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid stored password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        Ok(hash.to_string())
    }

    pub async fn get_all(&self) -> AppResult<Vec<User>> {
        self.repository.users.get_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        self.repository
            .users
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn create(&self, request: CreateUser) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            login: request.login,
            first_name: request.first_name,
            last_name: request.last_name,
            middle_name: request.middle_name,
            email: request.email,
            password_hash: self.hash_password(&request.password)?,
            is_active: true,
            roles: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.repository.users.create(&user, &request.roles).await?;
        self.get_by_id(user.id).await
    }

    pub async fn update(&self, id: Uuid, updates: UpdateUser) -> AppResult<User> {
        let mut user = self.get_by_id(id).await?;

        if let Some(password) = updates.password {
            user.password_hash = self.hash_password(&password)?;
        }
        if let Some(first_name) = updates.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = updates.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(middle_name) = updates.middle_name {
            user.middle_name = Some(middle_name);
        }
        if let Some(email) = updates.email {
            user.email = Some(email);
        }
        if let Some(is_active) = updates.is_active {
            user.is_active = is_active;
        }

        self.repository
            .users
            .update(&user, updates.roles.as_deref())
            .await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.users.delete(id).await
    }

    /// Seed an administrator account on an empty installation so the first
    /// operator can log in. The password must be changed immediately.
    pub async fn ensure_bootstrap_admin(&self) -> AppResult<()> {
        if self.repository.users.count().await? > 0 {
            return Ok(());
        }

        tracing::warn!("no staff accounts found, creating default 'admin' user");

        self.create(CreateUser {
            login: "admin".to_string(),
            password: "admin".to_string(),
            first_name: "Administrator".to_string(),
            last_name: None,
            middle_name: None,
            email: None,
            roles: vec![ROLE_ADMIN.to_string()],
        })
        .await?;

        Ok(())
    }
}
