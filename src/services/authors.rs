//! Authors service

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor, UpdateAuthor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.get_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Author> {
        self.repository
            .authors
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    pub async fn create(&self, request: CreateAuthor) -> AppResult<Author> {
        if request.last_name.trim().is_empty() {
            return Err(AppError::Validation("last_name is required".to_string()));
        }

        let now = Utc::now();
        let author = Author {
            id: Uuid::new_v4(),
            last_name: request.last_name,
            first_name: request.first_name,
            middle_name: request.middle_name,
            birth_date: request.birth_date,
            death_date: request.death_date,
            bio: request.bio,
            created_at: now,
            updated_at: now,
        };

        self.repository.authors.create(&author).await?;
        Ok(author)
    }

    pub async fn update(&self, id: Uuid, updates: UpdateAuthor) -> AppResult<Author> {
        let mut author = self.get_by_id(id).await?;

        if let Some(last_name) = updates.last_name {
            if last_name.trim().is_empty() {
                return Err(AppError::Validation("last_name must not be empty".to_string()));
            }
            author.last_name = last_name;
        }
        if let Some(first_name) = updates.first_name {
            author.first_name = Some(first_name);
        }
        if let Some(middle_name) = updates.middle_name {
            author.middle_name = Some(middle_name);
        }
        if let Some(birth_date) = updates.birth_date {
            author.birth_date = Some(birth_date);
        }
        if let Some(death_date) = updates.death_date {
            author.death_date = Some(death_date);
        }
        if let Some(bio) = updates.bio {
            author.bio = Some(bio);
        }

        self.repository.authors.update(&author).await?;
        Ok(author)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }
}
