//! Works service

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::work::{CreateWork, UpdateWork, Work},
    repository::Repository,
};

#[derive(Clone)]
pub struct WorksService {
    repository: Repository,
}

impl WorksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Work>> {
        self.repository.works.get_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Work> {
        self.repository
            .works
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Work {} not found", id)))
    }

    pub async fn create(&self, request: CreateWork) -> AppResult<Work> {
        if request.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }

        let now = Utc::now();
        let work = Work {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            year: request.year,
            created_at: now,
            updated_at: now,
        };

        self.repository.works.create(&work, &request.author_ids).await?;
        Ok(work)
    }

    pub async fn update(&self, id: Uuid, updates: UpdateWork) -> AppResult<Work> {
        let mut work = self.get_by_id(id).await?;

        if let Some(title) = updates.title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("title must not be empty".to_string()));
            }
            work.title = title;
        }
        if let Some(description) = updates.description {
            work.description = Some(description);
        }
        if let Some(year) = updates.year {
            work.year = Some(year);
        }

        self.repository
            .works
            .update(&work, updates.author_ids.as_deref())
            .await?;

        Ok(work)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.works.delete(id).await
    }
}
