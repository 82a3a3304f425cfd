//! Publishers service

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::publisher::{CreatePublisher, Publisher, UpdatePublisher},
    repository::Repository,
};

#[derive(Clone)]
pub struct PublishersService {
    repository: Repository,
}

impl PublishersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Publisher>> {
        self.repository.publishers.get_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Publisher> {
        self.repository
            .publishers
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Publisher {} not found", id)))
    }

    pub async fn create(&self, request: CreatePublisher) -> AppResult<Publisher> {
        if request.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }

        let now = Utc::now();
        let publisher = Publisher {
            id: Uuid::new_v4(),
            name: request.name,
            web_url: request.web_url,
            created_at: now,
            updated_at: now,
        };

        self.repository.publishers.create(&publisher).await?;
        Ok(publisher)
    }

    pub async fn update(&self, id: Uuid, updates: UpdatePublisher) -> AppResult<Publisher> {
        let mut publisher = self.get_by_id(id).await?;

        if let Some(name) = updates.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("name must not be empty".to_string()));
            }
            publisher.name = name;
        }
        if let Some(web_url) = updates.web_url {
            publisher.web_url = Some(web_url);
        }

        self.repository.publishers.update(&publisher).await?;
        Ok(publisher)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.publishers.delete(id).await
    }
}
