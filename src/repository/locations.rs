//! Locations repository
//!
//! Hierarchy validation happens in `services::locations`; this layer keeps
//! the check-then-act windows closed at the storage level: inserts and
//! re-parents lean on the `parent_id` foreign key (a concurrently deleted
//! parent fails the write), and deletes are a single statement guarded by a
//! children check, so no child can slip in between the check and the delete.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::location::{Location, LocationType},
    repository::constraint_code,
    services::locations::LocationLookup,
};

const LOCATION_COLUMNS: &str = r#"
    id, parent_id, type AS location_type, name, barcode,
    address, description, created_at, updated_at
"#;

#[derive(Clone)]
pub struct LocationsRepository {
    pool: Pool<Postgres>,
}

impl LocationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, location: &Location) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO locations (id, parent_id, type, name, barcode, address, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(location.id)
        .bind(location.parent_id)
        .bind(location.location_type)
        .bind(&location.name)
        .bind(&location.barcode)
        .bind(&location.address)
        .bind(&location.description)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match constraint_code(&e) {
                Some("unique") => Err(AppError::BarcodeExists(location.barcode.clone())),
                Some("foreign_key") => Err(AppError::ParentNotFound(
                    location.parent_id.unwrap_or(location.id),
                )),
                _ => Err(e.into()),
            },
        }
    }

    pub async fn update(&self, location: &Location) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE locations
            SET parent_id = $2, name = $3, address = $4, description = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(location.id)
        .bind(location.parent_id)
        .bind(&location.name)
        .bind(&location.address)
        .bind(&location.description)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(AppError::NotFound(format!(
                "Location {} not found",
                location.id
            ))),
            Ok(_) => Ok(()),
            Err(e) => match constraint_code(&e) {
                Some("foreign_key") => Err(AppError::ParentNotFound(
                    location.parent_id.unwrap_or(location.id),
                )),
                _ => Err(e.into()),
            },
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations WHERE id = $1",
            LOCATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    pub async fn get_by_barcode(&self, barcode: &str) -> AppResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations WHERE barcode = $1",
            LOCATION_COLUMNS
        ))
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    pub async fn get_by_type(&self, location_type: LocationType) -> AppResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations WHERE type = $1 ORDER BY name",
            LOCATION_COLUMNS
        ))
        .bind(location_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    pub async fn get_children(
        &self,
        parent_id: Uuid,
        child_type: LocationType,
    ) -> AppResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations WHERE parent_id = $1 AND type = $2 ORDER BY name",
            LOCATION_COLUMNS
        ))
        .bind(parent_id)
        .bind(child_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    pub async fn has_children(&self, id: Uuid) -> AppResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM locations WHERE parent_id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get::<bool, _>(0)?)
    }

    /// Delete a location unless it still has children. The children guard
    /// is part of the DELETE statement itself, making check and delete one
    /// isolation unit.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let done = sqlx::query(
            r#"
            DELETE FROM locations
            WHERE id = $1
              AND NOT EXISTS (SELECT 1 FROM locations c WHERE c.parent_id = $1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if done.rows_affected() > 0 {
            return Ok(());
        }

        // Nothing deleted: distinguish a missing row from a guarded one.
        if self.get_by_id(id).await?.is_some() {
            Err(AppError::LocationHasChildren(id))
        } else {
            Err(AppError::NotFound(format!("Location {} not found", id)))
        }
    }
}

#[async_trait]
impl LocationLookup for LocationsRepository {
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Location>> {
        LocationsRepository::get_by_id(self, id).await
    }

    async fn has_children(&self, id: Uuid) -> AppResult<bool> {
        LocationsRepository::has_children(self, id).await
    }
}
