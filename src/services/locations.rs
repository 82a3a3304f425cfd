//! Location service and hierarchy validation
//!
//! The validators are pure decision points over a lookup seam: they never
//! mutate anything and they do not provide atomicity across their own
//! boundary. The storage layer closes the remaining windows (parent foreign
//! key on insert/re-parent, child-guarded single-statement delete), so a
//! validated write cannot race a concurrent hierarchy change into an
//! inconsistent state.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    barcode,
    error::{AppError, AppResult},
    models::{
        barcode::BarcodeCategory,
        location::{CreateLocation, Location, LocationType, UpdateLocation},
    },
    repository::Repository,
    services::barcode::BarcodeService,
};

/// Read access to stored locations, as needed by the hierarchy validators.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationLookup: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Location>>;
    async fn has_children(&self, id: Uuid) -> AppResult<bool>;
}

/// Checks a candidate location against the containment rules.
///
/// A building must have an address and can never have a parent; anything
/// else needs a parent exactly one level above its own type.
pub async fn validate_create(
    candidate: &CreateLocation,
    lookup: &dyn LocationLookup,
) -> AppResult<()> {
    match candidate.location_type {
        LocationType::Building => {
            if candidate.parent_id.is_some() {
                return Err(AppError::LocationCannotHaveParent);
            }
            let address = candidate.address.as_deref().map(str::trim).unwrap_or("");
            if address.is_empty() {
                return Err(AppError::Validation(
                    "address is required for a building".to_string(),
                ));
            }
        }
        child_type => {
            let parent_id = candidate.parent_id.ok_or_else(|| {
                AppError::Validation(format!("parent_id is required for a {}", child_type))
            })?;

            let parent = lookup
                .get_by_id(parent_id)
                .await?
                .ok_or(AppError::ParentNotFound(parent_id))?;

            if !child_type.is_child_of(parent.location_type) {
                return Err(AppError::InvalidLocationType(format!(
                    "a {} cannot be placed under a {}",
                    child_type, parent.location_type
                )));
            }
        }
    }

    Ok(())
}

/// Checks a proposed re-parenting. Same rules as creation, applied to the
/// new parent; a building can never acquire a parent.
pub async fn validate_reparent(
    location: &Location,
    new_parent_id: Uuid,
    lookup: &dyn LocationLookup,
) -> AppResult<()> {
    if location.location_type == LocationType::Building {
        return Err(AppError::LocationCannotHaveParent);
    }

    let parent = lookup
        .get_by_id(new_parent_id)
        .await?
        .ok_or(AppError::ParentNotFound(new_parent_id))?;

    if !location.location_type.is_child_of(parent.location_type) {
        return Err(AppError::InvalidLocationType(format!(
            "a {} cannot be placed under a {}",
            location.location_type, parent.location_type
        )));
    }

    Ok(())
}

/// A location with at least one child cannot be deleted.
pub async fn validate_delete(location: &Location, lookup: &dyn LocationLookup) -> AppResult<()> {
    if lookup.has_children(location.id).await? {
        return Err(AppError::LocationHasChildren(location.id));
    }

    Ok(())
}

#[derive(Clone)]
pub struct LocationService {
    repository: Repository,
    barcode: BarcodeService,
}

impl LocationService {
    pub fn new(repository: Repository, barcode: BarcodeService) -> Self {
        Self { repository, barcode }
    }

    /// Validate the hierarchy, mint a location barcode and persist.
    ///
    /// The sequence value consumed by issuance is lost if the insert fails;
    /// gaps are accepted.
    pub async fn create(&self, request: CreateLocation) -> AppResult<Location> {
        if request.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }

        validate_create(&request, &self.repository.locations).await?;

        let ean13 = self.barcode.issue(BarcodeCategory::Location).await?;
        let now = Utc::now();

        let location = Location {
            id: Uuid::new_v4(),
            parent_id: request.parent_id,
            location_type: request.location_type,
            name: request.name,
            barcode: ean13,
            address: request.address,
            description: request.description,
            created_at: now,
            updated_at: now,
        };

        self.repository.locations.create(&location).await?;

        tracing::info!(
            "created {} '{}' with barcode {}",
            location.location_type,
            location.name,
            location.barcode
        );

        Ok(location)
    }

    pub async fn update(&self, id: Uuid, updates: UpdateLocation) -> AppResult<Location> {
        let mut location = self.require(id).await?;

        if let Some(new_parent_id) = updates.parent_id {
            validate_reparent(&location, new_parent_id, &self.repository.locations).await?;
            location.parent_id = Some(new_parent_id);
        }

        if let Some(name) = updates.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("name must not be empty".to_string()));
            }
            location.name = name;
        }

        if let Some(address) = updates.address {
            if location.location_type == LocationType::Building && address.trim().is_empty() {
                return Err(AppError::Validation(
                    "address is required for a building".to_string(),
                ));
            }
            location.address = Some(address);
        }

        if let Some(description) = updates.description {
            location.description = Some(description);
        }

        self.repository.locations.update(&location).await?;
        Ok(location)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let location = self.require(id).await?;
        validate_delete(&location, &self.repository.locations).await?;

        // The repository re-checks inside the DELETE itself, covering the
        // window between this validation and the write.
        self.repository.locations.delete(id).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Location> {
        self.require(id).await
    }

    pub async fn get_by_type(&self, location_type: LocationType) -> AppResult<Vec<Location>> {
        self.repository.locations.get_by_type(location_type).await
    }

    /// Children of `parent_id` having `child_type`; the requested type must
    /// be a direct child type of the parent's.
    pub async fn get_children(
        &self,
        parent_id: Uuid,
        child_type: LocationType,
    ) -> AppResult<Vec<Location>> {
        let parent = self
            .repository
            .locations
            .get_by_id(parent_id)
            .await?
            .ok_or(AppError::ParentNotFound(parent_id))?;

        if !child_type.is_child_of(parent.location_type) {
            return Err(AppError::InvalidLocationType(format!(
                "a {} has no {} children",
                parent.location_type, child_type
            )));
        }

        self.repository.locations.get_children(parent_id, child_type).await
    }

    pub async fn get_by_barcode(&self, code: &str) -> AppResult<Location> {
        if !barcode::validate(code) {
            return Err(AppError::InvalidBarcode(code.to_string()));
        }

        self.repository
            .locations
            .get_by_barcode(code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No location with barcode {}", code)))
    }

    async fn require(&self, id: Uuid) -> AppResult<Location> {
        self.repository
            .locations
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(location_type: LocationType) -> Location {
        let now = Utc::now();
        Location {
            id: Uuid::new_v4(),
            parent_id: None,
            location_type,
            name: format!("test {}", location_type),
            barcode: "2000000000015".to_string(),
            address: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn candidate(location_type: LocationType, parent_id: Option<Uuid>) -> CreateLocation {
        CreateLocation {
            parent_id,
            location_type,
            name: "candidate".to_string(),
            address: None,
            description: None,
        }
    }

    fn lookup_returning(parent: Location) -> MockLocationLookup {
        let mut lookup = MockLocationLookup::new();
        lookup
            .expect_get_by_id()
            .returning(move |_| Ok(Some(parent.clone())));
        lookup
    }

    #[tokio::test]
    async fn test_create_building_with_parent_rejected() {
        // Rejected even when an address is present.
        let mut request = candidate(LocationType::Building, Some(Uuid::new_v4()));
        request.address = Some("12 Library Lane".to_string());

        let lookup = MockLocationLookup::new();
        let err = validate_create(&request, &lookup).await.unwrap_err();
        assert!(matches!(err, AppError::LocationCannotHaveParent));
    }

    #[tokio::test]
    async fn test_create_building_requires_address() {
        let mut request = candidate(LocationType::Building, None);
        request.address = Some("   ".to_string());

        let lookup = MockLocationLookup::new();
        let err = validate_create(&request, &lookup).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_building_with_address_ok() {
        let mut request = candidate(LocationType::Building, None);
        request.address = Some("12 Library Lane".to_string());

        let lookup = MockLocationLookup::new();
        validate_create(&request, &lookup).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_room_requires_parent() {
        let request = candidate(LocationType::Room, None);

        let lookup = MockLocationLookup::new();
        let err = validate_create(&request, &lookup).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_parent_not_found() {
        let parent_id = Uuid::new_v4();
        let request = candidate(LocationType::Room, Some(parent_id));

        let mut lookup = MockLocationLookup::new();
        lookup.expect_get_by_id().returning(|_| Ok(None));

        let err = validate_create(&request, &lookup).await.unwrap_err();
        assert!(matches!(err, AppError::ParentNotFound(id) if id == parent_id));
    }

    #[tokio::test]
    async fn test_create_room_under_shelf_rejected() {
        let request = candidate(LocationType::Room, Some(Uuid::new_v4()));
        let lookup = lookup_returning(stored(LocationType::Shelf));

        let err = validate_create(&request, &lookup).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidLocationType(_)));
    }

    #[tokio::test]
    async fn test_create_cabinet_under_building_rejected() {
        // Level 3 directly under level 1 skips a level.
        let request = candidate(LocationType::Cabinet, Some(Uuid::new_v4()));
        let lookup = lookup_returning(stored(LocationType::Building));

        let err = validate_create(&request, &lookup).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidLocationType(_)));
    }

    #[tokio::test]
    async fn test_create_cabinet_under_room_ok() {
        let request = candidate(LocationType::Cabinet, Some(Uuid::new_v4()));
        let lookup = lookup_returning(stored(LocationType::Room));

        validate_create(&request, &lookup).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_room_under_building_ok() {
        let request = candidate(LocationType::Room, Some(Uuid::new_v4()));
        let lookup = lookup_returning(stored(LocationType::Building));

        validate_create(&request, &lookup).await.unwrap();
    }

    #[tokio::test]
    async fn test_reparent_building_always_rejected() {
        let building = stored(LocationType::Building);
        let lookup = MockLocationLookup::new();

        let err = validate_reparent(&building, Uuid::new_v4(), &lookup)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::LocationCannotHaveParent));
    }

    #[tokio::test]
    async fn test_reparent_shelf_to_cabinet_ok() {
        let shelf = stored(LocationType::Shelf);
        let lookup = lookup_returning(stored(LocationType::Cabinet));

        validate_reparent(&shelf, Uuid::new_v4(), &lookup).await.unwrap();
    }

    #[tokio::test]
    async fn test_reparent_shelf_to_room_rejected() {
        let shelf = stored(LocationType::Shelf);
        let lookup = lookup_returning(stored(LocationType::Room));

        let err = validate_reparent(&shelf, Uuid::new_v4(), &lookup)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidLocationType(_)));
    }

    #[tokio::test]
    async fn test_reparent_to_missing_parent() {
        let shelf = stored(LocationType::Shelf);
        let mut lookup = MockLocationLookup::new();
        lookup.expect_get_by_id().returning(|_| Ok(None));

        let err = validate_reparent(&shelf, Uuid::new_v4(), &lookup)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ParentNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_with_children_rejected() {
        let cabinet = stored(LocationType::Cabinet);
        let mut lookup = MockLocationLookup::new();
        lookup.expect_has_children().returning(|_| Ok(true));

        let err = validate_delete(&cabinet, &lookup).await.unwrap_err();
        assert!(matches!(err, AppError::LocationHasChildren(id) if id == cabinet.id));
    }

    #[tokio::test]
    async fn test_delete_without_children_ok() {
        let cabinet = stored(LocationType::Cabinet);
        let mut lookup = MockLocationLookup::new();
        lookup.expect_has_children().returning(|_| Ok(false));

        validate_delete(&cabinet, &lookup).await.unwrap();
    }
}
