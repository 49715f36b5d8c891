// src/services/building_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{BuildingRepo, NewBuilding, PropertyRepo},
    models::building::{Building, CreateBuildingPayload, UpdateBuildingPayload},
};

#[derive(Clone)]
pub struct BuildingService {
    building_repo: Arc<dyn BuildingRepo>,
    property_repo: Arc<dyn PropertyRepo>,
}

impl BuildingService {
    pub fn new(building_repo: Arc<dyn BuildingRepo>, property_repo: Arc<dyn PropertyRepo>) -> Self {
        Self {
            building_repo,
            property_repo,
        }
    }

    pub async fn create(&self, payload: CreateBuildingPayload) -> Result<Building, AppError> {
        let name = payload.name.trim().to_string();
        if self.building_repo.find_by_name(&name).await?.is_some() {
            return Err(AppError::Conflict(
                "Building with that name already exists".to_string(),
            ));
        }

        let building = self
            .building_repo
            .create(NewBuilding {
                name,
                year_built: payload.year_built,
                nearest_bts: payload.nearest_bts,
                nearest_mrt: payload.nearest_mrt,
                distance_to_bts: payload.distance_to_bts,
                distance_to_mrt: payload.distance_to_mrt,
                facilities: payload.facilities,
                photo_urls: payload.photo_urls,
            })
            .await?;

        tracing::info!(building_id = building.id, name = %building.name, "building created");
        Ok(building)
    }

    pub async fn get(&self, id: i32) -> Result<Building, AppError> {
        self.building_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Building"))
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Building>, AppError> {
        self.building_repo.list(search).await
    }

    pub async fn update(
        &self,
        id: i32,
        payload: UpdateBuildingPayload,
    ) -> Result<Building, AppError> {
        let mut building = self
            .building_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Building"))?;

        payload.name.apply_required(&mut building.name);
        payload.year_built.apply(&mut building.year_built);
        payload.nearest_bts.apply(&mut building.nearest_bts);
        payload.nearest_mrt.apply(&mut building.nearest_mrt);
        payload.distance_to_bts.apply(&mut building.distance_to_bts);
        payload.distance_to_mrt.apply(&mut building.distance_to_mrt);
        payload.facilities.apply(&mut building.facilities);
        payload.photo_urls.apply(&mut building.photo_urls);

        self.building_repo.update(&building).await?;
        Ok(building)
    }

    // Deleting a building that still has properties would orphan them,
    // so the service refuses with a 409 before touching storage.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.building_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Building"))?;

        if self.property_repo.exists_for_building(id).await? {
            return Err(AppError::Conflict(
                "Building has properties and cannot be deleted".to_string(),
            ));
        }

        self.building_repo.delete(id).await?;
        tracing::info!(building_id = id, "building deleted");
        Ok(())
    }
}
