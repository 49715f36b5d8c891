// src/services/property_service.rs
//
// Property CRUD plus the bulk import. Bulk entries are parsed one by
// one so a malformed row is counted as skipped instead of failing the
// batch; buildings referenced by name are created lazily inside the
// repository's single commit.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::{
    common::error::AppError,
    db::{BuildingRepo, NewProperty, PropertyRepo},
    models::property::{
        BulkPropertyEntry, CreatePropertyPayload, Property, PropertyResponse,
        UpdatePropertyPayload,
    },
};

#[derive(Clone)]
pub struct PropertyService {
    property_repo: Arc<dyn PropertyRepo>,
    building_repo: Arc<dyn BuildingRepo>,
    photo_endpoint: String,
}

impl PropertyService {
    pub fn new(
        property_repo: Arc<dyn PropertyRepo>,
        building_repo: Arc<dyn BuildingRepo>,
        photo_endpoint: String,
    ) -> Self {
        Self {
            property_repo,
            building_repo,
            photo_endpoint: photo_endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn placeholder_photos(&self) -> Value {
        json!({ "main": [format!("{}/noimageyet.jpg", self.photo_endpoint)] })
    }

    pub async fn create(&self, payload: CreatePropertyPayload) -> Result<Property, AppError> {
        let building = self
            .building_repo
            .find_by_id(payload.building_id)
            .await?
            .ok_or(AppError::NotFound("Building"))?;

        if self
            .property_repo
            .find_by_code(&payload.property_code)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Property with that code already exists".to_string(),
            ));
        }

        let photo_urls = payload.photo_urls.or_else(|| Some(self.placeholder_photos()));
        let property = self
            .property_repo
            .create(NewProperty {
                property_code: payload.property_code,
                building_id: Some(building.id),
                building_name: Some(building.name),
                unit: payload.unit,
                owner: payload.owner,
                contact: payload.contact,
                size: payload.size,
                bedrooms: payload.bedrooms,
                bathrooms: payload.bathrooms,
                year_built: payload.year_built,
                floor: payload.floor,
                area: payload.area,
                status: payload.status,
                price: payload.price,
                sell_price: payload.sell_price,
                preferred_tenant: payload.preferred_tenant,
                sent: payload.sent,
                photo_urls,
            })
            .await?;

        tracing::info!(property_id = property.id, code = %property.property_code, "property created");
        Ok(property)
    }

    pub async fn get(&self, id: i32) -> Result<PropertyResponse, AppError> {
        let property = self
            .property_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Property"))?;
        self.to_response(&property).await
    }

    pub async fn list(&self) -> Result<Vec<PropertyResponse>, AppError> {
        let properties = self.property_repo.list().await?;
        let mut responses = Vec::with_capacity(properties.len());
        for property in &properties {
            responses.push(self.to_response(property).await?);
        }
        Ok(responses)
    }

    pub async fn update(
        &self,
        id: i32,
        payload: UpdatePropertyPayload,
    ) -> Result<PropertyResponse, AppError> {
        let mut property = self
            .property_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Property"))?;

        if let Some(new_building_id) = payload.building_id.into_option() {
            let building = self
                .building_repo
                .find_by_id(new_building_id)
                .await?
                .ok_or(AppError::NotFound("Building"))?;
            property.building_id = building.id;
            property.building_name = Some(building.name);
        }

        if let Some(new_code) = payload.property_code.into_option() {
            if new_code != property.property_code
                && self.property_repo.find_by_code(&new_code).await?.is_some()
            {
                return Err(AppError::Conflict(
                    "Property with that code already exists".to_string(),
                ));
            }
            property.property_code = new_code;
        }

        payload.unit.apply_required(&mut property.unit);
        payload.owner.apply(&mut property.owner);
        payload.contact.apply(&mut property.contact);
        payload.size.apply(&mut property.size);
        payload.bedrooms.apply(&mut property.bedrooms);
        payload.bathrooms.apply(&mut property.bathrooms);
        payload.year_built.apply(&mut property.year_built);
        payload.floor.apply(&mut property.floor);
        payload.area.apply(&mut property.area);
        payload.status.apply(&mut property.status);
        payload.price.apply(&mut property.price);
        payload.sell_price.apply(&mut property.sell_price);
        payload.sent.apply(&mut property.sent);
        payload.preferred_tenant.apply(&mut property.preferred_tenant);
        payload.photo_urls.apply(&mut property.photo_urls);

        self.property_repo.update(&property).await?;
        self.to_response(&property).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.property_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Property"))?;
        // Assignment rows go with the property via the storage cascade.
        self.property_repo.delete(id).await?;
        tracing::info!(property_id = id, "property deleted");
        Ok(())
    }

    /// Bulk import. Returns `(created, skipped)`; skipped counts both
    /// rows rejected during parsing and rows the storage layer refused
    /// (duplicate code, unresolvable building).
    pub async fn bulk_create(&self, entries: Vec<Value>) -> Result<(u32, u32), AppError> {
        let mut rows = Vec::with_capacity(entries.len());
        let mut skipped: u32 = 0;

        for entry in entries {
            let parsed: BulkPropertyEntry = match serde_json::from_value(entry) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::debug!("bulk import entry rejected: {e}");
                    skipped += 1;
                    continue;
                }
            };

            let Some(property_code) = parsed.property_code.filter(|c| !c.trim().is_empty()) else {
                skipped += 1;
                continue;
            };
            let Some(unit) = parsed.unit.filter(|u| !u.trim().is_empty()) else {
                skipped += 1;
                continue;
            };

            let building_name = parsed.building.map(|b| b.trim().to_string());
            let photo_urls = parsed
                .photo_urls
                .or_else(|| Some(self.placeholder_photos()));

            rows.push(NewProperty {
                property_code,
                building_id: parsed.building_id,
                building_name,
                unit,
                owner: parsed.owner,
                contact: parsed.contact,
                size: parsed.size,
                bedrooms: parsed.bedrooms,
                bathrooms: parsed.bathrooms,
                year_built: parsed.year_built,
                floor: parsed.floor,
                area: parsed.area,
                status: parsed.status,
                price: parsed.price,
                sell_price: parsed.sell_price,
                preferred_tenant: parsed.preferred_tenant,
                sent: parsed.sent,
                photo_urls,
            });
        }

        let (created, storage_skipped) = self.property_repo.bulk_create(rows).await?;
        tracing::info!(created, skipped = skipped + storage_skipped, "bulk import finished");
        Ok((created, skipped + storage_skipped))
    }

    async fn to_response(&self, property: &Property) -> Result<PropertyResponse, AppError> {
        let building_name = self
            .building_repo
            .find_by_id(property.building_id)
            .await?
            .map(|b| b.name)
            .or_else(|| property.building_name.clone());
        Ok(PropertyResponse::from_property(property, building_name))
    }
}
