// src/db/memory.rs
//
// In-memory backend implementing every storage port. Used by the test
// suite and selected at bootstrap when no DATABASE_URL is configured.
// It honors the same contracts as the Postgres schema: unique email,
// client code, building name and property code; one link per
// (client, property) pair; cascade delete of links when a client or a
// property goes away.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::{
    assignment::ClientProperty, auth::User, building::Building, client::Client,
    property::Property,
};

use super::{
    AssignmentRepo, BuildingRepo, ClientRepo, NewBuilding, NewClient, NewProperty, NewUser,
    PropertyRepo, UserRepo,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    clients: Vec<Client>,
    buildings: Vec<Building>,
    properties: Vec<Property>,
    links: Vec<ClientProperty>,
    next_user_id: i32,
    next_client_id: i32,
    next_building_id: i32,
    next_property_id: i32,
    next_link_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // A poisoned lock still holds consistent data for our usage.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert_building_locked(tables: &mut Tables, new_building: NewBuilding) -> Building {
        tables.next_building_id += 1;
        let building = Building {
            id: tables.next_building_id,
            name: new_building.name,
            year_built: new_building.year_built,
            nearest_bts: new_building.nearest_bts,
            nearest_mrt: new_building.nearest_mrt,
            distance_to_bts: new_building.distance_to_bts,
            distance_to_mrt: new_building.distance_to_mrt,
            facilities: new_building.facilities,
            photo_urls: new_building.photo_urls,
            created_at: now(),
        };
        tables.buildings.push(building.clone());
        building
    }

    fn insert_property_locked(
        tables: &mut Tables,
        row: NewProperty,
        building_id: i32,
    ) -> Property {
        tables.next_property_id += 1;
        let property = Property {
            id: tables.next_property_id,
            property_code: row.property_code,
            building_id,
            building_name: row.building_name,
            unit: row.unit,
            owner: row.owner,
            contact: row.contact,
            size: row.size,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            year_built: row.year_built,
            floor: row.floor,
            area: row.area,
            status: row.status,
            price: row.price,
            sell_price: row.sell_price,
            preferred_tenant: row.preferred_tenant,
            sent: row.sent,
            photo_urls: row.photo_urls,
            created_at: now(),
        };
        tables.properties.push(property.clone());
        property
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_uuid(&self, user_uuid: Uuid) -> Result<Option<User>, AppError> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.user_uuid == user_uuid)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables();
        if tables.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::Conflict(
                "User with that email already exists".to_string(),
            ));
        }
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            user_uuid: new_user.user_uuid,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            created_at: now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ClientRepo for MemoryStore {
    async fn create(&self, new_client: NewClient) -> Result<Client, AppError> {
        let mut tables = self.tables();
        if tables.clients.iter().any(|c| c.code == new_client.code) {
            return Err(AppError::Conflict(
                "Client with that code already exists".to_string(),
            ));
        }
        tables.next_client_id += 1;
        let client = Client {
            id: tables.next_client_id,
            code: new_client.code,
            title: new_client.title,
            first_name: new_client.first_name,
            last_name: new_client.last_name,
            nationality: new_client.nationality,
            contact_type: new_client.contact_type,
            contact: new_client.contact,
            starting_date: new_client.starting_date,
            move_in: new_client.move_in,
            budget: new_client.budget,
            bedrooms: new_client.bedrooms,
            bath: new_client.bath,
            area: new_client.area,
            size: new_client.size,
            preferred: new_client.preferred,
            status: new_client.status,
            work_sheet: new_client.work_sheet,
            login_link: new_client.login_link,
            access_key: new_client.access_key,
            created_at: now(),
        };
        tables.clients.push(client.clone());
        Ok(client)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Client>, AppError> {
        Ok(self.tables().clients.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Client>, AppError> {
        Ok(self.tables().clients.iter().find(|c| c.code == code).cloned())
    }

    async fn list(&self) -> Result<Vec<Client>, AppError> {
        Ok(self.tables().clients.clone())
    }

    async fn update(&self, client: &Client) -> Result<(), AppError> {
        let mut tables = self.tables();
        if let Some(slot) = tables.clients.iter_mut().find(|c| c.id == client.id) {
            *slot = client.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tables = self.tables();
        tables.clients.retain(|c| c.id != id);
        // Cascade: links referencing the client go with it.
        tables.links.retain(|l| l.client_id != id);
        Ok(())
    }
}

#[async_trait]
impl BuildingRepo for MemoryStore {
    async fn create(&self, new_building: NewBuilding) -> Result<Building, AppError> {
        let mut tables = self.tables();
        if tables.buildings.iter().any(|b| b.name == new_building.name) {
            return Err(AppError::Conflict(
                "Building with that name already exists".to_string(),
            ));
        }
        Ok(Self::insert_building_locked(&mut tables, new_building))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Building>, AppError> {
        Ok(self.tables().buildings.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Building>, AppError> {
        Ok(self.tables().buildings.iter().find(|b| b.name == name).cloned())
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Building>, AppError> {
        let tables = self.tables();
        match search.filter(|s| !s.is_empty()) {
            Some(term) => {
                let term = term.to_lowercase();
                Ok(tables
                    .buildings
                    .iter()
                    .filter(|b| b.name.to_lowercase().contains(&term))
                    .cloned()
                    .collect())
            }
            None => Ok(tables.buildings.clone()),
        }
    }

    async fn update(&self, building: &Building) -> Result<(), AppError> {
        let mut tables = self.tables();
        if tables
            .buildings
            .iter()
            .any(|b| b.id != building.id && b.name == building.name)
        {
            return Err(AppError::Conflict(
                "Building with that name already exists".to_string(),
            ));
        }
        if let Some(slot) = tables.buildings.iter_mut().find(|b| b.id == building.id) {
            *slot = building.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.tables().buildings.retain(|b| b.id != id);
        Ok(())
    }
}

#[async_trait]
impl PropertyRepo for MemoryStore {
    async fn create(&self, new_property: NewProperty) -> Result<Property, AppError> {
        let mut tables = self.tables();
        if tables
            .properties
            .iter()
            .any(|p| p.property_code == new_property.property_code)
        {
            return Err(AppError::Conflict(
                "Property with that code already exists".to_string(),
            ));
        }
        let building_id = new_property
            .building_id
            .ok_or_else(|| AppError::BadRequest("building_id is required".to_string()))?;
        Ok(Self::insert_property_locked(
            &mut tables,
            new_property,
            building_id,
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Property>, AppError> {
        Ok(self.tables().properties.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Property>, AppError> {
        Ok(self
            .tables()
            .properties
            .iter()
            .find(|p| p.property_code == code)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Property>, AppError> {
        Ok(self.tables().properties.clone())
    }

    async fn update(&self, property: &Property) -> Result<(), AppError> {
        let mut tables = self.tables();
        if tables
            .properties
            .iter()
            .any(|p| p.id != property.id && p.property_code == property.property_code)
        {
            return Err(AppError::Conflict(
                "Property with that code already exists".to_string(),
            ));
        }
        if let Some(slot) = tables.properties.iter_mut().find(|p| p.id == property.id) {
            *slot = property.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tables = self.tables();
        tables.properties.retain(|p| p.id != id);
        // Cascade: links referencing the property go with it.
        tables.links.retain(|l| l.property_id != id);
        Ok(())
    }

    async fn exists_for_building(&self, building_id: i32) -> Result<bool, AppError> {
        Ok(self
            .tables()
            .properties
            .iter()
            .any(|p| p.building_id == building_id))
    }

    async fn bulk_create(&self, rows: Vec<NewProperty>) -> Result<(u32, u32), AppError> {
        let mut created: u32 = 0;
        let mut skipped: u32 = 0;
        let mut tables = self.tables();

        for row in rows {
            if tables
                .properties
                .iter()
                .any(|p| p.property_code == row.property_code)
            {
                skipped += 1;
                continue;
            }

            let building_id = match (row.building_id, row.building_name.as_deref()) {
                (Some(id), _) => {
                    if !tables.buildings.iter().any(|b| b.id == id) {
                        skipped += 1;
                        continue;
                    }
                    id
                }
                (None, Some(name)) => match tables.buildings.iter().find(|b| b.name == name) {
                    Some(b) => b.id,
                    None => {
                        let new_building = NewBuilding {
                            name: name.to_string(),
                            ..NewBuilding::default()
                        };
                        Self::insert_building_locked(&mut tables, new_building).id
                    }
                },
                (None, None) => {
                    skipped += 1;
                    continue;
                }
            };

            Self::insert_property_locked(&mut tables, row, building_id);
            created += 1;
        }

        Ok((created, skipped))
    }
}

#[async_trait]
impl AssignmentRepo for MemoryStore {
    async fn find(
        &self,
        client_id: i32,
        property_id: i32,
    ) -> Result<Option<ClientProperty>, AppError> {
        Ok(self
            .tables()
            .links
            .iter()
            .find(|l| l.client_id == client_id && l.property_id == property_id)
            .cloned())
    }

    async fn insert(&self, client_id: i32, property_id: i32) -> Result<ClientProperty, AppError> {
        let mut tables = self.tables();
        if tables
            .links
            .iter()
            .any(|l| l.client_id == client_id && l.property_id == property_id)
        {
            return Err(AppError::Conflict("Property already assigned".to_string()));
        }
        tables.next_link_id += 1;
        let link = ClientProperty {
            id: tables.next_link_id,
            client_id,
            property_id,
            comment: None,
            is_active: false,
            created_at: now(),
        };
        tables.links.push(link.clone());
        Ok(link)
    }

    async fn update(&self, link: &ClientProperty) -> Result<(), AppError> {
        let mut tables = self.tables();
        if let Some(slot) = tables.links.iter_mut().find(|l| l.id == link.id) {
            *slot = link.clone();
        }
        Ok(())
    }

    async fn delete(&self, client_id: i32, property_id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables();
        let before = tables.links.len();
        tables
            .links
            .retain(|l| !(l.client_id == client_id && l.property_id == property_id));
        Ok(tables.links.len() != before)
    }

    async fn list_for_client(&self, client_id: i32) -> Result<Vec<ClientProperty>, AppError> {
        let mut links: Vec<ClientProperty> = self
            .tables()
            .links
            .iter()
            .filter(|l| l.client_id == client_id)
            .cloned()
            .collect();
        links.sort_by_key(|l| l.id);
        Ok(links)
    }
}
