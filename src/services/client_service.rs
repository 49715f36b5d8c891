// src/services/client_service.rs
//
// Client CRUD plus portal credential management. Codes are stored
// uppercase; the access key is a server-generated 6-character shared
// secret and the login link is `{portal_base_url}/{CODE}`. Both are
// rotated on every update and on an explicit generate_login call, so
// editing a client always re-issues their portal credentials.

use std::sync::Arc;

use rand::Rng;

use crate::{
    common::error::AppError,
    db::{ClientRepo, NewClient},
    models::client::{
        Client, ClientDetail, ClientPortalDetail, ClientSummary, CreateClientPayload,
        UpdateClientPayload,
    },
    services::AssignmentService,
};

const ACCESS_KEY_LEN: usize = 6;
const ACCESS_KEY_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn generate_access_key() -> String {
    let mut rng = rand::thread_rng();
    (0..ACCESS_KEY_LEN)
        .map(|_| ACCESS_KEY_CHARSET[rng.gen_range(0..ACCESS_KEY_CHARSET.len())] as char)
        .collect()
}

#[derive(Clone)]
pub struct ClientService {
    client_repo: Arc<dyn ClientRepo>,
    assignments: AssignmentService,
    portal_base_url: String,
}

impl ClientService {
    pub fn new(
        client_repo: Arc<dyn ClientRepo>,
        assignments: AssignmentService,
        portal_base_url: String,
    ) -> Self {
        Self {
            client_repo,
            assignments,
            portal_base_url: portal_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn login_link_for(&self, code: &str) -> String {
        format!("{}/{}", self.portal_base_url, code)
    }

    pub async fn create(&self, payload: CreateClientPayload) -> Result<Client, AppError> {
        let code = payload.code.trim().to_uppercase();
        if self.client_repo.find_by_code(&code).await?.is_some() {
            return Err(AppError::Conflict(
                "Client with that code already exists".to_string(),
            ));
        }

        let access_key = generate_access_key();
        let login_link = self.login_link_for(&code);

        let client = self
            .client_repo
            .create(NewClient {
                code,
                title: payload.title,
                first_name: payload.first_name,
                last_name: payload.last_name,
                nationality: payload.nationality,
                contact_type: payload.contact_type,
                contact: payload.contact,
                starting_date: payload.starting_date,
                move_in: payload.move_in,
                budget: payload.budget,
                bedrooms: payload.bedrooms,
                bath: payload.bath,
                area: payload.area,
                size: payload.size,
                preferred: payload.preferred,
                status: payload.status,
                work_sheet: payload.work_sheet,
                login_link: Some(login_link),
                access_key: Some(access_key),
            })
            .await?;

        tracing::info!(client_id = client.id, code = %client.code, "client created");
        Ok(client)
    }

    pub async fn get(&self, id: i32) -> Result<ClientDetail, AppError> {
        let client = self
            .client_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Client"))?;
        let assigned_properties = self.assignments.views_for_client(client.id).await?;

        Ok(ClientDetail {
            summary: ClientSummary::from(&client),
            size: client.size,
            login_link: client.login_link.clone(),
            access_key: client.access_key.clone(),
            assigned_properties,
        })
    }

    // Portal lookup: no credentials in the body; the top-level
    // `building` is the building of the most recently assigned property.
    pub async fn get_by_code(&self, code: &str) -> Result<ClientPortalDetail, AppError> {
        let client = self
            .client_repo
            .find_by_code(code)
            .await?
            .ok_or(AppError::NotFound("Client"))?;
        let assigned_properties = self.assignments.views_for_client(client.id).await?;
        let building = assigned_properties
            .last()
            .and_then(|view| view.building.clone());

        Ok(ClientPortalDetail {
            summary: ClientSummary::from(&client),
            size: client.size,
            building,
            assigned_properties,
        })
    }

    pub async fn list(&self) -> Result<Vec<ClientSummary>, AppError> {
        let clients = self.client_repo.list().await?;
        Ok(clients.iter().map(ClientSummary::from).collect())
    }

    pub async fn update(&self, id: i32, payload: UpdateClientPayload) -> Result<Client, AppError> {
        let mut client = self
            .client_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Client"))?;

        payload.title.apply(&mut client.title);
        payload.first_name.apply_required(&mut client.first_name);
        payload.last_name.apply_required(&mut client.last_name);
        payload.nationality.apply(&mut client.nationality);
        payload.contact_type.apply(&mut client.contact_type);
        payload.contact.apply_required(&mut client.contact);
        payload.starting_date.apply(&mut client.starting_date);
        payload.move_in.apply(&mut client.move_in);
        payload.budget.apply(&mut client.budget);
        payload.bedrooms.apply(&mut client.bedrooms);
        payload.bath.apply(&mut client.bath);
        payload.area.apply(&mut client.area);
        payload.size.apply(&mut client.size);
        payload.preferred.apply(&mut client.preferred);
        payload.status.apply(&mut client.status);
        payload.work_sheet.apply(&mut client.work_sheet);

        // Every edit re-issues the portal credentials.
        client.code = client.code.trim().to_uppercase();
        client.access_key = Some(generate_access_key());
        client.login_link = Some(self.login_link_for(&client.code));

        self.client_repo.update(&client).await?;
        Ok(client)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.client_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Client"))?;
        // Assignment rows go with the client via the storage cascade.
        self.client_repo.delete(id).await?;
        tracing::info!(client_id = id, "client deleted");
        Ok(())
    }

    /// Rotates the access key and recomputes the login link.
    pub async fn generate_login(&self, id: i32) -> Result<Client, AppError> {
        let mut client = self
            .client_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Client"))?;

        client.code = client.code.trim().to_uppercase();
        client.access_key = Some(generate_access_key());
        client.login_link = Some(self.login_link_for(&client.code));

        self.client_repo.update(&client).await?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_keys_are_six_uppercase_alphanumerics() {
        for _ in 0..50 {
            let key = generate_access_key();
            assert_eq!(key.len(), 6);
            assert!(key
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }
}
