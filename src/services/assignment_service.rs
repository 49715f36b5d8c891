// src/services/assignment_service.rs
//
// Links clients to properties. Assignment is idempotent; annotation
// updates touch only the supplied fields; the list view is orphan
// tolerant (a link whose property no longer resolves is skipped, not
// an error). Row cleanup on client/property delete is owned by the
// storage layer's cascade, never here.

use std::sync::Arc;

use crate::{
    common::coerce::Patch,
    common::error::AppError,
    db::{AssignmentRepo, BuildingRepo, ClientRepo, PropertyRepo},
    models::assignment::{AssignmentView, ClientProperty, UpdateAnnotationPayload},
};

#[derive(Clone)]
pub struct AssignmentService {
    assignment_repo: Arc<dyn AssignmentRepo>,
    client_repo: Arc<dyn ClientRepo>,
    property_repo: Arc<dyn PropertyRepo>,
    building_repo: Arc<dyn BuildingRepo>,
}

impl AssignmentService {
    pub fn new(
        assignment_repo: Arc<dyn AssignmentRepo>,
        client_repo: Arc<dyn ClientRepo>,
        property_repo: Arc<dyn PropertyRepo>,
        building_repo: Arc<dyn BuildingRepo>,
    ) -> Self {
        Self {
            assignment_repo,
            client_repo,
            property_repo,
            building_repo,
        }
    }

    /// Returns `(link, created)`: `created` is false when the pair was
    /// already linked, in which case nothing is written.
    pub async fn assign(
        &self,
        client_id: i32,
        property_id: i32,
    ) -> Result<(ClientProperty, bool), AppError> {
        self.client_repo
            .find_by_id(client_id)
            .await?
            .ok_or(AppError::NotFound("Client"))?;
        self.property_repo
            .find_by_id(property_id)
            .await?
            .ok_or(AppError::NotFound("Property"))?;

        if let Some(existing) = self.assignment_repo.find(client_id, property_id).await? {
            return Ok((existing, false));
        }

        let link = self.assignment_repo.insert(client_id, property_id).await?;
        tracing::info!(client_id, property_id, "property assigned");
        Ok((link, true))
    }

    pub async fn unassign(&self, client_id: i32, property_id: i32) -> Result<(), AppError> {
        let deleted = self.assignment_repo.delete(client_id, property_id).await?;
        if !deleted {
            return Err(AppError::NotFound("Assignment"));
        }
        Ok(())
    }

    pub async fn update_annotation(
        &self,
        client_id: i32,
        property_id: i32,
        payload: UpdateAnnotationPayload,
    ) -> Result<ClientProperty, AppError> {
        if payload.comment.is_missing() && payload.is_active.is_missing() {
            return Err(AppError::BadRequest(
                "At least one of 'comment' or 'is_active' is required".to_string(),
            ));
        }
        if matches!(payload.is_active, Patch::Null) {
            return Err(AppError::BadRequest(
                "Invalid value for is_active".to_string(),
            ));
        }

        let mut link = self
            .assignment_repo
            .find(client_id, property_id)
            .await?
            .ok_or(AppError::NotFound("Assignment"))?;

        payload.comment.apply(&mut link.comment);
        payload.is_active.apply_required(&mut link.is_active);

        self.assignment_repo.update(&link).await?;
        Ok(link)
    }

    /// Assignment views for a client, in creation order.
    pub async fn views_for_client(
        &self,
        client_id: i32,
    ) -> Result<Vec<AssignmentView>, AppError> {
        let links = self.assignment_repo.list_for_client(client_id).await?;
        let mut views = Vec::with_capacity(links.len());
        for link in &links {
            let Some(property) = self.property_repo.find_by_id(link.property_id).await? else {
                continue;
            };
            let building_name = self
                .building_repo
                .find_by_id(property.building_id)
                .await?
                .map(|b| b.name);
            views.push(AssignmentView::new(link, &property, building_name));
        }
        Ok(views)
    }
}
