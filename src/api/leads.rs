//! Leads: `GET /leads`, `PATCH /leads/{id}/status`, `DELETE /leads/{id}`

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use super::traits::{EntityClient, StatusClient};
use super::{ApiClient, ApiError};
use crate::models::{EntityId, Lead, LeadStatus};

#[derive(Serialize)]
struct StatusBody {
    status: LeadStatus,
}

#[derive(Clone)]
pub struct LeadsClient {
    api: ApiClient,
}

impl LeadsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EntityClient for LeadsClient {
    type Entity = Lead;

    fn family(&self) -> &'static str {
        "leads"
    }

    async fn list(&self) -> Result<Vec<Lead>, ApiError> {
        self.api.get_json(&["leads"]).await
    }

    async fn remove(&self, id: &EntityId) -> Result<(), ApiError> {
        self.api
            .send_ack::<()>(Method::DELETE, &["leads", id.as_str()], None)
            .await
    }
}

#[async_trait]
impl StatusClient for LeadsClient {
    type Status = LeadStatus;

    fn status_of(entity: &Lead) -> LeadStatus {
        entity.status
    }

    fn set_status(entity: &mut Lead, status: LeadStatus) {
        entity.status = status;
    }

    async fn update_status(&self, id: &EntityId, status: &LeadStatus) -> Result<(), ApiError> {
        let body = StatusBody { status: *status };
        self.api
            .send_ack(Method::PATCH, &["leads", id.as_str(), "status"], Some(&body))
            .await
    }
}
