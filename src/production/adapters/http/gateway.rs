//! HTTP adapter speaking the backend's REST contract.
//!
//! Endpoint shapes follow the workshop backend: task mutation via
//! `PATCH /api/production-tasks/{id}/`, rejection filing via
//! `POST /api/rejection-history/`, defect resolution via the record's
//! `mark_defect_fixed` action, and artist reassignment via the task's
//! `reassign_artist` action. A bearer token, when configured, is attached
//! to every request.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};

use super::config::{ConfigError, HttpGatewayConfig};
use super::models::{
    ArtistWire, DecodeError, NewRejectionWire, ReassignWire, RejectionListWire, RejectionWire,
    TaskPatchWire, TaskWire,
};
use crate::production::{
    domain::{ArtistId, ProductionTask, RejectionId, RejectionRecord, TaskId},
    ports::{
        ArtistDirectory, ArtistProfile, GatewayError, GatewayResult, NewRejectionRecord,
        TaskGateway, TaskPatch,
    },
};

/// Task gateway backed by the workshop's REST backend.
#[derive(Debug, Clone)]
pub struct HttpTaskGateway {
    client: reqwest::Client,
    config: HttpGatewayConfig,
}

impl HttpTaskGateway {
    /// Creates a gateway from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Client`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: HttpGatewayConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ConfigError::Client(err.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> GatewayResult<Response> {
        self.authorize(request)
            .send()
            .await
            .map_err(GatewayError::transport)
    }
}

fn invalid(err: DecodeError) -> GatewayError {
    GatewayError::InvalidPayload(err.to_string())
}

async fn reject(response: Response) -> GatewayError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    GatewayError::Rejected { status, message }
}

async fn decode_task(response: Response) -> GatewayResult<ProductionTask> {
    let wire: TaskWire = response
        .json()
        .await
        .map_err(|err| GatewayError::InvalidPayload(err.to_string()))?;
    wire.into_domain().map_err(invalid)
}

async fn decode_rejection(response: Response) -> GatewayResult<RejectionRecord> {
    let wire: RejectionWire = response
        .json()
        .await
        .map_err(|err| GatewayError::InvalidPayload(err.to_string()))?;
    wire.into_domain().map_err(invalid)
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    async fn fetch_task(&self, id: TaskId) -> GatewayResult<ProductionTask> {
        let url = self.endpoint(&format!("/api/production-tasks/{id}/"));
        let response = self.send(self.client.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::TaskNotFound(id));
        }
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        decode_task(response).await
    }

    async fn patch_task(&self, id: TaskId, patch: &TaskPatch) -> GatewayResult<ProductionTask> {
        let url = self.endpoint(&format!("/api/production-tasks/{id}/"));
        let body = TaskPatchWire::from(patch);
        let response = self.send(self.client.patch(url).json(&body)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::TaskNotFound(id));
        }
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        decode_task(response).await
    }

    async fn create_rejection_record(
        &self,
        request: &NewRejectionRecord,
    ) -> GatewayResult<RejectionRecord> {
        let url = self.endpoint("/api/rejection-history/");
        let body = NewRejectionWire::from(request);
        let response = self.send(self.client.post(url).json(&body)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::TaskNotFound(request.task_ref));
        }
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        decode_rejection(response).await
    }

    async fn mark_rejection_fixed(&self, id: RejectionId) -> GatewayResult<RejectionRecord> {
        let url = self.endpoint(&format!("/api/rejection-history/{id}/mark_defect_fixed/"));
        let response = self.send(self.client.post(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::RecordNotFound(id));
        }
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        decode_rejection(response).await
    }

    async fn reassign_artist(
        &self,
        id: TaskId,
        new_artist: ArtistId,
    ) -> GatewayResult<ProductionTask> {
        let url = self.endpoint(&format!("/api/production-tasks/{id}/reassign_artist/"));
        let body = ReassignWire::new(new_artist);
        let response = self.send(self.client.post(url).json(&body)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::TaskNotFound(id));
        }
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        decode_task(response).await
    }

    async fn list_open_rejections(&self, task: TaskId) -> GatewayResult<Vec<RejectionRecord>> {
        let url = self.endpoint("/api/rejection-history/");
        let response = self
            .send(
                self.client
                    .get(url)
                    .query(&[("production_task", task.value())]),
            )
            .await?;
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        let wire: RejectionListWire = response
            .json()
            .await
            .map_err(|err| GatewayError::InvalidPayload(err.to_string()))?;
        let records = wire.into_domain().map_err(invalid)?;
        // The endpoint already filters to pending records; scope to the
        // task here in case the backend ignores the query parameter.
        Ok(records
            .into_iter()
            .filter(|record| record.task_ref() == task)
            .collect())
    }
}

#[async_trait]
impl ArtistDirectory for HttpTaskGateway {
    async fn find_artist(&self, id: ArtistId) -> GatewayResult<Option<ArtistProfile>> {
        let url = self.endpoint(&format!("/api/auth/artists/{id}/"));
        let response = self.send(self.client.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        let wire: ArtistWire = response
            .json()
            .await
            .map_err(|err| GatewayError::InvalidPayload(err.to_string()))?;
        Ok(Some(wire.into_domain().map_err(invalid)?))
    }
}
