// Typed HTTP client for the stylist API, plus the `WardrobeView` snapshot
// that mirrors how the frontend consumes it: one call per action, list and
// stats re-fetched after every mutation, server state authoritative.

use crate::models::WardrobeStats;
use crate::web::models::{
    DeleteResponse, GenerateOutfitRequest, HealthResponse, MoodboardRequest, MoodboardResponse,
    OutfitResponse, TestGenerationResponse, UploadResponse, WardrobeItemResponse,
};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

/// One method per API endpoint. No caching, no retry; every call is a fresh
/// round trip.
#[derive(Clone)]
pub struct StylistClient {
    client: reqwest::Client,
    base_url: String,
}

impl StylistClient {
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .client
            .get(self.url("/api/health"))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn test_generation(&self) -> Result<TestGenerationResponse, ClientError> {
        let response = self
            .client
            .get(self.url("/api/test-generation"))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn stats(&self, owner_id: &str) -> Result<WardrobeStats, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/wardrobe/stats/{owner_id}")))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn get_item(&self, id: &str) -> Result<WardrobeItemResponse, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/wardrobe/item/{id}")))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn list_wardrobe(
        &self,
        owner_id: &str,
    ) -> Result<Vec<WardrobeItemResponse>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/wardrobe/{owner_id}")))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn upload_item(
        &self,
        owner_id: &str,
        category: &str,
        file_name: &str,
        mime_type: &str,
        image_bytes: Vec<u8>,
    ) -> Result<UploadResponse, ClientError> {
        let part = Part::bytes(image_bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;
        let form = Form::new()
            .text("userId", owner_id.to_string())
            .text("category", category.to_string())
            .part("image", part);

        let response = self
            .client
            .post(self.url("/api/wardrobe/upload"))
            .multipart(form)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn delete_item(&self, id: &str) -> Result<DeleteResponse, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/wardrobe/{id}")))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn generate_outfit(
        &self,
        request: &GenerateOutfitRequest,
    ) -> Result<OutfitResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/api/stylist/generate-outfit"))
            .json(request)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn generate_moodboard(
        &self,
        request: &MoodboardRequest,
    ) -> Result<MoodboardResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/api/stylist/generate-moodboard"))
            .json(request)
            .send()
            .await?;
        Self::parse(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn parse<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Error bodies carry `{"error": {"status, "message"}}`; fall back to
        // the bare status when the body is not that shape.
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| {
                body["error"]["message"]
                    .as_str()
                    .map(str::to_string)
            })
            .unwrap_or_else(|| status.to_string());

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Per-owner snapshot of the wardrobe as a frontend would hold it.
///
/// Mutating calls re-fetch both the item list and the stats before
/// returning, so the snapshot is always what the server last said. Failures
/// land in `last_error` the way the UI surfaces them, without clearing the
/// previously fetched state.
pub struct WardrobeView {
    client: StylistClient,
    owner_id: String,
    pub items: Vec<WardrobeItemResponse>,
    pub stats: WardrobeStats,
    pub last_error: Option<String>,
}

impl WardrobeView {
    pub fn new(client: StylistClient, owner_id: impl Into<String>) -> Self {
        Self {
            client,
            owner_id: owner_id.into(),
            items: Vec::new(),
            stats: WardrobeStats::default(),
            last_error: None,
        }
    }

    /// Re-fetches the owner's items and stats from the server.
    pub async fn refresh(&mut self) {
        match self.client.list_wardrobe(&self.owner_id).await {
            Ok(items) => {
                self.items = items;
                self.last_error = None;
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                return;
            }
        }
        match self.client.stats(&self.owner_id).await {
            Ok(stats) => self.stats = stats,
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }

    pub async fn upload(
        &mut self,
        category: &str,
        file_name: &str,
        mime_type: &str,
        image_bytes: Vec<u8>,
    ) {
        match self
            .client
            .upload_item(&self.owner_id, category, file_name, mime_type, image_bytes)
            .await
        {
            Ok(_) => self.refresh().await,
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }

    pub async fn delete(&mut self, id: &str) {
        match self.client.delete_item(id).await {
            Ok(_) => self.refresh().await,
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::MemoryWardrobeStore;
    use crate::stylist::generator::ImageGenerator;
    use crate::stylist::generator::testing::{FailingImageGenerator, StaticImageGenerator};
    use crate::web::{AppState, create_app};
    use base64::prelude::{BASE64_STANDARD, Engine as _};
    use std::sync::Arc;

    async fn spawn_server(generator: Arc<dyn ImageGenerator>) -> StylistClient {
        let state = AppState {
            store: Arc::new(MemoryWardrobeStore::default()),
            generator,
        };
        let app = create_app(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        StylistClient::new(format!("http://{addr}")).unwrap()
    }

    async fn spawn_default_server() -> StylistClient {
        spawn_server(Arc::new(StaticImageGenerator::png(b"generated"))).await
    }

    #[tokio::test]
    async fn test_health_round_trip() {
        let client = spawn_default_server().await;
        let health = client.health().await.unwrap();
        assert_eq!(health.status, "ok");
    }

    #[tokio::test]
    async fn test_upload_list_delete_scenario() {
        let client = spawn_default_server().await;
        let image = b"image-a-bytes".to_vec();

        let uploaded = client
            .upload_item("u1", "tops", "shirt.png", "image/png", image.clone())
            .await
            .unwrap();
        assert_eq!(uploaded.item.category, "tops");

        let items = client.list_wardrobe("u1").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "tops");
        let payload = items[0]
            .image_url
            .strip_prefix("data:image/png;base64,")
            .unwrap();
        assert_eq!(BASE64_STANDARD.decode(payload).unwrap(), image);

        client.delete_item(&uploaded.item.id).await.unwrap();

        assert!(client.list_wardrobe("u1").await.unwrap().is_empty());
        let stats = client.stats("u1").await.unwrap();
        assert_eq!(stats.total_items, 0);
        assert!(stats.categories.is_empty());
    }

    #[tokio::test]
    async fn test_api_error_carries_status_and_message() {
        let client = spawn_default_server().await;
        let err = client.get_item("not-an-object-id").await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("not-an-object-id"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_generation_failure_surfaces_as_500() {
        let client = spawn_server(Arc::new(FailingImageGenerator)).await;
        let err = client
            .generate_moodboard(&MoodboardRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_view_refetches_after_mutations() {
        let client = spawn_default_server().await;
        let mut view = WardrobeView::new(client.clone(), "u1");

        view.upload("tops", "shirt.png", "image/png", b"bytes".to_vec())
            .await;
        assert!(view.last_error.is_none());
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.stats.total_items, 1);

        let id = view.items[0].id.clone();
        view.delete(&id).await;
        assert!(view.last_error.is_none());
        assert!(view.items.is_empty());
        assert_eq!(view.stats.total_items, 0);
    }

    #[tokio::test]
    async fn test_view_records_error_and_keeps_state() {
        let client = spawn_default_server().await;
        let mut view = WardrobeView::new(client, "u1");

        view.upload("tops", "shirt.png", "image/png", b"bytes".to_vec())
            .await;
        assert_eq!(view.items.len(), 1);

        // Deleting an unknown id fails server-side; the snapshot keeps the
        // last fetched state and records the error.
        view.delete(&bson::oid::ObjectId::new().to_hex()).await;
        assert!(view.last_error.is_some());
        assert_eq!(view.items.len(), 1);
    }
}
