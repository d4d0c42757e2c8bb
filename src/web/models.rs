// API request and response bodies for the stylist endpoints,
// using Serde for JSON serialization and deserialization.
// Field names follow the wire format clients expect (camelCase, `_id`).

use crate::models::WardrobeItem;
use crate::stylist::prompt::OutfitPreferences;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wardrobe item as rendered to clients, image inlined as a data URL.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeItemResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub image_url: String,
    pub category: String,
    pub upload_date: DateTime<Utc>,
    pub file_name: Option<String>,
}

impl From<&WardrobeItem> for WardrobeItemResponse {
    fn from(item: &WardrobeItem) -> Self {
        Self {
            id: item.id.to_hex(),
            image_url: item.data_url(),
            category: item.category.clone(),
            upload_date: item.upload_date,
            file_name: item.file_name.clone(),
        }
    }
}

/// Summary of a freshly created item, echoed by the upload endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UploadedItemSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub category: String,
    pub upload_date: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UploadResponse {
    pub message: String,
    pub item: UploadedItemSummary,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeleteResponse {
    pub message: String,
}

/// Request body for outfit generation.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateOutfitRequest {
    pub user_id: String,
    pub preferences: OutfitPreferences,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OutfitResponse {
    pub description: String,
    pub image_url: String,
    pub preferences: OutfitPreferences,
    pub provider: String,
    pub model: String,
}

/// Request body for moodboard generation. All fields are free text and
/// default to empty when omitted.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct MoodboardRequest {
    pub theme: String,
    pub colors: String,
    pub style: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MoodboardResponse {
    pub description: String,
    pub image_url: String,
    pub theme: String,
    pub style: String,
    pub provider: String,
    pub model: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub provider: String,
    pub model: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TestGenerationResponse {
    pub success: bool,
    pub message: String,
    pub image_url: String,
    pub provider: String,
    pub model: String,
}
