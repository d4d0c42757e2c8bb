// Persistent data models for the wardrobe collection.

use base64::prelude::{BASE64_STANDARD, Engine as _};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single clothing item owned by a user.
///
/// The uploaded image is retained inline as base64 text next to its declared
/// MIME type; the pair is rendered back to clients as a data URL. Items are
/// immutable after creation, there is no update operation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WardrobeItem {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub owner_id: String,
    pub image_data: String,
    pub image_mime_type: String,
    pub category: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub upload_date: DateTime<Utc>,
    pub file_name: Option<String>,
}

impl WardrobeItem {
    /// Builds a new item with a server-assigned id and upload timestamp.
    pub fn new(
        owner_id: impl Into<String>,
        category: impl Into<String>,
        image_bytes: &[u8],
        image_mime_type: impl Into<String>,
        file_name: Option<String>,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            owner_id: owner_id.into(),
            image_data: BASE64_STANDARD.encode(image_bytes),
            image_mime_type: image_mime_type.into(),
            category: category.into(),
            upload_date: Utc::now(),
            file_name,
        }
    }

    /// Renders the stored image as a `data:<mime>;base64,<payload>` URL.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.image_mime_type, self.image_data)
    }
}

/// Per-owner wardrobe statistics, grouped by category.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeStats {
    pub total_items: u64,
    pub categories: BTreeMap<String, u64>,
}
