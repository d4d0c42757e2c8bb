// API handlers for the web server

use super::{
    AppState,
    error::ApiError,
    extract_upload::extract_upload,
    models::{
        DeleteResponse, GenerateOutfitRequest, HealthResponse, MoodboardRequest,
        MoodboardResponse, OutfitResponse, TestGenerationResponse, UploadResponse,
        UploadedItemSummary, WardrobeItemResponse,
    },
};
use crate::models::{WardrobeItem, WardrobeStats};
use crate::stylist::generator::{MODEL, PROVIDER};
use crate::stylist::prompt::{moodboard_prompt, outfit_prompt};
use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use bson::oid::ObjectId;
use tracing::{info, warn};
use uuid::Uuid;

const TEST_PROMPT: &str =
    "a simple fashion outfit illustration, clean white background, professional";

// --- GET /api/health ---
// Static status payload
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
        provider: PROVIDER.to_string(),
        model: MODEL.to_string(),
    })
}

// --- GET /api/test-generation ---
// Runs one generation with a fixed prompt to verify upstream connectivity
pub async fn test_generation(
    State(state): State<AppState>,
) -> Result<Json<TestGenerationResponse>, ApiError> {
    let image = state.generator.generate(TEST_PROMPT).await.map_err(|err| {
        warn!("Test generation failed: {}", err);
        ApiError::InternalServerError("Image generation test failed".to_string())
    })?;

    Ok(Json(TestGenerationResponse {
        success: true,
        message: "Image generation working".to_string(),
        image_url: image.data_url(),
        provider: PROVIDER.to_string(),
        model: MODEL.to_string(),
    }))
}

// --- GET /api/wardrobe/stats/{ownerId} ---
// Per-owner item counts grouped by category
pub async fn get_wardrobe_stats(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<WardrobeStats>, ApiError> {
    let stats = state.store.stats_by_owner(&owner_id).await?;
    Ok(Json(stats))
}

// --- GET /api/wardrobe/item/{id} ---
// Single item with its image inlined as a data URL
pub async fn get_wardrobe_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WardrobeItemResponse>, ApiError> {
    let id = parse_item_id(&id)?;
    let item = state.store.get(id).await?;
    Ok(Json(WardrobeItemResponse::from(&item)))
}

// --- GET /api/wardrobe/{ownerId} ---
// The owner's items, newest upload first
pub async fn list_wardrobe(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<WardrobeItemResponse>>, ApiError> {
    let items = state.store.list_by_owner(&owner_id).await?;
    info!("Retrieved {} items for owner {}", items.len(), owner_id);
    Ok(Json(items.iter().map(WardrobeItemResponse::from).collect()))
}

// --- POST /api/wardrobe/upload ---
// Multipart upload of one clothing image plus its owner and category
pub async fn upload_wardrobe_item(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = extract_upload(multipart).await?;

    let item = WardrobeItem::new(
        upload.owner_id,
        upload.category,
        &upload.image_bytes,
        upload.mime_type,
        upload.file_name,
    );
    state.store.insert(&item).await?;

    info!(
        "Image uploaded for owner {}, category: {}",
        item.owner_id, item.category
    );

    Ok(Json(UploadResponse {
        message: "Item uploaded successfully".to_string(),
        item: UploadedItemSummary {
            id: item.id.to_hex(),
            category: item.category,
            upload_date: item.upload_date,
        },
    }))
}

// --- DELETE /api/wardrobe/{id} ---
pub async fn delete_wardrobe_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_item_id(&id)?;
    state.store.delete(id).await?;

    info!("Deleted item {}", id);

    Ok(Json(DeleteResponse {
        message: "Item deleted successfully".to_string(),
    }))
}

// --- POST /api/stylist/generate-outfit ---
// Builds the outfit prompt from quiz preferences and the owner's stored
// categories, then fetches one generated image
pub async fn generate_outfit(
    State(state): State<AppState>,
    Json(payload): Json<GenerateOutfitRequest>,
) -> Result<Json<OutfitResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    let categories = state
        .store
        .categories_by_owner(&payload.user_id)
        .await
        .map_err(|err| {
            warn!(
                "Failed to load wardrobe categories: request_id={}, error={}",
                request_id, err
            );
            ApiError::InternalServerError("Failed to generate outfit".to_string())
        })?;

    let prompt = outfit_prompt(&payload.preferences, &categories);
    info!(
        "Generating outfit: request_id={}, prompt={}",
        request_id, prompt
    );

    let image = state.generator.generate(&prompt).await.map_err(|err| {
        warn!(
            "Outfit generation failed: request_id={}, error={}",
            request_id, err
        );
        ApiError::InternalServerError("Failed to generate outfit".to_string())
    })?;

    Ok(Json(OutfitResponse {
        description: format!(
            "AI-generated {} outfit for {}",
            payload.preferences.occasion, payload.preferences.season
        ),
        image_url: image.data_url(),
        preferences: payload.preferences,
        provider: PROVIDER.to_string(),
        model: MODEL.to_string(),
    }))
}

// --- POST /api/stylist/generate-moodboard ---
pub async fn generate_moodboard(
    State(state): State<AppState>,
    Json(payload): Json<MoodboardRequest>,
) -> Result<Json<MoodboardResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    let prompt = moodboard_prompt(&payload.theme, &payload.colors, &payload.style);
    info!(
        "Generating moodboard: request_id={}, prompt={}",
        request_id, prompt
    );

    let image = state.generator.generate(&prompt).await.map_err(|err| {
        warn!(
            "Moodboard generation failed: request_id={}, error={}",
            request_id, err
        );
        ApiError::InternalServerError("Failed to generate moodboard".to_string())
    })?;

    Ok(Json(MoodboardResponse {
        description: format!("AI-generated {} fashion moodboard", payload.theme),
        image_url: image.data_url(),
        theme: payload.theme,
        style: payload.style,
        provider: PROVIDER.to_string(),
        model: MODEL.to_string(),
    }))
}

fn parse_item_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid wardrobe item id '{}'", id)))
}
