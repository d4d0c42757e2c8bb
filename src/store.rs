// Persistence layer for wardrobe items, backed by MongoDB.
// Handlers talk to the `WardrobeStore` trait so tests can swap in an
// in-memory implementation.

use crate::models::{WardrobeItem, WardrobeStats};
use async_trait::async_trait;
use bson::{Bson, doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::{Collection, Database, IndexModel};
use thiserror::Error;

pub const COLLECTION_NAME: &str = "wardrobe_items";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("wardrobe item not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Storage contract for wardrobe items.
///
/// Every method is a single round trip to the backing store.
#[async_trait]
pub trait WardrobeStore: Send + Sync {
    async fn insert(&self, item: &WardrobeItem) -> Result<(), StoreError>;

    async fn get(&self, id: ObjectId) -> Result<WardrobeItem, StoreError>;

    /// Lists an owner's items, newest upload first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<WardrobeItem>, StoreError>;

    async fn delete(&self, id: ObjectId) -> Result<(), StoreError>;

    /// Counts an owner's items grouped by category, without loading image
    /// payloads.
    async fn stats_by_owner(&self, owner_id: &str) -> Result<WardrobeStats, StoreError>;

    /// Distinct category labels an owner has uploaded, sorted.
    async fn categories_by_owner(&self, owner_id: &str) -> Result<Vec<String>, StoreError>;
}

#[derive(Clone)]
pub struct MongoWardrobeStore {
    collection: Collection<WardrobeItem>,
}

impl MongoWardrobeStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION_NAME),
        }
    }

    /// Creates the owner lookup index. The driver connects lazily, so this is
    /// also the first operation that actually reaches the database.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder().keys(doc! { "owner_id": 1 }).build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl WardrobeStore for MongoWardrobeStore {
    async fn insert(&self, item: &WardrobeItem) -> Result<(), StoreError> {
        self.collection.insert_one(item).await?;
        Ok(())
    }

    async fn get(&self, id: ObjectId) -> Result<WardrobeItem, StoreError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<WardrobeItem>, StoreError> {
        // `_id` breaks ties for uploads landing in the same millisecond;
        // ObjectIds are time-prefixed, so this keeps insertion order.
        let items = self
            .collection
            .find(doc! { "owner_id": owner_id })
            .sort(doc! { "upload_date": -1, "_id": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(items)
    }

    async fn delete(&self, id: ObjectId) -> Result<(), StoreError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn stats_by_owner(&self, owner_id: &str) -> Result<WardrobeStats, StoreError> {
        // Group server-side so image payloads never leave the database.
        let pipeline = vec![
            doc! { "$match": { "owner_id": owner_id } },
            doc! { "$group": { "_id": "$category", "count": { "$sum": 1 } } },
        ];
        let groups: Vec<bson::Document> = self
            .collection
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;

        let mut stats = WardrobeStats::default();
        for group in groups {
            let category = group.get_str("_id").unwrap_or_default().to_string();
            let count = match group.get("count") {
                Some(Bson::Int32(n)) => *n as u64,
                Some(Bson::Int64(n)) => *n as u64,
                _ => 0,
            };
            stats.total_items += count;
            stats.categories.insert(category, count);
        }
        Ok(stats)
    }

    async fn categories_by_owner(&self, owner_id: &str) -> Result<Vec<String>, StoreError> {
        let values = self
            .collection
            .distinct("category", doc! { "owner_id": owner_id })
            .await?;
        let mut categories: Vec<String> = values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(category) => Some(category),
                _ => None,
            })
            .collect();
        categories.sort();
        Ok(categories)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// In-memory store mirroring the MongoDB implementation's contract.
    #[derive(Default)]
    pub struct MemoryWardrobeStore {
        items: Mutex<Vec<WardrobeItem>>,
    }

    impl MemoryWardrobeStore {
        pub fn len(&self) -> usize {
            self.items.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl WardrobeStore for MemoryWardrobeStore {
        async fn insert(&self, item: &WardrobeItem) -> Result<(), StoreError> {
            self.items.lock().unwrap().push(item.clone());
            Ok(())
        }

        async fn get(&self, id: ObjectId) -> Result<WardrobeItem, StoreError> {
            self.items
                .lock()
                .unwrap()
                .iter()
                .find(|item| item.id == id)
                .cloned()
                .ok_or(StoreError::NotFound)
        }

        async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<WardrobeItem>, StoreError> {
            let mut items: Vec<WardrobeItem> = self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|item| item.owner_id == owner_id)
                .cloned()
                .collect();
            items.sort_by(|a, b| {
                b.upload_date
                    .cmp(&a.upload_date)
                    .then_with(|| b.id.cmp(&a.id))
            });
            Ok(items)
        }

        async fn delete(&self, id: ObjectId) -> Result<(), StoreError> {
            let mut items = self.items.lock().unwrap();
            let before = items.len();
            items.retain(|item| item.id != id);
            if items.len() == before {
                return Err(StoreError::NotFound);
            }
            Ok(())
        }

        async fn stats_by_owner(&self, owner_id: &str) -> Result<WardrobeStats, StoreError> {
            let mut stats = WardrobeStats::default();
            for item in self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|item| item.owner_id == owner_id)
            {
                stats.total_items += 1;
                *stats.categories.entry(item.category.clone()).or_insert(0) += 1;
            }
            Ok(stats)
        }

        async fn categories_by_owner(&self, owner_id: &str) -> Result<Vec<String>, StoreError> {
            let mut categories: Vec<String> = self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|item| item.owner_id == owner_id)
                .map(|item| item.category.clone())
                .collect();
            categories.sort();
            categories.dedup();
            Ok(categories)
        }
    }
}
