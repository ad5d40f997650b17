//! # Photo Store
//!
//! Append-only collection of uploaded photos, read newest first.

use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::likes::LikeLedger;
use crate::models::{FeedItemId, Photo, PhotoId};

/// A stored upload. Like-state is kept in the [`LikeLedger`].
#[derive(Debug, Clone)]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub uploader: String,
    pub caption: String,
    pub image: Bytes,
    pub media_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub group: Option<String>,
}

impl PhotoRecord {
    /// Builds the reader-facing view with likes read from `likes`.
    pub fn view(&self, likes: &LikeLedger) -> Photo {
        let key = FeedItemId::Photo(self.id);
        let liked_by = likes.likers(&key);
        Photo {
            id: self.id,
            uploader: self.uploader.clone(),
            caption: self.caption.clone(),
            image: self.image.clone(),
            media_type: self.media_type.clone(),
            created_at: self.created_at,
            likes: liked_by.len(),
            liked_by,
            group: self.group.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PhotoStore {
    /// Insertion order; newest is last.
    records: Vec<PhotoRecord>,
    index: HashMap<PhotoId, usize>,
}

impl PhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: PhotoRecord) {
        self.index.insert(record.id, self.records.len());
        self.records.push(record);
    }

    pub fn get(&self, id: &PhotoId) -> Option<&PhotoRecord> {
        self.index.get(id).and_then(|&pos| self.records.get(pos))
    }

    pub fn contains(&self, id: &PhotoId) -> bool {
        self.index.contains_key(id)
    }

    /// Most recent upload first.
    pub fn iter(&self) -> impl Iterator<Item = &PhotoRecord> {
        self.records.iter().rev()
    }
}
