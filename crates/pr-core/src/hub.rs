//! # SocialHub
//!
//! The application-state object for the social feed. It owns the photo
//! store, group registry, feed and like ledger, and is the only way to
//! mutate them, so the cross-collection invariants hold after every call:
//!
//! * a photo's feed item and the photo share one like-set;
//! * a photo id is in `Group.photos` iff the photo's `group` names it.
//!
//! All methods are synchronous. A host serving several workers wraps the
//! hub in a single lock.

use std::collections::BTreeSet;

use bytes::Bytes;
use log::{debug, info, warn};

use crate::error::Result;
use crate::feed::{ArticleRecord, Feed, FeedAggregator, FeedQuery};
use crate::groups::GroupRegistry;
use crate::leaderboard;
use crate::likes::LikeLedger;
use crate::models::{FeedItem, FeedItemId, Group, LeaderboardEntry, Photo, PhotoId};
use crate::photos::{PhotoRecord, PhotoStore};
use crate::traits::{Clock, SystemClock};

/// An upload as received from the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct NewPhoto {
    pub caption: String,
    pub image: Bytes,
    pub media_type: Option<String>,
    pub group: Option<String>,
}

pub struct SocialHub {
    photos: PhotoStore,
    groups: GroupRegistry,
    feed: FeedAggregator,
    likes: LikeLedger,
    clock: Box<dyn Clock>,
}

impl Default for SocialHub {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialHub {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            photos: PhotoStore::new(),
            groups: GroupRegistry::new(),
            feed: FeedAggregator::new(),
            likes: LikeLedger::new(),
            clock,
        }
    }

    // Photo Operations

    /// Stores a photo and publishes its feed item.
    ///
    /// A `group` that does not resolve is dropped; the photo is still stored.
    pub fn add_photo(&mut self, uploader: &str, upload: NewPhoto) -> PhotoId {
        let group = match upload.group.as_deref().map(str::trim) {
            Some(name) if self.groups.contains(name) => Some(name.to_string()),
            Some(name) if !name.is_empty() => {
                warn!("photo upload by {uploader} names unknown group {name:?}; posting without group");
                None
            }
            _ => None,
        };

        let record = PhotoRecord {
            id: PhotoId::new(),
            uploader: uploader.to_string(),
            caption: upload.caption,
            image: upload.image,
            media_type: upload.media_type,
            created_at: self.clock.now(),
            group,
        };
        let id = record.id;

        if let Some(name) = &record.group {
            self.groups.attach_photo(name, id);
        }
        let feed_id = self.feed.publish_photo(&record);
        self.photos.insert(record);

        info!("photo {id} uploaded by {uploader} (feed item {feed_id})");
        id
    }

    /// Same like-set as [`SocialHub::like_feed_item`] on the photo's feed item.
    pub fn like_photo(&mut self, id: PhotoId, liker: &str) -> bool {
        if !self.photos.contains(&id) {
            return false;
        }
        self.record_like(FeedItemId::Photo(id), liker)
    }

    pub fn photo(&self, id: PhotoId) -> Option<Photo> {
        self.photos.get(&id).map(|record| record.view(&self.likes))
    }

    /// Newest first.
    pub fn photos(&self) -> impl Iterator<Item = Photo> + '_ {
        self.photos.iter().map(|record| record.view(&self.likes))
    }

    // Group Operations

    pub fn create_group(&mut self, name: &str, creator: &str) -> bool {
        let created = self.groups.create(name, creator, self.clock.now());
        if created {
            info!("group {:?} created by {creator}", name.trim());
        } else {
            debug!("group creation refused for {name:?}");
        }
        created
    }

    pub fn join_group(&mut self, name: &str, identity: &str) -> bool {
        self.groups.join(name, identity)
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Creation order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn groups_by_membership(&self, identity: &str) -> BTreeSet<String> {
        self.groups.by_member(identity)
    }

    // Feed Operations

    pub fn publish_article(
        &mut self,
        title: &str,
        body: &str,
        author: &str,
        tags: Vec<String>,
    ) -> Result<FeedItemId> {
        let article = ArticleRecord::new(title, body, author, tags, self.clock.now())?;
        let id = self.feed.publish_article(article);
        info!("article {id} published by {author}");
        Ok(id)
    }

    /// At most once per identity. Unknown ids and repeat likes return `false`.
    pub fn like_feed_item(&mut self, id: FeedItemId, liker: &str) -> bool {
        if !self.feed.contains(&id) {
            return false;
        }
        self.record_like(id, liker)
    }

    pub fn feed_item(&self, id: FeedItemId) -> Option<FeedItem> {
        self.feed.get(&id, &self.photos, &self.likes)
    }

    pub fn query_feed(&self, query: &FeedQuery) -> Feed<'_> {
        self.feed.query(query, &self.photos, &self.likes)
    }

    pub fn compute_leaderboard(&self) -> Vec<LeaderboardEntry> {
        leaderboard::compute_leaderboard(&self.groups, &self.photos, &self.likes)
    }

    fn record_like(&mut self, id: FeedItemId, liker: &str) -> bool {
        let liked = self.likes.like(id, liker);
        if liked {
            debug!("{liker} liked {id}");
        }
        liked
    }
}
