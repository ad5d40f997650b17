//! # Feed Aggregator
//!
//! Unified timeline of photo and article posts.
//!
//! Photo entries only hold the photo id; everything else, including the
//! like-set, is read through from the [`PhotoStore`] and [`LikeLedger`]
//! when the feed is iterated.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::likes::LikeLedger;
use crate::models::{Article, ArticleId, FeedItem, FeedItemId, FeedKind, PhotoId};
use crate::photos::{PhotoRecord, PhotoStore};

/// A stored article. Like-state is kept in the [`LikeLedger`].
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    pub id: ArticleId,
    pub author: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ArticleRecord {
    /// Validates and normalizes a new article.
    ///
    /// Title and body must contain non-whitespace text. Tags are trimmed,
    /// blank tags dropped and duplicates collapsed (first spelling wins).
    pub fn new(
        title: &str,
        body: &str,
        author: &str,
        tags: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::ValidationError("article title must not be empty".into()));
        }
        if body.trim().is_empty() {
            return Err(AppError::ValidationError("article body must not be empty".into()));
        }

        let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = tag.trim();
            if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
                normalized.push(tag.to_string());
            }
        }

        Ok(Self {
            id: ArticleId::new(),
            author: author.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            tags: normalized,
            created_at: now,
        })
    }

    pub fn view(&self, likes: &LikeLedger) -> Article {
        let liked_by = likes.likers(&FeedItemId::Article(self.id));
        Article {
            id: self.id,
            author: self.author.clone(),
            title: self.title.clone(),
            body: self.body.clone(),
            tags: self.tags.clone(),
            created_at: self.created_at,
            likes: liked_by.len(),
            liked_by,
        }
    }
}

#[derive(Debug, Clone)]
enum FeedEntry {
    Photo {
        id: PhotoId,
        created_at: DateTime<Utc>,
    },
    Article(ArticleRecord),
}

impl FeedEntry {
    fn id(&self) -> FeedItemId {
        match self {
            FeedEntry::Photo { id, .. } => FeedItemId::Photo(*id),
            FeedEntry::Article(article) => FeedItemId::Article(article.id),
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        match self {
            FeedEntry::Photo { created_at, .. } => *created_at,
            FeedEntry::Article(article) => article.created_at,
        }
    }

    fn resolve(&self, photos: &PhotoStore, likes: &LikeLedger) -> Option<FeedItem> {
        match self {
            FeedEntry::Photo { id, .. } => photos.get(id).map(|p| FeedItem::Photo(p.view(likes))),
            FeedEntry::Article(article) => Some(FeedItem::Article(article.view(likes))),
        }
    }
}

/// Feed ordering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSort {
    /// Newest `created_at` first
    #[default]
    Recent,
    /// Most liked first; equal counts keep the `Recent` order
    Likes,
}

impl FromStr for FeedSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" | "new" | "newest" => Ok(FeedSort::Recent),
            "likes" | "top" => Ok(FeedSort::Likes),
            other => Err(AppError::ValidationError(format!("unknown sort order: {other}"))),
        }
    }
}

/// Filters and ordering for [`FeedAggregator::query`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    /// Keeps only photos posted to this group; articles never match.
    pub group: Option<String>,
    pub kind: Option<FeedKind>,
    pub sort: FeedSort,
}

impl FeedQuery {
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn of_kind(mut self, kind: FeedKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn sorted_by(mut self, sort: FeedSort) -> Self {
        self.sort = sort;
        self
    }
}

#[derive(Debug, Default)]
pub struct FeedAggregator {
    /// Insertion order; newest is last.
    entries: Vec<FeedEntry>,
    index: HashMap<FeedItemId, usize>,
}

impl FeedAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a freshly stored photo as a feed entry.
    pub fn publish_photo(&mut self, photo: &PhotoRecord) -> FeedItemId {
        self.push(FeedEntry::Photo {
            id: photo.id,
            created_at: photo.created_at,
        })
    }

    pub fn publish_article(&mut self, article: ArticleRecord) -> FeedItemId {
        self.push(FeedEntry::Article(article))
    }

    fn push(&mut self, entry: FeedEntry) -> FeedItemId {
        let id = entry.id();
        self.index.insert(id, self.entries.len());
        self.entries.push(entry);
        id
    }

    pub fn contains(&self, id: &FeedItemId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &FeedItemId, photos: &PhotoStore, likes: &LikeLedger) -> Option<FeedItem> {
        self.index
            .get(id)
            .and_then(|&pos| self.entries.get(pos))
            .and_then(|entry| entry.resolve(photos, likes))
    }

    /// Selects and orders entries. Items are materialized lazily by
    /// [`Feed::iter`].
    pub fn query<'a>(
        &'a self,
        query: &FeedQuery,
        photos: &'a PhotoStore,
        likes: &'a LikeLedger,
    ) -> Feed<'a> {
        let mut selected: Vec<&FeedEntry> = self
            .entries
            .iter()
            .rev()
            .filter(|entry| query.kind.map_or(true, |kind| entry.id().kind() == kind))
            .filter(|entry| match (&query.group, entry) {
                (None, _) => true,
                (Some(group), FeedEntry::Photo { id, .. }) => photos
                    .get(id)
                    .and_then(|p| p.group.as_deref())
                    .is_some_and(|g| g == group.trim()),
                (Some(_), FeedEntry::Article(_)) => false,
            })
            .collect();

        // Both sorts are stable; insertion order breaks created_at ties.
        selected.sort_by_key(|entry| Reverse(entry.created_at()));
        if query.sort == FeedSort::Likes {
            selected.sort_by_key(|entry| Reverse(likes.count(&entry.id())));
        }

        Feed {
            entries: selected,
            photos,
            likes,
        }
    }
}

/// An ordered, restartable view over the feed.
pub struct Feed<'a> {
    entries: Vec<&'a FeedEntry>,
    photos: &'a PhotoStore,
    likes: &'a LikeLedger,
}

impl<'a> Feed<'a> {
    /// Each call starts again from the first item.
    pub fn iter(&self) -> impl Iterator<Item = FeedItem> + '_ {
        self.entries
            .iter()
            .filter_map(move |entry| entry.resolve(self.photos, self.likes))
    }

    pub fn ids(&self) -> Vec<FeedItemId> {
        self.entries.iter().map(|entry| entry.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_article_requires_title_and_body() {
        let now = Utc::now();
        assert!(ArticleRecord::new("  ", "body", "ana", vec![], now).is_err());
        assert!(ArticleRecord::new("Title", "\n\t", "ana", vec![], now).is_err());
        assert!(ArticleRecord::new("Title", "body", "ana", vec![], now).is_ok());
    }

    #[test]
    fn test_article_tags_are_normalized() {
        let tags = vec![" cutting ".to_string(), "".into(), "cutting".into(), "protein".into()];
        let article = ArticleRecord::new("Meal prep", "**Sunday**", "ana", tags, Utc::now()).unwrap();
        assert_eq!(article.tags, vec!["cutting", "protein"]);
        assert_eq!(article.title, "Meal prep");
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("likes".parse::<FeedSort>(), Ok(FeedSort::Likes));
        assert_eq!("Recent".parse::<FeedSort>(), Ok(FeedSort::Recent));
        assert!("oldest".parse::<FeedSort>().is_err());
    }

    #[test]
    fn test_equal_timestamps_fall_back_to_insertion_order() {
        let t = Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap();
        let mut feed = FeedAggregator::new();
        let first = feed.publish_article(ArticleRecord::new("a", "a", "ana", vec![], t).unwrap());
        let second = feed.publish_article(ArticleRecord::new("b", "b", "ana", vec![], t).unwrap());

        let photos = PhotoStore::new();
        let likes = LikeLedger::new();
        let view = feed.query(&FeedQuery::default(), &photos, &likes);
        assert_eq!(view.ids(), vec![second, first]);
    }
}
