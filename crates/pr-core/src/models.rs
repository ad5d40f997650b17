//! # Domain Models
//!
//! These structs represent the entities of the Power Routine social feed.
//! We use UUID v7 for time-ordered, globally unique identification.
//!
//! `Photo` and `Article` are *views*: their `likes`/`liked_by` fields are
//! filled from the like ledger at read time and never stored on the record.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.simple())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| AppError::ValidationError(format!("malformed id: {s}")))
            }
        }
    };
}

uuid_id!(
    /// Identifies an uploaded photo.
    PhotoId
);
uuid_id!(
    /// Identifies a published article.
    ArticleId
);
uuid_id!(
    /// Identifies a competition group. Lookups go through the group name.
    GroupId
);

/// The two kinds of content the feed carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    Photo,
    Article,
}

impl FromStr for FeedKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "photo" | "photos" => Ok(FeedKind::Photo),
            "article" | "articles" => Ok(FeedKind::Article),
            other => Err(AppError::ValidationError(format!("unknown feed kind: {other}"))),
        }
    }
}

/// Namespaced feed item identifier.
///
/// Rendered as `photo-<id>` or `article-<id>`, so the two kinds can never
/// collide. It is also the key of the like ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FeedItemId {
    Photo(PhotoId),
    Article(ArticleId),
}

impl FeedItemId {
    pub fn kind(&self) -> FeedKind {
        match self {
            FeedItemId::Photo(_) => FeedKind::Photo,
            FeedItemId::Article(_) => FeedKind::Article,
        }
    }
}

impl fmt::Display for FeedItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedItemId::Photo(id) => write!(f, "photo-{id}"),
            FeedItemId::Article(id) => write!(f, "article-{id}"),
        }
    }
}

impl FromStr for FeedItemId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix("photo-") {
            return rest.parse().map(FeedItemId::Photo);
        }
        if let Some(rest) = s.strip_prefix("article-") {
            return rest.parse().map(FeedItemId::Article);
        }
        Err(AppError::ValidationError(format!("malformed feed item id: {s}")))
    }
}

impl From<FeedItemId> for String {
    fn from(id: FeedItemId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for FeedItemId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An uploaded photo, as seen by readers.
#[derive(Debug, Clone, Serialize)]
pub struct Photo {
    pub id: PhotoId,
    pub uploader: String,
    pub caption: String,
    /// Opaque payload; never decoded.
    #[serde(skip)]
    pub image: Bytes,
    pub media_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub likes: usize,
    pub liked_by: Vec<String>,
    pub group: Option<String>,
}

/// A text post with markdown body.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub id: ArticleId,
    pub author: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub likes: usize,
    pub liked_by: Vec<String>,
}

/// A unit of content in the aggregated timeline.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedItem {
    Photo(Photo),
    Article(Article),
}

impl FeedItem {
    pub fn id(&self) -> FeedItemId {
        match self {
            FeedItem::Photo(p) => FeedItemId::Photo(p.id),
            FeedItem::Article(a) => FeedItemId::Article(a.id),
        }
    }

    pub fn kind(&self) -> FeedKind {
        self.id().kind()
    }

    pub fn author(&self) -> &str {
        match self {
            FeedItem::Photo(p) => &p.uploader,
            FeedItem::Article(a) => &a.author,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            FeedItem::Photo(p) => p.created_at,
            FeedItem::Article(a) => a.created_at,
        }
    }

    pub fn likes(&self) -> usize {
        match self {
            FeedItem::Photo(p) => p.likes,
            FeedItem::Article(a) => a.likes,
        }
    }

    pub fn liked_by(&self) -> &[String] {
        match self {
            FeedItem::Photo(p) => &p.liked_by,
            FeedItem::Article(a) => &a.liked_by,
        }
    }

    /// Articles have no group concept.
    pub fn group(&self) -> Option<&str> {
        match self {
            FeedItem::Photo(p) => p.group.as_deref(),
            FeedItem::Article(_) => None,
        }
    }
}

/// A named competition team.
#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub id: GroupId,
    /// Unique key within the registry
    pub name: String,
    pub members: BTreeSet<String>,
    /// Newest first
    pub photos: VecDeque<PhotoId>,
    pub created_at: DateTime<Utc>,
}

/// One row of the group ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub group_name: String,
    pub total_likes: usize,
    pub member_count: usize,
    pub photo_count: usize,
}
