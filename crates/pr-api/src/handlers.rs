//! # pr-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the
//! `SocialHub`. Every handler resolves the caller's display name first,
//! then takes the hub lock for exactly one core operation.

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use askama::Template;
use bytes::BytesMut;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use pr_core::error::AppError;
use pr_core::models::{FeedItem, FeedItemId, FeedKind, PhotoId};
use pr_core::traits::IdentityProvider;
use pr_core::{FeedQuery, FeedSort, NewPhoto, SocialHub};
use pr_ui::{FeedRow, FeedTemplate, LeaderboardTemplate};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::ApiResult;

/// Header carrying the display name the client wants to post under.
pub const DISPLAY_NAME_HEADER: &str = "x-display-name";

/// State shared across all Actix-web workers.
///
/// The hub sits behind one lock: the like-propagation and group invariants
/// span several of its collections.
pub struct AppState {
    pub hub: RwLock<SocialHub>,
    pub identity: Box<dyn IdentityProvider>,
    pub max_image_bytes: usize,
}

impl AppState {
    pub fn new(hub: SocialHub, identity: Box<dyn IdentityProvider>, max_image_bytes: usize) -> Self {
        Self {
            hub: RwLock::new(hub),
            identity,
            max_image_bytes,
        }
    }

    /// Resolves the caller's identity from the header or the peer address.
    pub fn viewer(&self, req: &HttpRequest) -> String {
        let requested = req
            .headers()
            .get(DISPLAY_NAME_HEADER)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok());
        let session = req
            .peer_addr()
            .map(|a| a.ip().to_string())
            .unwrap_or_default();
        self.identity.display_name(requested, &session)
    }
}

// Request / response bodies

#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    pub group: Option<String>,
    pub kind: Option<String>,
    pub sort: Option<String>,
}

impl FeedParams {
    /// Blank parameters (as submitted by the HTML filter form) mean "any".
    fn to_query(&self) -> Result<FeedQuery, AppError> {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

        let mut query = FeedQuery::default();
        if let Some(group) = present(&self.group) {
            query = query.in_group(group);
        }
        if let Some(kind) = present(&self.kind) {
            query = query.of_kind(kind.parse()?);
        }
        if let Some(sort) = present(&self.sort) {
            query = query.sorted_by(sort.parse()?);
        }
        Ok(query)
    }
}

/// JSON shape of a feed item. Photo-only and article-only fields are
/// omitted for the other kind.
#[derive(Debug, Serialize)]
pub struct FeedEntryResponse {
    pub id: FeedItemId,
    pub kind: FeedKind,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub likes: usize,
    pub liked_by: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl From<FeedItem> for FeedEntryResponse {
    fn from(item: FeedItem) -> Self {
        let id = item.id();
        match item {
            FeedItem::Photo(photo) => Self {
                id,
                kind: FeedKind::Photo,
                author: photo.uploader,
                created_at: photo.created_at,
                likes: photo.likes,
                liked_by: photo.liked_by,
                group: photo.group,
                caption: Some(photo.caption),
                image_url: Some(format!("/api/photos/{}/image", photo.id)),
                title: None,
                body: None,
                tags: Vec::new(),
            },
            FeedItem::Article(article) => Self {
                id,
                kind: FeedKind::Article,
                author: article.author,
                created_at: article.created_at,
                likes: article.likes,
                liked_by: article.liked_by,
                group: None,
                caption: None,
                image_url: None,
                title: Some(article.title),
                body: Some(article.body),
                tags: article.tags,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes: usize,
}

#[derive(Debug, Serialize)]
pub struct PhotoCreated {
    pub id: PhotoId,
    pub feed_item_id: FeedItemId,
    pub group: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewArticleRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticleCreated {
    pub id: FeedItemId,
}

#[derive(Debug, Deserialize)]
pub struct NewGroupRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub member_count: usize,
    pub photo_count: usize,
}

// Feed

/// Renders the feed page (e.g., /?group=Alpha&sort=likes)
pub async fn feed_page(
    data: web::Data<AppState>,
    req: HttpRequest,
    params: web::Query<FeedParams>,
) -> ApiResult<HttpResponse> {
    let viewer = data.viewer(&req);
    let query = params.to_query()?;

    let hub = data.hub.read().await;
    let rows: Vec<FeedRow> = hub
        .query_feed(&query)
        .iter()
        .map(|item| FeedRow::from_item(&item))
        .collect();
    let groups: Vec<String> = hub.groups().map(|g| g.name.clone()).collect();
    drop(hub);

    let sort = match query.sort {
        FeedSort::Recent => "recent",
        FeedSort::Likes => "likes",
    };
    let html = FeedTemplate {
        title: "Feed",
        viewer: &viewer,
        rows: &rows,
        groups: &groups,
        active_group: query.group.as_deref().unwrap_or_default(),
        sort,
    }
    .render()
    .map_err(|e| AppError::Internal(format!("feed template: {e}")))?;

    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

pub async fn list_feed(
    data: web::Data<AppState>,
    params: web::Query<FeedParams>,
) -> ApiResult<HttpResponse> {
    let query = params.to_query()?;
    let hub = data.hub.read().await;
    let items: Vec<FeedEntryResponse> = hub
        .query_feed(&query)
        .iter()
        .map(FeedEntryResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(items))
}

pub async fn like_feed_item(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let id: FeedItemId = raw
        .parse()
        .map_err(|_| AppError::not_found("Feed item", &raw))?;
    let viewer = data.viewer(&req);

    let mut hub = data.hub.write().await;
    if hub.feed_item(id).is_none() {
        return Err(AppError::not_found("Feed item", id).into());
    }
    let liked = hub.like_feed_item(id, &viewer);
    let likes = hub.feed_item(id).map_or(0, |item| item.likes());

    Ok(HttpResponse::Ok().json(LikeResponse { liked, likes }))
}

// Photos

/// Accepts a multipart form with `image` (required), `caption` and `group`.
pub async fn upload_photo(
    data: web::Data<AppState>,
    req: HttpRequest,
    mut payload: Multipart,
) -> ApiResult<HttpResponse> {
    let viewer = data.viewer(&req);
    let mut upload = NewPhoto::default();
    let mut saw_image = false;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::ValidationError(format!("malformed multipart body: {e}")))?
    {
        let name = field.content_disposition().get_name().unwrap_or_default().to_string();
        let media_type = field.content_type().map(|m| m.to_string());

        let mut buf = BytesMut::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::ValidationError(format!("malformed multipart body: {e}")))?
        {
            if buf.len() + chunk.len() > data.max_image_bytes {
                return Err(AppError::ValidationError(format!(
                    "field {name:?} exceeds {} bytes",
                    data.max_image_bytes
                ))
                .into());
            }
            buf.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "image" => {
                upload.image = buf.freeze();
                upload.media_type = media_type;
                saw_image = true;
            }
            "caption" => upload.caption = text_field(&name, buf)?,
            "group" => {
                let group = text_field(&name, buf)?;
                upload.group = Some(group).filter(|g| !g.trim().is_empty());
            }
            other => log::debug!("ignoring unexpected upload field {other:?}"),
        }
    }

    if !saw_image || upload.image.is_empty() {
        return Err(AppError::ValidationError("an image file is required".into()).into());
    }

    let mut hub = data.hub.write().await;
    let id = hub.add_photo(&viewer, upload);
    let group = hub.photo(id).and_then(|p| p.group);

    Ok(HttpResponse::Created().json(PhotoCreated {
        id,
        feed_item_id: FeedItemId::Photo(id),
        group,
    }))
}

fn text_field(name: &str, buf: BytesMut) -> Result<String, AppError> {
    String::from_utf8(buf.to_vec())
        .map_err(|_| AppError::ValidationError(format!("field {name:?} must be UTF-8 text")))
}

fn parse_photo_id(raw: &str) -> Result<PhotoId, AppError> {
    raw.parse().map_err(|_| AppError::not_found("Photo", raw))
}

/// Serves the raw upload back. The payload is never inspected.
pub async fn photo_image(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_photo_id(&path)?;
    let hub = data.hub.read().await;
    let photo = hub.photo(id).ok_or_else(|| AppError::not_found("Photo", id))?;

    let content_type = photo
        .media_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    Ok(HttpResponse::Ok().content_type(content_type).body(photo.image))
}

pub async fn like_photo(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_photo_id(&path)?;
    let viewer = data.viewer(&req);

    let mut hub = data.hub.write().await;
    if hub.photo(id).is_none() {
        return Err(AppError::not_found("Photo", id).into());
    }
    let liked = hub.like_photo(id, &viewer);
    let likes = hub.photo(id).map_or(0, |p| p.likes);

    Ok(HttpResponse::Ok().json(LikeResponse { liked, likes }))
}

// Articles

pub async fn publish_article(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<NewArticleRequest>,
) -> ApiResult<HttpResponse> {
    let viewer = data.viewer(&req);
    let NewArticleRequest { title, body, tags } = body.into_inner();

    let id = data
        .hub
        .write()
        .await
        .publish_article(&title, &body, &viewer, tags)?;
    Ok(HttpResponse::Created().json(ArticleCreated { id }))
}

// Groups

pub async fn create_group(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<NewGroupRequest>,
) -> ApiResult<HttpResponse> {
    let viewer = data.viewer(&req);
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::ValidationError("group name must not be empty".into()).into());
    }

    let mut hub = data.hub.write().await;
    if !hub.create_group(name, &viewer) {
        return Err(AppError::Conflict(format!("group {name:?} already exists")).into());
    }
    Ok(HttpResponse::Created().json(GroupSummary {
        name: name.to_string(),
        member_count: 1,
        photo_count: 0,
    }))
}

pub async fn join_group(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let name = path.into_inner();
    let viewer = data.viewer(&req);

    let mut hub = data.hub.write().await;
    if !hub.join_group(&name, &viewer) {
        return Err(AppError::not_found("Group", &name).into());
    }
    let summary = hub
        .group(&name)
        .map(|g| GroupSummary {
            name: g.name.clone(),
            member_count: g.members.len(),
            photo_count: g.photos.len(),
        })
        .ok_or_else(|| AppError::not_found("Group", &name))?;
    Ok(HttpResponse::Ok().json(summary))
}

pub async fn my_groups(data: web::Data<AppState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let viewer = data.viewer(&req);
    let groups = data.hub.read().await.groups_by_membership(&viewer);
    Ok(HttpResponse::Ok().json(groups))
}

// Leaderboard

pub async fn leaderboard(data: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let entries = data.hub.read().await.compute_leaderboard();
    Ok(HttpResponse::Ok().json(entries))
}

pub async fn leaderboard_page(data: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let entries = data.hub.read().await.compute_leaderboard();
    let html = LeaderboardTemplate {
        title: "Leaderboard",
        entries: &entries,
    }
    .render()
    .map_err(|e| AppError::Internal(format!("leaderboard template: {e}")))?;

    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}
