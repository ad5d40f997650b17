//! # pr-ui
//!
//! Askama templates for the server-rendered feed and leaderboard pages.

use askama::Template;
use pr_core::models::{FeedItem, LeaderboardEntry};

/// One feed entry, flattened for the template.
pub struct FeedRow {
    pub id: String,
    pub is_photo: bool,
    pub author: String,
    pub headline: String,
    pub body_html: String,
    pub tags: String,
    pub group: String,
    pub likes: usize,
    pub created: String,
    pub image_url: String,
}

impl FeedRow {
    pub fn from_item(item: &FeedItem) -> Self {
        let created = item.created_at().format("%Y-%m-%d %H:%M").to_string();
        match item {
            FeedItem::Photo(photo) => FeedRow {
                id: item.id().to_string(),
                is_photo: true,
                author: photo.uploader.clone(),
                headline: photo.caption.clone(),
                body_html: String::new(),
                tags: String::new(),
                group: photo.group.clone().unwrap_or_default(),
                likes: photo.likes,
                created,
                image_url: format!("/api/photos/{}/image", photo.id),
            },
            FeedItem::Article(article) => FeedRow {
                id: item.id().to_string(),
                is_photo: false,
                author: article.author.clone(),
                headline: article.title.clone(),
                body_html: render_body(&article.body),
                tags: article.tags.join(", "),
                group: String::new(),
                likes: article.likes,
                created,
                image_url: String::new(),
            },
        }
    }
}

#[derive(Template)]
#[template(path = "feed.html")]
pub struct FeedTemplate<'a> {
    pub title: &'a str,
    pub viewer: &'a str,
    pub rows: &'a [FeedRow],
    pub groups: &'a [String],
    pub active_group: &'a str,
    pub sort: &'a str,
}

#[derive(Template)]
#[template(path = "leaderboard.html")]
pub struct LeaderboardTemplate<'a> {
    pub title: &'a str,
    pub entries: &'a [LeaderboardEntry],
}

/// Escapes the markdown body and applies a small subset of formatting:
/// `# ` headings become bold, `- ` items become bullets.
pub fn render_body(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            let escaped = html_escape::encode_safe(line).to_string();
            if let Some(heading) = escaped.strip_prefix("# ") {
                format!("<strong>{}</strong>", heading)
            } else if let Some(item) = escaped.strip_prefix("- ") {
                format!("&bull; {}", item)
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join("<br />")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pr_core::{FeedQuery, NewPhoto, SocialHub};

    #[test]
    fn test_render_body_escapes_html() {
        let html = render_body("# Week 1\n- <script>alert(1)</script>\nplain");
        assert!(html.starts_with("<strong>Week 1</strong><br />&bull; &lt;script&gt;"));
        assert!(html.ends_with("<br />plain"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_feed_page_renders_rows() {
        let mut hub = SocialHub::new();
        hub.create_group("Alpha", "ana");
        hub.add_photo(
            "ana",
            NewPhoto {
                caption: "morning run".into(),
                group: Some("Alpha".into()),
                ..NewPhoto::default()
            },
        );
        hub.publish_article("Meal prep", "- rice\n- beans", "bruno", vec!["diet".into()])
            .unwrap();

        let rows: Vec<FeedRow> = hub
            .query_feed(&FeedQuery::default())
            .iter()
            .map(|item| FeedRow::from_item(&item))
            .collect();
        let groups = vec!["Alpha".to_string()];
        let html = FeedTemplate {
            title: "Feed",
            viewer: "ana",
            rows: &rows,
            groups: &groups,
            active_group: "",
            sort: "recent",
        }
        .render()
        .unwrap();

        assert!(html.contains("morning run"));
        assert!(html.contains("Meal prep"));
        assert!(html.contains("&bull; rice"));
        assert!(html.find("Meal prep") < html.find("morning run"));
    }

    #[test]
    fn test_leaderboard_page_renders_entries() {
        let entries = vec![LeaderboardEntry {
            group_name: "Alpha".into(),
            total_likes: 8,
            member_count: 3,
            photo_count: 2,
        }];
        let html = LeaderboardTemplate {
            title: "Leaderboard",
            entries: &entries,
        }
        .render()
        .unwrap();
        assert!(html.contains("Alpha"));
        assert!(html.contains("<td>8</td>"));
    }
}
