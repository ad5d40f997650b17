//! # Leaderboard Calculator
//!
//! Read-side projection: groups ranked by the likes their photos collected.

use std::cmp::Reverse;

use crate::groups::GroupRegistry;
use crate::likes::LikeLedger;
use crate::models::{FeedItemId, LeaderboardEntry};
use crate::photos::PhotoStore;

/// Ranks every registered group by total photo likes, highest first.
///
/// Photo ids that no longer resolve count as zero. Equal totals keep
/// registry order, i.e. the earliest-created group ranks first.
pub fn compute_leaderboard(
    groups: &GroupRegistry,
    photos: &PhotoStore,
    likes: &LikeLedger,
) -> Vec<LeaderboardEntry> {
    let mut board: Vec<LeaderboardEntry> = groups
        .iter()
        .map(|group| {
            let total_likes = group
                .photos
                .iter()
                .filter(|id| photos.contains(id))
                .map(|id| likes.count(&FeedItemId::Photo(*id)))
                .sum();
            LeaderboardEntry {
                group_name: group.name.clone(),
                total_likes,
                member_count: group.members.len(),
                photo_count: group.photos.len(),
            }
        })
        .collect();

    board.sort_by_key(|entry| Reverse(entry.total_likes));
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PhotoId;
    use crate::photos::PhotoRecord;
    use bytes::Bytes;
    use chrono::Utc;

    fn store_photo(photos: &mut PhotoStore, group: &str) -> PhotoId {
        let id = PhotoId::new();
        photos.insert(PhotoRecord {
            id,
            uploader: "ana".into(),
            caption: String::new(),
            image: Bytes::new(),
            media_type: None,
            created_at: Utc::now(),
            group: Some(group.into()),
        });
        id
    }

    #[test]
    fn test_orphaned_photo_ids_count_as_zero() {
        let mut groups = GroupRegistry::new();
        let mut photos = PhotoStore::new();
        let mut likes = LikeLedger::new();
        groups.create("Alpha", "u1", Utc::now());

        let kept = store_photo(&mut photos, "Alpha");
        groups.attach_photo("Alpha", kept);
        likes.like(FeedItemId::Photo(kept), "u2");

        // Liked, listed in the group, but absent from the store.
        let orphan = PhotoId::new();
        groups.attach_photo("Alpha", orphan);
        likes.like(FeedItemId::Photo(orphan), "u3");

        let board = compute_leaderboard(&groups, &photos, &likes);
        assert_eq!(board[0].total_likes, 1);
        assert_eq!(board[0].photo_count, 2);
    }

    #[test]
    fn test_ranked_by_total_likes_not_creation_order() {
        let mut groups = GroupRegistry::new();
        let mut photos = PhotoStore::new();
        let mut likes = LikeLedger::new();
        groups.create("Alpha", "u1", Utc::now());
        groups.create("Beta", "u2", Utc::now());

        let alpha_photo = store_photo(&mut photos, "Alpha");
        groups.attach_photo("Alpha", alpha_photo);
        likes.like(FeedItemId::Photo(alpha_photo), "u3");

        let beta_photo = store_photo(&mut photos, "Beta");
        groups.attach_photo("Beta", beta_photo);
        for liker in ["u3", "u4", "u5"] {
            likes.like(FeedItemId::Photo(beta_photo), liker);
        }

        let board = compute_leaderboard(&groups, &photos, &likes);
        let ranked: Vec<_> = board.iter().map(|e| (e.group_name.as_str(), e.total_likes)).collect();
        assert_eq!(ranked, vec![("Beta", 3), ("Alpha", 1)]);
    }

    #[test]
    fn test_ties_keep_creation_order() {
        let mut groups = GroupRegistry::new();
        let photos = PhotoStore::new();
        let likes = LikeLedger::new();
        groups.create("First", "u1", Utc::now());
        groups.create("Second", "u1", Utc::now());
        groups.create("Third", "u1", Utc::now());

        let names: Vec<_> = compute_leaderboard(&groups, &photos, &likes)
            .into_iter()
            .map(|e| e.group_name)
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }
}
