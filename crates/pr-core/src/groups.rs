//! # Group Registry
//!
//! Named competition groups. Names are unique and never renamed or removed.

use std::collections::{BTreeSet, HashMap, VecDeque};

use chrono::{DateTime, Utc};

use crate::models::{Group, GroupId, PhotoId};

#[derive(Debug, Default)]
pub struct GroupRegistry {
    /// Creation order
    groups: Vec<Group>,
    by_name: HashMap<String, usize>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new group with `creator` as its only member.
    ///
    /// Returns `false` for blank or already registered names.
    pub fn create(&mut self, name: &str, creator: &str, now: DateTime<Utc>) -> bool {
        let name = name.trim();
        if name.is_empty() || self.by_name.contains_key(name) {
            return false;
        }
        let mut members = BTreeSet::new();
        members.insert(creator.to_string());
        self.by_name.insert(name.to_string(), self.groups.len());
        self.groups.push(Group {
            id: GroupId::new(),
            name: name.to_string(),
            members,
            photos: VecDeque::new(),
            created_at: now,
        });
        true
    }

    /// Joining twice is a no-op that still reports success.
    pub fn join(&mut self, name: &str, identity: &str) -> bool {
        match self.get_mut(name) {
            Some(group) => {
                group.members.insert(identity.to_string());
                true
            }
            None => false,
        }
    }

    /// Prepends a photo to the group's list. `false` if the group is unknown.
    pub fn attach_photo(&mut self, name: &str, photo: PhotoId) -> bool {
        match self.get_mut(name) {
            Some(group) => {
                group.photos.push_front(photo);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.by_name
            .get(name.trim())
            .and_then(|&pos| self.groups.get(pos))
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Group> {
        let pos = *self.by_name.get(name.trim())?;
        self.groups.get_mut(pos)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name.trim())
    }

    /// Groups in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn by_member(&self, identity: &str) -> BTreeSet<String> {
        self.groups
            .iter()
            .filter(|g| g.members.contains(identity))
            .map(|g| g.name.clone())
            .collect()
    }
}
