use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Largest id or duration a stored record can hold (a Postgres BIGINT).
pub const MAX_STORED_VALUE: u64 = i64::MAX as u64;

/// Video record held by the like service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LikeVideo {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub duration: u64,
    #[serde(rename = "likedBy", default)]
    pub liked_by: BTreeSet<String>,
}

impl LikeVideo {
    /// Name of the first field whose value cannot be stored unchanged.
    pub fn out_of_range_field(&self) -> Option<&'static str> {
        if self.id > MAX_STORED_VALUE {
            Some("id")
        } else if self.duration > MAX_STORED_VALUE {
            Some("duration")
        } else {
            None
        }
    }

    /// Adds `user` to the likers. Returns `false` if it was already there.
    pub fn like(&mut self, user: &str) -> bool {
        self.liked_by.insert(user.to_string())
    }

    /// Removes `user` from the likers. Returns `false` if it was never there.
    pub fn unlike(&mut self, user: &str) -> bool {
        self.liked_by.remove(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_is_idempotent_on_membership() {
        let mut video = LikeVideo::default();
        assert!(video.like("alice"));
        assert!(!video.like("alice"));
        assert_eq!(video.liked_by.len(), 1);
    }

    #[test]
    fn unlike_requires_previous_like() {
        let mut video = LikeVideo::default();
        assert!(!video.unlike("bob"));
        video.like("bob");
        assert!(video.unlike("bob"));
        assert!(video.liked_by.is_empty());
    }

    #[test]
    fn values_above_bigint_are_out_of_range() {
        let mut video = LikeVideo {
            id: MAX_STORED_VALUE,
            duration: MAX_STORED_VALUE,
            ..Default::default()
        };
        assert_eq!(video.out_of_range_field(), None);

        video.duration = u64::MAX;
        assert_eq!(video.out_of_range_field(), Some("duration"));

        video.id = MAX_STORED_VALUE + 1;
        assert_eq!(video.out_of_range_field(), Some("id"));
    }
}
