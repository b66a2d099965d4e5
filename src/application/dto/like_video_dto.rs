use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::models::like_video::LikeVideo;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LikeVideoDTO {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub duration: Option<u64>,
    pub liked_by: Option<Vec<String>>,
}

impl From<LikeVideo> for LikeVideoDTO {
    fn from(value: LikeVideo) -> Self {
        LikeVideoDTO {
            id: if value.id == 0 { None } else { Some(value.id) },
            name: Some(value.name),
            duration: Some(value.duration),
            liked_by: Some(value.liked_by.into_iter().collect()),
        }
    }
}

impl From<LikeVideoDTO> for LikeVideo {
    fn from(value: LikeVideoDTO) -> Self {
        LikeVideo {
            id: value.id.unwrap_or(0),
            name: value.name.unwrap_or_default(),
            duration: value.duration.unwrap_or(0),
            liked_by: value
                .liked_by
                .unwrap_or_default()
                .into_iter()
                .collect::<BTreeSet<_>>(),
        }
    }
}
