use std::{collections::BTreeMap, sync::Mutex};

use async_trait::async_trait;

use crate::{
    application::{
        error::ApplicationError,
        repositories::video_repository::{ensure_storable, VideoRepository},
    },
    domain::models::like_video::LikeVideo,
};

#[derive(Default)]
struct Table {
    rows: BTreeMap<u64, LikeVideo>,
    last_id: u64,
}

/// Process-local repository used when no database is configured.
#[derive(Default)]
pub struct MemoryVideoRepository {
    table: Mutex<Table>,
}

impl MemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn select<P>(&self, predicate: P) -> Vec<LikeVideo>
    where
        P: Fn(&LikeVideo) -> bool,
    {
        self.table
            .lock()
            .unwrap()
            .rows
            .values()
            .filter(|video| predicate(video))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl VideoRepository for MemoryVideoRepository {
    async fn find_all(&self) -> Result<Vec<LikeVideo>, ApplicationError> {
        Ok(self.select(|_| true))
    }

    async fn find_one(&self, id: u64) -> Result<Option<LikeVideo>, ApplicationError> {
        Ok(self.table.lock().unwrap().rows.get(&id).cloned())
    }

    async fn save(&self, mut video: LikeVideo) -> Result<LikeVideo, ApplicationError> {
        ensure_storable(&video)?;
        let mut table = self.table.lock().unwrap();

        if video.id == 0 {
            loop {
                table.last_id += 1;
                if !table.rows.contains_key(&table.last_id) {
                    break;
                }
            }
            video.id = table.last_id;
        }

        table.rows.insert(video.id, video.clone());
        Ok(video)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<LikeVideo>, ApplicationError> {
        Ok(self.select(|video| video.name == name))
    }

    async fn find_by_duration_less_than(
        &self,
        duration: u64,
    ) -> Result<Vec<LikeVideo>, ApplicationError> {
        Ok(self.select(|video| video.duration < duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(name: &str, duration: u64) -> LikeVideo {
        LikeVideo {
            name: name.to_string(),
            duration,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn save_assigns_ids_and_updates_in_place() {
        let repo = MemoryVideoRepository::new();

        let first = repo.save(video("a", 10)).await.unwrap();
        let second = repo.save(video("b", 20)).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        let mut changed = first.clone();
        changed.like("alice");
        repo.save(changed).await.unwrap();

        let stored = repo.find_one(1).await.unwrap().unwrap();
        assert!(stored.liked_by.contains("alice"));
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn find_one_returns_none_for_unknown_id() {
        let repo = MemoryVideoRepository::new();
        assert!(repo.find_one(5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_name_matches_exactly() {
        let repo = MemoryVideoRepository::new();
        repo.save(video("Cats", 10)).await.unwrap();
        repo.save(video("Cats 2", 10)).await.unwrap();
        repo.save(video("Cats", 30)).await.unwrap();

        let found = repo.find_by_name("Cats").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|v| v.name == "Cats"));
    }

    #[tokio::test]
    async fn find_by_duration_less_than_is_strict() {
        let repo = MemoryVideoRepository::new();
        for duration in [5, 10, 15, 20] {
            repo.save(video("clip", duration)).await.unwrap();
        }

        let durations: Vec<u64> = repo
            .find_by_duration_less_than(15)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.duration)
            .collect();
        assert_eq!(durations, vec![5, 10]);
    }

    #[tokio::test]
    async fn save_rejects_values_above_bigint() {
        let repo = MemoryVideoRepository::new();

        let mut huge_id = video("clip", 10);
        huge_id.id = u64::MAX;
        assert!(matches!(
            repo.save(huge_id).await,
            Err(ApplicationError::BadRequest(_))
        ));

        let huge_duration = video("clip", u64::MAX);
        assert!(matches!(
            repo.save(huge_duration).await,
            Err(ApplicationError::BadRequest(_))
        ));

        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
