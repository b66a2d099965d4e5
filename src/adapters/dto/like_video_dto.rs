use sqlx::{postgres::PgRow, FromRow, Row};

use crate::application::dto::like_video_dto::LikeVideoDTO;

impl FromRow<'_, PgRow> for LikeVideoDTO {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let duration: i64 = row.try_get("duration")?;

        Ok(LikeVideoDTO {
            id: Some(id as u64),
            name: Some(row.try_get("name")?),
            duration: Some(duration.max(0) as u64),
            liked_by: Some(row.try_get("liked_by")?),
        })
    }
}

impl LikeVideoDTO {
    /// Sorts and dedups the likers before they are written as a TEXT[].
    pub fn sanitize(&mut self) {
        if let Some(liked_by) = self.liked_by.as_mut() {
            liked_by.sort();
            liked_by.dedup();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_sorts_and_dedups_likers() {
        let mut dto = LikeVideoDTO {
            id: Some(7),
            name: Some("clip".to_string()),
            duration: Some(30),
            liked_by: Some(vec!["bob".into(), "alice".into(), "bob".into()]),
        };
        dto.sanitize();

        assert_eq!(dto.id, Some(7));
        assert_eq!(dto.duration, Some(30));
        assert_eq!(
            dto.liked_by,
            Some(vec!["alice".to_string(), "bob".to_string()])
        );
    }
}
