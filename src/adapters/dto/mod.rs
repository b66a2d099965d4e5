pub mod like_video_dto;
pub mod video_dto;
