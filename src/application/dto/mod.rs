pub mod like_video_dto;
