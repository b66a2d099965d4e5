mod memory_video_repository;
mod pg_video_repository;
mod video_catalog;

pub use memory_video_repository::MemoryVideoRepository;
pub use pg_video_repository::PgVideoRepository;
pub use video_catalog::VideoCatalog;
