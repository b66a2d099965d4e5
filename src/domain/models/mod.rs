pub mod caller;
pub mod like_video;
pub mod video;
