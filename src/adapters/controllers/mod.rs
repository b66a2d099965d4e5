pub mod health_controller;
pub mod like_controller;
pub mod upload_controller;
