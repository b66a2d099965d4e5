pub mod error;
pub mod local;
pub mod secrets;
