pub mod caller_authenticator;
pub mod video_data_store;

pub use caller_authenticator::CallerAuthenticator;
pub use video_data_store::{DataReader, VideoDataStore};
