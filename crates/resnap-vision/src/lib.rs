pub mod client;
pub mod error;
pub mod types;

pub use client::{image_data_url, VisionClient};
pub use error::VisionError;
