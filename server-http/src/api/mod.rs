pub mod error;
pub mod responses;

pub use error::ApiError;
pub use responses::{HealthResponse, ListObjectsResponse};
