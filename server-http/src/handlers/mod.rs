pub mod health;
pub mod objects;

pub use health::health_check;
pub use objects::{get_object, list_objects, upload_object, DELETE_AFTER_HEADER};
