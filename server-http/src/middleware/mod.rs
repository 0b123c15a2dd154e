pub mod authorization;

pub use authorization::require_token;
