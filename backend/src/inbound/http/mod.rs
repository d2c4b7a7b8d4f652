//! HTTP inbound adapter exposing the token and universe triggers.

pub mod error;
pub mod health;
pub mod params;
pub mod state;
pub mod token;
pub mod universe;

pub use error::{ApiError, ApiResult, ErrorCode};
