pub mod config;
pub mod error;
pub mod types;

pub use config::RoomshareConfig;
pub use error::{LoadError, LoadResult, PolicyError};
pub use types::*;
