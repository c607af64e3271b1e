pub mod cache;
pub mod config;
pub mod console;
pub mod directory;
pub mod error;
pub mod processor;
pub mod queries;
pub mod registry;
pub mod schema;
pub mod store;
pub use shared::{models::*, error::ErrorCode, vote_logic::Direction};
pub use directory::AdminDirectory;
pub use error::{DirectoryError, DirectoryResult};
