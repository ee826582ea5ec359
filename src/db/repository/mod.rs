//! Database repositories
//!
//! Repository pattern for database access, separating data access logic
//! from business logic.

pub mod analyses;
pub mod messages;

// Re-export commonly used items
pub use analyses::NewAnalysis;
pub use messages::NewMessage;
