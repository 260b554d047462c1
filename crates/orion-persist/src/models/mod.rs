mod db_message;
mod db_session;
mod db_user;

// Export database-agnostic models
pub use db_message::{DBMessage, MessageRole};
pub use db_session::Session;
pub use db_user::{User, DEFAULT_USER_NAME};
