pub mod builder;
pub mod dbs;
pub mod error;
pub mod models;
pub mod trait_client;

pub use builder::{PersistClientBuilder, StorageBackend};
pub use dbs::memory::InMemoryPersistenceClient;
pub use dbs::postgrest::PostgrestPersistenceClient;
pub use error::PersistError;
pub use models::{DBMessage, MessageRole, Session, User, DEFAULT_USER_NAME};
pub use trait_client::PersistenceClient;

#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoPersistenceClient;
