use orion_types::RecordId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_NAME: &str = "Guest";

/// Row of the `users` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn guest(id: impl Into<RecordId>) -> Self {
        Self::new(id, DEFAULT_USER_NAME)
    }
}
