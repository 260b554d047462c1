pub mod chat;
pub mod health;
pub mod image;
pub mod messages;
