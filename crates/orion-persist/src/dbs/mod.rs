pub mod memory;
pub mod postgrest;

#[cfg(feature = "mongodb")]
pub mod mongo;
