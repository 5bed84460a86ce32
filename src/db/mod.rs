pub mod connection;
pub mod migrations;
pub mod kv_repo;
pub mod kv_store;

pub use connection::*;
pub use kv_store::{KeyValueStore, MemoryStore};
