pub mod connection;
pub mod dao;
pub mod migrations;

pub use connection::Database;
pub use dao::{StorageArea, StorageDao};
