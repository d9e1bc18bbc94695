pub mod storage;

pub use storage::{StorageArea, StorageDao};
