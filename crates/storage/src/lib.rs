#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::{BankLoadError, FileRecordStore};
pub use repository::{InMemoryRecordStore, SessionRecordRepository, StorageError};
