pub mod codec;
pub mod csv_export;
pub mod storage;

pub use codec::{load, rehydrate, save, RawProject, RawTask, STORAGE_KEY};
pub use csv_export::export_csv;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
