pub mod files;
pub mod kv;
pub mod store;

pub use files::{config_file, ensure_data_dir, init_local_dir, log_file};
pub use kv::{FileStore, KeyValueStore, StoreError};
pub use store::Store;
