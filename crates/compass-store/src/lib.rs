#![deny(unsafe_code)]

pub mod error;
pub mod import;
pub mod loader;
pub mod paths;
pub mod store;

pub use crate::error::StoreError;
pub use crate::import::{ImportSource, import_csv, import_sources, write_records};
pub use crate::loader::{LoadOutcome, load_records, load_records_from_reader};
pub use crate::paths::{DATA_ENV_VAR, DEFAULT_DATA_FILE, resolve_data_path};
pub use crate::store::{RecordGroup, RecordStore};
