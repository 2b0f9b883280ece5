// RegisResQ - Shelter Animal Registry Core Library
// Records, arrival-date validation and the SQLite-backed store

pub mod animal;
pub mod config;
pub mod date;
pub mod error;
pub mod import;
pub mod store;

// Re-export commonly used types
pub use animal::{filter_by_kind, AnimalKind, AnimalRecord, KindFilter, UnknownKind};
pub use config::{AppConfig, LogFormat};
pub use date::{compose_date, days_in_month, is_leap_year, is_valid_date};
pub use error::StoreError;
pub use import::{import_csv, load_csv, ImportSummary};
pub use store::{setup_database, AnimalListing, AnimalStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
