pub mod core;
pub mod record_store;

pub use self::core::PgRecordStore;
