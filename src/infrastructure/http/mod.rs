pub mod record_store_client;

pub use record_store_client::HttpApplicationRecordStore;
