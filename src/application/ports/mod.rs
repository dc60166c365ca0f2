pub mod credential_provider;
pub mod preference_store;
pub mod record_store;
