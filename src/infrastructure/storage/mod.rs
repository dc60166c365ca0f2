pub mod credential_provider;
pub mod preference_store;

pub use credential_provider::{
    EnvCredentialProvider, KeyringCredentialProvider, StaticCredentialProvider,
    build_credential_provider,
};
pub use preference_store::{InMemoryPreferenceStore, JsonFilePreferenceStore};
