mod store;

pub use store::ACCESS_TOKEN_KEY;
pub use store::CredentialStore;
pub use store::FileStore;
pub use store::MemoryStore;
pub use store::REFRESH_TOKEN_KEY;
pub use store::StoreError;
