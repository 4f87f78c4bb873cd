use self::types::{Key, KeyRef, StoreError, Value};
use async_trait::async_trait;

pub mod inmemory;
pub mod types;

pub use inmemory::InMemoryStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn get<'k>(&self, key: KeyRef<'k>) -> Result<Option<Value>, StoreError>;

    /// Inserts or overwrites the value under `key`.
    async fn set(&self, key: Key, value: Value) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete<'k>(&self, key: KeyRef<'k>) -> Result<(), StoreError>;

    /// Checks that the backend can serve requests.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
