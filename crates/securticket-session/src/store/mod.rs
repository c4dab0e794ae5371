//! Pluggable state storage for session and lockout snapshots.

pub mod file;
pub mod memory;

use async_trait::async_trait;

use securticket_core::result::AppResult;

pub use file::FileStateStore;
pub use memory::MemoryStateStore;

/// Trait for durable client-side state backends.
///
/// All values are serialized as JSON strings by the callers; the store
/// only moves opaque strings. Keys are flat (no hierarchy).
#[async_trait]
pub trait StateStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read a value by key. Returns `None` if the key does not exist.
    async fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value, overwriting any previous one.
    async fn write(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}
