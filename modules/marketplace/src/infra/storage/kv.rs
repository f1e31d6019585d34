use async_trait::async_trait;

/// Host-provided durable string storage, keyed by name.
///
/// Implementations are shared between the persistence adapter and callers
/// that inspect raw values, so they must be safe to use through `Arc`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stored value, or `None` when the key was never written or was removed.
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Drop `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}
