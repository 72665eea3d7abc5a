//! Repository trait for the Registry aggregate.
//!
//! Implementations live in the infrastructure layer (dependency inversion).

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use super::registry::Registry;

/// Access to the single Registry instance.
///
/// A use case holds the returned guard for its whole check-mutate-publish
/// sequence, so no other connection can observe or change the Registry in
/// between.
#[async_trait]
pub trait RegistryRepository: Send + Sync {
    /// Acquire exclusive access to the Registry
    async fn lock(&self) -> OwnedMutexGuard<Registry>;

    /// Copy of the current Registry, for read-only views
    async fn snapshot(&self) -> Registry;
}
