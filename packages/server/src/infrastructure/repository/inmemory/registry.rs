//! InMemory Registry Repository 実装
//!
//! ドメイン層が定義する RegistryRepository trait の具体的な実装。
//! プロセス起動から終了まで生きる Registry を 1 つだけ保持します。
//! 永続化は行いません（再起動で全て消えます）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{Registry, RegistryRepository};

/// インメモリ Registry Repository 実装
///
/// 全ての更新を 1 つの Mutex で直列化します。
pub struct InMemoryRegistryRepository {
    registry: Arc<Mutex<Registry>>,
}

impl InMemoryRegistryRepository {
    /// 空の Registry で新しい InMemoryRegistryRepository を作成
    pub fn new() -> Self {
        Self::with_registry(Registry::new())
    }

    /// 既存の Registry から作成（テスト用の初期状態投入など）
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
        }
    }
}

impl Default for InMemoryRegistryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryRepository for InMemoryRegistryRepository {
    async fn lock(&self) -> OwnedMutexGuard<Registry> {
        self.registry.clone().lock_owned().await
    }

    async fn snapshot(&self) -> Registry {
        self.registry.lock().await.clone()
    }
}
