use async_trait::async_trait;

use crate::contract::model::{Project, UserId};
use crate::domain::state::Account;

/// Port for the domain layer: persistence operations the domain needs.
///
/// Loads never fail: absent or corrupt data comes back empty and the
/// adapter is responsible for logging and cleanup. Saves replace the whole
/// collection; two saves in a row are not atomic together.
#[async_trait]
pub trait MarketplaceRepository: Send + Sync {
    async fn load_accounts(&self) -> Vec<Account>;
    async fn save_accounts(&self, accounts: &[Account]) -> anyhow::Result<()>;

    async fn load_projects(&self) -> Vec<Project>;
    async fn save_projects(&self, projects: &[Project]) -> anyhow::Result<()>;

    /// Persisted session user id, if it is well-formed.
    async fn load_session(&self) -> Option<UserId>;
    async fn save_session(&self, id: &UserId) -> anyhow::Result<()>;
    async fn clear_session(&self) -> anyhow::Result<()>;
}
