//! Persistence adapter: the domain repository port over a key/value store.
//!
//! Each collection is one JSON array under a fixed key. Reads are lenient:
//! an absent key, an unreadable store or an unparsable value yields an empty
//! collection, and individual malformed elements are skipped.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::contract::model::{Project, UserId};
use crate::domain::repo::MarketplaceRepository;
use crate::domain::state::Account;
use crate::infra::storage::entity::{ProjectEntity, SessionEntity, UserEntity};
use crate::infra::storage::kv::KeyValueStore;

pub const USERS_KEY: &str = "users";
pub const PROJECTS_KEY: &str = "projects";
pub const SESSION_KEY: &str = "currentUser";

pub struct KvRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, "Failed to read stored value: {e:#}");
                None
            }
        }
    }

    async fn load_collection<E: DeserializeOwned>(&self, key: &str) -> Vec<E> {
        let Some(raw) = self.load_raw(key).await else {
            debug!(key, "No stored collection");
            return Vec::new();
        };

        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                warn!(key, "Stored collection is not a JSON array; ignoring it");
                return Vec::new();
            }
            Err(e) => {
                warn!(key, "Stored collection is not valid JSON: {e}");
                return Vec::new();
            }
        };

        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    warn!(key, index, "Skipping malformed record: {e}");
                    None
                }
            })
            .collect()
    }

    async fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let raw = serde_json::to_string(value).with_context(|| format!("serialize {key}"))?;
        self.store
            .set(key, &raw)
            .await
            .with_context(|| format!("write {key}"))
    }
}

#[async_trait]
impl MarketplaceRepository for KvRepository {
    async fn load_accounts(&self) -> Vec<Account> {
        self.load_collection::<UserEntity>(USERS_KEY)
            .await
            .into_iter()
            .map(Into::into)
            .collect()
    }

    async fn save_accounts(&self, accounts: &[Account]) -> anyhow::Result<()> {
        let entities: Vec<UserEntity> = accounts.iter().map(Into::into).collect();
        self.save_json(USERS_KEY, &entities).await
    }

    async fn load_projects(&self) -> Vec<Project> {
        self.load_collection::<ProjectEntity>(PROJECTS_KEY)
            .await
            .into_iter()
            .map(Into::into)
            .collect()
    }

    async fn save_projects(&self, projects: &[Project]) -> anyhow::Result<()> {
        let entities: Vec<ProjectEntity> = projects.iter().map(Into::into).collect();
        self.save_json(PROJECTS_KEY, &entities).await
    }

    /// A session value that does not parse, or carries a blank id, is removed.
    async fn load_session(&self) -> Option<UserId> {
        let raw = self.load_raw(SESSION_KEY).await?;

        match serde_json::from_str::<SessionEntity>(&raw) {
            Ok(session) if !session.id.trim().is_empty() => Some(UserId::new(session.id)),
            outcome => {
                match outcome {
                    Ok(_) => warn!("Stored session has a blank id; clearing it"),
                    Err(e) => warn!("Stored session is malformed; clearing it: {e}"),
                }
                if let Err(e) = self.store.remove(SESSION_KEY).await {
                    warn!("Failed to clear malformed session: {e:#}");
                }
                None
            }
        }
    }

    async fn save_session(&self, id: &UserId) -> anyhow::Result<()> {
        let session = SessionEntity {
            id: id.as_str().to_string(),
        };
        self.save_json(SESSION_KEY, &session).await
    }

    async fn clear_session(&self) -> anyhow::Result<()> {
        self.store
            .remove(SESSION_KEY)
            .await
            .with_context(|| format!("remove {SESSION_KEY}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::memory::MemoryStore;

    fn repo_over(store: &Arc<MemoryStore>) -> KvRepository {
        KvRepository::new(store.clone())
    }

    #[tokio::test]
    async fn absent_and_garbage_collections_load_empty() {
        let store = Arc::new(MemoryStore::with_entries([(PROJECTS_KEY, "{not json")]));
        let repo = repo_over(&store);

        assert!(repo.load_accounts().await.is_empty());
        assert!(repo.load_projects().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_elements_are_skipped() {
        let raw = r#"[
            {"id": 1, "title": "ok", "description": "d", "clientId": "c",
             "status": "open", "createdAt": "2024-01-01T00:00:00Z"},
            {"id": "two", "title": "bad"}
        ]"#;
        let store = Arc::new(MemoryStore::with_entries([(PROJECTS_KEY, raw)]));

        let projects = repo_over(&store).load_projects().await;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "ok");
    }

    #[tokio::test]
    async fn session_is_stored_as_an_id_object() {
        let store = Arc::new(MemoryStore::new());
        let repo = repo_over(&store);

        repo.save_session(&UserId::new("u-1")).await.unwrap();
        let raw = store.get(SESSION_KEY).await.unwrap().unwrap();
        assert_eq!(raw, r#"{"id":"u-1"}"#);
        assert_eq!(repo.load_session().await, Some(UserId::new("u-1")));

        repo.clear_session().await.unwrap();
        assert_eq!(repo.load_session().await, None);
    }

    #[tokio::test]
    async fn malformed_session_is_cleared() {
        for raw in ["nonsense", r#"{"id": "  "}"#, r#"{"name": "x"}"#] {
            let store = Arc::new(MemoryStore::with_entries([(SESSION_KEY, raw)]));
            let repo = repo_over(&store);

            assert_eq!(repo.load_session().await, None, "input {raw}");
            assert!(!store.contains(SESSION_KEY), "input {raw}");
        }
    }
}
