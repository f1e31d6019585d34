use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument};

use crate::config::MarketplaceConfig;
use crate::contract::model::Project;
use crate::domain::catalog::demo_projects;
use crate::domain::error::DomainError;
use crate::domain::events::MarketplaceEvent;
use crate::domain::ports::EventPublisher;
use crate::domain::repo::MarketplaceRepository;
use crate::domain::state::{Account, AppState};

/// Domain service owning the application state.
/// Depends only on the repository and event ports, not on infra types.
///
/// Operations are split by component: `session`, `catalog`, `dashboard`
/// and `profile` each add an `impl Service` block.
#[derive(Clone)]
pub struct Service {
    pub(crate) repo: Arc<dyn MarketplaceRepository>,
    pub(crate) events: Arc<dyn EventPublisher<MarketplaceEvent>>,
    pub(crate) config: ServiceConfig,
    state: Arc<Mutex<AppState>>,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub seed_demo_projects: bool,
    pub max_name_length: usize,
    pub max_skill_length: usize,
    pub max_avatar_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        MarketplaceConfig::default().into()
    }
}

impl From<MarketplaceConfig> for ServiceConfig {
    fn from(cfg: MarketplaceConfig) -> Self {
        Self {
            seed_demo_projects: cfg.seed_demo_projects,
            max_name_length: cfg.max_name_length,
            max_skill_length: cfg.max_skill_length,
            max_avatar_bytes: cfg.max_avatar_bytes,
        }
    }
}

impl Service {
    /// Create a service over an empty state. Nothing is read from the store.
    pub fn new(
        repo: Arc<dyn MarketplaceRepository>,
        events: Arc<dyn EventPublisher<MarketplaceEvent>>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            events,
            config,
            state: Arc::new(Mutex::new(AppState::default())),
        }
    }

    /// Startup sequence: load both collections, seed the demo catalog when
    /// enabled and empty, then restore the persisted session.
    #[instrument(name = "marketplace.service.load", skip_all)]
    pub async fn load(
        repo: Arc<dyn MarketplaceRepository>,
        events: Arc<dyn EventPublisher<MarketplaceEvent>>,
        config: ServiceConfig,
    ) -> Result<Self, DomainError> {
        let service = Self::new(repo, events, config);
        {
            let mut state = service.state().await;
            state.accounts = service.repo.load_accounts().await;
            state.projects = service.repo.load_projects().await;
            debug!(
                users = state.accounts.len(),
                projects = state.projects.len(),
                "Loaded stored collections"
            );

            if service.config.seed_demo_projects && state.projects.is_empty() {
                service.commit_projects(&mut state, demo_projects()).await?;
                info!("Seeded demo catalog with {} projects", state.projects.len());
            }
        }

        service.restore_session().await;
        Ok(service)
    }

    pub(crate) async fn state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().await
    }

    /// Persist `accounts`, then make them the in-memory collection. On a
    /// failed write the state is left as it was.
    pub(crate) async fn commit_accounts(
        &self,
        state: &mut AppState,
        accounts: Vec<Account>,
    ) -> Result<(), DomainError> {
        self.repo
            .save_accounts(&accounts)
            .await
            .map_err(|e| DomainError::persistence(e.to_string()))?;
        state.accounts = accounts;
        Ok(())
    }

    /// Persist `projects`, then make them the in-memory catalog.
    pub(crate) async fn commit_projects(
        &self,
        state: &mut AppState,
        projects: Vec<Project>,
    ) -> Result<(), DomainError> {
        self.repo
            .save_projects(&projects)
            .await
            .map_err(|e| DomainError::persistence(e.to_string()))?;
        state.projects = projects;
        Ok(())
    }
}
