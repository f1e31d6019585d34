use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::{debug, info};

use crate::config::MarketplaceConfig;
use crate::contract::client::MarketplaceApi;
use crate::domain::events::MarketplaceEvent;
use crate::domain::ports::EventPublisher;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::MarketplaceLocalClient;
use crate::infra::events::LogEventPublisher;
use crate::infra::storage::{KeyValueStore, KvRepository};

/// Module root: wires the store adapter and event publisher into the domain
/// service and hands out clients.
#[derive(Default)]
pub struct Marketplace {
    // Keep the domain service behind ArcSwap for cheap read-mostly access.
    service: ArcSwapOption<Service>,
}

impl Clone for Marketplace {
    fn clone(&self) -> Self {
        Self {
            service: ArcSwapOption::new(self.service.load_full()),
        }
    }
}

impl Marketplace {
    /// Load state from `store` with the logging event publisher.
    pub async fn init(
        &self,
        cfg: MarketplaceConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> anyhow::Result<()> {
        self.init_with_events(cfg, store, Arc::new(LogEventPublisher))
            .await
    }

    pub async fn init_with_events(
        &self,
        cfg: MarketplaceConfig,
        store: Arc<dyn KeyValueStore>,
        events: Arc<dyn EventPublisher<MarketplaceEvent>>,
    ) -> anyhow::Result<()> {
        info!("Initializing marketplace module");
        debug!(
            "Loaded marketplace config: seed_demo_projects={}, max_skill_length={}, max_avatar_bytes={}",
            cfg.seed_demo_projects, cfg.max_skill_length, cfg.max_avatar_bytes
        );

        let repo = KvRepository::new(store);
        let service = Service::load(Arc::new(repo), events, ServiceConfig::from(cfg)).await?;

        self.service.store(Some(Arc::new(service)));
        info!("Marketplace service ready");
        Ok(())
    }

    pub fn service(&self) -> anyhow::Result<Arc<Service>> {
        self.service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client for the presentation layer.
    pub fn client(&self) -> anyhow::Result<Arc<dyn MarketplaceApi>> {
        Ok(Arc::new(MarketplaceLocalClient::new(self.service()?)))
    }
}
