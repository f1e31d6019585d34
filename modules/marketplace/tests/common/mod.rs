#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;

use marketplace::contract::client::MarketplaceApi;
use marketplace::contract::model::{Registration, Role};
use marketplace::domain::events::MarketplaceEvent;
use marketplace::domain::ports::EventPublisher;
use marketplace::infra::storage::{KeyValueStore, MemoryStore};
use marketplace::{Marketplace, MarketplaceConfig};

/// Captures published events for assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<MarketplaceEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<MarketplaceEvent> {
        self.events.lock().clone()
    }
}

impl EventPublisher<MarketplaceEvent> for RecordingPublisher {
    fn publish(&self, event: &MarketplaceEvent) {
        self.events.lock().push(event.clone());
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub events: Arc<RecordingPublisher>,
    pub module: Marketplace,
    pub api: Arc<dyn MarketplaceApi>,
}

impl Harness {
    /// Fresh module over an empty store, without the demo catalog.
    pub async fn empty() -> Self {
        Self::over(Arc::new(MemoryStore::new()), no_demo()).await
    }

    pub async fn over(store: Arc<MemoryStore>, cfg: MarketplaceConfig) -> Self {
        let events = Arc::new(RecordingPublisher::default());
        let module = Marketplace::default();
        let kv: Arc<dyn KeyValueStore> = store.clone();
        module
            .init_with_events(cfg, kv, events.clone())
            .await
            .expect("module init");
        let api = module.client().expect("client");
        Self {
            store,
            events,
            module,
            api,
        }
    }

    /// A second module over the same store, as after a restart.
    pub async fn restart(&self) -> Self {
        Self::over(self.store.clone(), no_demo()).await
    }
}

pub fn no_demo() -> MarketplaceConfig {
    MarketplaceConfig {
        seed_demo_projects: false,
        ..MarketplaceConfig::default()
    }
}

pub fn registration(name: &str, email: &str, role: Role) -> Registration {
    Registration {
        name: name.to_string(),
        email: email.to_string(),
        role,
        password: "s3cret".to_string(),
        confirm_password: "s3cret".to_string(),
    }
}
