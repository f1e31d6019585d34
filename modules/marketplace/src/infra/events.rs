use tracing::info;

use crate::domain::events::MarketplaceEvent;
use crate::domain::ports::EventPublisher;

/// Default publisher: records every domain event in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventPublisher;

impl EventPublisher<MarketplaceEvent> for LogEventPublisher {
    fn publish(&self, event: &MarketplaceEvent) {
        match event {
            MarketplaceEvent::UserRegistered { id, at } => {
                info!(target: "marketplace.events", user_id = %id, %at, "user registered")
            }
            MarketplaceEvent::LoggedIn { id, at } => {
                info!(target: "marketplace.events", user_id = %id, %at, "logged in")
            }
            MarketplaceEvent::LoggedOut { id, at } => {
                info!(target: "marketplace.events", user_id = %id, %at, "logged out")
            }
            MarketplaceEvent::ProfileUpdated { id, at } => {
                info!(target: "marketplace.events", user_id = %id, %at, "profile updated")
            }
            MarketplaceEvent::ProjectPosted { id, client_id, at } => {
                info!(target: "marketplace.events", project_id = %id, client_id = %client_id, %at, "project posted")
            }
            MarketplaceEvent::ProjectAssigned {
                id,
                freelancer_id,
                at,
            } => {
                info!(target: "marketplace.events", project_id = %id, freelancer_id = %freelancer_id, %at, "project assigned")
            }
            MarketplaceEvent::ProjectCompleted { id, at } => {
                info!(target: "marketplace.events", project_id = %id, %at, "project completed")
            }
        }
    }
}
