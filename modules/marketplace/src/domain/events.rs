use chrono::{DateTime, Utc};

use crate::contract::model::{ProjectId, UserId};

/// Transport-agnostic domain event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketplaceEvent {
    UserRegistered {
        id: UserId,
        at: DateTime<Utc>,
    },
    LoggedIn {
        id: UserId,
        at: DateTime<Utc>,
    },
    LoggedOut {
        id: UserId,
        at: DateTime<Utc>,
    },
    ProfileUpdated {
        id: UserId,
        at: DateTime<Utc>,
    },
    ProjectPosted {
        id: ProjectId,
        client_id: UserId,
        at: DateTime<Utc>,
    },
    ProjectAssigned {
        id: ProjectId,
        freelancer_id: UserId,
        at: DateTime<Utc>,
    },
    ProjectCompleted {
        id: ProjectId,
        at: DateTime<Utc>,
    },
}
