//! Dashboard aggregation over the catalog.

use tracing::instrument;

use crate::contract::model::{Dashboard, DashboardStats, Project, ProjectStatus, UserId};
use crate::domain::catalog::projects_involving;
use crate::domain::error::DomainError;
use crate::domain::service::Service;

/// Counts over projects the user takes part in. Earnings only accrue from
/// completed projects where the user is the freelancer; no budget counts as 0
/// and the sum saturates at `u64::MAX`.
pub fn compute_stats(projects: &[Project], user_id: &UserId) -> DashboardStats {
    projects
        .iter()
        .filter(|p| &p.client_id == user_id || p.freelancer_id.as_ref() == Some(user_id))
        .fold(DashboardStats::default(), |mut stats, p| {
            stats.total += 1;
            match p.status {
                ProjectStatus::Active => stats.active += 1,
                ProjectStatus::Completed => {
                    stats.completed += 1;
                    if p.freelancer_id.as_ref() == Some(user_id) {
                        stats.earnings = stats.earnings.saturating_add(p.budget.unwrap_or(0));
                    }
                }
                ProjectStatus::Open => {}
            }
            stats
        })
}

impl Service {
    #[instrument(name = "marketplace.service.compute_stats", skip(self), fields(user_id = %user_id))]
    pub async fn compute_stats(&self, user_id: &UserId) -> DashboardStats {
        compute_stats(&self.state().await.projects, user_id)
    }

    /// Stats plus the project list of the session user.
    #[instrument(name = "marketplace.service.dashboard", skip(self))]
    pub async fn dashboard(&self) -> Result<Dashboard, DomainError> {
        let state = self.state().await;
        let user = state
            .session_user()
            .cloned()
            .ok_or(DomainError::NotAuthenticated)?;

        Ok(Dashboard {
            stats: compute_stats(&state.projects, &user.id),
            projects: projects_involving(&state.projects, &user.id),
            user,
        })
    }
}
