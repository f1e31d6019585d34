use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::MarketplaceApi,
    error::MarketplaceError,
    model::{
        Dashboard, DashboardStats, NewProject, Project, ProjectFilter, ProjectId, Registration,
        User, UserId,
    },
};
use crate::domain::service::Service;

/// In-process implementation of `MarketplaceApi` over the domain service.
pub struct MarketplaceLocalClient {
    service: Arc<Service>,
}

impl MarketplaceLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl MarketplaceApi for MarketplaceLocalClient {
    async fn register(&self, registration: Registration) -> Result<User, MarketplaceError> {
        Ok(self.service.register(registration).await?)
    }

    async fn login(&self, email: String, password: String) -> Result<User, MarketplaceError> {
        Ok(self.service.login(&email, &password).await?)
    }

    async fn logout(&self) -> Result<(), MarketplaceError> {
        Ok(self.service.logout().await?)
    }

    async fn current_user(&self) -> Result<Option<User>, MarketplaceError> {
        Ok(self.service.current_user().await)
    }

    async fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>, MarketplaceError> {
        Ok(self.service.list_projects(&filter).await)
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project, MarketplaceError> {
        Ok(self.service.get_project(id).await?)
    }

    async fn post_project(&self, new_project: NewProject) -> Result<Project, MarketplaceError> {
        let owner = self.service.require_session().await?;
        Ok(self.service.create_project(new_project, &owner).await?)
    }

    async fn assign_project(
        &self,
        id: ProjectId,
        freelancer_id: UserId,
    ) -> Result<Project, MarketplaceError> {
        self.service.require_session().await?;
        Ok(self.service.assign_project(id, &freelancer_id).await?)
    }

    async fn complete_project(&self, id: ProjectId) -> Result<Project, MarketplaceError> {
        self.service.require_session().await?;
        Ok(self.service.complete_project(id).await?)
    }

    async fn stats(&self, user_id: UserId) -> Result<DashboardStats, MarketplaceError> {
        Ok(self.service.compute_stats(&user_id).await)
    }

    async fn dashboard(&self) -> Result<Dashboard, MarketplaceError> {
        Ok(self.service.dashboard().await?)
    }

    async fn add_skill(&self, skill: String) -> Result<User, MarketplaceError> {
        let user_id = self.service.require_session().await?;
        Ok(self.service.add_skill(&user_id, &skill).await?)
    }

    async fn remove_skill(&self, skill: String) -> Result<User, MarketplaceError> {
        let user_id = self.service.require_session().await?;
        Ok(self.service.remove_skill(&user_id, &skill).await?)
    }

    async fn rename(&self, name: String) -> Result<User, MarketplaceError> {
        let user_id = self.service.require_session().await?;
        Ok(self.service.rename(&user_id, &name).await?)
    }

    async fn set_avatar(&self, bytes: Vec<u8>, mime: String) -> Result<User, MarketplaceError> {
        let user_id = self.service.require_session().await?;
        Ok(self.service.set_avatar(&user_id, &bytes, &mime).await?)
    }
}
