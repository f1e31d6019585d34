use async_trait::async_trait;

use crate::contract::{
    error::MarketplaceError,
    model::{
        Dashboard, DashboardStats, NewProject, Project, ProjectFilter, ProjectId, Registration,
        User, UserId,
    },
};

/// Public API trait the presentation layer drives.
///
/// Profile and posting operations act on the session user and fail with
/// `Unauthorized` when nobody is logged in.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Create an account and log it in
    async fn register(&self, registration: Registration) -> Result<User, MarketplaceError>;

    async fn login(&self, email: String, password: String) -> Result<User, MarketplaceError>;

    async fn logout(&self) -> Result<(), MarketplaceError>;

    /// The session user, if any
    async fn current_user(&self) -> Result<Option<User>, MarketplaceError>;

    /// Filtered catalog in insertion order
    async fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>, MarketplaceError>;

    async fn get_project(&self, id: ProjectId) -> Result<Project, MarketplaceError>;

    /// Post a project owned by the session user
    async fn post_project(&self, new_project: NewProject) -> Result<Project, MarketplaceError>;

    /// open → active
    async fn assign_project(
        &self,
        id: ProjectId,
        freelancer_id: UserId,
    ) -> Result<Project, MarketplaceError>;

    /// active → completed
    async fn complete_project(&self, id: ProjectId) -> Result<Project, MarketplaceError>;

    async fn stats(&self, user_id: UserId) -> Result<DashboardStats, MarketplaceError>;

    async fn dashboard(&self) -> Result<Dashboard, MarketplaceError>;

    async fn add_skill(&self, skill: String) -> Result<User, MarketplaceError>;

    async fn remove_skill(&self, skill: String) -> Result<User, MarketplaceError>;

    async fn rename(&self, name: String) -> Result<User, MarketplaceError>;

    /// Store an uploaded image as the session user's avatar
    async fn set_avatar(&self, bytes: Vec<u8>, mime: String) -> Result<User, MarketplaceError>;
}
