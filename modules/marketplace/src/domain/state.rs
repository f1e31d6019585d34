use crate::contract::model::{Project, ProjectId, User, UserId};

/// A user together with its credential. Never leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub user: User,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// The single application-state object. Collections are append-only and keep
/// insertion order; the session refers to an account by id. Changes are built
/// on copies and assigned only after they have been persisted.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub accounts: Vec<Account>,
    pub projects: Vec<Project>,
    pub session: Option<UserId>,
}

impl AppState {
    pub fn account(&self, id: &UserId) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.user.id == id)
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.account(id).map(|a| &a.user)
    }

    pub fn session_user(&self) -> Option<&User> {
        self.session.as_ref().and_then(|id| self.user(id))
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Copy of the accounts with the record of the same id replaced.
    pub fn with_account(&self, updated: Account) -> Vec<Account> {
        self.accounts
            .iter()
            .map(|a| {
                if a.user.id == updated.user.id {
                    updated.clone()
                } else {
                    a.clone()
                }
            })
            .collect()
    }

    /// Copy of the catalog with the project of the same id replaced.
    pub fn with_project(&self, updated: Project) -> Vec<Project> {
        self.projects
            .iter()
            .map(|p| {
                if p.id == updated.id {
                    updated.clone()
                } else {
                    p.clone()
                }
            })
            .collect()
    }

    /// One past the largest id in the catalog; 1 for an empty catalog.
    pub fn next_project_id(&self) -> ProjectId {
        let max = self.projects.iter().map(|p| p.id.0).max().unwrap_or(0);
        ProjectId(max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::ProjectStatus;
    use chrono::Utc;

    fn project(id: u64) -> Project {
        Project {
            id: ProjectId(id),
            title: format!("p{id}"),
            description: "d".into(),
            category: None,
            budget: None,
            timeline: None,
            client_id: UserId::new("c"),
            freelancer_id: None,
            status: ProjectStatus::Open,
            skills: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn next_project_id_follows_the_largest_id() {
        let mut state = AppState::default();
        assert_eq!(state.next_project_id(), ProjectId(1));

        state.projects = vec![project(7), project(3)];
        assert_eq!(state.next_project_id(), ProjectId(8));
    }

    #[test]
    fn with_project_replaces_by_id_and_leaves_state_alone() {
        let state = AppState {
            projects: vec![project(1), project(2)],
            ..AppState::default()
        };
        let mut changed = project(2);
        changed.title = "renamed".into();

        let copy = state.with_project(changed);
        assert_eq!(copy[1].title, "renamed");
        assert_eq!(copy[0], state.projects[0]);
        assert_eq!(state.projects[1].title, "p2");
    }

    #[test]
    fn session_user_requires_a_known_account() {
        let mut state = AppState {
            session: Some(UserId::new("ghost")),
            ..AppState::default()
        };
        assert!(state.session_user().is_none());

        state.session = None;
        assert!(state.session_user().is_none());
    }
}
