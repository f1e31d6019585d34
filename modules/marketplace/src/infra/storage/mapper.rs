use crate::contract::model::{Project, ProjectId, ProjectStatus, Role, RoleProfile, User, UserId};
use crate::domain::state::Account;
use crate::infra::storage::entity::{ProjectEntity, RoleEntity, StatusEntity, UserEntity};

impl From<RoleEntity> for Role {
    fn from(role: RoleEntity) -> Self {
        match role {
            RoleEntity::Client => Role::Client,
            RoleEntity::Freelancer => Role::Freelancer,
        }
    }
}

impl From<StatusEntity> for ProjectStatus {
    fn from(status: StatusEntity) -> Self {
        match status {
            StatusEntity::Open => ProjectStatus::Open,
            StatusEntity::Active => ProjectStatus::Active,
            StatusEntity::Completed => ProjectStatus::Completed,
        }
    }
}

impl From<ProjectStatus> for StatusEntity {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Open => StatusEntity::Open,
            ProjectStatus::Active => StatusEntity::Active,
            ProjectStatus::Completed => StatusEntity::Completed,
        }
    }
}

/// Role-specific fields missing from an older record fall back to the
/// values a fresh registration would get.
impl From<UserEntity> for Account {
    fn from(e: UserEntity) -> Self {
        let profile = match e.role {
            RoleEntity::Client => RoleProfile::Client {
                company: e
                    .company
                    .unwrap_or_else(|| RoleProfile::DEFAULT_COMPANY.to_string()),
            },
            RoleEntity::Freelancer => RoleProfile::Freelancer {
                skills: e.skills.unwrap_or_default(),
                portfolio: e.portfolio.unwrap_or_default(),
                experience: e.experience.unwrap_or_default(),
            },
        };

        Account {
            user: User {
                id: UserId::new(e.id),
                name: e.name,
                email: e.email,
                created_at: e.created_at,
                avatar: e.avatar,
                profile,
            },
            password_hash: e.password_hash,
        }
    }
}

impl From<&Account> for UserEntity {
    fn from(account: &Account) -> Self {
        let user = &account.user;
        let mut entity = UserEntity {
            id: user.id.as_str().to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: RoleEntity::Client,
            password_hash: account.password_hash.clone(),
            created_at: user.created_at,
            avatar: user.avatar.clone(),
            skills: None,
            portfolio: None,
            experience: None,
            company: None,
        };

        match &user.profile {
            RoleProfile::Client { company } => {
                entity.company = Some(company.clone());
            }
            RoleProfile::Freelancer {
                skills,
                portfolio,
                experience,
            } => {
                entity.role = RoleEntity::Freelancer;
                entity.skills = Some(skills.clone());
                entity.portfolio = Some(portfolio.clone());
                entity.experience = Some(experience.clone());
            }
        }
        entity
    }
}

impl From<ProjectEntity> for Project {
    fn from(e: ProjectEntity) -> Self {
        Project {
            id: ProjectId(e.id),
            title: e.title,
            description: e.description,
            category: e.category,
            budget: e.budget,
            timeline: e.timeline,
            client_id: UserId::new(e.client_id),
            freelancer_id: e.freelancer_id.map(UserId::new),
            status: e.status.into(),
            skills: e.skills,
            created_at: e.created_at,
        }
    }
}

impl From<&Project> for ProjectEntity {
    fn from(p: &Project) -> Self {
        ProjectEntity {
            id: p.id.0,
            title: p.title.clone(),
            description: p.description.clone(),
            category: p.category.clone(),
            budget: p.budget,
            timeline: p.timeline.clone(),
            client_id: p.client_id.as_str().to_string(),
            freelancer_id: p.freelancer_id.as_ref().map(|id| id.as_str().to_string()),
            status: p.status.into(),
            skills: p.skills.clone(),
            created_at: p.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_client_record_gets_default_company() {
        let raw = r#"{
            "id": "u1",
            "name": "Ann",
            "email": "ann@example.com",
            "role": "client",
            "passwordHash": "$argon2id$stub",
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;
        let entity: UserEntity = serde_json::from_str(raw).unwrap();
        let account = Account::from(entity);

        assert_eq!(account.user.role(), Role::Client);
        assert_eq!(
            account.user.profile,
            RoleProfile::Client {
                company: "Your Company Name".into()
            }
        );
    }

    #[test]
    fn freelancer_serializes_camel_case_without_company() {
        let account = Account {
            user: User {
                id: UserId::new("u2"),
                name: "Bo".into(),
                email: "bo@example.com".into(),
                created_at: chrono::Utc::now(),
                avatar: None,
                profile: RoleProfile::Freelancer {
                    skills: vec!["Rust".into()],
                    portfolio: vec![],
                    experience: String::new(),
                },
            },
            password_hash: "h".into(),
        };

        let json = serde_json::to_value(UserEntity::from(&account)).unwrap();
        assert_eq!(json["role"], "freelancer");
        assert_eq!(json["passwordHash"], "h");
        assert_eq!(json["skills"][0], "Rust");
        assert!(json.get("company").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
