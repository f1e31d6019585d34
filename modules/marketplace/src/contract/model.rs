use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Opaque user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Fresh random identifier for a new account.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Project identifier, assigned from a monotonic counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Client,
    Freelancer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Freelancer => "freelancer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Role::Client),
            "freelancer" => Ok(Role::Freelancer),
            other => Err(format!("unknown role '{other}' (expected client or freelancer)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Open,
    Active,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role-specific part of a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleProfile {
    Client {
        company: String,
    },
    Freelancer {
        skills: Vec<String>,
        portfolio: Vec<String>,
        experience: String,
    },
}

impl RoleProfile {
    pub const DEFAULT_COMPANY: &'static str = "Your Company Name";

    /// Fresh profile for a newly registered user.
    pub fn empty(role: Role) -> Self {
        match role {
            Role::Client => RoleProfile::Client {
                company: Self::DEFAULT_COMPANY.to_string(),
            },
            Role::Freelancer => RoleProfile::Freelancer {
                skills: Vec::new(),
                portfolio: Vec::new(),
                experience: String::new(),
            },
        }
    }
}

/// Pure user model for the presentation layer (no credentials, no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    /// Image reference, usually a `data:` URL.
    pub avatar: Option<String>,
    pub profile: RoleProfile,
}

impl User {
    pub fn role(&self) -> Role {
        match self.profile {
            RoleProfile::Client { .. } => Role::Client,
            RoleProfile::Freelancer { .. } => Role::Freelancer,
        }
    }

    /// Skill list; always empty for clients.
    pub fn skills(&self) -> &[String] {
        match &self.profile {
            RoleProfile::Freelancer { skills, .. } => skills,
            RoleProfile::Client { .. } => &[],
        }
    }
}

/// Registration form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub budget: Option<u64>,
    pub timeline: Option<String>,
    pub client_id: UserId,
    pub freelancer_id: Option<UserId>,
    pub status: ProjectStatus,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Posted project form. `budget` is the raw text of the form field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewProject {
    pub title: Option<String>,
    pub description: String,
    pub category: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub skills: Vec<String>,
}

/// Inclusive budget bounds. A missing bound imposes no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BudgetRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

/// Catalog query; every populated field must match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectFilter {
    pub search_term: Option<String>,
    pub category: Option<String>,
    pub budget_range: Option<BudgetRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub earnings: u64,
}

/// Everything the dashboard page shows for the session user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub user: User,
    pub stats: DashboardStats,
    pub projects: Vec<Project>,
}
