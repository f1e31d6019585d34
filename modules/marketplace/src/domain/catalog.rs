//! Project catalog: filtered queries, posting and status transitions.

use chrono::{TimeZone, Utc};
use tracing::{debug, info, instrument};

use crate::contract::model::{
    BudgetRange, NewProject, Project, ProjectFilter, ProjectId, ProjectStatus, Role, UserId,
};
use crate::domain::error::DomainError;
use crate::domain::events::MarketplaceEvent;
use crate::domain::service::Service;

impl BudgetRange {
    /// Bounds from the two halves of a range selector. `max` of `None`, `""`
    /// or `"+"` means unbounded; a bound that does not parse is ignored.
    pub fn from_bounds(min: &str, max: Option<&str>) -> Self {
        let max = max
            .map(str::trim)
            .filter(|m| !m.is_empty() && *m != "+")
            .and_then(parse_leading_int);
        Self {
            min: parse_leading_int(min),
            max,
        }
    }

    /// Parse a selector value: `"500-1000"`, `"5000-+"`, `"5000+"` or `"5000"`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().split_once('-') {
            Some((min, max)) => Self::from_bounds(min, Some(max)),
            None => Self::from_bounds(raw, None),
        }
    }

    /// A missing budget compares as 0.
    pub fn contains(&self, budget: Option<u64>) -> bool {
        let budget = budget.unwrap_or(0);
        self.min.map_or(true, |min| budget >= min) && self.max.map_or(true, |max| budget <= max)
    }
}

/// Integer prefix of `raw` the way a number form field reads it: optional
/// sign, then digits, anything after is ignored. Negative values are `None`.
fn parse_leading_int(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: u64 = rest[..digits_end].parse().ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}

/// Largest amount a number field holds exactly (2^53 - 1).
pub const MAX_BUDGET: u64 = 9_007_199_254_740_991;

/// Budget of a posted form; an unparsable, negative, zero or out-of-range
/// amount means "to be discussed".
pub fn parse_budget(raw: Option<&str>) -> Option<u64> {
    raw.and_then(parse_leading_int)
        .filter(|b| (1..=MAX_BUDGET).contains(b))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// All populated filter fields must match.
pub fn matches_filter(project: &Project, filter: &ProjectFilter) -> bool {
    if let Some(term) = non_blank(filter.search_term.as_deref()) {
        let term = term.to_lowercase();
        if !project.title.to_lowercase().contains(&term)
            && !project.description.to_lowercase().contains(&term)
        {
            return false;
        }
    }
    if let Some(category) = non_blank(filter.category.as_deref()) {
        if project.category.as_deref() != Some(category) {
            return false;
        }
    }
    if let Some(range) = &filter.budget_range {
        if !range.contains(project.budget) {
            return false;
        }
    }
    true
}

/// Matching projects in catalog order.
pub fn filter_projects(projects: &[Project], filter: &ProjectFilter) -> Vec<Project> {
    projects
        .iter()
        .filter(|p| matches_filter(p, filter))
        .cloned()
        .collect()
}

/// Projects where the user is the client or the freelancer.
pub fn projects_involving(projects: &[Project], user_id: &UserId) -> Vec<Project> {
    projects
        .iter()
        .filter(|p| &p.client_id == user_id || p.freelancer_id.as_ref() == Some(user_id))
        .cloned()
        .collect()
}

impl Service {
    #[instrument(name = "marketplace.service.list_projects", skip(self, filter))]
    pub async fn list_projects(&self, filter: &ProjectFilter) -> Vec<Project> {
        let state = self.state().await;
        let found = filter_projects(&state.projects, filter);
        debug!("{} of {} projects match", found.len(), state.projects.len());
        found
    }

    pub async fn get_project(&self, id: ProjectId) -> Result<Project, DomainError> {
        self.state()
            .await
            .project(id)
            .cloned()
            .ok_or_else(|| DomainError::project_not_found(id))
    }

    pub async fn projects_for_user(&self, user_id: &UserId) -> Vec<Project> {
        projects_involving(&self.state().await.projects, user_id)
    }

    #[instrument(
        name = "marketplace.service.create_project",
        skip(self, new_project),
        fields(owner_id = %owner_id)
    )]
    pub async fn create_project(
        &self,
        new_project: NewProject,
        owner_id: &UserId,
    ) -> Result<Project, DomainError> {
        info!("Creating new project");

        let description = new_project.description.trim();
        if description.is_empty() {
            return Err(DomainError::missing_field("description"));
        }

        let mut state = self.state().await;
        if state.user(owner_id).is_none() {
            return Err(DomainError::user_not_found(owner_id.clone()));
        }

        let id = state.next_project_id();
        let project = Project {
            id,
            title: non_blank(new_project.title.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Project {id}")),
            description: description.to_string(),
            category: non_blank(new_project.category.as_deref()).map(str::to_string),
            budget: parse_budget(new_project.budget.as_deref()),
            timeline: non_blank(new_project.timeline.as_deref()).map(str::to_string),
            client_id: owner_id.clone(),
            freelancer_id: None,
            status: ProjectStatus::Open,
            skills: new_project
                .skills
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            created_at: Utc::now(),
        };

        let mut projects = state.projects.clone();
        projects.push(project.clone());
        self.commit_projects(&mut state, projects).await?;

        self.events.publish(&MarketplaceEvent::ProjectPosted {
            id,
            client_id: owner_id.clone(),
            at: project.created_at,
        });

        info!("Successfully created project with id={}", id);
        Ok(project)
    }

    /// open → active, recording the freelancer doing the work.
    #[instrument(
        name = "marketplace.service.assign_project",
        skip(self),
        fields(project_id = %id, freelancer_id = %freelancer_id)
    )]
    pub async fn assign_project(
        &self,
        id: ProjectId,
        freelancer_id: &UserId,
    ) -> Result<Project, DomainError> {
        let mut state = self.state().await;

        let freelancer = state
            .user(freelancer_id)
            .ok_or_else(|| DomainError::user_not_found(freelancer_id.clone()))?;
        if freelancer.role() != Role::Freelancer {
            return Err(DomainError::validation(
                "freelancerId",
                format!("user {freelancer_id} is not a freelancer"),
            ));
        }

        let mut project = state
            .project(id)
            .cloned()
            .ok_or_else(|| DomainError::project_not_found(id))?;
        if project.status != ProjectStatus::Open {
            return Err(DomainError::invalid_transition(
                id,
                project.status,
                ProjectStatus::Active,
            ));
        }
        project.status = ProjectStatus::Active;
        project.freelancer_id = Some(freelancer_id.clone());

        let projects = state.with_project(project.clone());
        self.commit_projects(&mut state, projects).await?;
        self.events.publish(&MarketplaceEvent::ProjectAssigned {
            id,
            freelancer_id: freelancer_id.clone(),
            at: Utc::now(),
        });
        info!("Project assigned");
        Ok(project)
    }

    /// active → completed.
    #[instrument(name = "marketplace.service.complete_project", skip(self), fields(project_id = %id))]
    pub async fn complete_project(&self, id: ProjectId) -> Result<Project, DomainError> {
        let mut state = self.state().await;

        let mut project = state
            .project(id)
            .cloned()
            .ok_or_else(|| DomainError::project_not_found(id))?;
        if project.status != ProjectStatus::Active {
            return Err(DomainError::invalid_transition(
                id,
                project.status,
                ProjectStatus::Completed,
            ));
        }
        project.status = ProjectStatus::Completed;

        let projects = state.with_project(project.clone());
        self.commit_projects(&mut state, projects).await?;
        self.events.publish(&MarketplaceEvent::ProjectCompleted { id, at: Utc::now() });
        info!("Project completed");
        Ok(project)
    }
}

/// The catalog shown on first start.
pub fn demo_projects() -> Vec<Project> {
    let posted = |y, m, d| {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    };
    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    vec![
        Project {
            id: ProjectId(1),
            title: "Build E-commerce Website".into(),
            description: "Need a modern e-commerce website with React and Node.js. Should include product listings, cart, and payment integration.".into(),
            category: Some("web".into()),
            budget: Some(2500),
            timeline: Some("1 month".into()),
            client_id: UserId::new("1001"),
            freelancer_id: None,
            status: ProjectStatus::Open,
            skills: skills(&["React", "Node.js", "MongoDB", "Stripe"]),
            created_at: posted(2024, 1, 15),
        },
        Project {
            id: ProjectId(2),
            title: "Mobile App UI Design".into(),
            description: "Design a beautiful mobile app for a fitness tracker. Need clean, modern design with great UX.".into(),
            category: Some("design".into()),
            budget: Some(800),
            timeline: Some("2 weeks".into()),
            client_id: UserId::new("1002"),
            freelancer_id: None,
            status: ProjectStatus::Open,
            skills: skills(&["Figma", "UI/UX", "Mobile Design", "Adobe XD"]),
            created_at: posted(2024, 1, 20),
        },
        Project {
            id: ProjectId(3),
            title: "Content Writing for Blog".into(),
            description: "Need 10 high-quality blog posts about technology and productivity.".into(),
            category: Some("writing".into()),
            budget: Some(400),
            timeline: Some("3 weeks".into()),
            client_id: UserId::new("1003"),
            freelancer_id: None,
            status: ProjectStatus::Open,
            skills: skills(&["Content Writing", "SEO", "Blog Posts", "Tech Writing"]),
            created_at: posted(2024, 1, 10),
        },
    ]
}
