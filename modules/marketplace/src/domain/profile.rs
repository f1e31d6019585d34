//! Profile editing: skills, display name and avatar.
//!
//! The session refers to accounts by id, so every edit lands in the one
//! stored record and only the `users` collection has to be persisted.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::contract::model::{RoleProfile, User, UserId};
use crate::domain::error::DomainError;
use crate::domain::events::MarketplaceEvent;
use crate::domain::service::Service;

/// Outcome of an in-place edit: whether anything has to be written.
enum Edit {
    Changed,
    Unchanged,
}

impl Service {
    /// Append `skill` unless it is blank or already listed (exact match).
    #[instrument(name = "marketplace.service.add_skill", skip(self), fields(user_id = %user_id))]
    pub async fn add_skill(&self, user_id: &UserId, skill: &str) -> Result<User, DomainError> {
        let skill = skill.trim();
        if skill.len() > self.config.max_skill_length {
            return Err(DomainError::validation(
                "skill",
                format!("longer than {} characters", self.config.max_skill_length),
            ));
        }

        self.edit_user(user_id, |user| {
            let skills = freelancer_skills(user)?;
            if skill.is_empty() || skills.iter().any(|s| s == skill) {
                debug!("Skill is blank or already present");
                return Ok(Edit::Unchanged);
            }
            skills.push(skill.to_string());
            Ok(Edit::Changed)
        })
        .await
    }

    /// Remove the first exact match of the trimmed `skill`.
    #[instrument(name = "marketplace.service.remove_skill", skip(self), fields(user_id = %user_id))]
    pub async fn remove_skill(&self, user_id: &UserId, skill: &str) -> Result<User, DomainError> {
        let skill = skill.trim();
        self.edit_user(user_id, |user| {
            let skills = freelancer_skills(user)?;
            match skills.iter().position(|s| s == skill) {
                Some(index) => {
                    skills.remove(index);
                    Ok(Edit::Changed)
                }
                None => Ok(Edit::Unchanged),
            }
        })
        .await
    }

    #[instrument(name = "marketplace.service.rename", skip(self), fields(user_id = %user_id))]
    pub async fn rename(&self, user_id: &UserId, name: &str) -> Result<User, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::missing_field("name"));
        }
        if name.len() > self.config.max_name_length {
            return Err(DomainError::validation(
                "name",
                format!("longer than {} characters", self.config.max_name_length),
            ));
        }

        self.edit_user(user_id, |user| {
            if user.name == name {
                return Ok(Edit::Unchanged);
            }
            user.name = name.to_string();
            Ok(Edit::Changed)
        })
        .await
    }

    /// Store an uploaded image inline as a `data:` URL.
    #[instrument(
        name = "marketplace.service.set_avatar",
        skip(self, bytes),
        fields(user_id = %user_id, size = bytes.len())
    )]
    pub async fn set_avatar(
        &self,
        user_id: &UserId,
        bytes: &[u8],
        mime: &str,
    ) -> Result<User, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::missing_field("avatar"));
        }
        if !mime.starts_with("image/") {
            return Err(DomainError::validation(
                "avatar",
                format!("expected an image, got '{mime}'"),
            ));
        }
        if bytes.len() > self.config.max_avatar_bytes {
            return Err(DomainError::validation(
                "avatar",
                format!(
                    "{} bytes exceeds the {} byte limit",
                    bytes.len(),
                    self.config.max_avatar_bytes
                ),
            ));
        }

        let data_url = format!("data:{mime};base64,{}", STANDARD.encode(bytes));
        self.edit_user(user_id, |user| {
            user.avatar = Some(data_url);
            Ok(Edit::Changed)
        })
        .await
    }

    /// Apply `edit` to a copy of the stored record. The copy replaces the
    /// record only after `users` has been written.
    async fn edit_user<F>(&self, user_id: &UserId, edit: F) -> Result<User, DomainError>
    where
        F: FnOnce(&mut User) -> Result<Edit, DomainError>,
    {
        let mut state = self.state().await;
        let mut account = state
            .account(user_id)
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(user_id.clone()))?;

        if let Edit::Unchanged = edit(&mut account.user)? {
            return Ok(account.user);
        }

        let user = account.user.clone();
        let accounts = state.with_account(account);
        self.commit_accounts(&mut state, accounts).await?;

        self.events.publish(&MarketplaceEvent::ProfileUpdated {
            id: user.id.clone(),
            at: Utc::now(),
        });
        info!("Profile updated");
        Ok(user)
    }
}

fn freelancer_skills(user: &mut User) -> Result<&mut Vec<String>, DomainError> {
    match &mut user.profile {
        RoleProfile::Freelancer { skills, .. } => Ok(skills),
        RoleProfile::Client { .. } => Err(DomainError::validation(
            "skills",
            "only freelancers have a skill list",
        )),
    }
}
