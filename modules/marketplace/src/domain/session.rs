//! Session manager: registration, login and the single current identity.

use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

use crate::contract::model::{Registration, RoleProfile, User, UserId};
use crate::domain::error::DomainError;
use crate::domain::events::MarketplaceEvent;
use crate::domain::password::{hash_password, verify_password};
use crate::domain::service::Service;
use crate::domain::state::{Account, AppState};

impl Service {
    #[instrument(
        name = "marketplace.service.register",
        skip(self, registration),
        fields(email = %registration.email, role = %registration.role)
    )]
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        info!("Registering new user");

        self.validate_registration(&registration)?;

        let account = Account {
            user: User {
                id: UserId::generate(),
                name: registration.name.trim().to_string(),
                email: registration.email.trim().to_string(),
                created_at: Utc::now(),
                avatar: None,
                profile: RoleProfile::empty(registration.role),
            },
            password_hash: hash_password(&registration.password)?,
        };
        let user = account.user.clone();

        let mut state = self.state().await;
        let previous = state.accounts.clone();
        let mut accounts = previous.clone();
        accounts.push(account);
        self.commit_accounts(&mut state, accounts).await?;

        if let Err(e) = self.start_session(&mut state, &user.id).await {
            // Take the stored append back so a retry registers the user once.
            if let Err(undo) = self.repo.save_accounts(&previous).await {
                error!("Failed to roll back registration: {undo}");
            }
            state.accounts = previous;
            return Err(e);
        }

        self.events.publish(&MarketplaceEvent::UserRegistered {
            id: user.id.clone(),
            at: user.created_at,
        });
        self.publish_logged_in(&user.id);
        info!("Successfully registered user with id={}", user.id);
        Ok(user)
    }

    /// Linear scan for an email match whose password verifies.
    #[instrument(name = "marketplace.service.login", skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let mut state = self.state().await;

        let user = state
            .accounts
            .iter()
            .find(|a| a.user.email == email.trim() && verify_password(password, &a.password_hash))
            .map(|a| a.user.clone())
            .ok_or_else(|| {
                debug!("No account matches the supplied credentials");
                DomainError::InvalidCredentials
            })?;

        self.start_session(&mut state, &user.id).await?;
        self.publish_logged_in(&user.id);
        info!("User logged in");
        Ok(user)
    }

    /// Make `user` the session user. The record must carry an id that names
    /// a stored account; otherwise nothing changes.
    #[instrument(name = "marketplace.service.login_user", skip(self, user), fields(user_id = %user.id))]
    pub async fn login_user(&self, user: &User) -> Result<User, DomainError> {
        if user.id.is_blank() {
            error!("Refusing session for a user record without an id");
            return Err(DomainError::invalid_session("user record has no id"));
        }

        let mut state = self.state().await;
        let stored = state.user(&user.id).cloned().ok_or_else(|| {
            error!("Refusing session for an unknown user");
            DomainError::invalid_session(format!("unknown user id {}", user.id))
        })?;

        self.start_session(&mut state, &stored.id).await?;
        self.publish_logged_in(&stored.id);
        Ok(stored)
    }

    #[instrument(name = "marketplace.service.logout", skip(self))]
    pub async fn logout(&self) -> Result<(), DomainError> {
        let mut state = self.state().await;
        self.repo
            .clear_session()
            .await
            .map_err(|e| DomainError::persistence(e.to_string()))?;

        if let Some(id) = state.session.take() {
            self.events.publish(&MarketplaceEvent::LoggedOut { id, at: Utc::now() });
            info!("User logged out");
        }
        Ok(())
    }

    /// Re-establish the persisted session. A session that is malformed or
    /// names no stored account is discarded.
    #[instrument(name = "marketplace.service.restore_session", skip(self))]
    pub async fn restore_session(&self) -> Option<User> {
        let mut state = self.state().await;
        state.session = None;

        let id = self.repo.load_session().await?;
        if let Some(user) = state.user(&id).cloned() {
            state.session = Some(id);
            debug!(user_id = %user.id, "Session restored");
            return Some(user);
        }

        warn!(user_id = %id, "Discarding session for unknown user");
        if let Err(e) = self.repo.clear_session().await {
            warn!("Failed to clear dangling session: {e}");
        }
        None
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state().await.session_user().cloned()
    }

    /// Id of the session user, or `NotAuthenticated`.
    pub async fn require_session(&self) -> Result<UserId, DomainError> {
        self.state()
            .await
            .session_user()
            .map(|u| u.id.clone())
            .ok_or(DomainError::NotAuthenticated)
    }

    /// The session changes only once it has been stored.
    async fn start_session(&self, state: &mut AppState, id: &UserId) -> Result<(), DomainError> {
        self.repo
            .save_session(id)
            .await
            .map_err(|e| DomainError::persistence(e.to_string()))?;
        state.session = Some(id.clone());
        Ok(())
    }

    fn publish_logged_in(&self, id: &UserId) {
        self.events.publish(&MarketplaceEvent::LoggedIn {
            id: id.clone(),
            at: Utc::now(),
        });
    }

    // --- validation helpers ---

    fn validate_registration(&self, registration: &Registration) -> Result<(), DomainError> {
        if registration.password != registration.confirm_password {
            return Err(DomainError::PasswordMismatch);
        }
        if registration.name.trim().is_empty() {
            return Err(DomainError::missing_field("name"));
        }
        if registration.name.trim().len() > self.config.max_name_length {
            return Err(DomainError::validation(
                "name",
                format!("longer than {} characters", self.config.max_name_length),
            ));
        }
        if registration.email.trim().is_empty() {
            return Err(DomainError::missing_field("email"));
        }
        if registration.password.is_empty() {
            return Err(DomainError::missing_field("password"));
        }
        Ok(())
    }
}
