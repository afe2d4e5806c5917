//! User accounts, authentication and the login session.

use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::auth;
use crate::domain::authorization_service::{Action, AuthorizationService};
use crate::domain::commands::users::{
    AssignClubCommand, AuthenticateCommand, AuthenticateResult, CreateUserCommand,
    UpdateUserCommand,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::mappers::UserMapper;
use crate::domain::models::user::{User as DomainUser, UserRole};
use crate::domain::session::{Session, SessionState};
use crate::storage::traits::{ClubStore, UserStore};

/// Service for managing user accounts in the club management system
#[derive(Clone)]
pub struct UserService {
    user_store: Arc<dyn UserStore>,
    club_store: Arc<dyn ClubStore>,
    authorization: AuthorizationService,
    session: SessionState,
}

impl UserService {
    /// Create a new UserService
    pub fn new(
        user_store: Arc<dyn UserStore>,
        club_store: Arc<dyn ClubStore>,
        authorization: AuthorizationService,
        session: SessionState,
    ) -> Self {
        Self {
            user_store,
            club_store,
            authorization,
            session,
        }
    }

    /// Authenticate by email and password and install the login session.
    ///
    /// Unknown email, wrong password and deactivated accounts all fail with
    /// the same error so a caller cannot tell which accounts exist.
    pub fn authenticate(&self, command: AuthenticateCommand) -> DomainResult<AuthenticateResult> {
        info!("Authenticating user: email={}", command.email);

        let user = self
            .user_store
            .get_user_by_email(&command.email)
            .map_err(|e| DomainError::data_integrity("authenticate", e))?;

        let user = match user {
            Some(user) => user,
            None => {
                warn!("Login failed: unknown email {}", command.email);
                return Err(DomainError::InvalidCredentials);
            }
        };

        if !user.active {
            warn!("Login failed: account {} is deactivated", user.id);
            return Err(DomainError::InvalidCredentials);
        }

        let verified = auth::verify_password(&command.password, &user.password_hash)
            .map_err(|e| {
                DomainError::data_integrity(
                    "authenticate",
                    anyhow::anyhow!("stored password hash is unreadable: {}", e),
                )
            })?;
        if !verified {
            warn!("Login failed: wrong password for {}", user.id);
            return Err(DomainError::InvalidCredentials);
        }

        let session = Session {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            logged_in_at: Utc::now(),
        };
        if let Some(previous) = self.session.install(session.clone()) {
            debug!("Replaced existing session for {}", previous.user_id);
        }

        info!("Authenticated user: {} ({})", user.id, user.role);

        Ok(AuthenticateResult {
            user: UserMapper::to_dto(user),
            session: UserMapper::session_to_dto(session),
        })
    }

    /// Create a new user account
    pub fn create_user(
        &self,
        actor: &Session,
        command: CreateUserCommand,
    ) -> DomainResult<shared::User> {
        info!("Creating user: email={}, role={}", command.email, command.role);

        self.authorization.ensure(actor.role, Action::CreateUser)?;

        self.validate_full_name(&command.full_name)?;
        self.validate_email(&command.email)?;
        self.validate_password(&command.password)?;

        let existing = self
            .user_store
            .get_user_by_email(&command.email)
            .map_err(|e| DomainError::data_integrity("create_user", e))?;
        if existing.is_some() {
            return Err(DomainError::UserAlreadyExists {
                email: command.email,
            });
        }

        let password_hash = auth::hash_password(&command.password).map_err(|e| {
            DomainError::data_integrity(
                "create_user",
                anyhow::anyhow!("password hashing failed: {}", e),
            )
        })?;

        let user = DomainUser {
            id: DomainUser::generate_id(),
            full_name: command.full_name.trim().to_string(),
            email: command.email,
            student_id: command.student_id,
            role: command.role,
            password_hash,
            joined_at: Utc::now(),
            active: true,
            club_id: None,
        };

        self.user_store
            .store_user(&user)
            .map_err(|e| DomainError::data_integrity("create_user", e))?;

        info!("Created user: {} with ID: {}", user.email, user.id);

        Ok(UserMapper::to_dto(user))
    }

    /// Update an existing user account. Fields left as None stay unchanged.
    pub fn update_user(
        &self,
        actor: &Session,
        command: UpdateUserCommand,
    ) -> DomainResult<shared::User> {
        info!("Updating user: {}", command.user_id);

        self.authorization.ensure(actor.role, Action::UpdateUser)?;

        if let Some(ref full_name) = command.full_name {
            self.validate_full_name(full_name)?;
        }
        if let Some(ref email) = command.email {
            self.validate_email(email)?;
        }
        if let Some(ref password) = command.password {
            self.validate_password(password)?;
        }

        let mut user = self
            .user_store
            .get_user(&command.user_id)
            .map_err(|e| DomainError::data_integrity("update_user", e))?
            .ok_or_else(|| DomainError::UserNotFound {
                user_id: command.user_id.clone(),
            })?;

        if let Some(email) = command.email {
            let existing = self
                .user_store
                .get_user_by_email(&email)
                .map_err(|e| DomainError::data_integrity("update_user", e))?;
            if let Some(existing) = existing {
                if existing.id != user.id {
                    return Err(DomainError::UserAlreadyExists { email });
                }
            }
            user.email = email;
        }
        if let Some(full_name) = command.full_name {
            user.full_name = full_name.trim().to_string();
        }
        if let Some(student_id) = command.student_id {
            user.student_id = student_id;
        }
        if let Some(password) = command.password {
            user.password_hash = auth::hash_password(&password).map_err(|e| {
                DomainError::data_integrity(
                    "update_user",
                    anyhow::anyhow!("password hashing failed: {}", e),
                )
            })?;
        }

        self.user_store
            .update_user(&user)
            .map_err(|e| DomainError::data_integrity("update_user", e))?;

        info!("Updated user: {}", user.id);

        Ok(UserMapper::to_dto(user))
    }

    /// Activate or deactivate a user account.
    ///
    /// Deactivation takes effect at the next login; an already-installed
    /// session is not revoked here.
    pub fn set_active(&self, actor: &Session, user_id: &str, active: bool) -> DomainResult<()> {
        info!("Setting user {} active={}", user_id, active);

        self.authorization.ensure(actor.role, Action::SetUserActive)?;

        let mut user = self
            .user_store
            .get_user(user_id)
            .map_err(|e| DomainError::data_integrity("set_active", e))?
            .ok_or_else(|| DomainError::UserNotFound {
                user_id: user_id.to_string(),
            })?;

        user.active = active;

        self.user_store
            .update_user(&user)
            .map_err(|e| DomainError::data_integrity("set_active", e))?;

        info!(
            "User {} is now {}",
            user.id,
            if active { "active" } else { "inactive" }
        );

        Ok(())
    }

    /// Move a user into a club or clear the affiliation.
    ///
    /// Clearing the affiliation also demotes any leadership position back
    /// to Member; leadership is always held within a club.
    pub fn assign_club(
        &self,
        actor: &Session,
        command: AssignClubCommand,
    ) -> DomainResult<shared::User> {
        info!(
            "Assigning user {} to club {:?}",
            command.user_id, command.club_id
        );

        self.authorization
            .ensure(actor.role, Action::AssignClubMembership)?;

        let mut user = self
            .user_store
            .get_user(&command.user_id)
            .map_err(|e| DomainError::data_integrity("assign_club", e))?
            .ok_or_else(|| DomainError::UserNotFound {
                user_id: command.user_id.clone(),
            })?;

        match command.club_id {
            Some(club_id) => {
                let club = self
                    .club_store
                    .get_club(&club_id)
                    .map_err(|e| DomainError::data_integrity("assign_club", e))?
                    .ok_or_else(|| DomainError::ClubNotFound {
                        club_id: club_id.clone(),
                    })?;
                if !club.active {
                    return Err(DomainError::ClubInactive { club_id: club.id });
                }
                user.club_id = Some(club.id);
            }
            None => {
                user.club_id = None;
                if matches!(
                    user.role,
                    UserRole::TeamLeader | UserRole::ViceChairman | UserRole::Chairman
                ) {
                    debug!("Demoting {} from {} to Member", user.id, user.role);
                    user.role = UserRole::Member;
                }
            }
        }

        self.user_store
            .update_user(&user)
            .map_err(|e| DomainError::data_integrity("assign_club", e))?;

        info!("User {} now belongs to {:?}", user.id, user.club_id);

        Ok(UserMapper::to_dto(user))
    }

    /// The user behind the installed session, if anyone is logged in.
    pub fn current_user(&self) -> DomainResult<Option<shared::User>> {
        let session = match self.session.current() {
            Some(session) => session,
            None => return Ok(None),
        };

        let user = self
            .user_store
            .get_user(&session.user_id)
            .map_err(|e| DomainError::data_integrity("current_user", e))?;

        if user.is_none() {
            warn!("Session refers to unknown user {}", session.user_id);
        }

        Ok(user.map(UserMapper::to_dto))
    }

    /// Clear the login session. Logging out twice is not an error.
    pub fn logout(&self) -> DomainResult<()> {
        match self.session.clear() {
            Some(session) => info!("Logged out user: {}", session.user_id),
            None => debug!("Logout requested with no session installed"),
        }
        Ok(())
    }

    /// Get a user by ID
    pub fn get_user(&self, user_id: &str) -> DomainResult<shared::User> {
        debug!("Getting user: {}", user_id);

        let user = self
            .user_store
            .get_user(user_id)
            .map_err(|e| DomainError::data_integrity("get_user", e))?
            .ok_or_else(|| DomainError::UserNotFound {
                user_id: user_id.to_string(),
            })?;

        Ok(UserMapper::to_dto(user))
    }

    /// Get a user by email, compared case-insensitively
    pub fn get_user_by_email(&self, email: &str) -> DomainResult<shared::User> {
        debug!("Getting user by email: {}", email);

        let user = self
            .user_store
            .get_user_by_email(email)
            .map_err(|e| DomainError::data_integrity("get_user_by_email", e))?
            .ok_or_else(|| DomainError::UserNotFound {
                user_id: email.to_string(),
            })?;

        Ok(UserMapper::to_dto(user))
    }

    /// List all users ordered by email
    pub fn list_users(&self) -> DomainResult<Vec<shared::User>> {
        debug!("Listing all users");

        let users = self
            .user_store
            .list_users()
            .map_err(|e| DomainError::data_integrity("list_users", e))?;

        Ok(users.into_iter().map(UserMapper::to_dto).collect())
    }

    /// Validate a full name
    fn validate_full_name(&self, full_name: &str) -> DomainResult<()> {
        if full_name.trim().is_empty() {
            return Err(DomainError::validation_failed(
                "full_name",
                "must not be empty",
            ));
        }
        if full_name.len() > 100 {
            return Err(DomainError::validation_failed(
                "full_name",
                "must not exceed 100 characters",
            ));
        }
        Ok(())
    }

    /// Validate the shape of an email address
    fn validate_email(&self, email: &str) -> DomainResult<()> {
        match email.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(())
            }
            _ => Err(DomainError::validation_failed(
                "email",
                "must look like local@domain",
            )),
        }
    }

    /// Validate a plaintext password
    fn validate_password(&self, password: &str) -> DomainResult<()> {
        if password.len() < 8 {
            return Err(DomainError::validation_failed(
                "password",
                "must be at least 8 characters",
            ));
        }
        Ok(())
    }
}
