// Copyright (c) 2025 - Cowboy AI, Inc.
//! User Service
//!
//! Registration, lookup, profile updates and lifecycle of users.
//!
//! # Uniqueness
//!
//! Email (case-insensitive) and document are unique across users. Both are
//! checked here before the repository is touched.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::dto::{CreateUserDto, UpdateUserDto, UserDto};
use super::ServiceResult;
use crate::domain::{Email, Entity, User, UserId, UserType};
use crate::errors::DomainError;
use crate::repository::{Repository, UserRepository};

/// User application service
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new, active user
    ///
    /// # Errors
    /// - Validation for a malformed email, name or document
    /// - Conflict if the email or document is already registered
    async fn create_user(&self, dto: CreateUserDto) -> ServiceResult<UserDto>;

    async fn get_user(&self, id: UserId) -> ServiceResult<Option<UserDto>>;

    async fn get_user_by_email(&self, email: &str) -> ServiceResult<Option<UserDto>>;

    async fn get_user_by_document(&self, document: &str) -> ServiceResult<Option<UserDto>>;

    async fn list_users(&self) -> ServiceResult<Vec<UserDto>>;

    async fn list_active_users(&self) -> ServiceResult<Vec<UserDto>>;

    async fn list_users_by_type(&self, user_type: UserType) -> ServiceResult<Vec<UserDto>>;

    /// Change name and/or email
    ///
    /// An email owned by another user is a Conflict; re-submitting the
    /// user's own email is accepted.
    async fn update_user(&self, id: UserId, dto: UpdateUserDto) -> ServiceResult<UserDto>;

    async fn activate_user(&self, id: UserId) -> ServiceResult<UserDto>;

    /// Fails with InvalidState while the user holds rented vehicles
    async fn deactivate_user(&self, id: UserId) -> ServiceResult<UserDto>;

    /// Fails with Conflict while the user holds rented vehicles
    async fn delete_user(&self, id: UserId) -> ServiceResult<()>;
}

/// [`UserService`] over a [`UserRepository`]
pub struct RepositoryUserService {
    users: Arc<dyn UserRepository>,
}

impl RepositoryUserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    async fn load(&self, id: UserId) -> ServiceResult<User> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(User::NAME, id).into())
    }

    async fn save(&self, user: &User) -> ServiceResult<UserDto> {
        self.users.update(user.clone()).await?;
        Ok(UserDto::from(user))
    }

    fn to_dtos(users: Vec<User>) -> Vec<UserDto> {
        users.iter().map(UserDto::from).collect()
    }
}

#[async_trait]
impl UserService for RepositoryUserService {
    async fn create_user(&self, dto: CreateUserDto) -> ServiceResult<UserDto> {
        let email = Email::new(&dto.email)?;

        if self.users.email_exists(email.as_str()).await? {
            warn!("Rejected user registration: email {} already in use", email);
            return Err(
                DomainError::conflict(format!("email {} is already registered", email)).into(),
            );
        }

        if self.users.document_exists(&dto.document).await? {
            warn!("Rejected user registration: document already in use");
            return Err(DomainError::conflict("document is already registered").into());
        }

        let user = User::new(&dto.name, email, &dto.document, dto.user_type)?;
        self.users.add(user.clone()).await?;

        info!("Registered {} user {}", user.user_type(), user.id());
        Ok(UserDto::from(&user))
    }

    async fn get_user(&self, id: UserId) -> ServiceResult<Option<UserDto>> {
        debug!("Fetching user {}", id);
        Ok(self.users.get_by_id(id).await?.as_ref().map(UserDto::from))
    }

    async fn get_user_by_email(&self, email: &str) -> ServiceResult<Option<UserDto>> {
        Ok(self.users.get_by_email(email).await?.as_ref().map(UserDto::from))
    }

    async fn get_user_by_document(&self, document: &str) -> ServiceResult<Option<UserDto>> {
        Ok(self
            .users
            .get_by_document(document)
            .await?
            .as_ref()
            .map(UserDto::from))
    }

    async fn list_users(&self) -> ServiceResult<Vec<UserDto>> {
        Ok(Self::to_dtos(self.users.get_all().await?))
    }

    async fn list_active_users(&self) -> ServiceResult<Vec<UserDto>> {
        Ok(Self::to_dtos(self.users.get_active().await?))
    }

    async fn list_users_by_type(&self, user_type: UserType) -> ServiceResult<Vec<UserDto>> {
        Ok(Self::to_dtos(self.users.get_by_type(user_type).await?))
    }

    async fn update_user(&self, id: UserId, dto: UpdateUserDto) -> ServiceResult<UserDto> {
        let mut user = self.load(id).await?;

        let email = dto.email.as_deref().map(Email::new).transpose()?;
        if let Some(email) = &email {
            if let Some(owner) = self.users.get_by_email(email.as_str()).await? {
                if owner.id() != id {
                    warn!("Rejected email change for user {}: {} in use", id, email);
                    return Err(DomainError::conflict(format!(
                        "email {} is already registered",
                        email
                    ))
                    .into());
                }
            }
        }

        if let Some(name) = &dto.name {
            user.update_name(name)?;
        }
        if let Some(email) = email {
            user.update_email(email);
        }

        let dto = self.save(&user).await?;
        info!("Updated user {}", id);
        Ok(dto)
    }

    async fn activate_user(&self, id: UserId) -> ServiceResult<UserDto> {
        let mut user = self.load(id).await?;
        user.activate()?;

        let dto = self.save(&user).await?;
        info!("Activated user {}", id);
        Ok(dto)
    }

    async fn deactivate_user(&self, id: UserId) -> ServiceResult<UserDto> {
        let mut user = self.load(id).await?;
        if let Err(e) = user.deactivate() {
            warn!("Rejected deactivation of user {}: {}", id, e);
            return Err(e.into());
        }

        let dto = self.save(&user).await?;
        info!("Deactivated user {}", id);
        Ok(dto)
    }

    async fn delete_user(&self, id: UserId) -> ServiceResult<()> {
        let user = self.load(id).await?;

        let rented = user.rented_vehicles_count();
        if rented > 0 {
            warn!("Rejected deletion of user {}: {} rented vehicle(s)", id, rented);
            return Err(DomainError::conflict(format!(
                "user has {} rented vehicle(s) and cannot be deleted",
                rented
            ))
            .into());
        }

        self.users.delete(id).await?;
        info!("Deleted user {}", id);
        Ok(())
    }
}
