// Copyright (c) 2025 - Cowboy AI, Inc.
//! Repository Contracts
//!
//! Persistence-agnostic interfaces the application services depend on.
//!
//! # Architecture
//!
//! ```text
//! Service → Repository contract → Storage (in-memory, database, ...)
//!              ↑
//!       load / persist whole entities
//! ```
//!
//! # Requirements
//!
//! Implementations should ensure:
//!
//! - **Atomicity**: each single-entity write succeeds or fails as a unit
//! - **Identity**: `add` refuses an id that is already stored
//! - **Normalization**: plate and email lookups are case-insensitive
//!
//! There is no concurrency token; the last write wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    Entity, EntityId, MaintenanceHistory, MaintenanceType, User, UserType, Vehicle, VehicleId,
    VehicleStatus,
};
use crate::errors::ErrorKind;

pub mod memory;

pub use memory::{
    InMemoryMaintenanceHistoryRepository, InMemoryRepository, InMemoryUserRepository,
    InMemoryVehicleRepository,
};

/// Repository operation result
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Update or delete of an id that is not stored
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Add of an id that is already stored
    #[error("{entity} already exists: {id}")]
    Duplicate { entity: &'static str, id: String },

    /// Underlying storage failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn not_found<T: Entity>(id: EntityId<T>) -> Self {
        RepositoryError::NotFound {
            entity: T::NAME,
            id: id.to_string(),
        }
    }

    pub fn duplicate<T: Entity>(id: EntityId<T>) -> Self {
        RepositoryError::Duplicate {
            entity: T::NAME,
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotFound { .. } => ErrorKind::NotFound,
            RepositoryError::Duplicate { .. } => ErrorKind::Conflict,
            RepositoryError::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Generic CRUD contract over one entity type
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Entity + Clone + Send + Sync + 'static,
{
    async fn get_by_id(&self, id: EntityId<T>) -> RepositoryResult<Option<T>>;

    async fn get_all(&self) -> RepositoryResult<Vec<T>>;

    /// Store a new entity
    ///
    /// Fails with [`RepositoryError::Duplicate`] if the id is taken.
    async fn add(&self, entity: T) -> RepositoryResult<()>;

    /// Replace a stored entity
    ///
    /// Fails with [`RepositoryError::NotFound`] if the id is unknown.
    async fn update(&self, entity: T) -> RepositoryResult<()>;

    /// Remove a stored entity
    ///
    /// Fails with [`RepositoryError::NotFound`] if the id is unknown.
    async fn delete(&self, id: EntityId<T>) -> RepositoryResult<()>;

    async fn exists(&self, id: EntityId<T>) -> RepositoryResult<bool>;
}

/// Vehicle persistence
#[async_trait]
pub trait VehicleRepository: Repository<Vehicle> {
    /// Look up by plate; `plate` is normalized before matching
    async fn get_by_license_plate(&self, plate: &str) -> RepositoryResult<Option<Vehicle>>;

    async fn get_by_status(&self, status: VehicleStatus) -> RepositoryResult<Vec<Vehicle>>;

    async fn get_available(&self) -> RepositoryResult<Vec<Vehicle>> {
        self.get_by_status(VehicleStatus::Available).await
    }

    async fn license_plate_exists(&self, plate: &str) -> RepositoryResult<bool> {
        Ok(self.get_by_license_plate(plate).await?.is_some())
    }
}

/// User persistence
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Look up by email; `email` is normalized before matching
    async fn get_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    async fn get_by_document(&self, document: &str) -> RepositoryResult<Option<User>>;

    async fn get_by_type(&self, user_type: UserType) -> RepositoryResult<Vec<User>>;

    async fn get_active(&self) -> RepositoryResult<Vec<User>>;

    /// The user whose rental set holds `vehicle_id`, if any
    async fn get_by_rented_vehicle(&self, vehicle_id: VehicleId)
        -> RepositoryResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> RepositoryResult<bool> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    async fn document_exists(&self, document: &str) -> RepositoryResult<bool> {
        Ok(self.get_by_document(document).await?.is_some())
    }
}

/// Maintenance record persistence
#[async_trait]
pub trait MaintenanceHistoryRepository: Repository<MaintenanceHistory> {
    async fn get_by_vehicle_id(&self, vehicle_id: VehicleId)
        -> RepositoryResult<Vec<MaintenanceHistory>>;

    async fn get_by_type(
        &self,
        maintenance_type: MaintenanceType,
    ) -> RepositoryResult<Vec<MaintenanceHistory>>;

    /// Records dated within `[start, end]`
    async fn get_by_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<MaintenanceHistory>>;

    async fn total_cost_by_vehicle(&self, vehicle_id: VehicleId) -> RepositoryResult<Decimal> {
        let records = self.get_by_vehicle_id(vehicle_id).await?;
        Ok(records.iter().map(|m| m.cost()).sum())
    }

    async fn total_cost_by_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Decimal> {
        let records = self.get_by_period(start, end).await?;
        Ok(records.iter().map(|m| m.cost()).sum())
    }
}
