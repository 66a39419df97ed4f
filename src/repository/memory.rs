// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Repositories
//!
//! A single generic store keyed by typed id, with the entity-specific
//! query contracts implemented on its concrete instantiations. Entities
//! are stored whole, so a user's rented-vehicle set survives a round trip
//! through this store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{
    MaintenanceHistoryRepository, Repository, RepositoryError, RepositoryResult, UserRepository,
    VehicleRepository,
};
use crate::domain::{
    Email, Entity, EntityId, MaintenanceHistory, MaintenanceType, User, UserType, Vehicle,
    VehicleId, VehicleStatus,
};

pub type InMemoryVehicleRepository = InMemoryRepository<Vehicle>;
pub type InMemoryUserRepository = InMemoryRepository<User>;
pub type InMemoryMaintenanceHistoryRepository = InMemoryRepository<MaintenanceHistory>;

/// Map-backed store for one entity type
///
/// Iteration follows id order, which for v7 ids is creation order.
pub struct InMemoryRepository<T> {
    items: RwLock<BTreeMap<EntityId<T>, T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Entity + Clone> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-loaded with `entities`
    pub fn with_entities(entities: impl IntoIterator<Item = T>) -> Self {
        let items = entities.into_iter().map(|e| (e.id(), e)).collect();
        Self {
            items: RwLock::new(items),
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    async fn find(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.items
            .read()
            .await
            .values()
            .filter(|e| predicate(*e))
            .cloned()
            .collect()
    }

    async fn find_one(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.items
            .read()
            .await
            .values()
            .find(|e| predicate(*e))
            .cloned()
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Entity + Clone + Send + Sync + 'static,
{
    async fn get_by_id(&self, id: EntityId<T>) -> RepositoryResult<Option<T>> {
        debug!("Loading {} {}", T::NAME, id);
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<T>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn add(&self, entity: T) -> RepositoryResult<()> {
        let id = entity.id();
        let mut items = self.items.write().await;
        if items.contains_key(&id) {
            return Err(RepositoryError::duplicate(id));
        }

        items.insert(id, entity);
        debug!("Stored {} {}", T::NAME, id);
        Ok(())
    }

    async fn update(&self, entity: T) -> RepositoryResult<()> {
        let id = entity.id();
        let mut items = self.items.write().await;
        match items.get_mut(&id) {
            Some(slot) => {
                *slot = entity;
                debug!("Updated {} {}", T::NAME, id);
                Ok(())
            }
            None => Err(RepositoryError::not_found(id)),
        }
    }

    async fn delete(&self, id: EntityId<T>) -> RepositoryResult<()> {
        match self.items.write().await.remove(&id) {
            Some(_) => {
                info!("Deleted {} {}", T::NAME, id);
                Ok(())
            }
            None => Err(RepositoryError::not_found(id)),
        }
    }

    async fn exists(&self, id: EntityId<T>) -> RepositoryResult<bool> {
        Ok(self.items.read().await.contains_key(&id))
    }
}

#[async_trait]
impl VehicleRepository for InMemoryRepository<Vehicle> {
    async fn get_by_license_plate(&self, plate: &str) -> RepositoryResult<Option<Vehicle>> {
        let plate = Vehicle::normalize_plate(plate);
        Ok(self.find_one(|v| v.license_plate() == plate).await)
    }

    async fn get_by_status(&self, status: VehicleStatus) -> RepositoryResult<Vec<Vehicle>> {
        Ok(self.find(|v| v.status() == status).await)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<User> {
    async fn get_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let email = Email::normalize(email);
        Ok(self.find_one(|u| u.email().as_str() == email).await)
    }

    async fn get_by_document(&self, document: &str) -> RepositoryResult<Option<User>> {
        let document = document.trim();
        Ok(self.find_one(|u| u.document() == document).await)
    }

    async fn get_by_type(&self, user_type: UserType) -> RepositoryResult<Vec<User>> {
        Ok(self.find(|u| u.user_type() == user_type).await)
    }

    async fn get_active(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.find(|u| u.is_active()).await)
    }

    async fn get_by_rented_vehicle(
        &self,
        vehicle_id: VehicleId,
    ) -> RepositoryResult<Option<User>> {
        Ok(self.find_one(|u| u.has_rented(vehicle_id)).await)
    }
}

#[async_trait]
impl MaintenanceHistoryRepository for InMemoryRepository<MaintenanceHistory> {
    async fn get_by_vehicle_id(
        &self,
        vehicle_id: VehicleId,
    ) -> RepositoryResult<Vec<MaintenanceHistory>> {
        Ok(self.find(|m| m.vehicle_id() == vehicle_id).await)
    }

    async fn get_by_type(
        &self,
        maintenance_type: MaintenanceType,
    ) -> RepositoryResult<Vec<MaintenanceHistory>> {
        Ok(self.find(|m| m.maintenance_type() == maintenance_type).await)
    }

    async fn get_by_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<MaintenanceHistory>> {
        Ok(self.find(|m| m.falls_within(start, end)).await)
    }
}
