// Copyright (c) 2025 - Cowboy AI, Inc.
//! Rental Service
//!
//! Hands vehicles to users and takes them back. Renting loads the vehicle
//! as a [`VehicleAggregate`] so the [`MaintenancePolicy`] can veto it.
//!
//! # Transaction Semantics
//!
//! 1. Load user and vehicle (unknown ids fail with `NotFound`)
//! 2. Validate the vehicle for rental (rent only)
//! 3. `User::rent_vehicle` / `User::return_vehicle`
//! 4. Persist the vehicle, then the user; a failed user write restores the
//!    vehicle

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::dto::VehicleDto;
use super::{ServiceError, ServiceResult};
use crate::domain::{
    Entity, MaintenancePolicy, NoMaintenanceRequired, User, UserId, Vehicle, VehicleAggregate,
    VehicleId,
};
use crate::errors::DomainError;
use crate::repository::{
    MaintenanceHistoryRepository, Repository, UserRepository, VehicleRepository,
};

/// Rental application service
#[async_trait]
pub trait RentalService: Send + Sync {
    /// Rent `vehicle_id` to `user_id`
    ///
    /// # Errors
    /// - NotFound for an unknown user or vehicle
    /// - InvalidState if the user may not rent, the vehicle is not
    ///   available, or the maintenance policy requires a service first
    async fn rent_vehicle(&self, user_id: UserId, vehicle_id: VehicleId)
        -> ServiceResult<VehicleDto>;

    /// Return a vehicle previously rented by `user_id`
    async fn return_vehicle(
        &self,
        user_id: UserId,
        vehicle_id: VehicleId,
    ) -> ServiceResult<VehicleDto>;
}

/// [`RentalService`] over user, vehicle and maintenance repositories
pub struct RepositoryRentalService {
    users: Arc<dyn UserRepository>,
    vehicles: Arc<dyn VehicleRepository>,
    maintenance: Arc<dyn MaintenanceHistoryRepository>,
    policy: Arc<dyn MaintenancePolicy>,
}

impl RepositoryRentalService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        vehicles: Arc<dyn VehicleRepository>,
        maintenance: Arc<dyn MaintenanceHistoryRepository>,
    ) -> Self {
        Self {
            users,
            vehicles,
            maintenance,
            policy: Arc::new(NoMaintenanceRequired),
        }
    }

    /// Replace the maintenance policy consulted before each rental
    pub fn with_policy(mut self, policy: Arc<dyn MaintenancePolicy>) -> Self {
        self.policy = policy;
        self
    }

    async fn load_user(&self, id: UserId) -> ServiceResult<User> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(User::NAME, id).into())
    }

    async fn load_vehicle(&self, id: VehicleId) -> ServiceResult<Vehicle> {
        self.vehicles
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(Vehicle::NAME, id).into())
    }

    /// Write both entities; `original` is written back if the user write fails
    async fn persist(&self, user: User, vehicle: Vehicle, original: Vehicle) -> ServiceResult<()> {
        self.vehicles.update(vehicle).await?;

        if let Err(e) = self.users.update(user).await {
            warn!("User write failed, restoring vehicle {}: {}", original.id(), e);
            let vehicle_id = original.id();
            if let Err(undo) = self.vehicles.update(original).await {
                error!("Could not restore vehicle {}: {}", vehicle_id, undo);
            }
            return Err(ServiceError::from(e));
        }

        Ok(())
    }
}

#[async_trait]
impl RentalService for RepositoryRentalService {
    async fn rent_vehicle(
        &self,
        user_id: UserId,
        vehicle_id: VehicleId,
    ) -> ServiceResult<VehicleDto> {
        let mut user = self.load_user(user_id).await?;
        if !user.can_rent_vehicles() {
            warn!("Rejected rental: user {} cannot rent vehicles", user_id);
            return Err(DomainError::invalid_state(format!(
                "{} user {} cannot rent vehicles",
                if user.is_active() { "non-customer" } else { "inactive" },
                user_id
            ))
            .into());
        }

        let vehicle = self.load_vehicle(vehicle_id).await?;
        let records = self.maintenance.get_by_vehicle_id(vehicle_id).await?;
        let aggregate = VehicleAggregate::new(vehicle, records)?;
        if let Err(e) = aggregate.validate_for_rental_with(self.policy.as_ref()) {
            warn!("Rejected rental of vehicle {}: {}", vehicle_id, e);
            return Err(e.into());
        }

        let (mut vehicle, _) = aggregate.into_parts();
        let original = vehicle.clone();
        user.rent_vehicle(&mut vehicle)?;

        let rented = VehicleDto::from(&vehicle);
        self.persist(user, vehicle, original).await?;

        info!("Vehicle {} rented to user {}", vehicle_id, user_id);
        Ok(rented)
    }

    async fn return_vehicle(
        &self,
        user_id: UserId,
        vehicle_id: VehicleId,
    ) -> ServiceResult<VehicleDto> {
        let mut user = self.load_user(user_id).await?;
        let mut vehicle = self.load_vehicle(vehicle_id).await?;
        let original = vehicle.clone();

        if let Err(e) = user.return_vehicle(&mut vehicle) {
            warn!("Rejected return of vehicle {} by user {}: {}", vehicle_id, user_id, e);
            return Err(e.into());
        }

        let returned = VehicleDto::from(&vehicle);
        self.persist(user, vehicle, original).await?;

        info!("Vehicle {} returned by user {}", vehicle_id, user_id);
        Ok(returned)
    }
}
