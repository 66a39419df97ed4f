// Copyright (c) 2025 - Cowboy AI, Inc.
//! Vehicle Service
//!
//! Fleet registration and queries, plus every maintenance use case. The
//! maintenance use cases load a [`VehicleAggregate`] so that the vehicle's
//! status and its records change together.
//!
//! # Persistence Order
//!
//! Maintenance writes store the record first and the vehicle second. If
//! the vehicle write fails, the record write is undone before the error is
//! returned. Deletion removes the records first and the vehicle last.
//!
//! # Rentals
//!
//! A vehicle held in a user's rental set is only returned through the
//! rental service. `change_vehicle_status` refuses to make it available.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::dto::{
    CompleteMaintenanceDto, CreateVehicleDto, MaintenanceHistoryDto, ScheduleMaintenanceDto,
    UpdateVehicleDto, VehicleDto,
};
use super::{ServiceError, ServiceResult};
use crate::config::FleetConfig;
use crate::domain::{
    Entity, MaintenanceCompletion, MaintenanceHistory, MaintenanceId, Vehicle, VehicleAggregate,
    VehicleId, VehicleModel, VehicleStatus, DEFAULT_RECENT_MAINTENANCE_MONTHS,
};
use crate::errors::DomainError;
use crate::repository::{
    MaintenanceHistoryRepository, Repository, UserRepository, VehicleRepository,
};

/// Vehicle application service
#[async_trait]
pub trait VehicleService: Send + Sync {
    /// Register a new, available vehicle
    ///
    /// # Errors
    /// - Validation for a blank plate, brand or model, or a year out of range
    /// - Conflict if the plate is already registered
    async fn create_vehicle(&self, dto: CreateVehicleDto) -> ServiceResult<VehicleDto>;

    async fn get_vehicle(&self, id: VehicleId) -> ServiceResult<Option<VehicleDto>>;

    async fn get_vehicle_by_license_plate(&self, plate: &str)
        -> ServiceResult<Option<VehicleDto>>;

    async fn list_vehicles(&self) -> ServiceResult<Vec<VehicleDto>>;

    async fn list_available_vehicles(&self) -> ServiceResult<Vec<VehicleDto>>;

    async fn list_vehicles_by_status(&self, status: VehicleStatus)
        -> ServiceResult<Vec<VehicleDto>>;

    /// Change brand, model and/or year
    async fn update_vehicle(&self, id: VehicleId, dto: UpdateVehicleDto)
        -> ServiceResult<VehicleDto>;

    /// Move the vehicle to `status`
    ///
    /// `Rented` rents and `Available` returns. `InMaintenance` is refused
    /// with a validation error; use [`VehicleService::schedule_maintenance`].
    ///
    /// # Errors
    /// - Conflict when making available a vehicle that a user is renting;
    ///   return it through the rental service instead
    async fn change_vehicle_status(
        &self,
        id: VehicleId,
        status: VehicleStatus,
    ) -> ServiceResult<VehicleDto>;

    /// Remove a vehicle and its maintenance records
    ///
    /// Fails with Conflict while the vehicle is rented.
    async fn delete_vehicle(&self, id: VehicleId) -> ServiceResult<()>;

    async fn schedule_maintenance(
        &self,
        id: VehicleId,
        dto: ScheduleMaintenanceDto,
    ) -> ServiceResult<MaintenanceHistoryDto>;

    async fn complete_maintenance(
        &self,
        id: VehicleId,
        dto: CompleteMaintenanceDto,
    ) -> ServiceResult<MaintenanceCompletion>;

    async fn get_maintenance_history(&self, id: VehicleId)
        -> ServiceResult<Vec<MaintenanceHistoryDto>>;

    async fn get_total_maintenance_cost(&self, id: VehicleId) -> ServiceResult<Decimal>;

    /// Cost of maintenance dated within `[start, end]`
    async fn get_maintenance_cost_by_period(
        &self,
        id: VehicleId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Decimal>;

    /// Whether the vehicle had maintenance within the configured window
    async fn has_recent_maintenance(&self, id: VehicleId) -> ServiceResult<bool>;
}

/// [`VehicleService`] over vehicle, maintenance and user repositories
///
/// Users are only read, to find who holds a rented vehicle.
pub struct RepositoryVehicleService {
    vehicles: Arc<dyn VehicleRepository>,
    maintenance: Arc<dyn MaintenanceHistoryRepository>,
    users: Arc<dyn UserRepository>,
    recent_maintenance_months: u32,
}

impl RepositoryVehicleService {
    pub fn new(
        vehicles: Arc<dyn VehicleRepository>,
        maintenance: Arc<dyn MaintenanceHistoryRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            vehicles,
            maintenance,
            users,
            recent_maintenance_months: DEFAULT_RECENT_MAINTENANCE_MONTHS,
        }
    }

    /// Apply settings from `config`
    pub fn with_config(mut self, config: &FleetConfig) -> Self {
        self.recent_maintenance_months = config.recent_maintenance_months;
        self
    }

    async fn load(&self, id: VehicleId) -> ServiceResult<Vehicle> {
        self.vehicles
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(Vehicle::NAME, id).into())
    }

    async fn load_aggregate(&self, id: VehicleId) -> ServiceResult<VehicleAggregate> {
        let vehicle = self.load(id).await?;
        let records = self.maintenance.get_by_vehicle_id(id).await?;
        Ok(VehicleAggregate::new(vehicle, records)?)
    }

    async fn save(&self, vehicle: Vehicle) -> ServiceResult<VehicleDto> {
        let dto = VehicleDto::from(&vehicle);
        self.vehicles.update(vehicle).await?;
        Ok(dto)
    }

    /// Persist the vehicle, applying `undo` to the maintenance store if
    /// that fails
    async fn save_vehicle_or_undo(&self, vehicle: Vehicle, undo: Undo) -> ServiceResult<()> {
        let id = vehicle.id();
        let err = match self.vehicles.update(vehicle).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        warn!("Vehicle {} write failed, undoing maintenance write: {}", id, err);
        let undone = match undo {
            Undo::Remove(record_id) => self.maintenance.delete(record_id).await,
            Undo::Restore(previous) => self.maintenance.update(previous).await,
        };
        if let Err(e) = undone {
            error!("Could not undo maintenance write for vehicle {}: {}", id, e);
        }

        Err(ServiceError::from(err))
    }

    fn to_dtos(vehicles: Vec<Vehicle>) -> Vec<VehicleDto> {
        vehicles.iter().map(VehicleDto::from).collect()
    }
}

/// Compensation for a maintenance record write
enum Undo {
    Remove(MaintenanceId),
    Restore(MaintenanceHistory),
}

#[async_trait]
impl VehicleService for RepositoryVehicleService {
    async fn create_vehicle(&self, dto: CreateVehicleDto) -> ServiceResult<VehicleDto> {
        let model = VehicleModel::new(&dto.brand, &dto.model)?;
        let vehicle = Vehicle::new(&dto.license_plate, model, dto.year)?;

        if self.vehicles.license_plate_exists(vehicle.license_plate()).await? {
            warn!("Rejected vehicle registration: plate {} in use", vehicle.license_plate());
            return Err(DomainError::conflict(format!(
                "license plate {} is already registered",
                vehicle.license_plate()
            ))
            .into());
        }

        let created = VehicleDto::from(&vehicle);
        self.vehicles.add(vehicle).await?;

        info!("Registered vehicle {} ({})", created.license_plate, created.id);
        Ok(created)
    }

    async fn get_vehicle(&self, id: VehicleId) -> ServiceResult<Option<VehicleDto>> {
        debug!("Fetching vehicle {}", id);
        Ok(self.vehicles.get_by_id(id).await?.as_ref().map(VehicleDto::from))
    }

    async fn get_vehicle_by_license_plate(
        &self,
        plate: &str,
    ) -> ServiceResult<Option<VehicleDto>> {
        Ok(self
            .vehicles
            .get_by_license_plate(plate)
            .await?
            .as_ref()
            .map(VehicleDto::from))
    }

    async fn list_vehicles(&self) -> ServiceResult<Vec<VehicleDto>> {
        Ok(Self::to_dtos(self.vehicles.get_all().await?))
    }

    async fn list_available_vehicles(&self) -> ServiceResult<Vec<VehicleDto>> {
        Ok(Self::to_dtos(self.vehicles.get_available().await?))
    }

    async fn list_vehicles_by_status(
        &self,
        status: VehicleStatus,
    ) -> ServiceResult<Vec<VehicleDto>> {
        Ok(Self::to_dtos(self.vehicles.get_by_status(status).await?))
    }

    async fn update_vehicle(
        &self,
        id: VehicleId,
        dto: UpdateVehicleDto,
    ) -> ServiceResult<VehicleDto> {
        let mut vehicle = self.load(id).await?;

        let model = if dto.brand.is_some() || dto.model.is_some() {
            let current = vehicle.model();
            Some(VehicleModel::new(
                dto.brand.as_deref().unwrap_or(current.brand()),
                dto.model.as_deref().unwrap_or(current.model()),
            )?)
        } else {
            None
        };

        vehicle.update_details(model, dto.year)?;

        let updated = self.save(vehicle).await?;
        info!("Updated vehicle {}", id);
        Ok(updated)
    }

    async fn change_vehicle_status(
        &self,
        id: VehicleId,
        status: VehicleStatus,
    ) -> ServiceResult<VehicleDto> {
        let mut vehicle = self.load(id).await?;

        match status {
            VehicleStatus::Rented => vehicle.rent()?,
            VehicleStatus::Available => {
                if let Some(renter) = self.users.get_by_rented_vehicle(id).await? {
                    warn!(
                        "Rejected status change: vehicle {} is rented by user {}",
                        id,
                        renter.id()
                    );
                    return Err(DomainError::conflict(format!(
                        "vehicle {} is rented by user {}; return it through the rental service",
                        vehicle.license_plate(),
                        renter.id()
                    ))
                    .into());
                }
                vehicle.return_from_rental()?
            }
            VehicleStatus::InMaintenance => {
                return Err(DomainError::validation(
                    "status",
                    "maintenance must be scheduled through the maintenance operations",
                )
                .into());
            }
        }

        let updated = self.save(vehicle).await?;
        info!("Vehicle {} is now {}", id, status);
        Ok(updated)
    }

    async fn delete_vehicle(&self, id: VehicleId) -> ServiceResult<()> {
        let vehicle = self.load(id).await?;

        if vehicle.status() == VehicleStatus::Rented {
            warn!("Rejected deletion of rented vehicle {}", id);
            return Err(DomainError::conflict(format!(
                "vehicle {} is rented and cannot be deleted",
                vehicle.license_plate()
            ))
            .into());
        }

        let records = self.maintenance.get_by_vehicle_id(id).await?;
        for record in &records {
            self.maintenance.delete(record.id()).await?;
        }

        if let Err(e) = self.vehicles.delete(id).await {
            error!(
                "Vehicle {} not deleted after removing its {} maintenance record(s): {}",
                id,
                records.len(),
                e
            );
            return Err(e.into());
        }

        info!("Deleted vehicle {}", id);
        Ok(())
    }

    async fn schedule_maintenance(
        &self,
        id: VehicleId,
        dto: ScheduleMaintenanceDto,
    ) -> ServiceResult<MaintenanceHistoryDto> {
        let mut aggregate = self.load_aggregate(id).await?;

        let maintenance_id = match aggregate.schedule_maintenance(
            &dto.description,
            dto.estimated_cost,
            dto.maintenance_type,
            dto.notes.as_deref(),
        ) {
            Ok(maintenance_id) => maintenance_id,
            Err(e) => {
                warn!("Rejected maintenance for vehicle {}: {}", id, e);
                return Err(e.into());
            }
        };

        let (vehicle, records) = aggregate.into_parts();
        let record = records
            .into_iter()
            .find(|m| m.id() == maintenance_id)
            .ok_or_else(|| DomainError::not_found(MaintenanceHistory::NAME, maintenance_id))?;
        let scheduled = MaintenanceHistoryDto::from(&record);

        self.maintenance.add(record).await?;
        self.save_vehicle_or_undo(vehicle, Undo::Remove(maintenance_id))
            .await?;

        info!(
            "Scheduled {} maintenance {} for vehicle {}",
            scheduled.maintenance_type, maintenance_id, id
        );
        Ok(scheduled)
    }

    async fn complete_maintenance(
        &self,
        id: VehicleId,
        dto: CompleteMaintenanceDto,
    ) -> ServiceResult<MaintenanceCompletion> {
        let mut aggregate = self.load_aggregate(id).await?;
        let previous = aggregate.maintenance(dto.maintenance_id).cloned();

        let completion = match aggregate.complete_maintenance(
            dto.maintenance_id,
            dto.actual_cost,
            dto.completion_notes.as_deref(),
        ) {
            Ok(completion) => completion,
            Err(e) => {
                warn!("Rejected maintenance completion for vehicle {}: {}", id, e);
                return Err(e.into());
            }
        };

        let (vehicle, records) = aggregate.into_parts();
        let (record, previous) = records
            .into_iter()
            .find(|m| m.id() == dto.maintenance_id)
            .zip(previous)
            .ok_or_else(|| DomainError::not_found(MaintenanceHistory::NAME, dto.maintenance_id))?;

        self.maintenance.update(record).await?;
        self.save_vehicle_or_undo(vehicle, Undo::Restore(previous))
            .await?;

        info!(
            "Completed maintenance {} for vehicle {} (estimated {}, actual {})",
            completion.maintenance_id, id, completion.estimated_cost, completion.actual_cost
        );
        Ok(completion)
    }

    async fn get_maintenance_history(
        &self,
        id: VehicleId,
    ) -> ServiceResult<Vec<MaintenanceHistoryDto>> {
        let aggregate = self.load_aggregate(id).await?;
        Ok(aggregate
            .maintenance_histories()
            .iter()
            .map(MaintenanceHistoryDto::from)
            .collect())
    }

    async fn get_total_maintenance_cost(&self, id: VehicleId) -> ServiceResult<Decimal> {
        Ok(self.load_aggregate(id).await?.total_maintenance_cost())
    }

    async fn get_maintenance_cost_by_period(
        &self,
        id: VehicleId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Decimal> {
        Ok(self
            .load_aggregate(id)
            .await?
            .maintenance_cost_by_period(start, end))
    }

    async fn has_recent_maintenance(&self, id: VehicleId) -> ServiceResult<bool> {
        Ok(self
            .load_aggregate(id)
            .await?
            .has_recent_maintenance(self.recent_maintenance_months))
    }
}
