// Copyright (c) 2025 - Cowboy AI, Inc.
//! Vehicle Aggregate
//!
//! Couples one [`Vehicle`] with the maintenance records that belong to it.
//! Any operation that must keep vehicle status and maintenance history
//! consistent goes through here.
//!
//! # Consistency Rules
//!
//! - Every record's `vehicle_id` equals the root vehicle's id
//! - Maintenance cannot be scheduled on a rented vehicle
//! - Scheduling appends the record and enters maintenance as one unit:
//!   all checks run first, so a rejected call changes nothing
//!
//! # Time Handling
//!
//! Operations that depend on the clock have an `_at` variant taking the
//! reference instant explicitly. The plain variants use `Utc::now()`.

use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::maintenance::{MaintenanceHistory, MaintenanceId, MaintenanceType};
use super::vehicle::{Vehicle, VehicleId, VehicleStatus};
use crate::errors::{DomainError, DomainResult};

/// Default trailing window for [`VehicleAggregate::has_recent_maintenance`]
pub const DEFAULT_RECENT_MAINTENANCE_MONTHS: u32 = 6;

/// Decides whether a vehicle must be serviced before it can be rented
pub trait MaintenancePolicy: Send + Sync {
    fn requires_maintenance(&self, aggregate: &VehicleAggregate) -> bool;
}

/// Policy that never blocks a rental
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMaintenanceRequired;

impl MaintenancePolicy for NoMaintenanceRequired {
    fn requires_maintenance(&self, _aggregate: &VehicleAggregate) -> bool {
        false
    }
}

/// Outcome of completing a maintenance
///
/// The stored record keeps its estimated cost; the actual cost is reported
/// here only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceCompletion {
    pub maintenance_id: MaintenanceId,
    pub vehicle_id: VehicleId,
    pub estimated_cost: Decimal,
    pub actual_cost: Decimal,
    pub completed_at: DateTime<Utc>,
}

impl MaintenanceCompletion {
    /// Actual minus estimated cost
    pub fn cost_variance(&self) -> Decimal {
        self.actual_cost - self.estimated_cost
    }
}

/// Vehicle aggregate root
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleAggregate {
    vehicle: Vehicle,
    maintenance_histories: Vec<MaintenanceHistory>,
}

impl VehicleAggregate {
    /// Assemble an aggregate from a vehicle and its records
    ///
    /// Fails with a validation error if any record belongs to another
    /// vehicle.
    pub fn new(
        vehicle: Vehicle,
        maintenance_histories: Vec<MaintenanceHistory>,
    ) -> DomainResult<Self> {
        let vehicle_id = vehicle.id();
        if let Some(foreign) = maintenance_histories
            .iter()
            .find(|m| m.vehicle_id() != vehicle_id)
        {
            return Err(DomainError::validation(
                "maintenance_histories",
                format!(
                    "maintenance {} belongs to vehicle {}, not {}",
                    foreign.id(),
                    foreign.vehicle_id(),
                    vehicle_id
                ),
            ));
        }

        Ok(Self {
            vehicle,
            maintenance_histories,
        })
    }

    pub fn id(&self) -> VehicleId {
        self.vehicle.id()
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn maintenance_histories(&self) -> &[MaintenanceHistory] {
        &self.maintenance_histories
    }

    pub fn maintenance(&self, id: MaintenanceId) -> Option<&MaintenanceHistory> {
        self.maintenance_histories.iter().find(|m| m.id() == id)
    }

    pub fn into_parts(self) -> (Vehicle, Vec<MaintenanceHistory>) {
        (self.vehicle, self.maintenance_histories)
    }

    /// Record a maintenance and send the vehicle to the workshop
    pub fn schedule_maintenance(
        &mut self,
        description: &str,
        estimated_cost: Decimal,
        maintenance_type: MaintenanceType,
        notes: Option<&str>,
    ) -> DomainResult<MaintenanceId> {
        self.schedule_maintenance_at(
            description,
            estimated_cost,
            maintenance_type,
            notes,
            Utc::now(),
        )
    }

    pub fn schedule_maintenance_at(
        &mut self,
        description: &str,
        estimated_cost: Decimal,
        maintenance_type: MaintenanceType,
        notes: Option<&str>,
        at: DateTime<Utc>,
    ) -> DomainResult<MaintenanceId> {
        match self.vehicle.status() {
            VehicleStatus::Rented => {
                return Err(DomainError::conflict(format!(
                    "vehicle {} is rented; maintenance cannot be scheduled",
                    self.vehicle.license_plate()
                )));
            }
            VehicleStatus::InMaintenance => {
                return Err(DomainError::invalid_state(format!(
                    "vehicle {} is already in maintenance",
                    self.vehicle.license_plate()
                )));
            }
            VehicleStatus::Available => {}
        }

        let record = MaintenanceHistory::new_at(
            self.vehicle.id(),
            description,
            estimated_cost,
            maintenance_type,
            notes,
            at,
        )?;

        self.vehicle.send_to_maintenance()?;

        let id = record.id();
        self.maintenance_histories.push(record);
        Ok(id)
    }

    /// Finish a maintenance and make the vehicle available again
    pub fn complete_maintenance(
        &mut self,
        maintenance_id: MaintenanceId,
        actual_cost: Decimal,
        completion_notes: Option<&str>,
    ) -> DomainResult<MaintenanceCompletion> {
        self.complete_maintenance_at(maintenance_id, actual_cost, completion_notes, Utc::now())
    }

    pub fn complete_maintenance_at(
        &mut self,
        maintenance_id: MaintenanceId,
        actual_cost: Decimal,
        completion_notes: Option<&str>,
        at: DateTime<Utc>,
    ) -> DomainResult<MaintenanceCompletion> {
        let index = self
            .maintenance_histories
            .iter()
            .position(|m| m.id() == maintenance_id)
            .ok_or_else(|| DomainError::not_found(MaintenanceHistory::NAME, maintenance_id))?;

        if self.vehicle.status() != VehicleStatus::InMaintenance {
            return Err(DomainError::invalid_state(format!(
                "vehicle {} is not in maintenance",
                self.vehicle.license_plate()
            )));
        }

        if actual_cost < Decimal::ZERO {
            return Err(DomainError::validation(
                "actual_cost",
                format!("actual cost cannot be negative: {}", actual_cost),
            ));
        }

        self.vehicle.complete_maintenance()?;

        let record = &mut self.maintenance_histories[index];
        if let Some(notes) = completion_notes.filter(|n| !n.trim().is_empty()) {
            record.update_notes(notes);
        }

        Ok(MaintenanceCompletion {
            maintenance_id,
            vehicle_id: self.vehicle.id(),
            estimated_cost: record.cost(),
            actual_cost,
            completed_at: at,
        })
    }

    pub fn total_maintenance_cost(&self) -> Decimal {
        self.maintenance_histories.iter().map(|m| m.cost()).sum()
    }

    /// Sum of costs dated within `[start, end]`
    pub fn maintenance_cost_by_period(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Decimal {
        self.maintenance_histories
            .iter()
            .filter(|m| m.falls_within(start, end))
            .map(|m| m.cost())
            .sum()
    }

    /// Whether any maintenance happened in the last `months` months
    pub fn has_recent_maintenance(&self, months: u32) -> bool {
        self.has_recent_maintenance_at(months, Utc::now())
    }

    pub fn has_recent_maintenance_at(&self, months: u32, now: DateTime<Utc>) -> bool {
        match now.checked_sub_months(Months::new(months)) {
            Some(cutoff) => self
                .maintenance_histories
                .iter()
                .any(|m| m.maintenance_date() >= cutoff),
            // window reaches past the representable range
            None => !self.maintenance_histories.is_empty(),
        }
    }

    /// Check that the vehicle may be handed to a customer
    pub fn validate_for_rental(&self) -> DomainResult<()> {
        self.validate_for_rental_with(&NoMaintenanceRequired)
    }

    pub fn validate_for_rental_with(&self, policy: &dyn MaintenancePolicy) -> DomainResult<()> {
        if !self.vehicle.is_available() {
            return Err(DomainError::invalid_state(format!(
                "vehicle {} is {} and cannot be rented",
                self.vehicle.license_plate(),
                self.vehicle.status()
            )));
        }

        if policy.requires_maintenance(self) {
            return Err(DomainError::invalid_state(format!(
                "vehicle {} requires maintenance before rental",
                self.vehicle.license_plate()
            )));
        }

        Ok(())
    }
}
