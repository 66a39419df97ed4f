// Copyright (c) 2025 - Cowboy AI, Inc.
//! Vehicle Entity
//!
//! A rentable vehicle with a guarded status lifecycle. Status only changes
//! through the named operations below, each of which runs the
//! [`VehicleStatus`] state machine and stamps `updated_at` on success.
//!
//! # Invariants
//! - License plate is non-blank and stored upper-case
//! - 1900 ≤ year ≤ current year + 1
//! - Status changes only via `rent`, `return_from_rental`,
//!   `send_to_maintenance` and `complete_maintenance`

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::Entity;
use super::ids::EntityId;
use super::VehicleModel;
use crate::errors::{DomainError, DomainResult};
use crate::state_machine::{StateMachine, VehicleCommand};

/// Identity of a vehicle
pub type VehicleId = EntityId<Vehicle>;

/// Vehicle lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    /// Ready to be rented
    Available,

    /// Currently rented by a user
    Rented,

    /// In the workshop
    InMaintenance,
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::InMaintenance => "in_maintenance",
        };
        write!(f, "{}", name)
    }
}

/// Vehicle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: VehicleId,
    license_plate: String,
    model: VehicleModel,
    year: i32,
    status: VehicleStatus,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    updated_at: Option<DateTime<Utc>>,
}

/// Stored fields of a vehicle, used by persistence to rebuild one
///
/// [`Vehicle::rehydrate`] trusts these values as-is; it is not a substitute
/// for [`Vehicle::new`].
#[derive(Debug, Clone)]
pub struct VehicleParts {
    pub id: VehicleId,
    pub license_plate: String,
    pub model: VehicleModel,
    pub year: i32,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Oldest accepted model year
    pub const MIN_YEAR: i32 = 1900;

    /// Create a new, available vehicle with validation
    pub fn new(
        license_plate: impl AsRef<str>,
        model: VehicleModel,
        year: i32,
    ) -> DomainResult<Self> {
        let license_plate = Self::normalize_plate(license_plate.as_ref());
        if license_plate.is_empty() {
            return Err(DomainError::validation(
                "license_plate",
                "license plate cannot be empty",
            ));
        }

        Self::validate_year(year)?;

        Ok(Self {
            id: VehicleId::new(),
            license_plate,
            model,
            year,
            status: VehicleStatus::Available,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Rebuild a vehicle from stored fields without validation
    pub fn rehydrate(parts: VehicleParts) -> Self {
        Self {
            id: parts.id,
            license_plate: parts.license_plate,
            model: parts.model,
            year: parts.year,
            status: parts.status,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        }
    }

    /// Canonical plate form used for storage and lookups
    pub fn normalize_plate(plate: &str) -> String {
        plate.trim().to_uppercase()
    }

    /// Latest accepted model year (next year's models are sold early)
    pub fn max_year() -> i32 {
        Utc::now().year() + 1
    }

    fn validate_year(year: i32) -> DomainResult<()> {
        let max = Self::max_year();
        if year < Self::MIN_YEAR || year > max {
            return Err(DomainError::validation(
                "year",
                format!("year {} must be between {} and {}", year, Self::MIN_YEAR, max),
            ));
        }
        Ok(())
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    pub fn model(&self) -> &VehicleModel {
        &self.model
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn status(&self) -> VehicleStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }

    /// Available → Rented
    pub fn rent(&mut self) -> DomainResult<()> {
        self.apply(VehicleCommand::Rent)
    }

    /// Rented → Available
    pub fn return_from_rental(&mut self) -> DomainResult<()> {
        self.apply(VehicleCommand::Return)
    }

    /// Any state except InMaintenance → InMaintenance
    pub fn send_to_maintenance(&mut self) -> DomainResult<()> {
        self.apply(VehicleCommand::SendToMaintenance)
    }

    /// InMaintenance → Available
    pub fn complete_maintenance(&mut self) -> DomainResult<()> {
        self.apply(VehicleCommand::CompleteMaintenance)
    }

    /// Whether `command` would be accepted in the current status
    pub fn can_apply(&self, command: VehicleCommand) -> bool {
        self.status.can_transition(&command)
    }

    /// Replace model and/or year
    ///
    /// Nothing changes unless every supplied value is valid.
    pub fn update_details(
        &mut self,
        model: Option<VehicleModel>,
        year: Option<i32>,
    ) -> DomainResult<()> {
        if let Some(year) = year {
            Self::validate_year(year)?;
        }

        if model.is_none() && year.is_none() {
            return Ok(());
        }

        if let Some(model) = model {
            self.model = model;
        }
        if let Some(year) = year {
            self.year = year;
        }
        self.touch();
        Ok(())
    }

    fn apply(&mut self, command: VehicleCommand) -> DomainResult<()> {
        let (next, ()) = self.status.transition(&command)?;
        self.status = next;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl Entity for Vehicle {
    const NAME: &'static str = "Vehicle";

    fn id(&self) -> VehicleId {
        self.id
    }
}
