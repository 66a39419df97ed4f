// Copyright (c) 2025 - Cowboy AI, Inc.
//! Maintenance History Entity
//!
//! One workshop visit of a vehicle. Records reference their vehicle by id
//! only; ownership of the list lives in `VehicleAggregate`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::Entity;
use super::ids::EntityId;
use super::vehicle::VehicleId;
use crate::errors::{DomainError, DomainResult};

/// Identity of a maintenance record
pub type MaintenanceId = EntityId<MaintenanceHistory>;

/// Kind of maintenance performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    /// Scheduled upkeep
    Preventive,
    /// Repair after a failure
    Corrective,
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaintenanceType::Preventive => write!(f, "preventive"),
            MaintenanceType::Corrective => write!(f, "corrective"),
        }
    }
}

/// Maintenance record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceHistory {
    id: MaintenanceId,
    vehicle_id: VehicleId,
    description: String,
    cost: Decimal,
    maintenance_type: MaintenanceType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    notes: Option<String>,
    maintenance_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

/// Stored fields of a maintenance record, used by persistence
#[derive(Debug, Clone)]
pub struct MaintenanceHistoryParts {
    pub id: MaintenanceId,
    pub vehicle_id: VehicleId,
    pub description: String,
    pub cost: Decimal,
    pub maintenance_type: MaintenanceType,
    pub notes: Option<String>,
    pub maintenance_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceHistory {
    /// Costs strictly above this amount count as expensive
    pub const EXPENSIVE_THRESHOLD: Decimal = Decimal::ONE_THOUSAND;

    /// Create a record dated now
    pub fn new(
        vehicle_id: VehicleId,
        description: impl AsRef<str>,
        cost: Decimal,
        maintenance_type: MaintenanceType,
        notes: Option<&str>,
    ) -> DomainResult<Self> {
        Self::new_at(vehicle_id, description, cost, maintenance_type, notes, Utc::now())
    }

    /// Create a record dated `at`
    pub fn new_at(
        vehicle_id: VehicleId,
        description: impl AsRef<str>,
        cost: Decimal,
        maintenance_type: MaintenanceType,
        notes: Option<&str>,
        at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let description = description.as_ref().trim();
        if description.is_empty() {
            return Err(DomainError::validation(
                "description",
                "description cannot be empty",
            ));
        }

        if cost < Decimal::ZERO {
            return Err(DomainError::validation(
                "cost",
                format!("cost cannot be negative: {}", cost),
            ));
        }

        Ok(Self {
            id: MaintenanceId::new(),
            vehicle_id,
            description: description.to_string(),
            cost,
            maintenance_type,
            notes: notes.map(|n| n.trim().to_string()),
            maintenance_date: at,
            created_at: at,
        })
    }

    /// Rebuild a record from stored fields without validation
    pub fn rehydrate(parts: MaintenanceHistoryParts) -> Self {
        Self {
            id: parts.id,
            vehicle_id: parts.vehicle_id,
            description: parts.description,
            cost: parts.cost,
            maintenance_type: parts.maintenance_type,
            notes: parts.notes,
            maintenance_date: parts.maintenance_date,
            created_at: parts.created_at,
        }
    }

    pub fn vehicle_id(&self) -> VehicleId {
        self.vehicle_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cost(&self) -> Decimal {
        self.cost
    }

    pub fn maintenance_type(&self) -> MaintenanceType {
        self.maintenance_type
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn maintenance_date(&self) -> DateTime<Utc> {
        self.maintenance_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn update_notes(&mut self, notes: &str) {
        self.notes = Some(notes.trim().to_string());
    }

    pub fn is_preventive(&self) -> bool {
        self.maintenance_type == MaintenanceType::Preventive
    }

    pub fn is_corrective(&self) -> bool {
        self.maintenance_type == MaintenanceType::Corrective
    }

    pub fn is_expensive(&self) -> bool {
        self.cost > Self::EXPENSIVE_THRESHOLD
    }

    /// Whether the maintenance date falls within `[start, end]`
    pub fn falls_within(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.maintenance_date >= start && self.maintenance_date <= end
    }
}

impl Entity for MaintenanceHistory {
    const NAME: &'static str = "MaintenanceHistory";

    fn id(&self) -> MaintenanceId {
        self.id
    }
}
