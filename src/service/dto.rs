// Copyright (c) 2025 - Cowboy AI, Inc.
//! Transfer representations exchanged with service callers

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Entity, MaintenanceHistory, MaintenanceId, MaintenanceType, User, UserId, UserType, Vehicle,
    VehicleId, VehicleStatus,
};

/// User as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub document: String,
    pub user_type: UserType,
    pub is_active: bool,
    pub rented_vehicles_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            document: user.document().to_string(),
            user_type: user.user_type(),
            is_active: user.is_active(),
            rented_vehicles_count: user.rented_vehicles_count(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub document: String,
    pub user_type: UserType,
}

/// Fields left as `None` are not changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserDto {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Vehicle as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDto {
    pub id: VehicleId,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Vehicle> for VehicleDto {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id(),
            license_plate: vehicle.license_plate().to_string(),
            brand: vehicle.model().brand().to_string(),
            model: vehicle.model().model().to_string(),
            year: vehicle.year(),
            status: vehicle.status(),
            created_at: vehicle.created_at(),
            updated_at: vehicle.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVehicleDto {
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
}

/// Fields left as `None` are not changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateVehicleDto {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

/// Maintenance record as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceHistoryDto {
    pub id: MaintenanceId,
    pub vehicle_id: VehicleId,
    pub description: String,
    pub cost: Decimal,
    pub maintenance_type: MaintenanceType,
    pub notes: Option<String>,
    pub is_expensive: bool,
    pub maintenance_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&MaintenanceHistory> for MaintenanceHistoryDto {
    fn from(record: &MaintenanceHistory) -> Self {
        Self {
            id: record.id(),
            vehicle_id: record.vehicle_id(),
            description: record.description().to_string(),
            cost: record.cost(),
            maintenance_type: record.maintenance_type(),
            notes: record.notes().map(str::to_string),
            is_expensive: record.is_expensive(),
            maintenance_date: record.maintenance_date(),
            created_at: record.created_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMaintenanceDto {
    pub description: String,
    pub estimated_cost: Decimal,
    pub maintenance_type: MaintenanceType,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteMaintenanceDto {
    pub maintenance_id: MaintenanceId,
    pub actual_cost: Decimal,
    #[serde(default)]
    pub completion_notes: Option<String>,
}
