// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for fleet-rental
//!
//! Provides deterministic entities for integration tests. All ids and
//! timestamps are fixed constants so runs are reproducible.
//!
//! # Design Principles
//! - Ids and dates are constants (no `EntityId::new()` or `Utc::now()`)
//! - Entities are rebuilt through `rehydrate`, the same path persistence uses
//! - Each fixture returns a fresh value; tests never share state

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

use fleet_rental::domain::{
    Email, MaintenanceHistory, MaintenanceHistoryParts, MaintenanceId, MaintenanceType, User,
    UserId, UserParts, UserType, Vehicle, VehicleId, VehicleModel, VehicleParts, VehicleStatus,
};
use fleet_rental::repository::{
    InMemoryMaintenanceHistoryRepository, InMemoryUserRepository, InMemoryVehicleRepository,
};
use fleet_rental::service::{
    RepositoryRentalService, RepositoryUserService, RepositoryVehicleService,
};

// Fixed test ids (UUID v7 layout, deterministic)
pub const VEHICLE_ID_1: &str = "01934f4a-1000-7000-8000-000000001000";
pub const VEHICLE_ID_2: &str = "01934f4a-1001-7000-8000-000000001001";

pub const USER_ID_1: &str = "01934f4a-2000-7000-8000-000000002000";

pub const MAINTENANCE_ID_1: &str = "01934f4a-3000-7000-8000-000000003000";
pub const MAINTENANCE_ID_2: &str = "01934f4a-3001-7000-8000-000000003001";

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

pub fn vehicle_id_1() -> VehicleId {
    VehicleId::parse(VEHICLE_ID_1).expect("Invalid vehicle id in test fixture")
}

pub fn vehicle_id_2() -> VehicleId {
    VehicleId::parse(VEHICLE_ID_2).expect("Invalid vehicle id in test fixture")
}

pub fn user_id_1() -> UserId {
    UserId::parse(USER_ID_1).expect("Invalid user id in test fixture")
}

pub fn maintenance_id(raw: &str) -> MaintenanceId {
    MaintenanceId::parse(raw).expect("Invalid maintenance id in test fixture")
}

/// Parse the fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

/// Available Toyota Corolla, plate ABC1234
pub fn corolla_fixture() -> Vehicle {
    vehicle_fixture(vehicle_id_1(), "ABC1234", VehicleStatus::Available)
}

/// Rented Honda Civic, plate XYZ9876
pub fn rented_civic_fixture() -> Vehicle {
    Vehicle::rehydrate(VehicleParts {
        id: vehicle_id_2(),
        license_plate: "XYZ9876".to_string(),
        model: VehicleModel::new("Honda", "Civic").expect("Invalid model in test fixture"),
        year: 2021,
        status: VehicleStatus::Rented,
        created_at: fixed_timestamp(),
        updated_at: Some(fixed_timestamp()),
    })
}

pub fn vehicle_fixture(id: VehicleId, plate: &str, status: VehicleStatus) -> Vehicle {
    Vehicle::rehydrate(VehicleParts {
        id,
        license_plate: plate.to_string(),
        model: VehicleModel::new("Toyota", "Corolla").expect("Invalid model in test fixture"),
        year: 2022,
        status,
        created_at: fixed_timestamp(),
        updated_at: None,
    })
}

/// Active customer John Doe
pub fn customer_fixture() -> User {
    User::rehydrate(UserParts {
        id: user_id_1(),
        name: "John Doe".to_string(),
        email: Email::new("john.doe@example.com").expect("Invalid email in test fixture"),
        document: "123.456.789-00".to_string(),
        user_type: UserType::Customer,
        is_active: true,
        created_at: fixed_timestamp(),
        updated_at: None,
        rented_vehicles: Vec::new(),
    })
}

/// Maintenance record for `vehicle_id`, dated `days_ago` before the fixed timestamp
pub fn maintenance_fixture(
    id: &str,
    vehicle_id: VehicleId,
    cost: Decimal,
    days_ago: i64,
) -> MaintenanceHistory {
    let date = fixed_timestamp() - Duration::days(days_ago);
    MaintenanceHistory::rehydrate(MaintenanceHistoryParts {
        id: maintenance_id(id),
        vehicle_id,
        description: "Scheduled service".to_string(),
        cost,
        maintenance_type: MaintenanceType::Preventive,
        notes: None,
        maintenance_date: date,
        created_at: date,
    })
}

/// In-memory repositories with every service wired to them
pub struct FleetHarness {
    pub users: Arc<InMemoryUserRepository>,
    pub vehicles: Arc<InMemoryVehicleRepository>,
    pub maintenance: Arc<InMemoryMaintenanceHistoryRepository>,
    pub user_service: RepositoryUserService,
    pub vehicle_service: RepositoryVehicleService,
    pub rental_service: RepositoryRentalService,
}

impl FleetHarness {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let vehicles = Arc::new(InMemoryVehicleRepository::new());
        let maintenance = Arc::new(InMemoryMaintenanceHistoryRepository::new());

        Self {
            user_service: RepositoryUserService::new(users.clone()),
            vehicle_service: RepositoryVehicleService::new(
                vehicles.clone(),
                maintenance.clone(),
                users.clone(),
            ),
            rental_service: RepositoryRentalService::new(
                users.clone(),
                vehicles.clone(),
                maintenance.clone(),
            ),
            users,
            vehicles,
            maintenance,
        }
    }
}
