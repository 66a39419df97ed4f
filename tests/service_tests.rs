// Copyright (c) 2025 - Cowboy AI, Inc.
//! Integration tests for the application services
//!
//! Each test wires the services to fresh in-memory repositories and runs a
//! complete use case through the public API.

mod fixtures;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

use fixtures::*;
use fleet_rental::domain::{MaintenanceType, UserType, VehicleStatus};
use fleet_rental::repository::Repository;
use fleet_rental::service::{
    CompleteMaintenanceDto, CreateUserDto, CreateVehicleDto, RentalService,
    ScheduleMaintenanceDto, UserService, VehicleService,
};
use fleet_rental::ErrorKind;

fn john() -> CreateUserDto {
    CreateUserDto {
        name: "John Doe".to_string(),
        email: "John.Doe@Example.com".to_string(),
        document: "123.456.789-00".to_string(),
        user_type: UserType::Customer,
    }
}

fn corolla(plate: &str) -> CreateVehicleDto {
    CreateVehicleDto {
        license_plate: plate.to_string(),
        brand: "Toyota".to_string(),
        model: "Corolla".to_string(),
        year: 2022,
    }
}

fn brakes() -> ScheduleMaintenanceDto {
    ScheduleMaintenanceDto {
        description: "Brake pads".to_string(),
        estimated_cost: Decimal::new(800, 0),
        maintenance_type: MaintenanceType::Corrective,
        notes: None,
    }
}

/// Scenario: a rented vehicle cannot be sent to maintenance
#[tokio::test]
async fn test_rented_vehicle_cannot_be_scheduled() {
    let fleet = FleetHarness::new();
    let user = fleet.user_service.create_user(john()).await.unwrap();
    let vehicle = fleet
        .vehicle_service
        .create_vehicle(corolla("ABC1234"))
        .await
        .unwrap();
    fleet
        .rental_service
        .rent_vehicle(user.id, vehicle.id)
        .await
        .unwrap();

    let err = fleet
        .vehicle_service
        .schedule_maintenance(vehicle.id, brakes())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    let stored = fleet.vehicle_service.get_vehicle(vehicle.id).await.unwrap().unwrap();
    assert_eq!(stored.status, VehicleStatus::Rented);
    assert!(fleet
        .vehicle_service
        .get_maintenance_history(vehicle.id)
        .await
        .unwrap()
        .is_empty());
}

/// Scenario: the same address in different case is a duplicate
#[tokio::test]
async fn test_duplicate_email_is_case_insensitive() {
    let fleet = FleetHarness::new();
    fleet.user_service.create_user(john()).await.unwrap();

    let err = fleet
        .user_service
        .create_user(CreateUserDto {
            email: "JOHN.DOE@example.COM".to_string(),
            document: "999".to_string(),
            ..john()
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(fleet.user_service.list_users().await.unwrap().len(), 1);
}

/// Scenario: deactivation waits until every rental is returned
#[tokio::test]
async fn test_deactivate_with_outstanding_rental() {
    let fleet = FleetHarness::new();
    let user = fleet.user_service.create_user(john()).await.unwrap();
    let vehicle = fleet
        .vehicle_service
        .create_vehicle(corolla("ABC1234"))
        .await
        .unwrap();
    fleet
        .rental_service
        .rent_vehicle(user.id, vehicle.id)
        .await
        .unwrap();

    let err = fleet.user_service.deactivate_user(user.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(
        fleet.user_service.delete_user(user.id).await.unwrap_err().kind(),
        ErrorKind::Conflict
    );

    let stored = fleet.user_service.get_user(user.id).await.unwrap().unwrap();
    assert!(stored.is_active);
    assert_eq!(stored.rented_vehicles_count, 1);

    fleet
        .rental_service
        .return_vehicle(user.id, vehicle.id)
        .await
        .unwrap();
    let deactivated = fleet.user_service.deactivate_user(user.id).await.unwrap();
    assert!(!deactivated.is_active);
}

/// Scenario: a vehicle rented to a user is only released by returning it
#[tokio::test]
async fn test_status_change_cannot_release_a_rental() {
    let fleet = FleetHarness::new();
    let renter = fleet.user_service.create_user(john()).await.unwrap();
    let other = fleet
        .user_service
        .create_user(CreateUserDto {
            name: "Mary Roe".to_string(),
            email: "mary.roe@example.com".to_string(),
            document: "987.654.321-00".to_string(),
            user_type: UserType::Customer,
        })
        .await
        .unwrap();
    let vehicle = fleet
        .vehicle_service
        .create_vehicle(corolla("HLD1234"))
        .await
        .unwrap();
    fleet
        .rental_service
        .rent_vehicle(renter.id, vehicle.id)
        .await
        .unwrap();

    let err = fleet
        .vehicle_service
        .change_vehicle_status(vehicle.id, VehicleStatus::Available)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // Nobody else can take the vehicle while it is held
    let err = fleet
        .rental_service
        .rent_vehicle(other.id, vehicle.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    let other_stored = fleet.user_service.get_user(other.id).await.unwrap().unwrap();
    assert_eq!(other_stored.rented_vehicles_count, 0);

    // The renter can still return it and leave
    let returned = fleet
        .rental_service
        .return_vehicle(renter.id, vehicle.id)
        .await
        .unwrap();
    assert_eq!(returned.status, VehicleStatus::Available);
    fleet.user_service.deactivate_user(renter.id).await.unwrap();
}

/// Scenario: a rental made through the status change has no renter and is
/// ended the same way
#[tokio::test]
async fn test_status_change_rental_without_renter() {
    let fleet = FleetHarness::new();
    let user = fleet.user_service.create_user(john()).await.unwrap();
    let vehicle = fleet
        .vehicle_service
        .create_vehicle(corolla("WLK1234"))
        .await
        .unwrap();

    fleet
        .vehicle_service
        .change_vehicle_status(vehicle.id, VehicleStatus::Rented)
        .await
        .unwrap();
    assert!(fleet
        .rental_service
        .return_vehicle(user.id, vehicle.id)
        .await
        .is_err());

    let released = fleet
        .vehicle_service
        .change_vehicle_status(vehicle.id, VehicleStatus::Available)
        .await
        .unwrap();
    assert_eq!(released.status, VehicleStatus::Available);
    fleet
        .rental_service
        .rent_vehicle(user.id, vehicle.id)
        .await
        .unwrap();
}

/// Scenario: maintenance round trip through the service
#[tokio::test]
async fn test_maintenance_through_service() {
    let fleet = FleetHarness::new();
    let vehicle = fleet
        .vehicle_service
        .create_vehicle(corolla("MNT0001"))
        .await
        .unwrap();

    let scheduled = fleet
        .vehicle_service
        .schedule_maintenance(vehicle.id, brakes())
        .await
        .unwrap();
    assert_eq!(
        fleet
            .vehicle_service
            .list_vehicles_by_status(VehicleStatus::InMaintenance)
            .await
            .unwrap()
            .len(),
        1
    );
    assert!(fleet.vehicle_service.list_available_vehicles().await.unwrap().is_empty());

    let completion = fleet
        .vehicle_service
        .complete_maintenance(
            vehicle.id,
            CompleteMaintenanceDto {
                maintenance_id: scheduled.id,
                actual_cost: Decimal::new(950, 0),
                completion_notes: Some("rotors skimmed".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(completion.estimated_cost, Decimal::new(800, 0));
    assert_eq!(completion.actual_cost, Decimal::new(950, 0));
    assert_eq!(
        fleet
            .vehicle_service
            .get_total_maintenance_cost(vehicle.id)
            .await
            .unwrap(),
        Decimal::new(800, 0)
    );
    assert_eq!(fleet.maintenance.len().await, 1);
}

/// Scenario: deleting a vehicle removes its maintenance history
#[tokio::test]
async fn test_delete_vehicle_removes_history() {
    let fleet = FleetHarness::new();
    let vehicle = fleet
        .vehicle_service
        .create_vehicle(corolla("DEL0001"))
        .await
        .unwrap();
    let scheduled = fleet
        .vehicle_service
        .schedule_maintenance(vehicle.id, brakes())
        .await
        .unwrap();
    fleet
        .vehicle_service
        .complete_maintenance(
            vehicle.id,
            CompleteMaintenanceDto {
                maintenance_id: scheduled.id,
                actual_cost: Decimal::new(800, 0),
                completion_notes: None,
            },
        )
        .await
        .unwrap();

    fleet.vehicle_service.delete_vehicle(vehicle.id).await.unwrap();

    assert!(!fleet.vehicles.exists(vehicle.id).await.unwrap());
    assert!(fleet.maintenance.is_empty().await);
}

/// Scenario: plate lookups ignore case and surrounding whitespace
#[tokio::test]
async fn test_vehicle_lookup_by_plate() {
    let fleet = FleetHarness::new();
    let created = fleet
        .vehicle_service
        .create_vehicle(corolla("abc1234"))
        .await
        .unwrap();

    let found = fleet
        .vehicle_service
        .get_vehicle_by_license_plate(" Abc1234 ")
        .await
        .unwrap();
    assert_eq!(found, Some(created));
}

/// Scenario: customers and staff are listed separately
#[tokio::test]
async fn test_list_users_by_type() {
    let fleet = FleetHarness::new();
    fleet.user_service.create_user(john()).await.unwrap();
    fleet
        .user_service
        .create_user(CreateUserDto {
            name: "Maria Staff".to_string(),
            email: "maria@fleet.io".to_string(),
            document: "555".to_string(),
            user_type: UserType::Employee,
        })
        .await
        .unwrap();

    let employees = fleet
        .user_service
        .list_users_by_type(UserType::Employee)
        .await
        .unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].name, "Maria Staff");
    assert_eq!(fleet.user_service.list_active_users().await.unwrap().len(), 2);
}

/// Scenario: rehydrated users with rentals can be stored and reloaded
#[tokio::test]
async fn test_seeded_repositories() {
    let fleet = FleetHarness::new();
    let mut user = customer_fixture();
    let mut vehicle = corolla_fixture();
    user.rent_vehicle(&mut vehicle).unwrap();
    fleet.users.add(user).await.unwrap();
    fleet.vehicles.add(vehicle).await.unwrap();

    let returned = fleet
        .rental_service
        .return_vehicle(user_id_1(), vehicle_id_1())
        .await
        .unwrap();
    assert_eq!(returned.status, VehicleStatus::Available);
}
