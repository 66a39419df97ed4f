// Copyright (c) 2025 - Cowboy AI, Inc.
//! Fleet Rental Demo
//!
//! Runs the core rental scenarios against in-memory repositories and logs
//! each outcome:
//! - register a customer and two vehicles
//! - rent one vehicle, then try to schedule maintenance on it (rejected)
//! - schedule and complete maintenance on the other vehicle
//! - try to deactivate the customer while a rental is outstanding (rejected)
//! - return the vehicle and deactivate
//!
//! Run with: cargo run --bin fleet-demo
//!
//! Environment:
//! - FLEET_LOG: tracing filter (default: info)
//! - FLEET_RECENT_MAINTENANCE_MONTHS: recent-maintenance window (default: 6)

use anyhow::{Context, Result};
use fleet_rental::{
    config::FleetConfig,
    domain::MaintenanceType,
    repository::{
        InMemoryMaintenanceHistoryRepository, InMemoryUserRepository, InMemoryVehicleRepository,
    },
    service::{
        CompleteMaintenanceDto, CreateUserDto, CreateVehicleDto, RentalService,
        RepositoryRentalService, RepositoryUserService, RepositoryVehicleService,
        ScheduleMaintenanceDto, UserService, VehicleService,
    },
    UserType,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = FleetConfig::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .context("Invalid FLEET_LOG filter")?,
        )
        .init();

    info!("🚀 Starting fleet rental demo");
    info!("📋 Configuration loaded:");
    info!("  - Log filter: {}", config.log_filter);
    info!(
        "  - Recent maintenance window: {} month(s)",
        config.recent_maintenance_months
    );

    let users = Arc::new(InMemoryUserRepository::new());
    let vehicles = Arc::new(InMemoryVehicleRepository::new());
    let maintenance = Arc::new(InMemoryMaintenanceHistoryRepository::new());

    let user_service = RepositoryUserService::new(users.clone());
    let vehicle_service =
        RepositoryVehicleService::new(vehicles.clone(), maintenance.clone(), users.clone())
            .with_config(&config);
    let rental_service = RepositoryRentalService::new(users, vehicles, maintenance);

    let customer = user_service
        .create_user(CreateUserDto {
            name: "John Doe".to_string(),
            email: "John.Doe@Example.com".to_string(),
            document: "123.456.789-00".to_string(),
            user_type: UserType::Customer,
        })
        .await?;
    info!("✅ Registered customer {} <{}>", customer.name, customer.email);

    let duplicate = user_service
        .create_user(CreateUserDto {
            name: "Johnny".to_string(),
            email: "JOHN.DOE@example.com".to_string(),
            document: "987.654.321-00".to_string(),
            user_type: UserType::Customer,
        })
        .await;
    if let Err(e) = duplicate {
        warn!("⚠️ Second registration refused ({:?}): {}", e.kind(), e);
    }

    let sedan = vehicle_service
        .create_vehicle(CreateVehicleDto {
            license_plate: "abc1234".to_string(),
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2022,
        })
        .await?;
    let hatch = vehicle_service
        .create_vehicle(CreateVehicleDto {
            license_plate: "xyz9876".to_string(),
            brand: "Honda".to_string(),
            model: "Fit".to_string(),
            year: 2020,
        })
        .await?;
    info!(
        "✅ Registered vehicles {} and {}",
        sedan.license_plate, hatch.license_plate
    );

    rental_service.rent_vehicle(customer.id, sedan.id).await?;
    info!("🔑 {} rented to {}", sedan.license_plate, customer.name);

    let oil_change = ScheduleMaintenanceDto {
        description: "Oil change".to_string(),
        estimated_cost: Decimal::new(250, 0),
        maintenance_type: MaintenanceType::Preventive,
        notes: None,
    };
    if let Err(e) = vehicle_service
        .schedule_maintenance(sedan.id, oil_change.clone())
        .await
    {
        warn!("⚠️ Maintenance on rented vehicle refused ({:?}): {}", e.kind(), e);
    }

    let scheduled = vehicle_service
        .schedule_maintenance(hatch.id, oil_change)
        .await?;
    info!(
        "🔧 Maintenance {} scheduled for {}",
        scheduled.id, hatch.license_plate
    );

    let completion = vehicle_service
        .complete_maintenance(
            hatch.id,
            CompleteMaintenanceDto {
                maintenance_id: scheduled.id,
                actual_cost: Decimal::new(310, 0),
                completion_notes: Some("Filter replaced as well".to_string()),
            },
        )
        .await?;
    info!(
        "✅ Maintenance completed: estimated {}, actual {} (variance {})",
        completion.estimated_cost,
        completion.actual_cost,
        completion.cost_variance()
    );
    info!(
        "📊 {} total maintenance cost: {}, recent maintenance: {}",
        hatch.license_plate,
        vehicle_service.get_total_maintenance_cost(hatch.id).await?,
        vehicle_service.has_recent_maintenance(hatch.id).await?
    );

    if let Err(e) = user_service.deactivate_user(customer.id).await {
        warn!("⚠️ Deactivation refused ({:?}): {}", e.kind(), e);
    }

    rental_service.return_vehicle(customer.id, sedan.id).await?;
    info!("🔑 {} returned", sedan.license_plate);

    let customer = user_service.deactivate_user(customer.id).await?;
    info!("✅ Customer active: {}", customer.is_active);

    let summary = serde_json::to_string_pretty(&vehicle_service.list_vehicles().await?)
        .context("Failed to serialize fleet")?;
    info!("📦 Fleet:\n{}", summary);

    Ok(())
}
