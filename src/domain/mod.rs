// Copyright (c) 2025 - Cowboy AI, Inc.
//! Fleet Rental Domain Models
//!
//! Entities, value objects and the vehicle aggregate, each validated at
//! construction and mutated only through named behavior methods.
//!
//! # Value Objects with Invariants
//!
//! - [`Email`] - Lower-cased, pattern-checked address
//! - [`VehicleModel`] - Brand and model, compared case-insensitively
//!
//! # Entities
//!
//! - [`Vehicle`] - Rentable vehicle with a guarded status lifecycle
//! - [`User`] - Customer or staff member, tracks vehicles rented in a use case
//! - [`MaintenanceHistory`] - One maintenance of a vehicle
//!
//! # Aggregates
//!
//! - [`VehicleAggregate`] - Vehicle plus its maintenance records
//!
//! # Relationships
//!
//! Entities reference each other by typed id ([`EntityId`]), never by
//! ownership, except inside [`VehicleAggregate`].

pub mod email;
pub mod entity;
pub mod ids;
pub mod maintenance;
pub mod user;
pub mod vehicle;
pub mod vehicle_aggregate;
pub mod vehicle_model;

pub use email::Email;
pub use entity::Entity;
pub use ids::EntityId;
pub use maintenance::{
    MaintenanceHistory, MaintenanceHistoryParts, MaintenanceId, MaintenanceType,
};
pub use user::{User, UserId, UserParts, UserType};
pub use vehicle::{Vehicle, VehicleId, VehicleParts, VehicleStatus};
pub use vehicle_aggregate::{
    MaintenanceCompletion, MaintenancePolicy, NoMaintenanceRequired, VehicleAggregate,
    DEFAULT_RECENT_MAINTENANCE_MONTHS,
};
pub use vehicle_model::VehicleModel;
